//! Shared test doubles.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use dynmap_rcon_bot::rcon::{RconError, RconResult, Transport};

/// Answers console commands from a fixed table and records what was sent.
#[derive(Debug, Default)]
pub struct FakeServer {
    replies: HashMap<String, String>,
    sent: Mutex<Vec<String>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, command: &str, response: &str) -> Self {
        self.replies
            .insert(command.to_string(), response.to_string());
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for FakeServer {
    async fn send(&self, command: &str) -> RconResult<String> {
        self.sent.lock().unwrap().push(command.to_string());
        self.replies
            .get(command)
            .cloned()
            .ok_or(RconError::Timeout {
                after: Duration::from_secs(4),
            })
    }
}

pub const WORLDLIST: &str = "\
world overworld: loaded=true, enabled=true, title=world, center=0.0/64.0/0.0, extrazoomout=2, sendhealth=true, sendposition=true, protected=false, showborder=true
world DIM-1: loaded=true, enabled=true, title=nether, center=0.0/64.0/0.0, extrazoomout=0, sendhealth=true, sendposition=true, protected=false, showborder=true";

pub const ICONS: &str = "\
house: label:\"house\", builtin:true
tower: label:\"tower\", builtin:true
anchor: label:\"anchor\", builtin:true";

pub const SETS: &str = "\
markers: label:\"Markers\", hide:false, prio:0, deficon:default, persistent=true
bases: label:\"Player Bases\", hide:false, prio:10, deficon:house";
