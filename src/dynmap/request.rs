//! Builds a [`Marker`] from slash-command options.
//!
//! The chat platform delivers options in whatever order the user filled them
//! in, and leaves out optional ones entirely. Each option name maps onto one
//! [`MarkerField`]; anything outside that vocabulary is rejected rather than
//! ignored.
//!
//! [`CommandOption`] is the option tree as the gateway delivers it. The bot
//! layer embeds it in its interaction payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{DynmapError, DynmapResult};
use super::Marker;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Integer option.
    Integer(i64),
    /// String option.
    String(String),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// A named option, or a subcommand grouping further options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option or subcommand name.
    pub name: String,

    /// Value for leaf options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<OptionValue>,

    /// Set on the option the user is typing into during autocomplete.
    #[serde(default, skip_serializing_if = "is_false")]
    pub focused: bool,

    /// Child options of a subcommand.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Self>,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires fn(&T) -> bool
const fn is_false(b: &bool) -> bool {
    !*b
}

impl CommandOption {
    /// Creates a leaf option.
    pub fn new(name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            focused: false,
            options: Vec::new(),
        }
    }

    /// Creates a subcommand grouping `options`.
    pub fn group(name: impl Into<String>, options: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            value: None,
            focused: false,
            options,
        }
    }

    /// Returns the value if it is a string.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            Some(OptionValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the value if it is an integer.
    #[must_use]
    pub fn integer_value(&self) -> Option<i64> {
        match &self.value {
            Some(OptionValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Finds a direct child option by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        self.options.iter().find(|option| option.name == name)
    }
}

/// The option vocabulary of the `addmarker` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerField {
    /// `label` (string)
    Label,
    /// `id` (string)
    Id,
    /// `icon` (string)
    Icon,
    /// `set` (string)
    Set,
    /// `x` (integer)
    X,
    /// `y` (integer)
    Y,
    /// `z` (integer)
    Z,
    /// `world` (string)
    World,
}

impl MarkerField {
    /// Every field, in the order the command definition lists them.
    pub const ALL: [Self; 8] = [
        Self::Label,
        Self::X,
        Self::Y,
        Self::Z,
        Self::World,
        Self::Id,
        Self::Icon,
        Self::Set,
    ];

    /// Option name as it appears in the interaction payload.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Id => "id",
            Self::Icon => "icon",
            Self::Set => "set",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::World => "world",
        }
    }

    /// Looks up a field by option name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Whether the field carries an integer rather than a string.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::X | Self::Y | Self::Z)
    }

    /// Stores the option's value in the matching field of `marker`.
    fn apply(self, marker: &mut Marker, option: &CommandOption) -> DynmapResult<()> {
        match self {
            Self::Label => marker.label = string_value(option)?,
            Self::Id => marker.id = string_value(option)?,
            Self::Icon => marker.icon = string_value(option)?,
            Self::Set => marker.set = string_value(option)?,
            Self::World => marker.world = string_value(option)?,
            Self::X => marker.x = integer_value(option)?,
            Self::Y => marker.y = integer_value(option)?,
            Self::Z => marker.z = integer_value(option)?,
        }
        Ok(())
    }
}

impl fmt::Display for MarkerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn string_value(option: &CommandOption) -> DynmapResult<String> {
    option
        .string_value()
        .map(str::to_string)
        .ok_or_else(|| DynmapError::option_type(&option.name, "a string"))
}

fn integer_value(option: &CommandOption) -> DynmapResult<i64> {
    option
        .integer_value()
        .ok_or_else(|| DynmapError::option_type(&option.name, "an integer"))
}

/// Extracts a [`Marker`] from the options of an `addmarker` invocation.
///
/// `groups` is the top-level option list of the interaction; it must hold
/// exactly one subcommand group whose children are the marker fields.
/// Fields that were not supplied keep their empty/zero value.
///
/// # Errors
///
/// Returns [`DynmapError::MalformedCommand`] if there is not exactly one
/// group, [`DynmapError::UnrecognisedOption`] for an unknown option name, and
/// [`DynmapError::OptionType`] if a value has the wrong kind.
pub fn extract_marker(groups: &[CommandOption]) -> DynmapResult<Marker> {
    let [group] = groups else {
        return Err(DynmapError::MalformedCommand {
            groups: groups.len(),
        });
    };

    let mut marker = Marker::default();
    for option in &group.options {
        let field = MarkerField::from_name(&option.name)
            .ok_or_else(|| DynmapError::unrecognised_option(&option.name))?;
        field.apply(&mut marker, option)?;
    }

    Ok(marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(options: Vec<CommandOption>) -> Vec<CommandOption> {
        vec![CommandOption::group("addmarker", options)]
    }

    #[test]
    fn fields_in_any_order() {
        let groups = group(vec![
            CommandOption::new("world", "overworld"),
            CommandOption::new("z", -20),
            CommandOption::new("label", "My Base"),
            CommandOption::new("x", 10),
            CommandOption::new("y", 64),
        ]);

        let marker = extract_marker(&groups).unwrap();
        assert_eq!(
            marker,
            Marker {
                label: "My Base".to_string(),
                x: 10,
                y: 64,
                z: -20,
                world: "overworld".to_string(),
                ..Marker::default()
            }
        );
    }

    #[test]
    fn optional_fields() {
        let groups = group(vec![
            CommandOption::new("id", "base1"),
            CommandOption::new("icon", "house"),
            CommandOption::new("set", "bases"),
        ]);

        let marker = extract_marker(&groups).unwrap();
        assert_eq!(marker.id, "base1");
        assert_eq!(marker.icon, "house");
        assert_eq!(marker.set, "bases");
        assert!(marker.label.is_empty());
    }

    #[test]
    fn wrong_group_count() {
        assert!(matches!(
            extract_marker(&[]),
            Err(DynmapError::MalformedCommand { groups: 0 })
        ));

        let two = vec![
            CommandOption::group("addmarker", vec![]),
            CommandOption::group("addmarker", vec![]),
        ];
        assert!(matches!(
            extract_marker(&two),
            Err(DynmapError::MalformedCommand { groups: 2 })
        ));
    }

    #[test]
    fn unknown_option_rejected() {
        let groups = group(vec![
            CommandOption::new("label", "Spawn"),
            CommandOption::new("colour", "red"),
        ]);
        let err = extract_marker(&groups).unwrap_err();
        assert!(matches!(err, DynmapError::UnrecognisedOption { ref name } if name == "colour"));
    }

    #[test]
    fn wrong_value_kind_rejected() {
        let groups = group(vec![CommandOption::new("x", "ten")]);
        assert!(matches!(
            extract_marker(&groups),
            Err(DynmapError::OptionType { .. })
        ));

        let groups = group(vec![CommandOption {
            name: "label".to_string(),
            value: Some(OptionValue::Integer(5)),
            focused: false,
            options: Vec::new(),
        }]);
        assert!(extract_marker(&groups).is_err());
    }

    #[test]
    fn options_from_gateway_json() {
        let groups: Vec<CommandOption> = serde_json::from_str(
            r#"[{"name":"addmarker","options":[
                {"name":"label","value":"Spawn"},
                {"name":"x","value":-4},
                {"name":"world","value":"overworld","focused":true}
            ]}]"#,
        )
        .unwrap();

        assert!(groups[0].get("world").unwrap().focused);
        let marker = extract_marker(&groups).unwrap();
        assert_eq!(marker.label, "Spawn");
        assert_eq!(marker.x, -4);
        assert_eq!(marker.world, "overworld");
    }

    #[test]
    fn field_names_round_trip() {
        for field in MarkerField::ALL {
            assert_eq!(MarkerField::from_name(field.name()), Some(field));
        }
        assert!(MarkerField::X.is_integer());
        assert!(!MarkerField::World.is_integer());
    }
}
