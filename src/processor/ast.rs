//! Document model produced by the parser and handed to writers.
//!
//! Everything here is built once by `script_parser` and never mutated.

use serde::Serialize;
use std::fmt;

/// One complete screenplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub metadata: Vec<MetadataPair>,
    pub scenes: Vec<Scene>,
}

impl Document {
    /// First value recorded for `key`. Keys may repeat.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| pair.value.as_str())
    }
}

/// `KEY:value` from the `~` fenced preamble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataPair {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    Int,
    Ext,
    IntExt,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationKind::Int => f.write_str("INT"),
            LocationKind::Ext => f.write_str("EXT"),
            LocationKind::IntExt => f.write_str("INT/EXT"),
        }
    }
}

/// `|INT. KITCHEN - DAY|`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneHeading {
    pub location_kind: LocationKind,
    /// Uppercased, without the INT/EXT keyword.
    pub location: String,
    pub has_time: bool,
    /// Uppercased; empty unless `has_time`.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub heading: SceneHeading,
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn dialogue(&self) -> impl Iterator<Item = &DialogueUnit> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::DialogueUnit(unit) => Some(unit),
            _ => None,
        })
    }
}

/// `=NAME(parenthetical){dialogue}`, parenthetical optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueUnit {
    pub character_name: String,
    pub has_parenthetical: bool,
    pub parenthetical: String,
    pub dialogue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum SceneItem {
    DialogueUnit(DialogueUnit),

    /// `[text]`
    Action { text: String },

    /// `-text-`
    Shot { text: String },

    /// `+text+`
    Transition { text: String },
}
