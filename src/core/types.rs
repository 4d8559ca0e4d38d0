//! Strongly-typed wrappers for card concepts
//!
//! Newtypes and small enums keep card names and creature types from being
//! mixed up with arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Creature subtype tag
///
/// Only the tribes that appear in the catalog are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureType {
    Human,
    Warrior,
    Demon,
    Cat,
    Orc,
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreatureType::Human => "Human",
            CreatureType::Warrior => "Warrior",
            CreatureType::Demon => "Demon",
            CreatureType::Cat => "Cat",
            CreatureType::Orc => "Orc",
        };
        write!(f, "{name}")
    }
}

/// Card name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lookup key: ASCII-folded, lowercased, punctuation-insensitive
    ///
    /// "Raiders’ Spoils", "raiders' spoils" and "RAIDERS SPOILS" share a key.
    pub fn lookup_key(&self) -> String {
        normalize_card_name(&self.0)
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

/// Normalize a card name for catalog lookups
pub fn normalize_card_name(name: &str) -> String {
    deunicode::deunicode(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
