//! Core card and mana types

pub mod card;
pub mod mana;
pub mod permanent;
pub mod types;

pub use card::{Card, CardEffect, CardType};
pub use mana::{Color, ManaCost, ManaPool};
pub use permanent::Permanent;
pub use types::{normalize_card_name, CardName, CreatureType};
