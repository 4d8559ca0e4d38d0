//! Deck loaders
//!
//! Parser for the deck format (.dck), resolved against the built-in catalog

pub mod deck;

pub use deck::{Deck, DeckEntry, DeckList, DeckListEntry, DeckLoader};
