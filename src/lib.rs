//! MTG Goldfish - solitaire turn-to-kill simulator
//!
//! Plays a fixed Magic: The Gathering deck against an opponent who never
//! acts, choosing plays with a mana affordability solver and a
//! play-sequencing search, and reports how many turns the deck needs.

pub mod ability;
pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod trials;
pub mod zones;

pub use error::{GoldfishError, Result};
