//! Turn steps and game status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps of a goldfish turn, in order
///
/// There is no upkeep, end step or priority: nothing in the simulated deck
/// cares about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Untap,
    Draw,
    Main1,
    Combat,
    Main2,
    Discard,
}

impl Step {
    /// Get the next step in turn order
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Untap => Some(Step::Draw),
            Step::Draw => Some(Step::Main1),
            Step::Main1 => Some(Step::Combat),
            Step::Combat => Some(Step::Main2),
            Step::Main2 => Some(Step::Discard),
            Step::Discard => None, // End of turn
        }
    }

    /// Every step, starting from untap
    pub fn all() -> impl Iterator<Item = Step> {
        std::iter::successors(Some(Step::Untap), Step::next)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Untap => "Untap",
            Step::Draw => "Draw",
            Step::Main1 => "Main 1",
            Step::Combat => "Combat",
            Step::Main2 => "Main 2",
            Step::Discard => "Discard",
        };
        write!(f, "{name}")
    }
}

/// Where a game stands after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Playing,
    /// Opponent's life reached zero
    Win,
    /// Had to draw from an empty library
    Lose,
    /// Part of the outcome vocabulary but no rule produces it
    Draw,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Playing)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Playing => "playing",
            Status::Win => "win",
            Status::Lose => "lose",
            Status::Draw => "draw",
        };
        write!(f, "{name}")
    }
}
