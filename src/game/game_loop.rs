//! Turn state machine
//!
//! Drives a `GameState` through Untap, Draw, Main 1, Combat, Main 2 and
//! Discard, asking the configured policy for plays in the second main phase.

use crate::config::SimulationConfig;
use crate::game::phase::{Status, Step};
use crate::game::{greedy, land_plan, search, GameState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only turn summaries and game outcome
    Minimal = 1,
    /// Normal - draws, plays and attacks (default)
    #[default]
    Normal = 2,
    /// Verbose - steps and mana payments
    Verbose = 3,
}

/// How the second main phase chooses plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Policy {
    /// First land, then the longest affordable hand prefix
    #[default]
    Greedy,
    /// Permutation search with greedy look-ahead
    Exhaustive,
    /// Best land drop plus the most expensive payable spell subset
    PowerSet,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Greedy => "greedy",
            Policy::Exhaustive => "exhaustive",
            Policy::PowerSet => "power-set",
        };
        write!(f, "{name}")
    }
}

/// Reason the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// Opponent's life reached zero in combat
    OpponentDefeated,
    /// Tried to draw from an empty library
    Decking,
    /// Game reached maximum turn limit
    TurnLimit,
}

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub status: Status,
    /// Turn on which the game ended
    pub turns_played: u32,
    pub opponent_life: i32,
    pub end_reason: GameEndReason,
}

impl GameResult {
    /// Turn of the winning combat, if the game was won
    pub fn win_turn(&self) -> Option<u32> {
        (self.status == Status::Win).then_some(self.turns_played)
    }
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    policy: Policy,
    config: &'a SimulationConfig,
    /// Maximum turns before giving up
    max_turns: u32,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state
    pub fn new(game: &'a mut GameState, policy: Policy, config: &'a SimulationConfig) -> Self {
        GameLoop {
            game,
            policy,
            config,
            max_turns: 1000,
        }
    }

    /// Set maximum turns before stopping
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set verbosity level on the game's logger
    pub fn with_verbosity(self, verbosity: VerbosityLevel) -> Self {
        self.game.logger.set_verbosity(verbosity);
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Run one step of the current turn
    pub fn run_step(&mut self, step: Step) -> Status {
        self.game.step = step;
        if self.game.logger.enabled(VerbosityLevel::Verbose) {
            self.game.logger.verbose(&format!("-- {step} --"));
        }

        match step {
            Step::Untap => {
                self.game.untap();
                Status::Playing
            }
            Step::Draw => self.game.draw_step(),
            // Everything is cast after combat so that raid is active
            Step::Main1 => Status::Playing,
            Step::Combat => self.game.combat_step(),
            Step::Main2 => {
                self.main_phase();
                Status::Playing
            }
            Step::Discard => {
                self.game.discard_step();
                Status::Playing
            }
        }
    }

    fn main_phase(&mut self) {
        match self.policy {
            Policy::Greedy => {
                greedy::main_phase(self.game);
            }
            Policy::Exhaustive => {
                search::main_phase(self.game, self.config);
            }
            Policy::PowerSet => {
                land_plan::main_phase(self.game);
            }
        }
    }

    /// Play the current turn from untap to discard
    ///
    /// Stops at the first terminal status without advancing the turn
    /// counter; otherwise moves on to the next turn.
    pub fn play_one_turn(&mut self) -> Status {
        if self.game.logger.enabled(VerbosityLevel::Normal) {
            self.game.logger.normal(&format!("Turn {}", self.game.turn));
        }

        for step in Step::all() {
            let status = self.run_step(step);
            if status.is_terminal() {
                return status;
            }
        }

        if self.game.logger.enabled(VerbosityLevel::Minimal) {
            self.game.logger.minimal(&format!(
                "Turn {}: opponent at {}, {} in hand, {} permanents",
                self.game.turn,
                self.game.opponent_life,
                self.game.hand.len(),
                self.game.battlefield.len()
            ));
        }
        self.game.next_turn();
        Status::Playing
    }

    /// Play turns until the game ends or the turn limit is reached
    pub fn run_game(&mut self) -> GameResult {
        loop {
            let status = self.play_one_turn();
            let end_reason = match status {
                Status::Win => GameEndReason::OpponentDefeated,
                Status::Lose => GameEndReason::Decking,
                Status::Draw => GameEndReason::TurnLimit,
                Status::Playing if self.game.turn > self.max_turns => GameEndReason::TurnLimit,
                Status::Playing => continue,
            };

            let result = GameResult {
                status,
                turns_played: self.game.turn,
                opponent_life: self.game.opponent_life,
                end_reason,
            };
            self.game.logger.minimal(&format!(
                "Game over on turn {} ({}): {:?}",
                result.turns_played, result.status, result.end_reason
            ));
            return result;
        }
    }
}
