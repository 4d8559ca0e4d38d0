//! Game state, turn structure and play policies

/// Log a formatted game event at Normal level
///
/// Compiles to nothing without the `verbose-logging` feature, and skips the
/// `format!` when the logger would drop the message (look-ahead copies).
macro_rules! log_if_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            if $logger.enabled($crate::game::VerbosityLevel::Normal) {
                $logger.normal(&format!($($arg)*));
            }
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger; // Suppress unused variable warning
        }
    };
}

pub mod combat;
pub mod game_loop;
pub mod greedy;
pub mod land_plan;
pub mod logger;
pub mod mana_solver;
pub mod phase;
pub mod search;
pub mod state;

pub use combat::CombatState;
pub use game_loop::{GameEndReason, GameLoop, GameResult, Policy, VerbosityLevel};
pub use land_plan::LandPlan;
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode};
pub use mana_solver::{ManaProfile, ManaSolver, ManaSource, Payment};
pub use phase::{Status, Step};
pub use search::{SearchOutcome, SequenceSearch};
pub use state::GameState;
