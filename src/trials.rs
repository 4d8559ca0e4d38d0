//! Statistics driver: many independent games in parallel
//!
//! Each trial builds its own `GameState` from a seed derived from the master
//! seed and the trial index, so results do not depend on thread scheduling.
//! Outcomes flow to a single aggregator over an mpsc channel.

use crate::config::SimulationConfig;
use crate::game::{GameLoop, GameResult, GameState, Policy, Status, VerbosityLevel};
use crate::loader::Deck;
use crate::{GoldfishError, Result};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::mpsc;
use std::time::Instant;

/// Percentiles reported for turns-to-win
pub const PERCENTILES: [u32; 4] = [50, 75, 90, 95];

/// How to run a batch of trials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialOptions {
    pub trials: usize,
    pub seed: u64,
    pub policy: Policy,
    /// Worker threads (None = rayon default)
    pub threads: Option<usize>,
    pub config: SimulationConfig,
}

impl Default for TrialOptions {
    fn default() -> Self {
        TrialOptions {
            trials: 1000,
            seed: 42,
            policy: Policy::Greedy,
            threads: None,
            config: SimulationConfig::default(),
        }
    }
}

/// Aggregated outcome of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialReport {
    pub trials: usize,
    pub wins: usize,
    pub losses: usize,
    /// Games stopped by the turn limit
    pub unfinished: usize,
    /// Mean turn of the winning combat over won games
    pub average_turns: f64,
    /// `(percentile, turn)` pairs over won games
    pub percentiles: Vec<(u32, u32)>,
    /// `(turn, percent of all trials won by that turn)`
    pub won_by_turn: Vec<(u32, f64)>,
    /// Winning turn of every trial, in trial order
    pub win_turns: Vec<Option<u32>>,
}

/// Seed for trial `index`
///
/// Golden-ratio spacing of the master seed, mixed through xoshiro so that
/// neighbouring trials get unrelated shuffles.
pub fn trial_seed(master: u64, index: usize) -> u64 {
    let spaced = master.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    Xoshiro256PlusPlus::seed_from_u64(spaced).next_u64()
}

/// Play one complete silent game
pub fn run_trial(deck: &Deck, options: &TrialOptions, index: usize) -> GameResult {
    let mut game = GameState::with_seed(deck, &options.config, trial_seed(options.seed, index));
    game.logger.set_verbosity(VerbosityLevel::Silent);
    GameLoop::new(&mut game, options.policy, &options.config).run_game()
}

/// Run `options.trials` games in parallel and aggregate the results
pub fn run_trials(deck: &Deck, options: &TrialOptions) -> Result<TrialReport> {
    if options.trials == 0 {
        return Err(GoldfishError::InvalidConfig("number of trials must be positive".to_string()));
    }
    options.config.validate(deck.total_cards())?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = options.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder
        .build()
        .map_err(|e| GoldfishError::InvalidConfig(format!("thread pool: {e}")))?;

    let start = Instant::now();
    let (sender, receiver) = mpsc::channel::<(usize, GameResult)>();
    pool.install(|| {
        (0..options.trials)
            .into_par_iter()
            .for_each_with(sender, |tx, index| {
                // The receiver outlives the pool, so sends cannot fail
                let _ = tx.send((index, run_trial(deck, options, index)));
            });
    });

    let mut results: Vec<(usize, GameResult)> = receiver.iter().collect();
    results.sort_by_key(|(index, _)| *index);
    let elapsed = start.elapsed();

    let report = TrialReport::from_results(results.into_iter().map(|(_, r)| r));
    if elapsed.as_secs_f64() > 0.0 {
        log_throughput(report.trials, elapsed.as_secs_f64());
    }
    Ok(report)
}

#[cfg(feature = "verbose-logging")]
fn log_throughput(trials: usize, seconds: f64) {
    eprintln!("{trials} games in {seconds:.2}s ({:.0} games/s)", trials as f64 / seconds);
}

#[cfg(not(feature = "verbose-logging"))]
fn log_throughput(_trials: usize, _seconds: f64) {}

impl TrialReport {
    /// Aggregate game results (in trial order)
    pub fn from_results(results: impl IntoIterator<Item = GameResult>) -> Self {
        let mut trials = 0;
        let mut wins = 0;
        let mut losses = 0;
        let mut unfinished = 0;
        let mut win_turns = Vec::new();

        for result in results {
            trials += 1;
            match result.status {
                Status::Win => wins += 1,
                Status::Lose => losses += 1,
                Status::Draw | Status::Playing => unfinished += 1,
            }
            win_turns.push(result.win_turn());
        }

        let mut sorted: Vec<u32> = win_turns.iter().flatten().copied().collect();
        sorted.sort_unstable();

        let average_turns = if sorted.is_empty() {
            0.0
        } else {
            sorted.iter().map(|&t| f64::from(t)).sum::<f64>() / sorted.len() as f64
        };

        let percentiles = if sorted.is_empty() {
            Vec::new()
        } else {
            PERCENTILES
                .iter()
                .map(|&p| (p, sorted[sorted.len() * p as usize / 100]))
                .collect()
        };

        let won_by_turn = match (sorted.first(), sorted.last()) {
            (Some(&first), Some(&last)) => (first..=last)
                .map(|turn| {
                    let won = sorted.partition_point(|&t| t <= turn);
                    (turn, 100.0 * won as f64 / trials as f64)
                })
                .collect(),
            _ => Vec::new(),
        };

        TrialReport {
            trials,
            wins,
            losses,
            unfinished,
            average_turns,
            percentiles,
            won_by_turn,
            win_turns,
        }
    }

    /// Turn at the given percentile, if it was reported
    pub fn percentile(&self, p: u32) -> Option<u32> {
        self.percentiles.iter().find(|&&(q, _)| q == p).map(|&(_, t)| t)
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trials: {}  wins: {}  losses: {}  unfinished: {}",
            self.trials, self.wins, self.losses, self.unfinished
        )?;
        writeln!(f, "Average turns to win: {:.2}", self.average_turns)?;
        for (p, turn) in &self.percentiles {
            writeln!(f, "  {p}th percentile: turn {turn}")?;
        }
        writeln!(f, "Won by turn:")?;
        for (turn, pct) in &self.won_by_turn {
            writeln!(f, "  {turn:>3}: {pct:6.2}%")?;
        }
        Ok(())
    }
}
