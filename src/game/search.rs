//! Exhaustive play-sequencing search
//!
//! For every distinct ordering of the hand, finish the current turn with the
//! greedy policy using that order, then keep playing greedily against the
//! frozen library until the game ends. The ordering that wins in the fewest
//! additional turns is replayed on the real game.
//!
//! Greedy play is prefix-based, so hand order decides both which land is
//! played and which spells fit the mana; permuting the hand explores those
//! choices without a separate move generator.

use crate::config::SimulationConfig;
use crate::core::Card;
use crate::game::{greedy, GameLoop, GameState, Policy, Status};
use std::sync::Arc;

/// Outcome of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Additional turns (after the current one) until the winning combat
    pub turns_to_win: Option<u32>,

    /// Distinct orderings simulated
    pub permutations: usize,
}

/// Search context: best result so far and the bound it implies
///
/// Passed by `&mut` through the enumeration instead of living in globals,
/// so concurrent games never share search state.
#[derive(Debug, Clone)]
pub struct SequenceSearch {
    /// Longest continuation worth simulating
    limit: u32,

    best_turns: Option<u32>,

    best_order: Option<Vec<Arc<Card>>>,

    permutations: usize,
}

impl SequenceSearch {
    pub fn new(config: &SimulationConfig) -> Self {
        SequenceSearch {
            limit: config.lookahead_limit,
            best_turns: None,
            best_order: None,
            permutations: 0,
        }
    }

    /// Continuations are cut off once they reach this many turns
    fn bound(&self) -> u32 {
        self.best_turns.unwrap_or(self.limit + 1)
    }

    pub fn best_turns(&self) -> Option<u32> {
        self.best_turns
    }

    pub fn best_order(&self) -> Option<&[Arc<Card>]> {
        self.best_order.as_deref()
    }

    /// Simulate `order` to completion on a copy of `state`
    ///
    /// Returns the number of additional turns to a win, if it wins before
    /// the current bound.
    fn evaluate(&mut self, state: &GameState, order: &[Arc<Card>], config: &SimulationConfig) -> Option<u32> {
        self.permutations += 1;

        let mut sim = state.lookahead_copy();
        sim.hand.set_order(order.to_vec());
        greedy::main_phase(&mut sim);
        sim.discard_step();
        sim.next_turn();

        let mut turns = 0;
        while turns + 1 < self.bound() {
            let status = GameLoop::new(&mut sim, Policy::Greedy, config).play_one_turn();
            turns += 1;
            match status {
                Status::Win => return Some(turns),
                Status::Playing => {}
                // Any other terminal state ends this line
                _ => return None,
            }
        }
        None
    }

    /// Try every distinct ordering of the current hand
    pub fn run(&mut self, state: &GameState, config: &SimulationConfig) -> SearchOutcome {
        let mut order: Vec<Arc<Card>> = state.hand.iter().cloned().collect();
        order.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

        loop {
            if let Some(turns) = self.evaluate(state, &order, config) {
                self.best_turns = Some(turns);
                self.best_order = Some(order.clone());
            }
            if !next_permutation(&mut order) {
                break;
            }
        }

        SearchOutcome {
            turns_to_win: self.best_turns,
            permutations: self.permutations,
        }
    }
}

/// Rearrange into the next lexicographic ordering by card name
///
/// Equal names compare equal, so duplicates produce each distinct ordering
/// once. Returns false (leaving the slice sorted) after the last one.
fn next_permutation(cards: &mut [Arc<Card>]) -> bool {
    fn key(card: &Arc<Card>) -> &str {
        card.name.as_str()
    }
    if cards.len() < 2 {
        return false;
    }

    let mut i = cards.len() - 1;
    while i > 0 && key(&cards[i - 1]) >= key(&cards[i]) {
        i -= 1;
    }
    if i == 0 {
        cards.reverse();
        return false;
    }

    let mut j = cards.len() - 1;
    while key(&cards[j]) <= key(&cards[i - 1]) {
        j -= 1;
    }
    cards.swap(i - 1, j);
    cards[i..].reverse();
    true
}

/// Second main phase under the exhaustive policy
///
/// Replays the best ordering found; if no ordering wins within the
/// look-ahead limit the hand keeps its current order.
pub fn main_phase(state: &mut GameState, config: &SimulationConfig) -> SearchOutcome {
    let mut search = SequenceSearch::new(config);
    let outcome = search.run(state, config);

    match (search.best_order, outcome.turns_to_win) {
        (Some(order), Some(turns)) => {
            state.logger.decision(
                "exhaustive",
                &format!(
                    "best of {} orderings wins in {} more turn(s)",
                    outcome.permutations, turns
                ),
            );
            state.hand.set_order(order);
        }
        _ => {
            state.logger.decision(
                "exhaustive",
                &format!("no win within {} turns, keeping hand order", config.lookahead_limit),
            );
        }
    }

    greedy::main_phase(state);
    outcome
}
