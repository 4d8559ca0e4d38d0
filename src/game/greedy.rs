//! Greedy main-phase policy
//!
//! Plays the first land in hand order, then casts the creatures and
//! enchantments of the longest hand prefix whose combined cost is payable.
//! Single pass, no backtracking: a cheaper spell sitting behind an
//! unaffordable one in hand order is only reached through a shorter prefix.

use crate::core::ManaCost;
use crate::game::GameState;

/// What a greedy main phase did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GreedyPlay {
    /// Battlefield index of the land played, if any
    pub land: Option<usize>,

    /// Number of spells cast
    pub cast: usize,

    /// Lands tapped to pay for them
    pub lands_tapped: usize,
}

/// Play the first land in hand, if there is one
pub fn play_first_land(state: &mut GameState) -> Option<usize> {
    let index = state.hand.first_land()?;
    state.play_land(index)
}

/// Hand indices of the castable card kinds within the first `len` cards
fn castable_prefix(state: &GameState, len: usize) -> Vec<usize> {
    state
        .hand
        .iter()
        .take(len)
        .enumerate()
        .filter(|(_, c)| c.is_permanent_spell())
        .map(|(i, _)| i)
        .collect()
}

/// Cast every creature/enchantment of the longest affordable hand prefix
///
/// Returns `(cards cast, lands tapped)`.
pub fn cast_longest_prefix(state: &mut GameState) -> (usize, usize) {
    let solver = state.mana_solver();

    for len in (1..=state.hand.len()).rev() {
        let indices = castable_prefix(state, len);
        if indices.is_empty() {
            // Shorter prefixes are subsets of this one
            break;
        }

        let mut cost = ManaCost::new();
        for &i in &indices {
            if let Some(card) = state.hand.get(i) {
                cost += card.mana_cost;
            }
        }

        if let Some(payment) = solver.cheapest_payment(&cost) {
            log_if_verbose!(
                state.logger,
                "Pay {} with {} land(s) for {} spell(s)",
                cost,
                payment.land_count(),
                indices.len()
            );
            state.cast_from_hand(&indices, &payment);
            return (indices.len(), payment.land_count());
        }
    }
    (0, 0)
}

/// The full greedy main phase: land drop, then the prefix cast
pub fn main_phase(state: &mut GameState) -> GreedyPlay {
    let land = play_first_land(state);
    let (cast, lands_tapped) = cast_longest_prefix(state);
    GreedyPlay {
        land,
        cast,
        lands_tapped,
    }
}
