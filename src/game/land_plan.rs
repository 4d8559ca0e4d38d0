//! Power-set land planner
//!
//! Alternative main-phase policy. For each possible land drop (including
//! none), enumerate every subset of the castable cards in hand and keep the
//! payable subset that spends the most mana. Unlike greedy play it ignores
//! hand order entirely.

use crate::core::{ManaCost, Permanent};
use crate::game::{GameState, ManaSolver};

/// Subsets are enumerated over at most this many castable cards
const MAX_CANDIDATES: usize = 16;

/// The chosen land drop and spell subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandPlan {
    /// Hand index of the land to play
    pub land: Option<usize>,

    /// Hand indices (before the land is removed) of the spells to cast
    pub spells: Vec<usize>,

    /// Total mana value of `spells`
    pub value: u32,
}

/// Find the best land + spell combination without changing `state`
///
/// Ties go to the earliest land in hand, then to the subset with the lowest
/// bitmask. Not playing a land is only chosen when the hand has none.
pub fn plan(state: &GameState) -> LandPlan {
    let candidates: Vec<usize> = state
        .hand
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_permanent_spell())
        .map(|(i, _)| i)
        .take(MAX_CANDIDATES)
        .collect();

    let mut land_options: Vec<Option<usize>> = state
        .hand
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_land())
        .map(|(i, _)| Some(i))
        .collect();
    land_options.push(None);

    let mut best = LandPlan {
        land: land_options[0],
        spells: Vec::new(),
        value: 0,
    };

    for land in land_options {
        let mut battlefield = state.battlefield.clone();
        if let Some(card) = land.and_then(|i| state.hand.get(i)) {
            battlefield.add(Permanent::entering(card.clone()));
        }
        let solver = ManaSolver::new(&battlefield);

        for mask in 0u32..(1u32 << candidates.len()) {
            let mut cost = ManaCost::new();
            let mut spells = Vec::new();
            for (bit, &index) in candidates.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    if let Some(card) = state.hand.get(index) {
                        cost += card.mana_cost;
                        spells.push(index);
                    }
                }
            }

            let value = u32::from(cost.cmc());
            if value > best.value && solver.can_pay(&cost) {
                best = LandPlan { land, spells, value };
            }
        }
    }

    best
}

/// Second main phase under the power-set policy
pub fn main_phase(state: &mut GameState) -> LandPlan {
    let chosen = plan(state);

    let mut spells = chosen.spells.clone();
    if let Some(land_index) = chosen.land {
        state.play_land(land_index);
        // Hand indices after the land shift down by one
        for index in spells.iter_mut().filter(|i| **i > land_index) {
            *index -= 1;
        }
    }

    if !spells.is_empty() {
        let mut cost = ManaCost::new();
        for &i in &spells {
            if let Some(card) = state.hand.get(i) {
                cost += card.mana_cost;
            }
        }
        match state.mana_solver().cheapest_payment(&cost) {
            Some(payment) => {
                state
                    .logger
                    .decision("power-set", &format!("cast {} spell(s) worth {} mana", spells.len(), chosen.value));
                state.cast_from_hand(&spells, &payment);
            }
            None => state.logger.verbose("planned spells are no longer payable"),
        }
    }

    chosen
}
