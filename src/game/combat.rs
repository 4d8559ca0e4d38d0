//! Combat bookkeeping
//!
//! The opponent never blocks, so combat reduces to "every ready creature
//! attacks and deals its effective power". This tracks what happened in the
//! current turn's combat.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Combat state for the current turn
///
/// Reset during the untap step.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CombatState {
    /// Battlefield indices of the creatures that attacked, with the damage each dealt
    pub attackers: SmallVec<[(usize, i32); 8]>,

    /// Whether any creature attacked this turn (raid)
    pub combat_active: bool,
}

impl CombatState {
    /// Create a new empty combat state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attacking creature and the damage it dealt
    pub fn declare_attacker(&mut self, attacker: usize, damage: i32) {
        self.attackers.push((attacker, damage));
        self.combat_active = true;
    }

    /// Total damage dealt to the opponent this turn
    pub fn total_damage(&self) -> i32 {
        self.attackers.iter().map(|&(_, d)| d).sum()
    }

    /// Clear all combat state (called at untap)
    pub fn clear(&mut self) {
        self.attackers.clear();
        self.combat_active = false;
    }
}
