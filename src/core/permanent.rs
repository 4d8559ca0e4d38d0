//! Card instances on the battlefield

use crate::core::Card;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A card in play
///
/// Combat statistics are not stored here: they depend on the rest of the
/// battlefield and are computed by `Battlefield::power`/`toughness`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permanent {
    pub card: Arc<Card>,

    pub tapped: bool,

    /// Entered this turn; cannot attack until the next untap
    pub summoning_sick: bool,
}

impl Permanent {
    pub fn new(card: Arc<Card>) -> Self {
        Permanent {
            card,
            tapped: false,
            summoning_sick: false,
        }
    }

    /// A permanent as it enters from a cast or land drop
    ///
    /// Creatures arrive summoning sick; cards tagged `EntersTapped` arrive tapped.
    pub fn entering(card: Arc<Card>) -> Self {
        let tapped = card.enters_tapped();
        let summoning_sick = card.is_creature();
        Permanent {
            card,
            tapped,
            summoning_sick,
        }
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
        self.summoning_sick = false;
    }

    /// Can this permanent attack right now?
    pub fn can_attack(&self) -> bool {
        self.card.is_creature() && !self.tapped && !self.summoning_sick
    }

    /// Untapped land that can be tapped for mana
    pub fn is_mana_source(&self) -> bool {
        self.card.is_land() && !self.tapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardEffect, Color, CreatureType};

    #[test]
    fn test_entering_creature_is_sick() {
        let bear = Arc::new(Card::creature("Bear", "1G", &[CreatureType::Orc], 2, 2));
        let perm = Permanent::entering(bear);
        assert!(perm.summoning_sick);
        assert!(!perm.tapped);
        assert!(!perm.can_attack());
    }

    #[test]
    fn test_entering_tapped_land() {
        let land = Arc::new(Card::land("Bloodfell Caves", &[Color::Black, Color::Red]).with_effect(CardEffect::EntersTapped));
        let mut perm = Permanent::entering(land);
        assert!(perm.tapped);
        assert!(!perm.summoning_sick);
        assert!(!perm.is_mana_source());

        perm.untap();
        assert!(perm.is_mana_source());
    }

    #[test]
    fn test_untap_clears_both_flags() {
        let hero = Arc::new(
            Card::creature("Tormented Hero", "B", &[CreatureType::Human, CreatureType::Warrior], 2, 1)
                .with_effect(CardEffect::EntersTapped),
        );
        let mut perm = Permanent::entering(hero);
        assert!(perm.tapped && perm.summoning_sick);

        perm.untap();
        assert!(perm.can_attack());
    }
}
