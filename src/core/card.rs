//! Card types and definitions

use crate::core::{CardName, Color, CreatureType, ManaCost};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// Card types in MTG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Creature,
    Instant,
    Sorcery,
    Enchantment,
    Artifact,
    Land,
}

/// Static and triggered behaviour declared as data on the card
///
/// The engine never compares card identities; everything card-specific is
/// read from these tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardEffect {
    /// The permanent enters the battlefield tapped
    EntersTapped,

    /// Other creatures (optionally only those of `subtype`) get +power/+toughness
    Anthem {
        subtype: Option<CreatureType>,
        power: i8,
        toughness: i8,
    },

    /// This creature gets +`bonus` power while any permanent in play has one
    /// of `colors` in its mana cost
    PowerIfColorInPlay {
        colors: SmallVec<[Color; 2]>,
        bonus: i8,
    },

    /// Raid: when cast after a creature attacked this turn, create `token`
    RaidToken { token: Arc<Card> },
}

/// Immutable card definition, shared by reference between zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card name (e.g., "Chief of the Edge")
    pub name: CardName,

    pub card_type: CardType,

    /// Mana cost
    pub mana_cost: ManaCost,

    /// Colors this card can be tapped for (lands only)
    pub produces: SmallVec<[Color; 3]>,

    /// Creature subtypes (e.g., Human, Warrior)
    pub subtypes: SmallVec<[CreatureType; 2]>,

    /// Base power (0 for non-creatures)
    pub power: i8,

    /// Base toughness (0 for non-creatures)
    pub toughness: i8,

    pub effects: SmallVec<[CardEffect; 2]>,

    /// Generated by an effect rather than drawn from the library
    pub token: bool,
}

impl Card {
    pub fn new(name: impl Into<CardName>, card_type: CardType) -> Self {
        Card {
            name: name.into(),
            card_type,
            mana_cost: ManaCost::new(),
            produces: SmallVec::new(),
            subtypes: SmallVec::new(),
            power: 0,
            toughness: 0,
            effects: SmallVec::new(),
            token: false,
        }
    }

    /// Creature with a cost string like "1B"
    pub fn creature(
        name: impl Into<CardName>,
        cost: &str,
        subtypes: &[CreatureType],
        power: i8,
        toughness: i8,
    ) -> Self {
        let mut card = Card::new(name, CardType::Creature);
        card.mana_cost = ManaCost::from_string(cost);
        card.subtypes.extend_from_slice(subtypes);
        card.power = power;
        card.toughness = toughness;
        card
    }

    /// Land that taps for one of `produces`
    pub fn land(name: impl Into<CardName>, produces: &[Color]) -> Self {
        let mut card = Card::new(name, CardType::Land);
        card.produces.extend_from_slice(produces);
        card
    }

    /// Non-creature spell with a cost string
    pub fn spell(name: impl Into<CardName>, card_type: CardType, cost: &str) -> Self {
        let mut card = Card::new(name, card_type);
        card.mana_cost = ManaCost::from_string(cost);
        card
    }

    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn as_token(mut self) -> Self {
        self.token = true;
        self
    }

    pub fn is_type(&self, card_type: CardType) -> bool {
        self.card_type == card_type
    }

    pub fn is_creature(&self) -> bool {
        self.is_type(CardType::Creature)
    }

    pub fn is_land(&self) -> bool {
        self.is_type(CardType::Land)
    }

    /// Creatures and enchantments are the only spells the engine casts
    pub fn is_permanent_spell(&self) -> bool {
        matches!(self.card_type, CardType::Creature | CardType::Enchantment)
    }

    pub fn is_creature_type(&self, subtype: CreatureType) -> bool {
        self.subtypes.contains(&subtype)
    }

    pub fn enters_tapped(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, CardEffect::EntersTapped))
    }

    /// Token created when this card is cast with raid active
    pub fn raid_token(&self) -> Option<&Arc<Card>> {
        self.effects.iter().find_map(|e| match e {
            CardEffect::RaidToken { token } => Some(token),
            _ => None,
        })
    }

    /// Power/toughness bonus this card grants to another creature `other`
    pub fn anthem_bonus(&self, other: &Card) -> (i8, i8) {
        self.effects
            .iter()
            .filter_map(|e| match e {
                CardEffect::Anthem {
                    subtype,
                    power,
                    toughness,
                } if subtype.map_or(true, |s| other.is_creature_type(s)) => Some((*power, *toughness)),
                _ => None,
            })
            .fold((0, 0), |(p, t), (dp, dt)| (p + dp, t + dt))
    }
}
