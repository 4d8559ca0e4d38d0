//! Built-in card definitions and deck lists
//!
//! Every card the simulator knows about is declared here as data. Card
//! behaviour that differs from a vanilla permanent is expressed through
//! `CardEffect` tags rather than by checking names in the engine.

use crate::core::{normalize_card_name, Card, CardEffect, CardType, Color};
use crate::loader::Deck;
use crate::{GoldfishError, Result};
use rustc_hash::FxHashMap;
use smallvec::smallvec;
use std::sync::Arc;

use crate::core::CreatureType::{Cat, Demon, Human, Orc, Warrior};

/// Name-indexed set of card definitions
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<Arc<Card>>,
    by_name: FxHashMap<String, Arc<Card>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Catalog of the Khans of Tarkir cards used by the Mardu decks
    pub fn new() -> Self {
        let mut catalog = Catalog::empty();
        for card in builtin_cards() {
            catalog.insert(card);
        }
        catalog
    }

    pub fn empty() -> Self {
        Catalog {
            cards: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Add (or replace) a definition
    pub fn insert(&mut self, card: Card) -> Arc<Card> {
        let card = Arc::new(card);
        let key = card.name.lookup_key();
        if let Some(old) = self.by_name.insert(key, card.clone()) {
            self.cards.retain(|c| !Arc::ptr_eq(c, &old));
        }
        self.cards.push(card.clone());
        card
    }

    /// Look a card up by name (case, punctuation and accent insensitive)
    pub fn get(&self, name: &str) -> Option<Arc<Card>> {
        self.by_name.get(&normalize_card_name(name)).cloned()
    }

    pub fn get_required(&self, name: &str) -> Result<Arc<Card>> {
        self.get(name).ok_or_else(|| GoldfishError::UnknownCard(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Build a deck from `(name, count)` pairs
    pub fn deck(&self, name: &str, list: &[(&str, u8)]) -> Result<Deck> {
        let mut deck = Deck::new(name);
        for &(card_name, count) in list {
            deck.add(self.get_required(card_name)?, count);
        }
        Ok(deck)
    }

    /// The 60-card Mardu warriors list the simulator was built around
    pub fn mardu_warriors(&self) -> Result<Deck> {
        self.deck("Mardu Warriors", MARDU_WARRIORS)
    }

    /// A slower three-color list with tapped lands and Butcher of the Horde
    pub fn mardu_midrange(&self) -> Result<Deck> {
        self.deck("Mardu Midrange", MARDU_MIDRANGE)
    }

    /// Built-in deck by (normalized) name
    pub fn builtin_deck(&self, name: &str) -> Result<Deck> {
        match normalize_card_name(name).as_str() {
            "mardu warriors" | "warriors" => self.mardu_warriors(),
            "mardu midrange" | "midrange" => self.mardu_midrange(),
            _ => Err(GoldfishError::InvalidDeckFormat(format!("no built-in deck named {name:?}"))),
        }
    }
}

const MARDU_WARRIORS: &[(&str, u8)] = &[
    ("Bloodsoaked Champion", 4),
    ("Tormented Hero", 4),
    ("Mardu Woe-Reaper", 4),
    ("Battle Brawler", 4),
    ("Chief of the Edge", 4),
    ("Chief of the Scale", 4),
    ("Mardu Hordechief", 4),
    ("Mardu Charm", 4),
    ("Raiders' Spoils", 4),
    ("Caves of Koilos", 4),
    ("Plains", 8),
    ("Swamp", 12),
];

const MARDU_MIDRANGE: &[(&str, u8)] = &[
    ("Mardu Shadowspear", 4),
    ("Mardu Skullhunter", 4),
    ("Seeker of the Way", 4),
    ("Oreskos Swiftclaw", 4),
    ("Chief of the Edge", 4),
    ("Battle Brawler", 4),
    ("Mardu Hordechief", 4),
    ("Butcher of the Horde", 4),
    ("Raiders' Spoils", 4),
    ("Nomad Outpost", 4),
    ("Scoured Barrens", 4),
    ("Wind-Scarred Crag", 4),
    ("Battlefield Forge", 4),
    ("Bloodfell Caves", 2),
    ("Plains", 3),
    ("Swamp", 3),
];

fn warrior_token() -> Arc<Card> {
    Arc::new(Card::creature("Warrior Token", "", &[Human, Warrior], 1, 1).as_token())
}

fn builtin_cards() -> Vec<Card> {
    vec![
        // One-drops
        Card::creature("Bloodsoaked Champion", "B", &[Human, Warrior], 2, 1),
        Card::creature("Tormented Hero", "B", &[Human, Warrior], 2, 1).with_effect(CardEffect::EntersTapped),
        Card::creature("Mardu Woe-Reaper", "W", &[Human, Warrior], 2, 1),
        Card::creature("Mardu Shadowspear", "B", &[Human, Warrior], 2, 1),
        // Two-drops
        Card::creature("Battle Brawler", "1B", &[Orc, Warrior], 2, 2).with_effect(CardEffect::PowerIfColorInPlay {
            colors: smallvec![Color::White, Color::Red],
            bonus: 1,
        }),
        Card::creature("Mardu Skullhunter", "1B", &[Human, Warrior], 2, 1).with_effect(CardEffect::EntersTapped),
        Card::creature("Seeker of the Way", "1W", &[Human, Warrior], 2, 2),
        Card::creature("Oreskos Swiftclaw", "1W", &[Cat, Warrior], 3, 1),
        Card::creature("Chief of the Edge", "WB", &[Human, Warrior], 3, 2).with_effect(CardEffect::Anthem {
            subtype: Some(Warrior),
            power: 1,
            toughness: 0,
        }),
        Card::creature("Chief of the Scale", "WB", &[Human, Warrior], 2, 3).with_effect(CardEffect::Anthem {
            subtype: Some(Warrior),
            power: 0,
            toughness: 1,
        }),
        // Three and up
        Card::creature("Mardu Hordechief", "2W", &[Human, Warrior], 2, 3).with_effect(CardEffect::RaidToken {
            token: warrior_token(),
        }),
        Card::creature("Butcher of the Horde", "1RWB", &[Demon], 5, 4),
        // Non-creature spells
        Card::spell("Mardu Charm", CardType::Instant, "RWB"),
        Card::spell("Raiders' Spoils", CardType::Enchantment, "3B").with_effect(CardEffect::Anthem {
            subtype: None,
            power: 1,
            toughness: 0,
        }),
        // Lands
        Card::land("Plains", &[Color::White]),
        Card::land("Swamp", &[Color::Black]),
        Card::land("Mountain", &[Color::Red]),
        Card::land("Caves of Koilos", &[Color::White, Color::Black]),
        Card::land("Battlefield Forge", &[Color::Red, Color::White]),
        Card::land("Nomad Outpost", &[Color::Red, Color::White, Color::Black]).with_effect(CardEffect::EntersTapped),
        Card::land("Scoured Barrens", &[Color::White, Color::Black]).with_effect(CardEffect::EntersTapped),
        Card::land("Wind-Scarred Crag", &[Color::Red, Color::White]).with_effect(CardEffect::EntersTapped),
        Card::land("Bloodfell Caves", &[Color::Black, Color::Red]).with_effect(CardEffect::EntersTapped),
    ]
}
