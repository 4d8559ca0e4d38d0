//! Game zones (Library, Hand, Graveyard, Battlefield)

use crate::core::{Card, CardEffect, Permanent};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// Ordered draw pile; the front is the top of the library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    cards: VecDeque<Arc<Card>>,
}

impl Library {
    pub fn new(cards: impl IntoIterator<Item = Arc<Card>>) -> Self {
        Library {
            cards: cards.into_iter().collect(),
        }
    }

    /// Shuffle the library (uniform Fisher–Yates)
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Draw from top
    pub fn draw(&mut self) -> Option<Arc<Card>> {
        self.cards.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.iter()
    }
}

/// Cards in hand, in the order the sequencing policies consider them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Arc<Card>>,
}

impl Hand {
    pub fn new(cards: impl IntoIterator<Item = Arc<Card>>) -> Self {
        Hand {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn add(&mut self, card: Arc<Card>) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, index: usize) -> Arc<Card> {
        // Vec::remove keeps the relative order of the remaining cards,
        // which the prefix-based policies depend on
        self.cards.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Card>> {
        self.cards.get(index)
    }

    /// Remove the cards at `indices` (any order) and return them in hand order
    pub fn take_indices(&mut self, indices: &[usize]) -> Vec<Arc<Card>> {
        let mut taken = Vec::with_capacity(indices.len());
        let mut kept = Vec::with_capacity(self.cards.len().saturating_sub(indices.len()));
        for (i, card) in self.cards.drain(..).enumerate() {
            if indices.contains(&i) {
                taken.push(card);
            } else {
                kept.push(card);
            }
        }
        self.cards = kept;
        taken
    }

    /// Index of the first land in hand order
    pub fn first_land(&self) -> Option<usize> {
        self.cards.iter().position(|c| c.is_land())
    }

    /// Replace the hand order (the multiset of cards must not change)
    pub fn set_order(&mut self, cards: Vec<Arc<Card>>) {
        debug_assert_eq!(cards.len(), self.cards.len(), "hand reorder changed the card count");
        self.cards = cards;
    }

    /// Keep only the first `size` cards, returning the rest in hand order
    pub fn discard_down_to(&mut self, size: usize) -> Vec<Arc<Card>> {
        if self.cards.len() <= size {
            return Vec::new();
        }
        self.cards.split_off(size)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Card>> {
        self.cards.iter()
    }
}

/// Discard pile, oldest card first
///
/// Nothing in a goldfish game returns cards from here; it exists so every
/// card of the deck stays in some zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graveyard {
    cards: Vec<Arc<Card>>,
}

impl Graveyard {
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Arc<Card>>) {
        self.cards.extend(cards);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Card>> {
        self.cards.iter()
    }
}

/// Permanents in play, addressed by their index (permanents never leave)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Battlefield {
    permanents: Vec<Permanent>,
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a permanent into play and return its index
    pub fn add(&mut self, permanent: Permanent) -> usize {
        self.permanents.push(permanent);
        self.permanents.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Permanent> {
        self.permanents.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Permanent> {
        self.permanents.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Permanent> {
        self.permanents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Permanent> {
        self.permanents.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.permanents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permanents.is_empty()
    }

    /// Clear tapped and summoning-sickness flags on everything
    pub fn untap_all(&mut self) {
        for permanent in &mut self.permanents {
            permanent.untap();
        }
    }

    /// Effective power of the creature at `index`
    ///
    /// Recomputed from the whole battlefield on every call: base power, plus
    /// every other permanent's matching anthem, plus the creature's own
    /// color-conditional bonus.
    pub fn power(&self, index: usize) -> i32 {
        let Some(subject) = self.permanents.get(index) else {
            return 0;
        };
        let card = &subject.card;
        let mut power = i32::from(card.power);
        if !card.is_creature() {
            return power;
        }

        for (i, source) in self.permanents.iter().enumerate() {
            if i != index {
                power += i32::from(source.card.anthem_bonus(card).0);
            }
        }

        for effect in &card.effects {
            if let CardEffect::PowerIfColorInPlay { colors, bonus } = effect {
                let active = self
                    .permanents
                    .iter()
                    .any(|p| colors.iter().any(|&c| p.card.mana_cost.has_color(c)));
                if active {
                    power += i32::from(*bonus);
                }
            }
        }

        power
    }

    /// Effective toughness of the creature at `index`
    pub fn toughness(&self, index: usize) -> i32 {
        let Some(subject) = self.permanents.get(index) else {
            return 0;
        };
        let card = &subject.card;
        let mut toughness = i32::from(card.toughness);
        if !card.is_creature() {
            return toughness;
        }

        for (i, source) in self.permanents.iter().enumerate() {
            if i != index {
                toughness += i32::from(source.card.anthem_bonus(card).1);
            }
        }
        toughness
    }

    /// Non-token cards in play (for conservation checks)
    pub fn cards(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.permanents.iter().map(|p| &p.card)
    }
}
