//! Deck file loader (.dck format)

use crate::catalog::Catalog;
use crate::core::Card;
use crate::zones::Library;
use crate::{GoldfishError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Deck loader for .dck files
pub struct DeckLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Metadata,
    Main,
    Sideboard,
}

impl DeckLoader {
    /// Load a deck from a .dck file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load a deck file and resolve its cards against `catalog`
    pub fn load_deck(path: &Path, catalog: &Catalog) -> Result<Deck> {
        Self::load_from_file(path)?.resolve(catalog)
    }

    /// Parse a deck from its text content
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut name = None;
        let mut main_deck = Vec::new();
        let mut sideboard = Vec::new();
        // Files without section headers are a bare main deck
        let mut section = Section::Main;

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                let header = line.trim_matches(|c| c == '[' || c == ']').to_ascii_lowercase();
                section = match header.as_str() {
                    "metadata" => Section::Metadata,
                    "sideboard" => Section::Sideboard,
                    _ => Section::Main,
                };
                continue;
            }

            if section == Section::Metadata {
                if let Some((key, value)) = line.split_once('=') {
                    if key.trim().eq_ignore_ascii_case("name") {
                        name = Some(value.trim().to_string());
                    }
                }
                continue;
            }

            // Format: "1 Card Name" or "1 Card Name|SET"
            let (count_str, rest) = line.split_once(' ').ok_or_else(|| {
                GoldfishError::InvalidDeckFormat(format!("line {}: expected \"<count> <card name>\"", line_no + 1))
            })?;
            let count = count_str.parse::<u8>().map_err(|_| {
                GoldfishError::InvalidDeckFormat(format!("line {}: bad card count {count_str:?}", line_no + 1))
            })?;

            // Extract card name (before pipe if present)
            let card_name = match rest.split_once('|') {
                Some((card_name, _set)) => card_name.trim().to_string(),
                None => rest.trim().to_string(),
            };

            let entry = DeckListEntry { card_name, count };
            match section {
                Section::Sideboard => sideboard.push(entry),
                _ => main_deck.push(entry),
            }
        }

        if main_deck.is_empty() {
            return Err(GoldfishError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(DeckList {
            name,
            main_deck,
            sideboard,
        })
    }
}

/// A card name and count as written in a deck file
#[derive(Debug, Clone)]
pub struct DeckListEntry {
    pub card_name: String,
    pub count: u8,
}

/// Unresolved deck list, straight from the file
#[derive(Debug, Clone)]
pub struct DeckList {
    pub name: Option<String>,
    pub main_deck: Vec<DeckListEntry>,
    pub sideboard: Vec<DeckListEntry>,
}

impl DeckList {
    /// Total cards in main deck
    pub fn total_cards(&self) -> usize {
        self.main_deck.iter().map(|e| e.count as usize).sum()
    }

    /// Total cards in sideboard
    pub fn sideboard_size(&self) -> usize {
        self.sideboard.iter().map(|e| e.count as usize).sum()
    }

    /// Look every main-deck name up in the catalog (the sideboard is never played)
    pub fn resolve(&self, catalog: &Catalog) -> Result<Deck> {
        let mut deck = Deck::new(self.name.clone().unwrap_or_else(|| "Unnamed".to_string()));
        for entry in &self.main_deck {
            let card = catalog.get_required(&entry.card_name)?;
            deck.add(card, entry.count);
        }
        Ok(deck)
    }
}

/// One distinct card of a deck and how many copies it has
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: Arc<Card>,
    pub count: u8,
}

/// Resolved deck: card definitions with copy counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    pub entries: Vec<DeckEntry>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        Deck {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Add copies of a card, merging with an existing entry of the same name
    pub fn add(&mut self, card: Arc<Card>, count: u8) {
        match self.entries.iter_mut().find(|e| e.card.name == card.name) {
            Some(entry) => entry.count = entry.count.saturating_add(count),
            None => self.entries.push(DeckEntry { card, count }),
        }
    }

    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Copies of the named card in this deck
    pub fn count_of(&self, name: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.card.name.as_str() == name)
            .map(|e| e.count as usize)
            .sum()
    }

    /// Every copy, expanded in entry order
    pub fn cards(&self) -> Vec<Arc<Card>> {
        self.entries
            .iter()
            .flat_map(|e| std::iter::repeat(e.card.clone()).take(e.count as usize))
            .collect()
    }

    /// Unshuffled library containing every copy
    pub fn to_library(&self) -> Library {
        Library::new(self.cards())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_deck() {
        let content = r#"
[metadata]
Name=Test Deck

[Main]
20 Plains
40 Mardu Woe-Reaper

[Sideboard]
15 Mardu Charm
"#;

        let deck = DeckLoader::parse(content).unwrap();
        assert_eq!(deck.name.as_deref(), Some("Test Deck"));
        assert_eq!(deck.main_deck.len(), 2);
        assert_eq!(deck.total_cards(), 60);

        assert_eq!(deck.main_deck[0].card_name, "Plains");
        assert_eq!(deck.main_deck[0].count, 20);

        assert_eq!(deck.main_deck[1].card_name, "Mardu Woe-Reaper");
        assert_eq!(deck.main_deck[1].count, 40);

        assert_eq!(deck.sideboard.len(), 1);
        assert_eq!(deck.sideboard[0].card_name, "Mardu Charm");
        assert_eq!(deck.sideboard_size(), 15);
    }

    #[test]
    fn test_parse_set_suffix_and_bare_list() {
        let deck = DeckLoader::parse("4 Chief of the Edge|KTK\n# comment\n12 Swamp\n").unwrap();
        assert_eq!(deck.main_deck[0].card_name, "Chief of the Edge");
        assert_eq!(deck.total_cards(), 16);
        assert!(deck.name.is_none());
    }

    #[test]
    fn test_parse_rejects_bad_count() {
        let err = DeckLoader::parse("four Swamp\n").unwrap_err();
        assert!(matches!(err, GoldfishError::InvalidDeckFormat(_)));

        let err = DeckLoader::parse("[metadata]\nName=Nothing\n").unwrap_err();
        assert!(matches!(err, GoldfishError::InvalidDeckFormat(_)));
    }

    #[test]
    fn test_resolve_against_catalog() {
        let catalog = Catalog::new();
        let list = DeckLoader::parse("4 raiders’ spoils\n8 PLAINS\n4 Plains\n").unwrap();
        let deck = list.resolve(&catalog).unwrap();

        assert_eq!(deck.entries.len(), 2);
        assert_eq!(deck.count_of("Plains"), 12);
        assert_eq!(deck.count_of("Raiders' Spoils"), 4);
        assert_eq!(deck.to_library().len(), 16);
    }

    #[test]
    fn test_resolve_unknown_card() {
        let catalog = Catalog::new();
        let list = DeckLoader::parse("4 Lightning Bolt\n").unwrap();
        let err = list.resolve(&catalog).unwrap_err();
        assert!(matches!(err, GoldfishError::UnknownCard(name) if name == "Lightning Bolt"));
    }
}
