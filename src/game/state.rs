//! Main game state structure

use crate::config::SimulationConfig;
use crate::core::{Card, Permanent};
use crate::game::{CombatState, GameLogger, ManaSolver, Payment, Status, Step};
use crate::loader::Deck;
use crate::zones::{Battlefield, Graveyard, Hand, Library};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Complete state of one goldfish game
///
/// Designed to be cheap to clone: cards are shared `Arc`s, so a look-ahead
/// copy only duplicates the zone vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current turn number (starts at 1)
    pub turn: u32,

    /// Current step
    pub step: Step,

    /// Our life total (nothing ever damages us)
    pub life: i32,

    pub opponent_life: i32,

    /// On the play: skip the draw on turn 1
    pub play_first: bool,

    /// Hand size kept at end of turn
    pub max_hand_size: usize,

    pub hand: Hand,

    pub library: Library,

    /// Cards discarded at end of turn
    pub graveyard: Graveyard,

    pub battlefield: Battlefield,

    /// Combat state (attacked flag for raid)
    pub combat: CombatState,

    /// Centralized logger for game events
    pub logger: GameLogger,
}

impl GameState {
    /// Shuffle `deck` with `rng` and draw the opening hand
    pub fn new(deck: &Deck, config: &SimulationConfig, rng: &mut impl rand::Rng) -> Self {
        let mut library = deck.to_library();
        library.shuffle(rng);
        Self::from_library(library, config)
    }

    /// Like `new`, with a ChaCha12 RNG seeded from `seed`
    pub fn with_seed(deck: &Deck, config: &SimulationConfig, seed: u64) -> Self {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        Self::new(deck, config, &mut rng)
    }

    /// Draw the opening hand from an already-ordered library
    pub fn from_library(mut library: Library, config: &SimulationConfig) -> Self {
        let mut hand = Hand::default();
        for _ in 0..config.opening_hand {
            match library.draw() {
                Some(card) => hand.add(card),
                None => break,
            }
        }
        Self::from_parts(hand, library, config)
    }

    /// Game with an explicit hand and library order (nothing shuffled or drawn)
    pub fn from_parts(hand: Hand, library: Library, config: &SimulationConfig) -> Self {
        GameState {
            turn: 1,
            step: Step::Untap,
            life: config.starting_life,
            opponent_life: config.opponent_life,
            play_first: config.play_first,
            max_hand_size: config.max_hand_size,
            hand,
            library,
            graveyard: Graveyard::default(),
            battlefield: Battlefield::new(),
            combat: CombatState::new(),
            logger: GameLogger::new(),
        }
    }

    /// Deep copy for simulation: same zones and library order, silent logger
    pub fn lookahead_copy(&self) -> Self {
        GameState {
            turn: self.turn,
            step: self.step,
            life: self.life,
            opponent_life: self.opponent_life,
            play_first: self.play_first,
            max_hand_size: self.max_hand_size,
            hand: self.hand.clone(),
            library: self.library.clone(),
            graveyard: self.graveyard.clone(),
            battlefield: self.battlefield.clone(),
            combat: self.combat.clone(),
            logger: GameLogger::silent(),
        }
    }

    /// Did a creature attack this turn?
    pub fn attacked(&self) -> bool {
        self.combat.combat_active
    }

    /// Untap step: clear tapped/summoning-sick flags and the raid flag
    pub fn untap(&mut self) {
        self.battlefield.untap_all();
        self.combat.clear();
    }

    /// Draw step
    ///
    /// Skipped on turn 1 when on the play. Drawing from an empty library
    /// loses the game and leaves the hand untouched.
    pub fn draw_step(&mut self) -> Status {
        if self.turn == 1 && self.play_first {
            log_if_verbose!(self.logger, "Skipping draw on the play");
            return Status::Playing;
        }
        match self.library.draw() {
            Some(card) => {
                log_if_verbose!(self.logger, "Draw {}", card.name);
                self.hand.add(card);
                Status::Playing
            }
            None => {
                self.logger.minimal("Library is empty: cannot draw");
                Status::Lose
            }
        }
    }

    /// Combat step: every untapped, non-sick creature attacks
    pub fn combat_step(&mut self) -> Status {
        let ready: Vec<usize> = self
            .battlefield
            .iter()
            .enumerate()
            .filter(|(_, p)| p.can_attack())
            .map(|(i, _)| i)
            .collect();

        for index in ready {
            let damage = self.battlefield.power(index);
            if let Some(permanent) = self.battlefield.get_mut(index) {
                permanent.tap();
                log_if_verbose!(self.logger, "{} attacks for {}", permanent.card.name, damage);
            }
            self.opponent_life -= damage;
            self.combat.declare_attacker(index, damage);
        }

        if self.combat.combat_active {
            log_if_verbose!(
                self.logger,
                "Combat deals {}, opponent at {}",
                self.combat.total_damage(),
                self.opponent_life
            );
        }

        if self.opponent_life <= 0 {
            Status::Win
        } else {
            Status::Playing
        }
    }

    /// Discard step: keep the first `max_hand_size` cards, bin the rest
    pub fn discard_step(&mut self) -> usize {
        let cards = self.hand.discard_down_to(self.max_hand_size);
        let discarded = cards.len();
        self.graveyard.extend(cards);
        if discarded > 0 {
            log_if_verbose!(self.logger, "Discard {} card(s) down to {}", discarded, self.max_hand_size);
        }
        discarded
    }

    /// Move the land at `hand_index` onto the battlefield
    ///
    /// Returns the battlefield index, or `None` if that card is not a land.
    pub fn play_land(&mut self, hand_index: usize) -> Option<usize> {
        if !self.hand.get(hand_index)?.is_land() {
            return None;
        }
        let card = self.hand.remove(hand_index);
        log_if_verbose!(
            self.logger,
            "Play {}{}",
            card.name,
            if card.enters_tapped() { " (tapped)" } else { "" }
        );
        Some(self.battlefield.add(Permanent::entering(card)))
    }

    /// Put a paid-for card onto the battlefield
    ///
    /// Shared by every policy so that triggered effects (raid) apply no
    /// matter how the play was chosen.
    pub fn cast_permanent(&mut self, card: Arc<Card>) -> usize {
        log_if_verbose!(self.logger, "Cast {} ({})", card.name, card.mana_cost);
        let raid_token = if self.attacked() { card.raid_token().cloned() } else { None };
        let index = self.battlefield.add(Permanent::entering(card));

        if let Some(token) = raid_token {
            log_if_verbose!(self.logger, "Raid: create {}", token.name);
            self.battlefield.add(Permanent::entering(token));
        }
        index
    }

    /// Tap `payment` and cast the hand cards at `hand_indices`, in hand order
    pub fn cast_from_hand(&mut self, hand_indices: &[usize], payment: &Payment) {
        payment.apply(&mut self.battlefield);
        for card in self.hand.take_indices(hand_indices) {
            self.cast_permanent(card);
        }
    }

    /// Affordability solver over the current untapped lands
    pub fn mana_solver(&self) -> ManaSolver {
        ManaSolver::new(&self.battlefield)
    }

    /// Start the next turn
    pub fn next_turn(&mut self) {
        self.turn += 1;
        self.step = Step::Untap;
    }

    /// Every non-token card in library, hand, graveyard or play
    pub fn all_cards(&self) -> Vec<Arc<Card>> {
        self.library
            .iter()
            .chain(self.hand.iter())
            .chain(self.graveyard.iter())
            .chain(self.battlefield.cards().filter(|c| !c.token))
            .cloned()
            .collect()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Turn {} ({}) | life {} | opponent {} | library {} | graveyard {}",
            self.turn,
            self.step,
            self.life,
            self.opponent_life,
            self.library.len(),
            self.graveyard.len()
        )?;

        let hand: Vec<&str> = self.hand.iter().map(|c| c.name.as_str()).collect();
        writeln!(f, "  Hand: [{}]", hand.join(", "))?;

        writeln!(f, "  Battlefield:")?;
        for (i, permanent) in self.battlefield.iter().enumerate() {
            let mut flags = Vec::new();
            if permanent.tapped {
                flags.push("tapped");
            }
            if permanent.summoning_sick {
                flags.push("sick");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };

            if permanent.card.is_creature() {
                writeln!(
                    f,
                    "    {} {}/{}{}",
                    permanent.card.name,
                    self.battlefield.power(i),
                    self.battlefield.toughness(i),
                    flags
                )?;
            } else {
                writeln!(f, "    {}{}", permanent.card.name, flags)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn card(catalog: &Catalog, name: &str) -> Arc<Card> {
        catalog.get(name).unwrap()
    }

    fn game(hand: &[&str], library: &[&str]) -> GameState {
        let catalog = Catalog::new();
        GameState::from_parts(
            Hand::new(hand.iter().map(|n| card(&catalog, n))),
            Library::new(library.iter().map(|n| card(&catalog, n))),
            &SimulationConfig::default(),
        )
    }

    #[test]
    fn test_game_creation() {
        let catalog = Catalog::new();
        let deck = catalog.mardu_warriors().unwrap();
        let game = GameState::with_seed(&deck, &SimulationConfig::default(), 42);

        assert_eq!(game.turn, 1);
        assert_eq!(game.step, Step::Untap);
        assert_eq!(game.hand.len(), 7);
        assert_eq!(game.library.len(), 53);
        assert_eq!(game.opponent_life, 20);
        assert_eq!(game.all_cards().len(), 60);
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let catalog = Catalog::new();
        let deck = catalog.mardu_warriors().unwrap();
        let a = GameState::with_seed(&deck, &SimulationConfig::default(), 7);
        let b = GameState::with_seed(&deck, &SimulationConfig::default(), 7);

        let names = |g: &GameState| g.library.iter().map(|c| c.name.to_string()).collect::<Vec<_>>();
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn test_draw_skipped_on_the_play() {
        let mut game = game(&[], &["Swamp"]);
        assert_eq!(game.draw_step(), Status::Playing);
        assert_eq!(game.hand.len(), 0);

        game.next_turn();
        assert_eq!(game.draw_step(), Status::Playing);
        assert_eq!(game.hand.len(), 1);
    }

    #[test]
    fn test_draw_from_empty_library_loses() {
        let mut game = game(&["Plains"], &[]);
        game.turn = 2;

        assert_eq!(game.draw_step(), Status::Lose);
        assert_eq!(game.hand.len(), 1);
    }

    #[test]
    fn test_lethal_combat() {
        let catalog = Catalog::new();
        let mut game = game(&[], &[]);
        game.opponent_life = 3;
        game.battlefield
            .add(Permanent::new(Arc::new(Card::creature("Ogre", "2R", &[], 3, 3))));
        game.battlefield.add(Permanent::new(card(&catalog, "Swamp")));

        assert_eq!(game.combat_step(), Status::Win);
        assert_eq!(game.opponent_life, 0);
        assert!(game.attacked());
        assert!(game.battlefield.get(0).unwrap().tapped);
        assert!(!game.battlefield.get(1).unwrap().tapped);
    }

    #[test]
    fn test_sick_creatures_do_not_attack() {
        let catalog = Catalog::new();
        let mut game = game(&[], &[]);
        game.battlefield.add(Permanent::entering(card(&catalog, "Mardu Woe-Reaper")));

        assert_eq!(game.combat_step(), Status::Playing);
        assert_eq!(game.opponent_life, 20);
        assert!(!game.attacked());
    }

    #[test]
    fn test_raid_token_after_attack() {
        let catalog = Catalog::new();
        let mut game = game(&[], &[]);

        game.cast_permanent(card(&catalog, "Mardu Hordechief"));
        assert_eq!(game.battlefield.len(), 1);

        game.combat.declare_attacker(0, 2);
        game.cast_permanent(card(&catalog, "Mardu Hordechief"));
        assert_eq!(game.battlefield.len(), 3);

        let token = game.battlefield.get(2).unwrap();
        assert!(token.card.token);
        assert!(token.summoning_sick);
        // Tokens are not part of the deck
        assert_eq!(game.all_cards().len(), 2);
    }

    #[test]
    fn test_play_land_rejects_spells() {
        let mut game = game(&["Chief of the Edge", "Scoured Barrens"], &[]);
        assert_eq!(game.play_land(0), None);

        let index = game.play_land(1).unwrap();
        assert!(game.battlefield.get(index).unwrap().tapped);
        assert_eq!(game.hand.len(), 1);
    }

    #[test]
    fn test_discard_keeps_prefix() {
        let names = ["Swamp", "Plains", "Swamp", "Plains", "Swamp", "Plains", "Swamp", "Mardu Charm", "Raiders' Spoils"];
        let mut game = game(&names, &[]);

        assert_eq!(game.discard_step(), 2);
        assert_eq!(game.hand.len(), 7);
        assert!(game.hand.iter().all(|c| c.is_land()));

        let binned: Vec<&str> = game.graveyard.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(binned, vec!["Mardu Charm", "Raiders' Spoils"]);
        assert_eq!(game.all_cards().len(), names.len());
    }

    #[test]
    fn test_lookahead_copy_is_independent() {
        let mut game = game(&["Swamp"], &["Plains"]);
        game.logger.enable_capture();

        let mut copy = game.lookahead_copy();
        copy.play_land(0);
        copy.next_turn();
        copy.draw_step();

        assert_eq!(game.hand.len(), 1);
        assert_eq!(game.library.len(), 1);
        assert!(game.battlefield.is_empty());
        assert!(copy.logger.logs().is_empty());
    }

    #[test]
    fn test_display() {
        let catalog = Catalog::new();
        let mut game = game(&["Plains"], &["Swamp"]);
        game.battlefield.add(Permanent::entering(card(&catalog, "Chief of the Edge")));
        let text = game.to_string();
        assert!(text.contains("Turn 1"));
        assert!(text.contains("Hand: [Plains]"));
        assert!(text.contains("Chief of the Edge 3/2 [sick]"));
    }
}
