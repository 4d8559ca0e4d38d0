//! End-to-end tests of the turn engine
//!
//! Drives whole games through `GameLoop` and checks properties that must hold
//! after every turn, whatever the shuffle.

use mtg_goldfish::catalog::Catalog;
use mtg_goldfish::config::SimulationConfig;
use mtg_goldfish::core::Card;
use mtg_goldfish::game::{GameEndReason, GameLoop, GameState, Policy, Status, Step};
use mtg_goldfish::loader::Deck;
use mtg_goldfish::zones::{Hand, Library};
use rustc_hash::FxHashMap;
use std::sync::Arc;

fn name_counts<'a>(cards: impl IntoIterator<Item = &'a Arc<Card>>) -> FxHashMap<String, usize> {
    let mut counts = FxHashMap::default();
    for card in cards {
        *counts.entry(card.name.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

fn quiet(mut game: GameState) -> GameState {
    game.logger.enable_capture();
    game
}

fn named(catalog: &Catalog, names: &[&str]) -> Vec<Arc<Card>> {
    names.iter().map(|n| catalog.get(n).unwrap()).collect()
}

#[test]
fn test_cards_are_conserved_through_discards() {
    let catalog = Catalog::new();
    let config = SimulationConfig::default();
    let mut discarded_somewhere = false;

    for deck in [catalog.mardu_warriors().unwrap(), catalog.mardu_midrange().unwrap()] {
        let expected = name_counts(&deck.cards());
        for policy in [Policy::Greedy, Policy::PowerSet] {
            for seed in 0..50 {
                let mut game = quiet(GameState::with_seed(&deck, &config, seed));
                assert_eq!(name_counts(&game.all_cards()), expected);

                let mut game_loop = GameLoop::new(&mut game, policy, &config);
                loop {
                    let status = game_loop.play_one_turn();
                    assert_eq!(
                        name_counts(&game_loop.game.all_cards()),
                        expected,
                        "{}, seed {seed}, {policy}, turn {}",
                        deck.name,
                        game_loop.game.turn
                    );
                    if status.is_terminal() {
                        break;
                    }
                }
                discarded_somewhere |= !game.graveyard.is_empty();
            }
        }
    }

    // Uncastable instants pile up, so some game must hit the hand limit
    assert!(discarded_somewhere);
}

#[test]
fn test_hand_never_exceeds_limit_after_turn() {
    let catalog = Catalog::new();
    let deck = catalog.mardu_midrange().unwrap();
    let config = SimulationConfig {
        max_hand_size: 5,
        ..Default::default()
    };

    for seed in 0..5 {
        let mut game = quiet(GameState::with_seed(&deck, &config, seed));
        let mut game_loop = GameLoop::new(&mut game, Policy::Greedy, &config);
        loop {
            let status = game_loop.play_one_turn();
            if status.is_terminal() {
                break;
            }
            assert!(game_loop.game.hand.len() <= 5);
        }
    }
}

#[test]
fn test_untap_step_is_idempotent() {
    let catalog = Catalog::new();
    let deck = catalog.mardu_warriors().unwrap();
    let config = SimulationConfig::default();
    let mut game = quiet(GameState::with_seed(&deck, &config, 3));

    {
        let mut game_loop = GameLoop::new(&mut game, Policy::Greedy, &config);
        for _ in 0..3 {
            game_loop.play_one_turn();
        }
        game_loop.run_step(Step::Untap);
    }
    let once: Vec<(bool, bool)> = game.battlefield.iter().map(|p| (p.tapped, p.summoning_sick)).collect();

    game.untap();
    let twice: Vec<(bool, bool)> = game.battlefield.iter().map(|p| (p.tapped, p.summoning_sick)).collect();

    assert_eq!(once, twice);
    assert!(once.iter().all(|&(tapped, sick)| !tapped && !sick));
    assert!(!game.attacked());
}

#[test]
fn test_on_the_draw_draws_turn_one() {
    let catalog = Catalog::new();
    let config = SimulationConfig {
        play_first: false,
        ..Default::default()
    };
    let mut game = quiet(GameState::from_parts(
        Hand::new(named(&catalog, &["Mardu Charm"])),
        Library::new(named(&catalog, &["Plains", "Swamp"])),
        &config,
    ));

    GameLoop::new(&mut game, Policy::Greedy, &config).play_one_turn();

    // Drew the Plains and played it
    assert_eq!(game.library.len(), 1);
    assert_eq!(game.battlefield.len(), 1);
    assert_eq!(game.battlefield.get(0).unwrap().card.name.as_str(), "Plains");
}

#[test]
fn test_scripted_warriors_curve() {
    let catalog = Catalog::new();
    let config = SimulationConfig::default();
    let mut game = quiet(GameState::from_parts(
        Hand::new(named(
            &catalog,
            &["Swamp", "Bloodsoaked Champion", "Plains", "Chief of the Edge", "Swamp", "Mardu Hordechief"],
        )),
        Library::new(named(&catalog, &["Swamp"; 10])),
        &config,
    ));

    let mut game_loop = GameLoop::new(&mut game, Policy::Greedy, &config);

    // Turn 1: Swamp, Champion
    assert_eq!(game_loop.play_one_turn(), Status::Playing);
    assert_eq!(game_loop.game.opponent_life, 20);

    // Turn 2: Champion attacks for 2; Plains, Chief of the Edge
    assert_eq!(game_loop.play_one_turn(), Status::Playing);
    assert_eq!(game_loop.game.opponent_life, 18);

    // Turn 3: Champion (3 with the anthem) and Chief (3) attack; Swamp,
    // Hordechief with raid brings a token
    assert_eq!(game_loop.play_one_turn(), Status::Playing);
    assert_eq!(game_loop.game.opponent_life, 12);
    let tokens = game_loop.game.battlefield.iter().filter(|p| p.card.token).count();
    assert_eq!(tokens, 1);

    let result = game_loop.run_game();
    assert_eq!(result.status, Status::Win);
    assert_eq!(result.end_reason, GameEndReason::OpponentDefeated);
    assert!(result.turns_played <= 5);
}

#[test]
fn test_every_policy_finishes_builtin_decks() {
    let catalog = Catalog::new();
    let config = SimulationConfig::default();
    let decks: Vec<Deck> = vec![catalog.mardu_warriors().unwrap(), catalog.mardu_midrange().unwrap()];

    for deck in &decks {
        for policy in [Policy::Greedy, Policy::PowerSet] {
            let mut game = quiet(GameState::with_seed(deck, &config, 11));
            let result = GameLoop::new(&mut game, policy, &config).with_max_turns(60).run_game();
            assert!(result.status.is_terminal() || result.end_reason == GameEndReason::TurnLimit);
            if result.status == Status::Win {
                assert!(result.opponent_life <= 0);
                assert_eq!(result.win_turn(), Some(result.turns_played));
            }
        }
    }
}
