//! Policy comparison tests
//!
//! The exhaustive search always considers the current hand order, which is
//! exactly what greedy play would do, so it can never kill later than greedy
//! from the same shuffle. The power-set planner considers greedy's land and
//! spell choice among its candidates, so it never spends less mana in a turn.

use mtg_goldfish::catalog::Catalog;
use mtg_goldfish::config::SimulationConfig;
use mtg_goldfish::core::Card;
use mtg_goldfish::game::{greedy, land_plan, GameLoop, GameState, Policy, SequenceSearch, Status, Step};
use mtg_goldfish::zones::{Hand, Library};
use std::sync::Arc;

/// Small hands keep the permutation count low
fn small_hand_config() -> SimulationConfig {
    SimulationConfig {
        opponent_life: 10,
        opening_hand: 4,
        max_hand_size: 4,
        ..Default::default()
    }
}

fn win_turn(game: &GameState, policy: Policy, config: &SimulationConfig) -> Option<u32> {
    let mut game = game.clone();
    game.logger.enable_capture();
    GameLoop::new(&mut game, policy, config).run_game().win_turn()
}

fn named(catalog: &Catalog, names: &[&str]) -> Vec<Arc<Card>> {
    names.iter().map(|n| catalog.get(n).unwrap()).collect()
}

fn spent_mana(game: &GameState) -> u32 {
    game.battlefield
        .iter()
        .filter(|p| !p.card.is_land() && !p.card.token)
        .map(|p| u32::from(p.card.mana_cost.cmc()))
        .sum()
}

#[test]
fn test_exhaustive_never_slower_than_greedy() {
    let catalog = Catalog::new();
    let deck = catalog.mardu_warriors().unwrap();
    let config = small_hand_config();

    let mut compared = 0;
    for seed in 0..6 {
        let start = GameState::with_seed(&deck, &config, seed);
        let Some(greedy_turn) = win_turn(&start, Policy::Greedy, &config) else {
            continue;
        };
        let exhaustive_turn = win_turn(&start, Policy::Exhaustive, &config)
            .unwrap_or_else(|| panic!("seed {seed}: greedy won on turn {greedy_turn}, exhaustive never did"));

        assert!(
            exhaustive_turn <= greedy_turn,
            "seed {seed}: exhaustive {exhaustive_turn} > greedy {greedy_turn}"
        );
        compared += 1;
    }
    assert!(compared > 0);
}

/// Turns greedy needs to win from `game` at its second main phase, counted
/// the way the search counts a continuation
fn greedy_continuation(game: &GameState, config: &SimulationConfig) -> Option<u32> {
    let mut sim = game.lookahead_copy();
    greedy::main_phase(&mut sim);
    sim.discard_step();
    sim.next_turn();

    for turns in 1..=config.lookahead_limit {
        match GameLoop::new(&mut sim, Policy::Greedy, config).play_one_turn() {
            Status::Win => return Some(turns),
            Status::Playing => {}
            _ => return None,
        }
    }
    None
}

/// Every distinct 4-card hand drawn from the deck's card kinds
fn four_card_hands(kinds: &[Arc<Card>]) -> Vec<Vec<Arc<Card>>> {
    let mut hands = Vec::new();
    for a in 0..kinds.len() {
        for b in a..kinds.len() {
            for c in b..kinds.len() {
                for d in c..kinds.len() {
                    hands.push(vec![
                        kinds[a].clone(),
                        kinds[b].clone(),
                        kinds[c].clone(),
                        kinds[d].clone(),
                    ]);
                }
            }
        }
    }
    hands
}

#[test]
fn test_search_never_slower_than_greedy_continuation_for_any_hand() {
    let catalog = Catalog::new();
    let deck = catalog.mardu_warriors().unwrap();
    let kinds: Vec<Arc<Card>> = deck.entries.iter().map(|e| e.card.clone()).collect();
    let config = SimulationConfig {
        opponent_life: 6,
        max_hand_size: 4,
        lookahead_limit: 6,
        ..Default::default()
    };
    let library = named(
        &catalog,
        &[
            "Swamp",
            "Tormented Hero",
            "Plains",
            "Chief of the Edge",
            "Swamp",
            "Battle Brawler",
            "Caves of Koilos",
            "Mardu Hordechief",
            "Swamp",
            "Chief of the Scale",
            "Plains",
            "Mardu Charm",
            "Swamp",
            "Raiders' Spoils",
            "Swamp",
            "Plains",
        ],
    );

    let hands = four_card_hands(&kinds);
    assert_eq!(hands.len(), 1365);

    let mut compared = 0;
    for hand in hands {
        let mut game = GameState::from_parts(Hand::new(hand.clone()), Library::new(library.clone()), &config);
        game.logger.enable_capture();
        game.step = Step::Main2;

        let Some(greedy_turns) = greedy_continuation(&game, &config) else {
            continue;
        };
        let outcome = SequenceSearch::new(&config).run(&game, &config);
        let hand_names: Vec<&str> = hand.iter().map(|c| c.name.as_str()).collect();
        let searched = outcome
            .turns_to_win
            .unwrap_or_else(|| panic!("{hand_names:?}: greedy won in {greedy_turns}, search found nothing"));
        assert!(
            searched <= greedy_turns,
            "{hand_names:?}: search {searched} > greedy {greedy_turns}"
        );
        compared += 1;
    }
    assert!(compared > 0);
}

#[test]
fn test_search_finds_order_greedy_misses() {
    let catalog = Catalog::new();
    let config = SimulationConfig {
        opponent_life: 4,
        ..Default::default()
    };
    // Greedy would try Hordechief first and stall; the search puts the
    // one-drop in front
    let mut game = GameState::from_parts(
        Hand::new(named(&catalog, &["Mardu Hordechief", "Mardu Woe-Reaper", "Plains"])),
        Library::new(named(&catalog, &["Plains"; 8])),
        &config,
    );
    game.logger.enable_capture();
    game.step = Step::Main2;

    let mut search = SequenceSearch::new(&config);
    let outcome = search.run(&game, &config);

    assert_eq!(outcome.turns_to_win, Some(2));
    // Three cards, all distinct
    assert_eq!(outcome.permutations, 6);
    let order = search.best_order().unwrap();
    let reaper = order.iter().position(|c| c.name.as_str() == "Mardu Woe-Reaper").unwrap();
    let hordechief = order.iter().position(|c| c.name.as_str() == "Mardu Hordechief").unwrap();
    assert!(reaper < hordechief);

    let greedy_turn = win_turn(&game, Policy::Greedy, &config);
    let exhaustive_turn = win_turn(&game, Policy::Exhaustive, &config);
    assert!(exhaustive_turn.unwrap() <= greedy_turn.unwrap_or(u32::MAX));
}

#[test]
fn test_planner_spends_at_least_greedy_mana() {
    let catalog = Catalog::new();
    let deck = catalog.mardu_midrange().unwrap();
    let config = SimulationConfig::default();

    for seed in 0..20 {
        let mut game = GameState::with_seed(&deck, &config, seed);
        game.logger.enable_capture();
        // Give the planner some lands to work with
        for _ in 0..2 {
            greedy::play_first_land(&mut game);
            game.untap();
        }

        let planned = land_plan::plan(&game);

        let mut greedy_game = game.clone();
        let before = spent_mana(&greedy_game);
        greedy::main_phase(&mut greedy_game);
        let greedy_spent = spent_mana(&greedy_game) - before;

        let mut planner_game = game.clone();
        land_plan::main_phase(&mut planner_game);
        let planner_spent = spent_mana(&planner_game) - before;

        assert_eq!(planner_spent, planned.value, "seed {seed}");
        assert!(planner_spent >= greedy_spent, "seed {seed}: {planner_spent} < {greedy_spent}");
    }
}

#[test]
fn test_exhaustive_game_status_matches_loop_result() {
    let catalog = Catalog::new();
    let deck = catalog.mardu_warriors().unwrap();
    let config = small_hand_config();

    let mut game = GameState::with_seed(&deck, &config, 2);
    game.logger.enable_capture();
    let result = GameLoop::new(&mut game, Policy::Exhaustive, &config).run_game();

    match result.status {
        Status::Win => assert!(game.opponent_life <= 0),
        Status::Lose => assert!(game.library.is_empty()),
        other => panic!("unexpected status {other}"),
    }
    assert_eq!(result.turns_played, game.turn);
}
