//! Performance benchmarks for the mana solver and the sequencing policies
//!
//! Measures:
//!
//! 1. **Solver** - building the reachable-profile table for boards of
//!    increasing size, and answering affordability queries against it
//! 2. **Policies** - a full silent game under each main-phase policy
//!
//! Run without default features to strip logging from the hot path:
//! `cargo bench --no-default-features`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mtg_goldfish::{
    catalog::Catalog,
    config::SimulationConfig,
    core::{ManaCost, Permanent},
    game::{GameLoop, GameState, ManaSolver, Policy, VerbosityLevel},
    zones::Battlefield,
};
use std::time::Duration;

const LANDS: [&str; 6] = [
    "Plains",
    "Swamp",
    "Caves of Koilos",
    "Nomad Outpost",
    "Battlefield Forge",
    "Bloodfell Caves",
];

fn board(catalog: &Catalog, size: usize) -> Battlefield {
    let mut battlefield = Battlefield::new();
    for i in 0..size {
        if let Some(card) = catalog.get(LANDS[i % LANDS.len()]) {
            battlefield.add(Permanent::new(card));
        }
    }
    battlefield
}

fn bench_solver(c: &mut Criterion) {
    let catalog = Catalog::new();
    let mut group = c.benchmark_group("mana_solver");

    for size in [4usize, 8, 12, 16] {
        let battlefield = board(&catalog, size);
        group.bench_with_input(BenchmarkId::new("build", size), &battlefield, |b, battlefield| {
            b.iter(|| ManaSolver::new(black_box(battlefield)))
        });

        let solver = ManaSolver::new(&battlefield);
        let costs: Vec<ManaCost> = ["W", "1B", "WB", "2W", "1RWB", "3B", "RRR"]
            .iter()
            .map(|s| ManaCost::from_string(s))
            .collect();
        group.bench_with_input(BenchmarkId::new("cheapest_payment", size), &costs, |b, costs| {
            b.iter(|| {
                for cost in costs {
                    black_box(solver.cheapest_payment(black_box(cost)));
                }
            })
        });
    }

    group.finish();
}

fn bench_policies(c: &mut Criterion) {
    let catalog = Catalog::new();
    let Ok(deck) = catalog.mardu_warriors() else {
        return;
    };
    let config = SimulationConfig {
        opening_hand: 5,
        max_hand_size: 5,
        ..Default::default()
    };

    let mut group = c.benchmark_group("full_game");
    group.sample_size(10); // Exhaustive games are slow
    group.measurement_time(Duration::from_secs(20));

    for policy in [Policy::Greedy, Policy::PowerSet, Policy::Exhaustive] {
        group.bench_with_input(BenchmarkId::new(policy.to_string(), 42), &policy, |b, &policy| {
            b.iter(|| {
                let mut game = GameState::with_seed(&deck, &config, 42);
                game.logger.set_verbosity(VerbosityLevel::Silent);
                black_box(GameLoop::new(&mut game, policy, &config).run_game())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solver, bench_policies);
criterion_main!(benches);
