//! Mana affordability solver
//!
//! Decides whether a cost can be paid from the untapped lands on the
//! battlefield, and if so which lands to tap.
//!
//! # Algorithm
//!
//! The solver builds the set of every *profile* reachable by tapping some
//! subset of the lands, one land at a time:
//!
//! ```text
//! reachable = { empty }
//! for each land L:
//!     reachable = reachable ∪ { p + c | p ∈ reachable, c ∈ colors(L) }
//! ```
//!
//! Profiles are deduplicated by their color counts. When two subsets reach
//! the same counts the lower land bitmask is kept, so the result does not
//! depend on hash iteration order. With dual lands the number of distinct
//! profiles stays small (bounded by the number of count vectors), which
//! keeps this far below the 2^n subset enumeration.
//!
//! Payment selection picks the payable profile with the fewest mana
//! (= fewest lands), then the lowest bitmask.

use crate::core::{Color, ManaCost, ManaPool};
use crate::zones::Battlefield;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Width of the tapped-land bitset
pub const MAX_SOURCES: usize = 64;

/// An untapped land and the colors it can be tapped for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManaSource {
    /// Battlefield index of the permanent
    pub permanent: usize,

    /// One of these is produced per tap
    pub colors: SmallVec<[Color; 3]>,
}

impl ManaSource {
    pub fn new(permanent: usize, colors: &[Color]) -> Self {
        ManaSource {
            permanent,
            colors: SmallVec::from_slice(colors),
        }
    }
}

/// Mana reachable by tapping a particular subset of sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ManaProfile {
    /// W, U, B, R, G, colorless
    pub counts: [u8; 6],

    /// Bit i set ⇔ source i (in solver order) is tapped
    pub lands: u64,
}

impl ManaProfile {
    pub fn amount(&self, color: Color) -> u8 {
        self.counts[color.slot()]
    }

    /// Total mana (equal to the number of tapped lands)
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }

    /// Every colored requirement is met and the leftover covers the generic part
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        let mut surplus = u32::from(self.amount(Color::Colorless));
        for color in Color::WUBRG {
            let available = self.amount(color);
            let required = cost.color(color);
            if available < required {
                return false;
            }
            surplus += u32::from(available - required);
        }
        surplus >= u32::from(cost.generic)
    }

    /// The mana this profile puts into a pool
    pub fn to_pool(&self) -> ManaPool {
        let mut pool = ManaPool::new();
        for color in Color::WUBRG.into_iter().chain([Color::Colorless]) {
            for _ in 0..self.amount(color) {
                pool.add_color(color);
            }
        }
        pool
    }

    fn sort_key(&self) -> (u32, u64) {
        (self.total(), self.lands)
    }
}

/// Lands chosen to pay a cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Battlefield indices to tap, ascending
    pub lands: Vec<usize>,

    /// The mana those lands produce
    pub profile: ManaProfile,
}

impl Payment {
    /// Tap exactly the chosen lands
    pub fn apply(&self, battlefield: &mut Battlefield) {
        for &index in &self.lands {
            if let Some(permanent) = battlefield.get_mut(index) {
                permanent.tap();
            }
        }
    }

    pub fn land_count(&self) -> usize {
        self.lands.len()
    }
}

/// Reachable-profile set over a fixed group of sources
#[derive(Debug, Clone)]
pub struct ManaSolver {
    sources: Vec<ManaSource>,
    profiles: Vec<ManaProfile>,
}

impl ManaSolver {
    /// Solver over the untapped lands of `battlefield`, in battlefield order
    pub fn new(battlefield: &Battlefield) -> Self {
        let sources = battlefield
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_mana_source())
            .map(|(i, p)| ManaSource::new(i, &p.card.produces))
            .collect();
        Self::from_sources(sources)
    }

    /// Solver over an explicit source list (sources past the 64th are ignored)
    pub fn from_sources(mut sources: Vec<ManaSource>) -> Self {
        sources.truncate(MAX_SOURCES);
        let profiles = reachable_profiles(&sources);
        ManaSolver { sources, profiles }
    }

    pub fn sources(&self) -> &[ManaSource] {
        &self.sources
    }

    /// All reachable profiles, fewest mana first
    pub fn profiles(&self) -> &[ManaProfile] {
        &self.profiles
    }

    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        self.profiles.iter().any(|p| p.can_pay(cost))
    }

    /// Minimum-land payment for `cost`, or `None` if it cannot be paid
    pub fn cheapest_payment(&self, cost: &ManaCost) -> Option<Payment> {
        // Profiles are sorted by (total, mask), so the first hit is the answer
        let profile = *self.profiles.iter().find(|p| p.can_pay(cost))?;
        let lands = (0..self.sources.len())
            .filter(|&bit| profile.lands & (1u64 << bit) != 0)
            .map(|bit| self.sources[bit].permanent)
            .collect();
        Some(Payment { lands, profile })
    }
}

fn reachable_profiles(sources: &[ManaSource]) -> Vec<ManaProfile> {
    let mut reachable: FxHashMap<[u8; 6], u64> = FxHashMap::default();
    reachable.insert([0; 6], 0);

    for (bit, source) in sources.iter().enumerate() {
        let tapped = 1u64 << bit;
        let mut next = reachable.clone();
        for (counts, &lands) in &reachable {
            for &color in &source.colors {
                let mut extended = *counts;
                extended[color.slot()] += 1;
                let mask = lands | tapped;
                next.entry(extended)
                    .and_modify(|best| *best = (*best).min(mask))
                    .or_insert(mask);
            }
        }
        reachable = next;
    }

    let mut profiles: Vec<ManaProfile> = reachable
        .into_iter()
        .map(|(counts, lands)| ManaProfile { counts, lands })
        .collect();
    profiles.sort_by_key(ManaProfile::sort_key);
    profiles
}
