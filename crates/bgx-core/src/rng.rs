//! Deterministic per-actor randomness behind a pluggable `Dice` trait.
//!
//! # Determinism strategy
//!
//! Each actor gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (actor_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive actor IDs uniformly across the seed space.
//! Actors never share RNG state, so spawning or despawning one actor does
//! not disturb the draw sequence of any other — replays stay reproducible.
//!
//! # Why a trait?
//!
//! The executor consumes randomness at exactly two points: picking an exit
//! of a random-choice node and rolling percentage gates on timers.  Routing
//! both through [`Dice`] lets tests and deterministic replays substitute a
//! scripted sequence ([`SequenceDice`]) without touching the executor.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::TargetId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── Dice ──────────────────────────────────────────────────────────────────────

/// The executor's randomness source.
pub trait Dice {
    /// Uniform index in `0..n`.  `n` must be non-zero.
    fn roll_index(&mut self, n: usize) -> usize;

    /// Uniform draw in `[0.0, 100.0)`, compared against authored percentages.
    fn roll_percent(&mut self) -> f32;
}

// ── ActorRng ──────────────────────────────────────────────────────────────────

/// Per-actor deterministic RNG — the production [`Dice`] implementation.
///
/// Create one per executor at actor spawn time.  The type is `!Sync` by
/// construction; each executor owns its own instance.
pub struct ActorRng(SmallRng);

impl ActorRng {
    /// Seed deterministically from the run's global seed and an actor ID.
    pub fn new(global_seed: u64, actor: TargetId) -> Self {
        let seed = global_seed ^ (actor.0 as u64).wrapping_mul(MIXING_CONSTANT);
        ActorRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed directly — for hosts that manage their own seed derivation.
    pub fn from_seed(seed: u64) -> Self {
        ActorRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

impl Dice for ActorRng {
    #[inline]
    fn roll_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "roll_index over an empty range");
        self.0.gen_range(0..n)
    }

    #[inline]
    fn roll_percent(&mut self) -> f32 {
        self.0.gen_range(0.0..100.0)
    }
}

// ── SequenceDice ──────────────────────────────────────────────────────────────

/// A [`Dice`] that replays scripted draws.
///
/// Useful in tests and deterministic replays: index draws cycle through
/// `indices`, percent draws cycle through `percents`.  Empty scripts fall
/// back to `0` / `0.0`.
#[derive(Default)]
pub struct SequenceDice {
    indices:  Vec<usize>,
    percents: Vec<f32>,
    next_idx: usize,
    next_pct: usize,
}

impl SequenceDice {
    pub fn new(indices: Vec<usize>, percents: Vec<f32>) -> Self {
        Self { indices, percents, next_idx: 0, next_pct: 0 }
    }

    /// Script only index draws; percent draws return `0.0`.
    pub fn indices(indices: Vec<usize>) -> Self {
        Self::new(indices, vec![])
    }

    /// Script only percent draws; index draws return `0`.
    pub fn percents(percents: Vec<f32>) -> Self {
        Self::new(vec![], percents)
    }
}

impl Dice for SequenceDice {
    fn roll_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "roll_index over an empty range");
        if self.indices.is_empty() {
            return 0;
        }
        let v = self.indices[self.next_idx % self.indices.len()];
        self.next_idx += 1;
        // Scripted values outside the range would hide authoring mistakes.
        v.min(n - 1)
    }

    fn roll_percent(&mut self) -> f32 {
        if self.percents.is_empty() {
            return 0.0;
        }
        let v = self.percents[self.next_pct % self.percents.len()];
        self.next_pct += 1;
        v
    }
}
