//! Random draw sources
//!
//! The generators only need two primitives: a uniform index below a bound
//! and a raw integer value. [`Draw`] captures exactly that so a run can be
//! driven by a seeded `rand` generator ([`RngDraw`]) or by a recorded
//! sequence ([`ScriptedDraw`]) when a failure has to be replayed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of uniform random draws
pub trait Draw {
    /// Uniform index in `[0, bound)`. `bound` is at least 1.
    fn below(&mut self, bound: usize) -> usize;

    /// Uniform 32-bit value
    fn value(&mut self) -> i32;

    /// Fair coin; `true` on the first half of a two-way draw
    fn coin(&mut self) -> bool {
        self.below(2) == 0
    }
}

impl<D: Draw + ?Sized> Draw for &mut D {
    fn below(&mut self, bound: usize) -> usize {
        (**self).below(bound)
    }

    fn value(&mut self) -> i32 {
        (**self).value()
    }
}

/// [`Draw`] over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDraw<R>(pub R);

impl<R: Rng> Draw for RngDraw<R> {
    fn below(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }

    fn value(&mut self) -> i32 {
        self.0.gen()
    }
}

impl RngDraw<StdRng> {
    /// Seed a standard generator
    ///
    /// Uses `seed` when given, otherwise a seed taken from the clock.
    /// Returns the seed actually used so the run can be replayed.
    pub fn seeded(seed: Option<u64>) -> (Self, u64) {
        let seed = seed.unwrap_or_else(clock_seed);
        (RngDraw(StdRng::seed_from_u64(seed)), seed)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Replays a recorded sequence of draws
///
/// Each draw consumes the next recorded number, reduced modulo the bound.
/// Once the script runs out every draw yields 0, which always selects a
/// leaf category, so generation still terminates.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraw {
    script: VecDeque<usize>,
    consumed: usize,
}

impl ScriptedDraw {
    /// Create a draw source from recorded numbers
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of draws taken so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of recorded draws not yet taken
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn next(&mut self) -> usize {
        self.consumed += 1;
        self.script.pop_front().unwrap_or(0)
    }
}

impl Draw for ScriptedDraw {
    fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound >= 1, "below() needs a non-empty range");
        self.next() % bound
    }

    fn value(&mut self) -> i32 {
        self.next() as i32
    }
}
