//! Injectable uniform choice for the two random draws of each collapse

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform choices over finite sequences
pub trait RandomSource {
    /// Uniform index in `0..len`
    ///
    /// Callers never pass `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Pick one element uniformly, `None` for an empty slice
pub fn choose<'a, T, R>(source: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(source.next_index(items.len()))
}

/// Seeded random selector for reproducible runs
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of indices, wrapping each into range
///
/// Once the list runs out every further draw returns 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequenceRandom {
    /// Create a source replaying `indices` in order
    pub const fn new(indices: Vec<usize>) -> Self {
        Self { indices, cursor: 0 }
    }

    /// Number of draws made so far
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_index(&mut self, len: usize) -> usize {
        let value = self.indices.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        value % len.max(1)
    }
}
