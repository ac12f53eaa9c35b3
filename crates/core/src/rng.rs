//! RNG module - seeded randomness and the 7-bag piece dispenser
//!
//! Every random decision in the engines (tile spawns, food placement, piece
//! order) goes through [`SimpleRng`], so a seed fully determines a session.
//!
//! [`PieceBag`] implements the "7-bag" randomizer: a pool holding one of each
//! piece kind, shuffled with Fisher-Yates, drained one piece per draw and then
//! refilled and reshuffled.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Generate a uniform index in [0, len)
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }

    /// Generate a uniform float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (reseeding with it reproduces the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// 7-bag piece dispenser
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Remaining pieces of the current cycle; draws pop from the end.
    pool: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a bag with a freshly shuffled pool
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            pool: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.pool.clear();
        self.pool.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.pool);
    }

    /// Draw the next piece, refilling the pool when the cycle is exhausted
    pub fn draw(&mut self) -> PieceKind {
        if self.pool.is_empty() {
            self.refill();
        }
        match self.pool.pop() {
            Some(kind) => kind,
            // refill() always leaves seven pieces in the pool
            None => PieceKind::I,
        }
    }

    /// Pieces left in the current cycle
    pub fn remaining(&self) -> &[PieceKind] {
        &self.pool
    }

    /// The piece `ahead` draws from now, if it is still in this cycle
    pub fn peek(&self, ahead: usize) -> Option<PieceKind> {
        let index = self.pool.len().checked_sub(ahead + 1)?;
        Some(self.pool[index])
    }

    /// Align the next draw with a cycle boundary.
    ///
    /// A full pool is left as is, so a preview taken with [`peek`](Self::peek)
    /// stays valid.
    pub fn begin_cycle(&mut self) {
        if self.pool.len() < PieceKind::ALL.len() {
            self.refill();
        }
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_next_f64_in_unit_interval() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = SimpleRng::new(3);
        let mut values = [1, 2, 3, 4, 5, 6, 7, 8];
        rng.shuffle(&mut values);
        let mut sorted = values;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_bag_starts_full() {
        let bag = PieceBag::new(1);
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn test_peek_matches_draw_order() {
        let mut bag = PieceBag::new(5);
        let upcoming: Vec<_> = (0..7).filter_map(|i| bag.peek(i)).collect();
        assert_eq!(upcoming.len(), 7);
        assert_eq!(bag.peek(7), None);

        let drawn: Vec<_> = (0..7).map(|_| bag.draw()).collect();
        assert_eq!(drawn, upcoming);
    }

    #[test]
    fn test_begin_cycle_refills_partial_pool_only() {
        let mut bag = PieceBag::new(11);
        let first = bag.peek(0);
        bag.begin_cycle();
        assert_eq!(bag.peek(0), first);

        bag.draw();
        bag.draw();
        bag.begin_cycle();
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn test_bag_draws_all_seven_before_repeat() {
        let mut bag = PieceBag::new(1);

        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(bag.draw());
        }

        for kind in PieceKind::ALL {
            assert_eq!(
                drawn.iter().filter(|&&k| k == kind).count(),
                1,
                "Piece {:?} should appear exactly once",
                kind
            );
        }
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_bag_refills_after_cycle() {
        let mut bag = PieceBag::new(42);
        for _ in 0..7 {
            bag.draw();
        }
        let _eighth = bag.draw();
        assert_eq!(bag.remaining().len(), 6);
    }

    #[test]
    fn test_bag_never_skips_a_kind_for_more_than_twelve_draws() {
        let mut bag = PieceBag::new(2024);
        let mut since_seen = [0u32; 7];

        for _ in 0..700 {
            let kind = bag.draw();
            for (i, k) in PieceKind::ALL.iter().enumerate() {
                if *k == kind {
                    since_seen[i] = 0;
                } else {
                    since_seen[i] += 1;
                    assert!(since_seen[i] <= 12, "{:?} skipped too long", k);
                }
            }
        }
    }
}
