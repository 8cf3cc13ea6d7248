/*
seeded_random.rs

Copyright 2025 Hervé Quatremain

This file is part of Zipgrid.

Zipgrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Zipgrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Zipgrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Deterministic pseudo-random numbers.
//!
//! Daily puzzles must be identical for every player, so the generator never uses the
//! thread-local random source while building a level. A [`SeededRandom`] object is created from
//! the level seed and is threaded through every generation step instead.

/// Multiplier of the linear congruential generator.
const MULTIPLIER: u64 = 9301;

/// Increment of the linear congruential generator.
const INCREMENT: u64 = 49297;

/// Modulus of the linear congruential generator.
const MODULUS: u64 = 233280;

/// Linear congruential generator.
///
/// `state = (state * 9301 + 49297) mod 233280` and each output is `state / 233280`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    /// Current state, always lower than [`MODULUS`] after the first draw.
    state: u64,
}

impl SeededRandom {
    /// Create a [`SeededRandom`] object from the given seed.
    pub fn new(seed: u64) -> Self {
        // (seed * A + C) mod M == ((seed mod M) * A + C) mod M
        Self {
            state: seed % MODULUS,
        }
    }

    /// Return the next float in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Return an integer between `min` and `max`, both included.
    pub fn next_int(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            // Still consume a draw so that the sequence does not depend on the bounds
            self.next();
            return min;
        }
        (self.next() * (max - min + 1) as f64).floor() as usize + min
    }

    /// Shuffle the slice in place (Fisher-Yates, from the end).
    pub fn shuffle_in_place<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j: usize = self.next_int(0, i);
            items.swap(i, j);
        }
    }

    /// Return a shuffled copy of the slice.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut shuffled: Vec<T> = items.to_vec();
        self.shuffle_in_place(&mut shuffled);
        shuffled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::new(12345);
        let mut b = SeededRandom::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next().to_bits(), b.next().to_bits());
        }
    }

    #[test]
    fn first_draws_match_reference_arithmetic() {
        // (12345 * 9301 + 49297) % 233280 = 96382
        let mut rnd = SeededRandom::new(12345);
        assert_eq!(rnd.next(), 96382.0 / 233280.0);
        // (96382 * 9301 + 49297) % 233280 = 3239
        assert_eq!(rnd.next(), 3239.0 / 233280.0);
    }

    #[test]
    fn large_seed_is_reduced() {
        let mut a = SeededRandom::new(MODULUS * 7 + 42);
        let mut b = SeededRandom::new(42);
        assert_eq!(a.next(), b.next());
    }

    #[test]
    fn next_stays_in_unit_interval() {
        let mut rnd = SeededRandom::new(1);
        for _ in 0..10_000 {
            let v: f64 = rnd.next();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn next_int_is_inclusive() {
        let mut rnd = SeededRandom::new(99);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let v: usize = rnd.next_int(3, 6);
            assert!((3..=6).contains(&v));
            seen[v - 3] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rnd = SeededRandom::new(5);
        assert_eq!(rnd.next_int(7, 7), 7);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rnd = SeededRandom::new(2024);
        let items: Vec<usize> = (0..20).collect();
        let mut shuffled: Vec<usize> = rnd.shuffle(&items);
        assert_ne!(shuffled, items);
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }
}
