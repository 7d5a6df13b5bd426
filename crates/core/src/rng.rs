//! RNG module - injectable random sources
//!
//! Every random decision a game makes (food placement, piece choice, tile
//! spawns, mine layout, ship placement, AI targeting) goes through the
//! [`RandomSource`] trait, so a round can be replayed exactly.
//!
//! - [`GameRng`]: seedable ChaCha8 stream for real play and seeded tests.
//! - [`ScriptedRandom`]: replays a fixed queue of answers; running dry is an
//!   error rather than a silent default.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{GameError, GameResult};

/// Source of pseudo-random decisions.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn next_int(&mut self, low: i32, high: i32) -> GameResult<i32>;

    /// `true` with the given probability (`0.0..=1.0`).
    fn next_bool(&mut self, probability: f64) -> GameResult<bool>;

    /// Uniform index into a collection of `len` items.
    fn pick_index(&mut self, len: usize) -> GameResult<usize> {
        if len == 0 {
            return Err(GameError::EmptyRange { low: 0, high: -1 });
        }
        let high = i32::try_from(len - 1).unwrap_or(i32::MAX);
        self.next_int(0, high).map(|i| i as usize)
    }

    /// Uniformly chosen element of `items`.
    fn choose<T: Copy>(&mut self, items: &[T]) -> GameResult<T>
    where
        Self: Sized,
    {
        let idx = self.pick_index(items.len())?;
        Ok(items[idx])
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_int(&mut self, low: i32, high: i32) -> GameResult<i32> {
        (**self).next_int(low, high)
    }

    fn next_bool(&mut self, probability: f64) -> GameResult<bool> {
        (**self).next_bool(probability)
    }
}

fn check_probability(probability: f64) -> GameResult<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(GameError::InvalidConfig(format!(
            "probability {} is outside 0..=1",
            probability
        )))
    }
}

/// Deterministic RNG backed by ChaCha8.
///
/// The same seed always produces the same sequence of decisions.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed drawn from OS entropy, for casual play.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_int(&mut self, low: i32, high: i32) -> GameResult<i32> {
        if low > high {
            return Err(GameError::EmptyRange { low, high });
        }
        Ok(self.inner.gen_range(low..=high))
    }

    fn next_bool(&mut self, probability: f64) -> GameResult<bool> {
        check_probability(probability)?;
        Ok(self.inner.gen_bool(probability))
    }
}

/// Replays scripted answers, for tests that need an exact layout.
///
/// Integers outside the requested range wrap into it, so a script can be
/// written once and reused against different ranges.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<i32>,
    bools: VecDeque<bool>,
}

impl ScriptedRandom {
    pub fn new(ints: impl IntoIterator<Item = i32>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            bools: VecDeque::new(),
        }
    }

    pub fn with_bools(mut self, bools: impl IntoIterator<Item = bool>) -> Self {
        self.bools = bools.into_iter().collect();
        self
    }

    /// Number of integer answers left.
    pub fn remaining(&self) -> usize {
        self.ints.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, low: i32, high: i32) -> GameResult<i32> {
        if low > high {
            return Err(GameError::EmptyRange { low, high });
        }
        let v = self.ints.pop_front().ok_or(GameError::RandomExhausted)?;
        let span = i64::from(high) - i64::from(low) + 1;
        Ok((i64::from(low) + (i64::from(v) - i64::from(low)).rem_euclid(span)) as i32)
    }

    fn next_bool(&mut self, probability: f64) -> GameResult<bool> {
        check_probability(probability)?;
        self.bools.pop_front().ok_or(GameError::RandomExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_int(0, 1000), rng2.next_int(0, 1000));
        }
    }

    #[test]
    fn test_rng_stays_in_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..500 {
            let v = rng.next_int(-3, 3).unwrap();
            assert!((-3..=3).contains(&v));
        }
        assert_eq!(rng.next_int(4, 4), Ok(4));
    }

    #[test]
    fn test_empty_range_is_an_error() {
        let mut rng = GameRng::new(1);
        assert_eq!(
            rng.next_int(5, 4),
            Err(GameError::EmptyRange { low: 5, high: 4 })
        );
        assert!(rng.pick_index(0).is_err());
    }

    #[test]
    fn test_probability_bounds() {
        let mut rng = GameRng::new(1);
        assert_eq!(rng.next_bool(1.0), Ok(true));
        assert_eq!(rng.next_bool(0.0), Ok(false));
        assert!(rng.next_bool(1.5).is_err());
    }

    #[test]
    fn test_scripted_replays_then_exhausts() {
        let mut rng = ScriptedRandom::new([2, 7, -1]).with_bools([true]);
        assert_eq!(rng.next_int(0, 9), Ok(2));
        // 7 wraps into 0..=3
        assert_eq!(rng.next_int(0, 3), Ok(3));
        assert_eq!(rng.next_int(0, 3), Ok(3));
        assert_eq!(rng.next_int(0, 3), Err(GameError::RandomExhausted));
        assert_eq!(rng.next_bool(0.9), Ok(true));
        assert_eq!(rng.next_bool(0.9), Err(GameError::RandomExhausted));
    }

    #[test]
    fn test_choose() {
        let mut rng = ScriptedRandom::new([1]);
        assert_eq!(rng.choose(&['a', 'b', 'c']), Ok('b'));
    }
}
