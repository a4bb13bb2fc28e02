//! Random number generation for delve.
//!
//! Wraps a seeded ChaCha RNG behind the dice-notation helpers the game
//! uses (`roll`, `coin`, inclusive ranges, slice choice). Everything that
//! consumes randomness takes an explicit `GameRng` handle, so a whole
//! dungeon and every gameplay decision are reproducible from one seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Game random number generator.
///
/// Serialization stores only the seed; a deserialized generator restarts
/// its stream from the beginning.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed.
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll `num` dice with `sides` sides each and sum them.
    ///
    /// `roll(2, 8)` is 2d8: an integer in `2..=16`. Returns 0 when either
    /// argument is 0.
    pub fn roll(&mut self, num: u32, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (0..num).map(|_| self.rng.gen_range(1..=sides)).sum()
    }

    /// A coin toss.
    pub fn coin(&mut self) -> bool {
        self.rng.gen_range(0..2) == 1
    }

    /// Uniform integer in `lo..=hi`. Returns `lo` when the range is empty.
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform integer in `0..n`. Returns 0 when `n` is 0.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Choose a random element from a slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.below(items.len() as u32) as usize])
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }

    /// Two distinct indices in `0..n`, or `None` when `n < 2`.
    pub fn pair(&mut self, n: usize) -> Option<(usize, usize)> {
        if n < 2 {
            return None;
        }
        let a = self.below(n as u32) as usize;
        let mut b = self.below(n as u32 - 1) as usize;
        if b >= a {
            b += 1;
        }
        Some((a, b))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
