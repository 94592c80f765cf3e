//! Explicit, splittable pseudo-random keys.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Pseudo-random number generator used to draw the samples of a single operation.
pub type Prng = ChaCha8Rng;

// Sampling and key derivation read from disjoint ChaCha streams.
const SAMPLE_STREAM: u64 = 0;
const SPLIT_STREAM: u64 = 1;
const FOLD_STREAM: u64 = 2;

/// A pseudo-random key.
///
/// Keys are plain values threaded explicitly through every stochastic operation.
/// The same key always produces the same samples; fresh randomness is obtained by
/// [splitting](PrngKey::split) a key into new independent keys.
/// A key should be consumed by at most one operation, the rest should receive split keys.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrngKey([u32; 2]);

impl PrngKey {
    /// Create a key from an integer seed.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(seed: u64) -> Self {
        Self([(seed >> 32) as u32, seed as u32])
    }

    /// Create a key from its raw words.
    pub const fn from_words(words: [u32; 2]) -> Self {
        Self(words)
    }

    /// The raw words of the key.
    pub const fn words(self) -> [u32; 2] {
        self.0
    }

    /// Generator for drawing samples from this key.
    pub fn rng(self) -> Prng {
        self.stream(SAMPLE_STREAM)
    }

    /// Split into two new keys.
    pub fn split(self) -> (Self, Self) {
        let [a, b] = self.split_n();
        (a, b)
    }

    /// Split into `N` new keys.
    pub fn split_n<const N: usize>(self) -> [Self; N] {
        let mut rng = self.stream(SPLIT_STREAM);
        [(); N].map(|_| Self(rng.gen()))
    }

    /// Derive a new key from this key and an integer.
    ///
    /// An alternative to [`PrngKey::split`] when keys are indexed, such as one key per worker.
    pub fn fold_in(self, data: u32) -> Self {
        let mut seed = <Prng as SeedableRng>::Seed::default();
        for (chunk, word) in seed.chunks_exact_mut(4).zip([self.0[0], self.0[1], data]) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        let mut rng = Prng::from_seed(seed);
        rng.set_stream(FOLD_STREAM);
        Self(rng.gen())
    }

    fn stream(self, stream: u64) -> Prng {
        let seed = (u64::from(self.0[0]) << 32) | u64::from(self.0[1]);
        let mut rng = Prng::seed_from_u64(seed);
        rng.set_stream(stream);
        rng
    }
}

impl From<u64> for PrngKey {
    fn from(seed: u64) -> Self {
        Self::new(seed)
    }
}
