//! Sources of randomness for delivery resolution
//!
//! The outcome generator never touches an RNG directly. It asks a
//! `DeliverySource` for a digit and a page prefix, so tests and demos can
//! swap in a scripted sequence while normal play uses a seeded ChaCha RNG.

use crate::core::outcome::PAGE_PREFIX_COUNT;
use crate::core::WeightTable;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Supplies the random draws behind each delivery
pub trait DeliverySource {
    /// Draw a digit from the given weight table
    fn draw_digit(&mut self, table: &WeightTable) -> u8;

    /// Draw a page prefix in `0..PAGE_PREFIX_COUNT`
    fn draw_page_prefix(&mut self) -> u16;
}

/// Weighted random draws from a ChaCha RNG
///
/// The RNG state is serializable, so a source can be saved and restored
/// without diverging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomSource {
    rng: ChaCha12Rng,
}

impl RandomSource {
    /// Create a source seeded from OS entropy
    pub fn new() -> Self {
        RandomSource {
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Create a source with a fixed seed (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        RandomSource {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliverySource for RandomSource {
    fn draw_digit(&mut self, table: &WeightTable) -> u8 {
        let draw = self.rng.gen_range(0..table.total());
        table.digit_for_draw(draw)
    }

    fn draw_page_prefix(&mut self) -> u16 {
        self.rng.gen_range(0..PAGE_PREFIX_COUNT)
    }
}

/// Replays a fixed sequence of digits
///
/// Page prefixes cycle through `0..PAGE_PREFIX_COUNT` so consecutive pages
/// look different. Once the script runs out, every further draw is the
/// table's first digit (a draw of zero).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedSource {
    digits: Vec<u8>,
    position: usize,
    prefix: u16,
}

impl ScriptedSource {
    /// Create a scripted source. Only the last decimal digit of each value is used.
    pub fn new(digits: impl IntoIterator<Item = u8>) -> Self {
        ScriptedSource {
            digits: digits.into_iter().map(|d| d % 10).collect(),
            position: 0,
            prefix: 0,
        }
    }

    /// Digits not yet drawn
    pub fn remaining(&self) -> usize {
        self.digits.len().saturating_sub(self.position)
    }
}

impl DeliverySource for ScriptedSource {
    fn draw_digit(&mut self, table: &WeightTable) -> u8 {
        match self.digits.get(self.position) {
            Some(&digit) => {
                self.position += 1;
                digit
            }
            None => table.digit_for_draw(0),
        }
    }

    fn draw_page_prefix(&mut self) -> u16 {
        let prefix = self.prefix;
        self.prefix = (self.prefix + 7) % PAGE_PREFIX_COUNT;
        prefix
    }
}

impl<S: DeliverySource + ?Sized> DeliverySource for Box<S> {
    fn draw_digit(&mut self, table: &WeightTable) -> u8 {
        (**self).draw_digit(table)
    }

    fn draw_page_prefix(&mut self) -> u16 {
        (**self).draw_page_prefix()
    }
}
