//! Delivery outcome generator
//!
//! Turns a delivery context (final over? free hit?) into a resolved
//! [`DeliveryOutcome`]. Holds no match state; all randomness comes from the
//! wrapped [`DeliverySource`].

use crate::core::{DeliveryOutcome, WeightTable};
use crate::game::source::{DeliverySource, RandomSource, ScriptedSource};

/// Resolves deliveries from a random source
pub struct OutcomeGenerator {
    source: Box<dyn DeliverySource + Send>,
}

impl OutcomeGenerator {
    /// Create a generator with an entropy-seeded RNG
    pub fn new() -> Self {
        OutcomeGenerator {
            source: Box::new(RandomSource::new()),
        }
    }

    /// Create a generator with a seeded RNG (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        OutcomeGenerator {
            source: Box::new(RandomSource::with_seed(seed)),
        }
    }

    /// Create a generator that replays a fixed digit sequence
    pub fn scripted(digits: impl IntoIterator<Item = u8>) -> Self {
        OutcomeGenerator {
            source: Box::new(ScriptedSource::new(digits)),
        }
    }

    /// Wrap any delivery source
    pub fn with_source(source: Box<dyn DeliverySource + Send>) -> Self {
        OutcomeGenerator { source }
    }

    /// Resolve one delivery
    pub fn resolve(&mut self, is_final_over: bool, free_hit_active: bool) -> DeliveryOutcome {
        let table = WeightTable::for_context(is_final_over);
        let digit = self.source.draw_digit(table);
        let prefix = self.source.draw_page_prefix();
        DeliveryOutcome::from_draw(prefix, digit, free_hit_active)
    }
}

impl Default for OutcomeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
