//! Weighted digit tables
//!
//! A delivery is decided by a single digit drawn from one of two fixed
//! tables. The table order matters: a draw is resolved by walking the entries
//! in order and subtracting weights until the draw falls inside one.

use serde::{Deserialize, Serialize};

/// Balls in one over
pub const BALLS_PER_OVER: u32 = 6;

/// One digit and its relative weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub digit: u8,
    pub weight: u32,
}

const fn entry(digit: u8, weight: u32) -> WeightEntry {
    WeightEntry { digit, weight }
}

/// Which table a delivery is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// Every over except the last
    Standard,
    /// The last over of the innings (more boundaries, more extras)
    FinalOver,
}

/// A fixed, ordered weight table covering every digit 0-9 exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTable {
    pub kind: TableKind,
    entries: [WeightEntry; 10],
}

/// Standard delivery weights (sum 100)
pub const STANDARD_TABLE: WeightTable = WeightTable {
    kind: TableKind::Standard,
    entries: [
        entry(1, 20),
        entry(2, 20),
        entry(4, 20),
        entry(3, 10),
        entry(7, 10),
        entry(8, 10),
        entry(6, 3),
        entry(9, 3),
        entry(0, 3),
        entry(5, 1),
    ],
};

/// Final-over delivery weights (sum 117)
pub const FINAL_OVER_TABLE: WeightTable = WeightTable {
    kind: TableKind::FinalOver,
    entries: [
        entry(1, 20),
        entry(2, 20),
        entry(4, 20),
        entry(6, 12),
        entry(8, 12),
        entry(7, 12),
        entry(9, 12),
        entry(3, 4),
        entry(0, 4),
        entry(5, 1),
    ],
};

impl WeightTable {
    /// Pick the table for the current delivery context
    pub fn for_context(is_final_over: bool) -> &'static WeightTable {
        if is_final_over {
            &FINAL_OVER_TABLE
        } else {
            &STANDARD_TABLE
        }
    }

    /// Entries in walk order
    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    /// Sum of all weights; draws are taken uniformly from `0..total()`
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Weight assigned to a digit (0 if the digit is not in the table)
    pub fn weight_of(&self, digit: u8) -> u32 {
        self.entries
            .iter()
            .find(|e| e.digit == digit)
            .map(|e| e.weight)
            .unwrap_or(0)
    }

    /// Resolve a draw in `0..total()` to a digit by walking the table
    ///
    /// Draws at or past the total clamp to the first entry, so the walk is
    /// total over all inputs.
    pub fn digit_for_draw(&self, draw: u32) -> u8 {
        let mut remaining = draw;
        for e in &self.entries {
            if remaining < e.weight {
                return e.digit;
            }
            remaining -= e.weight;
        }
        self.entries[0].digit
    }
}

/// Is the batter in the last over of their innings?
///
/// The final over starts once `balls_bowled` reaches `(overs - 1) * 6`.
/// A one-over innings is therefore a final over from its first ball.
pub fn is_final_over(balls_bowled: u32, overs: u32) -> bool {
    balls_bowled >= overs.saturating_sub(1).saturating_mul(BALLS_PER_OVER)
}
