//! Player innings state

use crate::core::outcome::{DeliveryCategory, DeliveryOutcome};
use crate::core::tables::BALLS_PER_OVER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Batting position in a match (player 1 always bats first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Zero-based index into the session's player list
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// One-based player number, as shown on the scoreboard
    pub fn number(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Cumulative innings stats for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Display name
    pub name: String,

    /// Runs scored
    pub score: u32,

    /// Legal deliveries faced
    pub balls_bowled: u32,

    /// Dismissals so far
    pub wickets_lost: u32,

    /// All out (wickets_lost reached the match's wicket limit)
    pub is_out: bool,

    /// Runs credited on each delivery, oldest first
    pub delivery_history: Vec<u32>,
}

/// Free hit carried into the next delivery
///
/// A no-ball always grants one. A wide bowled during a free hit keeps it.
/// Any other delivery uses it up (including dots and runs, which never
/// needed it).
pub fn next_free_hit(free_hit_active: bool, category: DeliveryCategory) -> bool {
    match category {
        DeliveryCategory::NoBall => true,
        DeliveryCategory::Wide => free_hit_active,
        DeliveryCategory::Runs
        | DeliveryCategory::Dot
        | DeliveryCategory::Out
        | DeliveryCategory::Saved => false,
    }
}

impl PlayerStats {
    pub fn new(name: impl Into<String>) -> Self {
        PlayerStats {
            name: name.into(),
            score: 0,
            balls_bowled: 0,
            wickets_lost: 0,
            is_out: false,
            delivery_history: Vec::new(),
        }
    }

    /// Apply one delivery, returning the updated stats and next free-hit flag
    ///
    /// `self` is left untouched. Wickets never climb past `total_wickets`.
    pub fn apply(
        &self,
        outcome: &DeliveryOutcome,
        total_wickets: u32,
        free_hit_active: bool,
    ) -> (PlayerStats, bool) {
        let mut next = self.clone();

        next.score += outcome.score_added;
        next.balls_bowled += outcome.balls_added;

        if outcome.category == DeliveryCategory::Out && next.wickets_lost < total_wickets {
            next.wickets_lost += 1;
        }
        next.is_out = next.wickets_lost >= total_wickets;
        next.delivery_history.push(outcome.score_added);

        (next, next_free_hit(free_hit_active, outcome.category))
    }

    /// Fresh innings for the same player
    pub fn reset(&self) -> Self {
        PlayerStats::new(self.name.clone())
    }

    /// Overs faced in cricket notation: "1.4" is one over and four balls
    pub fn overs_display(&self) -> String {
        format!(
            "{}.{}",
            self.balls_bowled / BALLS_PER_OVER,
            self.balls_bowled % BALLS_PER_OVER
        )
    }

    /// Legal balls left out of `total_balls`
    pub fn balls_remaining(&self, total_balls: u32) -> u32 {
        total_balls.saturating_sub(self.balls_bowled)
    }

    /// Has this innings finished (all out or out of balls)?
    pub fn innings_complete(&self, total_balls: u32) -> bool {
        self.is_out || self.balls_bowled >= total_balls
    }
}
