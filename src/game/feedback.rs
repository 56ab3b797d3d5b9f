//! Feedback listener interface
//!
//! Presentation and sound layers hook into the match through this trait.
//! The controller calls it after each event has already been applied, so a
//! listener can react (play a sound, animate a page) but never change the
//! outcome.

use crate::core::{DeliveryCategory, DeliveryOutcome, PlayerSlot};
use crate::game::result::MatchResult;
use serde::{Deserialize, Serialize};

/// Crowd noise cue for a delivery or match end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrowdReaction {
    SlowClap,
    Ooh,
    Cheer,
}

impl CrowdReaction {
    /// Crowd response to a resolved delivery
    pub fn for_outcome(outcome: &DeliveryOutcome) -> Self {
        match outcome.category {
            DeliveryCategory::Runs if outcome.score_added >= 4 => CrowdReaction::Cheer,
            DeliveryCategory::Runs | DeliveryCategory::Dot => CrowdReaction::SlowClap,
            DeliveryCategory::Out | DeliveryCategory::Wide | DeliveryCategory::NoBall => {
                CrowdReaction::Ooh
            }
            DeliveryCategory::Saved => CrowdReaction::Cheer,
        }
    }
}

/// Receives match events for presentation
///
/// All hooks default to doing nothing.
pub trait FeedbackListener {
    /// A delivery was requested (the page flip starts)
    fn on_click(&mut self) {}

    /// A delivery was resolved and is waiting to be committed
    fn on_delivery_resolved(&mut self, _batter: PlayerSlot, _outcome: &DeliveryOutcome) {}

    fn on_crowd_reaction(&mut self, _reaction: CrowdReaction) {}

    /// Player 1's innings closed and player 2 needs `target` to win
    fn on_innings_change(&mut self, _target: u32) {}

    fn on_match_over(&mut self, _result: &MatchResult) {}
}

/// Listener that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentListener;

impl FeedbackListener for SilentListener {}
