//! Match session state and the turn-sequencing state machine
//!
//! A session moves through `AwaitingPlayer1 -> (AwaitingPlayer2) -> MatchOver`.
//! Every phase change goes through [`MatchPhase::transition`], which is a pure
//! function of the phase, the match mode and the batter's status after a
//! delivery. Delivery resolution and commit are separate calls so a caller can
//! put any delay between them; only one delivery may be pending at a time.

use crate::core::{is_final_over, DeliveryOutcome, PlayerSlot, PlayerStats};
use crate::game::config::{MatchConfig, MatchMode};
use crate::game::generator::OutcomeGenerator;
use crate::game::result::{MatchEndReason, MatchResult};
use crate::{CricketError, Result};
use serde::{Deserialize, Serialize};

/// Where the match is in its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    AwaitingPlayer1,
    /// Two-player matches only
    AwaitingPlayer2,
    MatchOver,
}

impl MatchPhase {
    /// Batter expected to face the next delivery
    pub fn batting(self) -> Option<PlayerSlot> {
        match self {
            MatchPhase::AwaitingPlayer1 => Some(PlayerSlot::One),
            MatchPhase::AwaitingPlayer2 => Some(PlayerSlot::Two),
            MatchPhase::MatchOver => None,
        }
    }

    /// Decide what happens after a committed delivery
    ///
    /// Player 2 wins the instant they pass the target, even with balls left.
    /// Player 1 has no such check; they are setting the target.
    pub fn transition(self, mode: MatchMode, status: TurnStatus) -> Transition {
        match self {
            MatchPhase::MatchOver => Transition::Continue,
            MatchPhase::AwaitingPlayer1 => {
                if !status.turn_over() {
                    return Transition::Continue;
                }
                match mode {
                    MatchMode::Solo => Transition::MatchOver(status.end_reason()),
                    MatchMode::Dual => Transition::InningsBreak,
                }
            }
            MatchPhase::AwaitingPlayer2 => {
                if status.target_reached {
                    Transition::MatchOver(MatchEndReason::TargetReached)
                } else if status.turn_over() {
                    Transition::MatchOver(status.end_reason())
                } else {
                    Transition::Continue
                }
            }
        }
    }
}

/// Batter's position after a delivery, as seen by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnStatus {
    pub all_out: bool,
    pub overs_complete: bool,
    /// Only ever set for player 2 in a two-player match
    pub target_reached: bool,
}

impl TurnStatus {
    pub fn turn_over(&self) -> bool {
        self.all_out || self.overs_complete
    }

    fn end_reason(&self) -> MatchEndReason {
        if self.all_out {
            MatchEndReason::AllOut
        } else {
            MatchEndReason::OversComplete
        }
    }
}

/// Phase change produced by one delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Same batter faces the next delivery
    Continue,
    /// Player 1's innings closed; player 2 comes in
    InningsBreak,
    MatchOver(MatchEndReason),
}

/// What a committed delivery did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Batter who faced the delivery
    pub batter: PlayerSlot,
    pub outcome: DeliveryOutcome,
    /// Free hit in force for the next delivery
    pub free_hit_next: bool,
    pub transition: Transition,
}

/// State of one match from first ball to result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSession {
    config: MatchConfig,
    /// One entry per participating player, in batting order
    players: Vec<PlayerStats>,
    phase: MatchPhase,
    active: PlayerSlot,
    free_hit_active: bool,
    /// Resolved but not yet committed delivery
    pending: Option<DeliveryOutcome>,
    end_reason: Option<MatchEndReason>,
}

impl MatchSession {
    /// Start a match. Fails if the configuration is invalid.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let players = config
            .player_names()
            .into_iter()
            .map(PlayerStats::new)
            .collect();

        Ok(MatchSession {
            config,
            players,
            phase: MatchPhase::AwaitingPlayer1,
            active: PlayerSlot::One,
            free_hit_active: false,
            pending: None,
            end_reason: None,
        })
    }

    /// Resolve the next delivery and hold it until it is committed
    ///
    /// Rejected when the match is over, a delivery is already pending, or the
    /// active batter is out. A rejected call leaves the session unchanged.
    pub fn request_delivery(&mut self, generator: &mut OutcomeGenerator) -> Result<DeliveryOutcome> {
        if self.phase == MatchPhase::MatchOver {
            return Err(CricketError::InvalidStateTransition(
                "cannot request a delivery: match is over".to_string(),
            ));
        }
        if self.pending.is_some() {
            return Err(CricketError::InvalidStateTransition(
                "cannot request a delivery: one is already in flight".to_string(),
            ));
        }
        if self.active_player().is_out {
            return Err(CricketError::InvalidStateTransition(format!(
                "cannot request a delivery: {} is already out",
                self.active_player().name
            )));
        }

        let outcome = generator.resolve(self.is_final_over(), self.free_hit_active);
        self.pending = Some(outcome);
        Ok(outcome)
    }

    /// Commit the pending delivery to the active batter and advance the phase
    ///
    /// The outcome must be the one returned by the last `request_delivery`.
    /// Committing with nothing pending (e.g. committing twice) is rejected and
    /// leaves the session unchanged.
    pub fn commit_delivery(&mut self, outcome: &DeliveryOutcome) -> Result<DeliveryReport> {
        match self.pending {
            None => {
                return Err(CricketError::InvalidStateTransition(
                    "cannot commit: no delivery in flight".to_string(),
                ))
            }
            Some(pending) if pending != *outcome => {
                return Err(CricketError::InvalidStateTransition(format!(
                    "cannot commit page {}: pending delivery is page {}",
                    outcome.page_number, pending.page_number
                )))
            }
            Some(_) => {}
        }

        let batter = self.active;
        let target = self.target();
        let (stats, free_hit_next) = self.players[batter.index()].apply(
            outcome,
            self.config.total_wickets,
            self.free_hit_active,
        );

        let status = TurnStatus {
            all_out: stats.is_out,
            overs_complete: stats.balls_bowled >= self.config.total_balls(),
            target_reached: batter == PlayerSlot::Two
                && target.is_some_and(|target| stats.score >= target),
        };

        self.players[batter.index()] = stats;
        self.free_hit_active = free_hit_next;
        self.pending = None;

        let transition = self.phase.transition(self.config.mode, status);
        match transition {
            Transition::Continue => {}
            Transition::InningsBreak => {
                self.phase = MatchPhase::AwaitingPlayer2;
                self.active = PlayerSlot::Two;
                self.free_hit_active = false;
            }
            Transition::MatchOver(reason) => {
                self.phase = MatchPhase::MatchOver;
                self.end_reason = Some(reason);
            }
        }

        Ok(DeliveryReport {
            batter,
            outcome: *outcome,
            free_hit_next: self.free_hit_active,
            transition,
        })
    }

    /// Start the match again from the first ball
    ///
    /// Keeps the current configuration (and so the same names) unless a new
    /// one is given. An invalid new configuration is rejected and the session
    /// is left as it was.
    pub fn restart(&mut self, config: Option<MatchConfig>) -> Result<()> {
        let config = config.unwrap_or_else(|| self.config.clone());
        *self = MatchSession::new(config)?;
        Ok(())
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::MatchOver
    }

    /// Batter currently (or, once the match is over, last) at the crease
    pub fn active_slot(&self) -> PlayerSlot {
        self.active
    }

    pub fn active_player(&self) -> &PlayerStats {
        &self.players[self.active.index()]
    }

    pub fn player(&self, slot: PlayerSlot) -> Option<&PlayerStats> {
        self.players.get(slot.index())
    }

    pub fn players(&self) -> &[PlayerStats] {
        &self.players
    }

    pub fn free_hit_active(&self) -> bool {
        self.free_hit_active
    }

    /// Delivery resolved but not yet committed
    pub fn pending(&self) -> Option<&DeliveryOutcome> {
        self.pending.as_ref()
    }

    /// Is the active batter in the last over of their innings?
    pub fn is_final_over(&self) -> bool {
        is_final_over(self.active_player().balls_bowled, self.config.overs)
    }

    /// Score player 2 must reach, once player 1's innings is closed
    pub fn target(&self) -> Option<u32> {
        match (self.config.mode, self.phase) {
            (MatchMode::Solo, _) | (MatchMode::Dual, MatchPhase::AwaitingPlayer1) => None,
            (MatchMode::Dual, _) => self.player(PlayerSlot::One).map(|p1| p1.score + 1),
        }
    }

    /// Runs player 2 still needs to win
    pub fn runs_required(&self) -> Option<u32> {
        let target = self.target()?;
        let chaser = self.player(PlayerSlot::Two)?;
        Some(target.saturating_sub(chaser.score))
    }

    pub fn end_reason(&self) -> Option<MatchEndReason> {
        self.end_reason
    }

    /// Final result, once the match is over
    pub fn result(&self) -> Option<MatchResult> {
        let reason = self.end_reason?;
        Some(MatchResult::decide(self.config.mode, &self.players, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeliveryCategory;
    use crate::game::config::MatchLength;
    use crate::game::result::MatchOutcome;

    fn status(all_out: bool, overs_complete: bool, target_reached: bool) -> TurnStatus {
        TurnStatus {
            all_out,
            overs_complete,
            target_reached,
        }
    }

    /// Request and commit one delivery
    fn bowl(session: &mut MatchSession, generator: &mut OutcomeGenerator) -> DeliveryReport {
        let outcome = session.request_delivery(generator).unwrap();
        session.commit_delivery(&outcome).unwrap()
    }

    #[test]
    fn test_transition_solo() {
        let phase = MatchPhase::AwaitingPlayer1;
        assert_eq!(
            phase.transition(MatchMode::Solo, status(false, false, false)),
            Transition::Continue
        );
        assert_eq!(
            phase.transition(MatchMode::Solo, status(true, false, false)),
            Transition::MatchOver(MatchEndReason::AllOut)
        );
        assert_eq!(
            phase.transition(MatchMode::Solo, status(false, true, false)),
            Transition::MatchOver(MatchEndReason::OversComplete)
        );
    }

    #[test]
    fn test_transition_dual() {
        let p1 = MatchPhase::AwaitingPlayer1;
        assert_eq!(
            p1.transition(MatchMode::Dual, status(false, false, false)),
            Transition::Continue
        );
        assert_eq!(
            p1.transition(MatchMode::Dual, status(true, false, false)),
            Transition::InningsBreak
        );
        // Player 1 never ends the match by score
        assert_eq!(
            p1.transition(MatchMode::Dual, status(false, false, true)),
            Transition::Continue
        );

        let p2 = MatchPhase::AwaitingPlayer2;
        assert_eq!(
            p2.transition(MatchMode::Dual, status(false, false, true)),
            Transition::MatchOver(MatchEndReason::TargetReached)
        );
        assert_eq!(
            p2.transition(MatchMode::Dual, status(false, true, true)),
            Transition::MatchOver(MatchEndReason::TargetReached)
        );
        assert_eq!(
            p2.transition(MatchMode::Dual, status(false, true, false)),
            Transition::MatchOver(MatchEndReason::OversComplete)
        );
        assert_eq!(
            p2.transition(MatchMode::Dual, status(false, false, false)),
            Transition::Continue
        );
    }

    #[test]
    fn test_transition_from_terminal() {
        assert_eq!(
            MatchPhase::MatchOver.transition(MatchMode::Dual, status(true, true, true)),
            Transition::Continue
        );
    }

    #[test]
    fn test_new_session() {
        let session = MatchSession::new(MatchConfig::dual("Alice", "Bob", 2, MatchLength::Quick)).unwrap();
        assert_eq!(session.phase(), MatchPhase::AwaitingPlayer1);
        assert_eq!(session.active_slot(), PlayerSlot::One);
        assert_eq!(session.players().len(), 2);
        assert!(!session.free_hit_active());
        assert!(session.target().is_none());

        let solo = MatchSession::new(MatchConfig::solo("Alice", 2, MatchLength::Quick)).unwrap();
        assert_eq!(solo.players().len(), 1);
        assert!(solo.player(PlayerSlot::Two).is_none());
    }

    #[test]
    fn test_new_session_rejects_bad_config() {
        let err = MatchSession::new(MatchConfig::solo("Alice", 0, MatchLength::Quick)).unwrap_err();
        assert!(matches!(err, CricketError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_one_delivery_in_flight() {
        let mut session = MatchSession::new(MatchConfig::solo("Alice", 2, MatchLength::Quick)).unwrap();
        let mut generator = OutcomeGenerator::scripted([4, 4]);

        let outcome = session.request_delivery(&mut generator).unwrap();
        let before = session.clone();
        let err = session.request_delivery(&mut generator).unwrap_err();
        assert!(matches!(err, CricketError::InvalidStateTransition(_)));
        assert_eq!(session, before);

        session.commit_delivery(&outcome).unwrap();
        assert_eq!(session.active_player().score, 4);
    }

    #[test]
    fn test_double_commit_rejected() {
        let mut session = MatchSession::new(MatchConfig::solo("Alice", 2, MatchLength::Quick)).unwrap();
        let mut generator = OutcomeGenerator::scripted([6]);

        let outcome = session.request_delivery(&mut generator).unwrap();
        session.commit_delivery(&outcome).unwrap();
        let before = session.clone();

        let err = session.commit_delivery(&outcome).unwrap_err();
        assert!(matches!(err, CricketError::InvalidStateTransition(_)));
        assert_eq!(session, before);
        assert_eq!(session.active_player().score, 6);
    }

    #[test]
    fn test_commit_must_match_pending() {
        let mut session = MatchSession::new(MatchConfig::solo("Alice", 2, MatchLength::Quick)).unwrap();
        let mut generator = OutcomeGenerator::scripted([1]);

        session.request_delivery(&mut generator).unwrap();
        let before = session.clone();
        let forged = DeliveryOutcome::from_page(6, false);
        assert!(session.commit_delivery(&forged).is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn test_requests_rejected_after_match_over() {
        let mut session = MatchSession::new(MatchConfig::solo("Alice", 1, MatchLength::Quick)).unwrap();
        let mut generator = OutcomeGenerator::scripted([0]);

        let report = bowl(&mut session, &mut generator);
        assert_eq!(report.transition, Transition::MatchOver(MatchEndReason::AllOut));
        assert!(session.is_over());

        let before = session.clone();
        assert!(session.request_delivery(&mut generator).is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn test_innings_break_resets_free_hit() {
        // Player 1: five dots, a no-ball, a wide, then the sixth legal ball
        let mut session = MatchSession::new(MatchConfig::dual("Alice", "Bob", 1, MatchLength::Quick)).unwrap();
        let mut generator = OutcomeGenerator::scripted([7, 7, 7, 7, 7, 9, 8, 7]);

        for _ in 0..5 {
            bowl(&mut session, &mut generator);
        }
        let report = bowl(&mut session, &mut generator);
        assert_eq!(report.outcome.category, DeliveryCategory::NoBall);
        assert!(session.free_hit_active());

        // Wide during a free hit keeps it
        let report = bowl(&mut session, &mut generator);
        assert_eq!(report.outcome.category, DeliveryCategory::Wide);
        assert!(report.free_hit_next);

        // Sixth legal ball closes the innings; free hit does not carry over
        let report = bowl(&mut session, &mut generator);
        assert_eq!(report.transition, Transition::InningsBreak);
        assert!(!report.free_hit_next);
        assert!(!session.free_hit_active());
        assert_eq!(session.phase(), MatchPhase::AwaitingPlayer2);
        assert_eq!(session.active_slot(), PlayerSlot::Two);
        assert_eq!(session.target(), Some(3));
        assert_eq!(session.runs_required(), Some(3));
    }

    #[test]
    fn test_final_over_tracks_active_batter() {
        let mut session = MatchSession::new(MatchConfig::dual("Alice", "Bob", 2, MatchLength::Quick)).unwrap();
        let mut generator = OutcomeGenerator::scripted([7; 12]);

        assert!(!session.is_final_over());
        for _ in 0..6 {
            bowl(&mut session, &mut generator);
        }
        assert!(session.is_final_over());
        for _ in 0..6 {
            bowl(&mut session, &mut generator);
        }
        // Player 2 starts fresh in the first over
        assert_eq!(session.active_slot(), PlayerSlot::Two);
        assert!(!session.is_final_over());
    }

    #[test]
    fn test_restart_keeps_config() {
        let config = MatchConfig::dual("Alice", "Bob", 1, MatchLength::Quick);
        let mut session = MatchSession::new(config.clone()).unwrap();
        let mut generator = OutcomeGenerator::scripted([6, 0, 0]);
        for _ in 0..3 {
            bowl(&mut session, &mut generator);
        }
        assert!(session.is_over());
        assert!(matches!(
            session.result().map(|r| r.outcome),
            Some(MatchOutcome::Won { .. })
        ));

        session.restart(None).unwrap();
        assert_eq!(session, MatchSession::new(config).unwrap());

        // A bad replacement config leaves the session alone
        let before = session.clone();
        assert!(session
            .restart(Some(MatchConfig::solo("", 2, MatchLength::Quick)))
            .is_err());
        assert_eq!(session, before);
    }
}
