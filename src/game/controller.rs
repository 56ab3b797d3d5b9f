//! Match controller
//!
//! Owns the outcome generator, the current match session and the session
//! history, and is the entry point a presentation layer drives:
//! `start_match`, then `request_delivery` / `commit_delivery` pairs (with any
//! pacing delay in between), until the match is over.

/// Per-delivery logging, compiled out when the verbose-logging feature is
/// disabled
macro_rules! log_if_verbose {
    ($($body:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $($body)*
        }
    };
}

use crate::core::{DeliveryOutcome, PlayerSlot};
use crate::game::config::{MatchConfig, MatchMode};
use crate::game::feedback::{CrowdReaction, FeedbackListener, SilentListener};
use crate::game::generator::OutcomeGenerator;
use crate::game::history::SessionHistory;
use crate::game::logger::{MatchLogger, VerbosityLevel};
use crate::game::result::MatchResult;
use crate::game::state::{DeliveryReport, MatchSession, Transition};
use crate::{CricketError, Result};
use chrono::Utc;

fn no_match() -> CricketError {
    CricketError::InvalidStateTransition("no match has been started".to_string())
}

/// Drives matches and keeps the session history
pub struct MatchController {
    generator: OutcomeGenerator,
    session: Option<MatchSession>,
    history: SessionHistory,
    logger: MatchLogger,
    listener: Box<dyn FeedbackListener>,
}

impl MatchController {
    pub fn new(generator: OutcomeGenerator) -> Self {
        MatchController {
            generator,
            session: None,
            history: SessionHistory::new(),
            logger: MatchLogger::new(),
            listener: Box::new(SilentListener),
        }
    }

    /// Controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        Self::new(OutcomeGenerator::with_seed(seed))
    }

    pub fn with_listener(mut self, listener: Box<dyn FeedbackListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    /// Continue with a history carried over from an earlier run
    pub fn with_history(mut self, history: SessionHistory) -> Self {
        self.history = history;
        self
    }

    pub fn logger(&self) -> &MatchLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut MatchLogger {
        &mut self.logger
    }

    pub fn session(&self) -> Option<&MatchSession> {
        self.session.as_ref()
    }

    /// Finished match results, oldest first
    pub fn session_history(&self) -> &SessionHistory {
        &self.history
    }

    /// Result of the current match, once it is over
    pub fn result(&self) -> Option<MatchResult> {
        self.session.as_ref().and_then(MatchSession::result)
    }

    /// Start a new match, replacing any previous one
    ///
    /// An invalid configuration is rejected and the previous session (if
    /// any) is kept.
    pub fn start_match(&mut self, config: MatchConfig) -> Result<&MatchSession> {
        let session = MatchSession::new(config)?;
        self.logger.match_start(session.config());
        Ok(self.session.insert(session))
    }

    /// Resolve the next delivery without applying it
    pub fn request_delivery(&mut self) -> Result<DeliveryOutcome> {
        let session = self.session.as_mut().ok_or_else(no_match)?;

        let outcome = match session.request_delivery(&mut self.generator) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.logger.rejected("delivery request", &e);
                return Err(e);
            }
        };

        self.listener.on_click();
        self.listener
            .on_delivery_resolved(session.active_slot(), &outcome);
        self.listener
            .on_crowd_reaction(CrowdReaction::for_outcome(&outcome));
        Ok(outcome)
    }

    /// Apply the pending delivery and return the updated session
    pub fn commit_delivery(&mut self, outcome: &DeliveryOutcome) -> Result<&MatchSession> {
        self.commit(outcome)?;
        self.session.as_ref().ok_or_else(no_match)
    }

    /// Request and immediately commit one delivery
    pub fn submit_delivery(&mut self) -> Result<DeliveryReport> {
        let outcome = self.request_delivery()?;
        self.commit(&outcome)
    }

    /// Bowl deliveries until the match is over
    pub fn play_out(&mut self) -> Result<MatchResult> {
        loop {
            let session = self.session.as_ref().ok_or_else(no_match)?;
            if let Some(result) = session.result() {
                return Ok(result);
            }
            self.submit_delivery()?;
        }
    }

    /// Start the current match again from the first ball
    ///
    /// Keeps the configuration and names unless a new configuration is given.
    /// The session history is not touched.
    pub fn restart(&mut self, config: Option<MatchConfig>) -> Result<&MatchSession> {
        if self.session.is_none() {
            let config = config.ok_or_else(no_match)?;
            return self.start_match(config);
        }

        let session = self.session.as_mut().ok_or_else(no_match)?;
        session.restart(config)?;
        self.logger.note("Match restarted");
        self.logger.match_start(session.config());
        Ok(session)
    }

    fn commit(&mut self, outcome: &DeliveryOutcome) -> Result<DeliveryReport> {
        let session = self.session.as_mut().ok_or_else(no_match)?;

        let report = match session.commit_delivery(outcome) {
            Ok(report) => report,
            Err(e) => {
                self.logger.rejected("commit", &e);
                return Err(e);
            }
        };

        log_if_verbose! {
            if let Some(batter) = session.player(report.batter) {
                self.logger.delivery(batter, outcome, report.free_hit_next);
            }
        }

        match report.transition {
            Transition::Continue => {}
            Transition::InningsBreak => {
                let target = session.target().unwrap_or(0);
                let chaser = session
                    .player(PlayerSlot::Two)
                    .map(|p| p.name.as_str())
                    .unwrap_or("Player 2");
                self.logger.innings_break(chaser, target);
                self.listener.on_innings_change(target);
            }
            Transition::MatchOver(reason) => {
                let added = self.history.record_match(session, Utc::now())?;
                self.logger
                    .note(format!("Recorded {added} history entries ({reason:?})"));

                if let Some(result) = session.result() {
                    self.logger.result(&result);
                    if session.config().mode == MatchMode::Dual {
                        self.listener.on_crowd_reaction(CrowdReaction::Cheer);
                    }
                    self.listener.on_match_over(&result);
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeliveryCategory;
    use crate::game::config::MatchLength;
    use crate::game::logger::LogCategory;
    use crate::game::result::MatchOutcome;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Events {
        clicks: usize,
        resolved: Vec<DeliveryCategory>,
        reactions: Vec<CrowdReaction>,
        targets: Vec<u32>,
        results: Vec<MatchResult>,
    }

    struct RecordingListener(Arc<Mutex<Events>>);

    impl FeedbackListener for RecordingListener {
        fn on_click(&mut self) {
            self.0.lock().unwrap().clicks += 1;
        }

        fn on_delivery_resolved(&mut self, _batter: PlayerSlot, outcome: &DeliveryOutcome) {
            self.0.lock().unwrap().resolved.push(outcome.category);
        }

        fn on_crowd_reaction(&mut self, reaction: CrowdReaction) {
            self.0.lock().unwrap().reactions.push(reaction);
        }

        fn on_innings_change(&mut self, target: u32) {
            self.0.lock().unwrap().targets.push(target);
        }

        fn on_match_over(&mut self, result: &MatchResult) {
            self.0.lock().unwrap().results.push(result.clone());
        }
    }

    fn quiet(controller: MatchController) -> MatchController {
        let mut controller = controller;
        controller.logger_mut().enable_capture();
        controller
    }

    #[test]
    fn test_no_match_started() {
        let mut controller = quiet(MatchController::with_seed(1));
        assert!(matches!(
            controller.request_delivery(),
            Err(CricketError::InvalidStateTransition(_))
        ));
        assert!(controller.play_out().is_err());
        assert!(controller.restart(None).is_err());
    }

    #[test]
    fn test_listener_events() {
        let events = Arc::new(Mutex::new(Events::default()));
        let mut controller = quiet(
            MatchController::new(OutcomeGenerator::scripted([4, 0, 1, 0]))
                .with_listener(Box::new(RecordingListener(events.clone()))),
        );

        controller
            .start_match(MatchConfig::dual("Alice", "Bob", 1, MatchLength::Quick))
            .unwrap();
        let result = controller.play_out().unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.clicks, 4);
        assert_eq!(
            events.resolved,
            vec![
                DeliveryCategory::Runs,
                DeliveryCategory::Out,
                DeliveryCategory::Runs,
                DeliveryCategory::Out
            ]
        );
        assert_eq!(events.targets, vec![5]);
        // Four delivery reactions plus the end-of-match cheer
        assert_eq!(
            events.reactions,
            vec![
                CrowdReaction::Cheer,
                CrowdReaction::Ooh,
                CrowdReaction::SlowClap,
                CrowdReaction::Ooh,
                CrowdReaction::Cheer
            ]
        );
        assert_eq!(events.results, vec![result]);
    }

    #[test]
    fn test_history_appended_once() {
        let mut controller = quiet(MatchController::new(OutcomeGenerator::scripted([6, 0])));
        controller
            .start_match(MatchConfig::solo("Alice", 1, MatchLength::Quick))
            .unwrap();
        controller.play_out().unwrap();
        assert_eq!(controller.session_history().len(), 1);

        // Further requests fail and do not record again
        assert!(controller.request_delivery().is_err());
        assert!(controller.play_out().is_ok());
        assert_eq!(controller.session_history().len(), 1);
        assert_eq!(controller.session_history().entries()[0].final_score, 6);
    }

    #[test]
    fn test_solo_result() {
        let mut controller = quiet(MatchController::new(OutcomeGenerator::scripted([2, 3, 0])));
        controller
            .start_match(MatchConfig::solo("Alice", 1, MatchLength::Quick))
            .unwrap();
        let result = controller.play_out().unwrap();
        assert_eq!(result.outcome, MatchOutcome::Solo { score: 5 });
    }

    #[test]
    fn test_start_match_rejects_bad_config() {
        let mut controller = quiet(MatchController::with_seed(3));
        controller
            .start_match(MatchConfig::solo("Alice", 2, MatchLength::Quick))
            .unwrap();
        assert!(controller
            .start_match(MatchConfig::solo("Alice", 0, MatchLength::Quick))
            .is_err());
        // The earlier session is still there
        assert_eq!(controller.session().map(|s| s.config().overs), Some(2));
    }

    #[test]
    fn test_delivery_lines_logged() {
        let mut controller = quiet(MatchController::new(OutcomeGenerator::scripted([4, 0])));
        controller
            .start_match(MatchConfig::solo("Alice", 1, MatchLength::Quick))
            .unwrap();
        controller.play_out().unwrap();

        let logger = controller.logger();
        let results = logger.entries_of(LogCategory::Result);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message, "INNINGS OVER You scored 4 runs!");
        assert_eq!(logger.entries_of(LogCategory::MatchStart).len(), 1);
        #[cfg(feature = "verbose-logging")]
        assert_eq!(logger.entries_of(LogCategory::Delivery).len(), 2);
    }

    #[test]
    fn test_rejections_logged() {
        let mut controller = quiet(MatchController::new(OutcomeGenerator::scripted([0])));
        controller
            .start_match(MatchConfig::solo("Alice", 1, MatchLength::Quick))
            .unwrap();
        controller.play_out().unwrap();
        assert!(controller.request_delivery().is_err());

        let rejected = controller.logger().entries_of(LogCategory::Rejected);
        assert_eq!(rejected.len(), 1);
        assert!(rejected[0].message.starts_with("Rejected delivery request"));
    }
}
