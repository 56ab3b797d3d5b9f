//! Match configuration, sequencing and the controller API

pub mod config;
pub mod controller;
pub mod feedback;
pub mod generator;
pub mod history;
pub mod logger;
pub mod result;
pub mod source;
pub mod state;

pub use config::{MatchConfig, MatchLength, MatchMode, MAX_OVERS};
pub use controller::MatchController;
pub use feedback::{CrowdReaction, FeedbackListener, SilentListener};
pub use generator::OutcomeGenerator;
pub use history::{HistoryEntry, SessionHistory};
pub use logger::{LogCategory, LogEntry, MatchLogger, OutputMode, VerbosityLevel};
pub use result::{MatchEndReason, MatchOutcome, MatchResult, WinMargin};
pub use source::{DeliverySource, RandomSource, ScriptedSource};
pub use state::{DeliveryReport, MatchPhase, MatchSession, Transition, TurnStatus};
