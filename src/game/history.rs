//! Session history of finished matches
//!
//! The history is append-only: each finished match adds one entry per
//! player who batted, in batting order. It lives for the whole application
//! session and outlasts individual matches.

use crate::game::state::MatchSession;
use crate::{CricketError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One player's final score from one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub player_name: String,
    pub final_score: u32,
    pub timestamp: DateTime<Utc>,
}

/// Ordered record of finished matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        SessionHistory::default()
    }

    /// Append the final scores of a finished match
    ///
    /// Returns the number of entries added. A session that is not over is
    /// rejected without touching the history.
    pub fn record_match(&mut self, session: &MatchSession, at: DateTime<Utc>) -> Result<usize> {
        if !session.is_over() {
            return Err(CricketError::InvalidStateTransition(
                "cannot record a match that is still in progress".to_string(),
            ));
        }

        let added = session.players().len();
        self.entries
            .extend(session.players().iter().map(|p| HistoryEntry {
                player_name: p.name.clone(),
                final_score: p.score,
                timestamp: at,
            }));
        Ok(added)
    }

    /// Entries in the order they were recorded
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score recorded this session (0 if empty)
    pub fn best_score(&self) -> u32 {
        self.entries.iter().map(|e| e.final_score).max().unwrap_or(0)
    }

    /// Save the history to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CricketError::SerializationError(e.to_string()))?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a history saved with [`SessionHistory::save_to_file`]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&json).map_err(|e| CricketError::SerializationError(e.to_string()))
    }

    /// Load a history file, or start empty if it does not exist yet
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::new())
        }
    }
}
