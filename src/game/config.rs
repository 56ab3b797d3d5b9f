//! Match configuration

use crate::core::BALLS_PER_OVER;
use crate::{CricketError, Result};
use serde::{Deserialize, Serialize};

/// Upper end of the overs range offered to players. Not enforced.
pub const MAX_OVERS: u32 = 20;

/// One batter, or two batters where the second chases the first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    Solo,
    Dual,
}

impl MatchMode {
    /// Number of innings in a match of this mode
    pub fn player_count(self) -> usize {
        match self {
            MatchMode::Solo => 1,
            MatchMode::Dual => 2,
        }
    }
}

/// Match length class, which fixes the wicket limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchLength {
    /// One wicket per innings
    #[default]
    Quick,
    /// Ten wickets per innings
    Long,
}

impl MatchLength {
    pub fn wickets(self) -> u32 {
        match self {
            MatchLength::Quick => 1,
            MatchLength::Long => 10,
        }
    }

    /// Overs selected when a length is first chosen
    pub fn default_overs(self) -> u32 {
        match self {
            MatchLength::Quick => 2,
            MatchLength::Long => 5,
        }
    }

    /// Overs choices offered for this length
    pub fn suggested_overs(self) -> Vec<u32> {
        match self {
            MatchLength::Quick => (1..=10).collect(),
            MatchLength::Long => vec![5, 10, 15, MAX_OVERS],
        }
    }
}

/// Settings fixed for the duration of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: MatchMode,
    pub overs: u32,
    pub total_wickets: u32,
    pub player1_name: String,
    /// Ignored in solo mode
    pub player2_name: String,
}

impl MatchConfig {
    pub fn new(
        mode: MatchMode,
        overs: u32,
        total_wickets: u32,
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
    ) -> Self {
        MatchConfig {
            mode,
            overs,
            total_wickets,
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
        }
    }

    /// Single-player match
    pub fn solo(name: impl Into<String>, overs: u32, length: MatchLength) -> Self {
        Self::new(MatchMode::Solo, overs, length.wickets(), name, "Player 2")
    }

    /// Two-player match; player 2 chases player 1's score
    pub fn dual(
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        overs: u32,
        length: MatchLength,
    ) -> Self {
        Self::new(MatchMode::Dual, overs, length.wickets(), player1_name, player2_name)
    }

    /// Legal balls available to each innings
    pub fn total_balls(&self) -> u32 {
        self.overs.saturating_mul(BALLS_PER_OVER)
    }

    /// Names of the players taking part, in batting order
    pub fn player_names(&self) -> Vec<&str> {
        match self.mode {
            MatchMode::Solo => vec![self.player1_name.as_str()],
            MatchMode::Dual => vec![self.player1_name.as_str(), self.player2_name.as_str()],
        }
    }

    /// Check the configuration can start a match
    pub fn validate(&self) -> Result<()> {
        if self.overs < 1 {
            return Err(CricketError::InvalidConfiguration(format!(
                "overs must be at least 1 (got {})",
                self.overs
            )));
        }
        if self.overs.checked_mul(BALLS_PER_OVER).is_none() {
            return Err(CricketError::InvalidConfiguration(format!(
                "{} overs is more balls than an innings can count",
                self.overs
            )));
        }
        if self.total_wickets < 1 {
            return Err(CricketError::InvalidConfiguration(
                "wickets per innings must be at least 1".to_string(),
            ));
        }
        for (idx, name) in self.player_names().iter().enumerate() {
            if name.trim().is_empty() {
                return Err(CricketError::InvalidConfiguration(format!(
                    "player {} name must not be empty",
                    idx + 1
                )));
            }
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig::solo("Player 1", MatchLength::Quick.default_overs(), MatchLength::Quick)
    }
}
