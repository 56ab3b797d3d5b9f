//! Finished match results

use crate::core::{PlayerSlot, PlayerStats};
use crate::game::config::MatchMode;
use serde::{Deserialize, Serialize};

/// Reason the match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEndReason {
    /// The last batter lost every wicket
    AllOut,
    /// The last batter used up every legal ball
    OversComplete,
    /// Player 2 passed player 1's score
    TargetReached,
}

/// How a two-player match was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinMargin {
    /// Player 1 defended their total by this many runs
    Runs(u32),
    /// Player 2 chased the target down
    Chase,
}

/// Who won, if anyone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Single-player innings: there is only a score
    Solo { score: u32 },
    Won { winner: PlayerSlot, margin: WinMargin },
    Tie,
}

/// Result of a completed match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub end_reason: MatchEndReason,
    /// Final stats for every player who batted, in batting order
    pub players: Vec<PlayerStats>,
}

impl MatchResult {
    /// Decide the result from final stats
    pub fn decide(mode: MatchMode, players: &[PlayerStats], end_reason: MatchEndReason) -> Self {
        let outcome = match (mode, players) {
            (MatchMode::Dual, [p1, p2, ..]) => {
                if p1.score > p2.score {
                    MatchOutcome::Won {
                        winner: PlayerSlot::One,
                        margin: WinMargin::Runs(p1.score - p2.score),
                    }
                } else if p2.score > p1.score {
                    MatchOutcome::Won {
                        winner: PlayerSlot::Two,
                        margin: WinMargin::Chase,
                    }
                } else {
                    MatchOutcome::Tie
                }
            }
            (_, players) => MatchOutcome::Solo {
                score: players.first().map(|p| p.score).unwrap_or(0),
            },
        };

        MatchResult {
            outcome,
            end_reason,
            players: players.to_vec(),
        }
    }

    /// Winning player's stats (None for solo matches and ties)
    pub fn winner(&self) -> Option<&PlayerStats> {
        match self.outcome {
            MatchOutcome::Won { winner, .. } => self.players.get(winner.index()),
            MatchOutcome::Solo { .. } | MatchOutcome::Tie => None,
        }
    }

    /// Main result banner
    pub fn headline(&self) -> String {
        match &self.outcome {
            MatchOutcome::Solo { .. } => "INNINGS OVER".to_string(),
            MatchOutcome::Won { .. } => match self.winner() {
                Some(p) => format!("{} WINS!", p.name),
                None => "MATCH OVER".to_string(),
            },
            MatchOutcome::Tie => "IT'S A TIE!".to_string(),
        }
    }

    /// Line under the banner
    pub fn summary(&self) -> String {
        match &self.outcome {
            MatchOutcome::Solo { score } => format!("You scored {score} runs!"),
            MatchOutcome::Won {
                margin: WinMargin::Runs(runs),
                ..
            } => format!("Won by {runs} runs"),
            MatchOutcome::Won {
                margin: WinMargin::Chase,
                ..
            } => "Successful chase!".to_string(),
            MatchOutcome::Tie => "What a match!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(name: &str, score: u32) -> PlayerStats {
        let mut p = PlayerStats::new(name);
        p.score = score;
        p
    }

    #[test]
    fn test_solo_result() {
        let result = MatchResult::decide(
            MatchMode::Solo,
            &[stats("Alice", 14)],
            MatchEndReason::AllOut,
        );
        assert_eq!(result.outcome, MatchOutcome::Solo { score: 14 });
        assert!(result.winner().is_none());
        assert_eq!(result.headline(), "INNINGS OVER");
        assert_eq!(result.summary(), "You scored 14 runs!");
    }

    #[test]
    fn test_player1_defends() {
        let result = MatchResult::decide(
            MatchMode::Dual,
            &[stats("Alice", 20), stats("Bob", 12)],
            MatchEndReason::OversComplete,
        );
        assert_eq!(
            result.outcome,
            MatchOutcome::Won {
                winner: PlayerSlot::One,
                margin: WinMargin::Runs(8)
            }
        );
        assert_eq!(result.headline(), "Alice WINS!");
        assert_eq!(result.summary(), "Won by 8 runs");
    }

    #[test]
    fn test_player2_chases() {
        let result = MatchResult::decide(
            MatchMode::Dual,
            &[stats("Alice", 10), stats("Bob", 11)],
            MatchEndReason::TargetReached,
        );
        assert_eq!(result.winner().map(|p| p.name.as_str()), Some("Bob"));
        assert_eq!(result.summary(), "Successful chase!");
    }

    #[test]
    fn test_tie() {
        let result = MatchResult::decide(
            MatchMode::Dual,
            &[stats("Alice", 9), stats("Bob", 9)],
            MatchEndReason::AllOut,
        );
        assert_eq!(result.outcome, MatchOutcome::Tie);
        assert_eq!(result.headline(), "IT'S A TIE!");
    }
}
