//! Batch simulation of many independent matches
//!
//! Matches run in parallel with rayon. Each match gets its own controller and
//! RNG seeded from the batch seed and the match index, so a batch is
//! reproducible regardless of thread scheduling.

use crate::core::PlayerSlot;
use crate::game::{
    MatchConfig, MatchController, MatchOutcome, MatchResult, OutcomeGenerator, VerbosityLevel,
};
use crate::{CricketError, Result};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Aggregate statistics for a simulation batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub matches: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub ties: usize,
    /// Sum of player 1's scores (solo: the only score)
    pub p1_runs: u64,
    /// Sum of player 2's scores (dual only)
    pub p2_runs: u64,
    pub best_score: u32,
    pub failures: usize,
}

impl SimulationStats {
    fn record(&mut self, outcome: &MatchOutcome, scores: &[u32]) {
        self.matches += 1;
        match outcome {
            MatchOutcome::Won {
                winner: PlayerSlot::One,
                ..
            } => self.p1_wins += 1,
            MatchOutcome::Won { .. } => self.p2_wins += 1,
            MatchOutcome::Tie => self.ties += 1,
            MatchOutcome::Solo { .. } => {}
        }
        if let Some(&s) = scores.first() {
            self.p1_runs += u64::from(s);
        }
        if let Some(&s) = scores.get(1) {
            self.p2_runs += u64::from(s);
        }
        self.best_score = scores.iter().copied().fold(self.best_score, u32::max);
    }

    pub fn p1_average(&self) -> f64 {
        average(self.p1_runs, self.matches)
    }

    pub fn p2_average(&self) -> f64 {
        average(self.p2_runs, self.matches)
    }
}

fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Result of [`run_simulation`]
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub stats: SimulationStats,
    pub elapsed: Duration,
}

impl SimulationReport {
    pub fn matches_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.stats.matches as f64 / secs
        } else {
            0.0
        }
    }
}

/// Seed for one match of a batch
pub fn match_seed(batch_seed: u64, match_idx: usize) -> u64 {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(
        batch_seed.wrapping_add((match_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
    );
    rng.gen()
}

/// Play `matches` independent matches with the same configuration
pub fn run_simulation(config: &MatchConfig, matches: usize, seed: u64) -> Result<SimulationReport> {
    config.validate()?;
    if matches == 0 {
        return Err(CricketError::InvalidConfiguration(
            "simulation needs at least one match".to_string(),
        ));
    }

    let stats = Mutex::new(SimulationStats::default());
    let start = Instant::now();

    (0..matches).into_par_iter().for_each(|match_idx| {
        let played = play_one(config, match_seed(seed, match_idx));

        let mut stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
        match played {
            Ok(result) => {
                let scores: Vec<u32> = result.players.iter().map(|p| p.score).collect();
                stats.record(&result.outcome, &scores);
            }
            Err(e) => {
                eprintln!("Warning: match {match_idx} failed: {e}");
                stats.failures += 1;
            }
        }
    });

    let elapsed = start.elapsed();
    let stats = stats.into_inner().unwrap_or_else(PoisonError::into_inner);

    Ok(SimulationReport { stats, elapsed })
}

fn play_one(config: &MatchConfig, seed: u64) -> Result<MatchResult> {
    let mut controller = MatchController::new(OutcomeGenerator::with_seed(seed))
        .with_verbosity(VerbosityLevel::Silent);
    controller.start_match(config.clone())?;
    controller.play_out()
}
