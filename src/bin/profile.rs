//! Profiling binary for match execution
//!
//! Runs matches in a tight single-threaded loop for profiling with
//! cargo-flamegraph. Unlike the Criterion benchmarks, this has minimal
//! overhead and produces cleaner flamegraphs.
//!
//! Usage:
//!   cargo flamegraph --bin profile

use book_cricket::game::{
    MatchConfig, MatchController, MatchLength, OutcomeGenerator, VerbosityLevel,
};

fn main() -> book_cricket::Result<()> {
    // Allow overriding iterations via environment variable
    let iterations: u64 = std::env::var("PROFILE_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);

    let config = MatchConfig::dual("Player 1", "Player 2", 20, MatchLength::Long);

    println!("Profiling match execution...");
    println!("Running {iterations} twenty-over matches with seed 42");
    println!();

    let mut controller = MatchController::new(OutcomeGenerator::with_seed(42))
        .with_verbosity(VerbosityLevel::Silent);
    let mut total_runs = 0u64;

    for i in 0..iterations {
        controller.start_match(config.clone())?;
        let result = controller.play_out()?;
        total_runs += result.players.iter().map(|p| u64::from(p.score)).sum::<u64>();

        if (i + 1) % 10_000 == 0 {
            println!("Completed {} matches", i + 1);
        }
    }

    println!();
    println!("Profiling complete! {iterations} matches executed.");
    println!("Total runs scored: {total_runs}");
    println!(
        "History entries recorded: {}",
        controller.session_history().len()
    );

    Ok(())
}
