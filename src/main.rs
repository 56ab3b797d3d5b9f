//! Book Cricket - Main Binary
//!
//! Plays book cricket matches in the terminal, runs batch simulations and
//! shows saved session history.

use anyhow::{bail, Context, Result};
use book_cricket::{
    game::{
        CrowdReaction, FeedbackListener, MatchConfig, MatchController, MatchLength, MatchMode,
        MatchResult, OutcomeGenerator, SessionHistory, VerbosityLevel, MAX_OVERS,
    },
    simulation::run_simulation,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;

/// Match mode
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// One player bats a single innings
    Solo,
    /// Two players; player 2 chases player 1's score
    Dual,
}

impl From<ModeArg> for MatchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Solo => MatchMode::Solo,
            ModeArg::Dual => MatchMode::Dual,
        }
    }
}

/// Match length class
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LengthArg {
    /// One wicket
    Quick,
    /// Ten wickets
    Long,
}

impl From<LengthArg> for MatchLength {
    fn from(arg: LengthArg) -> Self {
        match arg {
            LengthArg::Quick => MatchLength::Quick,
            LengthArg::Long => MatchLength::Long,
        }
    }
}

/// Verbosity level for match output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Options shared by `play` and `simulate`
#[derive(Debug, clap::Args)]
struct MatchArgs {
    /// Match mode
    #[arg(long, value_enum, default_value = "solo")]
    mode: ModeArg,

    /// Match length (quick = 1 wicket, long = 10 wickets)
    #[arg(long, value_enum, default_value = "quick")]
    length: LengthArg,

    /// Overs per innings (default: 2 for quick, 5 for long)
    #[arg(long)]
    overs: Option<u32>,

    /// Player 1 name
    #[arg(long, default_value = "Player 1")]
    p1_name: String,

    /// Player 2 name
    #[arg(long, default_value = "Player 2")]
    p2_name: String,
}

impl MatchArgs {
    fn to_config(&self) -> MatchConfig {
        let length: MatchLength = self.length.into();
        let overs = self.overs.unwrap_or_else(|| length.default_overs());
        if overs > MAX_OVERS {
            eprintln!("Warning: {overs} overs is more than the usual maximum of {MAX_OVERS}");
        }
        MatchConfig::new(
            self.mode.into(),
            overs,
            length.wickets(),
            self.p1_name.clone(),
            self.p2_name.clone(),
        )
    }
}

#[derive(Parser)]
#[command(name = "cricket")]
#[command(about = "Book Cricket - flip a page, score the last digit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match in the terminal
    Play {
        #[command(flatten)]
        match_args: MatchArgs,

        /// Set random seed for deterministic play
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Wait for Enter before each delivery
        #[arg(long, short = 'i')]
        interactive: bool,

        /// JSON history file to append the final scores to
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },

    /// Run many matches in parallel and print aggregate statistics
    Simulate {
        #[command(flatten)]
        match_args: MatchArgs,

        /// Number of matches to run
        #[arg(long, short = 'm', default_value_t = 1000)]
        matches: usize,

        /// Batch seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Show a saved history file
    History {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            match_args,
            seed,
            verbosity,
            interactive,
            history,
        } => run_play(match_args.to_config(), seed, verbosity.into(), interactive, history),
        Commands::Simulate {
            match_args,
            matches,
            seed,
        } => run_simulate(match_args.to_config(), matches, seed),
        Commands::History { file } => run_history(file),
    }
}

/// Prints crowd noise at verbose level
struct ConsoleListener {
    verbosity: VerbosityLevel,
}

impl FeedbackListener for ConsoleListener {
    fn on_crowd_reaction(&mut self, reaction: CrowdReaction) {
        if self.verbosity >= VerbosityLevel::Verbose {
            let noise = match reaction {
                CrowdReaction::SlowClap => "clap... clap...",
                CrowdReaction::Ooh => "Ooooh!",
                CrowdReaction::Cheer => "*roar*",
            };
            println!("    (crowd: {noise})");
        }
    }
}

fn run_play(
    config: MatchConfig,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    interactive: bool,
    history_path: Option<PathBuf>,
) -> Result<()> {
    let generator = match seed {
        Some(seed) => OutcomeGenerator::with_seed(seed),
        None => OutcomeGenerator::new(),
    };

    let history = match &history_path {
        Some(path) => SessionHistory::load_or_default(path)
            .with_context(|| format!("reading history file {}", path.display()))?,
        None => SessionHistory::new(),
    };

    let mut controller = MatchController::new(generator)
        .with_verbosity(verbosity)
        .with_listener(Box::new(ConsoleListener { verbosity }))
        .with_history(history);

    controller
        .start_match(config)
        .context("invalid match configuration")?;

    let result = if interactive {
        play_interactive(&mut controller)?
    } else {
        controller.play_out()?
    };

    if verbosity > VerbosityLevel::Silent {
        print_scoreboard(&result);
    }

    if let Some(path) = history_path {
        controller
            .session_history()
            .save_to_file(&path)
            .with_context(|| format!("writing history file {}", path.display()))?;
    }

    Ok(())
}

fn play_interactive(controller: &mut MatchController) -> Result<MatchResult> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(session) = controller.session() else {
            bail!("no match in progress");
        };
        if let Some(result) = session.result() {
            return Ok(result);
        }

        let batter = session.active_player();
        let mut prompt = format!(
            "{} {}/{} ({} ov)",
            batter.name,
            batter.score,
            batter.wickets_lost,
            batter.overs_display()
        );
        if let Some(need) = session.runs_required() {
            prompt.push_str(&format!(" | need {need}"));
        }
        if session.free_hit_active() {
            prompt.push_str(" | FREE HIT");
        }
        println!("{prompt} - press Enter to flip the page");

        match lines.next() {
            Some(line) => {
                line.context("reading from stdin")?;
            }
            None => bail!("input closed before the match finished"),
        }

        let outcome = controller.request_delivery()?;
        controller.commit_delivery(&outcome)?;
    }
}

fn print_scoreboard(result: &MatchResult) {
    println!("\n=== {} ===", result.headline());
    println!("{}", result.summary());
    for player in &result.players {
        println!(
            "  {}: {}/{} in {} overs",
            player.name,
            player.score,
            player.wickets_lost,
            player.overs_display()
        );
    }
}

fn run_simulate(config: MatchConfig, matches: usize, seed: u64) -> Result<()> {
    println!("=== Book Cricket - Simulation ===\n");
    println!(
        "Running {matches} {:?} matches: {} over(s), {} wicket(s), seed {seed}\n",
        config.mode, config.overs, config.total_wickets
    );

    let report = run_simulation(&config, matches, seed).context("simulation failed")?;
    let stats = &report.stats;

    println!("Total matches played: {}", stats.matches);
    println!("Elapsed time: {:.2}s", report.elapsed.as_secs_f64());
    println!("Matches per second: {:.2}\n", report.matches_per_second());

    if stats.failures > 0 {
        println!("Failed matches: {}", stats.failures);
    }

    match config.mode {
        MatchMode::Solo => {
            println!("Average score: {:.2}", stats.p1_average());
        }
        MatchMode::Dual => {
            let total = stats.matches.max(1) as f64;
            println!("=== Results ===");
            println!(
                "P1 wins: {} ({:.1}%)",
                stats.p1_wins,
                100.0 * stats.p1_wins as f64 / total
            );
            println!(
                "P2 wins: {} ({:.1}%)",
                stats.p2_wins,
                100.0 * stats.p2_wins as f64 / total
            );
            println!("Ties: {} ({:.1}%)", stats.ties, 100.0 * stats.ties as f64 / total);
            println!("Average P1 score: {:.2}", stats.p1_average());
            println!("Average P2 score: {:.2}", stats.p2_average());
        }
    }
    println!("Best score: {}", stats.best_score);

    Ok(())
}

fn run_history(path: PathBuf) -> Result<()> {
    if !path.exists() {
        bail!("history file {} does not exist", path.display());
    }
    let history = SessionHistory::load_from_file(&path)
        .with_context(|| format!("reading history file {}", path.display()))?;

    if history.is_empty() {
        println!("No matches recorded yet.");
        return Ok(());
    }

    println!("=== Session History ({} entries) ===", history.len());
    for entry in history.entries() {
        println!(
            "  {}  {:<20} {:>4}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.player_name,
            entry.final_score
        );
    }
    println!("\nBest score: {}", history.best_score());

    Ok(())
}
