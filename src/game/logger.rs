//! Match event logger
//!
//! Prints match events to stdout filtered by verbosity, and can capture them
//! to an in-memory buffer instead (used by tests and by quiet batch runs that
//! want to print only the tail of a match). Each event kind has its own entry
//! point and fixed level, so callers never pick levels by hand.

use crate::core::{DeliveryOutcome, PlayerStats};
use crate::game::config::MatchConfig;
use crate::game::result::MatchResult;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt;

/// Verbosity level for match output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during the match
    Silent = 0,
    /// Minimal - match start, innings break and result
    Minimal = 1,
    /// Normal - every delivery (default)
    #[default]
    Normal = 2,
    /// Verbose - also rejected calls and bookkeeping
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Capture only, nothing printed
    Memory,
    Both,
}

/// Kind of match event a log line describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogCategory {
    MatchStart,
    Delivery,
    InningsBreak,
    Result,
    /// A call rejected by the session
    Rejected,
    /// Anything else (restarts, history bookkeeping)
    Note,
}

impl LogCategory {
    /// Level at which events of this kind are shown
    pub fn level(self) -> VerbosityLevel {
        match self {
            LogCategory::MatchStart | LogCategory::InningsBreak | LogCategory::Result => {
                VerbosityLevel::Minimal
            }
            LogCategory::Delivery => VerbosityLevel::Normal,
            LogCategory::Rejected | LogCategory::Note => VerbosityLevel::Verbose,
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogCategory::MatchStart => "start",
            LogCategory::Delivery => "delivery",
            LogCategory::InningsBreak => "innings",
            LogCategory::Result => "result",
            LogCategory::Rejected => "rejected",
            LogCategory::Note => "note",
        };
        f.write_str(s)
    }
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub category: LogCategory,
    pub message: String,
}

impl LogEntry {
    pub fn level(&self) -> VerbosityLevel {
        self.category.level()
    }
}

/// Captured entries, borrowed from the logger
pub type LogGuard<'a> = Ref<'a, [LogEntry]>;

/// Logger for match events
pub struct MatchLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    captured: RefCell<Vec<LogEntry>>,
}

impl MatchLogger {
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        MatchLogger {
            verbosity,
            output_mode: OutputMode::default(),
            captured: RefCell::new(Vec::new()),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Captured entries of every level, oldest first
    pub fn logs(&self) -> LogGuard<'_> {
        Ref::map(self.captured.borrow(), Vec::as_slice)
    }

    /// Captured entries of one kind
    pub fn entries_of(&self, category: LogCategory) -> Vec<LogEntry> {
        self.captured
            .borrow()
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }

    pub fn clear_logs(&mut self) {
        self.captured.get_mut().clear();
    }

    /// Print the last `tail_lines` captured entries allowed by the current
    /// verbosity, then clear the buffer
    pub fn flush_tail(&mut self, tail_lines: usize) {
        let entries = std::mem::take(self.captured.get_mut());
        let shown: Vec<&LogEntry> = entries
            .iter()
            .filter(|e| e.level() <= self.verbosity)
            .collect();
        let skipped = shown.len().saturating_sub(tail_lines);
        if skipped > 0 {
            println!("... {skipped} earlier lines not shown ...");
        }
        for entry in &shown[skipped..] {
            print_entry(entry);
        }
    }

    /// Print every captured entry allowed by the current verbosity, then
    /// clear the buffer
    pub fn flush_buffer(&mut self) {
        self.flush_tail(usize::MAX);
    }

    fn record(&self, category: LogCategory, message: String) {
        let entry = LogEntry { category, message };
        let printing = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);

        if printing && entry.level() <= self.verbosity {
            print_entry(&entry);
        }
        // Capture keeps every level; verbosity applies when flushing
        if self.is_capturing() {
            self.captured.borrow_mut().push(entry);
        }
    }

    /// Banner for a new (or restarted) match
    pub fn match_start(&self, config: &MatchConfig) {
        self.record(
            LogCategory::MatchStart,
            format!(
                "=== {} | {} over(s), {} wicket(s) ===",
                config.player_names().join(" vs "),
                config.overs,
                config.total_wickets
            ),
        );
    }

    /// One committed delivery, with the batter's stats after it
    pub fn delivery(&self, batter: &PlayerStats, outcome: &DeliveryOutcome, free_hit_next: bool) {
        self.record(
            LogCategory::Delivery,
            format!(
                "{}: page {} -> {} | {}/{} ({} ov){}",
                batter.name,
                outcome.page_number,
                outcome.message(),
                batter.score,
                batter.wickets_lost,
                batter.overs_display(),
                if free_hit_next { " | FREE HIT next" } else { "" }
            ),
        );
    }

    pub fn innings_break(&self, chaser: &str, target: u32) {
        self.record(
            LogCategory::InningsBreak,
            format!("--- Innings break: {chaser} needs {target} to win ---"),
        );
    }

    pub fn result(&self, result: &MatchResult) {
        self.record(
            LogCategory::Result,
            format!("{} {}", result.headline(), result.summary()),
        );
    }

    pub fn rejected(&self, call: &str, reason: &dyn fmt::Display) {
        self.record(LogCategory::Rejected, format!("Rejected {call}: {reason}"));
    }

    pub fn note(&self, message: impl Into<String>) {
        self.record(LogCategory::Note, message.into());
    }
}

fn print_entry(entry: &LogEntry) {
    match entry.level() {
        VerbosityLevel::Minimal => println!("{}", entry.message),
        _ => println!("  {}", entry.message),
    }
}

impl Default for MatchLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MatchLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("captured", &self.captured.borrow().len())
            .finish()
    }
}
