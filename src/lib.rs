//! Book Cricket - turn-based cricket scoring engine
//!
//! Each delivery is decided by the last digit of a randomly "flipped" book
//! page. The engine resolves deliveries from weighted digit tables, applies
//! them to per-player innings state, and sequences one or two innings into a
//! finished match.

pub mod core;
pub mod error;
pub mod game;
pub mod simulation;

pub use error::{CricketError, Result};
