//! Core delivery and innings types

pub mod outcome;
pub mod player;
pub mod tables;

pub use outcome::{DeliveryCategory, DeliveryOutcome};
pub use player::{next_free_hit, PlayerSlot, PlayerStats};
pub use tables::{is_final_over, TableKind, WeightTable, BALLS_PER_OVER};
