//! Error types for the book cricket engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CricketError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, CricketError>;
