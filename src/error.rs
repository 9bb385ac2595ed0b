//! Error types
//!
//! Burger defects are not errors: they are the output of the classifier.
//! Everything here is either a bad configuration or a misuse of the session.

use thiserror::Error;

/// Target generation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("requested {requested} distinct flags but only {available} exist")]
    TooManyFlags { requested: u32, available: u32 },
    #[error("level range table is empty")]
    EmptyRange,
}

/// Invalid settings, detected at load time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{table}: range table is empty")]
    EmptyTable { table: &'static str },
    #[error("{table}[{index}]: invalid range [{min}, {max}]")]
    BadRange {
        table: &'static str,
        index: usize,
        min: f32,
        max: f32,
    },
    #[error("{table}[{index}]: up to {requested} flags requested but only {available} exist")]
    TooManyFlags {
        table: &'static str,
        index: usize,
        requested: u32,
        available: u32,
    },
    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Session call made in a state that does not allow it
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no target slot is open")]
    NoOpenSlot,
    #[error("level {0} is already complete")]
    LevelComplete(u32),
    #[error("level {0} has not been completed")]
    LevelNotComplete(u32),
    #[error("level {0} was not passed")]
    LevelNotPassed(u32),
    #[error(transparent)]
    Target(#[from] TargetError),
}

/// Any crate error
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("target error: {0}")]
    Target(#[from] TargetError),
    #[error("export failed: {0}")]
    Export(#[from] serde_json::Error),
}
