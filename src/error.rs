//! Error type for simulation setup and reporting.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid strategy spec `{spec}`: {reason}")]
    InvalidStrategySpec { spec: String, reason: String },
    #[error("outlier filter (multiple {multiple}) removed all {total} games")]
    DegenerateFilterResult { total: usize, multiple: f64 },
    #[error("no games finished, nothing to measure")]
    NoGamesFinished,
    #[error("lineup error: {0}")]
    Lineup(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
