//! Simulation configuration.

use crate::core::constants::{DEFAULT_ITERATIONS, DEFAULT_OUTLIER_MULTIPLE, DEFAULT_ROUNDS};
use crate::error::{Result, SimError};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Rounds per game
    pub rounds: u32,

    /// Number of games to play
    pub iterations: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Spread games over the rayon thread pool
    pub parallel: bool,

    /// Drop games whose baseline exceeds this multiple of the mean baseline
    /// from the score statistics (None = keep every game)
    pub outlier_multiple: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            parallel: false,
            outlier_multiple: None,
        }
    }
}

impl SimConfig {
    /// Quick config for a sanity check of a lineup
    pub fn quick_check() -> Self {
        Self {
            iterations: 100,
            ..Default::default()
        }
    }

    /// Large parallel sweep with the exploratory outlier filter
    pub fn full_sweep() -> Self {
        Self {
            iterations: 20_000,
            parallel: true,
            outlier_multiple: Some(DEFAULT_OUTLIER_MULTIPLE),
            ..Default::default()
        }
    }

    /// Reject settings the simulator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(SimError::InvalidConfiguration(
                "rounds must be positive".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(SimError::InvalidConfiguration(
                "iterations must be positive".into(),
            ));
        }
        if let Some(multiple) = self.outlier_multiple {
            validate_outlier_multiple(multiple)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_outlier_multiple(multiple: f64) -> Result<()> {
    if !multiple.is_finite() || multiple <= 0.0 {
        return Err(SimError::InvalidConfiguration(format!(
            "outlier multiple must be a positive number, got {}",
            multiple
        )));
    }
    Ok(())
}
