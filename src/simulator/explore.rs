//! Single-strategy exploration against the best possible score.
//!
//! Plays one strategy alone and compares what it banked with the baseline:
//! the bank at the moment each round ended. Games with freak baselines (long
//! doubling streaks) can be dropped before averaging.

use super::cancel::CancelToken;
use super::config::{validate_outlier_multiple, SimConfig};
use super::runner::run_simulation;
use super::stats::{filter_outliers, mean, select};
use crate::core::constants::{DEFAULT_ITERATIONS, DEFAULT_OUTLIER_MULTIPLE, DEFAULT_ROUNDS};
use crate::error::{Result, SimError};
use crate::strategy::Strategy;
use serde::Serialize;
use tracing::info;

/// Configuration for an exploration run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreConfig {
    pub games: u32,
    pub rounds: u32,
    pub seed: Option<u64>,
    /// None keeps every game
    pub outlier_multiple: Option<f64>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_ITERATIONS,
            rounds: DEFAULT_ROUNDS,
            seed: None,
            outlier_multiple: Some(DEFAULT_OUTLIER_MULTIPLE),
        }
    }
}

/// Outcome of an exploration run, over the games that survived the filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExploreReport {
    pub strategy: String,
    pub games_played: usize,
    pub games_kept: usize,
    pub cancelled: bool,
    pub total_baseline: u64,
    pub total_score: u64,
    pub avg_baseline: f64,
    pub avg_score: f64,
    /// Mean of score / baseline per game, in percent
    pub avg_percent_per_game: f64,
    /// Mean score / mean baseline, in percent
    pub percent_of_baseline: f64,
    pub baselines: Vec<u64>,
    pub scores: Vec<u64>,
}

/// Play `strategy` alone and measure it against the baseline.
pub fn run_exploration(
    config: &ExploreConfig,
    strategy: &Strategy,
    cancel: &CancelToken,
) -> Result<ExploreReport> {
    if let Some(multiple) = config.outlier_multiple {
        validate_outlier_multiple(multiple)?;
    }
    let sim_config = SimConfig {
        rounds: config.rounds,
        iterations: config.games,
        seed: config.seed,
        parallel: false,
        outlier_multiple: None,
    };
    let results = run_simulation(&sim_config, std::slice::from_ref(strategy), cancel)?;
    let games_played = results.games_played();
    if games_played == 0 {
        return Err(SimError::NoGamesFinished);
    }

    let kept = match config.outlier_multiple {
        Some(multiple) => filter_outliers(results.baselines(), multiple)?,
        None => (0..games_played).collect(),
    };

    let baselines = select(results.baselines(), &kept);
    let scores = select(results.scores(0), &kept);

    let percents: Vec<f64> = baselines
        .iter()
        .zip(&scores)
        .map(|(&b, &s)| {
            if b > 0 {
                s as f64 / b as f64 * 100.0
            } else {
                0.0
            }
        })
        .collect();

    let avg_baseline = mean(&baselines);
    let avg_score = mean(&scores);
    let report = ExploreReport {
        strategy: strategy.name().to_string(),
        games_played,
        games_kept: kept.len(),
        cancelled: results.was_cancelled(),
        total_baseline: baselines.iter().sum(),
        total_score: scores.iter().sum(),
        avg_baseline,
        avg_score,
        avg_percent_per_game: percents.iter().sum::<f64>() / percents.len() as f64,
        percent_of_baseline: if avg_baseline > 0.0 {
            avg_score / avg_baseline * 100.0
        } else {
            0.0
        },
        baselines,
        scores,
    };

    info!(
        strategy = %report.strategy,
        kept = report.games_kept,
        of = report.games_played,
        percent = report.percent_of_baseline,
        "exploration finished"
    );
    Ok(report)
}

impl ExploreReport {
    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    EXPLORATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Strategy: {}\n", self.strategy));
        report.push_str(&format!(
            "Games:    {} played, {} kept after filtering",
            self.games_played, self.games_kept
        ));
        if self.cancelled {
            report.push_str(" (interrupted)");
        }
        report.push_str("\n\n");

        report.push_str(&format!(
            "  Total best possible score:        {}\n",
            self.total_baseline
        ));
        report.push_str(&format!(
            "  Total banked score:               {}\n",
            self.total_score
        ));
        report.push_str(&format!(
            "  Average best possible score:      {:.1}\n",
            self.avg_baseline
        ));
        report.push_str(&format!(
            "  Average banked score:             {:.1}\n",
            self.avg_score
        ));
        report.push_str(&format!(
            "  Average share of best, per game:  {:.2}%\n",
            self.avg_percent_per_game
        ));
        report.push_str(&format!(
            "  Share of average best:            {:.2}%\n",
            self.percent_of_baseline
        ));

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
