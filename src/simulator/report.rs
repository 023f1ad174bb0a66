//! Simulation report generation.

use super::config::validate_outlier_multiple;
use super::results::SimResults;
use super::stats::{filter_outliers, mean, median, select, std_dev};
use crate::error::Result;
use serde::Serialize;

/// Rows shown in the roll-reach section of the text report.
const REACH_ROWS: usize = 25;

/// Score statistics for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u64,
    pub median: u64,
    pub max: u64,
    pub wins: u64,
    pub win_rate: f64,
    pub bank_events: u64,
    pub banks_per_game: f64,
}

/// How often rounds lasted at least `roll` rolls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachEntry {
    pub roll: u32,
    pub rounds: u64,
    pub likelihood: f64,
}

/// Aggregated view of a [`SimResults`].
///
/// Score statistics honour the outlier filter; wins and bank events always
/// cover every game played.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub games_played: usize,
    pub games_in_stats: usize,
    pub rounds: u32,
    pub cancelled: bool,
    pub outlier_multiple: Option<f64>,
    pub mean_baseline: f64,
    pub strategies: Vec<StrategySummary>,
    pub roll_reach: Vec<ReachEntry>,
}

impl SimReport {
    /// Summarize results, optionally dropping outlier games from the score
    /// statistics first.
    pub fn from_results(results: &SimResults, outlier_multiple: Option<f64>) -> Result<Self> {
        let games_played = results.games_played();
        let all_games: Vec<usize> = (0..games_played).collect();

        let kept = match outlier_multiple {
            Some(multiple) if games_played > 0 => {
                validate_outlier_multiple(multiple)?;
                filter_outliers(results.baselines(), multiple)?
            }
            _ => all_games,
        };

        let strategies = results
            .strategy_names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let scores = select(results.scores(i), &kept);
                let wins = results.wins()[i];
                let bank_events = results.bank_events()[i];
                StrategySummary {
                    name: name.clone(),
                    mean: mean(&scores),
                    std_dev: std_dev(&scores),
                    min: scores.iter().min().copied().unwrap_or(0),
                    median: median(&scores),
                    max: scores.iter().max().copied().unwrap_or(0),
                    wins,
                    win_rate: ratio(wins as f64, games_played as f64),
                    bank_events,
                    banks_per_game: ratio(bank_events as f64, games_played as f64),
                }
            })
            .collect();

        let roll_reach = results
            .roll_reach()
            .iter()
            .map(|(&roll, &rounds)| ReachEntry {
                roll,
                rounds,
                likelihood: results.reach_likelihood(roll),
            })
            .collect();

        Ok(Self {
            games_played,
            games_in_stats: kept.len(),
            rounds: results.rounds(),
            cancelled: results.was_cancelled(),
            outlier_multiple,
            mean_baseline: mean(&select(results.baselines(), &kept)),
            strategies,
            roll_reach,
        })
    }

    pub fn summary(&self, name: &str) -> Option<&StrategySummary> {
        self.strategies.iter().find(|s| s.name == name)
    }

    /// Strategies ordered by mean score, best first.
    pub fn ranked(&self) -> Vec<&StrategySummary> {
        let mut ranked: Vec<&StrategySummary> = self.strategies.iter().collect();
        ranked.sort_by(|a, b| b.mean.total_cmp(&a.mean));
        ranked
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    BANK SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Games: {} played, {} rounds each",
            self.games_played, self.rounds
        ));
        if self.cancelled {
            report.push_str(" (interrupted, partial results)");
        }
        report.push('\n');
        if let Some(multiple) = self.outlier_multiple {
            report.push_str(&format!(
                "Outlier filter: {}x mean baseline, {} of {} games kept\n",
                multiple, self.games_in_stats, self.games_played
            ));
        }
        report.push_str(&format!(
            "Mean best possible score: {:.1}\n\n",
            self.mean_baseline
        ));

        report.push_str("── STRATEGIES (by mean score) ───────────────────────────────────\n");
        report.push_str(&format!(
            "  {:<28} {:>9} {:>9} {:>7} {:>7} {:>7} {:>7}\n",
            "Strategy", "Mean", "StdDev", "Median", "Max", "Win%", "Banks"
        ));
        for s in self.ranked() {
            report.push_str(&format!(
                "  {:<28} {:>9.1} {:>9.1} {:>7} {:>7} {:>6.1}% {:>7.2}\n",
                truncate(&s.name, 28),
                s.mean,
                s.std_dev,
                s.median,
                s.max,
                s.win_rate * 100.0,
                s.banks_per_game
            ));
        }
        report.push('\n');

        report.push_str("── ROUND LENGTH ─────────────────────────────────────────────────\n");
        for entry in self.roll_reach.iter().take(REACH_ROWS) {
            let pct = entry.likelihood * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  Roll {:3}: {:>5.1}% {}\n",
                entry.roll, pct, bar
            ));
        }
        if self.roll_reach.len() > REACH_ROWS {
            report.push_str(&format!(
                "  ... longest round lasted {} rolls\n",
                self.roll_reach.len()
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width - 1).collect();
        short.push('…');
        short
    }
}
