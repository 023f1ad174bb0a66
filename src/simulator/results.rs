//! Raw per-strategy results of a simulation run.

use crate::core::game::GameRecord;
use crate::strategy::Strategy;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything a run produced, in lineup order. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimResults {
    strategy_names: Vec<String>,
    rounds: u32,
    scores: Vec<Vec<u64>>,
    wins: Vec<u64>,
    bank_events: Vec<u64>,
    roll_reach: BTreeMap<u32, u64>,
    baselines: Vec<u64>,
    cancelled: bool,
}

impl SimResults {
    pub fn strategy_names(&self) -> &[String] {
        &self.strategy_names
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn games_played(&self) -> usize {
        self.baselines.len()
    }

    /// True when the run stopped early on request.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Per-game final scores of the strategy at `index`.
    pub fn scores(&self, index: usize) -> &[u64] {
        &self.scores[index]
    }

    pub fn scores_for(&self, name: &str) -> Option<&[u64]> {
        self.index_of(name).map(|i| self.scores(i))
    }

    /// Games in which each strategy had (or shared) the top score.
    pub fn wins(&self) -> &[u64] {
        &self.wins
    }

    pub fn wins_for(&self, name: &str) -> Option<u64> {
        self.index_of(name).map(|i| self.wins[i])
    }

    /// Total rounds in which each strategy banked.
    pub fn bank_events(&self) -> &[u64] {
        &self.bank_events
    }

    /// Roll number -> (game, round) pairs that saw that roll.
    pub fn roll_reach(&self) -> &BTreeMap<u32, u64> {
        &self.roll_reach
    }

    /// Share of all played rounds that reached roll `roll`.
    pub fn reach_likelihood(&self, roll: u32) -> f64 {
        let rounds_played = self.games_played() as f64 * self.rounds as f64;
        if rounds_played == 0.0 {
            return 0.0;
        }
        self.roll_reach.get(&roll).copied().unwrap_or(0) as f64 / rounds_played
    }

    /// Per-game best possible score.
    pub fn baselines(&self) -> &[u64] {
        &self.baselines
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.strategy_names.iter().position(|n| n == name)
    }
}

/// Folds game records into [`SimResults`] in game order.
pub(crate) struct ResultsBuilder {
    results: SimResults,
}

impl ResultsBuilder {
    pub(crate) fn new(strategies: &[Strategy], rounds: u32, expected_games: usize) -> Self {
        let n = strategies.len();
        Self {
            results: SimResults {
                strategy_names: strategies.iter().map(|s| s.name().to_string()).collect(),
                rounds,
                scores: vec![Vec::with_capacity(expected_games); n],
                wins: vec![0; n],
                bank_events: vec![0; n],
                roll_reach: BTreeMap::new(),
                baselines: Vec::with_capacity(expected_games),
                cancelled: false,
            },
        }
    }

    pub(crate) fn record(&mut self, game: &GameRecord) {
        let r = &mut self.results;
        for (i, &score) in game.scores.iter().enumerate() {
            r.scores[i].push(score);
            r.bank_events[i] += u64::from(game.bank_events[i]);
        }
        for winner in game.winners() {
            r.wins[winner] += 1;
        }
        for (depth, &count) in game.roll_reach.iter().enumerate() {
            *r.roll_reach.entry(depth as u32 + 1).or_insert(0) += u64::from(count);
        }
        r.baselines.push(game.baseline);
    }

    pub(crate) fn finish(mut self, cancelled: bool) -> SimResults {
        self.results.cancelled = cancelled;
        self.results
    }
}
