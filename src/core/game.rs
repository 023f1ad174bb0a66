//! One full game: a fixed number of rounds shared by every strategy.

use super::dice::DiceSource;
use super::round::{RollOutcome, RoundState};
use crate::strategy::Strategy;
use tracing::{debug, trace};

/// Per-game bookkeeping shown read-only to strategies.
///
/// Strategies are identified by their index in the lineup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameContext {
    total_rounds: u32,
    current_round: u32,
    scores: Vec<u64>,
    banked: Vec<bool>,
}

impl GameContext {
    pub fn new(total_rounds: u32, players: usize) -> Self {
        Self {
            total_rounds,
            current_round: 0,
            scores: vec![0; players],
            banked: vec![false; players],
        }
    }

    /// A context frozen at `current_round` with the given scores, nobody banked.
    pub fn from_parts(total_rounds: u32, current_round: u32, scores: Vec<u64>) -> Self {
        let players = scores.len();
        Self {
            total_rounds,
            current_round,
            scores,
            banked: vec![false; players],
        }
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// 1-based; 0 before the first round starts.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    pub fn has_banked(&self, player: usize) -> bool {
        self.banked[player]
    }

    /// Read-only view from one strategy's seat.
    pub fn view(&self, me: usize) -> GameView<'_> {
        GameView { me, context: self }
    }

    fn start_round(&mut self, round: u32) {
        self.current_round = round;
        self.banked.iter_mut().for_each(|b| *b = false);
    }

    fn credit(&mut self, player: usize, amount: u64) {
        debug_assert!(!self.banked[player], "strategy banked twice in one round");
        self.scores[player] = self.scores[player].saturating_add(amount);
        self.banked[player] = true;
    }
}

/// What one strategy can see of the game when deciding.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    me: usize,
    context: &'a GameContext,
}

impl GameView<'_> {
    pub fn current_round(&self) -> u32 {
        self.context.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.context.total_rounds
    }

    /// Rounds still to come after this one.
    pub fn rounds_remaining(&self) -> u32 {
        self.context
            .total_rounds
            .saturating_sub(self.context.current_round)
    }

    pub fn own_score(&self) -> u64 {
        self.context.scores[self.me]
    }

    /// Best score among the other strategies, 0 when playing alone.
    pub fn leader_score(&self) -> u64 {
        self.context
            .scores
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.me)
            .map(|(_, s)| *s)
            .max()
            .unwrap_or(0)
    }
}

/// Outcome of one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    /// Final score per strategy, in lineup order.
    pub scores: Vec<u64>,
    /// Rounds in which each strategy banked.
    pub bank_events: Vec<u32>,
    /// `roll_reach[r - 1]` is the number of rounds that saw an `r`-th roll.
    pub roll_reach: Vec<u32>,
    /// Sum over rounds of the bank when the round ended: the most any
    /// strategy could have scored.
    pub baseline: u64,
}

impl GameRecord {
    /// Every strategy tied for the top score.
    pub fn winners(&self) -> Vec<usize> {
        let Some(best) = self.scores.iter().max().copied() else {
            return Vec::new();
        };
        self.scores
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == best)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Play `total_rounds` rounds with every strategy watching the same dice.
pub fn play_game(
    strategies: &[Strategy],
    total_rounds: u32,
    dice: &mut impl DiceSource,
) -> GameRecord {
    let mut ctx = GameContext::new(total_rounds, strategies.len());
    let mut bank_events = vec![0u32; strategies.len()];
    let mut roll_reach: Vec<u32> = Vec::new();
    let mut baseline = 0u64;
    let mut round = RoundState::new();

    for round_number in 1..=total_rounds {
        round.reset();
        ctx.start_round(round_number);

        while round.advance(dice) == RollOutcome::Continues {
            trace!(round = round_number, roll = round.roll_index(), bank = round.bank(), "roll");

            for (i, strategy) in strategies.iter().enumerate() {
                if ctx.has_banked(i) {
                    continue;
                }
                if strategy.will_bank(&round, &ctx.view(i)) {
                    ctx.credit(i, round.bank());
                    bank_events[i] += 1;
                    trace!(strategy = strategy.name(), bank = round.bank(), "banked");
                }
            }
        }

        let rolls = round.roll_index() as usize;
        if roll_reach.len() < rolls {
            roll_reach.resize(rolls, 0);
        }
        roll_reach[..rolls].iter_mut().for_each(|c| *c += 1);
        baseline = baseline.saturating_add(round.bank());

        debug!(
            round = round_number,
            rolls,
            lost = round.bank(),
            unbanked = ctx.banked.iter().filter(|b| !**b).count(),
            "round over"
        );
    }

    GameRecord {
        scores: ctx.scores,
        bank_events,
        roll_reach,
        baseline,
    }
}
