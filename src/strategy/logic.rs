//! Banking decisions.

use super::types::{BankPolicy, SmartParams, Strategy, Tier};
use crate::core::game::GameView;
use crate::core::round::RoundState;

impl Strategy {
    /// Decide whether to lock in the current bank.
    ///
    /// Called after every roll that keeps the round alive, until this
    /// strategy banks. Reads state only; the caller applies the result.
    pub fn will_bank(&self, round: &RoundState, view: &GameView<'_>) -> bool {
        self.policy().will_bank(round, view)
    }
}

impl BankPolicy {
    pub fn will_bank(&self, round: &RoundState, view: &GameView<'_>) -> bool {
        match self {
            BankPolicy::Constant { threshold } => round.bank() >= *threshold,
            BankPolicy::AfterRound { round: cutoff } => view.current_round() >= *cutoff,
            BankPolicy::RoundTiers { tiers } => {
                round.bank() >= tier_threshold(tiers, view.current_round())
            }
            BankPolicy::Smart(params) => round.bank() as f64 >= smart_target(params, view),
        }
    }
}

/// Threshold of the first tier covering `current_round`, else the last tier's.
pub fn tier_threshold(tiers: &[Tier], current_round: u32) -> u64 {
    tiers
        .iter()
        .find(|t| t.through_round >= current_round)
        .or_else(|| tiers.last())
        .map(|t| t.threshold)
        .unwrap_or(0)
}

/// Bank value the smart strategy needs before it banks this roll.
pub fn smart_target(params: &SmartParams, view: &GameView<'_>) -> f64 {
    let own = view.own_score();
    let leader = view.leader_score();

    if own.saturating_add(params.offset) >= leader {
        return params.lead_threshold as f64;
    }

    let rounds_left = (view.rounds_remaining() as f64 * params.divide_multiplier).max(1.0);
    let deficit = (leader - own) as f64;
    deficit / rounds_left + params.catch_up_threshold as f64
}
