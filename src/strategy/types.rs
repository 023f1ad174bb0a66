//! Strategy data types.

use crate::core::constants::{DEFAULT_LADDER_COUNT, DEFAULT_LADDER_STEP};
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One step of a round-based threshold schedule.
///
/// Applies to every round up to and including `through_round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub through_round: u32,
    pub threshold: u64,
}

impl Tier {
    pub fn new(through_round: u32, threshold: u64) -> Self {
        Self {
            through_round,
            threshold,
        }
    }
}

/// Parameters of the standing-aware strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmartParams {
    /// Bank target while leading or within `offset` of the leader.
    pub lead_threshold: u64,
    /// Added on top of the per-round deficit share while trailing.
    pub catch_up_threshold: u64,
    /// How far behind still counts as level with the leader.
    pub offset: u64,
    /// Scales the remaining rounds the deficit is spread over.
    pub divide_multiplier: f64,
}

/// When a strategy locks in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BankPolicy {
    /// Bank once the bank reaches `threshold`.
    Constant { threshold: u64 },
    /// Bank on the first check of every round from `round` onwards.
    AfterRound { round: u32 },
    /// Constant threshold chosen per round from an ordered schedule.
    RoundTiers { tiers: Vec<Tier> },
    /// Threshold driven by the standing against the other strategies.
    Smart(SmartParams),
}

impl BankPolicy {
    /// Name used when the caller does not supply one.
    pub fn default_name(&self) -> String {
        match self {
            BankPolicy::Constant { threshold } => format!("Bank at {}", threshold),
            BankPolicy::AfterRound { round } => format!("Bank after round {}", round),
            BankPolicy::RoundTiers { tiers } => {
                let steps: Vec<String> = tiers
                    .iter()
                    .map(|t| format!("{}:{}", t.through_round, t.threshold))
                    .collect();
                format!("Tiered {}", steps.join("/"))
            }
            BankPolicy::Smart(p) => format!(
                "Smart {}/{}/{}/x{}",
                p.lead_threshold, p.catch_up_threshold, p.offset, p.divide_multiplier
            ),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            BankPolicy::Constant { .. } | BankPolicy::AfterRound { .. } => Ok(()),
            BankPolicy::RoundTiers { tiers } => {
                if tiers.is_empty() {
                    return Err(SimError::InvalidConfiguration(
                        "tiered strategy needs at least one tier".into(),
                    ));
                }
                if tiers
                    .windows(2)
                    .any(|w| w[0].through_round >= w[1].through_round)
                {
                    return Err(SimError::InvalidConfiguration(
                        "tier boundaries must be strictly increasing".into(),
                    ));
                }
                Ok(())
            }
            BankPolicy::Smart(p) => {
                if !p.divide_multiplier.is_finite() || p.divide_multiplier <= 0.0 {
                    return Err(SimError::InvalidConfiguration(format!(
                        "smart divide multiplier must be a positive number, got {}",
                        p.divide_multiplier
                    )));
                }
                Ok(())
            }
        }
    }
}

/// A named banking policy. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrategyDef")]
pub struct Strategy {
    name: String,
    #[serde(flatten)]
    policy: BankPolicy,
}

/// Shape of a strategy in a lineup file; the name is optional there.
#[derive(Deserialize)]
struct StrategyDef {
    name: Option<String>,
    #[serde(flatten)]
    policy: BankPolicy,
}

impl TryFrom<StrategyDef> for Strategy {
    type Error = SimError;

    fn try_from(def: StrategyDef) -> Result<Self> {
        match def.name {
            Some(name) => Strategy::new(name, def.policy),
            None => Strategy::unnamed(def.policy),
        }
    }
}

impl Strategy {
    /// Build a validated strategy.
    pub fn new(name: impl Into<String>, policy: BankPolicy) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SimError::InvalidConfiguration(
                "strategy name must not be empty".into(),
            ));
        }
        policy.validate()?;
        Ok(Self { name, policy })
    }

    /// Build a validated strategy named after its policy.
    pub fn unnamed(policy: BankPolicy) -> Result<Self> {
        let name = policy.default_name();
        Self::new(name, policy)
    }

    pub fn constant(threshold: u64) -> Self {
        let policy = BankPolicy::Constant { threshold };
        Self {
            name: policy.default_name(),
            policy,
        }
    }

    pub fn after_round(round: u32) -> Result<Self> {
        Self::unnamed(BankPolicy::AfterRound { round })
    }

    pub fn round_tiers(tiers: Vec<Tier>) -> Result<Self> {
        Self::unnamed(BankPolicy::RoundTiers { tiers })
    }

    pub fn smart(params: SmartParams) -> Result<Self> {
        Self::unnamed(BankPolicy::Smart(params))
    }

    /// Two-stage schedule: 300 through round 10, 600 afterwards.
    pub fn two_stage() -> Self {
        let tiers = vec![Tier::new(10, 300), Tier::new(20, 600)];
        let policy = BankPolicy::RoundTiers { tiers };
        Self {
            name: policy.default_name(),
            policy,
        }
    }

    /// Same policy under another name.
    pub fn renamed(self, name: impl Into<String>) -> Result<Self> {
        Self::new(name, self.policy)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &BankPolicy {
        &self.policy
    }
}

/// `count` constant strategies at 0, `step`, 2 * `step`, ...
///
/// Fails when the top threshold does not fit in a `u64`.
pub fn constant_ladder(count: u32, step: u64) -> Result<Vec<Strategy>> {
    (0..u64::from(count))
        .map(|i| {
            i.checked_mul(step).map(Strategy::constant).ok_or_else(|| {
                SimError::InvalidConfiguration(format!(
                    "ladder of {} steps of {} overflows the threshold range",
                    count, step
                ))
            })
        })
        .collect()
}

/// The stock lineup: 50 constant thresholds spaced 200 apart.
pub fn default_lineup() -> Vec<Strategy> {
    (0..u64::from(DEFAULT_LADDER_COUNT))
        .map(|i| Strategy::constant(i * DEFAULT_LADDER_STEP))
        .collect()
}

/// Reject empty lineups and duplicate names.
pub fn validate_lineup(strategies: &[Strategy]) -> Result<()> {
    if strategies.is_empty() {
        return Err(SimError::InvalidConfiguration(
            "lineup must contain at least one strategy".into(),
        ));
    }
    let mut seen = HashSet::new();
    for strategy in strategies {
        if !seen.insert(strategy.name()) {
            return Err(SimError::InvalidConfiguration(format!(
                "duplicate strategy name `{}`",
                strategy.name()
            )));
        }
    }
    Ok(())
}

/// Parse a JSON lineup: an array of strategy objects.
pub fn lineup_from_json(json: &str) -> Result<Vec<Strategy>> {
    let strategies: Vec<Strategy> =
        serde_json::from_str(json).map_err(|e| SimError::Lineup(e.to_string()))?;
    validate_lineup(&strategies)?;
    Ok(strategies)
}
