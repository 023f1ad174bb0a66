//! Command-line strategy specs.
//!
//! - `constant:300`
//! - `after-round:15`
//! - `tiers:10=300,20=600`
//! - `smart:300,100,50,1.5` (lead, catch-up, offset, divide multiplier; the
//!   multiplier defaults to 1)

use super::types::{BankPolicy, SmartParams, Strategy, Tier};
use crate::error::SimError;
use std::str::FromStr;

impl FromStr for Strategy {
    type Err = SimError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| SimError::InvalidStrategySpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (kind, args) = spec
            .split_once(':')
            .ok_or_else(|| invalid("expected <kind>:<parameters>"))?;
        let args = args.trim();

        let policy = match kind.trim() {
            "constant" | "const" => BankPolicy::Constant {
                threshold: args.parse().map_err(|_| invalid("threshold must be an integer"))?,
            },
            "after-round" | "after" => BankPolicy::AfterRound {
                round: args.parse().map_err(|_| invalid("round must be an integer"))?,
            },
            "tiers" => {
                let tiers = args
                    .split(',')
                    .map(|step| -> Result<Tier, SimError> {
                        let (round, threshold) = step
                            .split_once('=')
                            .ok_or_else(|| invalid("tiers look like <round>=<threshold>"))?;
                        Ok(Tier::new(
                            round
                                .trim()
                                .parse()
                                .map_err(|_| invalid("tier round must be an integer"))?,
                            threshold
                                .trim()
                                .parse()
                                .map_err(|_| invalid("tier threshold must be an integer"))?,
                        ))
                    })
                    .collect::<Result<Vec<_>, SimError>>()?;
                BankPolicy::RoundTiers { tiers }
            }
            "smart" => {
                let parts: Vec<&str> = args.split(',').map(str::trim).collect();
                if !(3..=4).contains(&parts.len()) {
                    return Err(invalid("smart takes lead,catch_up,offset[,multiplier]"));
                }
                let int = |s: &str| {
                    s.parse::<u64>()
                        .map_err(|_| invalid("smart thresholds must be integers"))
                };
                BankPolicy::Smart(SmartParams {
                    lead_threshold: int(parts[0])?,
                    catch_up_threshold: int(parts[1])?,
                    offset: int(parts[2])?,
                    divide_multiplier: match parts.get(3) {
                        Some(m) => m.parse().map_err(|_| invalid("multiplier must be a number"))?,
                        None => 1.0,
                    },
                })
            }
            other => return Err(invalid(&format!("unknown strategy kind `{}`", other))),
        };

        Strategy::unnamed(policy).map_err(|e| invalid(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constant() {
        let s: Strategy = "constant:300".parse().unwrap();
        assert_eq!(s, Strategy::constant(300));
    }

    #[test]
    fn test_parse_after_round() {
        let s: Strategy = "after-round:15".parse().unwrap();
        assert_eq!(s.policy(), &BankPolicy::AfterRound { round: 15 });
        assert_eq!(s.name(), "Bank after round 15");
    }

    #[test]
    fn test_parse_tiers() {
        let s: Strategy = "tiers:10=300, 20=600".parse().unwrap();
        assert_eq!(s, Strategy::two_stage());
    }

    #[test]
    fn test_parse_smart_default_multiplier() {
        let s: Strategy = "smart:300,100,50".parse().unwrap();
        match s.policy() {
            BankPolicy::Smart(p) => {
                assert_eq!(p.lead_threshold, 300);
                assert_eq!(p.catch_up_threshold, 100);
                assert_eq!(p.offset, 50);
                assert_eq!(p.divide_multiplier, 1.0);
            }
            other => panic!("unexpected policy {:?}", other),
        }
    }

    #[test]
    fn test_parse_after_round_zero() {
        let s: Strategy = "after:0".parse().unwrap();
        assert_eq!(s.policy(), &BankPolicy::AfterRound { round: 0 });
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "constant",
            "constant:abc",
            "tiers:10-300",
            "tiers:",
            "smart:1,2",
            "smart:1,2,3,0",
            "yolo:5",
        ] {
            assert!(
                matches!(bad.parse::<Strategy>(), Err(SimError::InvalidStrategySpec { .. })),
                "{} should not parse",
                bad
            );
        }
    }
}
