//! Banksim - strategy comparator for a push-your-luck dice banking game.
//!
//! Every round the two dice build a shared bank. Strategies decide after
//! each roll whether to lock it in; a 7 after the third roll wipes it out
//! for everyone still waiting. The simulator plays many games and compares
//! how the strategies fare.

pub mod build_info;
pub mod core;
pub mod error;
pub mod simulator;
pub mod strategy;

pub use crate::core::{play_game, DicePair, DiceSource, GameRecord, RandomDice, RoundState};
pub use error::{Result, SimError};
pub use simulator::{run_simulation, CancelToken, SimConfig, SimReport, SimResults};
pub use strategy::{BankPolicy, SmartParams, Strategy, Tier};
