//! Banking strategies.
//!
//! A strategy is a name plus a [`BankPolicy`]. Policies only read the round
//! and game state they are shown; the game simulator applies their decision.

mod logic;
mod parse;
mod types;

pub use logic::{smart_target, tier_threshold};
pub use types::{
    constant_ladder, default_lineup, lineup_from_json, validate_lineup, BankPolicy, SmartParams,
    Strategy, Tier,
};
