//! Monte Carlo comparison of banking strategies.
//!
//! Plays thousands of games in which every strategy watches the same dice
//! and reports per-strategy score distributions, win rates, bank counts and
//! how long rounds tend to last.

mod cancel;
mod config;
mod explore;
mod report;
mod results;
mod runner;
pub mod stats;

pub use cancel::CancelToken;
pub use config::SimConfig;
pub use explore::{run_exploration, ExploreConfig, ExploreReport};
pub use report::{ReachEntry, SimReport, StrategySummary};
pub use results::SimResults;
pub use runner::{run_simulation, simulate_single_game};
