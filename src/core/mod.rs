//! Core dice rules: the dice source, the round state machine and one full game.

pub mod constants;
pub mod dice;
pub mod game;
pub mod round;

pub use constants::*;
pub use dice::{DicePair, DiceSource, RandomDice, ScriptedDice};
pub use game::{play_game, GameContext, GameRecord, GameView};
pub use round::{RollOutcome, RoundState};
