//! Round state machine.
//!
//! A round starts with an empty bank. The first [`BUILDING_ROLLS`] rolls only
//! ever add to it (a 7 pays [`SEVEN_BONUS`]). After that a 7 ends the round,
//! a double doubles the bank and anything else adds its sum.

use super::constants::{BUILDING_ROLLS, SEVEN_BONUS};
use super::dice::{DicePair, DiceSource};

/// What a single roll did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// The bank is still live and strategies may bank it.
    Continues,
    /// A 7 after the building phase; unbanked strategies lose the bank.
    RoundOver,
}

/// The evolving bank of one round.
///
/// Only the state machine mutates it; strategies receive `&RoundState`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    bank: u64,
    roll_index: u32,
    last_roll: Option<DicePair>,
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current at-risk bank value.
    pub fn bank(&self) -> u64 {
        self.bank
    }

    /// Rolls made this round (1 after the first roll).
    pub fn roll_index(&self) -> u32 {
        self.roll_index
    }

    /// The most recent throw, if any.
    pub fn last_roll(&self) -> Option<DicePair> {
        self.last_roll
    }

    /// True while a 7 is still a bonus.
    pub fn in_building_phase(&self) -> bool {
        self.roll_index <= BUILDING_ROLLS
    }

    /// Clear the bank for a new round.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Throw the dice and apply the result.
    pub fn advance(&mut self, dice: &mut impl DiceSource) -> RollOutcome {
        let pair = dice.roll();
        self.apply(pair)
    }

    /// Apply a known throw.
    ///
    /// On [`RollOutcome::RoundOver`] the bank is left untouched so the caller
    /// can still read what was lost.
    pub fn apply(&mut self, pair: DicePair) -> RollOutcome {
        self.roll_index += 1;
        self.last_roll = Some(pair);

        let sum = u64::from(pair.sum());
        if self.in_building_phase() {
            self.bank += if pair.is_seven() { SEVEN_BONUS } else { sum };
            return RollOutcome::Continues;
        }

        if pair.is_seven() {
            return RollOutcome::RoundOver;
        }

        if pair.is_double() {
            self.bank = self.bank.saturating_mul(2);
        } else {
            self.bank = self.bank.saturating_add(sum);
        }
        RollOutcome::Continues
    }
}
