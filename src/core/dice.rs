//! Dice sources for the round state machine.

use super::constants::{DIE_FACES, LUCKY_SUM};
use crate::error::{Result, SimError};
use rand::Rng;

/// One throw of the two dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DicePair {
    pub a: u8,
    pub b: u8,
}

impl DicePair {
    pub fn new(a: u8, b: u8) -> Self {
        debug_assert!((1..=DIE_FACES).contains(&a) && (1..=DIE_FACES).contains(&b));
        Self { a, b }
    }

    pub fn sum(&self) -> u8 {
        self.a + self.b
    }

    pub fn is_double(&self) -> bool {
        self.a == self.b
    }

    pub fn is_seven(&self) -> bool {
        self.sum() == LUCKY_SUM
    }
}

/// Anything that can throw two dice.
pub trait DiceSource {
    fn roll(&mut self) -> DicePair;
}

/// Uniform dice backed by any random number generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DiceSource for RandomDice<R> {
    fn roll(&mut self) -> DicePair {
        DicePair::new(
            self.rng.gen_range(1..=DIE_FACES),
            self.rng.gen_range(1..=DIE_FACES),
        )
    }
}

/// Replays a fixed sequence of throws, starting over once exhausted.
///
/// Used for deterministic replays of a known game and in tests.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<DicePair>,
    cursor: usize,
}

impl ScriptedDice {
    /// Fails on an empty script.
    pub fn new(rolls: Vec<DicePair>) -> Result<Self> {
        if rolls.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "scripted dice need at least one roll".into(),
            ));
        }
        Ok(Self { rolls, cursor: 0 })
    }

    /// Build from `(a, b)` tuples.
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Result<Self> {
        Self::new(pairs.iter().map(|&(a, b)| DicePair::new(a, b)).collect())
    }

    /// Throws handed out so far.
    pub fn rolls_used(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> DicePair {
        let pair = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_dice_stay_in_range() {
        let mut dice = RandomDice::new(ChaCha8Rng::seed_from_u64(7));
        for _ in 0..10_000 {
            let pair = dice.roll();
            assert!((1..=6).contains(&pair.a));
            assert!((1..=6).contains(&pair.b));
        }
    }

    #[test]
    fn test_random_dice_hit_every_face() {
        let mut dice = RandomDice::new(ChaCha8Rng::seed_from_u64(11));
        let mut seen = [false; 6];
        for _ in 0..1_000 {
            let pair = dice.roll();
            seen[(pair.a - 1) as usize] = true;
            seen[(pair.b - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut first = RandomDice::new(ChaCha8Rng::seed_from_u64(99));
        let mut second = RandomDice::new(ChaCha8Rng::seed_from_u64(99));
        for _ in 0..100 {
            assert_eq!(first.roll(), second.roll());
        }
    }

    #[test]
    fn test_scripted_dice_wrap_around() {
        let mut dice = ScriptedDice::from_pairs(&[(1, 2), (3, 4)]).unwrap();
        assert_eq!(dice.roll(), DicePair::new(1, 2));
        assert_eq!(dice.roll(), DicePair::new(3, 4));
        assert_eq!(dice.roll(), DicePair::new(1, 2));
        assert_eq!(dice.rolls_used(), 3);
    }

    #[test]
    fn test_empty_script_rejected() {
        assert!(matches!(
            ScriptedDice::from_pairs(&[]),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert!(ScriptedDice::new(Vec::new()).is_err());
    }

    #[test]
    fn test_pair_classification() {
        assert!(DicePair::new(3, 4).is_seven());
        assert!(DicePair::new(6, 1).is_seven());
        assert!(!DicePair::new(3, 3).is_seven());
        assert!(DicePair::new(3, 3).is_double());
        assert_eq!(DicePair::new(5, 6).sum(), 11);
    }
}
