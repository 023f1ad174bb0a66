//! Integration test: round transition rules
//!
//! Checks the building phase, busts and doubling against long random roll
//! sequences as well as hand-picked ones.

use banksim::core::{RollOutcome, ScriptedDice};
use banksim::{play_game, DicePair, DiceSource, RandomDice, RoundState, Strategy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Play rounds with random dice and check every transition.
#[test]
fn test_random_rounds_follow_the_rules() {
    let mut dice = RandomDice::new(ChaCha8Rng::seed_from_u64(42));
    let mut sevens_while_building = 0;
    let mut busts = 0;
    let mut doubles_after_building = 0;

    for _ in 0..5_000 {
        let mut round = RoundState::new();
        loop {
            let before = round.bank();
            let pair = dice.roll();
            let outcome = round.apply(pair);
            let roll = round.roll_index();
            let sum = u64::from(pair.sum());

            if roll <= 3 {
                assert_eq!(outcome, RollOutcome::Continues);
                if pair.is_seven() {
                    sevens_while_building += 1;
                    assert_eq!(round.bank(), before + 70);
                } else {
                    assert_eq!(round.bank(), before + sum);
                }
            } else if pair.is_seven() {
                busts += 1;
                assert_eq!(outcome, RollOutcome::RoundOver);
                assert_eq!(round.bank(), before);
                break;
            } else if pair.is_double() {
                doubles_after_building += 1;
                assert_eq!(outcome, RollOutcome::Continues);
                assert_eq!(round.bank(), before * 2);
            } else {
                assert_eq!(outcome, RollOutcome::Continues);
                assert_eq!(round.bank(), before + sum);
            }
        }
    }

    assert_eq!(busts, 5_000);
    assert!(sevens_while_building > 0);
    assert!(doubles_after_building > 0);
}

#[test]
fn test_building_total_is_plain_sum() {
    // 3 + 5 + 9, no sevens or doubles
    let mut round = RoundState::new();
    for (a, b) in [(1, 2), (2, 3), (4, 5)] {
        round.apply(DicePair::new(a, b));
    }
    assert_eq!(round.bank(), 17);
    assert!(round.in_building_phase());
}

#[test]
fn test_constant_at_building_total_banks_it_exactly() {
    let mut dice =
        ScriptedDice::from_pairs(&[(1, 2), (2, 3), (4, 5), (6, 5), (4, 3)]).unwrap();
    let record = play_game(&[Strategy::constant(17)], 1, &mut dice);
    assert_eq!(record.scores, vec![17]);
}

#[test]
fn test_constant_below_building_total_banks_earlier() {
    let mut dice =
        ScriptedDice::from_pairs(&[(1, 2), (2, 3), (4, 5), (6, 5), (4, 3)]).unwrap();
    let record = play_game(&[Strategy::constant(8)], 1, &mut dice);
    assert_eq!(record.scores, vec![8]);
}

#[test]
fn test_bust_wipes_unbanked_strategies() {
    // 70 + 70 + 70, double to 420, then bust
    let mut dice =
        ScriptedDice::from_pairs(&[(3, 4), (1, 6), (2, 5), (6, 6), (5, 2)]).unwrap();
    let lineup = [
        Strategy::constant(200),
        Strategy::constant(400),
        Strategy::constant(500),
    ];
    let record = play_game(&lineup, 1, &mut dice);

    assert_eq!(record.scores, vec![210, 420, 0]);
    assert_eq!(record.baseline, 420);
    assert_eq!(record.bank_events, vec![1, 1, 0]);
}

#[test]
fn test_seven_on_fourth_roll_busts() {
    let mut dice = ScriptedDice::from_pairs(&[(1, 1), (1, 1), (1, 1), (3, 4)]).unwrap();
    let record = play_game(&[Strategy::constant(7)], 1, &mut dice);
    // 2 + 2 + 2 never reaches 7
    assert_eq!(record.scores, vec![0]);
    assert_eq!(record.roll_reach, vec![1, 1, 1, 1]);
}

#[test]
fn test_every_round_lasts_at_least_four_rolls() {
    let mut dice = RandomDice::new(ChaCha8Rng::seed_from_u64(5));
    let record = play_game(&[Strategy::constant(0)], 200, &mut dice);
    assert_eq!(record.roll_reach[3], 200);
    assert!(record.roll_reach.windows(2).all(|w| w[0] >= w[1]));
}
