//! Main simulation runner.
//!
//! Every game gets its own ChaCha stream under the run's seed, so a run is
//! reproducible and the parallel path reduces to exactly the same results
//! as the sequential one. Nearby seeds share no games.

use super::cancel::CancelToken;
use super::config::SimConfig;
use super::results::{ResultsBuilder, SimResults};
use crate::core::constants::PARALLEL_CHUNK_SIZE;
use crate::core::dice::RandomDice;
use crate::core::game::{play_game, GameRecord};
use crate::error::Result;
use crate::strategy::{validate_lineup, Strategy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

/// Run the full simulation and return the collected results.
///
/// A cancelled run still returns `Ok` with the games finished so far.
pub fn run_simulation(
    config: &SimConfig,
    strategies: &[Strategy],
    cancel: &CancelToken,
) -> Result<SimResults> {
    config.validate()?;
    validate_lineup(strategies)?;

    info!(
        strategies = strategies.len(),
        iterations = config.iterations,
        rounds = config.rounds,
        seed = ?config.seed,
        parallel = config.parallel,
        "starting simulation"
    );

    let mut builder = ResultsBuilder::new(strategies, config.rounds, config.iterations as usize);
    let cancelled = if config.parallel {
        run_parallel(config, strategies, cancel, &mut builder)
    } else {
        run_sequential(config, strategies, cancel, &mut builder)
    };

    let results = builder.finish(cancelled);
    if cancelled {
        info!(
            games = results.games_played(),
            "simulation cancelled, returning partial results"
        );
    } else {
        info!(games = results.games_played(), "simulation finished");
    }
    Ok(results)
}

/// Play game number `game` of a run.
pub fn simulate_single_game(config: &SimConfig, strategies: &[Strategy], game: u32) -> GameRecord {
    let mut dice = RandomDice::new(game_rng(config.seed, game));
    play_game(strategies, config.rounds, &mut dice)
}

fn game_rng(seed: Option<u64>, game: u32) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(u64::from(game));
            rng
        }
        None => ChaCha8Rng::from_entropy(),
    }
}

fn run_sequential(
    config: &SimConfig,
    strategies: &[Strategy],
    cancel: &CancelToken,
    builder: &mut ResultsBuilder,
) -> bool {
    for game in 0..config.iterations {
        if cancel.is_cancelled() {
            return true;
        }
        let record = simulate_single_game(config, strategies, game);
        debug!(
            game = game + 1,
            of = config.iterations,
            baseline = record.baseline,
            winners = ?record.winners(),
            "game finished"
        );
        builder.record(&record);
    }
    false
}

fn run_parallel(
    config: &SimConfig,
    strategies: &[Strategy],
    cancel: &CancelToken,
    builder: &mut ResultsBuilder,
) -> bool {
    let chunk = PARALLEL_CHUNK_SIZE as u32;
    let mut start = 0u32;
    while start < config.iterations {
        if cancel.is_cancelled() {
            return true;
        }
        let end = start.saturating_add(chunk).min(config.iterations);
        let records: Vec<GameRecord> = (start..end)
            .into_par_iter()
            .map(|game| simulate_single_game(config, strategies, game))
            .collect();
        for record in &records {
            builder.record(record);
        }
        debug!(games = end, of = config.iterations, "chunk finished");
        start = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineup() -> Vec<Strategy> {
        vec![
            Strategy::constant(0),
            Strategy::constant(200),
            Strategy::constant(600),
            Strategy::two_stage(),
        ]
    }

    #[test]
    fn test_full_simulation() {
        let config = SimConfig {
            iterations: 50,
            seed: Some(42),
            ..Default::default()
        };
        let results = run_simulation(&config, &lineup(), &CancelToken::new()).unwrap();

        assert_eq!(results.games_played(), 50);
        for i in 0..lineup().len() {
            assert_eq!(results.scores(i).len(), 50);
        }
        // every round has at least the three building rolls and one more
        assert_eq!(results.roll_reach().get(&4), Some(&(50 * 20)));
        assert!(results.wins().iter().sum::<u64>() >= 50);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let config = SimConfig {
            iterations: 30,
            seed: Some(7),
            ..Default::default()
        };
        let a = run_simulation(&config, &lineup(), &CancelToken::new()).unwrap();
        let b = run_simulation(&config, &lineup(), &CancelToken::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nearby_seeds_do_not_share_games() {
        let first = SimConfig {
            seed: Some(1),
            ..Default::default()
        };
        let second = SimConfig {
            seed: Some(2),
            ..Default::default()
        };
        for game in 0..5 {
            assert_ne!(
                simulate_single_game(&first, &lineup(), game + 1),
                simulate_single_game(&second, &lineup(), game)
            );
        }
        assert_eq!(
            simulate_single_game(&first, &lineup(), 3),
            simulate_single_game(&first, &lineup(), 3)
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = SimConfig {
            iterations: 150,
            seed: Some(1234),
            ..Default::default()
        };
        let parallel = SimConfig {
            parallel: true,
            ..sequential.clone()
        };
        let a = run_simulation(&sequential, &lineup(), &CancelToken::new()).unwrap();
        let b = run_simulation(&parallel, &lineup(), &CancelToken::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cancelled_before_start_returns_empty() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let config = SimConfig {
            iterations: 10,
            seed: Some(1),
            ..Default::default()
        };
        let results = run_simulation(&config, &lineup(), &cancel).unwrap();
        assert_eq!(results.games_played(), 0);
        assert!(results.was_cancelled());
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let config = SimConfig {
            rounds: 0,
            ..Default::default()
        };
        assert!(run_simulation(&config, &lineup(), &CancelToken::new()).is_err());
        assert!(run_simulation(&SimConfig::default(), &[], &CancelToken::new()).is_err());
    }
}
