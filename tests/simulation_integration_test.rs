//! Integration test: full simulation runs
//!
//! Runs the aggregator end to end and checks the shape of the results,
//! reproducibility, cancellation and the report layer.

use banksim::simulator::{
    run_exploration, run_simulation, CancelToken, ExploreConfig, SimConfig, SimReport,
};
use banksim::strategy::{default_lineup, lineup_from_json};
use banksim::{SimError, Strategy};

fn config(iterations: u32, seed: u64) -> SimConfig {
    SimConfig {
        iterations,
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn test_default_lineup_run() {
    let lineup = default_lineup();
    let results = run_simulation(&config(100, 42), &lineup, &CancelToken::new()).unwrap();

    assert_eq!(results.games_played(), 100);
    assert_eq!(results.strategy_names().len(), 50);
    for i in 0..lineup.len() {
        assert_eq!(results.scores(i).len(), 100);
    }
    // "Bank at 0" banks every round of every game
    assert_eq!(results.bank_events()[0], 100 * 20);
    // each game has at least one winner
    assert!(results.wins().iter().sum::<u64>() >= 100);
    assert_eq!(results.reach_likelihood(1), 1.0);
    assert_eq!(results.reach_likelihood(4), 1.0);
    assert!(results.reach_likelihood(5) < 1.0);
}

#[test]
fn test_same_seed_same_scores() {
    let lineup = default_lineup();
    let a = run_simulation(&config(60, 9), &lineup, &CancelToken::new()).unwrap();
    let b = run_simulation(&config(60, 9), &lineup, &CancelToken::new()).unwrap();
    let c = run_simulation(&config(60, 10), &lineup, &CancelToken::new()).unwrap();

    for i in 0..lineup.len() {
        assert_eq!(a.scores(i), b.scores(i));
    }
    assert_ne!(a.baselines(), c.baselines());
}

#[test]
fn test_scores_never_exceed_baseline() {
    let lineup = vec![
        Strategy::constant(0),
        Strategy::constant(400),
        Strategy::two_stage(),
        "smart:300,100,50".parse().unwrap(),
        "after-round:18".parse().unwrap(),
    ];
    let results = run_simulation(&config(100, 5), &lineup, &CancelToken::new()).unwrap();
    for i in 0..lineup.len() {
        for (score, baseline) in results.scores(i).iter().zip(results.baselines()) {
            assert!(score <= baseline);
        }
    }
}

#[test]
fn test_cancel_mid_run_returns_partial_results() {
    let cancel = CancelToken::new();
    let lineup = default_lineup();
    let trigger = cancel.clone();
    let worker = std::thread::spawn(move || {
        run_simulation(
            &SimConfig {
                iterations: 2_000_000,
                seed: Some(1),
                ..Default::default()
            },
            &lineup,
            &cancel,
        )
    });
    std::thread::sleep(std::time::Duration::from_millis(50));
    trigger.cancel();

    let results = worker.join().unwrap().unwrap();
    assert!(results.was_cancelled());
    assert!(results.games_played() < 2_000_000);
    // every strategy has a score for every finished game
    for i in 0..results.strategy_names().len() {
        assert_eq!(results.scores(i).len(), results.games_played());
    }
}

#[test]
fn test_invalid_configuration() {
    let lineup = default_lineup();
    for bad in [
        SimConfig {
            rounds: 0,
            ..Default::default()
        },
        SimConfig {
            iterations: 0,
            ..Default::default()
        },
    ] {
        let err = run_simulation(&bad, &lineup, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }
}

#[test]
fn test_report_from_lineup_file() {
    let json = r#"[
        {"name": "Cautious", "kind": "constant", "threshold": 150},
        {"name": "Greedy", "kind": "constant", "threshold": 2500},
        {"name": "Schedule", "kind": "round_tiers",
         "tiers": [{"through_round": 10, "threshold": 300}, {"through_round": 20, "threshold": 600}]}
    ]"#;
    let lineup = lineup_from_json(json).unwrap();
    let results = run_simulation(&config(200, 8), &lineup, &CancelToken::new()).unwrap();
    let report = SimReport::from_results(&results, None).unwrap();

    assert_eq!(report.strategies.len(), 3);
    let cautious = report.summary("Cautious").unwrap();
    let greedy = report.summary("Greedy").unwrap();
    assert!(cautious.bank_events > greedy.bank_events);
    assert!(cautious.mean > 0.0);
    assert!(report.to_text().contains("Schedule"));
}

#[test]
fn test_exploration_end_to_end() {
    let report = run_exploration(
        &ExploreConfig {
            games: 300,
            seed: Some(12),
            ..Default::default()
        },
        &Strategy::two_stage(),
        &CancelToken::new(),
    )
    .unwrap();
    assert_eq!(report.games_played, 300);
    assert!(report.games_kept > 0);
    assert!(report.avg_score <= report.avg_baseline);
}
