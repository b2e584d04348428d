use montyhall_core::{
    ConvergenceCriteria, GameConfiguration, RunningRates, Strategy, evaluate_convergence,
    expected_win_rates, run_simulation, run_trial,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SAMPLE_SIZE: usize = 10_000;
const TOLERANCE: f64 = 0.03;

fn observed_rate(config: &GameConfiguration, strategy: Strategy, rng: &mut SmallRng) -> f64 {
    let mut wins = 0usize;
    for _ in 0..SAMPLE_SIZE {
        if run_trial(config, strategy, rng).expect("legal configuration") {
            wins += 1;
        }
    }
    let wins = f64::from(u32::try_from(wins).expect("count fits"));
    wins / f64::from(u32::try_from(SAMPLE_SIZE).expect("sample size fits"))
}

#[test]
fn classic_game_rewards_switching() {
    let mut rng = SmallRng::seed_from_u64(0xC1A5);
    let config = GameConfiguration::classic();
    let switch = observed_rate(&config, Strategy::Switch, &mut rng);
    let stay = observed_rate(&config, Strategy::Stay, &mut rng);
    assert!(
        (switch - 2.0 / 3.0).abs() <= TOLERANCE,
        "switch rate drifted: observed {switch:.4}"
    );
    assert!(
        (stay - 1.0 / 3.0).abs() <= TOLERANCE,
        "stay rate drifted: observed {stay:.4}"
    );
}

#[test]
fn no_reveal_gives_switching_no_edge() {
    let mut rng = SmallRng::seed_from_u64(0x0DD);
    let config = GameConfiguration::new(1, 3, 0).expect("legal");
    let switch = observed_rate(&config, Strategy::Switch, &mut rng);
    let stay = observed_rate(&config, Strategy::Stay, &mut rng);
    assert!((switch - 1.0 / 3.0).abs() <= TOLERANCE, "switch {switch:.4}");
    assert!((stay - 1.0 / 3.0).abs() <= TOLERANCE, "stay {stay:.4}");
}

#[test]
fn generalized_rates_track_closed_form() {
    let mut rng = SmallRng::seed_from_u64(0xBEEF);
    for (k, m, n) in [(2, 5, 1), (1, 10, 8), (3, 10, 4), (2, 4, 1), (4, 12, 0)] {
        let config = GameConfiguration::new(k, m, n).expect("legal");
        let expected = expected_win_rates(&config).expect("legal");
        let switch = observed_rate(&config, Strategy::Switch, &mut rng);
        let stay = observed_rate(&config, Strategy::Stay, &mut rng);
        assert!(
            (switch - expected.switch).abs() <= TOLERANCE,
            "{config}: switch {switch:.4} vs expected {:.4}",
            expected.switch
        );
        assert!(
            (stay - expected.stay).abs() <= TOLERANCE,
            "{config}: stay {stay:.4} vs expected {:.4}",
            expected.stay
        );
    }
}

#[test]
fn running_rates_rederive_from_final_counts() {
    let mut rng = SmallRng::seed_from_u64(42);
    let run = run_simulation(SAMPLE_SIZE, &GameConfiguration::classic(), &mut rng)
        .expect("simulation runs");
    for rates in [&run.switch, &run.stay] {
        assert_eq!(rates.len(), SAMPLE_SIZE);
        assert!(rates.values().iter().all(|rate| (0.0..=1.0).contains(rate)));
        // Every step either adds a win or not, so wins-so-far is recoverable.
        let mut previous_wins = 0.0;
        for (index, rate) in rates.values().iter().enumerate() {
            let trials = f64::from(u32::try_from(index + 1).expect("fits"));
            let wins = (rate * trials).round();
            let step = wins - previous_wins;
            assert!(step.abs() < 1e-9 || (step - 1.0).abs() < 1e-9, "step {step} at {index}");
            previous_wins = wins;
        }
    }
    assert!((run.switch.final_rate() - 2.0 / 3.0).abs() <= TOLERANCE);
}

#[test]
fn running_rates_replay_from_raw_outcomes() {
    let config = GameConfiguration::new(2, 7, 2).expect("legal");
    let run = run_simulation(2_000, &config, &mut SmallRng::seed_from_u64(99))
        .expect("simulation runs");

    // Same seed, same draw order: every switch trial first, then every stay trial.
    let mut rng = SmallRng::seed_from_u64(99);
    let mut replay = |strategy| {
        let outcomes: Vec<bool> = (0..2_000)
            .map(|_| run_trial(&config, strategy, &mut rng).expect("legal configuration"))
            .collect();
        RunningRates::from_outcomes(outcomes)
    };
    let switch = replay(Strategy::Switch);
    let stay = replay(Strategy::Stay);

    assert_eq!(switch, run.switch);
    assert_eq!(stay, run.stay);
}

#[test]
fn long_classic_run_does_not_converge() {
    let mut rng = SmallRng::seed_from_u64(7);
    let run = run_simulation(SAMPLE_SIZE, &GameConfiguration::classic(), &mut rng)
        .expect("simulation runs");
    let verdict = evaluate_convergence(&run.switch, &run.stay, &ConvergenceCriteria::default())
        .expect("enough data");
    assert!(!verdict.converged);
    assert!(verdict.gap_percent_points() > 20.0);
}

#[test]
fn short_run_reports_insufficient_data() {
    let mut rng = SmallRng::seed_from_u64(9);
    let run = run_simulation(5, &GameConfiguration::classic(), &mut rng).expect("runs");
    let err = evaluate_convergence(&run.switch, &run.stay, &ConvergenceCriteria::default())
        .expect_err("five rates cannot outlast a warm-up of ten");
    assert_eq!(
        err,
        montyhall_core::MontyHallError::InsufficientData { len: 5, warmup: 10 }
    );
}
