use montyhall_core::{
    DuplicatePolicy, GameConfiguration, SweepBounds, SweepPlan, SweepSettings, SweepStop,
    sweep_configurations,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

#[test]
fn converged_configurations_are_all_tested_and_unique() {
    for seed in [1_u64, 2, 3, 4, 5] {
        let plan = SweepPlan::new(25, SweepBounds::new(4, 15, 6));
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let result = sweep_configurations(&plan, &mut rng).expect("sweep runs");

        assert_eq!(result.tested_count(), 25);
        let unique: HashSet<GameConfiguration> = result.converged.iter().copied().collect();
        assert_eq!(unique.len(), result.converged.len());
        for config in &result.converged {
            assert!(result.tested.contains_key(config), "{config} converged but untested");
        }
        for (config, [avg_switch, avg_stay]) in &result.tested {
            assert!(config.validate().is_ok());
            assert!((0.0..=1.0).contains(avg_switch));
            assert!((0.0..=1.0).contains(avg_stay));
        }
    }
}

#[test]
fn sweeps_replay_with_the_same_seed() {
    let plan = SweepPlan::new(10, SweepBounds::new(3, 9, 3));
    let a = sweep_configurations(&plan, &mut ChaCha20Rng::seed_from_u64(77)).expect("runs");
    let b = sweep_configurations(&plan, &mut ChaCha20Rng::seed_from_u64(77)).expect("runs");
    assert_eq!(a, b);
}

#[test]
fn loose_tolerance_marks_everything_converged() {
    let settings = SweepSettings {
        criteria: montyhall_core::ConvergenceCriteria::new(10, 100.0),
        ..SweepSettings::default()
    };
    let plan = SweepPlan::new(6, SweepBounds::new(2, 8, 2)).with_settings(settings);
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let result = sweep_configurations(&plan, &mut rng).expect("runs");
    assert_eq!(result.converged_count(), result.tested_count());
}

#[test]
fn resample_reaches_target_when_space_allows() {
    let settings = SweepSettings {
        duplicate_policy: DuplicatePolicy::Resample,
        ..SweepSettings::default()
    };
    // Six legal triples; ask for all of them.
    let bounds = SweepBounds::new(1, 5, 3);
    assert_eq!(bounds.legal_space_size(), 6);
    let plan = SweepPlan::new(6, bounds).with_settings(settings);
    let mut rng = ChaCha20Rng::seed_from_u64(10);
    let result = sweep_configurations(&plan, &mut rng).expect("runs");
    assert_eq!(result.stop, SweepStop::TargetReached);
    assert_eq!(result.tested_count(), 6);
}
