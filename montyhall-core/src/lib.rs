//! Monty Hall Simulation Engine
//!
//! Platform-agnostic core logic for the generalized Monty Hall problem: `k`
//! winning doors among `m`, with `n` goat doors opened before the contestant
//! may switch. This crate provides trials, running win rates, convergence
//! classification and parameter sweeps without any UI or output dependencies.
//!
//! All randomness is injected: every entry point takes `&mut impl Rng`, so a
//! seeded generator replays a run exactly.

pub mod analytic;
pub mod config;
pub mod convergence;
pub mod error;
pub mod numbers;
pub mod simulation;
pub mod sweep;
pub mod trial;

// Re-export commonly used types
pub use analytic::{ExpectedRates, expected_win_rates};
pub use config::{GameConfiguration, Strategy};
pub use convergence::{ConvergenceCriteria, ConvergenceVerdict, evaluate_convergence, evaluate_rates};
pub use error::{MontyHallError, Result};
pub use simulation::{RunningRates, SimulationRun, run_simulation};
pub use sweep::{
    DuplicatePolicy, SweepBounds, SweepPlan, SweepResult, SweepSettings, SweepStop,
    evaluate_configuration, sweep_configurations,
};
pub use trial::{DoorAssignment, run_trial, run_trial_with_flag};

/// Simulate one configuration and classify it in a single call.
///
/// # Errors
///
/// Returns an error if the configuration is illegal, `num_trials` is zero, or
/// the run is not longer than the warm-up window.
pub fn simulate_and_evaluate<R: rand::Rng + ?Sized>(
    num_trials: usize,
    config: &GameConfiguration,
    criteria: &ConvergenceCriteria,
    rng: &mut R,
) -> Result<(SimulationRun, ConvergenceVerdict)> {
    let run = run_simulation(num_trials, config, rng)?;
    let verdict = evaluate_convergence(&run.switch, &run.stay, criteria)?;
    Ok((run, verdict))
}
