//! Repeated trials for both strategies, tracked as running win rates.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfiguration, Strategy};
use crate::error::{MontyHallError, Result};
use crate::numbers::ratio;
use crate::trial::run_trial;

/// Win fraction after each trial: element `i` is wins in trials `0..=i` over `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningRates {
    values: Vec<f64>,
    wins: usize,
}

impl RunningRates {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            wins: 0,
        }
    }

    /// Rebuild the sequence from raw trial outcomes.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut rates = Self::default();
        for won in outcomes {
            rates.record(won);
        }
        rates
    }

    /// Fold one more outcome into the running total.
    pub fn record(&mut self, won: bool) {
        if won {
            self.wins += 1;
        }
        let trials = self.values.len() + 1;
        self.values.push(ratio(self.wins, trials));
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub const fn wins(&self) -> usize {
        self.wins
    }

    /// Rate over every trial seen, or 0.0 before the first trial.
    #[must_use]
    pub fn final_rate(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// Running rates for one configuration under both strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub config: GameConfiguration,
    pub switch: RunningRates,
    pub stay: RunningRates,
}

impl SimulationRun {
    #[must_use]
    pub const fn rates(&self, strategy: Strategy) -> &RunningRates {
        match strategy {
            Strategy::Switch => &self.switch,
            Strategy::Stay => &self.stay,
        }
    }

    #[must_use]
    pub fn trials(&self) -> usize {
        self.switch.len()
    }
}

/// Play `num_trials` switching games, then `num_trials` independent staying games.
///
/// # Errors
///
/// Returns [`MontyHallError::ZeroTrials`] when `num_trials` is zero and
/// [`MontyHallError::InvalidConfiguration`] when `config` is illegal.
pub fn run_simulation<R: Rng + ?Sized>(
    num_trials: usize,
    config: &GameConfiguration,
    rng: &mut R,
) -> Result<SimulationRun> {
    if num_trials == 0 {
        return Err(MontyHallError::ZeroTrials);
    }
    config.validate()?;

    let switch = run_batch(num_trials, config, Strategy::Switch, rng)?;
    let stay = run_batch(num_trials, config, Strategy::Stay, rng)?;
    log::debug!(
        "simulated {config} over {num_trials} trials: switch {:.4}, stay {:.4}",
        switch.final_rate(),
        stay.final_rate()
    );

    Ok(SimulationRun {
        config: *config,
        switch,
        stay,
    })
}

fn run_batch<R: Rng + ?Sized>(
    num_trials: usize,
    config: &GameConfiguration,
    strategy: Strategy,
    rng: &mut R,
) -> Result<RunningRates> {
    let mut rates = RunningRates::with_capacity(num_trials);
    for _ in 0..num_trials {
        rates.record(run_trial(config, strategy, rng)?);
    }
    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn running_rates_follow_prefix_wins() {
        let rates = RunningRates::from_outcomes([true, false, false, true]);
        assert_eq!(rates.values(), &[1.0, 0.5, 1.0 / 3.0, 0.5]);
        assert_eq!(rates.wins(), 2);
        assert!((rates.final_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_rates_report_zero() {
        let rates = RunningRates::default();
        assert!(rates.is_empty());
        assert!(rates.final_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn simulation_produces_one_rate_per_trial() {
        let mut rng = SmallRng::seed_from_u64(11);
        let run = run_simulation(250, &GameConfiguration::classic(), &mut rng).unwrap();
        assert_eq!(run.trials(), 250);
        assert_eq!(run.switch.len(), 250);
        assert_eq!(run.stay.len(), 250);
        assert!(
            run.switch
                .values()
                .iter()
                .chain(run.stay.values())
                .all(|rate| (0.0..=1.0).contains(rate))
        );
        assert_eq!(run.rates(Strategy::Stay), &run.stay);
    }

    #[test]
    fn simulation_rejects_zero_trials_and_bad_config() {
        let mut rng = SmallRng::seed_from_u64(12);
        assert_eq!(
            run_simulation(0, &GameConfiguration::classic(), &mut rng),
            Err(MontyHallError::ZeroTrials)
        );
        let bad = GameConfiguration { k: 1, m: 3, n: 2 };
        assert_eq!(
            run_simulation(10, &bad, &mut rng),
            Err(MontyHallError::InvalidConfiguration { k: 1, m: 3, n: 2 })
        );
    }

    #[test]
    fn seeded_simulations_are_reproducible() {
        let config = GameConfiguration { k: 2, m: 6, n: 1 };
        let a = run_simulation(100, &config, &mut SmallRng::seed_from_u64(5)).unwrap();
        let b = run_simulation(100, &config, &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }
}
