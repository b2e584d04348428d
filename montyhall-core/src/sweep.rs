//! Monte Carlo search of the (k, m, n) space for configurations where
//! switching and staying win equally often.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::GameConfiguration;
use crate::convergence::{ConvergenceCriteria, ConvergenceVerdict, evaluate_convergence};
use crate::error::{MontyHallError, Result};
use crate::simulation::run_simulation;

/// Reaction to drawing a configuration that was already evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Skip the duplicate and draw again.
    #[default]
    Resample,
    /// End the sweep and keep what has been collected.
    Stop,
}

/// Per-configuration tunables for a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSettings {
    #[serde(default = "SweepSettings::default_trials_per_config")]
    pub trials_per_config: usize,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    #[serde(default)]
    pub criteria: ConvergenceCriteria,
}

impl SweepSettings {
    const fn default_trials_per_config() -> usize {
        100
    }

    /// # Errors
    ///
    /// Returns [`MontyHallError::ZeroTrials`], [`MontyHallError::InvalidTolerance`],
    /// or [`MontyHallError::InsufficientData`] when a configuration could never
    /// produce enough post-warm-up rates.
    pub fn validate(&self) -> Result<()> {
        if self.trials_per_config == 0 {
            return Err(MontyHallError::ZeroTrials);
        }
        self.criteria.validate()?;
        if self.trials_per_config <= self.criteria.warmup {
            return Err(MontyHallError::InsufficientData {
                len: self.trials_per_config,
                warmup: self.criteria.warmup,
            });
        }
        Ok(())
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            trials_per_config: Self::default_trials_per_config(),
            duplicate_policy: DuplicatePolicy::default(),
            criteria: ConvergenceCriteria::default(),
        }
    }
}

/// Inclusive upper bounds for each sampled coordinate; every lower bound is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepBounds {
    pub k_max: u32,
    pub m_max: u32,
    pub n_max: u32,
}

impl SweepBounds {
    #[must_use]
    pub const fn new(k_max: u32, m_max: u32, n_max: u32) -> Self {
        Self {
            k_max,
            m_max,
            n_max,
        }
    }

    /// # Errors
    ///
    /// Returns [`MontyHallError::InvalidBounds`] when any bound is zero and
    /// [`MontyHallError::NoLegalConfiguration`] when no triple in range is legal.
    pub fn validate(&self) -> Result<()> {
        if self.k_max == 0 || self.m_max == 0 || self.n_max == 0 {
            return Err(MontyHallError::InvalidBounds {
                k_max: self.k_max,
                m_max: self.m_max,
                n_max: self.n_max,
            });
        }
        if self.legal_space_size() == 0 {
            return Err(MontyHallError::NoLegalConfiguration {
                k_max: self.k_max,
                m_max: self.m_max,
                n_max: self.n_max,
            });
        }
        Ok(())
    }

    /// Largest `k` and `n` that can appear in a legal triple; both need `m >= k + n + 1`.
    fn reachable_k_max(&self) -> u32 {
        self.k_max.min(self.m_max.saturating_sub(2))
    }

    fn reachable_n_max(&self) -> u32 {
        self.n_max.min(self.m_max.saturating_sub(2))
    }

    /// Number of legal triples with `1 <= k <= k_max`, `1 <= m <= m_max`, `1 <= n <= n_max`.
    ///
    /// For fixed `k` with `spare = m_max - k`, `n = 1..=t` (`t = min(n_max, spare - 1)`)
    /// each admits `spare - n` values of `m`. The sum over `k` is split where `t`
    /// stops being `n_max`, and each half is summed in closed form.
    #[must_use]
    pub fn legal_space_size(&self) -> u64 {
        let k_top = u128::from(self.reachable_k_max());
        if k_top == 0 {
            return 0;
        }
        let m = u128::from(self.m_max);
        let n = u128::from(self.n_max);

        // k = 1..=k_full keep t = n_max.
        let k_full = k_top.min(m.saturating_sub(1).saturating_sub(n));
        let full = n * (k_full * m - k_full * (k_full + 1) / 2) - k_full * n * (n + 1) / 2;

        // Remaining k contribute C(spare, 2) each, spare running over m - k_top..=m - k_full - 1.
        let partial = if k_top > k_full {
            choose3(m - k_full) - choose3(m - k_top)
        } else {
            0
        };
        u64::try_from(full + partial).unwrap_or(u64::MAX)
    }

    /// Draw each coordinate uniformly; the result may still be illegal.
    ///
    /// `k` and `n` are drawn only up to the values a legal triple can reach, so
    /// every legal triple stays equally likely. Callers validate the bounds first.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameConfiguration {
        GameConfiguration {
            k: rng.gen_range(1..=self.reachable_k_max().max(1)),
            m: rng.gen_range(1..=self.m_max.max(1)),
            n: rng.gen_range(1..=self.reachable_n_max().max(1)),
        }
    }
}

const fn choose3(x: u128) -> u128 {
    if x < 3 { 0 } else { x * (x - 1) * (x - 2) / 6 }
}

/// Everything needed to run one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub target_count: usize,
    pub bounds: SweepBounds,
    pub settings: SweepSettings,
}

impl SweepPlan {
    #[must_use]
    pub fn new(target_count: usize, bounds: SweepBounds) -> Self {
        Self {
            target_count,
            bounds,
            settings: SweepSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SweepSettings) -> Self {
        self.settings = settings;
        self
    }

    /// # Errors
    ///
    /// Returns [`MontyHallError::ZeroTarget`] or any bounds/settings error.
    pub fn validate(&self) -> Result<()> {
        if self.target_count == 0 {
            return Err(MontyHallError::ZeroTarget);
        }
        self.bounds.validate()?;
        self.settings.validate()
    }
}

/// Why a sweep stopped drawing configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SweepStop {
    TargetReached,
    DuplicateEncountered { config: GameConfiguration },
    SpaceExhausted,
}

impl SweepStop {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::TargetReached => "target count reached".to_string(),
            Self::DuplicateEncountered { config } => format!("duplicate draw of {config}"),
            Self::SpaceExhausted => "every legal configuration evaluated".to_string(),
        }
    }
}

/// Averages for every tested configuration plus the converged subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// `[avg_switch, avg_stay]` per configuration.
    #[serde(with = "tested_serde")]
    pub tested: BTreeMap<GameConfiguration, [f64; 2]>,
    /// Converged configurations in evaluation order.
    pub converged: Vec<GameConfiguration>,
    pub draws: usize,
    pub skipped_illegal: usize,
    pub skipped_duplicates: usize,
    pub legal_space: u64,
    pub stop: SweepStop,
}

impl SweepResult {
    fn empty(legal_space: u64) -> Self {
        Self {
            tested: BTreeMap::new(),
            converged: Vec::new(),
            draws: 0,
            skipped_illegal: 0,
            skipped_duplicates: 0,
            legal_space,
            stop: SweepStop::TargetReached,
        }
    }

    fn record(&mut self, config: GameConfiguration, verdict: &ConvergenceVerdict) {
        self.tested.insert(config, [verdict.avg_switch, verdict.avg_stay]);
        if verdict.converged && !self.converged.contains(&config) {
            self.converged.push(config);
        }
    }

    #[must_use]
    pub fn tested_count(&self) -> usize {
        self.tested.len()
    }

    #[must_use]
    pub fn converged_count(&self) -> usize {
        self.converged.len()
    }

    #[must_use]
    pub fn averages(&self, config: &GameConfiguration) -> Option<[f64; 2]> {
        self.tested.get(config).copied()
    }

    #[must_use]
    pub fn is_converged(&self, config: &GameConfiguration) -> bool {
        self.converged.contains(config)
    }
}

/// Simulate one configuration and classify it.
///
/// # Errors
///
/// Propagates simulation and convergence errors.
pub fn evaluate_configuration<R: Rng + ?Sized>(
    config: &GameConfiguration,
    settings: &SweepSettings,
    rng: &mut R,
) -> Result<ConvergenceVerdict> {
    let run = run_simulation(settings.trials_per_config, config, rng)?;
    evaluate_convergence(&run.switch, &run.stay, &settings.criteria)
}

/// Sample configurations until `target_count` distinct legal ones are evaluated,
/// the legal space runs out, or (under [`DuplicatePolicy::Stop`]) a duplicate is drawn.
///
/// # Errors
///
/// Returns a validation error for an unusable plan, including
/// [`MontyHallError::NoLegalConfiguration`] when the bounds admit no legal triple.
pub fn sweep_configurations<R: Rng + ?Sized>(
    plan: &SweepPlan,
    rng: &mut R,
) -> Result<SweepResult> {
    plan.validate()?;
    let legal_space = plan.bounds.legal_space_size();
    let mut result = SweepResult::empty(legal_space);

    let stop = loop {
        if result.tested_count() >= plan.target_count {
            break SweepStop::TargetReached;
        }
        if u64::try_from(result.tested_count()).unwrap_or(u64::MAX) >= legal_space {
            break SweepStop::SpaceExhausted;
        }

        let config = plan.bounds.sample(rng);
        result.draws += 1;
        if !GameConfiguration::is_legal(config.k, config.m, config.n) {
            result.skipped_illegal += 1;
            log::trace!("skipping illegal draw {config}");
            continue;
        }
        if result.tested.contains_key(&config) {
            match plan.settings.duplicate_policy {
                DuplicatePolicy::Resample => {
                    result.skipped_duplicates += 1;
                    continue;
                }
                DuplicatePolicy::Stop => break SweepStop::DuplicateEncountered { config },
            }
        }

        let verdict = evaluate_configuration(&config, &plan.settings, rng)?;
        log::debug!(
            "{config}: switch {:.4} stay {:.4} converged={}",
            verdict.avg_switch,
            verdict.avg_stay,
            verdict.converged
        );
        result.record(config, &verdict);
    };

    log::info!(
        "sweep stopped ({}): {} tested, {} converged, {} draws",
        stop.describe(),
        result.tested_count(),
        result.converged_count(),
        result.draws
    );
    result.stop = stop;
    Ok(result)
}

mod tested_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    use crate::config::GameConfiguration;

    #[derive(Serialize, Deserialize)]
    struct TestedRecord {
        #[serde(flatten)]
        config: GameConfiguration,
        avg_switch: f64,
        avg_stay: f64,
    }

    pub fn serialize<S>(
        tested: &BTreeMap<GameConfiguration, [f64; 2]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let records: Vec<TestedRecord> = tested
            .iter()
            .map(|(config, [avg_switch, avg_stay])| TestedRecord {
                config: *config,
                avg_switch: *avg_switch,
                avg_stay: *avg_stay,
            })
            .collect();
        records.serialize(serializer)
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<GameConfiguration, [f64; 2]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = Vec::<TestedRecord>::deserialize(deserializer)?;
        Ok(records
            .into_iter()
            .map(|record| (record.config, [record.avg_switch, record.avg_stay]))
            .collect())
    }
}
