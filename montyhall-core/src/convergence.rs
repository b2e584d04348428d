//! Decide whether switching still matters for a pair of running-rate series.

use serde::{Deserialize, Serialize};

use crate::error::{MontyHallError, Result};
use crate::numbers::count_to_f64;
use crate::simulation::RunningRates;

/// Warm-up and tolerance used to compare the two strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceCriteria {
    /// Leading running rates discarded before averaging.
    #[serde(default = "ConvergenceCriteria::default_warmup")]
    pub warmup: usize,
    /// Largest gap between the averages, in percentage points, still called converged.
    #[serde(default = "ConvergenceCriteria::default_tolerance")]
    pub tolerance_percent_points: f64,
}

impl ConvergenceCriteria {
    const fn default_warmup() -> usize {
        10
    }

    const fn default_tolerance() -> f64 {
        0.5
    }

    #[must_use]
    pub const fn new(warmup: usize, tolerance_percent_points: f64) -> Self {
        Self {
            warmup,
            tolerance_percent_points,
        }
    }

    /// # Errors
    ///
    /// Returns [`MontyHallError::InvalidTolerance`] for negative or non-finite tolerances.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance_percent_points.is_finite() && self.tolerance_percent_points >= 0.0 {
            Ok(())
        } else {
            Err(MontyHallError::InvalidTolerance {
                value: self.tolerance_percent_points,
            })
        }
    }
}

impl Default for ConvergenceCriteria {
    fn default() -> Self {
        Self {
            warmup: Self::default_warmup(),
            tolerance_percent_points: Self::default_tolerance(),
        }
    }
}

/// Averaged post-warm-up rates and the resulting classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceVerdict {
    pub avg_switch: f64,
    pub avg_stay: f64,
    pub converged: bool,
}

impl ConvergenceVerdict {
    /// Absolute gap between the averages in percentage points.
    #[must_use]
    pub fn gap_percent_points(&self) -> f64 {
        (self.avg_switch - self.avg_stay).abs() * 100.0
    }
}

/// Average both series past the warm-up and compare them.
///
/// # Errors
///
/// Returns [`MontyHallError::LengthMismatch`] when the series differ in length,
/// [`MontyHallError::InsufficientData`] when they are not longer than the
/// warm-up, and [`MontyHallError::InvalidTolerance`] for a bad tolerance.
pub fn evaluate_convergence(
    switch: &RunningRates,
    stay: &RunningRates,
    criteria: &ConvergenceCriteria,
) -> Result<ConvergenceVerdict> {
    evaluate_rates(switch.values(), stay.values(), criteria)
}

/// Slice form of [`evaluate_convergence`].
///
/// # Errors
///
/// Same as [`evaluate_convergence`].
pub fn evaluate_rates(
    switch: &[f64],
    stay: &[f64],
    criteria: &ConvergenceCriteria,
) -> Result<ConvergenceVerdict> {
    criteria.validate()?;
    if switch.len() != stay.len() {
        return Err(MontyHallError::LengthMismatch {
            switch_len: switch.len(),
            stay_len: stay.len(),
        });
    }
    if switch.len() <= criteria.warmup {
        return Err(MontyHallError::InsufficientData {
            len: switch.len(),
            warmup: criteria.warmup,
        });
    }

    let avg_switch = tail_mean(switch, criteria.warmup);
    let avg_stay = tail_mean(stay, criteria.warmup);
    let converged = (avg_switch - avg_stay).abs() * 100.0 <= criteria.tolerance_percent_points;

    Ok(ConvergenceVerdict {
        avg_switch,
        avg_stay,
        converged,
    })
}

fn tail_mean(values: &[f64], skip: usize) -> f64 {
    let tail = &values[skip..];
    tail.iter().sum::<f64>() / count_to_f64(tail.len())
}
