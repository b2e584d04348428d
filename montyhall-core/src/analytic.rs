//! Closed-form win probabilities (stay, switch, and the switching edge).

use serde::{Deserialize, Serialize};

use crate::config::GameConfiguration;
use crate::error::Result;
use crate::numbers::doors_to_f64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedRates {
    pub switch: f64,
    pub stay: f64,
}

impl ExpectedRates {
    /// How much switching adds, in percentage points.
    #[must_use]
    pub fn advantage_percent_points(&self) -> f64 {
        (self.switch - self.stay) * 100.0
    }
}

/// Stay wins with k/m; switch wins with k(m-1) / (m(m-1-n)).
///
/// # Errors
///
/// Returns [`crate::MontyHallError::InvalidConfiguration`] for illegal triples.
pub fn expected_win_rates(config: &GameConfiguration) -> Result<ExpectedRates> {
    config.validate()?;
    let k = doors_to_f64(config.k);
    let m = doors_to_f64(config.m);
    let pool = doors_to_f64(config.switch_pool());

    Ok(ExpectedRates {
        switch: k * (m - 1.0) / (m * pool),
        stay: k / m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_game_favours_switching() {
        let rates = expected_win_rates(&GameConfiguration::classic()).unwrap();
        assert!((rates.switch - 2.0 / 3.0).abs() < 1e-12);
        assert!((rates.stay - 1.0 / 3.0).abs() < 1e-12);
        assert!((rates.advantage_percent_points() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn no_reveal_means_no_edge() {
        let rates = expected_win_rates(&GameConfiguration { k: 3, m: 10, n: 0 }).unwrap();
        assert!((rates.switch - rates.stay).abs() < 1e-12);
    }

    #[test]
    fn illegal_configuration_has_no_rates() {
        assert!(expected_win_rates(&GameConfiguration { k: 2, m: 4, n: 2 }).is_err());
    }
}
