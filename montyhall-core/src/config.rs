//! Game configuration and strategy types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MontyHallError, Result};

/// A generalized Monty Hall setup: `k` winning doors among `m`, `n` revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameConfiguration {
    pub k: u32,
    pub m: u32,
    pub n: u32,
}

impl GameConfiguration {
    /// Build a configuration, rejecting triples that leave no door to switch to.
    ///
    /// # Errors
    ///
    /// Returns [`MontyHallError::InvalidConfiguration`] unless `k >= 1` and
    /// `m - n - k >= 1`.
    pub fn new(k: u32, m: u32, n: u32) -> Result<Self> {
        let config = Self { k, m, n };
        config.validate()?;
        Ok(config)
    }

    /// The one-prize, three-door, one-reveal game.
    #[must_use]
    pub const fn classic() -> Self {
        Self { k: 1, m: 3, n: 1 }
    }

    /// `k >= 1` and `m - n - k >= 1`, computed without underflow.
    #[must_use]
    pub const fn is_legal(k: u32, m: u32, n: u32) -> bool {
        let m = m as u64;
        let spent = n as u64 + k as u64;
        k >= 1 && m > spent
    }

    /// Check the invariant on an already-built value.
    ///
    /// # Errors
    ///
    /// Returns [`MontyHallError::InvalidConfiguration`] if the triple is illegal.
    pub const fn validate(&self) -> Result<()> {
        if Self::is_legal(self.k, self.m, self.n) {
            Ok(())
        } else {
            Err(MontyHallError::InvalidConfiguration {
                k: self.k,
                m: self.m,
                n: self.n,
            })
        }
    }

    /// Doors left to choose from after the guess and the reveal.
    #[must_use]
    pub const fn switch_pool(&self) -> u32 {
        self.m.saturating_sub(1).saturating_sub(self.n)
    }
}

impl fmt::Display for GameConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={} m={} n={}", self.k, self.m, self.n)
    }
}

/// What the contestant does once the host has opened the revealed doors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Switch,
    Stay,
}

impl Strategy {
    #[must_use]
    pub const fn from_switch_flag(switch: bool) -> Self {
        if switch { Self::Switch } else { Self::Stay }
    }

    #[must_use]
    pub const fn switches(self) -> bool {
        matches!(self, Self::Switch)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Stay => "stay",
        }
    }
}
