use thiserror::Error;

/// Errors raised when simulation invariants are violated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MontyHallError {
    #[error(
        "invalid configuration k={k} m={m} n={n}: need k >= 1 and m - n - k >= 1 so a door remains after the reveal"
    )]
    InvalidConfiguration { k: u32, m: u32, n: u32 },
    #[error(
        "insufficient data: {len} running rates do not exceed the warm-up window of {warmup} (use more trials than the warm-up)"
    )]
    InsufficientData { len: usize, warmup: usize },
    #[error("running rate sequences differ in length (switch {switch_len}, stay {stay_len})")]
    LengthMismatch { switch_len: usize, stay_len: usize },
    #[error("number of trials must be at least 1")]
    ZeroTrials,
    #[error("sweep target count must be at least 1")]
    ZeroTarget,
    #[error("sweep bounds must all be at least 1 (k_max={k_max} m_max={m_max} n_max={n_max})")]
    InvalidBounds { k_max: u32, m_max: u32, n_max: u32 },
    #[error(
        "no legal configuration exists with k <= {k_max}, m <= {m_max}, 1 <= n <= {n_max} (need m - n - k >= 1)"
    )]
    NoLegalConfiguration { k_max: u32, m_max: u32, n_max: u32 },
    #[error("tolerance must be a finite, non-negative number of percentage points (got {value})")]
    InvalidTolerance { value: f64 },
}

pub type Result<T> = std::result::Result<T, MontyHallError>;
