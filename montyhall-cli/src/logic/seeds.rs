use anyhow::{Result, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

/// Where the seed for a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    Provided,
    Entropy,
}

/// Seed metadata carried into reports so a run can be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedInfo {
    pub seed: u64,
    pub source: SeedSource,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self {
            seed,
            source: SeedSource::Provided,
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            seed: rand::random(),
            source: SeedSource::Entropy,
        }
    }

    #[must_use]
    pub fn rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(self.seed)
    }
}

/// Resolve the `--seed` argument into a concrete seed.
///
/// Accepts decimal integers (negative values use their magnitude), `0x`
/// hexadecimal, and the keywords `random` / `entropy`. A missing token also
/// draws from entropy.
pub fn resolve_seed_input(token: Option<&str>) -> Result<SeedInfo> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(SeedInfo::from_entropy());
    };

    if token.eq_ignore_ascii_case("random") || token.eq_ignore_ascii_case("entropy") {
        return Ok(SeedInfo::from_entropy());
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(SeedInfo::from_numeric(value.unsigned_abs()));
    }

    if let Ok(value) = token.parse::<u64>() {
        return Ok(SeedInfo::from_numeric(value));
    }

    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        && let Ok(value) = u64::from_str_radix(hex.replace('_', "").as_str(), 16)
    {
        return Ok(SeedInfo::from_numeric(value));
    }

    bail!("Unrecognized seed token: {token}");
}
