//! Sweep settings from an optional JSON file plus command-line overrides.

use montyhall_core::{ConvergenceCriteria, DuplicatePolicy, SweepSettings};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsFileError {
    #[error("failed to read settings file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Values given on the command line; each one replaces the file/default value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsOverrides {
    pub warmup: Option<usize>,
    pub tolerance: Option<f64>,
    pub trials_per_config: Option<usize>,
    pub duplicate_policy: Option<DuplicatePolicy>,
}

impl SettingsOverrides {
    #[must_use]
    pub fn apply(self, mut settings: SweepSettings) -> SweepSettings {
        let ConvergenceCriteria {
            warmup,
            tolerance_percent_points,
        } = settings.criteria;
        settings.criteria = ConvergenceCriteria::new(
            self.warmup.unwrap_or(warmup),
            self.tolerance.unwrap_or(tolerance_percent_points),
        );
        if let Some(trials) = self.trials_per_config {
            settings.trials_per_config = trials;
        }
        if let Some(policy) = self.duplicate_policy {
            settings.duplicate_policy = policy;
        }
        settings
    }
}

/// Parse a settings file; missing fields take their defaults.
pub fn load_settings_file(path: &Path) -> Result<SweepSettings, SettingsFileError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsFileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SettingsFileError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// File (or defaults) first, then overrides.
pub fn resolve_settings(
    path: Option<&Path>,
    overrides: SettingsOverrides,
) -> Result<SweepSettings, SettingsFileError> {
    let base = match path {
        Some(path) => load_settings_file(path)?,
        None => SweepSettings::default(),
    };
    let settings = overrides.apply(base);
    log::debug!("resolved settings: {settings:?}");
    Ok(settings)
}
