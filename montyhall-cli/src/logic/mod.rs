pub mod plot;
pub mod reports;
pub mod seeds;
pub mod settings;

pub use plot::{PlotSize, render_rate_plot};
pub use reports::{SingleRunReport, SweepReport};
pub use seeds::{SeedInfo, resolve_seed_input};
pub use settings::{SettingsOverrides, resolve_settings};
