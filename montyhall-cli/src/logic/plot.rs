//! Terminal line plot of running win rates against trial count.

use colored::Colorize;
use montyhall_core::SimulationRun;
use montyhall_core::numbers::{count_to_f64, round_to_index};
use std::io::{self, Write};

const SWITCH_GLYPH: char = '*';
const STAY_GLYPH: char = 'o';
const OVERLAP_GLYPH: char = '#';
const AXIS_LABEL_WIDTH: usize = 5;

/// Character-cell dimensions of the plotting area (axes excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSize {
    pub width: usize,
    pub height: usize,
}

impl PlotSize {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(2),
            height: height.max(3),
        }
    }
}

impl Default for PlotSize {
    fn default() -> Self {
        Self::new(72, 20)
    }
}

/// Plot cells, top row first; 100% at the top, 0% at the bottom.
#[must_use]
pub fn plot_grid(run: &SimulationRun, size: PlotSize) -> Vec<Vec<char>> {
    let mut grid = vec![vec![' '; size.width]; size.height];
    let trials = run.trials();
    if trials == 0 {
        return grid;
    }

    for (series, glyph) in [
        (run.switch.values(), SWITCH_GLYPH),
        (run.stay.values(), STAY_GLYPH),
    ] {
        for column in 0..size.width {
            let index = column * (trials - 1) / (size.width - 1);
            let Some(rate) = series.get(index) else {
                continue;
            };
            let from_top = (1.0 - rate.clamp(0.0, 1.0)) * count_to_f64(size.height - 1);
            let row = round_to_index(from_top, size.height - 1);
            let cell = &mut grid[row][column];
            *cell = if *cell == ' ' || *cell == glyph {
                glyph
            } else {
                OVERLAP_GLYPH
            };
        }
    }
    grid
}

/// Write the chart with axes and a legend.
pub fn render_rate_plot(out: &mut dyn Write, run: &SimulationRun, size: PlotSize) -> io::Result<()> {
    let grid = plot_grid(run, size);
    let last_row = size.height - 1;

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("📈 Win rate vs trials ({})", run.config).bright_cyan().bold()
    )?;
    for (row_index, row) in grid.iter().enumerate() {
        let label = if row_index == 0 {
            "100%".to_string()
        } else if row_index == last_row {
            "0%".to_string()
        } else if row_index * 2 == last_row {
            "50%".to_string()
        } else {
            String::new()
        };
        write!(out, "{label:>AXIS_LABEL_WIDTH$} |")?;
        for &cell in row {
            match cell {
                SWITCH_GLYPH => write!(out, "{}", cell.to_string().green())?,
                STAY_GLYPH => write!(out, "{}", cell.to_string().yellow())?,
                OVERLAP_GLYPH => write!(out, "{}", cell.to_string().cyan())?,
                _ => write!(out, "{cell}")?,
            }
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "{:>AXIS_LABEL_WIDTH$} +{}",
        "",
        "-".repeat(size.width)
    )?;
    let last_trial = run.trials().to_string();
    let gap = size.width.saturating_sub(1 + last_trial.len());
    writeln!(
        out,
        "{:>AXIS_LABEL_WIDTH$}  1{}{last_trial}",
        "",
        " ".repeat(gap)
    )?;
    writeln!(
        out,
        "{:>AXIS_LABEL_WIDTH$}  {} switch  {} stay  {} both   (x: trials, y: running win rate)",
        "",
        SWITCH_GLYPH.to_string().green(),
        STAY_GLYPH.to_string().yellow(),
        OVERLAP_GLYPH.to_string().cyan()
    )?;
    Ok(())
}
