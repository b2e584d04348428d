use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use montyhall_core::{
    ConvergenceCriteria, ConvergenceVerdict, ExpectedRates, GameConfiguration, SimulationRun,
    SweepPlan, SweepResult,
};
use serde::Serialize;
use std::io::Write;

use super::seeds::SeedInfo;

/// Everything shown for a single-configuration run.
#[derive(Debug, Clone, Serialize)]
pub struct SingleRunReport<'a> {
    pub generated_at: String,
    pub seed: SeedInfo,
    pub config: GameConfiguration,
    pub trials: usize,
    pub criteria: ConvergenceCriteria,
    pub verdict: ConvergenceVerdict,
    pub expected: ExpectedRates,
    pub final_switch_rate: f64,
    pub final_stay_rate: f64,
    #[serde(skip)]
    pub run: &'a SimulationRun,
}

impl<'a> SingleRunReport<'a> {
    #[must_use]
    pub fn new(
        seed: SeedInfo,
        criteria: ConvergenceCriteria,
        run: &'a SimulationRun,
        verdict: ConvergenceVerdict,
        expected: ExpectedRates,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            seed,
            config: run.config,
            trials: run.trials(),
            criteria,
            verdict,
            expected,
            final_switch_rate: run.switch.final_rate(),
            final_stay_rate: run.stay.final_rate(),
            run,
        }
    }
}

/// Everything shown for a parameter sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub generated_at: String,
    pub seed: SeedInfo,
    pub plan: SweepPlan,
    pub result: SweepResult,
}

impl SweepReport {
    #[must_use]
    pub fn new(seed: SeedInfo, plan: SweepPlan, result: SweepResult) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            seed,
            plan,
            result,
        }
    }
}

fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn generate_single_console_report(
    out: &mut dyn Write,
    report: &SingleRunReport<'_>,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🎲 Monty Hall Simulation".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;
    writeln!(
        out,
        "Configuration: {} ({} trials per strategy, seed {})",
        report.config.to_string().bold(),
        report.trials,
        report.seed.seed
    )?;
    writeln!(
        out,
        "Average switch win rate: {}  (expected {})",
        percent(report.verdict.avg_switch).green(),
        percent(report.expected.switch)
    )?;
    writeln!(
        out,
        "Average stay win rate:   {}  (expected {})",
        percent(report.verdict.avg_stay).yellow(),
        percent(report.expected.stay)
    )?;
    writeln!(
        out,
        "Final running rates: switch {}, stay {}",
        percent(report.final_switch_rate),
        percent(report.final_stay_rate)
    )?;
    writeln!(
        out,
        "Gap: {:.2} pp (tolerance {:.2} pp, warm-up {} trials)",
        report.verdict.gap_percent_points(),
        report.criteria.tolerance_percent_points,
        report.criteria.warmup
    )?;
    let converged = if report.verdict.converged {
        "✅ converged".green()
    } else {
        "❌ not converged".red()
    };
    writeln!(out, "Converged: {converged}")?;
    Ok(())
}

pub fn generate_single_markdown_report(
    out: &mut dyn Write,
    report: &SingleRunReport<'_>,
) -> Result<()> {
    writeln!(out, "# Monty Hall Simulation Results\n")?;
    writeln!(out, "- **Configuration**: {}", report.config)?;
    writeln!(out, "- **Trials per strategy**: {}", report.trials)?;
    writeln!(out, "- **Seed**: {}", report.seed.seed)?;
    writeln!(out, "- **Generated**: {}\n", report.generated_at)?;
    writeln!(out, "| Strategy | Average win rate | Expected |")?;
    writeln!(out, "|----------|------------------|----------|")?;
    writeln!(
        out,
        "| Switch | {} | {} |",
        percent(report.verdict.avg_switch),
        percent(report.expected.switch)
    )?;
    writeln!(
        out,
        "| Stay | {} | {} |\n",
        percent(report.verdict.avg_stay),
        percent(report.expected.stay)
    )?;
    writeln!(
        out,
        "**Converged**: {} (gap {:.2} pp, tolerance {:.2} pp)",
        yes_no(report.verdict.converged),
        report.verdict.gap_percent_points(),
        report.criteria.tolerance_percent_points
    )?;
    Ok(())
}

/// One row per trial with both running rates.
pub fn generate_single_csv_report(
    out: &mut dyn Write,
    report: &SingleRunReport<'_>,
) -> Result<()> {
    writeln!(out, "trial,switch_rate,stay_rate")?;
    for (index, (switch, stay)) in report
        .run
        .switch
        .values()
        .iter()
        .zip(report.run.stay.values())
        .enumerate()
    {
        writeln!(out, "{},{switch:.6},{stay:.6}", index + 1)?;
    }
    Ok(())
}

pub fn generate_single_json_report(
    out: &mut dyn Write,
    report: &SingleRunReport<'_>,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_sweep_console_report(out: &mut dyn Write, report: &SweepReport) -> Result<()> {
    let result = &report.result;
    let bounds = report.plan.bounds;
    writeln!(out)?;
    writeln!(out, "{}", "🔎 Convergence Sweep".bright_cyan().bold())?;
    writeln!(out, "{}", "====================".cyan())?;
    writeln!(
        out,
        "Bounds: k <= {}, m <= {}, n <= {} ({} legal configurations)",
        bounds.k_max, bounds.m_max, bounds.n_max, result.legal_space
    )?;
    writeln!(
        out,
        "Target: {} configurations, {} trials each, seed {}",
        report.plan.target_count, report.plan.settings.trials_per_config, report.seed.seed
    )?;
    writeln!(
        out,
        "Tested: {} (draws {}, illegal skipped {}, duplicates skipped {})",
        result.tested_count(),
        result.draws,
        result.skipped_illegal,
        result.skipped_duplicates
    )?;
    writeln!(out, "Stopped: {}", result.stop.describe())?;
    writeln!(out)?;

    if result.converged.is_empty() {
        writeln!(out, "{}", "No convergent configurations found.".yellow())?;
    } else {
        writeln!(out, "{}", "Convergent configurations:".bold())?;
        for config in &result.converged {
            let [avg_switch, avg_stay] = result.averages(config).unwrap_or_default();
            writeln!(
                out,
                "  {} {:<18} switch {}  stay {}",
                "•".green(),
                config.to_string(),
                percent(avg_switch),
                percent(avg_stay)
            )?;
        }
    }
    writeln!(
        out,
        "Total convergent configurations: {}",
        result.converged_count().to_string().green().bold()
    )?;
    Ok(())
}

pub fn generate_sweep_markdown_report(out: &mut dyn Write, report: &SweepReport) -> Result<()> {
    let result = &report.result;
    let bounds = report.plan.bounds;
    writeln!(out, "# Monty Hall Convergence Sweep\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(
        out,
        "- **Bounds**: k <= {}, m <= {}, n <= {}",
        bounds.k_max, bounds.m_max, bounds.n_max
    )?;
    writeln!(out, "- **Seed**: {}", report.seed.seed)?;
    writeln!(out, "- **Tested**: {}", result.tested_count())?;
    writeln!(out, "- **Convergent**: {}", result.converged_count())?;
    writeln!(out, "- **Stopped**: {}\n", result.stop.describe())?;

    if result.tested.is_empty() {
        writeln!(out, "_No configurations tested._")?;
        return Ok(());
    }

    writeln!(out, "## Tested Configurations\n")?;
    writeln!(out, "| k | m | n | Switch | Stay | Converged |")?;
    writeln!(out, "|---|---|---|--------|------|-----------|")?;
    for (config, [avg_switch, avg_stay]) in &result.tested {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            config.k,
            config.m,
            config.n,
            percent(*avg_switch),
            percent(*avg_stay),
            if result.is_converged(config) { "✅" } else { "❌" }
        )?;
    }
    Ok(())
}

pub fn generate_sweep_csv_report(out: &mut dyn Write, report: &SweepReport) -> Result<()> {
    writeln!(out, "k,m,n,avg_switch,avg_stay,converged")?;
    for (config, [avg_switch, avg_stay]) in &report.result.tested {
        writeln!(
            out,
            "{},{},{},{avg_switch:.6},{avg_stay:.6},{}",
            config.k,
            config.m,
            config.n,
            report.result.is_converged(config)
        )?;
    }
    Ok(())
}

pub fn generate_sweep_json_report(out: &mut dyn Write, report: &SweepReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
