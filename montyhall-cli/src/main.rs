mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use logic::reports;
use logic::{
    PlotSize, SeedInfo, SettingsOverrides, SingleRunReport, SweepReport, render_rate_plot,
    resolve_seed_input, resolve_settings,
};
use montyhall_core::{
    ConvergenceCriteria, DuplicatePolicy, GameConfiguration, MontyHallError, SweepBounds,
    SweepPlan, SweepSettings, expected_win_rates, simulate_and_evaluate, sweep_configurations,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored summary for the terminal
    Console,
    /// Pretty-printed JSON
    Json,
    /// Markdown summary with tables
    Markdown,
    /// Per-trial rates (single run) or per-configuration averages (sweep)
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicateMode {
    /// Skip an already-tested configuration and draw again
    Resample,
    /// End the sweep at the first already-tested configuration
    Stop,
}

impl From<DuplicateMode> for DuplicatePolicy {
    fn from(mode: DuplicateMode) -> Self {
        match mode {
            DuplicateMode::Resample => Self::Resample,
            DuplicateMode::Stop => Self::Stop,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "montyhall", version)]
#[command(
    about = "Simulate the generalized Monty Hall problem (k prizes, m doors, n reveals) and search for configurations where switching stops helping"
)]
struct Args {
    /// Winning doors (upper bound for k with --monte_carlo)
    #[arg(value_name = "K")]
    k: u32,

    /// Total doors (upper bound for m with --monte_carlo)
    #[arg(value_name = "M")]
    m: u32,

    /// Doors revealed before switching (upper bound for n with --monte_carlo)
    #[arg(value_name = "N")]
    n: u32,

    /// Trials per strategy, or distinct configurations to test with --monte_carlo
    #[arg(value_name = "N_ITER")]
    n_iter: usize,

    /// Sweep random configurations instead of simulating one
    #[arg(short = 'm', long = "monte_carlo")]
    monte_carlo: bool,

    /// Plot running win rates against trials (single run only)
    #[arg(short = 'p', long)]
    plot: bool,

    /// Seed for the random stream (integer, 0x-hex, or "random")
    #[arg(long)]
    seed: Option<String>,

    /// Leading running rates ignored when averaging
    #[arg(long)]
    warmup: Option<usize>,

    /// Largest gap in percentage points still counted as converged
    #[arg(long)]
    tolerance: Option<f64>,

    /// Trials per strategy for each swept configuration
    #[arg(long)]
    trials_per_config: Option<usize>,

    /// What a sweep does when it draws an already-tested configuration
    #[arg(long, value_enum)]
    on_duplicate: Option<DuplicateMode>,

    /// JSON file with sweep settings; command-line flags take precedence
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Plot width in characters
    #[arg(long, default_value_t = 72)]
    plot_width: usize,

    /// Plot height in characters
    #[arg(long, default_value_t = 20)]
    plot_height: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            warmup: self.warmup,
            tolerance: self.tolerance,
            trials_per_config: self.trials_per_config,
            duplicate_policy: self.on_duplicate.map(DuplicatePolicy::from),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// A validated unit of work; nothing touches the output target until one exists.
enum Job {
    Single {
        config: GameConfiguration,
        criteria: ConvergenceCriteria,
    },
    Sweep(SweepPlan),
}

impl Job {
    fn prepare(args: &Args, settings: SweepSettings) -> Result<Self> {
        if args.monte_carlo {
            let plan = SweepPlan::new(args.n_iter, SweepBounds::new(args.k, args.m, args.n))
                .with_settings(settings);
            plan.validate().context("invalid sweep request")?;
            return Ok(Self::Sweep(plan));
        }

        let config = GameConfiguration::new(args.k, args.m, args.n)
            .context("cannot simulate the requested configuration")?;
        let criteria = settings.criteria;
        criteria
            .validate()
            .context("invalid convergence settings")?;
        if args.n_iter == 0 {
            return Err(MontyHallError::ZeroTrials.into());
        }
        if args.n_iter <= criteria.warmup {
            return Err(MontyHallError::InsufficientData {
                len: args.n_iter,
                warmup: criteria.warmup,
            })
            .context("too few trials for the warm-up window");
        }
        Ok(Self::Single { config, criteria })
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = resolve_settings(args.settings.as_deref(), args.overrides())
        .context("could not load sweep settings")?;
    let seed = resolve_seed_input(args.seed.as_deref())?;
    log::info!("seed {} ({:?})", seed.seed, seed.source);
    let job = Job::prepare(args, settings)?;

    let mut output_target = OutputTarget::new(args.output.clone())?;
    if output_target.is_file() {
        colored::control::set_override(false);
    }

    match job {
        Job::Single { config, criteria } => {
            run_single(args, config, criteria, seed, &mut output_target)?;
        }
        Job::Sweep(plan) => {
            if args.plot {
                log::warn!("--plot is ignored with --monte_carlo");
            }
            run_sweep(args, plan, seed, &mut output_target)?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

fn run_single(
    args: &Args,
    config: GameConfiguration,
    criteria: ConvergenceCriteria,
    seed: SeedInfo,
    output_target: &mut OutputTarget,
) -> Result<()> {
    let mut rng = seed.rng();
    let (run, verdict) = simulate_and_evaluate(args.n_iter, &config, &criteria, &mut rng)
        .with_context(|| format!("simulation of {config} over {} trials failed", args.n_iter))?;
    let expected = expected_win_rates(&config)?;
    let report = SingleRunReport::new(seed, criteria, &run, verdict, expected);

    let out = output_target.writer();
    match args.report {
        ReportFormat::Console => reports::generate_single_console_report(out, &report)?,
        ReportFormat::Json => reports::generate_single_json_report(out, &report)?,
        ReportFormat::Markdown => reports::generate_single_markdown_report(out, &report)?,
        ReportFormat::Csv => reports::generate_single_csv_report(out, &report)?,
    }

    if args.plot {
        render_rate_plot(out, &run, PlotSize::new(args.plot_width, args.plot_height))?;
    }
    Ok(())
}

fn run_sweep(
    args: &Args,
    plan: SweepPlan,
    seed: SeedInfo,
    output_target: &mut OutputTarget,
) -> Result<()> {
    let mut rng = seed.rng();
    let result = sweep_configurations(&plan, &mut rng).context("parameter sweep failed")?;
    let report = SweepReport::new(seed, plan, result);

    let out = output_target.writer();
    match args.report {
        ReportFormat::Console => reports::generate_sweep_console_report(out, &report)?,
        ReportFormat::Json => reports::generate_sweep_json_report(out, &report)?,
        ReportFormat::Markdown => reports::generate_sweep_markdown_report(out, &report)?,
        ReportFormat::Csv => reports::generate_sweep_csv_report(out, &report)?,
    }
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
