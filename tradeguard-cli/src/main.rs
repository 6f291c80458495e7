//! TradeGuard CLI: tiered stop-loss calculator.
//!
//! Commands:
//! - `eval`: evaluate one trade (entry / current / highest)
//! - `watch`: evaluate a stream of prices from stdin, tracking the high
//! - `tiers`: print the tier rules
//! - `analyze`: send a strategy screenshot to the image analyzer
//! - `config show` / `config init`: inspect or write the settings file

mod report;
mod watch;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tradeguard_core::analysis::{GeminiAnalyzer, ImageAnalyzer, ImageInput};
use tradeguard_core::config::Settings;
use tradeguard_core::engine::{evaluate, TradeSnapshot};
use tradeguard_core::logging;
use tradeguard_core::watermark::HighWaterMark;

use crate::report::{format_evaluation, format_tiers, tier_reports, EvalReport};
use crate::watch::{run_watch, WatchOptions};

#[derive(Parser)]
#[command(
    name = "tradeguard",
    about = "TradeGuard CLI: tiered stop-loss and position sizing"
)]
struct Cli {
    /// Settings file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (overrides the settings file; RUST_LOG overrides both).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one trade.
    Eval {
        /// Entry price.
        #[arg(long, allow_hyphen_values = true)]
        entry: f64,

        /// Current price.
        #[arg(long, allow_hyphen_values = true)]
        current: f64,

        /// Highest price since entry. Defaults to the current price.
        #[arg(long, allow_hyphen_values = true)]
        high: Option<f64>,

        /// Use --high as given even when it is below --current.
        #[arg(long, default_value_t = false)]
        strict_high: bool,

        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Evaluate prices read from stdin, one per line.
    Watch {
        /// Entry price.
        #[arg(long, allow_hyphen_values = true)]
        entry: f64,

        /// Highest price seen before the stream starts.
        #[arg(long, allow_hyphen_values = true)]
        high: Option<f64>,

        /// Print one JSON object per line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the tier rules.
    Tiers {
        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Analyze a strategy screenshot with the image analyzer.
    Analyze {
        /// Image file (png, jpg, webp, gif).
        image: PathBuf,

        /// API key. Defaults to the environment variable named in the settings.
        #[arg(long)]
        api_key: Option<String>,

        /// Model override.
        #[arg(long)]
        model: Option<String>,
    },
    /// Settings file commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings as TOML.
    Show,
    /// Write default settings to the settings file.
    Init {
        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let settings = settings_for(&cli.command, &config_path)?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.logging.level.clone());
    logging::init_stderr(&level)?;

    match cli.command {
        Commands::Eval {
            entry,
            current,
            high,
            strict_high,
            json,
        } => run_eval(&settings, entry, current, high, strict_high, json),
        Commands::Watch { entry, high, json } => run_watch_cmd(&settings, entry, high, json),
        Commands::Tiers { json } => run_tiers(json),
        Commands::Analyze {
            image,
            api_key,
            model,
        } => run_analyze(&settings, &image, api_key, model),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(&settings, &config_path),
            ConfigAction::Init { force } => run_config_init(&config_path, force),
        },
    }
}

/// Settings for `command`. `config init` never reads the file it replaces,
/// so it can overwrite one that no longer parses.
fn settings_for(command: &Commands, path: &Path) -> Result<Settings> {
    if let Commands::Config {
        action: ConfigAction::Init { .. },
    } = command
    {
        return Ok(Settings::default());
    }
    Settings::load_or_default(path).with_context(|| format!("loading {}", path.display()))
}

fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => match Settings::default_path() {
            Some(path) => Ok(path),
            None => bail!("no config directory on this platform; pass --config"),
        },
    }
}

/// Highest price as the input form would hold it: defaults to current and is
/// raised to current unless `strict` is set.
fn effective_high(current: f64, high: Option<f64>, strict: bool) -> f64 {
    match high {
        None => current,
        Some(h) if strict => h,
        Some(h) => {
            let mut hwm = HighWaterMark::with_initial(h);
            let raised = hwm.observe(current).unwrap_or(h);
            if raised != h {
                tracing::info!(given = h, raised, "highest price raised to current price");
            }
            raised
        }
    }
}

fn run_eval(
    settings: &Settings,
    entry: f64,
    current: f64,
    high: Option<f64>,
    strict_high: bool,
    json: bool,
) -> Result<()> {
    let highest = effective_high(current, high, strict_high);
    let snapshot = TradeSnapshot::new(entry, current, highest);

    let Some(result) = evaluate(entry, current, highest) else {
        bail!("awaiting input: entry price must be non-zero and all prices finite");
    };

    if json {
        let report = EvalReport::new(snapshot, result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!(
            "{}",
            format_evaluation(&snapshot, &result, settings.display.precision)
        );
    }
    Ok(())
}

fn run_watch_cmd(settings: &Settings, entry: f64, high: Option<f64>, json: bool) -> Result<()> {
    let opts = WatchOptions {
        entry_price: entry,
        initial_high: high,
        json,
        precision: settings.display.precision,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let summary = run_watch(&opts, stdin.lock(), &mut stdout.lock(), &mut stderr.lock())?;

    if !json {
        eprintln!(
            "{} evaluated, {} skipped, {} stop trigger(s)",
            summary.evaluated, summary.skipped, summary.stop_triggers
        );
    }
    Ok(())
}

fn run_tiers(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&tier_reports())?);
    } else {
        print!("{}", format_tiers());
    }
    Ok(())
}

fn run_analyze(
    settings: &Settings,
    image: &Path,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let mut analyzer_settings = settings.analyzer.clone();
    if let Some(model) = model {
        analyzer_settings.model = model;
    }

    let Some(api_key) = api_key.or_else(|| analyzer_settings.api_key_from_env()) else {
        bail!(
            "an API key is required: pass --api-key or set {}",
            analyzer_settings.api_key_env
        );
    };

    let input = ImageInput::from_path(image)?;
    let analyzer = GeminiAnalyzer::new(&analyzer_settings)?;

    eprintln!(
        "Analyzing {} with {} ({})...",
        image.display(),
        analyzer.name(),
        analyzer_settings.model
    );
    let text = analyzer
        .analyze(&input, &api_key)
        .context("analysis failed")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}

fn run_config_show(settings: &Settings, path: &Path) -> Result<()> {
    let source = if path.exists() { "file" } else { "defaults" };
    println!("# {} ({source})", path.display());
    print!("{}", settings.to_toml()?);
    Ok(())
}

fn run_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Settings::default().save(path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
