//! SlideVars CLI — run custom property detection against a style snapshot.
//!
//! Commands:
//! - `scan` — auto-detect descriptors for one scope of a snapshot
//! - `classify` — classify raw values the way a scan would
//! - `init` — full initialization: scan, merge explicit config, initial writes
//! - `units` — print the unit range table in effect

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slidevars_core::{
    detect, scan_report, InitOptions, PanelConfig, ScanReport, SlideVars, StyleSnapshot,
    StyleWrite, UnitRangeTable, VarConfig, ROOT_SCOPE,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slidevars",
    about = "SlideVars CLI — infer slider and color controls from CSS custom properties"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Toml,
}

#[derive(Subcommand)]
enum Commands {
    /// Auto-detect descriptors for every custom property visible on a scope.
    Scan {
        /// Snapshot file (TOML, or JSON by extension).
        #[arg(long)]
        snapshot: PathBuf,

        /// Element selector to scan. Defaults to the document root.
        #[arg(long, default_value = ROOT_SCOPE)]
        scope: String,

        /// TOML file of per-unit range overrides (e.g. `px = { min = 0, max = 1200 }`).
        #[arg(long)]
        ranges: Option<PathBuf>,

        /// List properties that could not be classified.
        #[arg(long, default_value_t = false)]
        show_skipped: bool,

        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Classify raw values (e.g. `12px`, `#fff`, `auto`).
    Classify {
        #[arg(required = true)]
        values: Vec<String>,

        /// TOML file of per-unit range overrides.
        #[arg(long)]
        ranges: Option<PathBuf>,
    },
    /// Initialize a panel: detect, merge explicit config, write initial values.
    Init {
        /// Snapshot file (TOML, or JSON by extension).
        #[arg(long)]
        snapshot: PathBuf,

        /// Panel config file with `[options]` and `[vars]`.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Force auto-detection even when the config declares variables.
        #[arg(long, default_value_t = false)]
        auto: bool,

        /// Element selector to scan (overrides the config file).
        #[arg(long)]
        scope: Option<String>,

        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Print the unit range table, with optional overrides applied.
    Units {
        /// TOML file of per-unit range overrides.
        #[arg(long)]
        ranges: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            snapshot,
            scope,
            ranges,
            show_skipped,
            format,
        } => run_scan(&snapshot, &scope, ranges.as_deref(), show_skipped, format),
        Commands::Classify { values, ranges } => run_classify(&values, ranges.as_deref()),
        Commands::Init {
            snapshot,
            config,
            auto,
            scope,
            format,
        } => run_init(&snapshot, config.as_deref(), auto, scope, format),
        Commands::Units { ranges } => run_units(ranges.as_deref()),
    }
}

fn run_scan(
    snapshot_path: &Path,
    scope: &str,
    ranges_path: Option<&Path>,
    show_skipped: bool,
    format: Format,
) -> Result<()> {
    let report = scan_snapshot(snapshot_path, scope, ranges_path)?;

    if report.config.is_empty() {
        eprintln!("No CSS custom properties detected.");
    } else {
        println!("{}", render(&report.config, format)?);
    }

    if show_skipped {
        for (name, value) in &report.skipped {
            eprintln!("skipped {name}: {value}");
        }
    }
    Ok(())
}

fn scan_snapshot(
    snapshot_path: &Path,
    scope: &str,
    ranges_path: Option<&Path>,
) -> Result<ScanReport> {
    let snapshot = load_snapshot(snapshot_path)?;
    let overrides = ranges_path.map(load_ranges).transpose()?;

    let report = scan_report(&snapshot, scope, overrides.as_ref());
    if !report.scope_found {
        bail!("no element matches scope \"{scope}\" in {}", snapshot_path.display());
    }
    Ok(report)
}

fn run_classify(values: &[String], ranges_path: Option<&Path>) -> Result<()> {
    for line in classify_lines(values, ranges_path)? {
        println!("{line}");
    }
    Ok(())
}

fn classify_lines(values: &[String], ranges_path: Option<&Path>) -> Result<Vec<String>> {
    let overrides = ranges_path.map(load_ranges).transpose()?;
    let table = UnitRangeTable::resolve(overrides.as_ref());

    values
        .iter()
        .map(|raw| -> Result<String> {
            Ok(match detect(raw, &table) {
                Some(descriptor) => {
                    format!("{raw:>24}  {}", serde_json::to_string(&descriptor)?)
                }
                None => format!("{raw:>24}  undetected"),
            })
        })
        .collect()
}

/// What `init` prints: the final panel plus the writes it made.
#[derive(Debug, Serialize)]
struct InitOutput {
    open: bool,
    vars: VarConfig,
    values: BTreeMap<String, String>,
    writes: Vec<StyleWrite>,
    warnings: Vec<String>,
}

fn run_init(
    snapshot_path: &Path,
    config_path: Option<&Path>,
    auto: bool,
    scope: Option<String>,
    format: Format,
) -> Result<()> {
    let output = init_panel(snapshot_path, config_path, auto, scope)?;
    if output.vars.is_empty() {
        eprintln!("No CSS custom properties detected.");
    }
    println!("{}", render(&output, format)?);
    Ok(())
}

fn init_panel(
    snapshot_path: &Path,
    config_path: Option<&Path>,
    auto: bool,
    scope: Option<String>,
) -> Result<InitOutput> {
    let snapshot = load_snapshot(snapshot_path)?;
    let (explicit, mut options) = match config_path {
        Some(path) => PanelConfig::from_file(path)?.into_parts(),
        None => (Default::default(), InitOptions::default()),
    };
    options.auto |= auto;
    if scope.is_some() {
        options.scope = scope;
    }

    let mut vars = SlideVars::new(snapshot);
    let panel = vars.init(explicit, &options).clone();
    let host = vars.host();
    Ok(InitOutput {
        open: panel.is_open(),
        vars: panel.config().clone(),
        values: panel.values().clone(),
        writes: host.writes().to_vec(),
        warnings: host.warnings(),
    })
}

fn run_units(ranges_path: Option<&Path>) -> Result<()> {
    for line in unit_lines(ranges_path)? {
        println!("{line}");
    }
    Ok(())
}

fn unit_lines(ranges_path: Option<&Path>) -> Result<Vec<String>> {
    let overrides = ranges_path.map(load_ranges).transpose()?;
    let table = UnitRangeTable::resolve(overrides.as_ref());

    let mut lines = vec![format!("{:<8} {:>10} {:>10} {:>8}", "UNIT", "MIN", "MAX", "STEP")];
    for (unit, range) in table.iter() {
        let unit = if unit.is_empty() { "(none)" } else { unit };
        let step = range
            .step
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!("{unit:<8} {:>10} {:>10} {step:>8}", range.min, range.max));
    }
    Ok(lines)
}

fn load_snapshot(path: &Path) -> Result<StyleSnapshot> {
    let snapshot = StyleSnapshot::from_file(path)?;
    tracing::debug!(path = %path.display(), "snapshot loaded");
    Ok(snapshot)
}

fn load_ranges(path: &Path) -> Result<UnitRangeTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read ranges file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parse ranges file {}", path.display()))
}

fn render<T: Serialize + ?Sized>(value: &T, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Toml => toml::to_string_pretty(value)?,
    })
}
