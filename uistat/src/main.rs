//! # uistat
//!
//! A CLI tool for comparing two codebases during a UI framework migration.
//!
//! ## Overview
//!
//! uistat is built on top of uistatlib. It reads a TOML config naming two
//! frameworks and their source/test locations, then reports file counts,
//! line breakdowns and each framework's share of the total. Optionally it
//! also counts how often tracked modules are referenced in a bundler
//! module report.
//!
//! ## Usage
//!
//! ```bash
//! # Use ./stats.toml
//! uistat
//!
//! # Use another config, and list subdirectories
//! uistat --config configs/migration.toml --subdirectories
//!
//! # Print the report as JSON
//! uistat --output json
//!
//! # Only write the configured output files
//! uistat --silent
//! ```
//!
//! Set `RUST_LOG=debug` to see what is being walked and counted.

mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use log::{debug, info};
use render::OutputMode;
use serde::Serialize;
use uistatlib::{
    aggregate_module_usage, load_module_report, ModuleFilter, ModuleUsageReport, SlocClassifier,
    StatsAggregator, StatsConfig, StatsReport, Warning,
};

const DEFAULT_CONFIG: &str = "./stats.toml";

/// Settings after merging CLI flags into the config options
#[derive(Debug)]
struct Settings {
    config_path: PathBuf,
    subdirectories: bool,
    silent: bool,
    output: OutputMode,
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("uistat")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Compare file and LOC statistics between two codebases under migration")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .default_value(DEFAULT_CONFIG)
                .help("Path to the TOML config file"),
        )
        .arg(
            Arg::new("subdirectories")
                .short('s')
                .long("subdirectories")
                .action(ArgAction::SetTrue)
                .help("Include subdirectory listings"),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .action(ArgAction::SetTrue)
                .help("Do not print stats, only write output files"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["auto", "term", "text", "json"])
                .default_value("auto")
                .help("Format of the printed stats"),
        )
}

fn extract_settings(matches: &ArgMatches, config: &StatsConfig) -> Settings {
    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let output = matches
        .get_one::<String>("output")
        .map(|s| match s.as_str() {
            "json" => OutputMode::Json,
            "text" => OutputMode::Text,
            "term" => OutputMode::Term,
            _ => OutputMode::Auto,
        })
        .unwrap_or(OutputMode::Auto);

    Settings {
        config_path,
        subdirectories: config.options.subdirectories || matches.get_flag("subdirectories"),
        silent: config.options.silent || matches.get_flag("silent"),
        output,
    }
}

/// Write `value` as pretty JSON, creating the parent directory if needed.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Notice for a written file; goes to stderr in structured modes so stdout
/// stays a single document.
fn print_saved(path: &Path, settings: &Settings) {
    if settings.silent {
        return;
    }

    let notice = style(format!("Stats saved to file! - {}", path.display())).cyan();
    if settings.output.is_structured() {
        eprintln!("{}", notice);
    } else {
        println!("{}", notice);
    }
}

/// Count module usage if a module report is configured.
fn run_module_usage(
    config: &StatsConfig,
    timestamp: DateTime<Utc>,
    settings: &Settings,
) -> Result<()> {
    let Some(report_path) = &config.options.webpack_stats_file else {
        return Ok(());
    };

    let report = load_module_report(report_path)?;
    let filter = ModuleFilter::new(config.options.modules.clone().unwrap_or_default());
    let module_stats = aggregate_module_usage(&report, &filter, config.options.sort);
    info!("Tracked {} referenced modules", module_stats.len());

    if let Some(output) = &config.options.webpack_stats_output_filename {
        let usage = ModuleUsageReport {
            timestamp,
            module_stats,
        };
        write_json(output, &usage)?;
        print_saved(output, settings);
    }

    Ok(())
}

fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }

    for warning in warnings {
        eprintln!("{} {}", style("WARNING:").yellow(), warning);
    }
    eprintln!(
        "{}",
        style("Done with warnings! Scroll up for more info.").yellow()
    );
}

/// Write the stats file and the module usage report, if configured.
fn write_outputs(config: &StatsConfig, report: &StatsReport, settings: &Settings) -> Result<()> {
    if let Some(output) = &config.options.output_filename {
        write_json(output, report)?;
        print_saved(output, settings);
    }

    run_module_usage(config, report.timestamp, settings)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config_arg = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_CONFIG);
    let config = StatsConfig::load(config_arg)?;
    let settings = extract_settings(matches, &config);
    debug!("Settings: {:?}", settings);

    if !settings.silent && !settings.output.is_structured() {
        let heading = render::render_heading(
            &config.framework1.name,
            &config.framework2.name,
            settings.output,
        )
        .map_err(|e| anyhow!("{e}"))?;
        println!("{}\n", heading.trim_end());
    }

    let options = config
        .run_options()
        .with_subdirectories(settings.subdirectories);
    let mut aggregator = StatsAggregator::new(&SlocClassifier, options);
    let report = aggregator
        .build_report(&config, Utc::now())
        .with_context(|| format!("while processing {}", settings.config_path.display()))?;

    if !settings.silent {
        let rendered =
            render::render_report(&report, settings.output).map_err(|e| anyhow!("{e}"))?;
        println!("{}", rendered.trim_end());
    }

    let written = write_outputs(&config, &report, &settings);

    print_warnings(aggregator.warnings());

    written
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
