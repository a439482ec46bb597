use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use mqprep::layout::{packaged_defaults_dir, AnalysisLayout};
use mqprep::pipeline::PipelineOptions;
use mqprep::settings::SettingsSource;

mod check;
mod design;
mod prepare;

/// mqprep - MaxQuant output preparation
#[derive(Parser)]
#[command(name = "mqprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Explicit log level (DEBUG, INFO, WARNING, ERROR or a numeric level),
    /// overrides -v
    #[arg(long, global = true, value_name = "LEVEL")]
    loglevel: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that works on a run directory
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run directory holding txt/proteinGroups.txt and txt/peptides.txt
    #[arg(short, long, value_name = "DIR")]
    dir: PathBuf,

    /// Settings document: a path, "default" for the packaged default, or
    /// "file" for the run's config/config.toml. Searched when omitted.
    #[arg(short, long, value_name = "PATH|default|file")]
    settings: Option<SettingsSource>,

    /// Directory with the default settings and name lists
    #[arg(long, value_name = "DIR")]
    defaults_dir: Option<PathBuf>,

    /// Samples have no replicates; every sample becomes its own experiment
    #[arg(long)]
    no_replicates: bool,
}

impl RunArgs {
    fn layout(&self) -> AnalysisLayout {
        let defaults_dir = self
            .defaults_dir
            .clone()
            .unwrap_or_else(packaged_defaults_dir);
        AnalysisLayout::new(&self.dir, defaults_dir)
    }

    fn source(&self) -> SettingsSource {
        self.settings.clone().unwrap_or_default()
    }

    fn options(&self) -> PipelineOptions {
        PipelineOptions {
            has_replicates: !self.no_replicates,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the design, validate, clean and store the settings
    Prepare {
        #[command(flatten)]
        run: RunArgs,

        /// Write the cleaned protein table to this TSV file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the resolved replicate map and its validation report
    Design {
        #[command(flatten)]
        run: RunArgs,

        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write an inferred design back to the run's settings
        #[arg(long)]
        persist: bool,
    },

    /// Check that both tables agree with the replicate map
    Check {
        #[command(flatten)]
        run: RunArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn loglevel(&self) -> Option<&str> {
        self.loglevel.as_deref()
    }
}

/// Map an explicit level name or numeric level to an env_logger filter
fn level_filter(level: &str) -> Result<&'static str> {
    if let Ok(numeric) = level.parse::<u32>() {
        return Ok(match numeric {
            0..=10 => "debug",
            11..=20 => "info",
            21..=30 => "warn",
            _ => "error",
        });
    }
    Ok(match level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        other => bail!("Unknown log level: {other}"),
    })
}

pub fn init_logging(verbosity: u8, loglevel: Option<&str>) -> Result<()> {
    let log_level = match loglevel {
        Some(level) => level_filter(level)?,
        None => match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        },
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    Ok(())
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Prepare { run, output } => prepare::run(run, output),
        Commands::Design { run, json, persist } => design::run(run, json, persist),
        Commands::Check { run } => check::run(run),
    }
}
