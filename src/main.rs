//! # mqprep
//!
//! Command-line front end for preparing MaxQuant output for analysis.
//!
//! ## Usage
//!
//! ```bash
//! # Infer or load the design, validate, clean and store the settings
//! mqprep prepare --dir /data/run_42 --output cleaned.tsv
//!
//! # Inspect the replicate map without rewriting settings
//! mqprep design --dir /data/run_42 --json
//!
//! # Consistency check only, exits with 1 on failure
//! mqprep check --dir /data/run_42
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity(), cli.loglevel())?;
    cli::dispatch(cli)
}
