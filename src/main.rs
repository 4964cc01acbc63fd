//! # movie-stats Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging (stderr + rolling files)
//!   └─> Execute the subcommand
//! ```
//!
//! ## Usage
//!
//! ```bash
//! movie-stats analyze --data data/top_100_indian_movies.json
//! movie-stats report --out-dir reports
//! movie-stats summary
//! movie-stats init-config movie-stats.json
//! ```
//!
//! Analysis output goes to stdout; diagnostics go to stderr and the log files.
//! Set `RUST_LOG=debug` to see skipped values and per-file writes.

#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let log_dir = movie_stats::logging::init(cli.log_dir.as_deref())?;
    tracing::debug!(
        log_file = %movie_stats::logging::current_log_path(&log_dir).display(),
        "movie-stats {} starting",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = cli::run_command(cli) {
        tracing::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}
