use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use movie_stats::analyser::logic::{load_collection, load_summary, save_summary, summarize};
use movie_stats::config::{ReportConfig, load_config, save_config};
use movie_stats::report::{ReportData, charts, console, markdown, spreadsheet};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "movie-stats",
    about = "Descriptive statistics and reports for curated movie lists"
)]
pub struct Cli {
    /// Path to a JSON configuration file. Built-in defaults are used when omitted.
    #[arg(long, global = true, env = "MOVIE_STATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for log files. Defaults to the platform data directory.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full analysis, render charts and save the summary artifact
    Analyze {
        /// Movie dataset (JSON array). Overrides `data_path` from the config.
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Where to write the summary JSON. Overrides `summary_path`.
        #[arg(long)]
        summary_out: Option<PathBuf>,

        /// Output directory for PNG charts. Overrides `charts_dir`.
        #[arg(long)]
        charts_dir: Option<PathBuf>,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },
    /// Write the Markdown report and the Excel workbook
    Report {
        /// Movie dataset (JSON array). Overrides `data_path` from the config.
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Persisted summary to reuse. Recomputed when the file does not exist.
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Output directory. Overrides `reports_dir`.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the summary statistics as JSON
    Summary {
        /// Movie dataset (JSON array). Overrides `data_path` from the config.
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

pub fn run_command(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Analyze {
            data,
            summary_out,
            charts_dir,
            no_charts,
        } => handle_analyze(&config, data, summary_out, charts_dir, no_charts),
        Commands::Report {
            data,
            summary,
            out_dir,
        } => handle_report(&config, data, summary, out_dir),
        Commands::Summary { data } => handle_summary(&config, data),
        Commands::InitConfig { path } => {
            save_config(&ReportConfig::default(), &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Default configuration written to {}", path.display());
            Ok(())
        }
    }
}

fn handle_analyze(
    config: &ReportConfig,
    data: Option<PathBuf>,
    summary_out: Option<PathBuf>,
    charts_dir: Option<PathBuf>,
    no_charts: bool,
) -> Result<()> {
    let data_path = data.unwrap_or_else(|| config.data_path.clone());
    let collection = load_collection(&data_path)
        .with_context(|| format!("Failed to load movies from {}", data_path.display()))?;
    let report = ReportData::build(&collection, config)?;

    println!("{}", console::render_analysis(&report));

    if no_charts {
        tracing::info!("Chart rendering skipped");
    } else {
        let charts_dir = charts_dir.unwrap_or_else(|| config.charts_dir.clone());
        let written = charts::render_charts(&report, &charts_dir)
            .with_context(|| format!("Failed to render charts into {}", charts_dir.display()))?;
        for path in written {
            println!("Chart saved: {}", path.display());
        }
    }

    let summary_path = summary_out.unwrap_or_else(|| config.summary_path.clone());
    save_summary(&report.summary, &summary_path)
        .with_context(|| format!("Failed to save summary to {}", summary_path.display()))?;
    println!("Summary statistics saved to {}\n", summary_path.display());
    println!("{}", console::render_summary(&report.summary));

    Ok(())
}

fn handle_report(
    config: &ReportConfig,
    data: Option<PathBuf>,
    summary: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let data_path = data.unwrap_or_else(|| config.data_path.clone());
    let collection = load_collection(&data_path)
        .with_context(|| format!("Failed to load movies from {}", data_path.display()))?;

    let mut report = ReportData::build(&collection, config)?;
    let summary_path = summary.unwrap_or_else(|| config.summary_path.clone());
    if summary_path.exists() {
        let persisted = load_summary(&summary_path)
            .with_context(|| format!("Failed to read summary {}", summary_path.display()))?;
        report = report.with_summary(persisted);
        tracing::info!(path = %summary_path.display(), "Using persisted summary");
    } else {
        tracing::info!(
            path = %summary_path.display(),
            "No persisted summary found, using freshly computed statistics"
        );
    }

    let out_dir = out_dir.unwrap_or_else(|| config.reports_dir.clone());
    let today = chrono::Local::now().date_naive();

    let readme = markdown::write_markdown_report(&report, &out_dir, today)
        .context("Failed to write Markdown report")?;
    println!("Markdown report saved: {}", readme.display());

    let workbook = spreadsheet::write_spreadsheet(&report, &out_dir, today)
        .context("Failed to write Excel report")?;
    println!("Excel report saved: {}", workbook.display());

    Ok(())
}

fn handle_summary(config: &ReportConfig, data: Option<PathBuf>) -> Result<()> {
    let data_path = data.unwrap_or_else(|| config.data_path.clone());
    let collection = load_collection(&data_path)
        .with_context(|| format!("Failed to load movies from {}", data_path.display()))?;
    let stats = summarize(collection.records())?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
