//! Report assembly: turns aggregation results into console tables, charts,
//! a markdown document and spreadsheet sheets.
//!
//! [`ReportData::build`] runs every engine once; each renderer only reads the
//! assembled data and never recomputes statistics.
//!
//! ```no_run
//! use movie_stats::analyser::logic::load_collection;
//! use movie_stats::config::ReportConfig;
//! use movie_stats::report::{ReportData, markdown};
//!
//! # fn example() -> movie_stats::error::Result<()> {
//! let config = ReportConfig::default();
//! let movies = load_collection(&config.data_path)?;
//! let data = ReportData::build(&movies, &config)?;
//! let today = chrono::Local::now().date_naive();
//! markdown::write_markdown_report(&data, &config.reports_dir, today)?;
//! # Ok(())
//! # }
//! ```

pub mod charts;
pub mod console;
pub mod context;
pub mod markdown;
pub mod spreadsheet;

pub use context::ReportData;
