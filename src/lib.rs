//! # movie-stats - Descriptive Statistics for Curated Movie Lists
//!
//! movie-stats loads a curated list of roughly a hundred movie records
//! (rank, title, year, rating, votes, duration) and derives descriptive
//! statistics from it: decade and band histograms, top-N rankings, a
//! persisted summary artifact, console tables, PNG charts and written reports.
//!
//! ## Quick Start
//!
//! ```no_run
//! use movie_stats::analyser::logic::{load_collection, summarize};
//! use std::path::Path;
//!
//! # fn example() -> movie_stats::error::Result<()> {
//! let movies = load_collection(Path::new("data/top_100_indian_movies.json"))?;
//! let stats = summarize(movies.records())?;
//! println!("{} movies, average rating {}", stats.total_count, stats.average_rating);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: loading, bucketing, ranking and summary engines
//! - [`report`]: console tables, charts, Markdown and spreadsheet output
//! - [`config`]: paths and tunables for a run
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing subscriber setup
//! - [`utils`]: number and label formatting
//!
//! ## Key Concepts
//!
//! ### Immutable Records
//!
//! A [`MovieCollection`](analyser::logic::MovieCollection) is never modified
//! after loading. Every engine borrows the records and returns a fresh view,
//! so rankings hold references into the collection rather than copies.
//!
//! ### Deterministic Tie-Breaks
//!
//! Sorting is stable and extreme-value lookups keep the first record in input
//! order, so repeated runs over the same file always name the same movies.

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod utils;
