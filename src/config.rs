//! Report configuration.
//!
//! Every path and tunable is carried in [`ReportConfig`] and handed to the
//! loader and report assembler explicitly; nothing reads a module-level path.

use crate::error::{MovieStatsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Criteria the curated dataset was selected with.
///
/// Only used to describe the dataset in reports; the statistics never
/// enforce them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SelectionCriteria {
    pub origin: String,
    pub min_rating: f64,
    pub min_votes: u64,
    pub min_year: i32,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            origin: "Indian".to_owned(),
            min_rating: 7.8,
            min_votes: 10_000,
            min_year: 2000,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// JSON array of movie records
    pub data_path: PathBuf,
    /// Persisted summary artifact
    pub summary_path: PathBuf,
    pub charts_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub dataset_title: String,
    /// Length of the top-N tables in console and reports
    pub top_n: usize,
    /// Bars in the "top by rating" chart
    pub chart_top_n: usize,
    /// First year counted as "recent"
    pub recent_year_floor: i32,
    pub criteria: SelectionCriteria,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/top_100_indian_movies.json"),
            summary_path: PathBuf::from("data/movie_summary_stats.json"),
            charts_dir: PathBuf::from("visualizations"),
            reports_dir: PathBuf::from("reports"),
            dataset_title: "Top 100 Indian Movies".to_owned(),
            top_n: 10,
            chart_top_n: 15,
            recent_year_floor: 2020,
            criteria: SelectionCriteria::default(),
        }
    }
}

impl ReportConfig {
    fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(MovieStatsError::Config("top_n must be at least 1".to_owned()));
        }
        if self.chart_top_n == 0 {
            return Err(MovieStatsError::Config(
                "chart_top_n must be at least 1".to_owned(),
            ));
        }
        if self.dataset_title.trim().is_empty() {
            return Err(MovieStatsError::Config(
                "dataset_title must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Loads configuration from `path`, or returns the defaults when no path is given.
///
/// Missing keys in the file fall back to their defaults.
///
/// # Errors
///
/// Returns [`MovieStatsError::Config`] if the file cannot be read, is not
/// valid JSON, or holds invalid values.
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        MovieStatsError::Config(format!("Failed to read {}: {e}", path.display()))
    })?;
    let config: ReportConfig = serde_json::from_str(&content).map_err(|e| {
        MovieStatsError::Config(format!("Failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Loaded report configuration");
    Ok(config)
}

/// Writes `config` as pretty JSON.
///
/// # Errors
///
/// Returns an error if the parent directory or file cannot be written.
pub fn save_config(config: &ReportConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
