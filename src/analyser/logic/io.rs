//! Loading movie collections and persisting summary artifacts.

use super::types::{MovieCollection, MovieRecord, SummaryStats};
use crate::error::{MovieStatsError, Result, ResultExt as _};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Largest magnitude below which every integral `f64` is exact (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Reads a JSON array of movie objects from `path`.
///
/// # Errors
///
/// Fails on unreadable files, invalid JSON, a non-array top level, or any
/// record missing a required field (see [`parse_collection`]).
pub fn load_collection(path: &Path) -> Result<MovieCollection> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read movie data from {}", path.display()))?;
    let collection = parse_collection(&json)?;
    tracing::info!(
        records = collection.len(),
        path = %path.display(),
        "Loaded movie collection"
    );
    Ok(collection)
}

/// Parses a JSON array of movie objects.
///
/// `year`, `rating` and `votes` must be present and numeric on every record;
/// `rank` and `title` are required too. `duration` defaults to empty, and
/// unknown keys are ignored.
///
/// # Errors
///
/// [`MovieStatsError::MalformedRecord`] for the first offending record,
/// [`MovieStatsError::Json`] for syntax errors.
pub fn parse_collection(json: &str) -> Result<MovieCollection> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(MovieStatsError::Other(
            "Expected a JSON array of movie records".to_owned(),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| record_from_value(index, item))
        .collect::<Result<Vec<_>>>()
        .map(MovieCollection::new)
}

fn record_from_value(index: usize, item: &Value) -> Result<MovieRecord> {
    let obj = item
        .as_object()
        .ok_or_else(|| MovieStatsError::malformed(index, "record", "is not a JSON object"))?;

    let year = whole_number(required(obj, index, "year")?)
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| MovieStatsError::malformed(index, "year", "must be an integer"))?;

    let rating = required(obj, index, "rating")?
        .as_f64()
        .filter(|r| r.is_finite())
        .ok_or_else(|| MovieStatsError::malformed(index, "rating", "must be a number"))?;

    let votes = whole_number(required(obj, index, "votes")?)
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| {
            MovieStatsError::malformed(index, "votes", "must be a non-negative integer")
        })?;

    let rank = whole_number(required(obj, index, "rank")?)
        .and_then(|r| u32::try_from(r).ok())
        .filter(|&r| r > 0)
        .ok_or_else(|| MovieStatsError::malformed(index, "rank", "must be a positive integer"))?;

    let title = required(obj, index, "title")?
        .as_str()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| MovieStatsError::malformed(index, "title", "must be non-empty text"))?
        .to_owned();

    let duration = match obj.get("duration") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(MovieRecord {
        rank,
        title,
        year,
        rating,
        votes,
        duration,
    })
}

/// Integer value of a JSON number, also accepting floats with no fractional
/// part (`2015.0`) as exported by spreadsheet and dataframe tools.
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT)
            .map(|f| f as i64)
    })
}

fn required<'a>(obj: &'a Map<String, Value>, index: usize, field: &str) -> Result<&'a Value> {
    obj.get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| MovieStatsError::malformed(index, field, "is missing"))
}

/// Writes the summary artifact as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_summary(stats: &SummaryStats, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(stats)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary to {}", path.display()))?;
    tracing::info!(path = %path.display(), "Summary statistics saved");
    Ok(())
}

/// Reads a previously saved summary artifact.
///
/// # Errors
///
/// Returns an error if the file is unreadable or does not match the
/// summary shape.
pub fn load_summary(path: &Path) -> Result<SummaryStats> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read summary from {}", path.display()))?;
    serde_json::from_str(&json).map_err(MovieStatsError::from)
}
