use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single movie entry as supplied by the curated dataset.
///
/// Records are immutable once loaded; every engine borrows them and returns
/// freshly built views.
#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct MovieRecord {
    /// 1-based position as provided by the source data (never recomputed).
    pub rank: u32,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub votes: u64,
    /// Free-form runtime text such as `"2h 30m"`. Opaque to the statistics.
    pub duration: String,
}

impl MovieRecord {
    pub fn decade(&self) -> i32 {
        self.year.div_euclid(10) * 10
    }
}

/// Ordered, immutable sequence of movie records in input order.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct MovieCollection {
    records: Vec<MovieRecord>,
}

impl MovieCollection {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<MovieRecord>> for MovieCollection {
    fn from(records: Vec<MovieRecord>) -> Self {
        Self::new(records)
    }
}

/// Field a ranking is computed over.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum RankField {
    Rating,
    Votes,
    Year,
}

impl RankField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Votes => "votes",
            Self::Year => "year",
        }
    }
}

#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

/// Count of records falling into one named band.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct BandCount {
    pub label: String,
    pub count: usize,
}

/// Inclusive `(min, max)` year pair.
///
/// Persisted as the string `"<min>-<max>"` so existing consumers of the
/// summary file keep working.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for YearRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Skip a leading sign so "-50-2000" still splits on the separator.
        let split_at = s
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| format!("year range '{s}' is not in the form MIN-MAX"))?;
        let (min, max) = s.split_at(split_at);
        let min = min
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid minimum year in '{s}': {e}"))?;
        let max = max
            .strip_prefix('-')
            .unwrap_or(max)
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid maximum year in '{s}': {e}"))?;
        Ok(Self { min, max })
    }
}

impl Serialize for YearRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Scalar aggregates over a whole collection.
///
/// Field names on the wire match the persisted summary artifact exactly.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct SummaryStats {
    #[serde(rename = "total_movies")]
    pub total_count: usize,
    #[serde(rename = "avg_rating")]
    pub average_rating: f64,
    pub median_rating: f64,
    #[serde(rename = "avg_votes")]
    pub average_votes: u64,
    pub median_votes: u64,
    pub year_range: YearRange,
    pub most_productive_year: i32,
    #[serde(rename = "highest_rated_movie")]
    pub highest_rated_title: String,
    #[serde(rename = "most_voted_movie")]
    pub most_voted_title: String,
    #[serde(rename = "newest_movie")]
    pub newest_title: String,
    #[serde(rename = "oldest_movie")]
    pub oldest_title: String,
}

/// Min/max of each numeric field.
#[derive(Clone, Copy, Serialize, PartialEq, Debug)]
pub struct CollectionRanges {
    pub years: (i32, i32),
    pub ratings: (f64, f64),
    pub votes: (u64, u64),
}

/// Per-year aggregates used by the timeline view.
#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct YearlyStats {
    pub year: i32,
    pub movie_count: usize,
    pub avg_rating: f64,
    pub avg_votes: f64,
}
