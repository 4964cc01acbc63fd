//! Bucketing engine: decade, per-year, rating-band and vote-band histograms.
//!
//! Bands are fixed, non-overlapping and half-open (`lower <= v < upper`) except
//! the top band, which has no upper bound. A value matching no band is skipped
//! without signalling: the dataset's selection criteria are expected to keep
//! every record inside the defined bands.

use super::types::{BandCount, MovieRecord};
use std::collections::BTreeMap;
use std::fmt;

/// A named numeric range used to bucket a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band<T> {
    pub label: &'static str,
    pub lower: T,
    /// Exclusive upper bound; `None` for the open-ended top band.
    pub upper: Option<T>,
}

impl<T: PartialOrd + Copy> Band<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.lower && self.upper.is_none_or(|upper| value < upper)
    }
}

pub const RATING_BANDS: [Band<f64>; 4] = [
    Band {
        label: "9.0+",
        lower: 9.0,
        upper: None,
    },
    Band {
        label: "8.5-8.9",
        lower: 8.5,
        upper: Some(9.0),
    },
    Band {
        label: "8.0-8.4",
        lower: 8.0,
        upper: Some(8.5),
    },
    Band {
        label: "7.8-7.9",
        lower: 7.8,
        upper: Some(8.0),
    },
];

pub const VOTE_BANDS: [Band<u64>; 4] = [
    Band {
        label: "500K+",
        lower: 500_000,
        upper: None,
    },
    Band {
        label: "100K-499K",
        lower: 100_000,
        upper: Some(500_000),
    },
    Band {
        label: "50K-99K",
        lower: 50_000,
        upper: Some(100_000),
    },
    Band {
        label: "10K-49K",
        lower: 10_000,
        upper: Some(50_000),
    },
];

/// Counts records per decade (`floor(year / 10) * 10`), ascending by decade.
///
/// Only decades that actually occur are present.
pub fn decade_histogram(records: &[MovieRecord]) -> BTreeMap<i32, usize> {
    records.iter().fold(BTreeMap::new(), |mut acc, record| {
        *acc.entry(record.decade()).or_insert(0) += 1;
        acc
    })
}

/// Counts records per release year, ascending by year.
pub fn year_histogram(records: &[MovieRecord]) -> BTreeMap<i32, usize> {
    records.iter().fold(BTreeMap::new(), |mut acc, record| {
        *acc.entry(record.year).or_insert(0) += 1;
        acc
    })
}

/// Counts ratings per [`RATING_BANDS`] entry, in band order.
pub fn rating_band_histogram(records: &[MovieRecord]) -> Vec<BandCount> {
    band_histogram(records.iter().map(|r| r.rating), &RATING_BANDS, "rating")
}

/// Counts vote totals per [`VOTE_BANDS`] entry, in band order.
pub fn vote_band_histogram(records: &[MovieRecord]) -> Vec<BandCount> {
    band_histogram(records.iter().map(|r| r.votes), &VOTE_BANDS, "votes")
}

fn band_histogram<T, I>(values: I, bands: &[Band<T>], field: &str) -> Vec<BandCount>
where
    T: PartialOrd + Copy + fmt::Display,
    I: IntoIterator<Item = T>,
{
    let counts = values
        .into_iter()
        .fold(vec![0_usize; bands.len()], |mut counts, value| {
            match bands
                .iter()
                .position(|band| band.contains(value))
                .and_then(|i| counts.get_mut(i))
            {
                Some(slot) => *slot += 1,
                None => tracing::debug!(field, %value, "value outside every band, skipped"),
            }
            counts
        });

    bands
        .iter()
        .zip(counts)
        .map(|(band, count)| BandCount {
            label: band.label.to_owned(),
            count,
        })
        .collect()
}
