//! Summary statistics engine.
//!
//! Rounding convention: two-decimal values use half-away-from-zero
//! ([`f64::round`]); integer vote aggregates are truncated toward zero.
//!
//! Ties on an extreme value (highest rating, most votes, newest, oldest, most
//! productive year) resolve to the record seen first in input order.

use super::ranking::compare_by;
use super::types::{
    CollectionRanges, MovieRecord, RankField, SummaryStats, YearRange, YearlyStats,
};
use crate::error::{MovieStatsError, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Computes every scalar aggregate over `records`.
///
/// # Errors
///
/// Returns [`MovieStatsError::EmptyCollection`] when `records` is empty.
pub fn summarize(records: &[MovieRecord]) -> Result<SummaryStats> {
    let highest_rated = first_extreme(records, RankField::Rating, Ordering::Greater)
        .ok_or_else(|| MovieStatsError::empty("summarize"))?;
    let most_voted = first_extreme(records, RankField::Votes, Ordering::Greater)
        .ok_or_else(|| MovieStatsError::empty("summarize"))?;
    let newest = first_extreme(records, RankField::Year, Ordering::Greater)
        .ok_or_else(|| MovieStatsError::empty("summarize"))?;
    let oldest = first_extreme(records, RankField::Year, Ordering::Less)
        .ok_or_else(|| MovieStatsError::empty("summarize"))?;
    let most_productive_year =
        most_productive_year(records).ok_or_else(|| MovieStatsError::empty("summarize"))?;

    let ratings: Vec<f64> = records.iter().map(|r| r.rating).collect();
    let votes: Vec<u64> = records.iter().map(|r| r.votes).collect();

    let average_rating = mean(&ratings).ok_or_else(|| MovieStatsError::empty("summarize"))?;
    let median_rating =
        median_f64(&ratings).ok_or_else(|| MovieStatsError::empty("summarize"))?;
    let average_votes =
        mean_votes(&votes).ok_or_else(|| MovieStatsError::empty("summarize"))?;
    let median_votes =
        median_votes(&votes).ok_or_else(|| MovieStatsError::empty("summarize"))?;

    let stats = SummaryStats {
        total_count: records.len(),
        average_rating: round2(average_rating),
        median_rating: round2(median_rating),
        average_votes,
        median_votes,
        year_range: YearRange {
            min: oldest.year,
            max: newest.year,
        },
        most_productive_year,
        highest_rated_title: highest_rated.title.clone(),
        most_voted_title: most_voted.title.clone(),
        newest_title: newest.title.clone(),
        oldest_title: oldest.title.clone(),
    };

    tracing::debug!(
        total = stats.total_count,
        avg_rating = stats.average_rating,
        "Summary statistics computed"
    );
    Ok(stats)
}

/// Min/max of year, rating and votes.
///
/// # Errors
///
/// Returns [`MovieStatsError::EmptyCollection`] when `records` is empty.
pub fn collection_ranges(records: &[MovieRecord]) -> Result<CollectionRanges> {
    let extreme = |field, want| {
        first_extreme(records, field, want)
            .ok_or_else(|| MovieStatsError::empty("collection_ranges"))
    };

    Ok(CollectionRanges {
        years: (
            extreme(RankField::Year, Ordering::Less)?.year,
            extreme(RankField::Year, Ordering::Greater)?.year,
        ),
        ratings: (
            extreme(RankField::Rating, Ordering::Less)?.rating,
            extreme(RankField::Rating, Ordering::Greater)?.rating,
        ),
        votes: (
            extreme(RankField::Votes, Ordering::Less)?.votes,
            extreme(RankField::Votes, Ordering::Greater)?.votes,
        ),
    })
}

/// Movie count, mean rating and mean votes per release year, ascending.
pub fn yearly_stats(records: &[MovieRecord]) -> Vec<YearlyStats> {
    let groups = records.iter().fold(
        BTreeMap::<i32, (usize, f64, f64)>::new(),
        |mut acc, record| {
            let entry = acc.entry(record.year).or_insert((0, 0.0, 0.0));
            entry.0 += 1;
            entry.1 += record.rating;
            entry.2 += record.votes as f64;
            acc
        },
    );

    groups
        .into_iter()
        .map(|(year, (count, rating_sum, votes_sum))| YearlyStats {
            year,
            movie_count: count,
            avg_rating: round2(rating_sum / count as f64),
            avg_votes: round2(votes_sum / count as f64),
        })
        .collect()
}

/// First record in input order holding the extreme value of `field`.
///
/// `want` is [`Ordering::Greater`] for the maximum, [`Ordering::Less`] for
/// the minimum. A later record only wins when strictly better.
pub fn first_extreme(
    records: &[MovieRecord],
    field: RankField,
    want: Ordering,
) -> Option<&MovieRecord> {
    records.iter().reduce(|best, candidate| {
        if compare_by(field, candidate, best) == want {
            candidate
        } else {
            best
        }
    })
}

/// Year with the most records; ties go to the year encountered first.
pub fn most_productive_year(records: &[MovieRecord]) -> Option<i32> {
    let counts = records
        .iter()
        .fold(Vec::<(i32, usize)>::new(), |mut counts, record| {
            match counts.iter_mut().find(|(year, _)| *year == record.year) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.year, 1)),
            }
            counts
        });

    counts
        .into_iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(year, _)| year)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median_f64(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted.get(mid).copied()
    } else {
        let lower = sorted.get(mid.checked_sub(1)?)?;
        let upper = sorted.get(mid)?;
        Some((lower + upper) / 2.0)
    }
}

fn mean_votes(values: &[u64]) -> Option<u64> {
    if values.is_empty() {
        return None;
    }
    let total: u128 = values.iter().map(|&v| u128::from(v)).sum();
    u64::try_from(total / values.len() as u128).ok()
}

fn median_votes(values: &[u64]) -> Option<u64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted.get(mid).copied()
    } else {
        let lower = u128::from(*sorted.get(mid.checked_sub(1)?)?);
        let upper = u128::from(*sorted.get(mid)?);
        u64::try_from((lower + upper) / 2).ok()
    }
}
