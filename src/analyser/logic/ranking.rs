//! Ranking engine: top-N and floor-filtered views over a collection.
//!
//! All sorts are stable, so records comparing equal keep their input order.
//! That is what makes the ranked output reproducible run to run.

use super::types::{MovieRecord, RankField, SortOrder};
use std::cmp::Ordering;

/// Compares two records on `field`, ascending.
pub fn compare_by(field: RankField, a: &MovieRecord, b: &MovieRecord) -> Ordering {
    match field {
        RankField::Rating => a.rating.total_cmp(&b.rating),
        RankField::Votes => a.votes.cmp(&b.votes),
        RankField::Year => a.year.cmp(&b.year),
    }
}

/// Returns the first `n` records after a stable sort on `field`.
///
/// Fewer than `n` records yields all of them; `n == 0` yields none.
pub fn top_n(
    records: &[MovieRecord],
    field: RankField,
    n: usize,
    order: SortOrder,
) -> Vec<&MovieRecord> {
    let mut ranked: Vec<&MovieRecord> = records.iter().collect();
    sort_stable(&mut ranked, field, order);
    ranked.truncate(n);
    ranked
}

/// Records with `year >= min_year`, in input order.
pub fn filter_by_year_floor(records: &[MovieRecord], min_year: i32) -> Vec<&MovieRecord> {
    records.iter().filter(|r| r.year >= min_year).collect()
}

/// The best-rated `n` records released in or after `min_year`.
pub fn recent_top(records: &[MovieRecord], min_year: i32, n: usize) -> Vec<&MovieRecord> {
    let mut recent = filter_by_year_floor(records, min_year);
    sort_stable(&mut recent, RankField::Rating, SortOrder::Descending);
    recent.truncate(n);
    recent
}

fn sort_stable(records: &mut [&MovieRecord], field: RankField, order: SortOrder) {
    match order {
        SortOrder::Descending => records.sort_by(|a, b| compare_by(field, b, a)),
        SortOrder::Ascending => records.sort_by(|a, b| compare_by(field, a, b)),
    }
}
