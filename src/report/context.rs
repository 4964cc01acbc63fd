use crate::analyser::logic::{
    BandCount, CollectionRanges, MovieCollection, MovieRecord, RankField, SortOrder,
    SummaryStats, YearlyStats, collection_ranges, decade_histogram, rating_band_histogram,
    recent_top, summarize, top_n, vote_band_histogram, year_histogram, yearly_stats,
};
use crate::config::ReportConfig;
use crate::error::{MovieStatsError, Result};
use std::collections::BTreeMap;

/// Every derived view a report needs, computed once from one collection.
#[derive(Debug)]
pub struct ReportData<'a> {
    pub config: &'a ReportConfig,
    pub records: &'a [MovieRecord],
    pub summary: SummaryStats,
    pub ranges: CollectionRanges,
    pub decades: BTreeMap<i32, usize>,
    pub years: BTreeMap<i32, usize>,
    pub yearly: Vec<YearlyStats>,
    pub rating_bands: Vec<BandCount>,
    pub vote_bands: Vec<BandCount>,
    pub top_by_rating: Vec<&'a MovieRecord>,
    pub top_by_votes: Vec<&'a MovieRecord>,
    /// Longer rating ranking used by the chart panel
    pub chart_top_by_rating: Vec<&'a MovieRecord>,
    pub recent: Vec<&'a MovieRecord>,
}

impl<'a> ReportData<'a> {
    /// Runs the bucketing, ranking and summary engines over `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`MovieStatsError::EmptyCollection`] for an empty collection.
    pub fn build(collection: &'a MovieCollection, config: &'a ReportConfig) -> Result<Self> {
        let records = collection.records();
        if records.is_empty() {
            return Err(MovieStatsError::empty("report assembly"));
        }

        Ok(Self {
            config,
            records,
            summary: summarize(records)?,
            ranges: collection_ranges(records)?,
            decades: decade_histogram(records),
            years: year_histogram(records),
            yearly: yearly_stats(records),
            rating_bands: rating_band_histogram(records),
            vote_bands: vote_band_histogram(records),
            top_by_rating: top_n(records, RankField::Rating, config.top_n, SortOrder::Descending),
            top_by_votes: top_n(records, RankField::Votes, config.top_n, SortOrder::Descending),
            chart_top_by_rating: top_n(
                records,
                RankField::Rating,
                config.chart_top_n,
                SortOrder::Descending,
            ),
            recent: recent_top(records, config.recent_year_floor, config.top_n),
        })
    }

    /// Replaces the computed summary with a previously persisted one.
    #[must_use]
    pub fn with_summary(mut self, summary: SummaryStats) -> Self {
        if summary.total_count != self.records.len() {
            tracing::warn!(
                persisted = summary.total_count,
                loaded = self.records.len(),
                "Persisted summary was computed over a different number of movies"
            );
        }
        self.summary = summary;
        self
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }
}

/// `count / total` as a percentage string with two decimals.
pub fn share(count: usize, total: usize) -> String {
    if total == 0 {
        "0.00%".to_owned()
    } else {
        format!("{:.2}%", (count as f64 / total as f64) * 100.0)
    }
}
