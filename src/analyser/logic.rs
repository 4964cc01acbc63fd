pub mod bucketing;
pub mod io;
pub mod ranking;
pub mod summary;
pub mod types;

pub use bucketing::{
    Band, RATING_BANDS, VOTE_BANDS, decade_histogram, rating_band_histogram, vote_band_histogram,
    year_histogram,
};
pub use io::{load_collection, load_summary, parse_collection, save_summary};
pub use ranking::{filter_by_year_floor, recent_top, top_n};
pub use summary::{collection_ranges, first_extreme, most_productive_year, summarize, yearly_stats};
pub use types::{
    BandCount, CollectionRanges, MovieCollection, MovieRecord, RankField, SortOrder, SummaryStats,
    YearRange, YearlyStats,
};

#[cfg(test)]
mod tests;
