//! Plain-text analysis output built with the [`tabled`] crate.

use super::context::{ReportData, share};
use crate::analyser::logic::{BandCount, MovieRecord, SummaryStats};
use crate::utils::{fmt_decimal, fmt_thousands};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct CountRow {
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Movies")]
    count: usize,
    #[tabled(rename = "Percentage")]
    percentage: String,
}

#[derive(Debug, Clone, Tabled)]
struct MovieRow {
    #[tabled(rename = "Rank")]
    rank: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Votes")]
    votes: String,
}

impl From<&MovieRecord> for MovieRow {
    fn from(record: &MovieRecord) -> Self {
        Self {
            rank: record.rank,
            title: record.title.clone(),
            year: record.year,
            rating: format!("{}/10", fmt_decimal(record.rating)),
            votes: fmt_thousands(record.votes),
        }
    }
}

fn section(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!("{body}\n\n"));
}

fn movie_table(records: &[&MovieRecord]) -> String {
    if records.is_empty() {
        return "No movies match".to_owned();
    }
    Table::new(records.iter().map(|&r| MovieRow::from(r))).to_string()
}

fn band_table(bands: &[BandCount], total: usize) -> String {
    Table::new(bands.iter().map(|band| CountRow {
        range: band.label.clone(),
        count: band.count,
        percentage: share(band.count, total),
    }))
    .to_string()
}

/// Renders the full console analysis: ranges, distributions and rankings.
pub fn render_analysis(data: &ReportData<'_>) -> String {
    let total = data.total();
    let mut out = String::new();

    let title = format!("{} Analysis", data.config.dataset_title).to_uppercase();
    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!("Total movies analyzed: {total}\n"));
    out.push_str(&format!(
        "Year range: {} - {}\n",
        data.ranges.years.0, data.ranges.years.1
    ));
    out.push_str(&format!(
        "Rating range: {} - {}\n",
        fmt_decimal(data.ranges.ratings.0),
        fmt_decimal(data.ranges.ratings.1)
    ));
    out.push_str(&format!(
        "Vote range: {} - {}\n",
        fmt_thousands(data.ranges.votes.0),
        fmt_thousands(data.ranges.votes.1)
    ));
    out.push('\n');

    let decade_rows = data.decades.iter().map(|(decade, &count)| CountRow {
        range: format!("{decade}s"),
        count,
        percentage: share(count, total),
    });
    section(
        &mut out,
        "MOVIES BY DECADE",
        &Table::new(decade_rows).to_string(),
    );
    section(
        &mut out,
        "RATING DISTRIBUTION",
        &band_table(&data.rating_bands, total),
    );
    section(
        &mut out,
        "VOTE DISTRIBUTION",
        &band_table(&data.vote_bands, total),
    );
    section(
        &mut out,
        &format!("TOP {} BY RATING", data.top_by_rating.len()),
        &movie_table(&data.top_by_rating),
    );
    section(
        &mut out,
        &format!("TOP {} BY VOTES", data.top_by_votes.len()),
        &movie_table(&data.top_by_votes),
    );
    section(
        &mut out,
        &format!("MOST RECENT MOVIES ({}+)", data.config.recent_year_floor),
        &movie_table(&data.recent),
    );

    out
}

/// Renders the summary artifact as `Label: value` lines.
pub fn render_summary(summary: &SummaryStats) -> String {
    let lines = [
        ("Total Movies", summary.total_count.to_string()),
        ("Avg Rating", fmt_decimal(summary.average_rating)),
        ("Median Rating", fmt_decimal(summary.median_rating)),
        ("Avg Votes", summary.average_votes.to_string()),
        ("Median Votes", summary.median_votes.to_string()),
        ("Year Range", summary.year_range.to_string()),
        (
            "Most Productive Year",
            summary.most_productive_year.to_string(),
        ),
        ("Highest Rated Movie", summary.highest_rated_title.clone()),
        ("Most Voted Movie", summary.most_voted_title.clone()),
        ("Newest Movie", summary.newest_title.clone()),
        ("Oldest Movie", summary.oldest_title.clone()),
    ];

    let mut out = String::from("SUMMARY STATISTICS:\n");
    for (label, value) in lines {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use crate::analyser::logic::{parse_collection, summarize};
    use crate::config::ReportConfig;

    const SAMPLE: &str = r#"[
        {"rank": 1, "title": "A", "year": 2015, "rating": 9.2, "votes": 600000, "duration": "2h"},
        {"rank": 2, "title": "B", "year": 2005, "rating": 7.8, "votes": 12000, "duration": "3h"},
        {"rank": 3, "title": "C", "year": 2021, "rating": 8.0, "votes": 200000, "duration": "2h30m"}
    ]"#;

    #[test]
    fn test_render_analysis_sections() {
        let collection = parse_collection(SAMPLE).unwrap();
        let config = ReportConfig::default();
        let data = ReportData::build(&collection, &config).unwrap();
        let text = render_analysis(&data);

        assert!(text.contains("TOP 100 INDIAN MOVIES ANALYSIS"));
        assert!(text.contains("Year range: 2005 - 2021"));
        assert!(text.contains("Vote range: 12,000 - 600,000"));
        assert!(text.contains("2000s"));
        assert!(text.contains("8.5-8.9"));
        assert!(text.contains("500K+"));
        assert!(text.contains("33.33%"));
        assert!(text.contains("8.0/10"), "ratings keep one decimal");
        assert!(text.contains("MOST RECENT MOVIES (2020+)"));
        assert!(
            text.contains("=== TOP 3 BY RATING ==="),
            "caption counts the movies actually listed"
        );
        assert!(text.contains("=== TOP 3 BY VOTES ==="));
    }

    #[test]
    fn test_render_summary_lines() {
        let collection = parse_collection(SAMPLE).unwrap();
        let summary = summarize(collection.records()).unwrap();
        let text = render_summary(&summary);
        assert!(text.contains("Total Movies: 3"));
        assert!(text.contains("Year Range: 2005-2021"));
        assert!(text.contains("Highest Rated Movie: A"));
        assert!(text.contains("Oldest Movie: B"));
    }
}
