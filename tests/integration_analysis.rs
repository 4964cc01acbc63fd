//! Integration tests for the full analysis workflow
//!
//! These tests load the fixture files, run every engine and write the
//! artifacts into temporary directories.

use movie_stats::analyser::logic::{
    RankField, SortOrder, decade_histogram, load_collection, load_summary, rating_band_histogram,
    recent_top, save_summary, summarize, top_n, vote_band_histogram,
};
use movie_stats::config::ReportConfig;
use movie_stats::error::MovieStatsError;
use movie_stats::report::{ReportData, markdown, spreadsheet};
use std::path::Path;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("testdata").join(name)
}

#[test]
fn test_summarize_fixture() {
    let movies = load_collection(&fixture("movies.json")).unwrap();
    assert_eq!(movies.len(), 10, "Should load 10 records");

    let stats = summarize(movies.records()).unwrap();
    assert_eq!(stats.total_count, 10);
    assert!((stats.average_rating - 8.44).abs() < 1e-9);
    assert!((stats.median_rating - 8.4).abs() < 1e-9);
    assert_eq!(stats.average_votes, 210_700);
    assert_eq!(stats.median_votes, 112_500);
    assert_eq!(stats.year_range.to_string(), "2001-2021");
    assert_eq!(stats.most_productive_year, 2015);
    assert_eq!(
        stats.highest_rated_title, "Alpha",
        "Rating tie between Alpha and Echo resolves to the earlier record"
    );
    assert_eq!(stats.most_voted_title, "Alpha");
    assert_eq!(stats.newest_title, "Delta", "First 2021 movie in input order");
    assert_eq!(stats.oldest_title, "Foxtrot");
}

#[test]
fn test_histograms_fixture() {
    let movies = load_collection(&fixture("movies.json")).unwrap();
    let records = movies.records();

    let decades: Vec<(i32, usize)> = decade_histogram(records).into_iter().collect();
    assert_eq!(decades, vec![(2000, 3), (2010, 5), (2020, 2)]);

    let ratings: Vec<usize> = rating_band_histogram(records)
        .iter()
        .map(|b| b.count)
        .collect();
    assert_eq!(ratings, vec![2, 2, 4, 2]);

    let votes: Vec<usize> = vote_band_histogram(records)
        .iter()
        .map(|b| b.count)
        .collect();
    assert_eq!(votes, vec![2, 3, 2, 3]);
}

#[test]
fn test_rankings_fixture() {
    let movies = load_collection(&fixture("movies.json")).unwrap();
    let records = movies.records();

    let top: Vec<&str> = top_n(records, RankField::Rating, 3, SortOrder::Descending)
        .iter()
        .map(|m| m.title.as_str())
        .collect();
    assert_eq!(top, vec!["Alpha", "Echo", "India, Part 1"]);

    let recent: Vec<&str> = recent_top(records, 2020, 10)
        .iter()
        .map(|m| m.title.as_str())
        .collect();
    assert_eq!(recent, vec!["Delta", "Hotel"]);
}

#[test]
fn test_summary_artifact_roundtrip_on_disk() {
    let movies = load_collection(&fixture("movies.json")).unwrap();
    let stats = summarize(movies.records()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("movie_summary_stats.json");

    save_summary(&stats, &path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["year_range"], "2001-2021");
    assert_eq!(json["most_productive_year"], 2015);

    let reloaded = load_summary(&path).unwrap();
    assert_eq!(reloaded, stats);
}

#[test]
fn test_reports_written_to_disk() {
    let movies = load_collection(&fixture("movies.json")).unwrap();
    let config = ReportConfig::default();
    let data = ReportData::build(&movies, &config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let readme = markdown::write_markdown_report(&data, dir.path(), today).unwrap();
    let content = std::fs::read_to_string(readme).unwrap();
    assert!(content.contains("- **Most Productive Year:** 2015"));
    assert!(content.contains("- **Delta** (2021) - 8.4/10"));

    let workbook = spreadsheet::write_spreadsheet(&data, dir.path(), today).unwrap();
    assert_eq!(
        workbook.file_name().and_then(|n| n.to_str()),
        Some("Top_100_Indian_Movies_Report.xlsx")
    );
    assert!(workbook.exists());

    let sheets = spreadsheet::build_sheets(&data, today);
    let movies = &sheets[1];
    assert_eq!(movies.name, spreadsheet::MOVIES_SHEET);
    assert_eq!(
        movies.value(9, 1),
        Some(&spreadsheet::CellValue::Text("India, Part 1".to_owned()))
    );
    assert_eq!(
        movies.value(8, 5),
        Some(&spreadsheet::CellValue::Text(String::new())),
        "Missing duration is written as an empty cell"
    );
    assert!(movies.value(11, 0).is_none(), "Header plus 10 movies");
}

#[test]
fn test_malformed_fixture_is_rejected() {
    let err = load_collection(&fixture("malformed.json")).unwrap_err();
    match err {
        MovieStatsError::MalformedRecord { index, field, .. } => {
            assert_eq!(index, 1);
            assert_eq!(field, "rating");
        }
        other => panic!("Expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_empty_fixture_loads_but_cannot_be_summarized() {
    let movies = load_collection(&fixture("empty.json")).unwrap();
    assert!(movies.is_empty());
    assert!(matches!(
        summarize(movies.records()),
        Err(MovieStatsError::EmptyCollection { .. })
    ));
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(load_collection(&fixture("does_not_exist.json")).is_err());
}
