#![expect(clippy::unwrap_used, clippy::indexing_slicing)]
use super::*;
use crate::error::{MovieStatsError, Result};

fn movie(rank: u32, title: &str, year: i32, rating: f64, votes: u64) -> MovieRecord {
    MovieRecord {
        rank,
        title: title.to_owned(),
        year,
        rating,
        votes,
        duration: "2h".to_owned(),
    }
}

fn three_movies() -> Vec<MovieRecord> {
    vec![
        movie(1, "A", 2015, 9.2, 600_000),
        movie(2, "B", 2005, 7.8, 12_000),
        movie(3, "C", 2015, 8.6, 200_000),
    ]
}

fn titles(records: &[&MovieRecord]) -> Vec<String> {
    records.iter().map(|r| r.title.clone()).collect()
}

#[test]
fn test_decade_histogram_three_movies() {
    let hist = decade_histogram(&three_movies());
    assert_eq!(hist.len(), 2);
    assert_eq!(hist.get(&2010), Some(&2));
    assert_eq!(hist.get(&2000), Some(&1));
    let decades: Vec<i32> = hist.keys().copied().collect();
    assert_eq!(decades, vec![2000, 2010], "Decades iterate ascending");
}

#[test]
fn test_decade_histogram_floors_years() {
    let records = vec![
        movie(1, "A", 2000, 8.0, 20_000),
        movie(2, "B", 2009, 8.0, 20_000),
        movie(3, "C", 2010, 8.0, 20_000),
        movie(4, "D", 1999, 8.0, 20_000),
    ];
    let hist = decade_histogram(&records);
    assert_eq!(hist.get(&2000), Some(&2));
    assert_eq!(hist.get(&2010), Some(&1));
    assert_eq!(hist.get(&1990), Some(&1));
    assert!(hist.values().all(|&c| c > 0), "No zero-count decades");
}

#[test]
fn test_rating_band_histogram_three_movies() {
    let bands = rating_band_histogram(&three_movies());
    let pairs: Vec<(&str, usize)> = bands.iter().map(|b| (b.label.as_str(), b.count)).collect();
    assert_eq!(
        pairs,
        vec![("9.0+", 1), ("8.5-8.9", 1), ("8.0-8.4", 0), ("7.8-7.9", 1)]
    );
}

#[test]
fn test_rating_band_skips_out_of_band_values() {
    let records = vec![
        movie(1, "Low", 2010, 6.5, 20_000),
        movie(2, "Edge", 2010, 7.79, 20_000),
        movie(3, "In", 2010, 8.2, 20_000),
    ];
    let bands = rating_band_histogram(&records);
    let total: usize = bands.iter().map(|b| b.count).sum();
    assert_eq!(total, 1, "Only the in-band rating is counted");
    assert_eq!(bands[2].count, 1);
}

#[test]
fn test_vote_band_histogram() {
    let records = vec![
        movie(1, "A", 2010, 8.0, 500_000),
        movie(2, "B", 2010, 8.0, 499_999),
        movie(3, "C", 2010, 8.0, 100_000),
        movie(4, "D", 2010, 8.0, 75_000),
        movie(5, "E", 2010, 8.0, 10_000),
        movie(6, "F", 2010, 8.0, 9_999),
    ];
    let bands = vote_band_histogram(&records);
    let counts: Vec<usize> = bands.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 2, 1, 1]);
    assert_eq!(bands[0].label, "500K+");
    assert_eq!(bands[3].label, "10K-49K");
}

#[test]
fn test_year_histogram() {
    let hist = year_histogram(&three_movies());
    assert_eq!(hist.get(&2015), Some(&2));
    assert_eq!(hist.get(&2005), Some(&1));
}

#[test]
fn test_top_n_by_votes() {
    let records = three_movies();
    let top = top_n(&records, RankField::Votes, 2, SortOrder::Descending);
    assert_eq!(titles(&top), vec!["A", "C"]);
}

#[test]
fn test_top_n_ascending() {
    let records = three_movies();
    let top = top_n(&records, RankField::Rating, 3, SortOrder::Ascending);
    assert_eq!(titles(&top), vec!["B", "C", "A"]);
}

#[test]
fn test_top_n_ties_keep_input_order() {
    let records = vec![
        movie(1, "First", 2010, 8.5, 20_000),
        movie(2, "Best", 2011, 9.0, 20_000),
        movie(3, "Second", 2012, 8.5, 20_000),
        movie(4, "Third", 2013, 8.5, 20_000),
    ];
    let top = top_n(&records, RankField::Rating, 4, SortOrder::Descending);
    assert_eq!(titles(&top), vec!["Best", "First", "Second", "Third"]);

    let asc = top_n(&records, RankField::Rating, 4, SortOrder::Ascending);
    assert_eq!(titles(&asc), vec!["First", "Second", "Third", "Best"]);
}

#[test]
fn test_top_n_larger_than_collection() {
    let records = three_movies();
    assert_eq!(top_n(&records, RankField::Rating, 50, SortOrder::Descending).len(), 3);
    assert!(top_n(&records, RankField::Rating, 0, SortOrder::Descending).is_empty());
    assert!(top_n(&[], RankField::Votes, 5, SortOrder::Descending).is_empty());
}

#[test]
fn test_top_n_does_not_mutate_input() {
    let records = three_movies();
    let before = records.clone();
    let first = titles(&top_n(&records, RankField::Rating, 2, SortOrder::Descending));
    let second = titles(&top_n(&records, RankField::Rating, 2, SortOrder::Descending));
    assert_eq!(first, second);
    assert_eq!(records, before);
}

#[test]
fn test_filter_by_year_floor_preserves_order() {
    let records = vec![
        movie(1, "Old", 2001, 8.0, 20_000),
        movie(2, "New", 2022, 8.1, 20_000),
        movie(3, "Edge", 2020, 9.0, 20_000),
        movie(4, "Newer", 2023, 7.9, 20_000),
    ];
    let recent = filter_by_year_floor(&records, 2020);
    assert_eq!(titles(&recent), vec!["New", "Edge", "Newer"]);
}

#[test]
fn test_recent_top_sorts_by_rating() {
    let records = vec![
        movie(1, "Old", 2001, 9.5, 20_000),
        movie(2, "New", 2022, 8.1, 20_000),
        movie(3, "Edge", 2020, 9.0, 20_000),
        movie(4, "Newer", 2023, 7.9, 20_000),
    ];
    let recent = recent_top(&records, 2020, 2);
    assert_eq!(titles(&recent), vec!["Edge", "New"]);
}

#[test]
fn test_summarize_three_movies() -> Result<()> {
    let stats = summarize(&three_movies())?;
    assert_eq!(stats.total_count, 3);
    assert_eq!(stats.highest_rated_title, "A");
    assert_eq!(stats.most_voted_title, "A");
    assert_eq!(stats.newest_title, "A", "First 2015 record wins the tie");
    assert_eq!(stats.oldest_title, "B");
    assert_eq!(stats.year_range, YearRange { min: 2005, max: 2015 });
    assert_eq!(stats.most_productive_year, 2015);
    assert!((stats.average_rating - 8.53).abs() < 1e-9);
    assert!((stats.median_rating - 8.6).abs() < 1e-9);
    assert_eq!(stats.average_votes, 270_666);
    assert_eq!(stats.median_votes, 200_000);
    Ok(())
}

#[test]
fn test_highest_rated_tie_resolves_to_first_in_input_order() -> Result<()> {
    let records = vec![
        movie(1, "Rank One", 2010, 9.0, 20_000),
        movie(2, "Other", 2011, 8.0, 30_000),
        movie(3, "Another", 2012, 8.5, 40_000),
        movie(4, "Fourth", 2013, 7.9, 50_000),
        movie(5, "Rank Five", 2014, 9.0, 60_000),
    ];
    let stats = summarize(&records)?;
    assert_eq!(stats.highest_rated_title, "Rank One");

    let reversed: Vec<MovieRecord> = records.iter().rev().cloned().collect();
    let stats = summarize(&reversed)?;
    assert_eq!(stats.highest_rated_title, "Rank Five");
    Ok(())
}

#[test]
fn test_most_productive_year_tie_uses_first_encountered() {
    let records = vec![
        movie(1, "A", 2018, 8.0, 20_000),
        movie(2, "B", 2012, 8.0, 20_000),
        movie(3, "C", 2012, 8.0, 20_000),
        movie(4, "D", 2018, 8.0, 20_000),
    ];
    assert_eq!(most_productive_year(&records), Some(2018));
    assert_eq!(most_productive_year(&[]), None);
}

#[test]
fn test_summarize_empty_collection() {
    match summarize(&[]) {
        Err(MovieStatsError::EmptyCollection { operation }) => assert_eq!(operation, "summarize"),
        other => panic!("Expected EmptyCollection, got {other:?}"),
    }
}

#[test]
fn test_collection_ranges() -> Result<()> {
    let ranges = collection_ranges(&three_movies())?;
    assert_eq!(ranges.years, (2005, 2015));
    assert_eq!(ranges.votes, (12_000, 600_000));
    assert!((ranges.ratings.0 - 7.8).abs() < f64::EPSILON);
    assert!((ranges.ratings.1 - 9.2).abs() < f64::EPSILON);
    assert!(collection_ranges(&[]).is_err());
    Ok(())
}

#[test]
fn test_yearly_stats() {
    let stats = yearly_stats(&three_movies());
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].year, 2005);
    assert_eq!(stats[1].year, 2015);
    assert_eq!(stats[1].movie_count, 2);
    assert!((stats[1].avg_rating - 8.9).abs() < 1e-9);
    assert!((stats[1].avg_votes - 400_000.0).abs() < 1e-9);
}

#[test]
fn test_first_extreme_minimum() {
    let records = vec![
        movie(1, "A", 2005, 8.0, 20_000),
        movie(2, "B", 2003, 8.0, 20_000),
        movie(3, "C", 2003, 8.0, 20_000),
    ];
    let oldest = first_extreme(&records, RankField::Year, std::cmp::Ordering::Less).unwrap();
    assert_eq!(oldest.title, "B");
}

#[test]
fn test_parse_collection() -> Result<()> {
    let json = r#"[
        {"rank": 1, "title": "A", "year": 2015, "rating": 9.2, "votes": 600000, "duration": "2h"},
        {"rank": 2, "title": "B", "year": 2005, "rating": 7.8, "votes": 12000, "genre": "Drama"}
    ]"#;
    let collection = parse_collection(json)?;
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.records()[0].duration, "2h");
    assert_eq!(collection.records()[1].duration, "", "Missing duration defaults");
    Ok(())
}

#[test]
fn test_parse_collection_missing_numeric_field() {
    let json = r#"[
        {"rank": 1, "title": "A", "year": 2015, "rating": 9.2, "votes": 600000},
        {"rank": 2, "title": "B", "year": 2005, "votes": 12000}
    ]"#;
    match parse_collection(json) {
        Err(MovieStatsError::MalformedRecord { index, field, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(field, "rating");
        }
        other => panic!("Expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_parse_collection_non_numeric_field() {
    let json = r#"[{"rank": 1, "title": "A", "year": "2015", "rating": 9.2, "votes": 1}]"#;
    match parse_collection(json) {
        Err(MovieStatsError::MalformedRecord { index, field, reason }) => {
            assert_eq!(index, 0);
            assert_eq!(field, "year");
            assert!(reason.contains("integer"));
        }
        other => panic!("Expected MalformedRecord, got {other:?}"),
    }

    let json = r#"[{"rank": 1, "title": "A", "year": 2015, "rating": 9.2, "votes": -4}]"#;
    assert!(matches!(
        parse_collection(json),
        Err(MovieStatsError::MalformedRecord { field, .. }) if field == "votes"
    ));
}

#[test]
fn test_parse_collection_accepts_integral_floats() -> Result<()> {
    let json = r#"[{"rank": 1.0, "title": "A", "year": 2015.0, "rating": 9.2, "votes": 600000.0}]"#;
    let collection = parse_collection(json)?;
    let record = &collection.records()[0];
    assert_eq!(record.rank, 1);
    assert_eq!(record.year, 2015);
    assert_eq!(record.votes, 600_000);
    Ok(())
}

#[test]
fn test_parse_collection_rejects_fractional_integers() {
    let json = r#"[{"rank": 1, "title": "A", "year": 2015.5, "rating": 9.2, "votes": 10}]"#;
    assert!(matches!(
        parse_collection(json),
        Err(MovieStatsError::MalformedRecord { field, .. }) if field == "year"
    ));

    let json = r#"[{"rank": 1, "title": "A", "year": 2015, "rating": 9.2, "votes": 1e30}]"#;
    assert!(matches!(
        parse_collection(json),
        Err(MovieStatsError::MalformedRecord { field, .. }) if field == "votes"
    ));
}

#[test]
fn test_parse_collection_rejects_non_array() {
    assert!(parse_collection(r#"{"rank": 1}"#).is_err());
    assert!(matches!(
        parse_collection("[1, 2]"),
        Err(MovieStatsError::MalformedRecord { index: 0, .. })
    ));
    assert!(parse_collection("[]").unwrap().is_empty());
}

#[test]
fn test_summary_serializes_to_artifact_keys() -> Result<()> {
    let stats = summarize(&three_movies())?;
    let value = serde_json::to_value(&stats)?;
    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "avg_rating",
            "avg_votes",
            "highest_rated_movie",
            "median_rating",
            "median_votes",
            "most_productive_year",
            "most_voted_movie",
            "newest_movie",
            "oldest_movie",
            "total_movies",
            "year_range",
        ]
    );
    assert_eq!(value["year_range"], "2005-2015");

    let back: SummaryStats = serde_json::from_value(value)?;
    assert_eq!(back, stats);
    Ok(())
}

#[test]
fn test_year_range_parse() {
    assert_eq!(
        "2001-2024".parse::<YearRange>(),
        Ok(YearRange { min: 2001, max: 2024 })
    );
    assert!("2001".parse::<YearRange>().is_err());
    assert!("abc-2024".parse::<YearRange>().is_err());
}
