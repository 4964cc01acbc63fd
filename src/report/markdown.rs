//! Markdown rendering of the analysis report.

use super::context::ReportData;
use crate::analyser::logic::MovieRecord;
use crate::error::{Result, ResultExt as _};
use crate::utils::{fmt_decimal, fmt_thousands};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

pub const MARKDOWN_FILE: &str = "README.md";

/// Render the full report as Markdown.
///
/// Sections:
/// - Executive summary with selection criteria and key findings
/// - Distributions by decade, rating band and vote band
/// - Top-N by rating and by votes, and the recent view
/// - The complete movie table
/// - Observations derived from the ranges
pub fn render_markdown(data: &ReportData<'_>, generated_on: NaiveDate) -> String {
    let config = data.config;
    let mut md = String::new();

    md.push_str(&format!("# {} Analysis Report\n\n", config.dataset_title));
    md.push_str(&format!(
        "**Generated on:** {}\n\n",
        generated_on.format("%B %d, %Y")
    ));

    md.push_str("## Executive Summary\n\n");
    md.push_str(&format!(
        "This report summarizes {} movies selected by IMDb rating and popularity.\n\n",
        data.total()
    ));
    render_criteria(&mut md, data);
    render_key_findings(&mut md, data);

    md.push_str("## Analysis Results\n\n");
    render_distributions(&mut md, data);

    md.push_str(&format!(
        "### Top {} Movies by Rating\n\n",
        data.top_by_rating.len()
    ));
    for (i, movie) in data.top_by_rating.iter().enumerate() {
        md.push_str(&format!(
            "{}. **{}** ({}) - {}/10 ({} votes)\n",
            i + 1,
            movie.title,
            movie.year,
            fmt_decimal(movie.rating),
            fmt_thousands(movie.votes)
        ));
    }
    md.push('\n');

    md.push_str(&format!(
        "### Top {} Movies by Vote Count\n\n",
        data.top_by_votes.len()
    ));
    for (i, movie) in data.top_by_votes.iter().enumerate() {
        md.push_str(&format!(
            "{}. **{}** ({}) - {} votes ({}/10)\n",
            i + 1,
            movie.title,
            movie.year,
            fmt_thousands(movie.votes),
            fmt_decimal(movie.rating)
        ));
    }
    md.push('\n');

    md.push_str(&format!(
        "### Recent Excellence ({}+)\n\n",
        config.recent_year_floor
    ));
    if data.recent.is_empty() {
        md.push_str(&format!(
            "*No movies released in {} or later.*\n",
            config.recent_year_floor
        ));
    }
    for movie in &data.recent {
        md.push_str(&format!(
            "- **{}** ({}) - {}/10\n",
            movie.title,
            movie.year,
            fmt_decimal(movie.rating)
        ));
    }
    md.push('\n');

    md.push_str(&format!("## Complete List: {}\n\n", config.dataset_title));
    render_movie_table(&mut md, data.records);
    md.push('\n');

    md.push_str("## Insights and Observations\n\n");
    render_insights(&mut md, data);

    md.push_str("---\n\n");
    md.push_str("*Data sourced from IMDb. Ratings and vote counts reflect the collection date.*\n");

    md
}

fn render_criteria(md: &mut String, data: &ReportData<'_>) {
    let criteria = &data.config.criteria;
    md.push_str("### Selection Criteria\n\n");
    md.push_str(&format!("- **Origin:** {} movies only\n", criteria.origin));
    md.push_str(&format!(
        "- **Rating:** IMDb rating ≥ {}/10\n",
        fmt_decimal(criteria.min_rating)
    ));
    md.push_str(&format!(
        "- **Popularity:** Number of votes ≥ {}\n",
        fmt_thousands(criteria.min_votes)
    ));
    md.push_str(&format!(
        "- **Recency:** Released after the year {}\n\n",
        criteria.min_year
    ));
}

fn render_key_findings(md: &mut String, data: &ReportData<'_>) {
    let s = &data.summary;
    md.push_str("### Key Findings\n\n");
    md.push_str(&format!("- **Total Movies Analyzed:** {}\n", s.total_count));
    md.push_str(&format!(
        "- **Average Rating:** {}/10\n",
        fmt_decimal(s.average_rating)
    ));
    md.push_str(&format!(
        "- **Median Rating:** {}/10\n",
        fmt_decimal(s.median_rating)
    ));
    md.push_str(&format!(
        "- **Average Votes:** {}\n",
        fmt_thousands(s.average_votes)
    ));
    md.push_str(&format!("- **Year Range:** {}\n", s.year_range));
    md.push_str(&format!(
        "- **Most Productive Year:** {}\n",
        s.most_productive_year
    ));
    md.push_str(&format!(
        "- **Highest Rated Movie:** {}\n",
        s.highest_rated_title
    ));
    md.push_str(&format!("- **Most Voted Movie:** {}\n\n", s.most_voted_title));
}

fn render_distributions(md: &mut String, data: &ReportData<'_>) {
    md.push_str("### Distribution by Decade\n\n");
    for (decade, count) in &data.decades {
        md.push_str(&format!("- **{decade}s:** {count} movies\n"));
    }
    md.push('\n');

    md.push_str("### Rating Distribution\n\n");
    for band in &data.rating_bands {
        md.push_str(&format!("- **{}:** {} movies\n", band.label, band.count));
    }
    md.push('\n');

    md.push_str("### Vote Distribution\n\n");
    for band in &data.vote_bands {
        md.push_str(&format!("- **{}:** {} movies\n", band.label, band.count));
    }
    md.push('\n');
}

fn render_movie_table(md: &mut String, records: &[MovieRecord]) {
    md.push_str("| Rank | Title | Year | Rating | Votes | Duration |\n");
    md.push_str("|------|-------|------|--------|-------|----------|\n");
    for movie in records {
        md.push_str(&format!(
            "| {} | {} | {} | {}/10 | {} | {} |\n",
            movie.rank,
            escape_cell(&movie.title),
            movie.year,
            fmt_decimal(movie.rating),
            fmt_thousands(movie.votes),
            escape_cell(&movie.duration)
        ));
    }
}

fn render_insights(md: &mut String, data: &ReportData<'_>) {
    let ranges = &data.ranges;

    md.push_str("### Quality Consistency\n\n");
    md.push_str(&format!(
        "- Ratings span {} to {}\n",
        fmt_decimal(ranges.ratings.0),
        fmt_decimal(ranges.ratings.1)
    ));
    md.push_str(&format!(
        "- The average rating of {}/10 reflects the selection threshold\n\n",
        fmt_decimal(data.summary.average_rating)
    ));

    md.push_str("### Temporal Distribution\n\n");
    if let Some((decade, count)) = data
        .decades
        .iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
    {
        md.push_str(&format!(
            "- The {decade}s contribute the most titles ({count} movies)\n"
        ));
    }
    md.push_str(&format!(
        "- {} movies were released in {} or later\n\n",
        crate::analyser::logic::filter_by_year_floor(data.records, data.config.recent_year_floor)
            .len(),
        data.config.recent_year_floor
    ));

    md.push_str("### Popular Appeal\n\n");
    md.push_str(&format!(
        "- Vote counts range from {} to {}\n\n",
        fmt_thousands(ranges.votes.0),
        fmt_thousands(ranges.votes.1)
    ));
}

/// Pipes would split a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Writes [`MARKDOWN_FILE`] into `out_dir`, creating it if needed.
///
/// # Errors
///
/// Returns error if the directory or file cannot be written.
pub fn write_markdown_report(
    data: &ReportData<'_>,
    out_dir: &Path,
    generated_on: NaiveDate,
) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create report directory {}", out_dir.display()))?;
    let path = out_dir.join(MARKDOWN_FILE);
    fs::write(&path, render_markdown(data, generated_on))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Markdown report saved");
    Ok(path)
}
