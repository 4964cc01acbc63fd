//! PNG charts rendered with [`plotters`].
//!
//! Two images are produced:
//!
//! - [`ANALYSIS_CHART_FILE`]: a 2x2 grid with the decade distribution, the
//!   rating histogram, the top movies by rating and votes-vs-rating.
//! - [`TIMELINE_CHART_FILE`]: rating over time with bubbles sized by votes,
//!   above the number of movies per year.

use super::context::ReportData;
use crate::error::{MovieStatsError, Result};
use crate::utils::truncate_label;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub const ANALYSIS_CHART_FILE: &str = "movie_analysis_charts.png";
pub const TIMELINE_CHART_FILE: &str = "movie_timeline.png";

const RATING_BIN_COUNT: usize = 15;
const TITLE_WIDTH: usize = 20;
const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn chart_err<E: std::fmt::Display>(e: E) -> MovieStatsError {
    MovieStatsError::Chart(e.to_string())
}

/// Renders both chart images into `out_dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`MovieStatsError::Chart`] if drawing fails and
/// [`MovieStatsError::Io`] if the directory cannot be created.
pub fn render_charts(data: &ReportData<'_>, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let analysis = out_dir.join(ANALYSIS_CHART_FILE);
    render_analysis_grid(data, &analysis)?;
    tracing::info!(path = %analysis.display(), "Analysis charts saved");

    let timeline = out_dir.join(TIMELINE_CHART_FILE);
    render_timeline(data, &timeline)?;
    tracing::info!(path = %timeline.display(), "Timeline chart saved");

    Ok(vec![analysis, timeline])
}

fn render_analysis_grid(data: &ReportData<'_>, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root
        .titled(
            &format!("{} Analysis", data.config.dataset_title),
            ("sans-serif", 32),
        )
        .map_err(chart_err)?;

    let panels = root.split_evenly((2, 2));
    if let [decades, ratings, top, scatter] = panels.as_slice() {
        decade_panel(decades, data)?;
        rating_panel(ratings, data)?;
        top_rated_panel(top, data)?;
        scatter_panel(scatter, data)?;
    }

    root.present().map_err(chart_err)
}

fn render_timeline(data: &ReportData<'_>, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1500, 1000)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let panels = root.split_evenly((2, 1));
    if let [bubbles, per_year] = panels.as_slice() {
        bubble_panel(bubbles, data)?;
        per_year_panel(per_year, data)?;
    }

    root.present().map_err(chart_err)
}

/// Tick label for categorical axes laid out at integer positions.
fn label_at(labels: &[String], position: f64) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

fn decade_panel(area: &Panel<'_>, data: &ReportData<'_>) -> Result<()> {
    let labels: Vec<String> = data.decades.keys().map(|d| format!("{d}s")).collect();
    let max = data.decades.values().copied().max().unwrap_or(0) as f64;
    let n = labels.len() as f64;

    let mut chart = ChartBuilder::on(area)
        .caption("Movies by Decade", CAPTION_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..n - 0.5, 0.0..max * 1.15 + 1.0)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| label_at(&labels, *x))
        .y_desc("Number of Movies")
        .label_style(LABEL_FONT)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(data.decades.values().enumerate().map(|(i, &count)| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, count as f64)], BLUE.mix(0.7).filled())
        }))
        .map_err(chart_err)?;

    Ok(())
}

/// Splits the rating span into `bins` equal-width bins.
///
/// Returns `(lower, upper, count)` per bin; the last bin includes the
/// maximum rating.
pub fn rating_bins(ratings: &[f64], bins: usize) -> Vec<(f64, f64, usize)> {
    let (Some(lo), Some(hi)) = (
        ratings.iter().copied().reduce(f64::min),
        ratings.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let width = (hi - lo) / bins as f64;
    if width <= 0.0 {
        return vec![(lo, lo + 0.1, ratings.len())];
    }

    let mut counts = vec![0usize; bins];
    for &rating in ratings {
        let index = (((rating - lo) / width).floor() as usize).min(bins - 1);
        if let Some(slot) = counts.get_mut(index) {
            *slot += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = lo + width * i as f64;
            (lower, lower + width, count)
        })
        .collect()
}

fn rating_panel(area: &Panel<'_>, data: &ReportData<'_>) -> Result<()> {
    let ratings: Vec<f64> = data.records.iter().map(|r| r.rating).collect();
    let bins = rating_bins(&ratings, RATING_BIN_COUNT);
    let max = bins.iter().map(|b| b.2).max().unwrap_or(0) as f64;
    let lo = bins.first().map_or(0.0, |b| b.0);
    let hi = bins.last().map_or(10.0, |b| b.1);

    let mut chart = ChartBuilder::on(area)
        .caption("Rating Distribution", CAPTION_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0.0..max * 1.15 + 1.0)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("IMDb Rating")
        .y_desc("Frequency")
        .x_label_formatter(&|x| format!("{x:.1}"))
        .label_style(LABEL_FONT)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(bins.iter().map(|&(lower, upper, count)| {
            Rectangle::new([(lower, 0.0), (upper, count as f64)], GREEN.mix(0.7).filled())
        }))
        .map_err(chart_err)?;

    Ok(())
}

fn top_rated_caption(listed: usize) -> String {
    format!("Top {listed} Movies by Rating")
}

fn top_rated_panel(area: &Panel<'_>, data: &ReportData<'_>) -> Result<()> {
    // Highest rated at the top of the axis.
    let movies: Vec<_> = data.chart_top_by_rating.iter().rev().collect();
    let labels: Vec<String> = movies
        .iter()
        .map(|m| truncate_label(&m.title, TITLE_WIDTH))
        .collect();
    let n = labels.len() as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(top_rated_caption(movies.len()), CAPTION_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(180)
        .build_cartesian_2d(0.0..10.0, -0.5..n - 0.5)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len())
        .y_label_formatter(&|y| label_at(&labels, *y))
        .x_desc("IMDb Rating")
        .label_style(LABEL_FONT)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(movies.iter().enumerate().map(|(i, movie)| {
            let y = i as f64;
            Rectangle::new([(0.0, y - 0.4), (movie.rating, y + 0.4)], RED.mix(0.7).filled())
        }))
        .map_err(chart_err)?;

    Ok(())
}

/// Colour for `year` on a blue (oldest) to red (newest) gradient.
fn year_color(year: i32, (min, max): (i32, i32)) -> HSLColor {
    let span = f64::from(max - min).max(1.0);
    let t = f64::from(year - min) / span;
    HSLColor(0.66 * (1.0 - t), 0.7, 0.5)
}

fn scatter_panel(area: &Panel<'_>, data: &ReportData<'_>) -> Result<()> {
    let (min_votes, max_votes) = data.ranges.votes;
    let x_lo = (min_votes as f64).max(1.0) * 0.8;
    let x_hi = (max_votes as f64).max(1.0) * 1.25;
    let (min_rating, max_rating) = data.ranges.ratings;

    let mut chart = ChartBuilder::on(area)
        .caption("Votes vs Rating", CAPTION_FONT)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (x_lo..x_hi).log_scale(),
            (min_rating - 0.1)..(max_rating + 0.1),
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Number of Votes (log scale)")
        .y_desc("IMDb Rating")
        .x_label_formatter(&|x| crate::utils::fmt_thousands(x.round() as u64))
        .label_style(LABEL_FONT)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(data.records.iter().map(|movie| {
            Circle::new(
                ((movie.votes as f64).max(1.0), movie.rating),
                5,
                year_color(movie.year, data.ranges.years).filled(),
            )
        }))
        .map_err(chart_err)?;

    Ok(())
}

/// Bubble radius for a vote count: `sqrt(votes / 1000)` clamped to `[3, 30]`.
fn bubble_radius(votes: u64) -> i32 {
    (votes as f64 / 1000.0).sqrt().clamp(3.0, 30.0).round() as i32
}

fn bubble_panel(area: &Panel<'_>, data: &ReportData<'_>) -> Result<()> {
    let (min_year, max_year) = data.ranges.years;
    let (min_rating, max_rating) = data.ranges.ratings;

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("{}: Rating Over Time", data.config.dataset_title),
            CAPTION_FONT,
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            f64::from(min_year) - 1.0..f64::from(max_year) + 1.0,
            (min_rating - 0.2)..(max_rating + 0.2),
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Release Year")
        .y_desc("IMDb Rating")
        .x_label_formatter(&|x| format!("{x:.0}"))
        .label_style(LABEL_FONT)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(data.records.iter().map(|movie| {
            Circle::new(
                (f64::from(movie.year), movie.rating),
                bubble_radius(movie.votes),
                year_color(movie.year, data.ranges.years).mix(0.6).filled(),
            )
        }))
        .map_err(chart_err)?;

    Ok(())
}

fn per_year_panel(area: &Panel<'_>, data: &ReportData<'_>) -> Result<()> {
    let (min_year, max_year) = data.ranges.years;
    let max = data.years.values().copied().max().unwrap_or(0) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption("Movies Released per Year", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            f64::from(min_year) - 1.0..f64::from(max_year) + 1.0,
            0.0..max * 1.15 + 1.0,
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Year")
        .y_desc("Number of Movies")
        .x_label_formatter(&|x| format!("{x:.0}"))
        .label_style(LABEL_FONT)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(data.years.iter().map(|(&year, &count)| {
            let x = f64::from(year);
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, count as f64)], CYAN.mix(0.8).filled())
        }))
        .map_err(chart_err)?;

    Ok(())
}
