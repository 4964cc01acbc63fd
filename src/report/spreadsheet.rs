//! Styled Excel workbook export.
//!
//! One `<Title>_Report.xlsx` file with three sheets: an executive summary,
//! the full movie list and a detailed analysis. Sheets are first laid out as
//! plain [`Sheet`] values and then written with [`rust_xlsxwriter`].

use super::context::ReportData;
use crate::error::{Result, ResultExt as _};
use crate::utils::{fmt_decimal, fmt_thousands};
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const SUMMARY_SHEET: &str = "Executive Summary";
pub const MOVIES_SHEET: &str = "Top 100 Movies";
pub const ANALYSIS_SHEET: &str = "Detailed Analysis";

const HEADER_FILL: u32 = 0x0036_6092;
const SECTION_FILL: u32 = 0x00D9_E2F3;
const MAX_COLUMN_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Characters the value takes when displayed, used for column widths.
    fn display_width(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::Number(number) if number.fract() == 0.0 => format!("{number:.0}").len(),
            Self::Number(number) => fmt_decimal(*number).len(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for CellValue {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for CellValue {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u64> for CellValue {
    fn from(number: u64) -> Self {
        Self::Number(number as f64)
    }
}

impl From<usize> for CellValue {
    fn from(number: usize) -> Self {
        Self::Number(number as f64)
    }
}

/// Named cell formats used across the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    /// Report title, bold 18pt
    Title,
    /// Generation date, italic 12pt
    Subtitle,
    /// Bold 12pt block heading
    Subheader,
    /// Bold 12pt heading on a light blue fill
    Section,
    /// Bold label or column caption
    Label,
    /// White bold 14pt on dark blue, centered, thin borders
    Header,
    Bordered,
    BorderedCenter,
    BorderedRight,
}

impl CellStyle {
    fn format(self) -> Format {
        match self {
            Self::Plain => Format::new(),
            Self::Title => Format::new().set_bold().set_font_size(18),
            Self::Subtitle => Format::new().set_italic().set_font_size(12),
            Self::Subheader => Format::new().set_bold().set_font_size(12),
            Self::Section => Format::new()
                .set_bold()
                .set_font_size(12)
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(SECTION_FILL)),
            Self::Label => Format::new().set_bold(),
            Self::Header => Format::new()
                .set_bold()
                .set_font_size(14)
                .set_font_color(Color::White)
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin),
            Self::Bordered => Format::new().set_border(FormatBorder::Thin),
            Self::BorderedCenter => Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            Self::BorderedRight => Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Right),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
    pub style: CellStyle,
    /// Last column of a merged range starting at `col`
    pub merge_to: Option<u16>,
}

/// One worksheet laid out as positioned, styled cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    cells: Vec<Cell>,
    /// Size columns to their content
    autofit: bool,
}

impl Sheet {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            cells: Vec::new(),
            autofit: false,
        }
    }

    fn put(&mut self, row: u32, col: u16, value: impl Into<CellValue>, style: CellStyle) {
        self.cells.push(Cell {
            row,
            col,
            value: value.into(),
            style,
            merge_to: None,
        });
    }

    fn merged(&mut self, row: u32, cols: (u16, u16), text: String, style: CellStyle) {
        self.cells.push(Cell {
            row,
            col: cols.0,
            value: CellValue::Text(text),
            style,
            merge_to: Some(cols.1),
        });
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    pub fn value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    /// Width per used column: longest value plus two, at most 50.
    pub fn column_widths(&self) -> BTreeMap<u16, f64> {
        self.cells
            .iter()
            .fold(BTreeMap::new(), |mut widths: BTreeMap<u16, usize>, cell| {
                let width = widths.entry(cell.col).or_insert(0);
                *width = (*width).max(cell.value.display_width());
                widths
            })
            .into_iter()
            .map(|(col, len)| (col, (len + 2).min(MAX_COLUMN_WIDTH) as f64))
            .collect()
    }
}

/// Lays out the three workbook sheets.
pub fn build_sheets(data: &ReportData<'_>, generated_on: NaiveDate) -> Vec<Sheet> {
    vec![
        executive_summary(data, generated_on),
        movie_list(data),
        detailed_analysis(data),
    ]
}

fn executive_summary(data: &ReportData<'_>, generated_on: NaiveDate) -> Sheet {
    let config = data.config;
    let criteria = &config.criteria;
    let s = &data.summary;
    let mut sheet = Sheet::new(SUMMARY_SHEET);

    sheet.merged(
        0,
        (0, 3),
        format!("{} Analysis Report", config.dataset_title),
        CellStyle::Title,
    );
    sheet.merged(
        1,
        (0, 3),
        format!("Generated on: {}", generated_on.format("%B %d, %Y")),
        CellStyle::Subtitle,
    );

    sheet.put(3, 0, "Selection Criteria:", CellStyle::Subheader);
    let bullets = [
        format!("• {} movies only", criteria.origin),
        format!("• IMDb rating ≥ {}", fmt_decimal(criteria.min_rating)),
        format!("• Number of votes ≥ {}", fmt_thousands(criteria.min_votes)),
        format!("• Released after year {}", criteria.min_year),
    ];
    for (row, bullet) in (4..).zip(bullets) {
        sheet.put(row, 0, bullet, CellStyle::Plain);
    }

    sheet.put(9, 0, "Key Statistics:", CellStyle::Subheader);
    let stats: [(&str, CellValue); 8] = [
        ("Total Movies Analyzed", s.total_count.into()),
        ("Average Rating", format!("{}/10", fmt_decimal(s.average_rating)).into()),
        ("Median Rating", format!("{}/10", fmt_decimal(s.median_rating)).into()),
        ("Average Votes", fmt_thousands(s.average_votes).into()),
        ("Year Range", s.year_range.to_string().into()),
        ("Most Productive Year", s.most_productive_year.into()),
        ("Highest Rated Movie", s.highest_rated_title.clone().into()),
        ("Most Voted Movie", s.most_voted_title.clone().into()),
    ];
    for (row, (label, value)) in (10..).zip(stats) {
        sheet.put(row, 0, label, CellStyle::Label);
        sheet.put(row, 1, value, CellStyle::Plain);
    }

    sheet
}

fn movie_list(data: &ReportData<'_>) -> Sheet {
    let mut sheet = Sheet::new(MOVIES_SHEET);
    sheet.autofit = true;

    let headers = ["Rank", "Title", "Year", "Rating", "Votes", "Duration"];
    for (col, header) in (0..).zip(headers) {
        sheet.put(0, col, header, CellStyle::Header);
    }

    for (row, movie) in (1..).zip(data.records) {
        sheet.put(row, 0, movie.rank, CellStyle::BorderedCenter);
        sheet.put(row, 1, movie.title.as_str(), CellStyle::Bordered);
        sheet.put(row, 2, movie.year, CellStyle::BorderedCenter);
        sheet.put(row, 3, movie.rating, CellStyle::BorderedCenter);
        sheet.put(row, 4, movie.votes, CellStyle::BorderedRight);
        sheet.put(row, 5, movie.duration.as_str(), CellStyle::BorderedCenter);
    }

    sheet
}

fn detailed_analysis(data: &ReportData<'_>) -> Sheet {
    let mut sheet = Sheet::new(ANALYSIS_SHEET);

    sheet.put(0, 0, "Distribution by Decade", CellStyle::Section);
    sheet.put(1, 0, "Decade", CellStyle::Label);
    sheet.put(1, 1, "Count", CellStyle::Label);
    for (row, (decade, &count)) in (2..).zip(&data.decades) {
        sheet.put(row, 0, format!("{decade}s"), CellStyle::Plain);
        sheet.put(row, 1, count, CellStyle::Plain);
    }

    sheet.put(0, 3, "Rating Distribution", CellStyle::Section);
    sheet.put(1, 3, "Rating Range", CellStyle::Label);
    sheet.put(1, 4, "Count", CellStyle::Label);
    for (row, band) in (2..).zip(&data.rating_bands) {
        sheet.put(row, 3, band.label.as_str(), CellStyle::Plain);
        sheet.put(row, 4, band.count, CellStyle::Plain);
    }

    // One blank row below the taller of the two tables.
    let tallest = data.decades.len().max(data.rating_bands.len());
    let top_row = u32::try_from(tallest).map_or(u32::MAX, |rows| rows.saturating_add(3));

    sheet.put(
        top_row,
        0,
        format!("Top {} by Rating", data.top_by_rating.len()),
        CellStyle::Section,
    );
    for (col, caption) in (0..).zip(["Rank", "Title", "Year", "Rating"]) {
        sheet.put(top_row + 1, col, caption, CellStyle::Label);
    }
    for (row, movie) in (top_row + 2..).zip(&data.top_by_rating) {
        sheet.put(row, 0, movie.rank, CellStyle::Plain);
        sheet.put(row, 1, movie.title.as_str(), CellStyle::Plain);
        sheet.put(row, 2, movie.year, CellStyle::Plain);
        sheet.put(row, 3, movie.rating, CellStyle::Plain);
    }

    sheet
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<()> {
    worksheet.set_name(sheet.name)?;

    for cell in &sheet.cells {
        let format = cell.style.format();
        match (&cell.value, cell.merge_to) {
            (CellValue::Text(text), Some(last_col)) => {
                worksheet.merge_range(cell.row, cell.col, cell.row, last_col, text, &format)?;
            }
            (CellValue::Text(text), None) => {
                worksheet.write_string_with_format(cell.row, cell.col, text, &format)?;
            }
            (CellValue::Number(number), _) => {
                worksheet.write_number_with_format(cell.row, cell.col, *number, &format)?;
            }
        }
    }

    if sheet.autofit {
        for (col, width) in sheet.column_widths() {
            worksheet.set_column_width(col, width)?;
        }
    }

    Ok(())
}

/// Workbook file name derived from the dataset title
/// (`"Top 100 Indian Movies"` → `"Top_100_Indian_Movies_Report.xlsx"`).
pub fn workbook_file_name(title: &str) -> String {
    let slug: Vec<&str> = title.split_whitespace().collect();
    format!("{}_Report.xlsx", slug.join("_"))
}

/// Writes the workbook into `out_dir`, creating it if needed.
///
/// # Errors
///
/// Returns error if the directory cannot be created or the workbook cannot
/// be written.
pub fn write_spreadsheet(
    data: &ReportData<'_>,
    out_dir: &Path,
    generated_on: NaiveDate,
) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create report directory {}", out_dir.display()))?;
    let path = out_dir.join(workbook_file_name(&data.config.dataset_title));

    let mut workbook = Workbook::new();
    for sheet in build_sheets(data, generated_on) {
        write_sheet(workbook.add_worksheet(), &sheet)?;
        tracing::debug!(sheet = sheet.name, "Sheet laid out");
    }
    workbook
        .save(&path)
        .with_context(|| format!("Failed to save workbook {}", path.display()))?;

    tracing::info!(path = %path.display(), "Excel report saved");
    Ok(path)
}
