//! Worksheet assembly on top of `rust_xlsxwriter`.
//!
//! [`ReportWriter`] owns one worksheet and a row cursor. The facade
//! feeds it a header and a stream of rows and gaps; saving wraps the
//! sheet into a workbook and writes the `.xlsx` file.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet, XlsxError};

use crate::row::{COLUMN_HEADERS, FlattenedRow};

/// Band fill used when no color is configured, a light grey.
pub const DEFAULT_BAND_COLOR: u32 = 0xDCDCDC;

/// Column width used when none is configured, in character units.
pub const DEFAULT_COLUMN_WIDTH: f64 = 25.0;

/// The sheet keeps row 0 blank; the header lands on row 1 and data
/// starts at row 2, the layout existing consumers of these reports
/// expect.
const FIRST_ROW: u32 = 1;

/// Excel limits sheet names to 31 characters.
const SHEET_NAME_MAX: usize = 31;

const COLUMN_COUNT: u16 = COLUMN_HEADERS.len() as u16;

/// Incremental writer for one report worksheet.
pub struct ReportWriter {
    worksheet: Worksheet,
    cursor: u32,
    header_format: Format,
    band_format: Format,
}

impl ReportWriter {
    /// Creates a worksheet named after `title` (sanitized to what Excel
    /// accepts) with every report column set to `column_width`.
    pub fn new(title: &str, band_color: u32, column_width: f64) -> Result<Self, XlsxError> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(sanitize_sheet_name(title))?;
        for col in 0..COLUMN_COUNT {
            worksheet.set_column_width(col, column_width)?;
        }

        Ok(Self {
            worksheet,
            cursor: FIRST_ROW,
            header_format: Format::new().set_bold(),
            band_format: Format::new()
                .set_background_color(Color::RGB(band_color))
                .set_pattern(FormatPattern::Solid),
        })
    }

    /// Writes the bold header row.
    pub fn write_header(&mut self, titles: &[&str]) -> Result<(), XlsxError> {
        for (col, title) in titles.iter().enumerate() {
            self.worksheet.write_string_with_format(
                self.cursor,
                col as u16,
                *title,
                &self.header_format,
            )?;
        }
        self.cursor += 1;
        Ok(())
    }

    /// Writes one data row, filling all six cells with the band color
    /// when `banded`.
    pub fn write_row(&mut self, row: &FlattenedRow, banded: bool) -> Result<(), XlsxError> {
        for (col, text) in row.columns().iter().enumerate() {
            if banded {
                self.worksheet.write_string_with_format(
                    self.cursor,
                    col as u16,
                    *text,
                    &self.band_format,
                )?;
            } else {
                self.worksheet.write_string(self.cursor, col as u16, *text)?;
            }
        }
        self.cursor += 1;
        Ok(())
    }

    /// Leaves the current row blank.
    pub fn skip_row(&mut self) {
        self.cursor += 1;
    }

    /// The row the next write would land on.
    #[cfg(test)]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Wraps the worksheet into a workbook and writes it to `path`.
    pub fn save(self, path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.worksheet);
        workbook.save(path)
    }
}

/// The sheet title: source file name plus the release the data came
/// from, with the common `releases/` prefix dropped.
pub fn sheet_title(source_name: &str, data_version: Option<&str>) -> String {
    let version = data_version.unwrap_or_default().replace("releases/", "");
    format!("Excel version of {source_name} version: {version}")
}

/// Excel rejects names over 31 characters, a handful of punctuation
/// characters, enclosing apostrophes, and blank names. Rewrites `name`
/// into the closest accepted form.
fn sanitize_sheet_name(name: &str) -> String {
    const ILLEGAL: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

    let cleaned: String = name
        .chars()
        .map(|c| if ILLEGAL.contains(&c) { '-' } else { c })
        .take(SHEET_NAME_MAX)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim();
    if cleaned.is_empty() {
        return "Report".to_string();
    }
    cleaned.to_string()
}
