//! In-memory view of an uploaded spreadsheet.
//!
//! Workbooks are read once with calamine and materialised as plain cell grids
//! addressed with 1-based (row, column) coordinates, so the extractors never
//! touch the container format. Grids always start at A1: leading blank rows and
//! columns that calamine trims from a range are padded back in.

use crate::error::{IngestError, Result};
use calamine::{Data, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::io::{Cursor, Read};

/// Date layouts accepted in text cells, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"];

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Display text of the cell, trimmed.
    pub fn text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format_float(*f),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => format_datetime(dt),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Calendar date held by the cell, either as a native date or as parseable text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::DateTime(dt) if !is_time_only(dt) => Some(dt.date()),
            CellValue::Text(s) => parse_date(s),
            _ => None,
        }
    }

    /// Integer held by the cell. Fractional numbers and non-numeric text yield `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(*f as i64),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) if s.trim().is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(ndt) if !dt.is_duration() => CellValue::DateTime(ndt),
                _ => CellValue::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        if text.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        }
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

// Excel time-of-day serials (< 1.0) land on the 1899-12-30/31 epoch.
fn is_time_only(dt: &NaiveDateTime) -> bool {
    dt.date() < NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn format_datetime(dt: &NaiveDateTime) -> String {
    if is_time_only(dt) {
        dt.format("%H:%M").to_string()
    } else if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Parses a date written as text, ignoring a trailing time component.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let candidates = [Some(text), text.split_whitespace().next()];
    candidates.into_iter().flatten().find_map(|candidate| {
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
    })
}

/// One worksheet as a dense grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Builds a sheet from plain text rows; blank strings become empty cells.
    pub fn from_text(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|text| CellValue::from(*text)).collect())
            .collect();
        Self::new(name, rows)
    }

    fn from_range(name: &str, range: &Range<Data>) -> Self {
        let mut rows = Vec::new();
        if let Some((start_row, start_col)) = range.start() {
            rows.resize(start_row as usize, Vec::new());
            for row in range.rows() {
                let mut cells = vec![CellValue::Empty; start_col as usize];
                cells.extend(row.iter().map(CellValue::from));
                rows.push(cells);
            }
        }
        Self::new(name, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last used row (1-based), 0 for a blank sheet.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Last used column (1-based), 0 for a blank sheet.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn has_content(&self) -> bool {
        self.rows.iter().flatten().any(|cell| !cell.is_empty())
    }

    /// Cell at 1-based coordinates; anything outside the grid reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        row.checked_sub(1)
            .and_then(|r| self.rows.get(r))
            .and_then(|cells| col.checked_sub(1).and_then(|c| cells.get(c)))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn text(&self, row: usize, col: usize) -> String {
        self.cell(row, col).text()
    }

    /// Cells of a 1-based row, left to right.
    pub fn row(&self, row: usize) -> &[CellValue] {
        row.checked_sub(1)
            .and_then(|r| self.rows.get(r))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// All worksheets of one workbook, in workbook order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn from_sheets(sheets: Vec<Worksheet>) -> Self {
        Self { sheets }
    }

    /// Reads an `.xlsx` workbook from any byte stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let mut sheets = Vec::new();
        for name in xlsx.sheet_names() {
            let range = xlsx
                .worksheet_range(&name)
                .map_err(|source| IngestError::Sheet {
                    sheet: name.clone(),
                    source,
                })?;
            sheets.push(Worksheet::from_range(&name, &range));
        }
        Ok(Self { sheets })
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    /// Rejects workbooks without worksheets or without a single filled cell.
    pub fn ensure_content(&self) -> Result<()> {
        if self.sheets.is_empty() {
            return Err(IngestError::EmptyWorkbook);
        }
        if !self.sheets.iter().any(Worksheet::has_content) {
            return Err(IngestError::NoContent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_formats_numbers_like_displayed_values() {
        assert_eq!(CellValue::Float(90.0).text(), "90");
        assert_eq!(CellValue::Float(12.5).text(), "12.5");
        assert_eq!(CellValue::Int(7).text(), "7");
        assert_eq!(CellValue::Text("  Lundi ".to_string()).text(), "Lundi");
    }

    #[test]
    fn datetime_text_depends_on_component() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(CellValue::DateTime(midnight).text(), "2025-01-13");

        let time_only = NaiveDate::from_ymd_opt(1899, 12, 30)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(time_only).text(), "08:30");
        assert_eq!(CellValue::DateTime(time_only).as_date(), None);
    }

    #[test]
    fn parse_date_accepts_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 13);
        assert_eq!(parse_date("2025-01-13"), expected);
        assert_eq!(parse_date("13/01/2025"), expected);
        assert_eq!(parse_date("13.01.2025"), expected);
        assert_eq!(parse_date("13/01/2025 00:00:00"), expected);
        assert_eq!(parse_date("Lundi"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn as_int_rejects_fractions_and_words() {
        assert_eq!(CellValue::Float(85.0).as_int(), Some(85));
        assert_eq!(CellValue::Float(85.5).as_int(), None);
        assert_eq!(CellValue::Text(" 70 ".to_string()).as_int(), Some(70));
        assert_eq!(CellValue::Text("Somme B".to_string()).as_int(), None);
        assert_eq!(CellValue::Empty.as_int(), None);
    }

    #[test]
    fn cell_lookup_is_one_based_and_total() {
        let sheet = Worksheet::from_text("DS", &[&["Lundi", "13/01/2025", "08:30"], &["", "", "10:15"]]);
        assert_eq!(sheet.text(1, 1), "Lundi");
        assert_eq!(sheet.text(2, 3), "10:15");
        assert_eq!(sheet.text(0, 1), "");
        assert_eq!(sheet.text(9, 9), "");
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 3);
    }

    #[test]
    fn ensure_content_distinguishes_empty_cases() {
        assert!(matches!(
            Workbook::default().ensure_content(),
            Err(IngestError::EmptyWorkbook)
        ));

        let blank = Workbook::from_sheets(vec![Worksheet::from_text("Feuil1", &[&["", " "]])]);
        assert!(matches!(blank.ensure_content(), Err(IngestError::NoContent)));

        let filled = Workbook::from_sheets(vec![Worksheet::from_text("Feuil1", &[&["x"]])]);
        assert!(filled.ensure_content().is_ok());
    }

    #[test]
    fn garbage_bytes_are_a_workbook_error() {
        let result = Workbook::from_bytes(b"not a zip archive".to_vec());
        assert!(matches!(result, Err(IngestError::Workbook(_))));
    }
}
