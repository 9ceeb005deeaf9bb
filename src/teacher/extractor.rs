use super::header::{locate_header, HeaderLabels, HeaderLayout};
use super::types::{Roster, Teacher};
use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::workbook::{Workbook, Worksheet};
use tracing::{info, warn};

/// Reads the teacher roster and the quota row out of a roster workbook.
#[derive(Debug, Clone)]
pub struct TeacherExtractor {
    labels: HeaderLabels,
    header_search_rows: usize,
    quota_label: String,
}

impl TeacherExtractor {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            labels: HeaderLabels::from_config(config),
            header_search_rows: config.header_search_rows,
            quota_label: config.quota_label.clone(),
        }
    }

    /// Teachers come from the first worksheet with any content; the quota row
    /// may sit on any worksheet.
    pub fn extract(&self, workbook: &Workbook) -> Result<Roster> {
        if workbook.sheets().is_empty() {
            return Err(IngestError::EmptyWorkbook);
        }
        let sheet = workbook
            .sheets()
            .iter()
            .find(|s| s.has_content())
            .ok_or(IngestError::NoContent)?;

        let layout = locate_header(sheet, &self.labels, self.header_search_rows)?;
        let teachers = read_teachers(sheet, &layout);

        let quota_vector = scan_quota_row(workbook.sheets(), &self.quota_label);
        let quota_row_found = quota_vector.is_some();
        if !quota_row_found {
            warn!("'{}' row not found in any worksheet", self.quota_label);
        }
        let quota_vector = quota_vector.unwrap_or_default();

        info!(
            "Loaded {} teachers and {} {} values from roster workbook",
            teachers.len(),
            quota_vector.len(),
            self.quota_label
        );
        Ok(Roster {
            teachers,
            quota_vector,
            quota_row_found,
        })
    }
}

/// One teacher per row after the header; rows with a blank name are skipped.
pub fn read_teachers(sheet: &Worksheet, layout: &HeaderLayout) -> Vec<Teacher> {
    ((layout.row + 1)..=sheet.row_count())
        .filter_map(|row| {
            let full_name = sheet.text(row, layout.name_col);
            if full_name.is_empty() {
                return None;
            }
            let hourly_load = sheet
                .cell(row, layout.load_col)
                .as_int()
                .and_then(|load| u32::try_from(load).ok())
                .unwrap_or(0);
            Some(Teacher {
                full_name,
                grade: sheet.text(row, layout.grade_col),
                hourly_load,
            })
        })
        .collect()
}

/// Finds the first cell (sheet by sheet, row-major) equal to `label` and
/// returns every integer of its row, left to right. Negative values count as
/// a zero quota and keep their position.
///
/// `None` when no sheet carries the label.
pub fn scan_quota_row(sheets: &[Worksheet], label: &str) -> Option<Vec<u32>> {
    let label = label.to_lowercase();
    for sheet in sheets {
        for row in 1..=sheet.row_count() {
            let cells = sheet.row(row);
            if cells.iter().any(|cell| cell.text().to_lowercase() == label) {
                let quotas = cells
                    .iter()
                    .filter_map(|cell| cell.as_int())
                    .map(|value| value.clamp(0, i64::from(u32::MAX)) as u32)
                    .collect();
                return Some(quotas);
            }
        }
    }
    None
}
