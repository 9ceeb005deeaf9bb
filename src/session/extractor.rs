use super::names::extract_names;
use super::slot::classify_time;
use super::types::{ExamType, Session, SessionKey};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::workbook::{Workbook, Worksheet};
use chrono::NaiveDate;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info};

const DAY_COL: usize = 1;
const DATE_COL: usize = 2;
const TIME_COL: usize = 3;
const FIRST_TEACHER_COL: usize = 4;

/// Turns an exam-calendar workbook into the ordered, merged session list.
#[derive(Debug, Clone)]
pub struct SessionExtractor {
    default_quota: u32,
    exam_sheet_marker: String,
}

impl SessionExtractor {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            default_quota: config.default_quota,
            exam_sheet_marker: config.exam_sheet_marker.clone(),
        }
    }

    /// Reads every worksheet, merges duplicate sessions and orders the result
    /// by (date, slot).
    pub fn extract(&self, workbook: &Workbook) -> Result<Vec<Session>> {
        workbook.ensure_content()?;

        let mut raw = Vec::new();
        for sheet in workbook.sheets().iter().filter(|s| s.has_content()) {
            let before = raw.len();
            self.read_sheet(sheet, &mut raw);
            debug!(sheet = sheet.name(), rows = raw.len() - before, "read calendar sheet");
        }

        let sessions = group_sessions(raw);
        info!("Loaded {} sessions from calendar workbook", sessions.len());
        Ok(sessions)
    }

    pub fn exam_type_of(&self, sheet: &Worksheet) -> ExamType {
        ExamType::from_sheet_name(sheet.name(), &self.exam_sheet_marker)
    }

    /// Scans one sheet top to bottom. A row with a day label, a parseable date
    /// and a time opens a day block; later rows with a blank day column and a
    /// time continue it.
    fn read_sheet(&self, sheet: &Worksheet, out: &mut Vec<Session>) {
        let exam_type = self.exam_type_of(sheet);
        let mut current_day: Option<String> = None;
        let mut current_date: Option<NaiveDate> = None;

        for row in 1..=sheet.row_count() {
            let day_text = sheet.text(row, DAY_COL);
            let time_text = sheet.text(row, TIME_COL);

            if !day_text.is_empty() {
                match sheet.cell(row, DATE_COL).as_date() {
                    Some(date) if !time_text.is_empty() => {
                        current_day = Some(day_text);
                        current_date = Some(date);
                    }
                    _ => continue,
                }
            } else if current_date.is_none() || time_text.is_empty() {
                continue;
            }

            let Some(slot) = classify_time(&time_text, exam_type) else {
                debug!(sheet = sheet.name(), row, time = %time_text, "no slot for time text");
                continue;
            };
            let Some(date) = current_date else {
                continue;
            };

            let teachers = extract_names(
                (FIRST_TEACHER_COL..=sheet.col_count()).map(|col| sheet.text(row, col)),
            );
            out.push(
                Session::new(exam_type, slot, current_day.clone(), date, self.default_quota)
                    .with_teachers(teachers),
            );
        }
    }
}

/// Collapses sessions sharing (type, date, day, slot) into one, unioning their
/// teachers, then sorts by date and slot. Quota and duration come from the
/// first row of each group.
pub fn group_sessions(raw: Vec<Session>) -> Vec<Session> {
    let mut positions: HashMap<SessionKey, usize> = HashMap::new();
    let mut grouped: Vec<Session> = Vec::new();

    for session in raw {
        match positions.entry(session.key()) {
            Entry::Occupied(entry) => {
                grouped[*entry.get()]
                    .responsible_teachers
                    .extend(session.responsible_teachers);
            }
            Entry::Vacant(entry) => {
                entry.insert(grouped.len());
                grouped.push(session);
            }
        }
    }

    grouped.sort_by(|a, b| a.date.cmp(&b.date).then(a.slot.cmp(&b.slot)));
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use crate::session::Slot;
    use pretty_assertions::assert_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn extractor() -> SessionExtractor {
        SessionExtractor::new(&IngestConfig::default())
    }

    fn summary(sessions: &[Session]) -> Vec<(ExamType, NaiveDate, Option<&str>, Slot, Vec<&str>)> {
        sessions
            .iter()
            .map(|s| {
                (
                    s.exam_type,
                    s.date,
                    s.day.as_deref(),
                    s.slot,
                    s.responsible_teachers.iter().map(String::as_str).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn day_blocks_carry_over_continuation_rows() {
        let sheet = Worksheet::from_text(
            "DS S1",
            &[
                &["Jour", "Date", "Horaire", "Matière"],
                &["Lundi", "13/01/2025", "08:30-09:30", "Algo (A. Ali)"],
                &["", "", "10:15-11:15", "Réseaux (B. Bakri)", "Web (C. Chaabane)"],
                &["", "", "", ""],
                &["Mardi", "14/01/2025", "12:00-13:00", "Salle 4"],
                &["", "", "13:45-14:45", "BD (A. Ali)"],
            ],
        );
        let sessions = extractor().extract(&Workbook::from_sheets(vec![sheet])).unwrap();

        assert_eq!(
            summary(&sessions),
            vec![
                (ExamType::Ds, date(13), Some("Lundi"), Slot::S1, vec!["A. Ali"]),
                (ExamType::Ds, date(13), Some("Lundi"), Slot::S2, vec!["B. Bakri", "C. Chaabane"]),
                (ExamType::Ds, date(14), Some("Mardi"), Slot::S3, vec![]),
                (ExamType::Ds, date(14), Some("Mardi"), Slot::S4, vec!["A. Ali"]),
            ]
        );
        assert!(sessions.iter().all(|s| s.quota == 90 && s.duration_hours == 1.0));
    }

    #[test]
    fn rows_before_first_day_block_are_skipped() {
        let sheet = Worksheet::from_text(
            "DS",
            &[
                &["", "", "08:30", "Orphan (X. Y)"],
                &["Lundi", "not a date", "08:30", "Bad (Z. Z)"],
                &["", "", "10:15", "Still orphan (W. W)"],
            ],
        );
        let sessions = extractor().extract(&Workbook::from_sheets(vec![sheet])).unwrap();
        assert!(sessions.is_empty());
    }

    #[test]
    fn a_day_row_without_time_does_not_open_a_block() {
        let sheet = Worksheet::from_text(
            "DS",
            &[
                &["Lundi", "13/01/2025", "08:30", ""],
                &["Mardi", "14/01/2025", "", ""],
                &["", "", "10:15", "Kept on Monday (A. Ali)"],
            ],
        );
        let sessions = extractor().extract(&Workbook::from_sheets(vec![sheet])).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[1].date, date(13));
        assert_eq!(sessions[1].slot, Slot::S2);
    }

    #[test]
    fn unmatched_time_text_produces_no_session() {
        let sheet = Worksheet::from_text(
            "Examens",
            &[
                &["Lundi", "13/01/2025", "10:15", "Maths (A. Ali)"],
                &["", "", "10h-12h", "Maths (A. Ali)"],
            ],
        );
        let sessions = extractor().extract(&Workbook::from_sheets(vec![sheet])).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].exam_type, ExamType::Exam);
        assert_eq!(sessions[0].slot, Slot::S2);
        assert_eq!(sessions[0].duration_hours, 1.5);
    }

    #[test]
    fn identical_sessions_across_sheets_are_merged() {
        let first = Worksheet::from_text(
            "DS groupe 1",
            &[&["Lundi", "13/01/2025", "08:30", "Algo (A. Ali)", "Algo (B. Bakri)"]],
        );
        let second = Worksheet::from_text(
            "DS groupe 2",
            &[&["Lundi", "13/01/2025", "08:00", "Archi (B. Bakri)", "Archi (C. Chaabane)"]],
        );
        let sessions = extractor()
            .extract(&Workbook::from_sheets(vec![first, second]))
            .unwrap();

        assert_eq!(
            summary(&sessions),
            vec![(
                ExamType::Ds,
                date(13),
                Some("Lundi"),
                Slot::S1,
                vec!["A. Ali", "B. Bakri", "C. Chaabane"]
            )]
        );
    }

    #[test]
    fn different_exam_types_are_not_merged() {
        let ds = Worksheet::from_text("DS", &[&["Lundi", "13/01/2025", "08:30", "(A. Ali)"]]);
        let exam = Worksheet::from_text("Examen", &[&["Lundi", "13/01/2025", "08:30", "(B. Bakri)"]]);
        let sessions = extractor().extract(&Workbook::from_sheets(vec![ds, exam])).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].exam_type, ExamType::Ds);
        assert_eq!(sessions[1].exam_type, ExamType::Exam);
    }

    #[test]
    fn result_is_sorted_by_date_then_slot() {
        let later = Worksheet::from_text(
            "DS A",
            &[
                &["Mercredi", "15/01/2025", "13:45", ""],
                &["", "", "08:30", ""],
            ],
        );
        let earlier = Worksheet::from_text(
            "DS B",
            &[
                &["Lundi", "13/01/2025", "12:00", ""],
                &["", "", "10:15", ""],
            ],
        );
        let sessions = extractor()
            .extract(&Workbook::from_sheets(vec![later, earlier]))
            .unwrap();
        let order: Vec<(NaiveDate, Slot)> = sessions.iter().map(|s| (s.date, s.slot)).collect();
        assert_eq!(
            order,
            vec![
                (date(13), Slot::S2),
                (date(13), Slot::S3),
                (date(15), Slot::S1),
                (date(15), Slot::S4),
            ]
        );
    }

    #[test]
    fn configured_default_quota_is_used() {
        let config = IngestConfig {
            default_quota: 40,
            ..IngestConfig::default()
        };
        let sheet = Worksheet::from_text("DS", &[&["Lundi", "13/01/2025", "08:30"]]);
        let sessions = SessionExtractor::new(&config)
            .extract(&Workbook::from_sheets(vec![sheet]))
            .unwrap();
        assert_eq!(sessions[0].quota, 40);
    }

    #[test]
    fn workbook_without_content_is_rejected() {
        let blank = Workbook::from_sheets(vec![Worksheet::from_text("DS", &[&[""]])]);
        assert!(matches!(extractor().extract(&blank), Err(IngestError::NoContent)));
        assert!(matches!(
            extractor().extract(&Workbook::default()),
            Err(IngestError::EmptyWorkbook)
        ));
    }
}
