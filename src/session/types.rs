use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of examination a worksheet describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "DS")]
    Ds,
    Exam,
}

impl ExamType {
    /// Classifies a worksheet by name: sheets whose name contains `marker`
    /// (case-insensitive) hold exams, every other sheet holds DS.
    pub fn from_sheet_name(sheet_name: &str, marker: &str) -> Self {
        if sheet_name.to_lowercase().contains(&marker.to_lowercase()) {
            ExamType::Exam
        } else {
            ExamType::Ds
        }
    }

    /// Duration of one sitting in hours.
    pub fn duration_hours(self) -> f64 {
        match self {
            ExamType::Ds => 1.0,
            ExamType::Exam => 1.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExamType::Ds => "DS",
            ExamType::Exam => "Exam",
        }
    }
}

/// One of the four fixed daily examination periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    S1,
    S2,
    S3,
    S4,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::S1, Slot::S2, Slot::S3, Slot::S4];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::S1 => "S1",
            Slot::S2 => "S2",
            Slot::S3 => "S3",
            Slot::S4 => "S4",
        }
    }

    /// Nominal (start, end) clock times of the period for the given exam type.
    pub fn period(self, exam_type: ExamType) -> (&'static str, &'static str) {
        match (self, exam_type) {
            (Slot::S1, ExamType::Ds) => ("08:30", "09:30"),
            (Slot::S1, ExamType::Exam) => ("08:30", "10:00"),
            (Slot::S2, ExamType::Ds) => ("10:15", "11:15"),
            (Slot::S2, ExamType::Exam) => ("10:15", "11:45"),
            (Slot::S3, ExamType::Ds) => ("12:00", "13:00"),
            (Slot::S3, ExamType::Exam) => ("12:00", "13:30"),
            (Slot::S4, ExamType::Ds) => ("13:45", "14:45"),
            (Slot::S4, ExamType::Exam) => ("13:45", "15:15"),
        }
    }
}

/// Identity of a logical session; raw rows sharing it are merged.
pub type SessionKey = (ExamType, NaiveDate, Option<String>, Slot);

/// One examination period requiring supervision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub exam_type: ExamType,
    pub slot: Slot,
    pub day: Option<String>,
    pub date: NaiveDate,
    /// Maximum number of supervisors
    pub quota: u32,
    pub duration_hours: f64,
    pub responsible_teachers: BTreeSet<String>,
}

impl Session {
    pub fn new(exam_type: ExamType, slot: Slot, day: Option<String>, date: NaiveDate, quota: u32) -> Self {
        Self {
            exam_type,
            slot,
            day,
            date,
            quota,
            duration_hours: exam_type.duration_hours(),
            responsible_teachers: BTreeSet::new(),
        }
    }

    pub fn with_teachers<I, S>(mut self, teachers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responsible_teachers.extend(teachers.into_iter().map(Into::into));
        self
    }

    pub fn key(&self) -> SessionKey {
        (self.exam_type, self.date, self.day.clone(), self.slot)
    }
}

/// A distinct (date, day) pair of the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDate {
    pub day: Option<String>,
    pub date: NaiveDate,
}

/// Calendar overview: exam type of the first session plus its distinct days and dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    pub days: Vec<Option<String>>,
    pub dates: Vec<NaiveDate>,
}
