use serde::{Deserialize, Serialize};

/// One roster line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub full_name: String,
    /// Empty when the sheet leaves it blank
    pub grade: String,
    /// Supervision load in hours, 0 when unreadable
    pub hourly_load: u32,
}

impl Teacher {
    pub fn new(full_name: impl Into<String>, grade: impl Into<String>, hourly_load: u32) -> Self {
        Self {
            full_name: full_name.into(),
            grade: grade.into(),
            hourly_load,
        }
    }
}

/// Everything read from a roster workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    /// In sheet order, duplicates preserved
    pub teachers: Vec<Teacher>,
    /// Integers of the quota row, left to right; negatives read as 0
    pub quota_vector: Vec<u32>,
    pub quota_row_found: bool,
}
