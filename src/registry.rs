//! Caller-owned home for the latest extraction results.
//!
//! Each load parses into fresh values and only replaces the current snapshot
//! once parsing succeeded, so a failed upload leaves the previous data intact.
//! Loads take `&mut self`; callers sharing a registry across threads must
//! serialise access themselves.

use crate::align::{align_quotas, reset_quotas, Alignment};
use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::session::{DayDate, DaySummary, Session, SessionExtractor};
use crate::teacher::{search_teachers, Roster, Teacher, TeacherExtractor, TeacherFilter};
use crate::workbook::Workbook;
use std::io::Read;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    config: IngestConfig,
    sessions: Vec<Session>,
    roster: Option<Roster>,
    alignment: Option<Alignment>,
}

impl Registry {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replaces the sessions with those of an exam-calendar workbook stream.
    pub fn load_calendar<R: Read>(&mut self, reader: R) -> Result<usize> {
        let workbook = Workbook::from_reader(reader)?;
        self.load_calendar_workbook(&workbook)
    }

    pub fn load_calendar_workbook(&mut self, workbook: &Workbook) -> Result<usize> {
        let mut sessions = SessionExtractor::new(&self.config).extract(workbook)?;
        if sessions.is_empty() {
            return Err(IngestError::NoSessions);
        }
        self.alignment = self
            .roster
            .as_ref()
            .map(|roster| align_quotas(&mut sessions, &roster.quota_vector));
        self.sessions = sessions;
        Ok(self.sessions.len())
    }

    /// Replaces the roster with that of a roster workbook stream and realigns
    /// the current sessions against its quota row.
    pub fn load_roster<R: Read>(&mut self, reader: R) -> Result<usize> {
        let workbook = Workbook::from_reader(reader)?;
        self.load_roster_workbook(&workbook)
    }

    pub fn load_roster_workbook(&mut self, workbook: &Workbook) -> Result<usize> {
        let roster = TeacherExtractor::new(&self.config).extract(workbook)?;
        if !self.sessions.is_empty() {
            reset_quotas(&mut self.sessions, self.config.default_quota);
            self.alignment = Some(align_quotas(&mut self.sessions, &roster.quota_vector));
        }
        let count = roster.teachers.len();
        self.roster = Some(roster);
        Ok(count)
    }

    /// Sessions ordered by (date, slot).
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn teachers(&self) -> &[Teacher] {
        self.roster.as_ref().map(|r| r.teachers.as_slice()).unwrap_or(&[])
    }

    pub fn quota_vector(&self) -> &[u32] {
        self.roster.as_ref().map(|r| r.quota_vector.as_slice()).unwrap_or(&[])
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    /// Outcome of the most recent quota alignment, if both workbooks were loaded.
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    /// Distinct (date, day) pairs in session order.
    pub fn day_dates(&self) -> Vec<DayDate> {
        let mut pairs: Vec<DayDate> = Vec::new();
        for session in &self.sessions {
            let pair = DayDate {
                day: session.day.clone(),
                date: session.date,
            };
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
        pairs
    }

    /// Exam type of the first session with the calendar's days and dates.
    pub fn day_summary(&self) -> Option<DaySummary> {
        let first = self.sessions.first()?;
        let (days, dates): (Vec<_>, Vec<_>) = self
            .day_dates()
            .into_iter()
            .map(|pair| (pair.day, pair.date))
            .unzip();
        Some(DaySummary {
            exam_type: first.exam_type,
            days,
            dates,
        })
    }

    pub fn search_teachers<'a>(&'a self, filter: &'a TeacherFilter) -> Vec<&'a Teacher> {
        let found: Vec<&Teacher> = search_teachers(self.teachers(), filter).collect();
        debug!(matches = found.len(), "teacher search");
        found
    }
}
