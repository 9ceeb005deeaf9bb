use crate::error::Result;
use crate::session::{ExamType, Session, Slot};
use crate::teacher::Teacher;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const SESSION_HEADERS: [&str; 7] = ["type", "slot", "day", "date", "quota", "duration_hours", "responsible_teachers"];
const TEACHER_HEADERS: [&str; 3] = ["full_name", "grade", "hourly_load"];

/// Writes the session list as CSV, one row per session, teachers joined by "; ".
pub fn export_sessions_to_csv(sessions: &[Session], csv_path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(csv_path)?;
    wtr.write_record(SESSION_HEADERS)?;

    for session in sessions {
        let teachers = session
            .responsible_teachers
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        let date = session.date.format("%Y-%m-%d").to_string();
        let quota = session.quota.to_string();
        let duration = session.duration_hours.to_string();
        wtr.write_record([
            session.exam_type.as_str(),
            session.slot.as_str(),
            session.day.as_deref().unwrap_or(""),
            date.as_str(),
            quota.as_str(),
            duration.as_str(),
            teachers.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the roster as CSV in sheet order.
pub fn export_teachers_to_csv(teachers: &[Teacher], csv_path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(csv_path)?;
    wtr.write_record(TEACHER_HEADERS)?;

    for teacher in teachers {
        let load = teacher.hourly_load.to_string();
        wtr.write_record([teacher.full_name.as_str(), teacher.grade.as_str(), load.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Request body understood by the external scheduling optimizer.
#[derive(Debug, Serialize)]
pub struct ScheduleRequest<'a> {
    pub sessions: Vec<SessionPayload<'a>>,
    pub teachers: Vec<TeacherPayload<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload<'a> {
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    pub num_session: Slot,
    pub day: &'a str,
    pub date: String,
    pub max_supervisor: u32,
    pub delay: f64,
    pub responsible_name: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPayload<'a> {
    pub full_name: &'a str,
    pub grade: &'a str,
    pub hourly_load: u32,
}

impl<'a> ScheduleRequest<'a> {
    pub fn new(sessions: &'a [Session], teachers: &'a [Teacher]) -> Self {
        let sessions = sessions
            .iter()
            .map(|s| SessionPayload {
                exam_type: s.exam_type,
                num_session: s.slot,
                day: s.day.as_deref().unwrap_or(""),
                date: s.date.format("%Y-%m-%d").to_string(),
                max_supervisor: s.quota,
                delay: s.duration_hours,
                responsible_name: s.responsible_teachers.iter().map(String::as_str).collect(),
            })
            .collect();
        let teachers = teachers
            .iter()
            .map(|t| TeacherPayload {
                full_name: &t.full_name,
                grade: &t.grade,
                hourly_load: t.hourly_load,
            })
            .collect();
        Self { sessions, teachers }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        writeln!(file)?;
        Ok(())
    }
}
