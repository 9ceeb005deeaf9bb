use crate::align::Alignment;
use crate::session::{DaySummary, Session};
use crate::teacher::Teacher;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formats a set of responsible teachers for a single line
pub fn format_teacher_names(names: &BTreeSet<String>) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// One session as `YYYY-MM-DD Day S1 (08:30-09:30) DS quota=90 [names]`
pub fn format_session_line(session: &Session) -> String {
    let (start, end) = session.slot.period(session.exam_type);
    format!(
        "{} {} {} ({}-{}) {} quota={} [{}]",
        session.date.format("%Y-%m-%d"),
        session.day.as_deref().unwrap_or("?"),
        session.slot.as_str(),
        start,
        end,
        session.exam_type.as_str(),
        session.quota,
        format_teacher_names(&session.responsible_teachers)
    )
}

pub fn format_teacher_line(teacher: &Teacher) -> String {
    let grade = if teacher.grade.is_empty() { "-" } else { teacher.grade.as_str() };
    format!("{} ({}) load={}", teacher.full_name, grade, teacher.hourly_load)
}

/// Writes the session list to a text file, one session per line
pub fn write_sessions_to_file(sessions: &[Session], path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "** Sessions ({}) **", sessions.len())?;
    for session in sessions {
        writeln!(file, "{}", format_session_line(session))?;
    }
    Ok(())
}

/// Prints the calendar grouped under its day headings
pub fn print_sessions(sessions: &[Session], summary: Option<&DaySummary>) {
    println!("\n=== Sessions ===");
    println!("Total sessions: {}", sessions.len());
    if let Some(summary) = summary {
        println!("Type: {}, days: {}", summary.exam_type.as_str(), summary.dates.len());
    }

    let mut last_date = None;
    for session in sessions {
        if last_date != Some(session.date) {
            println!(
                "\n{} {}",
                session.day.as_deref().unwrap_or(""),
                session.date.format("%d/%m/%Y")
            );
            last_date = Some(session.date);
        }
        let (start, end) = session.slot.period(session.exam_type);
        println!(
            "  {} ({}-{}) quota={} -> {}",
            session.slot.as_str(),
            start,
            end,
            session.quota,
            format_teacher_names(&session.responsible_teachers)
        );
    }
}

pub fn print_teachers(title: &str, teachers: &[&Teacher]) {
    println!("\n=== {} ===", title);
    println!("Total teachers: {}", teachers.len());
    for teacher in teachers {
        println!("  - {}", format_teacher_line(teacher));
    }
}

pub fn print_alignment(alignment: Option<Alignment>, quotas: &[u32]) {
    match alignment {
        Some(Alignment::Applied { sessions }) => {
            println!("\nQuotas applied to {} sessions ({} values available)", sessions, quotas.len());
        }
        Some(Alignment::Skipped { sessions, quotas }) => {
            println!(
                "\n⚠️  Quota row has {} values for {} sessions, default quotas kept",
                quotas, sessions
            );
        }
        None => {}
    }
}
