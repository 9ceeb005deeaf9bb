use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use supervision_ingest::display::{print_alignment, print_sessions, print_teachers, write_sessions_to_file};
use supervision_ingest::export::{export_sessions_to_csv, export_teachers_to_csv, ScheduleRequest};
use supervision_ingest::{logging, IngestConfig, Registry, TeacherFilter};
use tracing::info;

/// Reads the exam calendar and teacher roster workbooks and prints the
/// supervision model built from them.
#[derive(Parser, Debug)]
#[command(name = "supervision-ingest", version, about)]
struct Cli {
    /// Exam/DS calendar workbook (.xlsx)
    #[arg(long, required_unless_present = "roster")]
    calendar: Option<PathBuf>,

    /// Teacher roster workbook (.xlsx)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Write the scheduling request payload as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    #[arg(long)]
    sessions_csv: Option<PathBuf>,

    #[arg(long)]
    teachers_csv: Option<PathBuf>,

    /// Plain-text session listing
    #[arg(long)]
    sessions_txt: Option<PathBuf>,

    /// Only list teachers whose name contains this text
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    grade: Option<String>,

    #[arg(long)]
    min_load: Option<u32>,

    #[arg(long)]
    max_load: Option<u32>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut registry = Registry::new(IngestConfig::from_env());

    if let Some(path) = &cli.roster {
        info!("Loading roster from {}", path.display());
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        registry
            .load_roster(file)
            .with_context(|| format!("error processing roster workbook {}", path.display()))?;
    }

    if let Some(path) = &cli.calendar {
        info!("Loading calendar from {}", path.display());
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        registry
            .load_calendar(file)
            .with_context(|| format!("error processing calendar workbook {}", path.display()))?;
    }

    if !registry.sessions().is_empty() {
        print_sessions(registry.sessions(), registry.day_summary().as_ref());
    }

    if registry.roster().is_some() {
        let filter = TeacherFilter {
            name: cli.name.clone(),
            grade: cli.grade.clone(),
            min_hourly_load: cli.min_load,
            max_hourly_load: cli.max_load,
        };
        let title = if filter.is_empty() { "Teachers" } else { "Matching teachers" };
        print_teachers(title, &registry.search_teachers(&filter));
    }

    print_alignment(registry.alignment(), registry.quota_vector());

    if let Some(path) = &cli.sessions_csv {
        export_sessions_to_csv(registry.sessions(), path)?;
        info!("Sessions saved to {}", path.display());
    }
    if let Some(path) = &cli.teachers_csv {
        export_teachers_to_csv(registry.teachers(), path)?;
        info!("Teachers saved to {}", path.display());
    }
    if let Some(path) = &cli.sessions_txt {
        write_sessions_to_file(registry.sessions(), path)?;
        info!("Session listing saved to {}", path.display());
    }
    if let Some(path) = &cli.json {
        ScheduleRequest::new(registry.sessions(), registry.teachers()).write_json(path)?;
        info!("Scheduling request saved to {}", path.display());
    }

    Ok(())
}
