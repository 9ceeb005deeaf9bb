//! Ingestion core for exam supervision planning.
//!
//! Two independent pipelines feed one model:
//!
//! - [`session::SessionExtractor`] reads an exam/DS calendar workbook into an
//!   ordered, deduplicated list of [`session::Session`]s.
//! - [`teacher::TeacherExtractor`] reads a roster workbook into
//!   [`teacher::Teacher`] records plus the quota vector found on the
//!   "Somme B" row.
//!
//! [`align::align_quotas`] maps the quota vector onto the sessions by position
//! and [`registry::Registry`] holds the latest results of both, realigning
//! whenever either side is reloaded.

pub mod align;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod registry;
pub mod session;
pub mod teacher;
pub mod workbook;

pub use align::{align_quotas, Alignment};
pub use config::IngestConfig;
pub use error::{IngestError, Result};
pub use registry::Registry;
pub use session::{ExamType, Session, Slot};
pub use teacher::{Roster, Teacher, TeacherFilter};
pub use workbook::Workbook;
