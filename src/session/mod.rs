pub mod types;
pub mod slot;
pub mod names;
pub mod extractor;

pub use types::{DayDate, DaySummary, ExamType, Session, SessionKey, Slot};
pub use slot::classify_time;
pub use names::{extract_name, extract_names};
pub use extractor::{group_sessions, SessionExtractor};
