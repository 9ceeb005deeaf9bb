pub mod types;
pub mod header;
pub mod extractor;
pub mod search;

pub use types::{Roster, Teacher};
pub use header::{find_header_row, locate_header, HeaderLabels, HeaderLayout, HeaderMatch};
pub use extractor::{read_teachers, scan_quota_row, TeacherExtractor};
pub use search::{search_teachers, TeacherFilter};
