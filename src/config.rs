/// Tunables for both extractors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestConfig {
    /// Supervisor quota a session carries until a quota vector is aligned onto it
    pub default_quota: u32,
    /// Case-insensitive worksheet-name fragment marking exam (rather than DS) sheets
    pub exam_sheet_marker: String,
    /// How many leading rows of the roster sheet may hold the header
    pub header_search_rows: usize,
    pub name_header: String,
    pub grade_header: String,
    pub load_header: String,
    /// Label of the row carrying the per-session quota values
    pub quota_label: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_quota: 90,
            exam_sheet_marker: "Ex".to_string(),
            header_search_rows: 10,
            name_header: "Nom Et Prénom Enseignant".to_string(),
            grade_header: "Grade".to_string(),
            load_header: "Charge Surv".to_string(),
            quota_label: "Somme B".to_string(),
        }
    }
}

impl IngestConfig {
    /// Defaults overridden by `SUPERVISION_*` environment variables.
    ///
    /// Unset, blank or unparsable variables keep the default value.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            default_quota: env_parse("SUPERVISION_DEFAULT_QUOTA").unwrap_or(default.default_quota),
            exam_sheet_marker: env_text("SUPERVISION_EXAM_SHEET_MARKER").unwrap_or(default.exam_sheet_marker),
            header_search_rows: env_parse("SUPERVISION_HEADER_SEARCH_ROWS").unwrap_or(default.header_search_rows),
            name_header: env_text("SUPERVISION_NAME_HEADER").unwrap_or(default.name_header),
            grade_header: env_text("SUPERVISION_GRADE_HEADER").unwrap_or(default.grade_header),
            load_header: env_text("SUPERVISION_LOAD_HEADER").unwrap_or(default.load_header),
            quota_label: env_text("SUPERVISION_QUOTA_LABEL").unwrap_or(default.quota_label),
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|v| v.trim().parse().ok())
}

fn env_text(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_source_workbooks() {
        let config = IngestConfig::default();
        assert_eq!(config.default_quota, 90);
        assert_eq!(config.header_search_rows, 10);
        assert_eq!(config.quota_label, "Somme B");
        assert_eq!(config.exam_sheet_marker, "Ex");
    }

    #[test]
    fn env_overrides_and_bad_values_fall_back() {
        std::env::set_var("SUPERVISION_DEFAULT_QUOTA", "75");
        std::env::set_var("SUPERVISION_HEADER_SEARCH_ROWS", "not-a-number");
        let config = IngestConfig::from_env();
        std::env::remove_var("SUPERVISION_DEFAULT_QUOTA");
        std::env::remove_var("SUPERVISION_HEADER_SEARCH_ROWS");

        assert_eq!(config.default_quota, 75);
        assert_eq!(config.header_search_rows, 10);
    }

    #[test]
    fn blank_text_overrides_are_ignored() {
        std::env::set_var("SUPERVISION_QUOTA_LABEL", "   ");
        std::env::set_var("SUPERVISION_EXAM_SHEET_MARKER", "");
        std::env::set_var("SUPERVISION_GRADE_HEADER", " Rang ");
        let config = IngestConfig::from_env();
        std::env::remove_var("SUPERVISION_QUOTA_LABEL");
        std::env::remove_var("SUPERVISION_EXAM_SHEET_MARKER");
        std::env::remove_var("SUPERVISION_GRADE_HEADER");

        assert_eq!(config.quota_label, "Somme B");
        assert_eq!(config.exam_sheet_marker, "Ex");
        assert_eq!(config.grade_header, "Rang");
    }
}
