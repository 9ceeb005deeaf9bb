use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::workbook::Worksheet;

/// The three column labels the roster header is recognised by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabels {
    pub name: String,
    pub grade: String,
    pub load: String,
}

impl HeaderLabels {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            name: config.name_header.clone(),
            grade: config.grade_header.clone(),
            load: config.load_header.clone(),
        }
    }

    fn matches_any(&self, text: &str) -> bool {
        [&self.name, &self.grade, &self.load]
            .iter()
            .any(|label| same_label(label, text))
    }
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self::from_config(&IngestConfig::default())
    }
}

fn same_label(label: &str, text: &str) -> bool {
    label.to_lowercase() == text.to_lowercase()
}

/// A row holding at least two of the three labels, with whatever columns it resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
    pub row: usize,
    pub name_col: Option<usize>,
    pub grade_col: Option<usize>,
    pub load_col: Option<usize>,
}

/// Fully resolved header: every column is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub row: usize,
    pub name_col: usize,
    pub grade_col: usize,
    pub load_col: usize,
}

/// First row within `max_rows` carrying at least two of the labels
/// (trimmed, case-insensitive exact match).
pub fn find_header_row(sheet: &Worksheet, labels: &HeaderLabels, max_rows: usize) -> Option<HeaderMatch> {
    let last_row = sheet.row_count().min(max_rows);

    (1..=last_row).find_map(|row| {
        let texts: Vec<String> = sheet.row(row).iter().map(|cell| cell.text()).collect();
        let hits = texts.iter().filter(|text| labels.matches_any(text)).count();
        if hits < 2 {
            return None;
        }

        let mut found = HeaderMatch {
            row,
            name_col: None,
            grade_col: None,
            load_col: None,
        };
        for (idx, text) in texts.iter().enumerate() {
            let col = idx + 1;
            if same_label(&labels.name, text) {
                found.name_col = Some(col);
            }
            if same_label(&labels.grade, text) {
                found.grade_col = Some(col);
            }
            if same_label(&labels.load, text) {
                found.load_col = Some(col);
            }
        }
        Some(found)
    })
}

/// Locates the roster header and insists on all three columns.
pub fn locate_header(sheet: &Worksheet, labels: &HeaderLabels, max_rows: usize) -> Result<HeaderLayout> {
    let not_found = |missing: Vec<String>| IngestError::HeaderNotFound {
        sheet: sheet.name().to_string(),
        rows_searched: max_rows,
        missing,
    };

    let Some(found) = find_header_row(sheet, labels, max_rows) else {
        return Err(not_found(vec![
            labels.name.clone(),
            labels.grade.clone(),
            labels.load.clone(),
        ]));
    };

    match (found.name_col, found.grade_col, found.load_col) {
        (Some(name_col), Some(grade_col), Some(load_col)) => Ok(HeaderLayout {
            row: found.row,
            name_col,
            grade_col,
            load_col,
        }),
        (name_col, grade_col, load_col) => {
            let missing = [
                (name_col, &labels.name),
                (grade_col, &labels.grade),
                (load_col, &labels.load),
            ]
            .into_iter()
            .filter(|(col, _)| col.is_none())
            .map(|(_, label)| label.clone())
            .collect();
            Err(not_found(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_full_header_below_title_rows() {
        let sheet = Worksheet::from_text(
            "Enseignants",
            &[
                &["Liste des enseignants"],
                &[""],
                &["N°", "nom et prénom enseignant", " GRADE ", "Charge Surv"],
                &["1", "Ali Ahmed", "MA", "12"],
            ],
        );
        let layout = locate_header(&sheet, &HeaderLabels::default(), 10).unwrap();
        assert_eq!(
            layout,
            HeaderLayout {
                row: 3,
                name_col: 2,
                grade_col: 3,
                load_col: 4
            }
        );
    }

    #[test]
    fn two_of_three_labels_identify_the_row() {
        let sheet = Worksheet::from_text(
            "Enseignants",
            &[
                &["Liste"],
                &[""],
                &["Enseignant", "Grade", "Charge Surv"],
            ],
        );
        let found = find_header_row(&sheet, &HeaderLabels::default(), 10).unwrap();
        assert_eq!(found.row, 3);
        assert_eq!(found.name_col, None);
        assert_eq!(found.grade_col, Some(2));
        assert_eq!(found.load_col, Some(3));
    }

    #[test]
    fn partial_header_is_fatal_for_the_layout() {
        let sheet = Worksheet::from_text("Enseignants", &[&["Enseignant", "Grade", "Charge Surv"]]);
        match locate_header(&sheet, &HeaderLabels::default(), 10) {
            Err(IngestError::HeaderNotFound { missing, .. }) => {
                assert_eq!(missing, vec!["Nom Et Prénom Enseignant".to_string()]);
            }
            other => panic!("expected HeaderNotFound, got {other:?}"),
        }
    }

    #[test]
    fn single_label_rows_do_not_count() {
        let sheet = Worksheet::from_text("Enseignants", &[&["Grade"], &["Charge Surv"]]);
        assert_eq!(find_header_row(&sheet, &HeaderLabels::default(), 10), None);
    }

    #[test]
    fn header_beyond_search_window_is_not_found() {
        let title: &[&str] = &["titre"];
        let mut rows: Vec<&[&str]> = vec![title; 10];
        rows.push(&["Nom Et Prénom Enseignant", "Grade", "Charge Surv"]);
        let sheet = Worksheet::from_text("Enseignants", &rows);

        let err = locate_header(&sheet, &HeaderLabels::default(), 10).unwrap_err();
        assert!(matches!(err, IngestError::HeaderNotFound { rows_searched: 10, .. }));
        assert!(locate_header(&sheet, &HeaderLabels::default(), 11).is_ok());
    }
}
