use once_cell::sync::Lazy;
use regex::Regex;

static NAME_IN_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("valid name pattern"));

/// Pulls the teacher name out of an annotated cell: "Room 204 (J. Doe)" -> "J. Doe".
///
/// Only the first parenthesised segment counts.
pub fn extract_name(cell: &str) -> Option<String> {
    let captures = NAME_IN_PARENS.captures(cell)?;
    let name = captures.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Names found across the cells of one row, first occurrence kept.
pub fn extract_names<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = Vec::new();
    for cell in cells {
        let cell = cell.as_ref();
        if cell.is_empty() {
            continue;
        }
        if let Some(name) = extract_name(cell) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}
