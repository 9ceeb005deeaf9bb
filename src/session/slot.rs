use super::types::{ExamType, Slot};

/// A slot matches when the time text contains every token.
struct TimeRule {
    tokens: &'static [&'static str],
    slot: Slot,
}

// Evaluated top to bottom, first match wins. "13" and "14" both lead to S4.
const DS_RULES: &[TimeRule] = &[
    TimeRule { tokens: &["08"], slot: Slot::S1 },
    TimeRule { tokens: &["10"], slot: Slot::S2 },
    TimeRule { tokens: &["12"], slot: Slot::S3 },
    TimeRule { tokens: &["13"], slot: Slot::S4 },
    TimeRule { tokens: &["14"], slot: Slot::S4 },
];

// "13"+"14" and "14"+"15" both lead to S3; the latter only after S4 had its chance.
const EXAM_RULES: &[TimeRule] = &[
    TimeRule { tokens: &["08"], slot: Slot::S1 },
    TimeRule { tokens: &["10", "12"], slot: Slot::S2 },
    TimeRule { tokens: &["13", "14"], slot: Slot::S3 },
    TimeRule { tokens: &["15", "16"], slot: Slot::S4 },
    TimeRule { tokens: &["14", "15"], slot: Slot::S3 },
];

/// Maps a raw time cell (e.g. "08:30-10:00", "10h-12h") to its daily slot.
///
/// `None` is the normal outcome for header and separator rows.
pub fn classify_time(time: &str, exam_type: ExamType) -> Option<Slot> {
    let rules = match exam_type {
        ExamType::Ds => DS_RULES,
        ExamType::Exam => EXAM_RULES,
    };
    rules
        .iter()
        .find(|rule| rule.tokens.iter().all(|token| time.contains(token)))
        .map(|rule| rule.slot)
}
