use thiserror::Error;

/// Failures that abort a workbook load.
///
/// Partial-data problems (unparsable load cells, a missing quota row, a quota
/// vector shorter than the session list) are absorbed by the extractors and
/// never show up here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("workbook contains no worksheets")]
    EmptyWorkbook,

    #[error("no worksheet in the workbook has any content")]
    NoContent,

    #[error(
        "unable to locate teacher headers within the first {rows_searched} rows of sheet '{sheet}' (missing: {})",
        .missing.join(", ")
    )]
    HeaderNotFound {
        sheet: String,
        rows_searched: usize,
        missing: Vec<String>,
    },

    #[error("calendar workbook produced no sessions")]
    NoSessions,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
