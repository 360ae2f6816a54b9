//! Error types for spreadsheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an upload into an import table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Source Errors ===
    /// File type is not one of the accepted spreadsheet formats.
    #[error("unsupported file type '{kind}': upload an .xlsx, .xls or .csv file")]
    UnsupportedFileType { kind: String },

    /// Upload exceeds the size limit.
    #[error("file is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge { size: u64, max_size: u64 },

    /// Upload file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the upload.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// The workbook container could not be opened or a sheet could not be read.
    #[error("failed to read workbook: {message}")]
    Workbook { message: String },

    /// The CSV stream could not be decoded.
    #[error("failed to parse CSV: {message}")]
    CsvParse { message: String },

    /// A CSV record could not be decoded and strict row handling is on.
    #[error("malformed row {line} in sheet '{sheet}': {message}")]
    MalformedRow {
        sheet: String,
        line: u64,
        message: String,
    },

    // === Content Errors ===
    /// No sheet had a header row and at least one data row.
    #[error("no data found: every sheet is empty or has only a header row")]
    NoData,

    /// Combined row count across all sheets exceeds the per-import limit.
    #[error("{count} rows found across all sheets; at most {max} rows can be imported at once")]
    TooManyRows { count: usize, max: usize },

    // === Template Errors ===
    /// Failed to build the import template workbook.
    #[error("failed to write template: {0}")]
    Template(#[from] rust_xlsxwriter::XlsxError),
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

impl IngestError {
    /// A hint for fixing the upload, when one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedFileType { .. } => {
                Some("Save the sheet as .xlsx or .csv and upload it again.")
            }
            Self::FileTooLarge { .. } | Self::TooManyRows { .. } => {
                Some("Split the roster into smaller files and import them one at a time.")
            }
            Self::NoData => Some("Put the column headers in the first row and students below."),
            Self::MalformedRow { .. } => {
                Some("Fix the row or run without --strict-rows to skip it.")
            }
            Self::FileNotFound { .. }
            | Self::FileRead { .. }
            | Self::Workbook { .. }
            | Self::CsvParse { .. }
            | Self::Template(_) => None,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
