//! Spreadsheet ingestion for the roster import pipeline.
//!
//! This crate turns an uploaded workbook or CSV file into one unified
//! [`ImportTable`](roster_model::ImportTable):
//!
//! - **Source checks**: accepted file types and the upload size limit
//! - **Decoding**: every worksheet of an XLSX/XLS/ODS workbook via calamine,
//!   or a single CSV sheet via the `csv` crate
//! - **Sheet merging**: cohort tokens read from sheet names, synthetic
//!   Year/Section columns, and name-aligned concatenation of all sheets
//! - **Template**: the blank import workbook handed out to operators
//!
//! # Example
//!
//! ```ignore
//! use roster_ingest::{Upload, ingest_upload};
//! use roster_model::ImportOptions;
//!
//! let options = ImportOptions::default();
//! let upload = Upload::from_path("students.xlsx".as_ref(), &options)?;
//! let ingested = ingest_upload(&upload, &options)?;
//! println!("{} rows from {} sheets", ingested.table.len(), ingested.sheets.len());
//! ```

mod decode;
mod error;
mod ingest;
mod source;
mod template;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sources ===
pub use source::{ACCEPTED_MIME_TYPES, SourceKind, Upload};

// === Decoding ===
pub use decode::{RawSheet, decode};

// === Sheet Ingestion ===
pub use ingest::{IngestedWorkbook, has_column, ingest_sheets, ingest_upload};

// === Template ===
pub use template::{
    TEMPLATE_SHEET_NAME, field_annotation, template_bytes, template_headers, write_template,
};
