//! Upload sources: accepted file types and the size limit.

use std::path::Path;

use roster_model::ImportOptions;

use crate::error::{IngestError, Result};

/// MIME types accepted for upload.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "text/csv",
];

/// Container format of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Xlsx,
    Xls,
    Ods,
    Csv,
}

impl SourceKind {
    /// Resolves a declared MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Xlsx),
            "application/vnd.ms-excel" => Some(Self::Xls),
            "text/csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Resolves a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn is_workbook(&self) -> bool {
        !matches!(self, Self::Csv)
    }
}

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct Upload {
    /// File name, used to name the sheet of a CSV upload.
    pub name: String,
    pub kind: SourceKind,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Builds an upload from bytes and a declared MIME type.
    pub fn from_bytes(
        name: impl Into<String>,
        mime: &str,
        bytes: Vec<u8>,
        options: &ImportOptions,
    ) -> Result<Self> {
        let kind = SourceKind::from_mime(mime).ok_or_else(|| IngestError::UnsupportedFileType {
            kind: mime.to_string(),
        })?;
        check_size(bytes.len() as u64, options.max_file_size)?;
        Ok(Self {
            name: name.into(),
            kind,
            bytes,
        })
    }

    /// Reads an upload from disk, resolving its kind from the extension.
    ///
    /// The size limit is checked against file metadata before reading.
    pub fn from_path(path: &Path, options: &ImportOptions) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let kind = SourceKind::from_extension(ext).ok_or_else(|| {
            IngestError::UnsupportedFileType {
                kind: if ext.is_empty() {
                    "(no extension)".to_string()
                } else {
                    format!(".{ext}")
                },
            }
        })?;

        let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;
        check_size(metadata.len(), options.max_file_size)?;

        let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, kind, bytes })
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

fn check_size(size: u64, max_size: u64) -> Result<()> {
    if size > max_size {
        return Err(IngestError::FileTooLarge { size, max_size });
    }
    Ok(())
}

fn read_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
