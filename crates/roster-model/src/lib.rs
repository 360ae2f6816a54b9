//! Data model for the bulk roster import pipeline.
//!
//! Every pipeline stage exchanges the types defined here:
//!
//! - [`ImportTable`]: unified headers and index-aligned rows of [`CellValue`]s
//! - [`Field`] / [`FieldDef`]: the canonical field catalog every column maps to
//! - [`CohortToken`]: `{year, section}` extracted from free-form text
//! - [`FieldMapping`]: canonical field to source column index
//! - [`ValidationError`] / [`ValidationReport`]: mapping and row-level problems
//! - [`Record`]: the flat document committed to storage
//! - [`ImportOptions`]: operator overrides and run limits

pub mod cell;
pub mod cohort;
pub mod department;
pub mod error;
pub mod field;
pub mod issue;
pub mod mapping;
pub mod options;
pub mod record;
pub mod sheet;

pub use cell::{CellValue, Row, pad_row, serial_to_date};
pub use cohort::{
    CohortToken, GREEK_SECTIONS, SECTION_OPTIONS, YEAR_OPTIONS, parse_cohort, section_rank,
    year_rank,
};
pub use department::{DEPARTMENT_NAMES, DEPARTMENTS, Department, find_department};
pub use error::{ModelError, Result};
pub use field::{CATALOG, Field, FieldDef, FieldType};
pub use issue::{ErrorKind, ValidationError, ValidationReport};
pub use mapping::{FieldMapping, parse_edit};
pub use options::{ImportOptions, ImportOverrides, MAX_BATCH_SIZE};
pub use record::{FieldValue, Record};
pub use sheet::{ImportTable, SheetInfo};
