//! Validation of a mapped, cleaned import table.
//!
//! Two passes, both always run to completion:
//!
//! 1. **Mapping**: one error per required field with no source column.
//! 2. **Rows**: every mapped cell is checked against its field type.
//!
//! Problems are returned as data in a [`ValidationReport`]; nothing here
//! fails with an `Err`.

pub mod checks;
mod engine;

pub use engine::{validate, validate_row};
pub use roster_model::{ErrorKind, ValidationError, ValidationReport};
