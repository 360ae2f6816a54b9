//! Row transformations between mapping and commit.
//!
//! - [`clean`]: phone, year, gender and date cleanup on mapped cells
//! - [`datetime`]: date coercion from serial numbers, native dates and text
//! - [`dedupe`]: duplicate admission number detection and suffixing
//! - [`cohort`]: effective year/section of a row after overrides
//! - [`sort`]: commit ordering and cohort grouping
//!
//! All functions are pure apart from logging; none of them mutate shared
//! state across calls except [`DuplicateResolver`], which is owned by one
//! commit run.

pub mod clean;
pub mod cohort;
pub mod datetime;
pub mod dedupe;
pub mod sort;

pub use clean::{CleanStats, clean_phone, clean_rows, clean_value, is_date_column};
pub use cohort::{RowCohort, row_cohort};
pub use datetime::{format_date, normalize_date, normalize_date_text, parse_date_text};
pub use dedupe::{Duplicate, DuplicateResolver, find_duplicates};
pub use sort::{ALL_STUDENTS, CohortGroup, group_rows, natural_cmp, sort_rows};
