//! Header mapping for roster imports.
//!
//! Maps raw spreadsheet headers to canonical fields using a fixed synonym
//! table, tried in three tiers per header:
//!
//! 1. exact match on the lowercase alphanumeric form (`Roll No.` → `rollno`)
//! 2. exact match on the lowercase space-stripped form (`Reg. No` → `reg.no`)
//! 3. substring match in either direction against every synonym key
//!
//! Tier 3 keeps the **last** synonym that matches a header, so the table is
//! ordered from generic to specific (`mobile` before `parentmobile`). This is
//! an approximation, not an optimal assignment; the resulting mapping is
//! advisory and the operator can edit it before validation.
//!
//! When nothing maps to `section`, a column whose sampled values are mostly
//! single uppercase letters is promoted to it.

mod engine;
mod synonyms;
mod types;
mod utils;

pub use engine::{HeaderMapper, looks_like_section, map_headers};
pub use synonyms::{SYNONYMS, synonyms_for};
pub use types::{HeaderMatch, MappingResult, MatchTier};
pub use utils::HeaderForms;
