//! Optional TOML configuration file.
//!
//! ```toml
//! [overrides]
//! department = "Computer Science and Engineering"
//! year = "II"
//!
//! [import]
//! batch_size = 25
//! skip_duplicate_check = false
//!
//! [storage]
//! dir = "roster-data"
//! ```
//!
//! Command-line flags take precedence over file values, and file values
//! over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roster_model::{ImportOptions, ImportOverrides};
use serde::{Deserialize, Serialize};

/// Storage directory used when neither the command line nor the config
/// file names one.
pub const DEFAULT_STORE_DIR: &str = "roster-data";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    pub overrides: ImportOverrides,
    pub import: ImportSection,
    pub storage: StorageSection,
}

/// `[import]` table. Unset keys fall back to [`ImportOptions::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportSection {
    pub skip_duplicate_check: Option<bool>,
    pub batch_size: Option<usize>,
    pub max_rows: Option<usize>,
    pub max_file_size: Option<u64>,
    pub synthesize_missing_admission: Option<bool>,
    pub strict_rows: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    pub dir: Option<PathBuf>,
}

/// Import settings given on the command line. Unset values leave the file
/// value in place; flags can only switch behavior on.
#[derive(Debug, Clone, Default)]
pub struct CommandLineSettings {
    pub overrides: ImportOverrides,
    pub skip_duplicate_check: bool,
    pub strict_rows: bool,
    pub batch_size: Option<usize>,
    pub max_rows: Option<usize>,
    pub store_dir: Option<PathBuf>,
}

impl RosterConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parse config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Effective import options: command line, then file, then defaults.
    pub fn import_options(&self, cli: &CommandLineSettings) -> ImportOptions {
        let defaults = ImportOptions::default();
        let file = &self.import;
        let overrides = ImportOverrides {
            department: cli
                .overrides
                .department
                .clone()
                .or_else(|| self.overrides.department.clone()),
            year: cli
                .overrides
                .year
                .clone()
                .or_else(|| self.overrides.year.clone()),
            section: cli
                .overrides
                .section
                .clone()
                .or_else(|| self.overrides.section.clone()),
        };

        ImportOptions {
            skip_duplicate_check: cli.skip_duplicate_check
                || file
                    .skip_duplicate_check
                    .unwrap_or(defaults.skip_duplicate_check),
            batch_size: cli
                .batch_size
                .or(file.batch_size)
                .unwrap_or(defaults.batch_size),
            max_rows: cli.max_rows.or(file.max_rows).unwrap_or(defaults.max_rows),
            max_file_size: file.max_file_size.unwrap_or(defaults.max_file_size),
            synthesize_missing_admission: file
                .synthesize_missing_admission
                .unwrap_or(defaults.synthesize_missing_admission),
            strict_rows: cli.strict_rows || file.strict_rows.unwrap_or(defaults.strict_rows),
            ..defaults
        }
        .with_overrides(overrides)
    }

    /// Effective storage directory.
    pub fn store_dir(&self, cli: &CommandLineSettings) -> PathBuf {
        cli.store_dir
            .clone()
            .or_else(|| self.storage.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }
}
