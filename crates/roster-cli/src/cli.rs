//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_model::ImportOverrides;

use roster_cli::config::CommandLineSettings;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Bulk-import student rosters from spreadsheets",
    long_about = "Bulk-import student rosters from spreadsheets.\n\n\
                  Reads XLSX, XLS, ODS and CSV files, maps their columns to the student\n\
                  record fields, validates every row and commits the records in batches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow student values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a roster file and commit its students.
    Import(ImportArgs),

    /// Show how a roster file would be imported without committing.
    Preview(SourceArgs),

    /// Write the blank import template workbook.
    Template(TemplateArgs),

    /// List the student record fields.
    Fields,
}

/// Input file and the settings that shape how it is read.
#[derive(Args)]
pub struct SourceArgs {
    /// Roster file (.xlsx, .xls, .ods or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// TOML config file with [overrides], [import] and [storage] tables.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Map a field to a column, e.g. `--map admissionNumber="Roll No"`.
    /// An empty header unmaps the field. Repeatable.
    #[arg(long = "map", value_name = "FIELD=HEADER")]
    pub map: Vec<String>,

    /// Department for every student, replacing per-row values.
    #[arg(long = "department", value_name = "NAME")]
    pub department: Option<String>,

    /// Year for every student, replacing per-row values.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<String>,

    /// Section for every student, replacing per-row values.
    #[arg(long = "section", value_name = "SECTION")]
    pub section: Option<String>,

    /// Skip the duplicate admission number check.
    #[arg(long = "no-duplicate-check")]
    pub no_duplicate_check: bool,

    /// Fail on malformed rows instead of dropping them.
    #[arg(long = "strict-rows")]
    pub strict_rows: bool,

    /// Maximum number of rows across all sheets.
    #[arg(long = "max-rows", value_name = "N")]
    pub max_rows: Option<usize>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Run every stage except the commit.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Commit even when duplicate admission numbers were found.
    ///
    /// Repeats are stored with `_1`, `_2`, ... suffixes.
    #[arg(long = "allow-duplicates")]
    pub allow_duplicates: bool,

    /// Rows per storage batch (at most 50).
    #[arg(long = "batch-size", value_name = "N")]
    pub batch_size: Option<usize>,

    /// Directory that receives the student documents.
    #[arg(long = "store-dir", value_name = "DIR")]
    pub store_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Output path for the template workbook.
    #[arg(value_name = "PATH", default_value = "student-import-template.xlsx")]
    pub output: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl SourceArgs {
    pub fn settings(&self) -> CommandLineSettings {
        CommandLineSettings {
            overrides: ImportOverrides {
                department: self.department.clone(),
                year: self.year.clone(),
                section: self.section.clone(),
            }
            .normalized(),
            skip_duplicate_check: self.no_duplicate_check,
            strict_rows: self.strict_rows,
            max_rows: self.max_rows,
            ..CommandLineSettings::default()
        }
    }
}

impl ImportArgs {
    pub fn settings(&self) -> CommandLineSettings {
        CommandLineSettings {
            batch_size: self.batch_size,
            store_dir: self.store_dir.clone(),
            ..self.source.settings()
        }
    }
}
