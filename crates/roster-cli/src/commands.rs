use std::fs;

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use roster_cli::config::RosterConfig;
use roster_cli::pipeline::{PreparedImport, commit, prepare};
use roster_commit::JsonDirStore;
use roster_ingest::{field_annotation, write_template};
use roster_model::CATALOG;

use crate::cli::{ImportArgs, SourceArgs, TemplateArgs};
use crate::summary::apply_table_style;
use crate::types::ImportResult;

const PROGRESS_TEMPLATE: &str = "{spinner} committing [{bar:40}] {pos}/{len} rows ({percent}%)";

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Label", "Required", "Type", "Options"]);
    apply_table_style(&mut table);
    for def in &CATALOG {
        table.add_row(vec![
            def.key.to_string(),
            def.label.to_string(),
            if def.required { "yes" } else { "no" }.to_string(),
            def.kind.as_str().to_string(),
            def.options.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    write_template(&args.output)
        .with_context(|| format!("write template {}", args.output.display()))?;
    println!("Template written to {}", args.output.display());
    for def in &CATALOG {
        println!("  {:<18} {}", def.label, field_annotation(def).replace('\n', " · "));
    }
    Ok(())
}

pub fn run_preview(args: &SourceArgs) -> Result<PreparedImport> {
    let config = RosterConfig::load_optional(args.config.as_deref())?;
    let options = config.import_options(&args.settings());
    prepare(&args.file, &options, &args.map)
}

pub fn run_import(args: &ImportArgs) -> Result<ImportResult> {
    let span = info_span!("import", file = %args.source.file.display());
    let _guard = span.enter();

    let settings = args.settings();
    let config = RosterConfig::load_optional(args.source.config.as_deref())?;
    let options = config.import_options(&settings);
    let store_dir = config.store_dir(&settings);

    let prepared = prepare(&args.source.file, &options, &args.source.map)?;
    let mut result = ImportResult {
        prepared,
        outcome: None,
        blocked: None,
        store_dir,
        dry_run: args.dry_run,
    };

    if result.prepared.is_blocked() {
        result.blocked = Some(format!(
            "{} problem(s) must be fixed or re-mapped before committing",
            result.prepared.report.errors.len()
        ));
        return Ok(result);
    }
    if !result.prepared.duplicates.is_empty() && !args.allow_duplicates {
        result.blocked = Some(format!(
            "{} duplicate admission number(s); rerun with --allow-duplicates to commit them with suffixes",
            result.prepared.duplicates.len()
        ));
        return Ok(result);
    }
    if args.dry_run {
        info!("dry run, skipping commit");
        return Ok(result);
    }

    fs::create_dir_all(&result.store_dir)
        .with_context(|| format!("create storage directory {}", result.store_dir.display()))?;
    let store = JsonDirStore::new(&result.store_dir);

    let progress = progress_bar(result.prepared.order.len() as u64);
    let (outcome, _store) = commit(&result.prepared, store, &options, |p| {
        progress.set_position(p.processed as u64);
    });
    if outcome.aborted.is_some() {
        progress.abandon();
        warn!(committed = outcome.success_count, "import stopped early");
    } else {
        progress.finish_and_clear();
    }

    result.outcome = Some(outcome);
    Ok(result)
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("=> ")),
        Err(e) => warn!(error = %e, "invalid progress template"),
    }
    bar
}
