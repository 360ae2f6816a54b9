use std::path::PathBuf;

use roster_cli::pipeline::PreparedImport;
use roster_commit::CommitOutcome;

#[derive(Debug)]
pub struct ImportResult {
    pub prepared: PreparedImport,
    /// `None` when the commit did not run.
    pub outcome: Option<CommitOutcome>,
    /// Why the commit did not run, when it was refused.
    pub blocked: Option<String>,
    pub store_dir: PathBuf,
    pub dry_run: bool,
}

impl ImportResult {
    pub fn has_errors(&self) -> bool {
        self.blocked.is_some()
            || self
                .outcome
                .as_ref()
                .is_some_and(|outcome| !outcome.is_success())
    }
}
