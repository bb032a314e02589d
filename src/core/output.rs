//! Public output types for rewrite passes.
//!
//! These are serialized into the CLI's JSON envelope and returned to library
//! callers, who decide their own exit-code policy from them.

use serde::Serialize;

use super::rewrite::RuleHit;

// ============================================================================
// Per-file outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Content differed after rewriting (and was written unless dry-run).
    Changed,
    /// No rule altered the content; the file was not opened for writing.
    Unchanged,
    /// The file could not be treated as text.
    Skipped,
    /// Reading or writing failed.
    Error,
}

/// Outcome for a single file in a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    /// Path relative to the scanned root.
    pub file: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "is_zero")]
    pub replacements: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl FileOutcome {
    pub fn changed(file: String, rules: Vec<RuleHit>) -> Self {
        Self {
            file,
            status: FileStatus::Changed,
            replacements: rules.iter().map(|h| h.replacements).sum(),
            rules,
            error: None,
        }
    }

    pub fn unchanged(file: String) -> Self {
        Self {
            file,
            status: FileStatus::Unchanged,
            replacements: 0,
            rules: Vec::new(),
            error: None,
        }
    }

    pub fn skipped(file: String, reason: String) -> Self {
        Self {
            file,
            status: FileStatus::Skipped,
            replacements: 0,
            rules: Vec::new(),
            error: Some(reason),
        }
    }

    pub fn error(file: String, error: String) -> Self {
        Self {
            file,
            status: FileStatus::Error,
            replacements: 0,
            rules: Vec::new(),
            error: Some(error),
        }
    }
}

// ============================================================================
// Batch report
// ============================================================================

/// Counts over a batch of file outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub scanned: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Result of running one rule table over a corpus.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub action: String,
    pub dry_run: bool,
    pub summary: BatchSummary,
    /// Outcomes in processing order. Unchanged files are counted but omitted
    /// from serialized output.
    #[serde(serialize_with = "serialize_touched")]
    pub files: Vec<FileOutcome>,
}

fn serialize_touched<S: serde::Serializer>(
    files: &[FileOutcome],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(files.iter().filter(|f| f.status != FileStatus::Unchanged))
}

impl BatchReport {
    pub fn new(action: impl Into<String>, dry_run: bool) -> Self {
        Self {
            action: action.into(),
            dry_run,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.summary.scanned += 1;
        match outcome.status {
            FileStatus::Changed => self.summary.changed += 1,
            FileStatus::Unchanged => self.summary.unchanged += 1,
            FileStatus::Skipped => self.summary.skipped += 1,
            FileStatus::Error => self.summary.errors += 1,
        }
        self.files.push(outcome);
    }

    pub fn changed_files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.status == FileStatus::Changed)
    }

    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }
}
