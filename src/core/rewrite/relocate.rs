//! Asset relocation: move files, then rewrite references to them.
//!
//! Two phases. All moves are attempted first; a missing source or an occupied
//! target is a warning, never fatal. The reference pass then rewrites every
//! literal old path in markup, including paths whose move did not happen.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::BatchReport;
use crate::utils::io;

use super::corpus::{rewrite_corpus, RewriteOptions};
use super::rule::{CaseSensitivity, Rule, RuleSet};

/// File types whose references are rewritten.
pub const REFERENCE_EXTENSIONS: &[&str] = &["html"];

/// A file to move, as paths relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRename {
    pub from: String,
    pub to: String,
}

impl AssetRename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameStatus {
    Moved,
    /// Dry run: the move would happen.
    Planned,
    /// Source file does not exist.
    Missing,
    /// Target already exists; the move was skipped.
    Collision,
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameOutcome {
    pub from: String,
    pub to: String,
    pub status: RenameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RenameOutcome {
    fn new(mapping: &AssetRename, status: RenameStatus, message: Option<String>) -> Self {
        Self {
            from: mapping.from.clone(),
            to: mapping.to.clone(),
            status,
            message,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.status, RenameStatus::Missing | RenameStatus::Collision)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocateReport {
    pub renames: Vec<RenameOutcome>,
    pub references: BatchReport,
}

impl RelocateReport {
    pub fn warnings(&self) -> usize {
        self.renames.iter().filter(|r| r.is_warning()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.references.has_errors()
            || self.renames.iter().any(|r| r.status == RenameStatus::Error)
    }
}

/// Literal, case-sensitive path substitutions, longest source first so one
/// path never rewrites part of a longer one.
pub fn reference_rules(mappings: &[AssetRename]) -> Result<RuleSet> {
    let mut sorted: Vec<&AssetRename> = mappings.iter().filter(|m| !m.from.is_empty()).collect();
    sorted.sort_by(|a, b| b.from.len().cmp(&a.from.len()));

    let mut rules = RuleSet::new("references");
    for mapping in sorted {
        rules.push(Rule::literal(
            format!("reference:{}", mapping.from),
            &mapping.from,
            &mapping.to,
            CaseSensitivity::Sensitive,
        )?);
    }

    Ok(rules)
}

fn move_one(root: &Path, mapping: &AssetRename, options: RewriteOptions) -> RenameOutcome {
    if Path::new(&mapping.from).is_absolute() || Path::new(&mapping.to).is_absolute() {
        let err = Error::validation_invalid_argument(
            "rename",
            "Rename paths must be relative to the root",
            Some(format!("{} -> {}", mapping.from, mapping.to)),
            None,
        );
        return RenameOutcome::new(mapping, RenameStatus::Error, Some(err.summary()));
    }

    let from = root.join(&mapping.from);
    let to = root.join(&mapping.to);

    if !from.is_file() {
        let err = Error::rewrite_source_not_found(&mapping.from);
        log_status!("assets", "Warning: {}", err.summary());
        return RenameOutcome::new(mapping, RenameStatus::Missing, Some(err.summary()));
    }

    if to.exists() {
        let message = format!("{} already exists; not overwriting", mapping.to);
        log_status!("assets", "Warning: {}", message);
        return RenameOutcome::new(mapping, RenameStatus::Collision, Some(message));
    }

    if options.dry_run {
        log_status!("assets", "Would rename: {} -> {}", mapping.from, mapping.to);
        return RenameOutcome::new(mapping, RenameStatus::Planned, None);
    }

    match io::move_file(&from, &to) {
        Ok(()) => {
            log_status!("assets", "Renamed: {} -> {}", mapping.from, mapping.to);
            RenameOutcome::new(mapping, RenameStatus::Moved, None)
        }
        Err(err) => {
            log_status!("assets", "Error: {}", err.summary());
            RenameOutcome::new(mapping, RenameStatus::Error, Some(err.summary()))
        }
    }
}

/// Phase one: move every mapped file that exists.
pub fn move_assets(
    root: &Path,
    mappings: &[AssetRename],
    options: RewriteOptions,
) -> Vec<RenameOutcome> {
    mappings
        .iter()
        .map(|mapping| move_one(root, mapping, options))
        .collect()
}

/// Move mapped files and rewrite references to them in markup.
pub fn relocate(
    root: &Path,
    mappings: &[AssetRename],
    options: RewriteOptions,
) -> Result<RelocateReport> {
    if !root.is_dir() {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("{} is not a directory", root.display()),
            Some(root.display().to_string()),
            None,
        ));
    }

    let rules = reference_rules(mappings)?;
    let renames = move_assets(root, mappings, options);
    let references = rewrite_corpus(root, REFERENCE_EXTENSIONS, &rules, options)?;

    Ok(RelocateReport {
        renames,
        references,
    })
}
