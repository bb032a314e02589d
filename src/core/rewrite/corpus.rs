//! Batch rewriting: apply one rule table to every file of a corpus.

use std::path::Path;

use crate::error::{ErrorCode, Result};
use crate::output::{BatchReport, FileOutcome};
use crate::utils::io;

use super::rule::RuleSet;
use super::walk::{find_files, relative};

#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    /// Report what would change without writing.
    pub dry_run: bool,
}

/// Rewrite a single file in place.
///
/// The file is only written when the rule table changed its content. Failures
/// are folded into the returned outcome so a batch never aborts on one file.
pub fn rewrite_file(root: &Path, path: &Path, rules: &RuleSet, options: RewriteOptions) -> FileOutcome {
    let file = relative(root, path);

    let content = match io::read_text(path, &format!("read {}", file)) {
        Ok(content) => content,
        Err(err) if err.code == ErrorCode::RewriteEncoding => {
            log_status!("rewrite", "Warning: skipping {} ({})", file, err.summary());
            return FileOutcome::skipped(file, err.summary());
        }
        Err(err) => {
            log_status!("rewrite", "Error: {} ({})", file, err.summary());
            return FileOutcome::error(file, err.summary());
        }
    };

    let rewrite = rules.apply(&content);
    if !rewrite.changed {
        return FileOutcome::unchanged(file);
    }

    if !options.dry_run {
        if let Err(err) = io::write_file_atomic(path, &rewrite.content, &format!("write {}", file)) {
            log_status!("rewrite", "Error: {} ({})", file, err.summary());
            return FileOutcome::error(file, err.summary());
        }
    }

    FileOutcome::changed(file, rewrite.hits)
}

/// Apply `rules` to every file under `root` with one of `extensions`.
///
/// Extensions are processed in the given order, files within an extension in
/// sorted order. Only an unusable root fails the whole batch.
pub fn rewrite_corpus(
    root: &Path,
    extensions: &[&str],
    rules: &RuleSet,
    options: RewriteOptions,
) -> Result<BatchReport> {
    let mut report = BatchReport::new(rules.name(), options.dry_run);

    for extension in extensions {
        for path in find_files(root, extension)? {
            let outcome = rewrite_file(root, &path, rules, options);
            if outcome.status == crate::output::FileStatus::Changed {
                log_status!(
                    "rewrite",
                    "{} {} ({} replacements)",
                    if options.dry_run { "Would update" } else { "Updated" },
                    outcome.file,
                    outcome.replacements
                );
            }
            report.record(outcome);
        }
    }

    Ok(report)
}
