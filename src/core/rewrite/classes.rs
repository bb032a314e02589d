//! CSS class renaming across stylesheets and markup.
//!
//! Each `old -> new` mapping expands into three rules:
//! 1. `class="..."` attribute values, whole-token only
//! 2. `.old` selectors, right-bounded so `.old-suffix` is left alone
//! 3. a literal substring fallback for everything else (comments, generated
//!    utility rules, scripts)
//!
//! The precise rules of every mapping run before any fallback, and fallbacks
//! run longest-first, so a short class name cannot clobber a longer one that
//! contains it.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::output::BatchReport;

use super::corpus::{rewrite_corpus, RewriteOptions};
use super::rule::{CaseSensitivity, Rule, RuleSet};

/// Attribute scope for `class` values in either quote style.
pub const CLASS_ATTRIBUTE: &str = r#"\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#;

/// File types the class pass touches, in processing order.
pub const CLASS_EXTENSIONS: &[&str] = &["css", "html"];

/// One class rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRename {
    pub from: String,
    pub to: String,
}

impl ClassRename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Build the rule table for an ordered list of class renames.
pub fn class_rules(mappings: &[ClassRename]) -> Result<RuleSet> {
    let mut rules = RuleSet::new("classes");

    for mapping in mappings.iter().filter(|m| !m.from.is_empty()) {
        rules.push(
            Rule::token(format!("class-attr:{}", mapping.from), &mapping.from, &mapping.to)
                .within(CLASS_ATTRIBUTE)?,
        );
        rules.push(Rule::token(
            format!("selector:{}", mapping.from),
            &format!(".{}", mapping.from),
            format!(".{}", mapping.to),
        ));
    }

    let mut fallbacks: Vec<&ClassRename> = mappings.iter().filter(|m| !m.from.is_empty()).collect();
    fallbacks.sort_by(|a, b| b.from.len().cmp(&a.from.len()));

    for mapping in fallbacks {
        rules.push(Rule::literal(
            format!("literal:{}", mapping.from),
            &mapping.from,
            &mapping.to,
            CaseSensitivity::Sensitive,
        )?);
    }

    Ok(rules)
}

/// Rename classes in every stylesheet and markup file under `root`.
pub fn rename_classes(
    root: &Path,
    mappings: &[ClassRename],
    options: RewriteOptions,
) -> Result<BatchReport> {
    let rules = class_rules(mappings)?;
    rewrite_corpus(root, CLASS_EXTENSIONS, &rules, options)
}
