//! Rule-based batch rewriting of static HTML/CSS trees.
//!
//! Walks a directory for files with a given extension, runs an ordered rule
//! table over each file's content, and writes a file back only when its
//! content changed. Class renaming and asset relocation are built on the same
//! engine.

mod classes;
mod corpus;
mod relocate;
mod rule;
mod walk;
pub mod webflow;

pub use classes::{class_rules, rename_classes, ClassRename, CLASS_ATTRIBUTE, CLASS_EXTENSIONS};
pub use corpus::{rewrite_corpus, rewrite_file, RewriteOptions};
pub use relocate::{
    move_assets, reference_rules, relocate, AssetRename, RelocateReport, RenameOutcome,
    RenameStatus, REFERENCE_EXTENSIONS,
};
pub use rule::{apply, CaseSensitivity, Rewrite, Rule, RuleHit, RuleSet};
pub use walk::{find_files, relative};
