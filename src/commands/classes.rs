use std::path::Path;

use clap::Args;
use serde::Serialize;

use debrand::rewrite::{self, webflow, ClassRename, RewriteOptions};
use debrand::BatchReport;

use super::{exit_code, CmdResult, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct ClassesArgs {}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ClassesOutput {
    #[serde(rename = "classes")]
    Classes {
        root: String,
        mappings: Vec<ClassRename>,
        report: BatchReport,
    },
}

pub fn run(_args: ClassesArgs, global: &GlobalArgs) -> CmdResult<ClassesOutput> {
    let root = global.root()?;
    let mappings = webflow::default_class_map();
    let report = rename_classes(&root, &mappings, global.options())?;
    let code = exit_code(report.has_errors());

    Ok((
        ClassesOutput::Classes {
            root: root.display().to_string(),
            mappings,
            report,
        },
        code,
    ))
}

/// Rename builder classes in stylesheets and markup under `root`.
pub(crate) fn rename_classes(
    root: &Path,
    mappings: &[ClassRename],
    options: RewriteOptions,
) -> debrand::Result<BatchReport> {
    let report = rewrite::rename_classes(root, mappings, options)?;

    let count = |ext: &str| {
        report
            .changed_files()
            .filter(|f| f.file.ends_with(&format!(".{}", ext)))
            .count()
    };
    debrand::log_status!(
        "classes",
        "Updated {} CSS files and {} HTML files",
        count("css"),
        count("html")
    );

    Ok(report)
}
