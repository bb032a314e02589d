use std::path::Path;

use clap::Args;
use serde::Serialize;

use debrand::rewrite::{self, webflow, AssetRename, RelocateReport, RewriteOptions};

use super::{exit_code, CmdResult, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct AssetsArgs {}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum AssetsOutput {
    #[serde(rename = "assets")]
    Assets {
        root: String,
        warnings: usize,
        #[serde(flatten)]
        report: RelocateReport,
    },
}

pub fn run(_args: AssetsArgs, global: &GlobalArgs) -> CmdResult<AssetsOutput> {
    let root = global.root()?;
    let mappings = webflow::default_asset_map();
    let report = relocate_assets(&root, &mappings, global.options())?;
    let code = exit_code(report.has_errors());

    Ok((
        AssetsOutput::Assets {
            root: root.display().to_string(),
            warnings: report.warnings(),
            report,
        },
        code,
    ))
}

/// Rename builder-named assets and update references to them.
pub(crate) fn relocate_assets(
    root: &Path,
    mappings: &[AssetRename],
    options: RewriteOptions,
) -> debrand::Result<RelocateReport> {
    let report = rewrite::relocate(root, mappings, options)?;

    debrand::log_status!(
        "assets",
        "Updated references in {} HTML files",
        report.references.summary.changed
    );

    Ok(report)
}
