use std::path::Path;

use clap::Args;
use serde::Serialize;

use debrand::rewrite::{self, webflow, RewriteOptions};
use debrand::BatchReport;

use super::{exit_code, CmdResult, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct StripArgs {}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum StripOutput {
    #[serde(rename = "strip")]
    Strip { root: String, report: BatchReport },
}

pub fn run(_args: StripArgs, global: &GlobalArgs) -> CmdResult<StripOutput> {
    let root = global.root()?;
    let report = strip_branding(&root, global.options())?;
    let code = exit_code(report.has_errors());

    Ok((
        StripOutput::Strip {
            root: root.display().to_string(),
            report,
        },
        code,
    ))
}

/// Remove builder branding from every HTML file under `root`.
pub(crate) fn strip_branding(root: &Path, options: RewriteOptions) -> debrand::Result<BatchReport> {
    let rules = webflow::branding_rules()?;
    let report = rewrite::rewrite_corpus(root, webflow::BRANDING_EXTENSIONS, &rules, options)?;

    debrand::log_status!(
        "strip",
        "Processed {} out of {} HTML files",
        report.summary.changed,
        report.summary.scanned
    );

    Ok(report)
}
