use clap::Args;
use serde::Serialize;

use debrand::rewrite::{webflow, RelocateReport};
use debrand::BatchReport;

use super::{exit_code, CmdResult, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct AllArgs {}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum AllOutput {
    #[serde(rename = "all")]
    #[serde(rename_all = "camelCase")]
    All {
        root: String,
        dry_run: bool,
        strip: BatchReport,
        classes: BatchReport,
        assets: RelocateReport,
    },
}

/// Strip branding, then rename classes, then relocate assets.
///
/// Branding goes first so the inline badge style is removed before the class
/// pass renames its selector.
pub fn run(_args: AllArgs, global: &GlobalArgs) -> CmdResult<AllOutput> {
    let root = global.root()?;
    let options = global.options();

    let strip = super::strip::strip_branding(&root, options)?;
    let classes = super::classes::rename_classes(&root, &webflow::default_class_map(), options)?;
    let assets = super::assets::relocate_assets(&root, &webflow::default_asset_map(), options)?;

    let code = exit_code(strip.has_errors() || classes.has_errors() || assets.has_errors());

    Ok((
        AllOutput::All {
            root: root.display().to_string(),
            dry_run: options.dry_run,
            strip,
            classes,
            assets,
        },
        code,
    ))
}
