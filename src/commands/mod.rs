use std::path::PathBuf;

use clap::Args;

use debrand::rewrite::RewriteOptions;

pub type CmdResult<T> = debrand::Result<(T, i32)>;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Root of the site tree to rewrite
    #[arg(long, global = true, default_value = ".")]
    pub path: String,

    /// Report what would change without touching any file
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl GlobalArgs {
    /// The root directory, with `~` expanded.
    pub fn root(&self) -> debrand::Result<PathBuf> {
        let expanded = shellexpand::tilde(&self.path).to_string();
        let root = PathBuf::from(&expanded);

        if !root.is_dir() {
            return Err(debrand::Error::validation_invalid_argument(
                "path",
                format!("{} is not a directory", expanded),
                Some(expanded.clone()),
                None,
            )
            .with_hint("Run from the exported site's root or pass --path <DIR>"));
        }

        Ok(root)
    }

    pub fn options(&self) -> RewriteOptions {
        RewriteOptions {
            dry_run: self.dry_run,
        }
    }
}

/// Exit code for a pass that completed: 1 when any file or rename failed.
pub(crate) fn exit_code(has_errors: bool) -> i32 {
    if has_errors {
        1
    } else {
        0
    }
}

pub mod all;
pub mod assets;
pub mod classes;
pub mod strip;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (debrand::Result<serde_json::Value>, i32) {
    crate::tty::status("debrand is working...");

    match command {
        crate::Commands::Strip(args) => dispatch!(args, global, strip),
        crate::Commands::Classes(args) => dispatch!(args, global, classes),
        crate::Commands::Assets(args) => dispatch!(args, global, assets),
        crate::Commands::All(args) => dispatch!(args, global, all),
    }
}
