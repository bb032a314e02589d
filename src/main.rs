use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{all, assets, classes, strip};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "debrand")]
#[command(version = VERSION)]
#[command(about = "Strip site-builder branding from static HTML/CSS exports")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Defaults to `all` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove builder branding from HTML files
    Strip(strip::StripArgs),
    /// Rename builder CSS classes in stylesheets and markup
    Classes(classes::ClassesArgs),
    /// Rename builder-named CSS/JS files and update references
    Assets(assets::AssetsArgs),
    /// Run strip, classes and assets in order
    All(all::AllArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::All(all::AllArgs::default()));

    let (json_result, exit_code) = commands::run_json(command, &cli.global);
    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
