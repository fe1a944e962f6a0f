use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{migrate, rules};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "reslug")]
#[command(version = VERSION)]
#[command(about = "Migrate hyphenated plugin slugs to underscore module names across Lua source trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite module references and rename slug-bearing paths under a root
    Migrate(migrate::MigrateArgs),
    /// Show the generated content rules for a slug
    Rules(rules::RulesArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let completed = json_result.is_ok();
    let _ = output::print_json_result(json_result);

    if completed {
        tty::status("Migration completed successfully");
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
