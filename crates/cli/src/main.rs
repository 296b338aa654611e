use std::process::ExitCode;

use clap::Parser;

mod commands;
mod console;
mod printer;

use commands::Command;
use shelf_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "shelf",
    version,
    about = "Catalog a directory's entries and query their metadata",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute; defaults to the interactive shell.
    #[command(subcommand)]
    pub command: Option<Command>,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command.unwrap_or_default() {
        Command::Shell(args) => commands::shell::run(args),
        Command::List(args) => commands::list::run(args),
        Command::Search(args) => commands::search::run(args),
        Command::Show(args) => commands::show::run(args),
    }
}
