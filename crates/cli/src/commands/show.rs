use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Args;
use log::error;
use shelf_engine::CatalogError;

use crate::commands::{OutputOptions, load_catalog, print_rows};
use crate::printer::{Detail, EntryRow, PrintContext};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// 1-based position in directory order
    pub index: usize,

    /// Directories to catalog, in order
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: ShowArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[show] {e:#}");
            eprintln!("[show] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ShowArgs) -> Result<ExitCode> {
    let catalog = load_catalog(&args.dirs)?;

    let entry = match catalog.get_by_position(args.index) {
        Ok(entry) => entry,
        Err(e @ CatalogError::OutOfRange { .. }) => {
            eprintln!("[show] {e}");
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e.into()),
    };

    let mut printer = args.output.make_printer(Detail::Full);

    let ctx = PrintContext {
        kind: "show",
        query: None,
        total: 1,
    };

    let row = EntryRow {
        position: args.index,
        entry,
    };
    print_rows(printer.as_mut(), &ctx, [row])?;

    Ok(ExitCode::SUCCESS)
}
