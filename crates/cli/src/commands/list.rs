use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Args;
use log::error;
use shelf_fs::Entry;

use crate::commands::{OutputOptions, load_catalog, print_rows};
use crate::printer::{Detail, EntryRow, PrintContext};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directories to catalog, in order
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,

    /// Order by filename instead of directory order
    #[arg(long, short = 's')]
    pub sorted: bool,

    /// Print every metadata field instead of just names
    #[arg(long, short = 'l')]
    pub long: bool,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: ListArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[list] {e:#}");
            eprintln!("[list] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ListArgs) -> Result<ExitCode> {
    let catalog = load_catalog(&args.dirs)?;

    let entries: Vec<&Entry> = if args.sorted {
        catalog.list_sorted_by_name()
    } else {
        catalog.list_all().iter().collect()
    };

    let detail = if args.long { Detail::Full } else { Detail::Name };
    let mut printer = args.output.make_printer(detail);

    let ctx = PrintContext {
        kind: "list",
        query: None,
        total: entries.len(),
    };

    let rows = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| EntryRow {
            position: i + 1,
            entry,
        });
    print_rows(printer.as_mut(), &ctx, rows)?;

    Ok(ExitCode::SUCCESS)
}
