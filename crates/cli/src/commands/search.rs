use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Args;
use log::error;

use crate::commands::{OutputOptions, load_catalog, print_rows};
use crate::printer::{Detail, EntryRow, PrintContext};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Wildcard pattern: `*` matches any run, `?` one character
    pub pattern: String,

    /// Directories to catalog before searching
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: SearchArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[search] {e:#}");
            eprintln!("[search] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: SearchArgs) -> Result<ExitCode> {
    let catalog = load_catalog(&args.dirs)?;
    let hits = catalog.find_by_wildcard(&args.pattern)?;

    if hits.is_empty() {
        eprintln!("[search] no entries match {:?}", args.pattern);
        return Ok(ExitCode::from(1));
    }

    let mut printer = args.output.make_printer(Detail::Full);

    let ctx = PrintContext {
        kind: "search",
        query: Some(args.pattern.as_str()),
        total: hits.len(),
    };

    let rows = hits.into_iter().enumerate().map(|(i, entry)| EntryRow {
        position: i + 1,
        entry,
    });
    print_rows(printer.as_mut(), &ctx, rows)?;

    Ok(ExitCode::SUCCESS)
}
