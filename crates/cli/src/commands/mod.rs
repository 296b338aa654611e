pub mod list;
pub mod search;
pub mod shell;
pub mod show;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use shelf_engine::Catalog;

pub use list::ListArgs;
pub use search::SearchArgs;
pub use shell::ShellArgs;
pub use show::ShowArgs;

use crate::printer::{
    ColorChoice, Detail, EntryPrinter, EntryRow, HumanPrinter, JsonPrinter, OutputFormat,
    PrintContext, PrinterConfig,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive console over the catalog.
    ///
    /// Example:
    ///   shelf shell ~/Downloads
    Shell(ShellArgs),

    /// Print the entries of one or more directories.
    ///
    /// Example:
    ///   shelf list --sorted /var/log
    List(ListArgs),

    /// Print entries whose names match a wildcard pattern.
    ///
    /// Example:
    ///   shelf search '*.txt' ~/notes
    Search(SearchArgs),

    /// Print one entry by its 1-based position.
    ///
    /// Example:
    ///   shelf show 3 /etc
    Show(ShowArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Shell(ShellArgs::default())
    }
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    pub fn printer_config(&self, detail: Detail) -> PrinterConfig {
        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        PrinterConfig {
            color,
            detail,
            show_summary: !self.quiet,
        }
    }

    /// Create a printer based on the output options.
    pub fn make_printer(&self, detail: Detail) -> Box<dyn EntryPrinter> {
        let cfg = self.printer_config(detail);

        match self.format() {
            OutputFormat::Human => Box::new(HumanPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
        }
    }
}

/// Build a catalog from `dirs`, failing on the first directory that cannot
/// be ingested.
pub fn load_catalog(dirs: &[PathBuf]) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    let results = catalog.ingest_directories(dirs);

    for (dir, res) in dirs.iter().zip(results) {
        res.with_context(|| format!("failed to ingest {}", dir.display()))?;
    }

    Ok(catalog)
}

/// Drive a printer over `rows`.
pub fn print_rows<'a>(
    printer: &mut dyn EntryPrinter,
    ctx: &PrintContext,
    rows: impl IntoIterator<Item = EntryRow<'a>>,
) -> io::Result<()> {
    printer.begin(ctx)?;
    for row in rows {
        printer.print_row(&row, ctx)?;
    }
    printer.finish(ctx)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
