use std::io::{self, BufRead, Write};

use log::debug;
use shelf_engine::{Catalog, CatalogError};
use shelf_fs::Entry;
use shelf_runtime::expand_home;

use crate::printer::{RULE, write_listing_line, write_metadata};

const PROMPT: &str = "Select option (type h for help): ";
const SEARCH_PROMPT: &str = "Enter filename to search (wildcards * and ? supported): ";
const PAUSE_PROMPT: &str = "\nPress Enter to return to menu...";

const HELP: &str = "\
Help:
  add [path] - Add directory by absolute path
  a          - Show all entry details
  o          - Show all entry details sorted by filename
  s          - Search by filename (wildcards * and ?)
  [number]   - View entry details
  h          - Help
  e          - Exit
";

/// One line of console input, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Exit,
    Help,
    ShowAll,
    ShowSorted,
    Search,
    /// `add` with its (possibly missing) path argument.
    Add(Option<String>),
    /// A 1-based catalog position.
    Select(usize),
    Unknown,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        match trimmed {
            "e" | "E" => return Self::Exit,
            "h" | "H" => return Self::Help,
            "a" | "A" => return Self::ShowAll,
            "o" | "O" => return Self::ShowSorted,
            "s" | "S" => return Self::Search,
            _ => {}
        }

        if let Some(rest) = trimmed.strip_prefix("add")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let path = rest.trim();
            return Self::Add((!path.is_empty()).then(|| path.to_owned()));
        }

        match trimmed.parse::<usize>() {
            Ok(n) => Self::Select(n),
            Err(_) => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleConfig {
    /// Wait for Enter after each detail view.
    pub pause: bool,
}

/// Line-based menu over a catalog.
pub struct Console<'c, R: BufRead, W: Write> {
    catalog: &'c mut Catalog,
    input: R,
    out: W,
    cfg: ConsoleConfig,
}

impl<'c, R: BufRead, W: Write> Console<'c, R, W> {
    pub fn new(catalog: &'c mut Catalog, input: R, out: W, cfg: ConsoleConfig) -> Self {
        Self {
            catalog,
            input,
            out,
            cfg,
        }
    }

    /// Run until `e` or end of input. Catalog errors are reported and the
    /// loop carries on; only I/O errors on the console itself end it.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_listing()?;
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.out)?;
                return Ok(());
            };

            let command = ShellCommand::parse(&line);
            debug!("[console] {:?}", command);

            match command {
                ShellCommand::Exit => return Ok(()),
                ShellCommand::Help => {
                    write!(self.out, "{HELP}")?;
                    self.pause()?;
                }
                ShellCommand::ShowAll => {
                    write_details(&mut self.out, self.catalog.list_all())?;
                    self.pause()?;
                }
                ShellCommand::ShowSorted => {
                    write_details(&mut self.out, self.catalog.list_sorted_by_name())?;
                    self.pause()?;
                }
                ShellCommand::Search => self.search()?,
                ShellCommand::Add(None) => writeln!(self.out, "Usage: add [absolute_path]")?,
                ShellCommand::Add(Some(raw)) => self.add(&raw)?,
                ShellCommand::Select(index) => self.select(index)?,
                ShellCommand::Unknown => writeln!(self.out, "Invalid input. Type 'h' for help.")?,
            }
        }
    }

    fn print_listing(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n==== Catalog ====")?;
        for (i, entry) in self.catalog.list_all().iter().enumerate() {
            write_listing_line(&mut self.out, i + 1, &entry.filename)?;
        }
        Ok(())
    }

    fn add(&mut self, raw: &str) -> io::Result<()> {
        let path = expand_home(raw);

        match self.catalog.ingest_directory(&path) {
            Ok(added) => writeln!(self.out, "Directory added ({added} entries)."),
            Err(CatalogError::InvalidPath { .. }) if !path.exists() => {
                writeln!(self.out, "Directory does not exist.")
            }
            Err(CatalogError::InvalidPath { .. }) => writeln!(self.out, "Path is not a directory."),
            Err(e) => writeln!(self.out, "Could not add directory: {e}"),
        }
    }

    fn select(&mut self, index: usize) -> io::Result<()> {
        match self.catalog.get_by_position(index) {
            Ok(entry) => {
                writeln!(self.out)?;
                write_metadata(&mut self.out, entry)?;
                self.pause()
            }
            Err(_) => writeln!(
                self.out,
                "Invalid selection. Please enter a valid entry number."
            ),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        write!(self.out, "{SEARCH_PROMPT}")?;
        self.out.flush()?;

        let Some(pattern) = self.read_line()? else {
            return Ok(());
        };

        match self.catalog.find_by_wildcard(&pattern) {
            Ok(hits) if hits.is_empty() => {
                writeln!(self.out, "No entries found matching pattern.")?;
            }
            Ok(hits) => {
                for entry in hits {
                    writeln!(self.out)?;
                    write_metadata(&mut self.out, entry)?;
                    writeln!(self.out, "{RULE}")?;
                }
            }
            Err(e) => writeln!(self.out, "Invalid pattern: {e}")?,
        }

        self.pause()
    }

    fn pause(&mut self) -> io::Result<()> {
        if !self.cfg.pause {
            return Ok(());
        }

        write!(self.out, "{PAUSE_PROMPT}")?;
        self.out.flush()?;
        self.read_line().map(|_| ())
    }

    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }

        let line = buf.trim_end_matches(['\r', '\n']);
        Ok(Some(line.to_owned()))
    }
}

/// Full metadata blocks for `entries`, each on a fresh line and closed by a
/// rule.
fn write_details<'e, W: Write + ?Sized>(
    w: &mut W,
    entries: impl IntoIterator<Item = &'e Entry>,
) -> io::Result<()> {
    let mut entries = entries.into_iter().peekable();
    if entries.peek().is_none() {
        return writeln!(w, "No entries available.");
    }

    for entry in entries {
        writeln!(w)?;
        write_metadata(w, entry)?;
        writeln!(w, "{RULE}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
