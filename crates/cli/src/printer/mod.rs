use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};
use shelf_fs::Entry;

/// Separator printed after each full metadata block.
pub const RULE: &str = "-----------------------------";

const DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Enable colors when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// How much of each entry a printer writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Detail {
    /// Numbered filename listing.
    #[default]
    Name,
    /// Every metadata field.
    Full,
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub color: ColorChoice,
    pub detail: Detail,
    /// Whether to write a count summary to stderr when done.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            detail: Detail::Name,
            show_summary: true,
        }
    }
}

/// Static context about a print run.
#[derive(Debug)]
pub struct PrintContext<'a> {
    /// Label for the operation: "list", "search" or "show".
    pub kind: &'a str,
    /// Wildcard pattern, for searches.
    pub query: Option<&'a str>,
    /// Number of rows that will be printed.
    pub total: usize,
}

/// One row of output.
#[derive(Debug)]
pub struct EntryRow<'a> {
    /// 1-based catalog position, or rank within a result set.
    pub position: usize,
    pub entry: &'a Entry,
}

pub trait EntryPrinter {
    fn begin(&mut self, ctx: &PrintContext) -> io::Result<()>;

    fn print_row(&mut self, row: &EntryRow<'_>, ctx: &PrintContext) -> io::Result<()>;

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()>;
}

/// Render an optional UTC time in local time, ctime style.
pub fn format_date(t: Option<DateTime<Utc>>) -> String {
    match t {
        Some(t) => t.with_timezone(&Local).format(DATE_FORMAT).to_string(),
        None => "-".to_owned(),
    }
}

#[inline]
fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}

/// Write every metadata field of `entry`, one per line.
///
/// `Modified Date` is whatever the provider stored in `modified`: the inode
/// change time on unix, the last write time on Windows.
pub fn write_metadata<W: Write + ?Sized>(w: &mut W, entry: &Entry) -> io::Result<()> {
    let ts = &entry.timestamps;

    writeln!(w, "Filename: {}", entry.filename)?;
    writeln!(w, "Owner: {}", entry.owner)?;
    writeln!(w, "System: {}", yes_no(entry.is_system()))?;
    writeln!(w, "Hidden: {}", yes_no(entry.is_hidden()))?;
    writeln!(w, "ReadOnly: {}", yes_no(entry.is_read_only()))?;
    writeln!(w, "Folder: {}", yes_no(entry.is_folder()))?;
    writeln!(w, "Physical Size: {}", entry.physical_size)?;
    writeln!(w, "Logical Size: {}", entry.logical_size)?;
    writeln!(w, "Created Date: {}", format_date(ts.created))?;
    writeln!(w, "Modified Date: {}", format_date(ts.modified))?;
    writeln!(w, "Accessed Date: {}", format_date(ts.accessed))?;
    writeln!(w, "Last Written Date: {}", format_date(ts.last_written))
}

/// Write one numbered listing line, right-aligning the position.
pub fn write_listing_line<W: Write + ?Sized>(
    w: &mut W,
    position: usize,
    name: &str,
) -> io::Result<()> {
    writeln!(w, "{:>3}. {}", position, name)
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// Printers over arbitrary writers never color on `Auto`.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    #[inline]
    fn format_name(&self, entry: &Entry) -> String {
        match (self.use_color, entry.is_folder()) {
            (false, _) => entry.filename.clone(),
            (true, true) => format!("\x1b[1;34m{}\x1b[0m", entry.filename),
            (true, false) => format!("\x1b[32m{}\x1b[0m", entry.filename),
        }
    }
}

impl<W: Write, E: Write> EntryPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &EntryRow<'_>, _ctx: &PrintContext) -> io::Result<()> {
        match self.cfg.detail {
            Detail::Name => {
                let name = self.format_name(row.entry);
                write_listing_line(&mut self.out, row.position, &name)
            }
            Detail::Full => {
                write_metadata(&mut self.out, row.entry)?;
                writeln!(self.out, "{RULE}")
            }
        }
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if !self.cfg.show_summary {
            return Ok(());
        }

        match ctx.query {
            Some(q) => writeln!(self.err, "\n[{}] {} entries match {:?}", ctx.kind, ctx.total, q),
            None => writeln!(self.err, "\n[{}] {} entries", ctx.kind, ctx.total),
        }
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    /// Create a printer that writes to stdout and stderr.
    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

impl<W: Write, E: Write> EntryPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &PrintContext) -> io::Result<()> {
        Ok(())
    }

    // JSON rows always carry the full entry; `Detail` only shapes human output.
    fn print_row(&mut self, row: &EntryRow<'_>, ctx: &PrintContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "kind": ctx.kind,
            "query": ctx.query,
            "position": row.position,
            "entry": row.entry,
        });
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &PrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            let obj = serde_json::json!({
                "type": "summary",
                "kind": ctx.kind,
                "query": ctx.query,
                "total": ctx.total,
            });
            writeln!(self.err, "{}", obj)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
