use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use clap::Args;
use log::{error, warn};
use shelf_engine::Catalog;

use crate::console::{Console, ConsoleConfig};

#[derive(Debug, Default, Args)]
pub struct ShellArgs {
    /// Directories to ingest before the prompt appears
    pub dirs: Vec<PathBuf>,

    /// Do not wait for Enter after detail views
    #[arg(long)]
    pub no_pause: bool,
}

pub fn run(args: ShellArgs) -> ExitCode {
    let mut catalog = Catalog::new();

    // A bad preload directory should not keep the shell from starting.
    let results = catalog.ingest_directories(&args.dirs);
    for (dir, res) in args.dirs.iter().zip(results) {
        if let Err(e) = res {
            warn!("[shell] skipping {}: {e}", dir.display());
            eprintln!("[shell] skipping {}: {e}", dir.display());
        }
    }

    let stdin = io::stdin();
    let cfg = ConsoleConfig {
        pause: !args.no_pause && stdin.is_terminal(),
    };

    let mut console = Console::new(&mut catalog, stdin.lock(), io::stdout().lock(), cfg);
    match console.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[shell] console I/O failed: {e}");
            eprintln!("[shell] {e}");
            ExitCode::from(2)
        }
    }
}
