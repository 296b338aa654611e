use std::path::{Path, PathBuf};

pub const PROGRAM_LOG_LEVEL: &str = "SHELF_LOG_LEVEL";

/// Replace a leading `~` with the user's home directory.
///
/// Only the bare `~` and `~/...` forms are expanded; `~user` is left alone.
/// When no home directory can be determined the input is returned as is.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(raw),
    };

    match dirs::home_dir() {
        Some(home) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            if rest.is_empty() {
                home
            } else {
                home.join(Path::new(rest))
            }
        }
        None => PathBuf::from(raw),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
