use std::{
    fs::{self, DirEntry, read_dir},
    io::Result,
    path::Path,
};

use log::{debug, warn};

use crate::{
    entry::{Entry, EntryFlags},
    provider::{MetadataProvider, MetadataUnavailable},
};

/// Read the direct children of `dir` into entries, in enumeration order.
///
/// Subdirectories become single folder entries; their contents are not
/// descended into. Only a failure to open `dir` itself is an error: children
/// that cannot be read are logged and skipped, and per-field metadata
/// failures degrade to the field's default.
pub fn scan_directory(dir: &Path, provider: &dyn MetadataProvider) -> Result<Vec<Entry>> {
    let rd = read_dir(dir)?;
    let mut entries = Vec::new();

    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[scan] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        entries.push(inspect_entry(&entry, provider));
    }

    debug!(
        "[scan] {:?}: {} entries via {} provider",
        dir,
        entries.len(),
        provider.name()
    );

    Ok(entries)
}

/// Build the entry for one directory child.
pub(crate) fn inspect_entry(entry: &DirEntry, provider: &dyn MetadataProvider) -> Entry {
    let path = entry.path();
    let filename = entry.file_name().to_string_lossy().into_owned();

    // Follow symlinks so a link to a directory is a folder. A dangling link
    // falls back to the link's own metadata.
    let meta = match fs::metadata(&path).or_else(|_| entry.metadata()) {
        Ok(m) => m,
        Err(e) => {
            debug!("[scan] metadata({:?}) failed: {e}", path);
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            let mut flags = EntryFlags::empty();
            flags.set(EntryFlags::FOLDER, is_dir);

            return Entry {
                flags,
                ..Entry::named(filename)
            };
        }
    };

    let mut flags = or_default(provider.attributes(&path, &meta));
    flags.set(EntryFlags::FOLDER, meta.is_dir());

    let owner = or_default(provider.owner(&path, &meta));
    let timestamps = or_default(provider.timestamps(&path, &meta));
    let (physical_size, logical_size) = provider.sizes(&meta);

    Entry {
        filename,
        owner,
        flags,
        timestamps,
        physical_size,
        logical_size,
    }
}

fn or_default<T: Default>(res: std::result::Result<T, MetadataUnavailable>) -> T {
    res.unwrap_or_else(|e| {
        debug!("[scan] {e}");
        T::default()
    })
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
