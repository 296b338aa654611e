use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    thread,
};

use crossbeam::channel;
use log::{debug, info};
use shelf_fs::{Entry, MetadataProvider, platform_provider, scan_directory};
use thiserror::Error;

use crate::wildcard::WildcardPattern;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{} does not exist or is not a directory", path.display())]
    InvalidPath { path: PathBuf },

    #[error("cannot list {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no entry at position {index} (catalog holds {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("invalid wildcard pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Insertion-ordered collection of entries.
///
/// Grows only through the ingest calls; entries are never removed or
/// changed. Positions handed out by [`Catalog::get_by_position`] are 1-based
/// and stable for the life of the catalog.
pub struct Catalog {
    entries: Vec<Entry>,
    provider: Box<dyn MetadataProvider>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("entries", &self.entries.len())
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl Catalog {
    /// Empty catalog reading metadata through the host platform's provider.
    pub fn new() -> Self {
        Self::with_provider(platform_provider())
    }

    pub fn with_provider(provider: Box<dyn MetadataProvider>) -> Self {
        Self {
            entries: Vec::new(),
            provider,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            provider: Box::new(shelf_fs::BasicProvider),
        }
    }

    /// Append one entry per direct child of `path`.
    ///
    /// The directory is scanned in full before anything is appended, so a
    /// failed call leaves the catalog untouched. Returns the number of
    /// entries added.
    pub fn ingest_directory(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        let batch = scan_checked(path, self.provider.as_ref())?;
        Ok(self.append(path, batch))
    }

    /// Ingest several directories, scanning them concurrently.
    ///
    /// Batches are appended in argument order, each one all-or-nothing, and
    /// the result for `paths[i]` is at index `i`.
    pub fn ingest_directories<P>(&mut self, paths: &[P]) -> Vec<Result<usize, CatalogError>>
    where
        P: AsRef<Path> + Sync,
    {
        if paths.is_empty() {
            return Vec::new();
        }

        let num_threads = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
            .min(paths.len());

        let (work_tx, work_rx) = channel::unbounded::<usize>();
        let (done_tx, done_rx) = channel::unbounded::<(usize, Result<Vec<Entry>, CatalogError>)>();

        for i in 0..paths.len() {
            let _ = work_tx.send(i);
        }
        drop(work_tx);

        debug!(
            "[catalog] scanning {} directories with {} threads",
            paths.len(),
            num_threads
        );

        let provider = self.provider.as_ref();
        thread::scope(|s| {
            for _ in 0..num_threads {
                let work_rx = work_rx.clone();
                let done_tx = done_tx.clone();

                s.spawn(move || {
                    while let Ok(i) = work_rx.recv() {
                        let res = scan_checked(paths[i].as_ref(), provider);
                        if done_tx.send((i, res)).is_err() {
                            return;
                        }
                    }
                });
            }
        });
        drop(done_tx);

        let mut scanned: Vec<_> = done_rx.iter().collect();
        scanned.sort_by_key(|(i, _)| *i);

        scanned
            .into_iter()
            .map(|(i, res)| res.map(|batch| self.append(paths[i].as_ref(), batch)))
            .collect()
    }

    fn append(&mut self, path: &Path, batch: Vec<Entry>) -> usize {
        let added = batch.len();
        self.entries.extend(batch);
        info!(
            "[catalog] ingested {} entries from {:?} ({} total)",
            added,
            path,
            self.entries.len()
        );
        added
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn list_all(&self) -> &[Entry] {
        &self.entries
    }

    /// The `index`-th entry, counting from 1.
    pub fn get_by_position(&self, index: usize) -> Result<&Entry, CatalogError> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .ok_or(CatalogError::OutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// First entry whose filename equals `name` exactly (case-sensitive).
    pub fn find_by_exact_name(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.filename == name)
    }

    /// Entries whose filename matches the glob `pattern`, in insertion order.
    pub fn find_by_wildcard(&self, pattern: &str) -> Result<Vec<&Entry>, CatalogError> {
        let compiled = WildcardPattern::compile(pattern)?;
        Ok(self.find_matching(&compiled))
    }

    pub fn find_matching(&self, pattern: &WildcardPattern) -> Vec<&Entry> {
        let hits: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| pattern.is_match(&e.filename))
            .collect();

        debug!("[catalog] pattern {:?}: {} matches", pattern.as_str(), hits.len());
        hits
    }

    /// A new sequence ordered by filename, byte-wise ascending. Equal names
    /// keep their insertion order; the catalog itself is not reordered.
    pub fn list_sorted_by_name(&self) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.filename.as_bytes().cmp(b.filename.as_bytes()));
        sorted
    }
}

fn scan_checked(path: &Path, provider: &dyn MetadataProvider) -> Result<Vec<Entry>, CatalogError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {}
        _ => {
            return Err(CatalogError::InvalidPath {
                path: path.to_path_buf(),
            });
        }
    }

    scan_directory(path, provider).map_err(|source| CatalogError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
