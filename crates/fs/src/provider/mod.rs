use std::{
    fmt,
    fs::Metadata,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entry::{EntryFlags, Timestamps};

mod basic;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use basic::BasicProvider;
#[cfg(unix)]
pub use unix::UnixProvider;
#[cfg(windows)]
pub use windows::WindowsProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Attributes,
    Owner,
    Timestamps,
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetadataField::Attributes => "attributes",
            MetadataField::Owner => "owner",
            MetadataField::Timestamps => "timestamps",
        };
        f.write_str(s)
    }
}

/// A single metadata query failed. Never fatal: the scanner falls back to the
/// field's default.
#[derive(Debug, Error)]
#[error("{field} unavailable for {}: {reason}", path.display())]
pub struct MetadataUnavailable {
    pub field: MetadataField,
    pub path: PathBuf,
    pub reason: String,
}

impl MetadataUnavailable {
    pub fn new(field: MetadataField, path: &Path, reason: impl fmt::Display) -> Self {
        Self {
            field,
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Source of the platform-dependent parts of an [`Entry`](crate::Entry).
///
/// Each query receives the child's path together with metadata the scanner
/// already fetched, so implementations only issue extra calls for what
/// `std::fs::Metadata` does not carry.
pub trait MetadataProvider: Send + Sync {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    /// System, hidden and read-only bits. `FOLDER` is owned by the scanner
    /// and ignored if returned.
    fn attributes(&self, path: &Path, meta: &Metadata) -> Result<EntryFlags, MetadataUnavailable>;

    fn owner(&self, path: &Path, meta: &Metadata) -> Result<String, MetadataUnavailable>;

    fn timestamps(&self, path: &Path, meta: &Metadata) -> Result<Timestamps, MetadataUnavailable>;

    /// `(physical, logical)` sizes in bytes.
    fn sizes(&self, meta: &Metadata) -> (u64, u64);
}

/// The provider matching the compile target.
pub fn platform_provider() -> Box<dyn MetadataProvider> {
    #[cfg(unix)]
    {
        Box::new(UnixProvider)
    }
    #[cfg(windows)]
    {
        Box::new(WindowsProvider)
    }
    #[cfg(not(any(unix, windows)))]
    {
        Box::new(BasicProvider)
    }
}

/// Byte length for regular files, 0 for everything else. Symlinks have
/// already been followed by the scanner.
#[inline]
pub(crate) fn logical_len(meta: &Metadata) -> u64 {
    if meta.is_file() { meta.len() } else { 0 }
}

pub(crate) fn last_write(
    path: &Path,
    meta: &Metadata,
) -> Result<DateTime<Utc>, MetadataUnavailable> {
    meta.modified()
        .map(DateTime::<Utc>::from)
        .map_err(|e| MetadataUnavailable::new(MetadataField::Timestamps, path, e))
}

#[inline]
pub(crate) fn to_utc(t: std::io::Result<SystemTime>) -> Option<DateTime<Utc>> {
    t.ok().map(DateTime::<Utc>::from)
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
