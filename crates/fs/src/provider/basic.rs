use std::{fs::Metadata, path::Path};

use super::{MetadataProvider, MetadataUnavailable, last_write, logical_len};
use crate::entry::{EntryFlags, Timestamps};

/// Portable fallback: no attribute bits, no owner, one timestamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicProvider;

impl MetadataProvider for BasicProvider {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn attributes(
        &self,
        _path: &Path,
        _meta: &Metadata,
    ) -> Result<EntryFlags, MetadataUnavailable> {
        Ok(EntryFlags::empty())
    }

    fn owner(&self, _path: &Path, _meta: &Metadata) -> Result<String, MetadataUnavailable> {
        Ok(String::new())
    }

    fn timestamps(&self, path: &Path, meta: &Metadata) -> Result<Timestamps, MetadataUnavailable> {
        last_write(path, meta).map(Timestamps::collapsed)
    }

    fn sizes(&self, meta: &Metadata) -> (u64, u64) {
        let len = logical_len(meta);
        (len, len)
    }
}
