use std::{
    ffi::CStr,
    fs::Metadata,
    os::unix::fs::MetadataExt,
    path::Path,
};

use chrono::{DateTime, Utc};

use super::{MetadataField, MetadataProvider, MetadataUnavailable, last_write, logical_len, to_utc};
use crate::entry::{EntryFlags, Timestamps};

/// `st_blocks` is always counted in 512-byte units.
const BLOCK_UNIT: u64 = 512;
const MAX_PASSWD_BUF: usize = 1 << 16;

/// Attributes from the name and mode bits, owner from the passwd database.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixProvider;

impl MetadataProvider for UnixProvider {
    fn name(&self) -> &'static str {
        "unix"
    }

    fn attributes(&self, path: &Path, meta: &Metadata) -> Result<EntryFlags, MetadataUnavailable> {
        let mut flags = EntryFlags::empty();

        let hidden = path
            .file_name()
            .map(|n| n.as_encoded_bytes().starts_with(b"."))
            .unwrap_or(false);
        flags.set(EntryFlags::HIDDEN, hidden);
        flags.set(EntryFlags::READ_ONLY, meta.permissions().readonly());

        Ok(flags)
    }

    fn owner(&self, path: &Path, meta: &Metadata) -> Result<String, MetadataUnavailable> {
        let uid = meta.uid();
        user_name(uid).ok_or_else(|| {
            let reason = format!("no passwd entry for uid {uid}");
            MetadataUnavailable::new(MetadataField::Owner, path, reason)
        })
    }

    /// `modified` carries the inode change time; `last_written` the content
    /// modification time. Birth time falls back to the modification time on
    /// filesystems that do not record it.
    fn timestamps(&self, path: &Path, meta: &Metadata) -> Result<Timestamps, MetadataUnavailable> {
        let written = last_write(path, meta)?;

        let changed = u32::try_from(meta.ctime_nsec())
            .ok()
            .and_then(|nsec| DateTime::<Utc>::from_timestamp(meta.ctime(), nsec))
            .unwrap_or(written);

        Ok(Timestamps {
            created: to_utc(meta.created()).or(Some(written)),
            modified: Some(changed),
            accessed: to_utc(meta.accessed()).or(Some(written)),
            last_written: Some(written),
        })
    }

    fn sizes(&self, meta: &Metadata) -> (u64, u64) {
        if !meta.is_file() {
            return (0, 0);
        }
        (meta.blocks().saturating_mul(BLOCK_UNIT), logical_len(meta))
    }
}

/// Resolve a uid to its account name with the reentrant passwd lookup, so
/// concurrent scans do not race on libc's static buffer.
pub(super) fn user_name(uid: u32) -> Option<String> {
    let mut buf: Vec<libc::c_char> = vec![0; 1024];

    loop {
        // SAFETY: all-zero is a valid `passwd` (null pointers, zero ids).
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();

        // SAFETY: every pointer refers to a live local and `buf.len()` is the
        // true capacity of `buf`.
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
        };

        if rc == libc::ERANGE && buf.len() < MAX_PASSWD_BUF {
            let grown = buf.len() * 2;
            buf.resize(grown, 0);
            continue;
        }

        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            return None;
        }

        // SAFETY: on success `pw_name` points into `buf` and is NUL-terminated.
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}
