use std::{
    fs::Metadata,
    os::windows::{ffi::OsStrExt, fs::MetadataExt},
    path::Path,
    ptr,
};

use windows_sys::Win32::{
    Foundation::{ERROR_SUCCESS, LocalFree, PSID},
    Security::{
        Authorization::{GetNamedSecurityInfoW, SE_FILE_OBJECT},
        LookupAccountSidW, OWNER_SECURITY_INFORMATION, PSECURITY_DESCRIPTOR, SID_NAME_USE,
    },
};

use super::{MetadataField, MetadataProvider, MetadataUnavailable, last_write, logical_len, to_utc};
use crate::entry::{EntryFlags, Timestamps};

const FILE_ATTRIBUTE_READONLY: u32 = 0x1;
const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;

const ACCOUNT_NAME_CAP: usize = 256;

/// Attribute bits from the file attributes word, owner from the security
/// descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsProvider;

impl MetadataProvider for WindowsProvider {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn attributes(&self, _path: &Path, meta: &Metadata) -> Result<EntryFlags, MetadataUnavailable> {
        let attrs = meta.file_attributes();
        let mut flags = EntryFlags::empty();

        flags.set(EntryFlags::SYSTEM, attrs & FILE_ATTRIBUTE_SYSTEM != 0);
        flags.set(EntryFlags::HIDDEN, attrs & FILE_ATTRIBUTE_HIDDEN != 0);
        flags.set(EntryFlags::READ_ONLY, attrs & FILE_ATTRIBUTE_READONLY != 0);

        Ok(flags)
    }

    fn owner(&self, path: &Path, _meta: &Metadata) -> Result<String, MetadataUnavailable> {
        owner_account(path)
            .map_err(|reason| MetadataUnavailable::new(MetadataField::Owner, path, reason))
    }

    fn timestamps(&self, path: &Path, meta: &Metadata) -> Result<Timestamps, MetadataUnavailable> {
        let written = last_write(path, meta)?;

        Ok(Timestamps {
            created: to_utc(meta.created()).or(Some(written)),
            modified: Some(written),
            accessed: to_utc(meta.accessed()).or(Some(written)),
            last_written: Some(written),
        })
    }

    fn sizes(&self, meta: &Metadata) -> (u64, u64) {
        let len = logical_len(meta);
        (len, len)
    }
}

fn owner_account(path: &Path) -> Result<String, String> {
    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut owner: PSID = ptr::null_mut();
    let mut descriptor: PSECURITY_DESCRIPTOR = ptr::null_mut();

    // SAFETY: `wide` is NUL-terminated; out-pointers are live locals. The
    // owner SID points into `descriptor`, released below.
    let rc = unsafe {
        GetNamedSecurityInfoW(
            wide.as_ptr(),
            SE_FILE_OBJECT,
            OWNER_SECURITY_INFORMATION,
            &mut owner,
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            &mut descriptor,
        )
    };

    if rc != ERROR_SUCCESS {
        return Err(format!("GetNamedSecurityInfoW failed with code {rc}"));
    }

    let result = lookup_account(owner);

    if !descriptor.is_null() {
        // SAFETY: `descriptor` was allocated by GetNamedSecurityInfoW.
        unsafe { LocalFree(descriptor) };
    }

    result
}

fn lookup_account(owner: PSID) -> Result<String, String> {
    if owner.is_null() {
        return Err("security descriptor has no owner".to_owned());
    }

    let mut name = [0u16; ACCOUNT_NAME_CAP];
    let mut name_len = ACCOUNT_NAME_CAP as u32;
    let mut domain = [0u16; ACCOUNT_NAME_CAP];
    let mut domain_len = ACCOUNT_NAME_CAP as u32;
    let mut sid_use: SID_NAME_USE = 0;

    // SAFETY: buffers and their lengths describe the arrays above; `owner`
    // is a valid SID for the lifetime of the enclosing descriptor.
    let ok = unsafe {
        LookupAccountSidW(
            ptr::null(),
            owner,
            name.as_mut_ptr(),
            &mut name_len,
            domain.as_mut_ptr(),
            &mut domain_len,
            &mut sid_use,
        )
    };

    if ok == 0 {
        return Err("LookupAccountSidW failed".to_owned());
    }

    let len = (name_len as usize).min(ACCOUNT_NAME_CAP);
    Ok(String::from_utf16_lossy(&name[..len]))
}
