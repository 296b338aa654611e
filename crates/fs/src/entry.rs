use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer, ser::SerializeStruct};

bitflags! {
    /// Attribute bits of a catalogued entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntryFlags: u8 {
        /// Marked as an operating system file (Windows only).
        const SYSTEM    = 0b0000_0001;
        const HIDDEN    = 0b0000_0010;
        const READ_ONLY = 0b0000_0100;
        /// The entry is itself a directory.
        const FOLDER    = 0b0000_1000;
    }
}

/// The four dates recorded for an entry.
///
/// `None` means the host could not report that time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Timestamps {
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
    pub last_written: Option<DateTime<Utc>>,
}

impl Timestamps {
    /// Use a single time for all four fields.
    pub fn collapsed(at: DateTime<Utc>) -> Self {
        Self {
            created: Some(at),
            modified: Some(at),
            accessed: Some(at),
            last_written: Some(at),
        }
    }
}

/// Metadata snapshot of one filesystem object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// Base name only, never a path
    pub filename: String,
    /// Account name of the owner, empty when unknown
    pub owner: String,
    pub flags: EntryFlags,
    pub timestamps: Timestamps,
    /// Bytes allocated on storage, 0 for directories
    pub physical_size: u64,
    /// Reported byte length, 0 for directories
    pub logical_size: u64,
}

impl Entry {
    pub fn named(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_system(&self) -> bool {
        self.flags.contains(EntryFlags::SYSTEM)
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(EntryFlags::HIDDEN)
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.flags.contains(EntryFlags::READ_ONLY)
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        self.flags.contains(EntryFlags::FOLDER)
    }
}

// Flags are written out as named booleans so the JSON stays readable.
impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Entry", 12)?;
        s.serialize_field("filename", &self.filename)?;
        s.serialize_field("owner", &self.owner)?;
        s.serialize_field("is_system", &self.is_system())?;
        s.serialize_field("is_hidden", &self.is_hidden())?;
        s.serialize_field("is_read_only", &self.is_read_only())?;
        s.serialize_field("is_folder", &self.is_folder())?;
        s.serialize_field("created", &self.timestamps.created)?;
        s.serialize_field("modified", &self.timestamps.modified)?;
        s.serialize_field("accessed", &self.timestamps.accessed)?;
        s.serialize_field("last_written", &self.timestamps.last_written)?;
        s.serialize_field("physical_size", &self.physical_size)?;
        s.serialize_field("logical_size", &self.logical_size)?;
        s.end()
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
