mod entry;
mod provider;
mod scan;

pub use entry::{Entry, EntryFlags, Timestamps};
pub use provider::{
    BasicProvider, MetadataField, MetadataProvider, MetadataUnavailable, platform_provider,
};
#[cfg(unix)]
pub use provider::UnixProvider;
#[cfg(windows)]
pub use provider::WindowsProvider;
pub use scan::scan_directory;
