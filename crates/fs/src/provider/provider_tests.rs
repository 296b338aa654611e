use super::*;
use std::fs::{self, create_dir, write};

fn meta_of(path: &Path) -> Metadata {
    fs::metadata(path).expect("metadata")
}

#[test]
fn metadata_unavailable_names_field_and_path() {
    let err = MetadataUnavailable::new(MetadataField::Owner, Path::new("/x/y"), "denied");
    assert_eq!(err.to_string(), "owner unavailable for /x/y: denied");

    let cases = [
        (MetadataField::Attributes, "attributes"),
        (MetadataField::Owner, "owner"),
        (MetadataField::Timestamps, "timestamps"),
    ];
    for (field, expected) in cases {
        assert_eq!(field.to_string(), expected);
    }
}

#[test]
fn basic_provider_mirrors_sizes_and_collapses_dates() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("block.bin");
    write(&file, vec![0u8; 4096]).expect("write file");

    let meta = meta_of(&file);
    let p = BasicProvider;

    assert_eq!(p.sizes(&meta), (4096, 4096));
    assert_eq!(p.attributes(&file, &meta).expect("attrs"), EntryFlags::empty());
    assert_eq!(p.owner(&file, &meta).expect("owner"), "");

    let ts = p.timestamps(&file, &meta).expect("timestamps");
    let written = DateTime::<Utc>::from(meta.modified().expect("mtime"));
    assert_eq!(ts, Timestamps::collapsed(written));
}

#[test]
fn directories_report_zero_sizes() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let sub = tmp.path().join("sub");
    create_dir(&sub).expect("create subdir");

    let meta = meta_of(&sub);

    assert_eq!(BasicProvider.sizes(&meta), (0, 0));
    assert_eq!(platform_provider().sizes(&meta), (0, 0));
}

#[test]
fn platform_provider_reports_logical_length() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let file = tmp.path().join("hello.txt");
    write(&file, b"hello world").expect("write file");

    let meta = meta_of(&file);
    let (_, logical) = platform_provider().sizes(&meta);

    assert_eq!(logical, 11);
}

#[cfg(unix)]
mod unix_provider {
    use super::*;
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    #[test]
    fn dot_files_are_hidden() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let cases: &[(&str, bool)] = &[(".env", true), ("env", false), ("a.env", false)];

        for (name, hidden) in cases {
            let path = tmp.path().join(name);
            write(&path, b"x").expect("write file");
            let flags = UnixProvider
                .attributes(&path, &meta_of(&path))
                .expect("attrs");
            assert_eq!(flags.contains(EntryFlags::HIDDEN), *hidden, "name {:?}", name);
            assert!(!flags.contains(EntryFlags::SYSTEM));
        }
    }

    #[test]
    fn read_only_follows_permission_bits() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("locked.txt");
        write(&path, b"x").expect("write file");

        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).expect("chmod");
        let flags = UnixProvider.attributes(&path, &meta_of(&path)).expect("attrs");
        assert!(flags.contains(EntryFlags::READ_ONLY));

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");
        let flags = UnixProvider.attributes(&path, &meta_of(&path)).expect("attrs");
        assert!(!flags.contains(EntryFlags::READ_ONLY));
    }

    #[test]
    fn physical_size_counts_allocated_blocks() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("block.bin");
        write(&path, vec![7u8; 4096]).expect("write file");

        let meta = meta_of(&path);
        let (physical, logical) = UnixProvider.sizes(&meta);

        assert_eq!(logical, 4096);
        assert_eq!(physical, meta.blocks() * 512);
    }

    #[test]
    fn owner_matches_passwd_lookup_when_resolvable() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("mine.txt");
        write(&path, b"x").expect("write file");

        let meta = meta_of(&path);
        match UnixProvider.owner(&path, &meta) {
            Ok(name) => {
                assert!(!name.is_empty());
                assert_eq!(Some(name), unix::user_name(meta.uid()));
            }
            // Containers may run under a uid with no passwd entry.
            Err(e) => assert_eq!(e.field, MetadataField::Owner),
        }
    }

    #[test]
    fn timestamps_fill_every_field() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("dated.txt");
        write(&path, b"x").expect("write file");

        let meta = meta_of(&path);
        let ts = UnixProvider.timestamps(&path, &meta).expect("timestamps");

        let written = DateTime::<Utc>::from(meta.modified().expect("mtime"));
        assert_eq!(ts.last_written, Some(written));
        assert!(ts.created.is_some());
        assert!(ts.modified.is_some());
        assert!(ts.accessed.is_some());
    }

    #[test]
    fn modified_tracks_inode_change_not_content_write() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("aged.txt");
        write(&path, b"x").expect("write file");

        let long_ago = std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000_000);
        fs::File::options()
            .write(true)
            .open(&path)
            .expect("open file")
            .set_modified(long_ago)
            .expect("set mtime");

        let meta = meta_of(&path);
        let ts = UnixProvider.timestamps(&path, &meta).expect("timestamps");

        assert_eq!(ts.last_written, Some(DateTime::<Utc>::from(long_ago)));
        let changed = ts.modified.expect("change time");
        assert_eq!(changed.timestamp(), meta.ctime());
        assert_ne!(ts.modified, ts.last_written);
    }
}
