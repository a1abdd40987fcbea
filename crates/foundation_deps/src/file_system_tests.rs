/* 📖 # File system contract tests

These checks run against both MockFileSystem and RealFileSystem so the mock stays
a faithful stand-in. Each check receives a handle and an empty scratch folder.
*/

#[cfg(test)]
mod file_system_contract_tests {
    use std::io;

    use foundation_base::ErrorKind;
    use tempfile::TempDir;

    use crate::file_system::{
        FileSystem, FileSystemDirectory, FileSystemHandle, Location, MockFileSystem,
        RealFileSystem, WriteOptions,
    };

    fn for_each_file_system(check: impl Fn(&FileSystemHandle, &Location)) {
        let mock = FileSystemHandle::new(MockFileSystem::new());
        let scratch = Location::from("/scratch");
        mock.create_directory(&scratch).unwrap();
        check(&mock, &scratch);

        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let real = FileSystemHandle::new(RealFileSystem::with_directory_root(temp_dir.path()));
        check(&real, &Location::from(temp_dir.path()));
    }

    #[test]
    fn test_handle_clones_share_implementation() {
        for_each_file_system(|fs, scratch| {
            let clone = fs.clone();
            let file = scratch.join("shared.txt");
            fs.write(b"shared", &file, WriteOptions::default()).unwrap();
            assert_eq!(clone.read(&file).unwrap(), b"shared");
        });
    }

    #[test]
    fn test_create_directory_is_idempotent() {
        for_each_file_system(|fs, scratch| {
            let folder = scratch.join("a/b/c");
            fs.create_directory(&folder).unwrap();
            fs.create_directory(&folder).unwrap();
            assert!(fs.folder_exists(&folder));
            assert!(fs.folder_exists(&scratch.join("a/b")));
            assert!(!fs.file_exists(&folder));
        });
    }

    #[test]
    fn test_create_directory_over_file_fails() {
        for_each_file_system(|fs, scratch| {
            let file = scratch.join("occupied");
            fs.write(b"", &file, WriteOptions::default()).unwrap();

            let error = fs.create_directory(&file).unwrap_err();
            assert!(matches!(error.kind(), ErrorKind::DirectoryCreation { .. }));
            assert!(fs.file_exists(&file));
        });
    }

    #[test]
    fn test_write_then_read_returns_bytes() {
        for_each_file_system(|fs, scratch| {
            for (name, data) in [("empty.bin", &b""[..]), ("data.bin", &b"\x00\x01payload"[..])] {
                let file = scratch.join(name);
                fs.write(data, &file, WriteOptions::default()).unwrap();
                assert_eq!(fs.read(&file).unwrap(), data);

                let atomic = scratch.join(format!("atomic-{}", name));
                fs.write(data, &atomic, WriteOptions::ATOMIC).unwrap();
                assert_eq!(fs.read(&atomic).unwrap(), data);
            }
        });
    }

    #[test]
    fn test_write_replaces_existing_contents() {
        for_each_file_system(|fs, scratch| {
            let file = scratch.join("value.txt");
            fs.write(b"long original", &file, WriteOptions::default()).unwrap();
            fs.write(b"short", &file, WriteOptions::default()).unwrap();
            assert_eq!(fs.read_to_string(&file).unwrap(), "short");
        });
    }

    #[test]
    fn test_write_without_overwriting_keeps_original() {
        for_each_file_system(|fs, scratch| {
            let file = scratch.join("first.txt");
            fs.write(b"first", &file, WriteOptions::WITHOUT_OVERWRITING).unwrap();
            let error = fs
                .write(b"second", &file, WriteOptions::WITHOUT_OVERWRITING)
                .unwrap_err();
            assert_eq!(error.io_kind(), Some(io::ErrorKind::AlreadyExists));
            assert_eq!(fs.read(&file).unwrap(), b"first");
        });
    }

    #[test]
    fn test_read_to_string_rejects_invalid_utf8() {
        for_each_file_system(|fs, scratch| {
            let file = scratch.join("bad.txt");
            fs.write(&[0xFF, 0xFE], &file, WriteOptions::default()).unwrap();
            let error = fs.read_to_string(&file).unwrap_err();
            assert_eq!(error.io_kind(), Some(io::ErrorKind::InvalidData));
        });
    }

    #[test]
    fn test_delete_missing_location_fails_with_not_found() {
        for_each_file_system(|fs, scratch| {
            let missing = scratch.join("never-created");
            let error = fs.delete_location(&missing).unwrap_err();
            assert!(matches!(error.kind(), ErrorKind::FileError { .. }));
            assert_eq!(error.io_kind(), Some(io::ErrorKind::NotFound));
        });
    }

    #[test]
    fn test_delete_directory_is_recursive() {
        for_each_file_system(|fs, scratch| {
            let folder = scratch.join("tree");
            fs.create_directory(&folder.join("branch")).unwrap();
            fs.write(b"leaf", &folder.join("branch/leaf.txt"), WriteOptions::default())
                .unwrap();

            fs.delete_location(&folder).unwrap();
            assert!(!fs.folder_exists(&folder));
            assert!(!fs.file_exists(&folder.join("branch/leaf.txt")));
            assert!(fs.folder_exists(scratch));
        });
    }

    #[test]
    fn test_delete_file() {
        for_each_file_system(|fs, scratch| {
            let file = scratch.join("doomed.txt");
            fs.write(b"x", &file, WriteOptions::default()).unwrap();
            fs.delete_location(&file).unwrap();
            assert!(!fs.file_exists(&file));
        });
    }

    #[test]
    fn test_move_file() {
        for_each_file_system(|fs, scratch| {
            let from = scratch.join("from.txt");
            let to = scratch.join("to.txt");
            fs.write(b"moving", &from, WriteOptions::default()).unwrap();

            fs.move_resource(&from, &to).unwrap();
            assert!(!fs.file_exists(&from));
            assert_eq!(fs.read(&to).unwrap(), b"moving");
        });
    }

    #[test]
    fn test_copy_directory() {
        for_each_file_system(|fs, scratch| {
            let from = scratch.join("original");
            let to = scratch.join("copy");
            fs.create_directory(&from.join("inner")).unwrap();
            fs.write(b"deep", &from.join("inner/file.txt"), WriteOptions::default())
                .unwrap();

            fs.copy_resource(&from, &to).unwrap();
            assert_eq!(fs.read(&to.join("inner/file.txt")).unwrap(), b"deep");
            assert_eq!(fs.read(&from.join("inner/file.txt")).unwrap(), b"deep");
        });
    }

    #[test]
    fn test_transfer_onto_existing_destination_fails() {
        for_each_file_system(|fs, scratch| {
            let from = scratch.join("source.txt");
            let to = scratch.join("target.txt");
            fs.write(b"source", &from, WriteOptions::default()).unwrap();
            fs.write(b"target", &to, WriteOptions::default()).unwrap();

            for error in [
                fs.move_resource(&from, &to).unwrap_err(),
                fs.copy_resource(&from, &to).unwrap_err(),
            ] {
                assert!(matches!(error.kind(), ErrorKind::TransferError { .. }));
                assert_eq!(error.io_kind(), Some(io::ErrorKind::AlreadyExists));
            }
            assert_eq!(fs.read(&to).unwrap(), b"target");
            assert_eq!(fs.read(&from).unwrap(), b"source");
        });
    }

    #[test]
    fn test_transfer_of_missing_source_fails() {
        for_each_file_system(|fs, scratch| {
            let error = fs
                .copy_resource(&scratch.join("missing"), &scratch.join("copy"))
                .unwrap_err();
            assert!(matches!(error.kind(), ErrorKind::TransferError { .. }));
            assert_eq!(error.io_kind(), Some(io::ErrorKind::NotFound));
        });
    }

    #[test]
    fn test_transfer_into_own_subtree_fails() {
        for_each_file_system(|fs, scratch| {
            let from = scratch.join("tree");
            fs.create_directory(&from).unwrap();
            fs.write(b"leaf", &from.join("leaf.txt"), WriteOptions::default())
                .unwrap();
            let to = from.join("inner");

            for error in [
                fs.move_resource(&from, &to).unwrap_err(),
                fs.copy_resource(&from, &to).unwrap_err(),
            ] {
                assert!(matches!(error.kind(), ErrorKind::TransferError { .. }));
                assert_eq!(error.io_kind(), Some(io::ErrorKind::InvalidInput));
            }
            assert!(!fs.folder_exists(&to));
            assert!(!fs.file_exists(&to));
            assert_eq!(fs.read(&from.join("leaf.txt")).unwrap(), b"leaf");
        });
    }

    #[test]
    fn test_url_for_directory_resolves_existing_folder() {
        for_each_file_system(|fs, _scratch| {
            for directory in FileSystemDirectory::ALL {
                let location = fs.url_for_directory(directory).unwrap();
                assert!(fs.folder_exists(&location), "{} not created", directory);
                assert_eq!(location.file_name(), Some(directory.name()));
            }
        });
    }
}
