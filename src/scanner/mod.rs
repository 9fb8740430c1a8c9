//! Library scanner.
//!
//! Walks the configured library roots and collects every HEIC/HEIF file. The
//! whole set is materialized before conversion starts so the total is known up
//! front, and it is sorted so runs over the same library are reproducible.

use heic_converter_common::paths::is_heic_file;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Find all candidate files under `roots`, sorted and without duplicates.
///
/// Roots that are missing or not directories are skipped with a warning.
pub fn find_candidates(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for root in roots {
        if !root.is_dir() {
            warn!(
                "Library path does not exist or is not a directory: {}",
                root.display()
            );
            continue;
        }
        found.extend(scan_directory(root));
    }

    // Byte-wise ordering on the full path, not component-wise.
    found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    found.dedup();
    found
}

/// Recursively collect HEIC/HEIF files under one directory.
pub fn scan_directory(path: &Path) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", path.display());
    let mut files = Vec::new();

    for entry in WalkDir::new(path) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {}", path.display(), e);
                continue;
            }
        };

        if is_candidate_file(&entry) && is_heic_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    info!("Found {} HEIC/HEIF file(s) in {}", files.len(), path.display());
    files
}

/// Regular files, plus symlinks whose target is a regular file. Symlinked
/// directories are listed by the walk but never descended into.
fn is_candidate_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        entry.path().is_file()
    } else {
        entry.file_type().is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_finds_heic_files_case_insensitively() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("a");
        touch(&lib.join("photo1.heic"));
        touch(&lib.join("photo2.HEIF"));
        touch(&lib.join("note.txt"));
        touch(&lib.join("photo3.jpg"));

        let found = find_candidates(&[lib.clone()]);

        assert_eq!(found, vec![lib.join("photo1.heic"), lib.join("photo2.HEIF")]);
    }

    #[test]
    fn test_recurses_and_sorts() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        touch(&lib.join("z.heic"));
        touch(&lib.join("b/c.heic"));
        touch(&lib.join("b-c.heic"));
        touch(&lib.join("a/deep/er/x.HEIC"));

        let found = find_candidates(&[lib.clone()]);

        let mut expected = vec![
            lib.join("z.heic"),
            lib.join("b/c.heic"),
            lib.join("b-c.heic"),
            lib.join("a/deep/er/x.HEIC"),
        ];
        expected.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        assert_eq!(found, expected);
        // '-' sorts before '/' byte-wise
        assert!(
            found.iter().position(|p| p.ends_with("b-c.heic"))
                < found.iter().position(|p| p.ends_with("b/c.heic"))
        );
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        touch(&lib.join("photo.heic"));
        let file_root = lib.join("photo.heic");

        let found = find_candidates(&[
            dir.path().join("does-not-exist"),
            file_root,
            lib.clone(),
        ]);

        assert_eq!(found, vec![lib.join("photo.heic")]);
    }

    #[test]
    fn test_overlapping_roots_are_deduplicated() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        touch(&lib.join("sub/photo.heic"));

        let found = find_candidates(&[lib.clone(), lib.join("sub"), lib.clone()]);

        assert_eq!(found, vec![lib.join("sub/photo.heic")]);
    }

    #[test]
    fn test_directory_named_like_heic_is_ignored() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir_all(lib.join("album.heic")).unwrap();
        touch(&lib.join("album.heic/inner.heif"));

        let found = find_candidates(&[lib.clone()]);

        assert_eq!(found, vec![lib.join("album.heic/inner.heif")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_candidates() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let store = dir.path().join("store");
        let lib = dir.path().join("lib");
        touch(&store.join("real.heic"));
        touch(&store.join("nested.heif"));
        fs::create_dir_all(&lib).unwrap();
        symlink(store.join("real.heic"), lib.join("linked.heic")).unwrap();
        symlink(&store, lib.join("album")).unwrap();
        symlink(dir.path().join("gone.heic"), lib.join("dangling.heic")).unwrap();

        let found = find_candidates(&[lib.clone()]);

        // Linked directories are not descended, dangling links are ignored
        assert_eq!(found, vec![lib.join("linked.heic")]);
    }

    #[test]
    fn test_empty_roots() {
        assert!(find_candidates(&[]).is_empty());
    }
}
