//! Cleanup sweeper: removes scanned subfolders left empty after the move phase.
//! Must only run once every move has finished.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::helpers::io_hint;

/// Visit `folders` in order and delete each one that has no entries.
/// Returns the folders actually deleted. Failures are logged and skipped.
pub fn sweep<P: AsRef<Path>>(folders: &[P]) -> Vec<PathBuf> {
    let mut deleted = Vec::new();
    for folder in folders {
        let folder = folder.as_ref();
        match is_empty_dir(folder) {
            Ok(true) => {}
            Ok(false) => {
                debug!(path = %folder.display(), "folder not empty; keeping");
                continue;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %folder.display(), "folder no longer exists");
                continue;
            }
            Err(e) => {
                error!(path = %folder.display(), error = %e, kind = "inspect", "cannot inspect folder");
                continue;
            }
        }

        info!(path = %folder.display(), "folder is empty; deleting");
        match fs::remove_dir(folder) {
            Ok(()) => deleted.push(folder.to_path_buf()),
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => {
                error!(path = %folder.display(), error = %e, kind = "not_empty", "folder gained entries before deletion");
            }
            Err(e) => {
                error!(
                    path = %folder.display(),
                    error = %e,
                    kind = "delete",
                    hint = io_hint(&e).unwrap_or(""),
                    "cannot delete folder"
                );
            }
        }
    }
    deleted
}

fn is_empty_dir(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletes_only_empty_folders() {
        let td = tempfile::tempdir().unwrap();
        let empty = td.path().join("empty");
        let full = td.path().join("full");
        fs::create_dir(&empty).unwrap();
        fs::create_dir(&full).unwrap();
        fs::write(full.join("notes.txt"), b"keep").unwrap();

        let deleted = sweep(&[&empty, &full]);
        assert_eq!(deleted, vec![empty.clone()]);
        assert!(!empty.exists());
        assert!(full.exists());
    }

    #[test]
    fn parent_holding_an_empty_child_survives_in_scan_order() {
        let td = tempfile::tempdir().unwrap();
        let parent = td.path().join("A");
        let child = parent.join("B");
        fs::create_dir_all(&child).unwrap();

        let deleted = sweep(&[&parent, &child]);
        assert_eq!(deleted, vec![child]);
        assert!(parent.exists());
    }

    #[test]
    fn missing_folders_are_skipped() {
        let td = tempfile::tempdir().unwrap();
        let deleted = sweep(&[td.path().join("ghost")]);
        assert!(deleted.is_empty());
    }
}
