//! Folder provisioner: one destination folder per matched file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use super::entry::DirectoryEntry;
use crate::errors::OrganizerError;

/// `<dest_root>/<stem>` for a file named `<stem>.<ext>`. No further sanitizing.
pub fn destination_folder(dest_root: &Path, file: &DirectoryEntry) -> PathBuf {
    let name = Path::new(&file.name);
    let stem = name.file_stem().unwrap_or(name.as_os_str());
    dest_root.join(stem)
}

/// Create the destination folder for `file`. An existing directory is not an error.
pub fn provision_folder(dest_root: &Path, file: &DirectoryEntry) -> Result<PathBuf, OrganizerError> {
    let target = destination_folder(dest_root, file);
    match fs::create_dir(&target) {
        Ok(()) => {
            debug!(path = %target.display(), "folder created");
            Ok(target)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if target.is_dir() {
                warn!(path = %target.display(), "folder already exists");
                Ok(target)
            } else {
                error!(path = %target.display(), "destination exists but is not a directory");
                Err(OrganizerError::NotADirectory(target))
            }
        }
        Err(source) => {
            error!(path = %target.display(), error = %source, "cannot create folder");
            Err(OrganizerError::Provision {
                path: target,
                source,
            })
        }
    }
}

/// Provision a folder for each file, in input order. Failures stay per-file.
pub fn provision(
    dest_root: &Path,
    files: &[DirectoryEntry],
) -> Vec<Result<PathBuf, OrganizerError>> {
    files.iter().map(|f| provision_folder(dest_root, f)).collect()
}
