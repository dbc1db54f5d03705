//! Move resolver: decides how one matched file lands in its destination folder.
//!
//! Decision, per file:
//! - no file at `<dest>/<name>`: plain move
//! - byte-identical file there: move over it
//! - differing file there: move to the first free `_copy` name
//!
//! Failures are returned as `MoveOutcome::Failed` and leave the source where it was.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::compare::same_contents;
use super::duplicate::free_copy_path;
use super::entry::DirectoryEntry;
use super::helpers::{classify_move_error, io_hint};
use super::relocate::relocate;
use crate::errors::OrganizerError;

/// Result of relocating one matched file.
#[derive(Debug)]
pub enum MoveOutcome {
    /// Nothing was at the destination name.
    Moved(PathBuf),
    /// A byte-identical file was replaced.
    MovedReplacingIdentical(PathBuf),
    /// A differing file existed; the source was stored under a copy name.
    MovedAsCopy(PathBuf),
    /// The source already is the destination; nothing to do.
    AlreadyInPlace(PathBuf),
    Failed(OrganizerError),
}

impl MoveOutcome {
    /// Final path of the file when it was actually moved.
    pub fn moved_to(&self) -> Option<&Path> {
        match self {
            MoveOutcome::Moved(p)
            | MoveOutcome::MovedReplacingIdentical(p)
            | MoveOutcome::MovedAsCopy(p) => Some(p),
            MoveOutcome::AlreadyInPlace(_) | MoveOutcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MoveOutcome::Failed(_))
    }
}

/// Move `file` into `dest_folder` following the collision policy.
pub fn resolve_and_move(file: &DirectoryEntry, dest_folder: &Path) -> MoveOutcome {
    let src = file.path.as_path();
    let candidate = dest_folder.join(&file.name);

    if let Err(e) = fs::symlink_metadata(src) {
        return failed(classify_move_error(src, &candidate, e));
    }

    if is_same_file(src, &candidate) {
        debug!(path = %src.display(), "file already in its destination folder");
        return MoveOutcome::AlreadyInPlace(candidate);
    }

    match fs::symlink_metadata(&candidate) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            match relocate(src, &candidate, false) {
                Ok(()) => {
                    info!(name = %file.name.to_string_lossy(), folder = %dest_folder.display(), "did not exist in destination folder; moved file");
                    MoveOutcome::Moved(candidate)
                }
                Err(e) => failed_io(src, &candidate, e),
            }
        }
        Err(e) => failed_io(src, &candidate, e),
        Ok(meta) => {
            let identical = if meta.is_file() {
                match same_contents(src, &candidate) {
                    Ok(same) => same,
                    Err(source) => {
                        return failed(OrganizerError::Compare {
                            src: src.to_path_buf(),
                            dest: candidate,
                            source,
                        });
                    }
                }
            } else {
                false
            };

            if identical && is_same_inode(src, &candidate) {
                // A rename between two links to one inode is a no-op, so drop the source link.
                return match fs::remove_file(src) {
                    Ok(()) => {
                        warn!(name = %file.name.to_string_lossy(), folder = %dest_folder.display(), "already exists as a hard link; removed source link");
                        MoveOutcome::MovedReplacingIdentical(candidate)
                    }
                    Err(e) => failed_io(src, &candidate, e),
                };
            }

            if identical {
                match relocate(src, &candidate, true) {
                    Ok(()) => {
                        warn!(name = %file.name.to_string_lossy(), folder = %dest_folder.display(), "already exists with matching contents; replaced");
                        MoveOutcome::MovedReplacingIdentical(candidate)
                    }
                    Err(e) => failed_io(src, &candidate, e),
                }
            } else {
                let Some(copy) = free_copy_path(dest_folder, &file.name) else {
                    return failed(OrganizerError::CopyNameExhausted(candidate));
                };
                match relocate(src, &copy, false) {
                    Ok(()) => {
                        warn!(
                            name = %file.name.to_string_lossy(),
                            folder = %dest_folder.display(),
                            copy = %copy.display(),
                            "already exists with different contents; stored as a copy"
                        );
                        MoveOutcome::MovedAsCopy(copy)
                    }
                    Err(e) => failed_io(src, &copy, e),
                }
            }
        }
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
fn is_same_inode(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_inode(_a: &Path, _b: &Path) -> bool {
    false
}

fn failed_io(src: &Path, dest: &Path, e: io::Error) -> MoveOutcome {
    if let Some(hint) = io_hint(&e) {
        debug!(src = %src.display(), hint, "move hint");
    }
    failed(classify_move_error(src, dest, e))
}

fn failed(err: OrganizerError) -> MoveOutcome {
    error!(code = err.code(), kind = err.kind(), error = %err, "move failed; file left in place");
    MoveOutcome::Failed(err)
}
