//! Directory scanner.
//!
//! Each directory level is listed with walkdir (depth 1, sorted by name) and
//! the traversal itself uses an explicit stack of paths, so deep trees do not
//! grow the call stack and no directory iterator stays open across levels.
//!
//! Output order: a level's own subfolders and files first, then the full
//! results of each of its subfolders in discovery order (pre-order over
//! directories).

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use super::entry::{DirectoryEntry, ScanResult};
use super::extensions::ExtensionSet;
use crate::errors::OrganizerError;

#[derive(Default)]
struct Level {
    dirs: Vec<DirectoryEntry>,
    files: Vec<DirectoryEntry>,
}

/// Scan `root` for subfolders and files whose extension is in `allowed`.
///
/// An unreadable root is fatal. An unreadable subfolder is logged and its
/// branch skipped.
pub fn scan(
    root: &Path,
    allowed: &ExtensionSet,
    recursive: bool,
) -> Result<ScanResult, OrganizerError> {
    let mut result = ScanResult::default();
    let mut pending: Vec<PathBuf> = Vec::new();

    let level = list_level(root, allowed).map_err(|source| OrganizerError::Scan {
        path: root.to_path_buf(),
        source,
    })?;
    absorb(&mut result, &mut pending, level, recursive);

    while let Some(dir) = pending.pop() {
        match list_level(&dir, allowed) {
            Ok(level) => absorb(&mut result, &mut pending, level, recursive),
            Err(e) => {
                error!(path = %dir.display(), error = %e, kind = "scan", "cannot read subfolder; skipping branch");
            }
        }
    }

    debug!(
        root = %root.display(),
        subfolders = result.subfolders.len(),
        files = result.matched_files.len(),
        "scan finished"
    );
    Ok(result)
}

fn absorb(result: &mut ScanResult, pending: &mut Vec<PathBuf>, level: Level, recursive: bool) {
    if recursive {
        // Reverse so the first-discovered subfolder is popped first.
        pending.extend(level.dirs.iter().rev().map(|d| d.path.clone()));
    }
    result.subfolders.extend(level.dirs);
    result.matched_files.extend(level.files);
}

/// List the immediate children of `dir`.
fn list_level(dir: &Path, allowed: &ExtensionSet) -> io::Result<Level> {
    let mut level = Level::default();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(io::Error::from(e)),
            Err(e) => {
                warn!(
                    path = %e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    error = %e,
                    "skipping entry that could not be inspected"
                );
                continue;
            }
        };

        let ft = entry.file_type();
        if ft.is_dir() {
            debug!(name = %entry.file_name().to_string_lossy(), folder = %dir.display(), "found sub folder");
            level.dirs.push(DirectoryEntry::directory(entry.into_path()));
        } else if ft.is_file() || (ft.is_symlink() && entry.path().is_file()) {
            if allowed.matches(entry.path()) {
                info!(name = %entry.file_name().to_string_lossy(), folder = %dir.display(), "found file");
                level.files.push(DirectoryEntry::file(entry.into_path()));
            } else {
                debug!(path = %entry.path().display(), "extension not handled; skipping");
            }
        } else {
            debug!(path = %entry.path().display(), "not a regular file or directory; skipping");
        }
    }

    Ok(level)
}
