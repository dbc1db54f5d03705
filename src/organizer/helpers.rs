//! I/O error helpers.
//!
//! Turns raw io::Error values from a move into typed `OrganizerError`s and
//! attaches short platform-aware hints for the log line.

use std::io;
use std::path::Path;

use crate::errors::OrganizerError;

/// Short actionable hint for an I/O failure, if one applies.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::EBUSY => Some("resource busy; ensure no other process is using the file"),
            libc::ENOENT => Some("path not found; it may have been moved or deleted"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("file name or path too long"),
            libc::ENOTEMPTY => Some("directory not empty"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; cross-filesystem move"),
            32 => Some("sharing violation; file is in use"),
            2 | 3 => Some("path not found; it may have been moved or deleted"),
            112 => Some("insufficient disk space"),
            145 => Some("directory not empty"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        io::ErrorKind::DirectoryNotEmpty => Some("directory not empty"),
        _ => None,
    }
}

/// Classify a failed move of `src` to `dest`.
pub fn classify_move_error(src: &Path, dest: &Path, e: io::Error) -> OrganizerError {
    match e.kind() {
        io::ErrorKind::NotFound if std::fs::symlink_metadata(src).is_err() => {
            OrganizerError::SourceVanished(src.to_path_buf())
        }
        io::ErrorKind::PermissionDenied => OrganizerError::PermissionDenied {
            path: src.to_path_buf(),
            context: format!("move to '{}': {}", dest.display(), e),
        },
        _ => OrganizerError::Move {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            source: e,
        },
    }
}
