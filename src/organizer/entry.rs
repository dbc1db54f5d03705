//! Value records produced by the scanner.

use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A filesystem entry seen during a scan. Holds no OS handle; the entry may
/// be gone by the time it is used, and callers must treat that as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: OsString,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(path.into(), EntryKind::File)
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(path.into(), EntryKind::Directory)
    }

    fn with_kind(path: PathBuf, kind: EntryKind) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        Self { name, path, kind }
    }
}

/// Subfolders and matched files, in scan order.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub subfolders: Vec<DirectoryEntry>,
    pub matched_files: Vec<DirectoryEntry>,
}
