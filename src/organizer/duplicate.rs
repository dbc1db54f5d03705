//! Collision-safe naming for files whose contents differ from an existing destination.
//!
//! Policy:
//! - First choice is "<stem>_copy<.ext>".
//! - If that is taken too, "<stem>_copy2<.ext>", "<stem>_copy3<.ext>", ... up to
//!   `MAX_COPY_INDEX`. Existing files are never overwritten by a copy.
//!
//! Names are built as OsString so non-UTF-8 file names survive unchanged.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Highest numbered copy suffix tried before giving up.
pub const MAX_COPY_INDEX: u32 = 9_999;

/// "<stem>_copy<n?><.ext>" for `name`; `index` 1 yields the plain "_copy" form.
pub fn copy_name(name: &OsStr, index: u32) -> OsString {
    let base = Path::new(name);
    let stem = base.file_stem().unwrap_or(name);

    let mut out = OsString::from(stem);
    out.push("_copy");
    if index > 1 {
        out.push(index.to_string());
    }
    if let Some(ext) = base.extension() {
        out.push(".");
        out.push(ext);
    }
    out
}

/// First free copy path for `name` inside `dir`, or None when every index is taken.
pub fn free_copy_path(dir: &Path, name: &OsStr) -> Option<PathBuf> {
    for index in 1..=MAX_COPY_INDEX {
        let candidate = dir.join(copy_name(name, index));
        // symlink_metadata so a dangling link also counts as taken.
        if std::fs::symlink_metadata(&candidate).is_err() {
            return Some(candidate);
        }
        if index == 2 {
            trace!(name = ?name, dir = %dir.display(), "copy name taken; trying numbered suffixes");
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn copy_suffix_goes_before_extension() {
        assert_eq!(copy_name(OsStr::new("movie.mkv"), 1), OsString::from("movie_copy.mkv"));
        assert_eq!(copy_name(OsStr::new("movie.mkv"), 3), OsString::from("movie_copy3.mkv"));
        assert_eq!(
            copy_name(OsStr::new("show.s01.mkv"), 1),
            OsString::from("show.s01_copy.mkv")
        );
    }

    #[test]
    fn first_free_name_is_picked() {
        let td = tempfile::tempdir().unwrap();
        let name = OsStr::new("movie.mkv");
        assert_eq!(free_copy_path(td.path(), name), Some(td.path().join("movie_copy.mkv")));

        fs::write(td.path().join("movie_copy.mkv"), b"1").unwrap();
        fs::write(td.path().join("movie_copy2.mkv"), b"2").unwrap();
        assert_eq!(free_copy_path(td.path(), name), Some(td.path().join("movie_copy3.mkv")));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_preserved() {
        use std::os::unix::ffi::OsStrExt;
        let raw = [0xff, 0xfe, b'.', b'm', b'k', b'v'];
        let name = OsStr::from_bytes(&raw);
        let copy = copy_name(name, 1);
        assert_eq!(copy.as_bytes(), b"\xff\xfe_copy.mkv");
    }
}
