//! Filesystem move primitive.
//! - Same filesystem: a single rename (replaces an existing destination on Unix).
//! - Windows: an existing destination is removed first when replacing.
//! - Cross-device: copy into a hidden temp file beside the destination, rename
//!   it into place, then remove the source.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, warn};

/// Move `src` to `dest`. With `replace`, an existing `dest` is overwritten.
pub fn relocate(src: &Path, dest: &Path, replace: bool) -> io::Result<()> {
    #[cfg(windows)]
    if replace {
        match fs::remove_file(dest) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    #[cfg(not(windows))]
    let _ = replace;

    match fs::rename(src, dest) {
        Ok(()) => {
            #[cfg(unix)]
            if let Some(parent) = dest.parent() {
                // Durability of the directory entry; a failure here does not undo the move.
                let _ = File::open(parent).and_then(|d| d.sync_all());
            }
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(src = %src.display(), dest = %dest.display(), "rename crosses filesystems; copying instead");
            copy_then_remove(src, dest, replace)
        }
        Err(e) => Err(e),
    }
}

/// Copy `src` over to `dest`, then remove `src`. If the source cannot be removed,
/// a newly created `dest` is deleted again so the file exists only once.
/// A replaced `dest` already held identical bytes and is kept.
fn copy_then_remove(src: &Path, dest: &Path, replace: bool) -> io::Result<()> {
    let dir = dest
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent"))?;
    let tmp = unique_temp_path(dir);

    let copied = fs::copy(src, &tmp).and_then(|_| File::open(&tmp)?.sync_all());
    if let Err(e) = copied.and_then(|_| fs::rename(&tmp, dest)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    debug!(src = %src.display(), dest = %dest.display(), "copied across filesystems");
    if let Err(e) = fs::remove_file(src) {
        if replace {
            warn!(src = %src.display(), dest = %dest.display(), error = %e, "source not removed after copy; destination holds the same bytes");
        } else if let Err(undo) = fs::remove_file(dest) {
            error!(
                src = %src.display(),
                dest = %dest.display(),
                error = %undo,
                kind = "orphaned_copy",
                "source not removed after copy and the copy could not be deleted"
            );
        }
        return Err(e);
    }
    Ok(())
}

fn unique_temp_path(dir: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dir.join(format!(".file_organizer.{}.{}.tmp", std::process::id(), nanos))
}

fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        // ERROR_NOT_SAME_DEVICE
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_moves_and_replaces() {
        let td = tempfile::tempdir().unwrap();
        let src = td.path().join("a.mkv");
        let dest = td.path().join("b.mkv");
        fs::write(&src, b"new").unwrap();
        fs::write(&dest, b"old").unwrap();
        relocate(&src, &dest, true).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn copy_fallback_leaves_no_temp_files() {
        let td = tempfile::tempdir().unwrap();
        let src = td.path().join("a.mkv");
        let out = td.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(&src, b"payload").unwrap();
        copy_then_remove(&src, &out.join("a.mkv"), false).unwrap();

        assert!(!src.exists());
        let names: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mkv".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn copy_is_undone_when_source_cannot_be_removed() {
        use std::os::unix::fs::PermissionsExt;

        // Permission bits do not bind root.
        if unsafe { libc::geteuid() } == 0 {
            return;
        }

        let td = tempfile::tempdir().unwrap();
        let locked = td.path().join("locked");
        let out = td.path().join("out");
        fs::create_dir(&locked).unwrap();
        fs::create_dir(&out).unwrap();
        let src = locked.join("a.mkv");
        fs::write(&src, b"payload").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let res = copy_then_remove(&src, &out.join("a.mkv"), false);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(res.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
        assert!(src.exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }
}
