//! Config validation logic.
//! Checks the source root before anything is touched, then prepares output directories.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use super::types::Config;
use crate::errors::OrganizerError;

impl Config {
    /// Verify the source root exists, is a directory, and can be listed.
    /// Performs no filesystem mutation.
    pub fn validate(&self) -> Result<(), OrganizerError> {
        let src = &self.source_folder;
        let scan_err = |source: io::Error| OrganizerError::Scan {
            path: src.clone(),
            source,
        };

        let meta = fs::metadata(src).map_err(scan_err)?;
        if !meta.is_dir() {
            return Err(scan_err(io::Error::new(
                io::ErrorKind::NotADirectory,
                "source_folder is not a directory",
            )));
        }
        fs::read_dir(src).map_err(scan_err)?;
        debug!(path = %src.display(), "source_folder readable");
        Ok(())
    }

    /// Create the destination root and the log location when missing.
    pub fn prepare_directories(&self) -> Result<()> {
        ensure_dir(&self.destination_folder, "destination_folder")?;
        if self.generate_csv || (self.enable_log && self.enable_file_log) {
            ensure_dir(&self.log_location, "log_location")?;
        }
        Ok(())
    }
}

fn ensure_dir(path: &Path, name: &str) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {name} directory '{}'", path.display()))?;
    info!("Created {name} directory: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_a_scan_error() {
        let td = tempfile::tempdir().unwrap();
        let cfg = Config::new(td.path().join("absent"), td.path());
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, OrganizerError::Scan { .. }));
    }

    #[test]
    fn file_as_source_is_a_scan_error() {
        let td = tempfile::tempdir().unwrap();
        let file = td.path().join("f.mkv");
        fs::write(&file, b"x").unwrap();
        let cfg = Config::new(&file, td.path());
        assert!(matches!(cfg.validate().unwrap_err(), OrganizerError::Scan { .. }));
    }

    #[test]
    fn prepare_creates_destination_and_log_dirs() {
        let td = tempfile::tempdir().unwrap();
        let mut cfg = Config::new(td.path(), td.path().join("out"));
        cfg.log_location = td.path().join("logs");
        cfg.prepare_directories().unwrap();
        assert!(td.path().join("out").is_dir());
        assert!(td.path().join("logs").is_dir());
    }
}
