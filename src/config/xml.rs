//! XML configuration support.
//! - Loads raw settings from config.xml (quick_xml + serde).
//! - Creates a commented template at the default location when none exists.
//!
//! Notes:
//! - This module only reads/writes the config file; defaults and checks live in
//!   `types` (resolution) and `validate` (filesystem).
//! - Unknown XML elements are a hard error so typos surface before a run.

use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{config_path_from_env, default_config_path, path_has_symlink_ancestor};
use super::{DEFAULT_CSV_REPORT_NAME, DEFAULT_EXTENSIONS};
use crate::errors::OrganizerError;

/// Raw settings as written in the file; every field is optional.
/// CLI overrides are applied to this before it is resolved into a `Config`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub source_folder: Option<String>,
    pub destination_folder: Option<String>,
    /// Comma-separated, e.g. ".avi, .mpg, .mkv"
    pub source_files_ext: Option<String>,
    pub recursive: Option<bool>,
    pub log_location: Option<String>,
    pub enable_log: Option<bool>,
    pub enable_file_log: Option<bool>,
    pub enable_console_log: Option<bool>,
    pub log_level: Option<String>,
    pub generate_csv: Option<bool>,
    pub csv_report_name: Option<String>,
}

/// Outcome of locating the config file.
#[derive(Debug)]
pub enum LoadResult {
    /// A file was found and parsed.
    Loaded { file: ConfigFile, path: PathBuf },
    /// No file existed at the default location; a template was written there.
    CreatedTemplate(PathBuf),
    /// No file and no template (e.g. settings come from the CLI only).
    Missing,
}

/// Parse a config file at `path`.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, OrganizerError> {
    let contents = fs::read_to_string(path).map_err(|e| OrganizerError::ConfigFile {
        path: path.to_path_buf(),
        reason: format!("read failed: {e}"),
    })?;
    from_xml_str(&contents).map_err(|e| OrganizerError::ConfigFile {
        path: path.to_path_buf(),
        reason: format!("parse failed: {e}"),
    })
}

/// Locate and load the config file.
///
/// Search order: `explicit` (from `--config`), then `$FILE_ORGANIZER_CONFIG`,
/// then the OS default path. An explicit path that does not exist is an error.
/// When the default file is missing a template is written only if
/// `create_template` is set.
pub fn load_or_init(
    explicit: Option<&Path>,
    create_template: bool,
) -> Result<LoadResult, OrganizerError> {
    if let Some(path) = explicit.map(Path::to_path_buf).or_else(config_path_from_env) {
        if !path.exists() {
            return Err(OrganizerError::ConfigFile {
                path,
                reason: "file does not exist".into(),
            });
        }
        let file = load_config_file(&path)?;
        debug!(path = %path.display(), "loaded config file");
        return Ok(LoadResult::Loaded { file, path });
    }

    let Some(path) = default_config_path() else {
        return Ok(LoadResult::Missing);
    };
    if path.exists() {
        let file = load_config_file(&path)?;
        debug!(path = %path.display(), "loaded default config file");
        return Ok(LoadResult::Loaded { file, path });
    }
    if !create_template {
        return Ok(LoadResult::Missing);
    }
    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

/// Write a commented template config at `path`. Never overwrites an existing file.
pub fn create_template_config(path: &Path) -> Result<(), OrganizerError> {
    let fail = |reason: String| OrganizerError::ConfigFile {
        path: path.to_path_buf(),
        reason,
    };

    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err(fail("refusing to create template: an ancestor is a symlink".into())),
        Err(e) => return Err(fail(format!("cannot inspect ancestors: {e}"))),
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| fail(format!("create parent failed: {e}")))?;
    }

    let content = format!(
        "<!--\n  file_organizer configuration (XML)\n\n    source_folder       -> folder scanned for files (required)\n    destination_folder  -> per-file folders are created here (empty = source_folder)\n    source_files_ext    -> comma-separated extensions, matched case-insensitively\n    recursive           -> also scan subfolders (true/false)\n    log_location        -> folder for the log file and CSV report (empty = destination_folder)\n    enable_log          -> master switch for logging\n    enable_file_log     -> write file_organizer.log under log_location\n    enable_console_log  -> log to the terminal\n    log_level           -> DEBUG | INFO | WARNING | ERROR\n    generate_csv        -> write a CSV report of every move\n    csv_report_name     -> file name of the CSV report\n\n  CLI flags override values in this file.\n-->\n<config>\n  <source_folder></source_folder>\n  <destination_folder></destination_folder>\n  <source_files_ext>{}</source_files_ext>\n  <recursive>true</recursive>\n  <log_location></log_location>\n  <enable_log>true</enable_log>\n  <enable_file_log>true</enable_file_log>\n  <enable_console_log>true</enable_console_log>\n  <log_level>INFO</log_level>\n  <generate_csv>true</generate_csv>\n  <csv_report_name>{}</csv_report_name>\n</config>\n",
        DEFAULT_EXTENSIONS.join(", "),
        DEFAULT_CSV_REPORT_NAME
    );

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut f = options
        .open(path)
        .map_err(|e| fail(format!("create failed: {e}")))?;
    f.write_all(content.as_bytes())
        .and_then(|_| f.sync_all())
        .map_err(|e| fail(format!("write failed: {e}")))?;

    info!("Created template config at {}", path.display());
    Ok(())
}
