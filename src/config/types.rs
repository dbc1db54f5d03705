//! Core configuration types.
//! - Config is the immutable, fully resolved settings for one run.
//! - LogLevel is the severity threshold accepted in config files and on the CLI.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::xml::ConfigFile;
use super::{DEFAULT_CSV_REPORT_NAME, DEFAULT_EXTENSIONS, LOG_FILE_NAME};
use crate::errors::OrganizerError;
use crate::organizer::ExtensionSet;

/// Severity threshold for emitted log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Parse a level name (case-insensitive). `WARN` is accepted for WARNING.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARNING" | "WARN" => Some(LogLevel::Warning),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = OrganizerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| OrganizerError::InvalidLogLevel(s.to_string()))
    }
}

/// Runtime configuration for one organizing run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root scanned for matching files
    pub source_folder: PathBuf,
    /// Root under which per-file folders are created
    pub destination_folder: PathBuf,
    /// Allow-list of extensions
    pub extensions: ExtensionSet,
    /// Descend into subfolders
    pub recursive: bool,
    /// Directory holding the log file and the CSV report
    pub log_location: PathBuf,
    pub enable_log: bool,
    pub enable_file_log: bool,
    pub enable_console_log: bool,
    pub log_level: LogLevel,
    /// Write the CSV audit report
    pub generate_csv: bool,
    pub csv_report_name: String,
}

impl Config {
    /// Construct a Config with explicit roots; everything else uses defaults.
    /// The log location follows the destination, as it does when left unset in a file.
    pub fn new(source_folder: impl Into<PathBuf>, destination_folder: impl Into<PathBuf>) -> Self {
        let destination_folder = destination_folder.into();
        Self {
            source_folder: source_folder.into(),
            log_location: destination_folder.clone(),
            destination_folder,
            extensions: ExtensionSet::new(DEFAULT_EXTENSIONS.iter().copied()),
            recursive: true,
            enable_log: true,
            enable_file_log: true,
            enable_console_log: true,
            log_level: LogLevel::default(),
            generate_csv: true,
            csv_report_name: DEFAULT_CSV_REPORT_NAME.to_string(),
        }
    }

    /// Resolve raw file/CLI values into a Config.
    ///
    /// Fails when the source folder is missing or blank, when the log level is
    /// not recognized, or when the extension list ends up empty.
    pub fn from_file(file: ConfigFile) -> Result<Self, OrganizerError> {
        let source_folder = non_blank(file.source_folder)
            .map(PathBuf::from)
            .ok_or(OrganizerError::MissingSourceFolder)?;
        let destination_folder = non_blank(file.destination_folder)
            .map(PathBuf::from)
            .unwrap_or_else(|| source_folder.clone());
        let log_location = non_blank(file.log_location)
            .map(PathBuf::from)
            .unwrap_or_else(|| destination_folder.clone());

        let log_level = match non_blank(file.log_level) {
            Some(s) => s.parse::<LogLevel>()?,
            None => LogLevel::default(),
        };

        let extensions = match file.source_files_ext.as_deref() {
            Some(list) => ExtensionSet::from_list(list),
            None => ExtensionSet::new(DEFAULT_EXTENSIONS.iter().copied()),
        };
        if extensions.is_empty() {
            return Err(OrganizerError::NoExtensions);
        }

        Ok(Self {
            source_folder,
            destination_folder,
            extensions,
            recursive: file.recursive.unwrap_or(true),
            log_location,
            enable_log: file.enable_log.unwrap_or(true),
            enable_file_log: file.enable_file_log.unwrap_or(true),
            enable_console_log: file.enable_console_log.unwrap_or(true),
            log_level,
            generate_csv: file.generate_csv.unwrap_or(true),
            csv_report_name: non_blank(file.csv_report_name)
                .unwrap_or_else(|| DEFAULT_CSV_REPORT_NAME.to_string()),
        })
    }

    /// Full path of the CSV audit report.
    pub fn csv_report_path(&self) -> PathBuf {
        self.log_location.join(&self.csv_report_name)
    }

    /// Full path of the log file.
    pub fn log_file_path(&self) -> PathBuf {
        self.log_location.join(LOG_FILE_NAME)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with_source(src: &str) -> ConfigFile {
        ConfigFile {
            source_folder: Some(src.into()),
            ..Default::default()
        }
    }

    #[test]
    fn destination_and_log_location_default_down_the_chain() {
        let cfg = Config::from_file(file_with_source("/data/in")).unwrap();
        assert_eq!(cfg.destination_folder, PathBuf::from("/data/in"));
        assert_eq!(cfg.log_location, PathBuf::from("/data/in"));

        let mut file = file_with_source("/data/in");
        file.destination_folder = Some("/data/out".into());
        let cfg = Config::from_file(file).unwrap();
        assert_eq!(cfg.log_location, PathBuf::from("/data/out"));
    }

    #[test]
    fn blank_source_is_rejected() {
        let err = Config::from_file(file_with_source("   ")).unwrap_err();
        assert!(matches!(err, OrganizerError::MissingSourceFolder));
        let err = Config::from_file(ConfigFile::default()).unwrap_err();
        assert!(matches!(err, OrganizerError::MissingSourceFolder));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut file = file_with_source("/in");
        file.log_level = Some("LOUD".into());
        let err = Config::from_file(file).unwrap_err();
        assert!(matches!(err, OrganizerError::InvalidLogLevel(ref s) if s == "LOUD"));
    }

    #[test]
    fn empty_extension_list_is_rejected() {
        let mut file = file_with_source("/in");
        file.source_files_ext = Some(" , ".into());
        assert!(matches!(
            Config::from_file(file).unwrap_err(),
            OrganizerError::NoExtensions
        ));
    }

    #[test]
    fn defaults_are_applied() {
        let cfg = Config::from_file(file_with_source("/in")).unwrap();
        assert!(cfg.recursive);
        assert!(cfg.generate_csv);
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert!(cfg.extensions.contains_ext("MKV"));
        assert_eq!(cfg.csv_report_path(), PathBuf::from("/in").join(DEFAULT_CSV_REPORT_NAME));
    }
}
