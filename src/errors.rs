//! Typed error definitions for file_organizer.
//! Each variant maps to one failure class of a run so logs and tests can match on it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error("source_folder must be configured")]
    MissingSourceFolder,

    #[error("invalid log_level '{0}'; expected one of DEBUG, INFO, WARNING, ERROR")]
    InvalidLogLevel(String),

    #[error("source_files_ext must list at least one extension")]
    NoExtensions,

    #[error("config file {path}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    #[error("cannot scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create destination folder {path}: {source}")]
    Provision {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("destination {0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("source file vanished before it could be moved: {0}")]
    SourceVanished(PathBuf),

    #[error("permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("move {src} -> {dest} failed: {source}")]
    Move {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no free copy name left for {0}")]
    CopyNameExhausted(PathBuf),

    #[error("cannot compare {src} with {dest}: {source}")]
    Compare {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("audit report {path}: {reason}")]
    Audit { path: PathBuf, reason: String },

    #[error("operation interrupted by user")]
    Interrupted,
}

impl OrganizerError {
    /// Stable numeric code, emitted as a log field.
    pub fn code(&self) -> u16 {
        match self {
            OrganizerError::MissingSourceFolder => 10,
            OrganizerError::InvalidLogLevel(_) => 11,
            OrganizerError::NoExtensions => 12,
            OrganizerError::ConfigFile { .. } => 13,
            OrganizerError::Scan { .. } => 20,
            OrganizerError::Provision { .. } => 30,
            OrganizerError::NotADirectory(_) => 31,
            OrganizerError::SourceVanished(_) => 40,
            OrganizerError::PermissionDenied { .. } => 41,
            OrganizerError::Move { .. } => 42,
            OrganizerError::CopyNameExhausted(_) => 43,
            OrganizerError::Compare { .. } => 44,
            OrganizerError::Audit { .. } => 50,
            OrganizerError::Interrupted => 60,
        }
    }

    /// Short machine-friendly tag, emitted as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            OrganizerError::MissingSourceFolder => "missing_source_folder",
            OrganizerError::InvalidLogLevel(_) => "invalid_log_level",
            OrganizerError::NoExtensions => "no_extensions",
            OrganizerError::ConfigFile { .. } => "config_file",
            OrganizerError::Scan { .. } => "scan",
            OrganizerError::Provision { .. } => "provision",
            OrganizerError::NotADirectory(_) => "not_a_directory",
            OrganizerError::SourceVanished(_) => "source_vanished",
            OrganizerError::PermissionDenied { .. } => "permission_denied",
            OrganizerError::Move { .. } => "move",
            OrganizerError::CopyNameExhausted(_) => "copy_name_exhausted",
            OrganizerError::Compare { .. } => "compare",
            OrganizerError::Audit { .. } => "audit",
            OrganizerError::Interrupted => "interrupted",
        }
    }

    /// True for failures that must stop the run before anything is mutated.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            OrganizerError::MissingSourceFolder
                | OrganizerError::InvalidLogLevel(_)
                | OrganizerError::NoExtensions
                | OrganizerError::ConfigFile { .. }
        )
    }
}
