//! Core library for `file_organizer`.
//!
//! Scans a source tree for files with allow-listed extensions, gives each file
//! a folder named after it under the destination root, moves it there (resolving
//! name collisions by content), records an optional CSV audit trail, and removes
//! source subfolders left empty.

pub mod cli;
pub mod config;
pub mod errors;
pub mod organizer;
pub mod output;
pub mod shutdown;

pub use config::{Config, ConfigFile, LogLevel, default_config_path, path_has_symlink_ancestor};
pub use errors::OrganizerError;
pub use organizer::{
    AuditRecord, AuditSink, AuditTrail, DirectoryEntry, ExtensionSet, MoveOutcome, RunSummary,
    ScanResult, organize, provision, resolve_and_move, scan, sweep,
};
