//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{ConfigFile, create_template_config, load_config_file};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILE_ORGANIZER_CONFIG";
/// Extensions handled when the config does not list any.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".avi", ".mpg", ".mkv"];
pub const DEFAULT_CSV_REPORT_NAME: &str = "file_organizer_report.csv";
/// Name of the log file written under `log_location`.
pub const LOG_FILE_NAME: &str = "file_organizer.log";
