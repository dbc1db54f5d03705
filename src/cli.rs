//! CLI definition and parsing.
//! Flags override values from the XML config file.

use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::ConfigFile;

/// Sort files into one folder per file, named after the file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Sort files into per-file folders (Rust)")]
pub struct Args {
    /// Config file to read (otherwise $FILE_ORGANIZER_CONFIG or the OS default).
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Folder to scan for files.
    #[arg(long, short = 's', value_hint = ValueHint::DirPath)]
    pub source_folder: Option<PathBuf>,

    /// Folder under which per-file folders are created (default: source folder).
    #[arg(long, short = 'd', value_hint = ValueHint::DirPath)]
    pub destination_folder: Option<PathBuf>,

    /// Comma-separated extensions to handle, e.g. ".mkv,.avi".
    #[arg(long, short = 'e', value_name = "LIST")]
    pub extensions: Option<String>,

    /// Scan subfolders too.
    #[arg(long, overrides_with = "no_recursive")]
    pub recursive: bool,

    /// Only scan the top level of the source folder.
    #[arg(long, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// Folder for the log file and CSV report (default: destination folder).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub log_location: Option<PathBuf>,

    /// Log level: DEBUG, INFO, WARNING or ERROR.
    #[arg(long, short = 'l')]
    pub log_level: Option<String>,

    /// Do not write the CSV report.
    #[arg(long)]
    pub no_csv: bool,

    /// File name of the CSV report.
    #[arg(long, value_name = "NAME")]
    pub csv_report_name: Option<String>,

    /// Do not write the log file.
    #[arg(long)]
    pub no_file_log: bool,

    /// Do not log to the terminal.
    #[arg(long)]
    pub no_console_log: bool,

    /// Disable logging entirely.
    #[arg(long = "quiet-log", alias = "no-log", action = ArgAction::SetTrue)]
    pub quiet_log: bool,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location that would be used, then exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Apply CLI overrides to raw config values (in place). Unset flags are no-ops.
    pub fn apply_overrides(&self, file: &mut ConfigFile) {
        let path_str = |p: &PathBuf| p.to_string_lossy().into_owned();

        if let Some(p) = &self.source_folder {
            file.source_folder = Some(path_str(p));
        }
        if let Some(p) = &self.destination_folder {
            file.destination_folder = Some(path_str(p));
        }
        if let Some(list) = &self.extensions {
            file.source_files_ext = Some(list.clone());
        }
        if self.recursive {
            file.recursive = Some(true);
        }
        if self.no_recursive {
            file.recursive = Some(false);
        }
        if let Some(p) = &self.log_location {
            file.log_location = Some(path_str(p));
        }
        if let Some(level) = &self.log_level {
            file.log_level = Some(level.clone());
        }
        if self.no_csv {
            file.generate_csv = Some(false);
        }
        if let Some(name) = &self.csv_report_name {
            file.csv_report_name = Some(name.clone());
        }
        if self.no_file_log {
            file.enable_file_log = Some(false);
        }
        if self.no_console_log {
            file.enable_console_log = Some(false);
        }
        if self.quiet_log {
            file.enable_log = Some(false);
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
