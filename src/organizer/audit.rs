//! Audit trail of successful moves.
//!
//! `AuditSink` is the narrow seam the pipeline writes to; `CsvAuditSink` is the
//! file-backed implementation. `AuditTrail` owns an optional sink and drops it
//! after the first failure so a broken report never stops a run.

use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::errors::OrganizerError;

/// First line of every CSV report.
pub const CSV_HEADER: &str = "Source Folder, Source File, Destination Folder, Destination File";

/// One successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub source_folder: PathBuf,
    pub source_file: OsString,
    pub dest_folder: PathBuf,
    pub dest_file: OsString,
}

impl AuditRecord {
    /// Build a record from the original file path and its final path.
    pub fn from_paths(src: &Path, dest: &Path) -> Self {
        let split = |p: &Path| {
            (
                p.parent().map(Path::to_path_buf).unwrap_or_default(),
                p.file_name().map(|n| n.to_os_string()).unwrap_or_default(),
            )
        };
        let (source_folder, source_file) = split(src);
        let (dest_folder, dest_file) = split(dest);
        Self {
            source_folder,
            source_file,
            dest_folder,
            dest_file,
        }
    }

    fn fields(&self) -> [String; 4] {
        [
            self.source_folder.display().to_string(),
            self.source_file.to_string_lossy().into_owned(),
            self.dest_folder.display().to_string(),
            self.dest_file.to_string_lossy().into_owned(),
        ]
    }
}

/// Append-only receiver of audit records.
pub trait AuditSink {
    fn record(&mut self, record: &AuditRecord) -> Result<(), OrganizerError>;
}

/// CSV report: truncated on creation, header first, one flushed line per record.
pub struct CsvAuditSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvAuditSink {
    pub fn create(path: &Path) -> Result<Self, OrganizerError> {
        let fail = |reason: String| OrganizerError::Audit {
            path: path.to_path_buf(),
            reason,
        };
        let mut file = File::create(path).map_err(|e| fail(format!("create failed: {e}")))?;
        // Header is written raw: its fields carry leading spaces that must stay as-is.
        writeln!(file, "{CSV_HEADER}").map_err(|e| fail(format!("write header failed: {e}")))?;

        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        debug!(path = %path.display(), "created csv report");
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for CsvAuditSink {
    fn record(&mut self, record: &AuditRecord) -> Result<(), OrganizerError> {
        let fail = |reason: String| OrganizerError::Audit {
            path: self.path.clone(),
            reason,
        };
        self.writer
            .write_record(record.fields())
            .map_err(|e| fail(e.to_string()))?;
        self.writer.flush().map_err(|e| fail(e.to_string()))
    }
}

/// Optional sink plus the degrade-on-error policy.
#[derive(Default)]
pub struct AuditTrail {
    sink: Option<Box<dyn AuditSink>>,
    written: usize,
}

impl AuditTrail {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new(sink: Box<dyn AuditSink>) -> Self {
        Self {
            sink: Some(sink),
            written: 0,
        }
    }

    /// Open the CSV report at `path`; on failure the trail starts disabled.
    pub fn open_csv(path: &Path) -> Self {
        match CsvAuditSink::create(path) {
            Ok(sink) => Self::new(Box::new(sink)),
            Err(e) => {
                error!(code = e.code(), kind = e.kind(), error = %e, "csv report unavailable; continuing without it");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn records_written(&self) -> usize {
        self.written
    }

    /// Forward a record. The first sink error disables the trail for the rest of the run.
    pub fn record(&mut self, record: &AuditRecord) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        match sink.record(record) {
            Ok(()) => self.written += 1,
            Err(e) => {
                error!(code = e.code(), kind = e.kind(), error = %e, "audit write failed; disabling csv report");
                self.sink = None;
            }
        }
    }
}
