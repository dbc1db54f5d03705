//! One organizing run: scan, provision, move, sweep. Strictly sequential.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::audit::{AuditRecord, AuditTrail};
use super::provision::provision;
use super::resolve::{MoveOutcome, resolve_and_move};
use super::scan::scan;
use super::sweep::sweep;
use crate::config::Config;
use crate::errors::OrganizerError;
use crate::shutdown;

/// Counters for a finished (or interrupted) run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub discovered: usize,
    pub moved: usize,
    pub replaced: usize,
    pub copied: usize,
    pub already_in_place: usize,
    pub failed: usize,
    pub deleted_folders: Vec<PathBuf>,
    /// Per-file failures, in processing order.
    pub failures: Vec<(PathBuf, OrganizerError)>,
    pub interrupted: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    fn tally(&mut self, src: PathBuf, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved(_) => self.moved += 1,
            MoveOutcome::MovedReplacingIdentical(_) => self.replaced += 1,
            MoveOutcome::MovedAsCopy(_) => self.copied += 1,
            MoveOutcome::AlreadyInPlace(_) => self.already_in_place += 1,
            MoveOutcome::Failed(e) => {
                self.failed += 1;
                self.failures.push((src, e));
            }
        }
    }
}

/// Run the full pipeline for `cfg`, recording successful moves in `audit`.
///
/// Only a scan failure of the source root aborts the run. Per-file problems
/// are counted in the summary. On interruption the remaining files are left
/// untouched and the sweep is skipped.
pub fn organize(cfg: &Config, audit: &mut AuditTrail) -> Result<RunSummary, OrganizerError> {
    let started = Instant::now();
    let mut summary = RunSummary::default();

    info!(source = %cfg.source_folder.display(), recursive = cfg.recursive, "listing files found in source folder");
    let found = scan(&cfg.source_folder, &cfg.extensions, cfg.recursive)?;
    summary.discovered = found.matched_files.len();

    info!(destination = %cfg.destination_folder.display(), "creating folders in destination folder");
    let folders = provision(&cfg.destination_folder, &found.matched_files);

    info!("moving files from source folder to destination folder");
    for (file, folder) in found.matched_files.iter().zip(folders) {
        if shutdown::is_requested() {
            warn!("interrupt received; stopping before {}", file.path.display());
            summary.interrupted = true;
            break;
        }
        let outcome = match folder {
            Ok(folder) => resolve_and_move(file, &folder),
            Err(e) => MoveOutcome::Failed(e),
        };
        if let Some(dest) = outcome.moved_to() {
            audit.record(&AuditRecord::from_paths(&file.path, dest));
        }
        summary.tally(file.path.clone(), outcome);
    }

    if summary.interrupted {
        warn!("skipping empty-folder cleanup after interrupt");
    } else {
        info!("deleting empty folders in source folder");
        let subfolders: Vec<&PathBuf> = found.subfolders.iter().map(|d| &d.path).collect();
        summary.deleted_folders = sweep(&subfolders);
    }

    summary.elapsed = started.elapsed();
    debug!(audit_records = audit.records_written(), "audit trail closed");
    info!(
        discovered = summary.discovered,
        moved = summary.moved,
        replaced = summary.replaced,
        copied = summary.copied,
        in_place = summary.already_in_place,
        failed = summary.failed,
        deleted_folders = summary.deleted_folders.len(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "run finished"
    );
    Ok(summary)
}
