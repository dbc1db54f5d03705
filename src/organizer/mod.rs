//! The scan → provision → move → sweep pipeline.

mod audit;
mod compare;
mod duplicate;
mod entry;
mod extensions;
mod helpers;
mod provision;
mod relocate;
mod resolve;
mod run;
mod scan;
mod sweep;

pub use audit::{AuditRecord, AuditSink, AuditTrail, CSV_HEADER, CsvAuditSink};
pub use compare::same_contents;
pub use duplicate::{MAX_COPY_INDEX, copy_name, free_copy_path};
pub use entry::{DirectoryEntry, EntryKind, ScanResult};
pub use extensions::ExtensionSet;
pub use helpers::io_hint;
pub use provision::{destination_folder, provision, provision_folder};
pub use resolve::{MoveOutcome, resolve_and_move};
pub use run::{RunSummary, organize};
pub use scan::scan;
pub use sweep::sweep;
