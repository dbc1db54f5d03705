//! Cooperative interruption.
//! The Ctrl-C handler raises a one-way flag; the move loop checks it between files.

use std::sync::atomic::{AtomicBool, Ordering};

static STOP: AtomicBool = AtomicBool::new(false);

/// Ask the current run to stop before its next file. Safe from a signal handler.
#[inline]
pub fn request() {
    STOP.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    STOP.load(Ordering::Relaxed)
}
