use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use file_organizer::{ExtensionSet, scan};
use tempfile::tempdir;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

/// Appends written bytes into a shared in-memory buffer.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(level: &str, f: F) -> String {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer()
        .with_writer(make_writer)
        .with_ansi(false)
        .with_target(false)
        .compact();
    let subscriber = registry().with(EnvFilter::new(level)).with(layer);

    // Scoped so no global subscriber leaks into other tests.
    let dispatch = tracing::Dispatch::new(subscriber);
    tracing::dispatcher::with_default(&dispatch, f);

    let bytes = buf.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn scan_reports_discovered_files_at_info() {
    let td = tempdir().unwrap();
    std::fs::write(td.path().join("clip.mkv"), b"x").unwrap();
    std::fs::write(td.path().join("notes.txt"), b"x").unwrap();

    let set = ExtensionSet::from_list(".mkv");
    let logs = capture("info", || {
        scan(td.path(), &set, true).unwrap();
    });

    assert!(logs.contains("found file"), "logs: {logs}");
    assert!(logs.contains("clip.mkv"));
    assert!(!logs.contains("notes.txt"), "skipped files are debug-only");
}

#[test]
fn warning_level_hides_discovery() {
    let td = tempdir().unwrap();
    std::fs::write(td.path().join("clip.mkv"), b"x").unwrap();

    let set = ExtensionSet::from_list(".mkv");
    let logs = capture("warn", || {
        scan(td.path(), &set, true).unwrap();
    });
    assert!(logs.is_empty(), "logs: {logs}");
}
