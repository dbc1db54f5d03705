use owo_colors::OwoColorize;

use crate::organizer::RunSummary;

/// User-facing terminal messages, separate from the tracing log.
/// Colors are enabled only when stdout is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// One-line run totals, e.g. "4 found, 2 moved, 1 replaced, 1 copied, 0 failed, 1 folders removed in 12ms".
pub fn summary_line(s: &RunSummary) -> String {
    let mut line = format!(
        "{} found, {} moved, {} replaced, {} copied, {} failed, {} folders removed in {}ms",
        s.discovered,
        s.moved,
        s.replaced,
        s.copied,
        s.failed,
        s.deleted_folders.len(),
        s.elapsed.as_millis()
    );
    if s.already_in_place > 0 {
        line.push_str(&format!(" ({} already in place)", s.already_in_place));
    }
    line
}

/// Print the run totals, then one line per failed file.
pub fn print_summary(s: &RunSummary) {
    if s.failed == 0 && !s.interrupted {
        print_success(&summary_line(s));
    } else {
        print_warn(&summary_line(s));
    }
    for (path, err) in &s.failures {
        print_error(&format!("{}: {}", path.display(), err));
    }
}
