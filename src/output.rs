//! CLI output formatting.
//!
//! Progress goes to stdout, problems to stderr. The cultivator reports one
//! line per planted page plus a read summary per directory. Subdirectories
//! report before their parent, since a parent's tiles embed child counts:
//!
//! ```text
//! Read 2 of 2 files from plants
//! 	Planted plants/index.html (freeform)
//! Read 3 of 4 files from .
//! 	Planted index.html (formal)
//! Garden grown at /home/kev/garden
//! ```
//!
//! Unreadable entries are reported and skipped, never fatal:
//!
//! ```text
//! Error reading /garden/plants/rose.png, skipping: unexpected end of file
//! Skipping file: /garden/pipe
//! ```
//!
//! Each message has a `format_*` function (pure, returns the line) for
//! testability and a `print_*` wrapper that writes it out.

use std::fmt::Display;
use std::path::Path;

/// One directory's read summary. `relative` is the directory's path from the
/// garden root, shown as `.` for the root itself.
pub fn format_read_summary(read: usize, total: usize, relative: &str) -> String {
    let shown = if relative.is_empty() { "." } else { relative };
    format!("Read {read} of {total} files from {shown}")
}

/// One planted page, indented under its read summary.
pub fn format_planted(relative: &str, freeform: bool) -> String {
    let page = if relative.is_empty() {
        "index.html".to_string()
    } else {
        format!("{relative}/index.html")
    };
    let mode = if freeform { "freeform" } else { "formal" };
    format!("\tPlanted {page} ({mode})")
}

/// A page that classified fine but failed to write.
pub fn format_plant_error(path: &Path, err: &impl Display) -> String {
    format!("Could not plant {}, skipping: {err}", path.display())
}

/// A file that failed classification (unreadable, or a media probe failed).
pub fn format_entry_error(path: &Path, err: &impl Display) -> String {
    format!("Error reading {}, skipping: {err}", path.display())
}

/// An entry that is neither a regular file nor a directory.
pub fn format_skipped(path: &Path) -> String {
    format!("Skipping file: {}", path.display())
}

/// A subdirectory whose listing could not be read.
pub fn format_unreadable(path: &Path, err: &impl Display) -> String {
    format!("Could not read directory {}, skipping: {err}", path.display())
}

/// Final line of a run.
pub fn format_grown(root: &Path) -> String {
    format!("Garden grown at {}", root.display())
}

pub fn print_read_summary(read: usize, total: usize, relative: &str) {
    println!("{}", format_read_summary(read, total, relative));
}

pub fn print_planted(relative: &str, freeform: bool) {
    println!("{}", format_planted(relative, freeform));
}

pub fn print_plant_error(path: &Path, err: &impl Display) {
    eprintln!("{}", format_plant_error(path, err));
}

pub fn print_entry_error(path: &Path, err: &impl Display) {
    eprintln!("{}", format_entry_error(path, err));
}

pub fn print_skipped(path: &Path) {
    eprintln!("{}", format_skipped(path));
}

pub fn print_unreadable(path: &Path, err: &impl Display) {
    eprintln!("{}", format_unreadable(path, err));
}

pub fn print_grown(root: &Path) {
    println!("{}", format_grown(root));
}

// ============================================================================
// Tests
// ============================================================================
