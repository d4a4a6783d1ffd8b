//! File and directory classification.
//!
//! Decides how each entry is shown on a page. The file's extension picks the
//! branch; media files are additionally probed so the page can carry real
//! dimensions:
//!
//! | Entry                         | Kind                                  |
//! |-------------------------------|---------------------------------------|
//! | jpeg/jpg/png/webp/gif/apng/svg/bmp/ico | `Image` with probed dimensions |
//! | mp4/webm                      | `Video` with probed dimensions        |
//! | mp3/wav/ogg/m4a               | `Audio`                               |
//! | md                            | `Markdown`, rendered to HTML          |
//! | no extension (except LICENSE) | `Raw`, full text inlined              |
//! | anything else                 | `Other`, plain link                   |
//! | subdirectory                  | `Directory` with an item-count summary |

use crate::probe::{self, ProbeError};
use crate::types::{EntryKind, EntryRecord};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::io;
use std::path::Path;
use thiserror::Error;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpeg", "jpg", "png", "webp", "gif", "apng", "svg", "bmp", "ico",
];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];

/// Errors raised while classifying a single file.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),
}

/// Classify one regular file into a page entry.
///
/// `size` is the file's byte length as reported by its metadata. Media
/// probes and text reads hit the disk here; a failure bubbles up so the
/// caller can drop the entry and report it.
pub fn classify_file(name: &str, path: &Path, size: u64) -> Result<EntryRecord, ClassifyError> {
    let kind = classify_kind(name, path)?;
    Ok(EntryRecord {
        name: name.to_string(),
        display_name: name.to_string(),
        kind,
        size_label: Some(size_label(size)),
        position: None,
    })
}

/// Classify a subdirectory. `child_count` is how many entries its own page
/// ended up with, shown as the tile's summary line.
pub fn classify_directory(name: &str, child_count: usize) -> EntryRecord {
    EntryRecord {
        name: name.to_string(),
        display_name: format!("{name}/"),
        kind: EntryKind::Directory {
            summary: child_summary(child_count),
        },
        size_label: None,
        position: None,
    }
}

fn classify_kind(name: &str, path: &Path) -> Result<EntryKind, ClassifyError> {
    let ext = extension(name);
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        let info = probe::probe_image(path)?;
        // EXIF orientations 6 and 8 are 90° rotations; the rendered box is
        // the transposed one.
        let (width, height) = if matches!(info.orientation, Some(6) | Some(8)) {
            (info.height, info.width)
        } else {
            (info.width, info.height)
        };
        return Ok(EntryKind::Image { width, height });
    }
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        let dims = probe::probe_video(path)?;
        return Ok(EntryKind::Video {
            width: dims.width,
            height: dims.height,
        });
    }
    if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(EntryKind::Audio);
    }
    match ext.as_str() {
        "md" => {
            let text = std::fs::read_to_string(path)?;
            Ok(EntryKind::Markdown {
                html: render_markdown(&text),
            })
        }
        // Extensionless files read as prose, except the one everyone has.
        "" if name != "LICENSE" => {
            let text = std::fs::read_to_string(path)?;
            Ok(EntryKind::Raw { text })
        }
        _ => Ok(EntryKind::Other),
    }
}

/// Lowercased text after the last dot, or `""` for dotless names. A name
/// ending in a dot also yields `""`.
fn extension(name: &str) -> String {
    if name.contains('.') {
        name.rsplit('.').next().unwrap_or("").to_lowercase()
    } else {
        String::new()
    }
}

fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(text, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

fn child_summary(count: usize) -> String {
    match count {
        0 => "empty".to_string(),
        1 => "1 item".to_string(),
        n => format!("{n} items"),
    }
}

/// Human-readable byte count with decimal units: `999B`, `1.23kB`, `45MB`.
///
/// Values divide by 1000, keep at most three significant digits, and drop
/// trailing zeros after the point.
pub fn size_label(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "kB", "MB", "GB", "TB", "PB"];
    if bytes < 1000 {
        return format!("{bytes}B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    let mut figure = if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    };
    if figure.contains('.') {
        figure = figure.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{figure}{}", UNITS[unit])
}

// ============================================================================
// Tests
// ============================================================================
