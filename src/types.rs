//! Shared types for cultivated pages.
//!
//! A page is one directory's `index.html`. The cultivator classifies each
//! surviving entry into an [`EntryRecord`] and hands the assembled
//! [`PageData`] to the renderer. Records are plain data so classification can
//! run in parallel and rendering stays pure.

use crate::contrast::TextColor;

/// Icon coordinates recorded by Finder, in window-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// What a directory entry turned out to be after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    /// Subdirectory, linked with a child-count summary ("3 items").
    Directory { summary: String },
    /// Raster or vector image with probed dimensions, orientation applied.
    Image { width: u32, height: u32 },
    /// MP4 or WebM video with dimensions read from the container header.
    Video { width: u32, height: u32 },
    /// Audio file, embedded as a player without probing.
    Audio,
    /// Markdown, already rendered to HTML.
    Markdown { html: String },
    /// Extensionless file whose full text is embedded.
    Raw { text: String },
    /// Anything else: linked by name with its size.
    Other,
}

/// One classified directory entry, ready for the templates.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRecord {
    /// Bare filesystem name; icon metadata is looked up under this key.
    pub name: String,
    /// Listing label and link target. Directories carry a trailing slash.
    pub display_name: String,
    pub kind: EntryKind,
    /// Human-readable size, files only.
    pub size_label: Option<String>,
    /// Normalized icon position, set when the whole page lays out freeform.
    pub position: Option<Position>,
}

/// Explicit Finder window background with its computed text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageColors {
    /// Background channels, 0-255.
    pub background: (u8, u8, u8),
    pub text: TextColor,
}

/// Everything the renderer needs for one directory page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData {
    /// Page heading: the relative path with a trailing slash, empty at the
    /// garden root.
    pub title: String,
    /// Entries in listing order (sorted by display name).
    pub entries: Vec<EntryRecord>,
    /// Horizontal centering shift for freeform pages. `Some` is what selects
    /// the freeform template.
    pub center_offset: Option<f64>,
    /// Colors from the directory's icon view settings, when one set a color.
    pub colors: Option<PageColors>,
}
