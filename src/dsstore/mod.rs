//! Icon metadata from macOS `.DS_Store` files.
//!
//! Finder records, per directory, where each icon sits in the window (`Iloc`)
//! and how subdirectory windows are configured (`icvp`: arrangement and
//! background). The cultivator reads both to decide whether a page can lay
//! out freeform and what colors it carries.
//!
//! The whole surface is [`read_store`], which returns `None` for every
//! failure mode: absent file, foreign format, truncated structures, malformed
//! view plists. Callers treat all of them as "no icon metadata". Parsing is
//! pure Rust with no external dependencies; `parser` covers the buddy
//! allocator layout and `plist` the embedded property lists.

mod parser;
pub(crate) mod plist;

use crate::types::Position;
use std::collections::HashMap;
use std::path::Path;

/// Per-entry icon metadata recorded by the parent directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconRecord {
    /// Icon view settings for a subdirectory's own window.
    pub icvp: Option<IconViewProperties>,
    /// Icon position within this directory's window.
    pub iloc: Option<Position>,
}

/// Finder icon view settings that affect rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconViewProperties {
    pub arrange_by: ArrangeBy,
    pub background: Background,
}

impl IconViewProperties {
    /// Freeform layout holds only when icons keep their hand placement:
    /// loose or grid-snapped, never sorted.
    pub fn allows_freeform(&self) -> bool {
        matches!(self.arrange_by, ArrangeBy::None | ArrangeBy::Grid)
    }
}

/// Finder `arrangeBy` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrangeBy {
    /// Icons stay exactly where the user dropped them.
    None,
    /// Icons snap to the grid but keep their placement.
    Grid,
    /// Sorted views (by name, kind, date and so on); positions are synthetic.
    Other,
}

impl ArrangeBy {
    pub(crate) fn from_name(name: &str) -> ArrangeBy {
        match name {
            "none" => ArrangeBy::None,
            "grid" => ArrangeBy::Grid,
            _ => ArrangeBy::Other,
        }
    }
}

/// Window background recorded in the view settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Default,
    /// Explicit color, channels scaled to 0-255.
    Color { r: u8, g: u8, b: u8 },
    /// Background picture; the alias payload is not resolved.
    Image,
}

/// All icon records of one directory, keyed by child entry name.
pub type DirectoryIcons = HashMap<String, IconRecord>;

/// Read and parse a directory's `.DS_Store`.
///
/// `None` when the file is absent or malformed in any way.
pub fn read_store(path: &Path) -> Option<DirectoryIcons> {
    let bytes = std::fs::read(path).ok()?;
    parser::parse(&bytes)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{DsStoreBuilder, icvp_blob};
    use tempfile::TempDir;

    #[test]
    fn read_store_absent_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_store(&dir.path().join(".DS_Store")), None);
    }

    #[test]
    fn read_store_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".DS_Store");
        let data = DsStoreBuilder::new()
            .iloc("a.txt", 33, 44)
            .icvp("sub", icvp_blob("none", None))
            .build();
        std::fs::write(&path, data).unwrap();

        let icons = read_store(&path).unwrap();
        assert_eq!(icons["a.txt"].iloc, Some(Position { x: 33, y: 44 }));
        assert!(icons["sub"].icvp.as_ref().unwrap().allows_freeform());
    }

    #[test]
    fn read_store_garbage_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".DS_Store");
        std::fs::write(&path, b"not a ds_store at all").unwrap();
        assert_eq!(read_store(&path), None);
    }

    #[test]
    fn arrange_by_names() {
        assert_eq!(ArrangeBy::from_name("none"), ArrangeBy::None);
        assert_eq!(ArrangeBy::from_name("grid"), ArrangeBy::Grid);
        assert_eq!(ArrangeBy::from_name("name"), ArrangeBy::Other);
        assert_eq!(ArrangeBy::from_name("dateModified"), ArrangeBy::Other);
    }

    #[test]
    fn freeform_allowed_for_loose_and_grid() {
        let loose = IconViewProperties {
            arrange_by: ArrangeBy::None,
            background: Background::Default,
        };
        let grid = IconViewProperties {
            arrange_by: ArrangeBy::Grid,
            ..loose
        };
        let sorted = IconViewProperties {
            arrange_by: ArrangeBy::Other,
            ..loose
        };
        assert!(loose.allows_freeform());
        assert!(grid.allows_freeform());
        assert!(!sorted.allows_freeform());
    }
}
