//! Directory cultivation.
//!
//! The recursive walk that grows a garden. Each directory becomes one page:
//!
//! 1. **List** the directory. The raw entry total feeds the read summary.
//! 2. **Read icon metadata**: a local `.DS_Store`, when present, supplies
//!    per-entry positions; the view settings for this directory came from the
//!    *parent's* store (the root's from the grandparent).
//! 3. **Split and filter**: own artifacts are dropped, ignore patterns are
//!    applied (directories match both `name` and `name/`), entries that are
//!    neither file nor directory are reported and skipped.
//! 4. **Recurse** into each surviving subdirectory; its entry count becomes
//!    the tile summary. Unreadable subdirectories degrade to an empty tile.
//! 5. **Classify** surviving files in parallel; per-file failures drop that
//!    entry only.
//! 6. **Sort** entries by display name, so output is stable across
//!    filesystems.
//! 7. **Lay out**: when the view settings keep hand placement and every entry
//!    has a recorded position, normalize positions for the freeform template;
//!    otherwise the page is formal. Freeform is all or nothing.
//! 8. **Plant**: write `index.html` if at least one entry survived. Write
//!    failures lose that page only.
//!
//! The walk's only fatal error is an unusable root; everything below it
//! degrades per entry, per directory, or per page.

use crate::classify;
use crate::config::{self, ConfigError};
use crate::contrast;
use crate::dsstore::{self, Background, DirectoryIcons, IconViewProperties};
use crate::ignore::IgnoreFilter;
use crate::layout;
use crate::output;
use crate::render;
use crate::types::{EntryRecord, PageColors, PageData, Position};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Files the cultivator itself produces or consumes. They never become
/// entries; Finder records no icon position for `index.html` either, so
/// listing them would also veto every freeform page.
const OWN_ARTIFACTS: &[&str] = &[".DS_Store", "index.html", "garden.toml", ".gardenignore"];

#[derive(Error, Debug)]
pub enum CultivateError {
    #[error("invalid directory {}", .0.display())]
    InvalidRoot(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// State owned by one recursive call.
struct DirContext {
    dir: PathBuf,
    /// Path from the garden root, `""` at the root itself.
    relative: String,
    /// This directory's icon view settings, read from the parent's store.
    icvp: Option<IconViewProperties>,
    /// Remaining recursion budget. Negative means do nothing.
    depth: i64,
}

/// Grow a garden rooted at `dir`.
///
/// Loads `garden.toml` and the ignore files from the root, then cultivates
/// the whole tree. `depth_override` (the CLI flag) wins over the configured
/// `max_depth`. Returns the number of entries on the root page.
pub fn cultivate(dir: &Path, depth_override: Option<i64>) -> Result<usize, CultivateError> {
    let root = dir
        .canonicalize()
        .map_err(|_| CultivateError::InvalidRoot(dir.to_path_buf()))?;
    if !root.is_dir() {
        return Err(CultivateError::InvalidRoot(dir.to_path_buf()));
    }

    let config = config::load_config(&root)?;
    let depth = depth_override.unwrap_or(config.max_depth);
    let filter = IgnoreFilter::load(&root, &config.repo_ignore_file, &config.garden_ignore_file);

    let context = DirContext {
        dir: root.clone(),
        relative: String::new(),
        icvp: root_view_hint(&root),
        depth,
    };
    let count = cultivate_dir(&context, &filter)?;
    output::print_grown(&root);
    Ok(count)
}

/// The root directory's own view settings live one level up, in its parent's
/// store. Any failure along the way just means no settings.
fn root_view_hint(root: &Path) -> Option<IconViewProperties> {
    let parent = root.parent()?;
    let name = root.file_name()?.to_str()?;
    let icons = dsstore::read_store(&parent.join(".DS_Store"))?;
    icons.get(name)?.icvp
}

fn cultivate_dir(context: &DirContext, filter: &IgnoreFilter) -> Result<usize, CultivateError> {
    if context.depth < 0 {
        return Ok(0);
    }

    let mut listing: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(&context.dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        listing.push((name, entry.path()));
    }
    let total = listing.len();

    let has_store = listing.iter().any(|(name, _)| name == ".DS_Store");
    let icons = if has_store {
        dsstore::read_store(&context.dir.join(".DS_Store"))
    } else {
        None
    };
    // A store that exists but fails to parse vetoes freeform; positions from
    // it would be guesses.
    let store_broken = has_store && icons.is_none();
    let icons: DirectoryIcons = icons.unwrap_or_default();

    let freeform_requested =
        context.icvp.is_some_and(|view| view.allows_freeform()) && !store_broken;
    let colors = context.icvp.and_then(|view| match view.background {
        Background::Color { r, g, b } => Some(PageColors {
            background: (r, g, b),
            text: contrast::pick_text_color(r, g, b),
        }),
        _ => None,
    });

    let mut subdirs: Vec<(String, PathBuf)> = Vec::new();
    let mut files: Vec<(String, PathBuf, u64)> = Vec::new();
    for (name, path) in listing {
        if OWN_ARTIFACTS.contains(&name.as_str()) {
            continue;
        }
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                output::print_entry_error(&path, &err);
                continue;
            }
        };
        if metadata.is_dir() {
            if !filter.is_ignored(&name, true) {
                subdirs.push((name, path));
            }
        } else if metadata.is_file() {
            if !filter.is_ignored(&name, false) {
                files.push((name, path, metadata.len()));
            }
        } else {
            output::print_skipped(&path);
        }
    }

    let mut entries: Vec<EntryRecord> = Vec::with_capacity(subdirs.len() + files.len());

    // Children first: their entry counts become the directory tiles.
    for (name, path) in &subdirs {
        let child = DirContext {
            dir: path.clone(),
            relative: if context.relative.is_empty() {
                name.clone()
            } else {
                format!("{}/{name}", context.relative)
            },
            icvp: icons.get(name.as_str()).and_then(|record| record.icvp),
            depth: context.depth - 1,
        };
        let child_count = match cultivate_dir(&child, filter) {
            Ok(count) => count,
            Err(err) => {
                output::print_unreadable(path, &err);
                0
            }
        };
        entries.push(classify::classify_directory(name, child_count));
    }

    let mut classified: Vec<EntryRecord> = files
        .par_iter()
        .filter_map(
            |(name, path, size)| match classify::classify_file(name, path, *size) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    output::print_entry_error(path, &err);
                    None
                }
            },
        )
        .collect();
    entries.append(&mut classified);

    entries.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    let layout = if freeform_requested {
        let recorded: Vec<Option<Position>> = entries
            .iter()
            .map(|entry| icons.get(entry.name.as_str()).and_then(|record| record.iloc))
            .collect();
        layout::normalize(&recorded)
    } else {
        None
    };
    let freeform = layout.is_some();
    if let Some(layout) = &layout {
        for (entry, position) in entries.iter_mut().zip(&layout.positions) {
            entry.position = Some(*position);
        }
    }

    let count = entries.len();
    if count > 0 {
        output::print_read_summary(count, total, &context.relative);
        let page = PageData {
            title: if context.relative.is_empty() {
                String::new()
            } else {
                format!("{}/", context.relative)
            },
            entries,
            center_offset: layout.map(|layout| layout.center_offset),
            colors,
        };
        let html = render::garden_page(&page).into_string();
        let target = context.dir.join("index.html");
        match fs::write(&target, html) {
            Ok(()) => output::print_planted(&context.relative, freeform),
            Err(err) => output::print_plant_error(&target, &err),
        }
    }
    Ok(count)
}

// ============================================================================
// Tests
// ============================================================================
