//! Ignore pattern filtering.
//!
//! Two pattern files at the garden root apply to every directory in the walk:
//! the repo ignore file (shared with other tooling, `.gitignore` by default)
//! and the garden's own ignore file. Lines are glob patterns matched against
//! bare entry names; blank lines and `#` comments are skipped. Directories
//! are tested both as `name` and `name/`, so either spelling of a directory
//! pattern works.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::Path;

/// Patterns used when the garden ignore file does not exist.
pub const DEFAULT_GARDEN_PATTERNS: &[&str] = &[".git"];

/// Compiled ignore patterns for one garden.
#[derive(Debug)]
pub struct IgnoreFilter {
    repo: GlobSet,
    garden: GlobSet,
}

impl IgnoreFilter {
    /// Load both pattern files from the garden root.
    ///
    /// A missing repo ignore file contributes nothing; a missing garden
    /// ignore file falls back to [`DEFAULT_GARDEN_PATTERNS`].
    pub fn load(root: &Path, repo_file: &str, garden_file: &str) -> IgnoreFilter {
        let repo = match fs::read_to_string(root.join(repo_file)) {
            Ok(text) => compile(&parse_patterns(&text)),
            Err(_) => GlobSet::empty(),
        };
        let garden = match fs::read_to_string(root.join(garden_file)) {
            Ok(text) => compile(&parse_patterns(&text)),
            Err(_) => compile(DEFAULT_GARDEN_PATTERNS),
        };
        IgnoreFilter { repo, garden }
    }

    /// Build a filter from literal pattern lists.
    pub fn from_patterns(repo: &[&str], garden: &[&str]) -> IgnoreFilter {
        IgnoreFilter {
            repo: compile(repo),
            garden: compile(garden),
        }
    }

    /// Whether an entry name is excluded from the garden.
    pub fn is_ignored(&self, name: &str, is_directory: bool) -> bool {
        if self.matches(name) {
            return true;
        }
        is_directory && self.matches(&format!("{name}/"))
    }

    fn matches(&self, candidate: &str) -> bool {
        self.repo.is_match(candidate) || self.garden.is_match(candidate)
    }
}

/// Split an ignore file into patterns, dropping blanks and comments.
fn parse_patterns(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Compile patterns into a set. Unparseable patterns are dropped so one bad
/// line cannot disable the whole file.
fn compile(patterns: &[&str]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

// ============================================================================
// Tests
// ============================================================================
