//! # Dirgarden
//!
//! A static site generator that grows a browsable "garden" of HTML pages out
//! of a directory tree. The filesystem is the data source: every directory
//! becomes a page, every file inside it a tile, and the `.DS_Store` metadata
//! Finder leaves behind decides whether tiles keep the placement they were
//! given by hand.
//!
//! # Architecture: One Recursive Pass
//!
//! Everything happens in a single depth-first walk; there is no manifest and
//! no intermediate state on disk:
//!
//! ```text
//! cultivate(root)
//!   1. load garden.toml and the ignore files   (once, at the root)
//!   2. per directory, children first:
//!        read .DS_Store -> classify entries -> lay out -> write index.html
//! ```
//!
//! Children run before their parent because a directory tile shows how many
//! entries the child page holds. Within one directory, file classification
//! fans out across a thread pool; probing image headers is the only part of
//! the job that is CPU-bound enough to care.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cultivate`] | The recursive pass: walks directories, assembles pages, writes `index.html` files |
//! | [`classify`] | Maps a file to its tile kind: image, video, audio, markdown, raw text, other |
//! | [`probe`] | Pixel dimensions for images and videos, EXIF orientation for JPEG |
//! | [`dsstore`] | Reads Finder's `.DS_Store`: icon positions and view settings |
//! | [`layout`] | Freeform coordinate normalization and page centering |
//! | [`contrast`] | Readable text color for a configured background |
//! | [`render`] | HTML rendering with Maud |
//! | [`ignore`] | Glob-based entry filtering from ignore files |
//! | [`config`] | `garden.toml` loading and validation |
//! | [`output`] | CLI progress and warning lines |
//! | [`types`] | Page and entry types shared across the pass |
//!
//! # Design Decisions
//!
//! ## `.DS_Store` as the Layout Source
//!
//! Finder already records where every icon sits. Instead of inventing a
//! layout DSL, the generator reads those records: arrange a folder by hand
//! in Finder and its page reproduces that arrangement, down to the window
//! background color. Folders sorted by name or date get a plain flow layout,
//! since their icon positions are synthetic. All of this degrades quietly;
//! a missing or unreadable store just means a formal page.
//!
//! ## Maud Over Template Engines
//!
//! Pages are rendered with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro, rather than a runtime template engine. Malformed markup is a
//! build error, interpolation is escaped by default, and there is no
//! template directory to ship. The stylesheet is inlined into every page for
//! the same reason: each `index.html` stands alone.
//!
//! ## Pure-Rust Probing (No FFmpeg)
//!
//! Tile sizes come from real pixel dimensions, read by the `image` crate for
//! raster formats and by small container walks for MP4 and WebM. Probing a
//! video means parsing a few hundred bytes of box or EBML structure, which
//! is not worth a system dependency on ffprobe. The binary stays fully
//! self-contained.
//!
//! ## Output Beside the Input
//!
//! Every directory gets its `index.html` written in place, so the garden is
//! servable from the source tree itself and relative links between pages are
//! just entry names. The generator's own artifacts are excluded from the
//! walk, which keeps repeated runs stable.

pub mod classify;
pub mod config;
pub mod contrast;
pub mod cultivate;
pub mod dsstore;
pub mod ignore;
pub mod layout;
pub mod output;
pub mod probe;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
