//! Media dimension probes.
//!
//! Pages size their tiles from real pixel dimensions, so every image and
//! video is probed before it is listed. Raster formats go through the `image`
//! crate's content-sniffing reader; SVG gets a text scan of the root tag;
//! JPEG additionally has its EXIF orientation read so sideways photos swap
//! width and height downstream. Videos are probed by walking their container
//! headers directly (MP4 `tkhd`, WebM `PixelWidth`/`PixelHeight`), which is
//! enough for layout without pulling in a demuxer.
//!
//! Probes fail per file: a broken image costs that entry, never the page.

mod exif;
mod mp4;
mod svg;
mod webm;

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("no dimensions found in {}", .0.display())]
    Dimensions(PathBuf),
}

/// Probed image geometry. `orientation` is the raw EXIF value when present;
/// 6 and 8 are the 90-degree rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub orientation: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Probe an image file for its pixel dimensions and EXIF orientation.
pub fn probe_image(path: &Path) -> Result<ImageInfo, ProbeError> {
    let ext = extension(path);
    if ext == "svg" {
        let text = fs::read_to_string(path)?;
        let (width, height) = svg::dimensions(&text)
            .ok_or_else(|| ProbeError::Dimensions(path.to_path_buf()))?;
        return Ok(ImageInfo {
            width,
            height,
            orientation: None,
        });
    }

    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    let (width, height) = reader.into_dimensions()?;
    let orientation = if matches!(ext.as_str(), "jpg" | "jpeg") {
        exif::jpeg_orientation(&fs::read(path)?)
    } else {
        None
    };
    Ok(ImageInfo {
        width,
        height,
        orientation,
    })
}

/// Probe a video container for its pixel dimensions.
pub fn probe_video(path: &Path) -> Result<Dimensions, ProbeError> {
    let mut reader = BufReader::new(fs::File::open(path)?);
    let dims = match extension(path).as_str() {
        "mp4" => mp4::dimensions(&mut reader),
        "webm" => webm::dimensions(&mut reader),
        _ => None,
    };
    dims.ok_or_else(|| ProbeError::Dimensions(path.to_path_buf()))
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ============================================================================
// Tests
// ============================================================================
