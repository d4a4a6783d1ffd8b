//! MP4 track header probe.
//!
//! Walks the top-level box structure to `moov`, then each `trak`'s `tkhd`
//! for the presentation size (16.16 fixed point). The first track with a
//! nonzero size wins; audio tracks record zeros. Everything else is seeked
//! over, so a trailing `moov` costs one pass over box headers rather than a
//! read of the media data.

use super::Dimensions;
use std::io::{Read, Seek, SeekFrom};

/// `moov` holds metadata only and stays small; anything bigger is not one.
const MAX_MOOV_SIZE: u64 = 64 * 1024 * 1024;

// ----------------------------------------------------------------------------
// Top-level box scan
// ----------------------------------------------------------------------------

pub(super) fn dimensions<R: Read + Seek>(reader: &mut R) -> Option<Dimensions> {
    loop {
        let mut header = [0u8; 8];
        reader.read_exact(&mut header).ok()?;
        let size32 = u64::from(u32::from_be_bytes(header[0..4].try_into().ok()?));
        let box_type: [u8; 4] = header[4..8].try_into().ok()?;

        // Size 1 means a 64-bit size follows; size 0 means "to end of file".
        let body_size = match size32 {
            0 => None,
            1 => {
                let mut extended = [0u8; 8];
                reader.read_exact(&mut extended).ok()?;
                Some(u64::from_be_bytes(extended).checked_sub(16)?)
            }
            n => Some(n.checked_sub(8)?),
        };

        if box_type == *b"moov" {
            let mut body = Vec::new();
            match body_size {
                Some(size) if size <= MAX_MOOV_SIZE => {
                    body.resize(size as usize, 0);
                    reader.read_exact(&mut body).ok()?;
                }
                Some(_) => return None,
                None => {
                    reader.by_ref().take(MAX_MOOV_SIZE).read_to_end(&mut body).ok()?;
                }
            }
            return moov_dimensions(&body);
        }

        // A to-end-of-file box that is not moov ends the search.
        let skip = body_size?;
        reader.seek(SeekFrom::Current(i64::try_from(skip).ok()?)).ok()?;
    }
}

// ----------------------------------------------------------------------------
// In-memory moov walk
// ----------------------------------------------------------------------------

fn moov_dimensions(moov: &[u8]) -> Option<Dimensions> {
    for (kind, body) in boxes(moov) {
        if kind == *b"trak" {
            if let Some(dims) = trak_dimensions(body) {
                return Some(dims);
            }
        }
    }
    None
}

fn trak_dimensions(trak: &[u8]) -> Option<Dimensions> {
    for (kind, body) in boxes(trak) {
        if kind == *b"tkhd" {
            return tkhd_dimensions(body);
        }
    }
    None
}

/// Iterate the child boxes of a container body as (type, body) pairs.
fn boxes(data: &[u8]) -> impl Iterator<Item = ([u8; 4], &[u8])> {
    let mut pos = 0usize;
    std::iter::from_fn(move || {
        let header = data.get(pos..pos + 8)?;
        let size = u32::from_be_bytes(header[0..4].try_into().ok()?) as usize;
        let kind: [u8; 4] = header[4..8].try_into().ok()?;
        // Extended and degenerate sizes stop the scan; moov children never
        // need them.
        if size < 8 {
            return None;
        }
        let body = data.get(pos + 8..pos + size)?;
        pos += size;
        Some((kind, body))
    })
}

/// Track width/height: 16.16 fixed point at the end of the `tkhd` box.
fn tkhd_dimensions(body: &[u8]) -> Option<Dimensions> {
    // Version 1 widens the three time fields from 4 to 8 bytes.
    let fixed_at = match *body.first()? {
        0 => 76,
        1 => 88,
        _ => return None,
    };
    let width = fixed_point(body, fixed_at)?;
    let height = fixed_point(body, fixed_at + 4)?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(Dimensions { width, height })
}

/// Integer part of a 16.16 fixed-point value.
fn fixed_point(data: &[u8], pos: usize) -> Option<u32> {
    let bytes: [u8; 4] = data.get(pos..pos + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes) >> 16)
}

// ============================================================================
// Tests
// ============================================================================
