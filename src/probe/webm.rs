//! WebM track probe.
//!
//! Minimal EBML walk: skip the document header, descend into `Segment`, scan
//! its children for `Tracks`, then read the first video `TrackEntry`'s
//! `PixelWidth`/`PixelHeight`. Tracks precede clusters in any sane muxing,
//! so media data is never read.

use super::Dimensions;
use std::io::{Cursor, Read, Seek, SeekFrom};

const ID_EBML: u32 = 0x1A45_DFA3;
const ID_SEGMENT: u32 = 0x1853_8067;
const ID_TRACKS: u32 = 0x1654_AE6B;
const ID_CLUSTER: u32 = 0x1F43_B675;
const ID_TRACK_ENTRY: u32 = 0xAE;
const ID_VIDEO: u32 = 0xE0;
const ID_PIXEL_WIDTH: u32 = 0xB0;
const ID_PIXEL_HEIGHT: u32 = 0xBA;

const MAX_TRACKS_SIZE: u64 = 16 * 1024 * 1024;

// ----------------------------------------------------------------------------
// Stream walk
// ----------------------------------------------------------------------------

pub(super) fn dimensions<R: Read + Seek>(reader: &mut R) -> Option<Dimensions> {
    let (id, size) = read_element(reader)?;
    if id != ID_EBML {
        return None;
    }
    reader
        .seek(SeekFrom::Current(i64::try_from(size?).ok()?))
        .ok()?;

    // Segment size is commonly unknown (streamed); walk inside regardless.
    let (id, _) = read_element(reader)?;
    if id != ID_SEGMENT {
        return None;
    }

    loop {
        let (id, size) = read_element(reader)?;
        let size = size?;
        if id == ID_TRACKS {
            if size > MAX_TRACKS_SIZE {
                return None;
            }
            let mut body = vec![0u8; size as usize];
            reader.read_exact(&mut body).ok()?;
            return tracks_dimensions(&body);
        }
        if id == ID_CLUSTER {
            return None;
        }
        reader
            .seek(SeekFrom::Current(i64::try_from(size).ok()?))
            .ok()?;
    }
}

/// One element header from the stream: (id, size). A `None` size means the
/// element's length is unknown.
fn read_element<R: Read>(reader: &mut R) -> Option<(u32, Option<u64>)> {
    let (id, _) = read_vint(reader, true)?;
    let (size, unknown) = read_vint(reader, false)?;
    Some((u32::try_from(id).ok()?, if unknown { None } else { Some(size) }))
}

/// EBML variable-length integer. The leading byte's first set bit gives the
/// width. IDs keep their marker bits, sizes strip them; a size with all
/// value bits set means "unknown".
fn read_vint<R: Read>(reader: &mut R, keep_marker: bool) -> Option<(u64, bool)> {
    let mut first = [0u8; 1];
    reader.read_exact(&mut first).ok()?;
    let first = first[0];
    if first == 0 {
        return None;
    }
    let extra = first.leading_zeros() as usize;

    let marker_mask = (0xFFu32 >> (extra + 1)) as u8;
    let mut value = if keep_marker {
        u64::from(first)
    } else {
        u64::from(first & marker_mask)
    };
    let mut rest = vec![0u8; extra];
    reader.read_exact(&mut rest).ok()?;
    for &byte in &rest {
        value = (value << 8) | u64::from(byte);
    }

    let all_ones = !keep_marker && value == (1u64 << (7 * (extra + 1))) - 1;
    Some((value, all_ones))
}

// ----------------------------------------------------------------------------
// In-memory Tracks walk
// ----------------------------------------------------------------------------

fn tracks_dimensions(tracks: &[u8]) -> Option<Dimensions> {
    let mut pos = 0;
    while pos < tracks.len() {
        let (id, body, next) = slice_element(tracks, pos)?;
        if id == ID_TRACK_ENTRY {
            if let Some(dims) = track_entry_dimensions(body) {
                return Some(dims);
            }
        }
        pos = next;
    }
    None
}

fn track_entry_dimensions(entry: &[u8]) -> Option<Dimensions> {
    let mut pos = 0;
    while pos < entry.len() {
        let (id, body, next) = slice_element(entry, pos)?;
        if id == ID_VIDEO {
            return video_dimensions(body);
        }
        pos = next;
    }
    None
}

fn video_dimensions(video: &[u8]) -> Option<Dimensions> {
    let mut width = None;
    let mut height = None;
    let mut pos = 0;
    while pos < video.len() {
        let (id, body, next) = slice_element(video, pos)?;
        match id {
            ID_PIXEL_WIDTH => width = unsigned(body),
            ID_PIXEL_HEIGHT => height = unsigned(body),
            _ => {}
        }
        pos = next;
    }
    match (width, height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Some(Dimensions { width, height })
        }
        _ => None,
    }
}

/// One element at `pos` in a slice: (id, body, position after).
fn slice_element(data: &[u8], pos: usize) -> Option<(u32, &[u8], usize)> {
    let mut cursor = Cursor::new(&data[pos..]);
    let (id, size) = read_element(&mut cursor)?;
    let size = usize::try_from(size?).ok()?;
    let body_start = pos + cursor.position() as usize;
    let body = data.get(body_start..body_start.checked_add(size)?)?;
    Some((id, body, body_start + size))
}

/// Big-endian unsigned integer element payload.
fn unsigned(body: &[u8]) -> Option<u32> {
    if body.is_empty() || body.len() > 8 {
        return None;
    }
    let mut value = 0u64;
    for &byte in body {
        value = (value << 8) | u64::from(byte);
    }
    u32::try_from(value).ok()
}

// ============================================================================
// Tests
// ============================================================================
