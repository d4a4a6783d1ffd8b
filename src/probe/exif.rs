//! EXIF orientation lookup for JPEG files.
//!
//! Walks the JPEG marker stream to the `Exif` APP1 segment, then the TIFF
//! structure inside it to IFD0's orientation tag (0x0112). Callers swap
//! dimensions for values 6 and 8.

const MARKER_APP1: u8 = 0xE1;
/// Start of scan: image data begins, no more metadata segments follow.
const MARKER_SOS: u8 = 0xDA;
const ORIENTATION_TAG: u16 = 0x0112;
/// TIFF field type SHORT, the only type orientation is written as.
const TYPE_SHORT: u16 = 3;

pub(super) fn jpeg_orientation(data: &[u8]) -> Option<u16> {
    orientation_from_tiff(find_exif_segment(data)?)
}

// ----------------------------------------------------------------------------
// JPEG segment scan
// ----------------------------------------------------------------------------

/// Locate the TIFF block inside the `Exif\0\0` APP1 segment.
fn find_exif_segment(data: &[u8]) -> Option<&[u8]> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        if marker == MARKER_SOS {
            return None;
        }
        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if length < 2 {
            return None;
        }
        let segment = data.get(pos + 4..pos + 2 + length)?;
        if marker == MARKER_APP1 && segment.starts_with(b"Exif\0\0") {
            return Some(&segment[6..]);
        }
        pos += 2 + length;
    }
    None
}

// ----------------------------------------------------------------------------
// TIFF walk
// ----------------------------------------------------------------------------

/// Read the orientation tag from IFD0, honoring either byte order.
fn orientation_from_tiff(tiff: &[u8]) -> Option<u16> {
    let big_endian = match tiff.get(0..2)? {
        b"MM" => true,
        b"II" => false,
        _ => return None,
    };
    let read_u16 = |pos: usize| -> Option<u16> {
        let bytes: [u8; 2] = tiff.get(pos..pos + 2)?.try_into().ok()?;
        Some(if big_endian {
            u16::from_be_bytes(bytes)
        } else {
            u16::from_le_bytes(bytes)
        })
    };
    let read_u32 = |pos: usize| -> Option<u32> {
        let bytes: [u8; 4] = tiff.get(pos..pos + 4)?.try_into().ok()?;
        Some(if big_endian {
            u32::from_be_bytes(bytes)
        } else {
            u32::from_le_bytes(bytes)
        })
    };

    if read_u16(2)? != 42 {
        return None;
    }
    let ifd = read_u32(4)? as usize;
    let entries = read_u16(ifd)? as usize;
    for i in 0..entries {
        let entry = ifd + 2 + i * 12;
        if read_u16(entry)? == ORIENTATION_TAG && read_u16(entry + 2)? == TYPE_SHORT {
            // SHORT values are stored inline in the value field's first two
            // bytes.
            return read_u16(entry + 8);
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================
