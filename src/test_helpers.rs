//! Shared fixture builders for the test suite.
//!
//! Everything here produces real bytes: decodable raster images, seekable
//! video containers, binary property lists, and whole `.DS_Store` files laid
//! out the way Finder's buddy allocator writes them. Tests assemble fixtures
//! in temp directories from these instead of carrying binary files in the
//! repo.

use crate::dsstore::plist::Value;
use image::{ImageFormat, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;

// =========================================================================
// Images
// =========================================================================

/// A decodable PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

/// A decodable JPEG carrying an EXIF orientation tag.
///
/// The `Exif` APP1 segment is spliced in right after the start-of-image
/// marker, ahead of the encoder's own segments.
pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend(b"II");
    tiff.extend(42u16.to_le_bytes());
    tiff.extend(8u32.to_le_bytes()); // IFD0 directly after the header
    tiff.extend(1u16.to_le_bytes()); // one entry
    tiff.extend(0x0112u16.to_le_bytes()); // orientation tag
    tiff.extend(3u16.to_le_bytes()); // SHORT
    tiff.extend(1u32.to_le_bytes()); // count
    tiff.extend(orientation.to_le_bytes());
    tiff.extend([0u8; 2]); // value padding
    tiff.extend(0u32.to_le_bytes()); // no next IFD

    let mut segment = vec![0xFF, 0xE1];
    segment.extend(((tiff.len() + 8) as u16).to_be_bytes());
    segment.extend(b"Exif\0\0");
    segment.extend(&tiff);

    let mut data = jpeg_bytes(width, height);
    data.splice(2..2, segment);
    data
}

// =========================================================================
// Video containers
// =========================================================================

fn mp4_box(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut data = ((body.len() + 8) as u32).to_be_bytes().to_vec();
    data.extend(kind);
    data.extend(body);
    data
}

/// A minimal MP4: `ftyp` plus a `moov` holding one version 0 video track.
pub fn mp4_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut tkhd = vec![0u8; 84];
    tkhd[76..80].copy_from_slice(&(width << 16).to_be_bytes());
    tkhd[80..84].copy_from_slice(&(height << 16).to_be_bytes());
    let moov = mp4_box(b"moov", &mp4_box(b"trak", &mp4_box(b"tkhd", &tkhd)));
    let mut data = mp4_box(b"ftyp", b"isomiso2");
    data.extend(moov);
    data
}

fn ebml_element(id: u32, body: &[u8]) -> Vec<u8> {
    assert!(body.len() < 0x7F, "short-form sizes only");
    let id_bytes = id.to_be_bytes();
    let skip = id_bytes.iter().take_while(|&&b| b == 0).count();
    let mut data = id_bytes[skip..].to_vec();
    data.push(0x80 | body.len() as u8);
    data.extend(body);
    data
}

/// A minimal WebM: EBML header plus a Segment holding one video track.
pub fn webm_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut video = ebml_element(0xB0, &(width as u16).to_be_bytes());
    video.extend(ebml_element(0xBA, &(height as u16).to_be_bytes()));
    let entry = ebml_element(0xAE, &ebml_element(0xE0, &video));
    let tracks = ebml_element(0x1654_AE6B, &entry);
    let mut data = ebml_element(0x1A45_DFA3, &[]);
    data.extend(ebml_element(0x1853_8067, &tracks));
    data
}

// =========================================================================
// Binary plists
// =========================================================================

/// Encode a value as a binary plist, the format `icvp` blobs use.
pub fn encode_bplist(value: &Value) -> Vec<u8> {
    let mut data = b"bplist00".to_vec();
    let mut offsets = Vec::new();
    let top = write_object(value, &mut data, &mut offsets);
    assert!(offsets.len() <= 256, "one-byte object refs only");

    let table_offset = data.len();
    assert!(table_offset < 0x10000, "two-byte offsets at most");
    let offset_size: u8 = if table_offset < 256 { 1 } else { 2 };
    for &offset in &offsets {
        if offset_size == 1 {
            data.push(offset as u8);
        } else {
            data.extend((offset as u16).to_be_bytes());
        }
    }

    data.extend([0u8; 6]);
    data.push(offset_size);
    data.push(1); // ref size
    data.extend((offsets.len() as u64).to_be_bytes());
    data.extend((top as u64).to_be_bytes());
    data.extend((table_offset as u64).to_be_bytes());
    data
}

/// An `icvp` view-settings blob: arrangement plus an optional solid
/// background color with 0.0-1.0 channels.
pub fn icvp_blob(arrange_by: &str, background: Option<(f64, f64, f64)>) -> Vec<u8> {
    let mut dict = HashMap::new();
    dict.insert(
        "arrangeBy".to_string(),
        Value::String(arrange_by.to_string()),
    );
    dict.insert("iconSize".to_string(), Value::Real(64.0));
    if let Some((r, g, b)) = background {
        dict.insert("backgroundType".to_string(), Value::Int(1));
        dict.insert("backgroundColorRed".to_string(), Value::Real(r));
        dict.insert("backgroundColorGreen".to_string(), Value::Real(g));
        dict.insert("backgroundColorBlue".to_string(), Value::Real(b));
    }
    encode_bplist(&Value::Dict(dict))
}

/// Write one object, children first, and return its table index.
fn write_object(value: &Value, data: &mut Vec<u8>, offsets: &mut Vec<usize>) -> usize {
    match value {
        Value::Bool(flag) => {
            let index = reserve(data, offsets);
            data.push(if *flag { 0x09 } else { 0x08 });
            index
        }
        Value::Int(number) => {
            let index = reserve(data, offsets);
            data.push(0x13);
            data.extend(number.to_be_bytes());
            index
        }
        Value::Real(number) => {
            let index = reserve(data, offsets);
            data.push(0x23);
            data.extend(number.to_be_bytes());
            index
        }
        Value::String(text) => write_string(text, data, offsets),
        Value::Data(bytes) => {
            let index = reserve(data, offsets);
            write_marker(0x4, bytes.len(), data);
            data.extend(bytes);
            index
        }
        Value::Array(items) => {
            let refs: Vec<usize> = items
                .iter()
                .map(|item| write_object(item, data, offsets))
                .collect();
            let index = reserve(data, offsets);
            write_marker(0xA, refs.len(), data);
            data.extend(refs.iter().map(|&r| r as u8));
            index
        }
        Value::Dict(map) => {
            // Key objects first, then value objects, with the reference
            // lists in matching order.
            let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
            pairs.sort_by_key(|(key, _)| *key);
            let mut refs: Vec<usize> = pairs
                .iter()
                .map(|(key, _)| write_string(key, data, offsets))
                .collect();
            refs.extend(
                pairs
                    .iter()
                    .map(|(_, child)| write_object(child, data, offsets)),
            );
            let index = reserve(data, offsets);
            write_marker(0xD, pairs.len(), data);
            data.extend(refs.iter().map(|&r| r as u8));
            index
        }
    }
}

/// Record the next object's byte offset and return its table index.
fn reserve(data: &[u8], offsets: &mut Vec<usize>) -> usize {
    offsets.push(data.len());
    offsets.len() - 1
}

fn write_string(text: &str, data: &mut Vec<u8>, offsets: &mut Vec<usize>) -> usize {
    let index = reserve(data, offsets);
    if text.is_ascii() {
        write_marker(0x5, text.len(), data);
        data.extend(text.as_bytes());
    } else {
        let units: Vec<u16> = text.encode_utf16().collect();
        write_marker(0x6, units.len(), data);
        for unit in units {
            data.extend(unit.to_be_bytes());
        }
    }
    index
}

/// Marker byte carrying the object count, long form past a nibble.
fn write_marker(kind: u8, count: usize, data: &mut Vec<u8>) {
    if count < 15 {
        data.push(kind << 4 | count as u8);
    } else {
        data.push(kind << 4 | 0x0F);
        data.push(0x11); // two-byte count object
        data.extend((count as u16).to_be_bytes());
    }
}

// =========================================================================
// .DS_Store files
// =========================================================================

/// Builds a complete `.DS_Store` image: the header, one leaf node holding
/// the records in insertion order, the master block, and the allocator.
pub struct DsStoreBuilder {
    records: Vec<Vec<u8>>,
}

impl DsStoreBuilder {
    pub fn new() -> Self {
        DsStoreBuilder {
            records: Vec::new(),
        }
    }

    /// An `Iloc` icon position record for one entry.
    pub fn iloc(self, name: &str, x: u32, y: u32) -> Self {
        let mut blob = Vec::with_capacity(16);
        blob.extend(x.to_be_bytes());
        blob.extend(y.to_be_bytes());
        blob.extend([0xFF; 6]);
        blob.extend([0x00; 2]);
        self.record(name, *b"Iloc", *b"blob", blob)
    }

    /// An `icvp` view-settings record; pair with [`icvp_blob`].
    pub fn icvp(self, name: &str, blob: Vec<u8>) -> Self {
        self.record(name, *b"icvp", *b"blob", blob)
    }

    /// A raw record. `blob` and `ustr` payloads get their length prefixes
    /// written here; other wire types are stored as passed.
    pub fn record(
        mut self,
        name: &str,
        structure_id: [u8; 4],
        wire_type: [u8; 4],
        payload: Vec<u8>,
    ) -> Self {
        let mut record = Vec::new();
        let units: Vec<u16> = name.encode_utf16().collect();
        record.extend((units.len() as u32).to_be_bytes());
        for unit in units {
            record.extend(unit.to_be_bytes());
        }
        record.extend(structure_id);
        record.extend(wire_type);
        match &wire_type {
            b"blob" => record.extend((payload.len() as u32).to_be_bytes()),
            b"ustr" => record.extend((payload.len() as u32 / 2).to_be_bytes()),
            _ => {}
        }
        record.extend(payload);
        self.records.push(record);
        self
    }

    /// Assemble the file bytes.
    pub fn build(self) -> Vec<u8> {
        // Leaf node: no rightmost child, then the record count and records.
        let mut leaf = Vec::new();
        leaf.extend(0u32.to_be_bytes());
        leaf.extend((self.records.len() as u32).to_be_bytes());
        for record in &self.records {
            leaf.extend(record);
        }
        let leaf_size = leaf.len().next_power_of_two().max(32);

        // Master block: root node number, tree height, record and node
        // counts, node page size.
        let mut master = Vec::new();
        master.extend(2u32.to_be_bytes());
        master.extend(0u32.to_be_bytes());
        master.extend((self.records.len() as u32).to_be_bytes());
        master.extend(1u32.to_be_bytes());
        master.extend(0x1000u32.to_be_bytes());
        master.resize(32, 0);

        // Block offsets are relative to the end of the alignment word and
        // pack log2(size) into their low five bits.
        let leaf_offset = 32u32;
        let master_offset = leaf_offset + leaf_size as u32;
        let alloc_offset = master_offset + 32;
        let addresses = [
            alloc_offset | 11, // the allocator block itself, 2048 bytes
            master_offset | 5,
            leaf_offset | leaf_size.trailing_zeros(),
        ];

        let mut alloc = Vec::new();
        alloc.extend(3u32.to_be_bytes()); // block count
        alloc.extend(0u32.to_be_bytes());
        for address in addresses {
            alloc.extend(address.to_be_bytes());
        }
        alloc.resize(8 + 256 * 4, 0); // address table padded to 256 entries
        alloc.extend(1u32.to_be_bytes()); // directory entry count
        alloc.push(4);
        alloc.extend(b"DSDB");
        alloc.extend(1u32.to_be_bytes()); // master block number
        alloc.extend([0u8; 32 * 4]); // empty free lists
        alloc.resize(2048, 0);

        let mut data = Vec::new();
        data.extend(1u32.to_be_bytes());
        data.extend(b"Bud1");
        data.extend(alloc_offset.to_be_bytes());
        data.extend(2048u32.to_be_bytes());
        data.extend(alloc_offset.to_be_bytes());
        data.extend([0u8; 16]);
        leaf.resize(leaf_size, 0);
        data.extend(leaf);
        data.extend(master);
        data.extend(alloc);
        data
    }
}
