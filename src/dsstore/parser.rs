//! `.DS_Store` buddy-allocator and record-tree reader.
//!
//! The file is a tiny allocator image: a header pointing at a block address
//! table, a table of contents naming the `DSDB` master block, and a B-tree of
//! per-entry records below it. Only `Iloc` (icon position) and `icvp` (icon
//! view settings) records are decoded; every other record type is walked
//! over structurally. Any inconsistency fails the whole parse and the caller
//! falls back to "no icon metadata".

use super::{ArrangeBy, Background, DirectoryIcons, IconViewProperties, plist};
use crate::types::Position;

/// Block addresses pack offset | log2(size) into one u32; the low five bits
/// are the size exponent.
const ADDRESS_SIZE_MASK: u32 = 0x1F;

/// Nodes visited before giving up. Guards cyclic block references.
const MAX_NODES: u32 = 4096;

/// Block address tables larger than this are not Finder output.
const MAX_BLOCKS: usize = 4096;

// ----------------------------------------------------------------------------
// File structure
// ----------------------------------------------------------------------------

pub(super) fn parse(data: &[u8]) -> Option<DirectoryIcons> {
    // Header: alignment word (always 1), magic, then the allocator block's
    // offset, size, and the offset repeated.
    if data.len() < 36 || read_u32(data, 0)? != 1 || &data[4..8] != b"Bud1" {
        return None;
    }
    let alloc_offset = read_u32(data, 8)? as usize;
    let alloc_size = read_u32(data, 12)? as usize;
    if read_u32(data, 16)? as usize != alloc_offset {
        return None;
    }
    let alloc_start = alloc_offset.checked_add(4)?;
    let alloc = data.get(alloc_start..alloc_start.checked_add(alloc_size)?)?;

    // Block address table, padded to a multiple of 256 entries.
    let count = read_u32(alloc, 0)? as usize;
    if count > MAX_BLOCKS {
        return None;
    }
    let mut addresses = Vec::with_capacity(count);
    for i in 0..count {
        addresses.push(read_u32(alloc, 8 + i * 4)?);
    }
    let padded = count.next_multiple_of(256);

    // Table of contents: named blocks. Only the DSDB entry matters.
    let mut pos = 8 + padded * 4;
    let toc_count = read_u32(alloc, pos)? as usize;
    pos += 4;
    let mut master_block = None;
    for _ in 0..toc_count {
        let name_len = *alloc.get(pos)? as usize;
        let name = alloc.get(pos + 1..pos + 1 + name_len)?;
        let block_number = read_u32(alloc, pos + 1 + name_len)?;
        if name == b"DSDB" {
            master_block = Some(block_number);
        }
        pos += 1 + name_len + 4;
    }

    // Master block: the record tree's root block number leads it.
    let master = block(data, &addresses, master_block?)?;
    let root = read_u32(master, 0)?;

    let mut icons = DirectoryIcons::new();
    let mut budget = MAX_NODES;
    walk(data, &addresses, root, &mut icons, &mut budget)?;
    Some(icons)
}

/// Resolve a numbered block to its content slice.
fn block<'a>(data: &'a [u8], addresses: &[u32], number: u32) -> Option<&'a [u8]> {
    let address = *addresses.get(number as usize)?;
    let offset = (address & !ADDRESS_SIZE_MASK) as usize;
    let size = 1usize << (address & ADDRESS_SIZE_MASK);
    let start = offset.checked_add(4)?;
    data.get(start..start.checked_add(size)?)
}

// ----------------------------------------------------------------------------
// Record tree
// ----------------------------------------------------------------------------

/// Depth-first tree walk. Internal nodes interleave child block pointers with
/// records and end with a rightmost child; leaves hold records only.
fn walk(
    data: &[u8],
    addresses: &[u32],
    node: u32,
    icons: &mut DirectoryIcons,
    budget: &mut u32,
) -> Option<()> {
    *budget = budget.checked_sub(1)?;
    let content = block(data, addresses, node)?;
    let rightmost = read_u32(content, 0)?;
    let count = read_u32(content, 4)? as usize;
    let mut pos = 8;
    if rightmost == 0 {
        for _ in 0..count {
            pos = record(content, pos, icons)?;
        }
    } else {
        for _ in 0..count {
            let child = read_u32(content, pos)?;
            pos += 4;
            walk(data, addresses, child, icons, budget)?;
            pos = record(content, pos, icons)?;
        }
        walk(data, addresses, rightmost, icons, budget)?;
    }
    Some(())
}

/// Decode one record and merge its field into the map. Returns the position
/// just past the record.
fn record(content: &[u8], pos: usize, icons: &mut DirectoryIcons) -> Option<usize> {
    let name_units = read_u32(content, pos)? as usize;
    let name_len = name_units.checked_mul(2)?;
    let name_bytes = content.get(pos + 4..(pos + 4).checked_add(name_len)?)?;
    let units: Vec<u16> = name_bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    let name = String::from_utf16(&units).ok()?;
    let mut pos = pos + 4 + name_len;

    let structure_id: [u8; 4] = content.get(pos..pos + 4)?.try_into().ok()?;
    let wire_type: [u8; 4] = content.get(pos + 4..pos + 8)?.try_into().ok()?;
    pos += 8;

    // Payload width is fixed per wire type, except the length-prefixed blob
    // and ustr forms. Unknown wire types have unknowable widths.
    let payload_end = match &wire_type {
        b"long" | b"shor" | b"type" => pos.checked_add(4)?,
        b"bool" => pos.checked_add(1)?,
        b"comp" | b"dutc" => pos.checked_add(8)?,
        b"blob" => {
            let len = read_u32(content, pos)? as usize;
            (pos + 4).checked_add(len)?
        }
        b"ustr" => {
            let len = read_u32(content, pos)? as usize;
            (pos + 4).checked_add(len.checked_mul(2)?)?
        }
        _ => return None,
    };
    let payload = content.get(pos..payload_end)?;

    match (&structure_id, &wire_type) {
        (b"Iloc", b"blob") => {
            // Finder writes 16-byte Iloc blobs: x, y, then eight flag bytes.
            // Other lengths are foreign, skip the field but keep the record.
            let blob = &payload[4..];
            if blob.len() == 16 {
                let x = u32::from_be_bytes(blob[0..4].try_into().ok()?);
                let y = u32::from_be_bytes(blob[4..8].try_into().ok()?);
                icons.entry(name).or_default().iloc = Some(Position { x, y });
            }
        }
        (b"icvp", b"blob") => {
            let properties = view_properties(&payload[4..])?;
            icons.entry(name).or_default().icvp = Some(properties);
        }
        _ => {}
    }
    Some(payload_end)
}

// ----------------------------------------------------------------------------
// icvp blobs
// ----------------------------------------------------------------------------

/// Decode an `icvp` plist blob into view properties.
///
/// `arrangeBy` and `iconSize` are always present in Finder output; their
/// absence, like an undecodable plist, voids the whole parse.
fn view_properties(blob: &[u8]) -> Option<IconViewProperties> {
    let value = plist::parse(blob)?;
    let dict = value.as_dict()?;

    let arrange_by = match dict.get("arrangeBy")? {
        plist::Value::String(name) => ArrangeBy::from_name(name),
        _ => ArrangeBy::Other,
    };
    if !dict.contains_key("iconSize") {
        return None;
    }

    let background = match dict.get("backgroundType").and_then(plist::Value::as_number) {
        Some(kind) if kind == 1.0 => Background::Color {
            r: channel(dict.get("backgroundColorRed")?)?,
            g: channel(dict.get("backgroundColorGreen")?)?,
            b: channel(dict.get("backgroundColorBlue")?)?,
        },
        Some(kind) if kind == 2.0 => Background::Image,
        _ => Background::Default,
    };

    Some(IconViewProperties {
        arrange_by,
        background,
    })
}

/// Color channel from a 0.0-1.0 plist number, truncated to 0-255.
fn channel(value: &plist::Value) -> Option<u8> {
    Some((value.as_number()? * 255.0) as u8)
}

fn read_u32(data: &[u8], pos: usize) -> Option<u32> {
    let bytes = data.get(pos..pos.checked_add(4)?)?;
    Some(u32::from_be_bytes(bytes.try_into().ok()?))
}

// ============================================================================
// Tests
// ============================================================================
