//! Minimal binary property list reader.
//!
//! Finder stores icon view settings as a `bplist00` blob inside `.DS_Store`
//! records. This reads just enough of the format for those blobs: booleans,
//! integers, reals, strings, data, arrays and dictionaries. Anything else
//! (dates, UIDs, sets) voids the whole read, as does any structural damage.
//! Pure Rust, no external dependencies.
//!
//! Layout: an 8-byte magic, marker-tagged objects, an offset table locating
//! each object by index, and a 32-byte trailer giving the table geometry and
//! the root object index.

use std::collections::HashMap;

/// A decoded property list value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Real(f64),
    String(String),
    Data(Vec<u8>),
    Array(Vec<Value>),
    Dict(HashMap<String, Value>),
}

impl Value {
    /// Dictionary accessor, `None` for other variants.
    pub fn as_dict(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Numeric value as f64: integers widen, reals pass through.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Object graph depth cap. Finder blobs are two levels deep.
const MAX_DEPTH: u32 = 16;

/// Parse a binary plist, returning its top-level value.
pub fn parse(data: &[u8]) -> Option<Value> {
    if data.len() < 40 || !data.starts_with(b"bplist00") {
        return None;
    }
    let trailer = &data[data.len() - 32..];
    let offset_size = trailer[6] as usize;
    let ref_size = trailer[7] as usize;
    let num_objects = u64::from_be_bytes(trailer[8..16].try_into().ok()?) as usize;
    let top_object = u64::from_be_bytes(trailer[16..24].try_into().ok()?) as usize;
    let table_offset = u64::from_be_bytes(trailer[24..32].try_into().ok()?) as usize;

    if !(1..=8).contains(&offset_size) || !(1..=8).contains(&ref_size) {
        return None;
    }
    // The offset table must sit between the header and the trailer.
    let table_len = num_objects.checked_mul(offset_size)?;
    let table_end = table_offset.checked_add(table_len)?;
    if table_offset < 8 || table_end > data.len() - 32 || top_object >= num_objects {
        return None;
    }

    let plist = Plist {
        data: &data[..data.len() - 32],
        table_offset,
        offset_size,
        ref_size,
        num_objects,
    };
    plist.object(top_object, 0)
}

struct Plist<'a> {
    /// File bytes without the trailer.
    data: &'a [u8],
    table_offset: usize,
    offset_size: usize,
    ref_size: usize,
    num_objects: usize,
}

impl Plist<'_> {
    /// Byte offset of object `index`, from the offset table.
    fn offset_of(&self, index: usize) -> Option<usize> {
        if index >= self.num_objects {
            return None;
        }
        self.read_sized_uint(self.table_offset + index * self.offset_size, self.offset_size)
    }

    /// Big-endian unsigned integer of `size` bytes at `pos`.
    fn read_sized_uint(&self, pos: usize, size: usize) -> Option<usize> {
        let bytes = self.data.get(pos..pos.checked_add(size)?)?;
        let mut value = 0usize;
        for &b in bytes {
            value = value.checked_mul(256)?.checked_add(b as usize)?;
        }
        Some(value)
    }

    /// Object reference of `ref_size` bytes at `pos`.
    fn object_ref(&self, pos: usize) -> Option<usize> {
        self.read_sized_uint(pos, self.ref_size)
    }

    /// Decode the object at table index `index`.
    fn object(&self, index: usize, depth: u32) -> Option<Value> {
        if depth > MAX_DEPTH {
            return None;
        }
        let pos = self.offset_of(index)?;
        let marker = *self.data.get(pos)?;
        let info = (marker & 0x0F) as usize;
        match marker >> 4 {
            0x0 => match marker {
                0x08 => Some(Value::Bool(false)),
                0x09 => Some(Value::Bool(true)),
                _ => None,
            },
            0x1 => self.integer(pos, info),
            0x2 => self.real(pos, info),
            0x4 => {
                let (len, start) = self.length(pos, info)?;
                let bytes = self.data.get(start..start.checked_add(len)?)?;
                Some(Value::Data(bytes.to_vec()))
            }
            0x5 => {
                let (len, start) = self.length(pos, info)?;
                let bytes = self.data.get(start..start.checked_add(len)?)?;
                if !bytes.is_ascii() {
                    return None;
                }
                Some(Value::String(
                    std::str::from_utf8(bytes).ok()?.to_string(),
                ))
            }
            0x6 => {
                let (len, start) = self.length(pos, info)?;
                let bytes = self
                    .data
                    .get(start..start.checked_add(len.checked_mul(2)?)?)?;
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).ok().map(Value::String)
            }
            0xA => {
                let (count, start) = self.length(pos, info)?;
                let mut items = Vec::with_capacity(count);
                for i in 0..count {
                    let item_ref = self.object_ref(start + i * self.ref_size)?;
                    items.push(self.object(item_ref, depth + 1)?);
                }
                Some(Value::Array(items))
            }
            0xD => {
                let (count, start) = self.length(pos, info)?;
                let mut map = HashMap::with_capacity(count);
                for i in 0..count {
                    let key_ref = self.object_ref(start + i * self.ref_size)?;
                    let value_ref = self.object_ref(start + (count + i) * self.ref_size)?;
                    let key = match self.object(key_ref, depth + 1)? {
                        Value::String(s) => s,
                        _ => return None,
                    };
                    map.insert(key, self.object(value_ref, depth + 1)?);
                }
                Some(Value::Dict(map))
            }
            _ => None,
        }
    }

    /// Integers are 2^info bytes, big-endian. Only the 8-byte form carries a
    /// sign, shorter ones are unsigned.
    fn integer(&self, pos: usize, info: usize) -> Option<Value> {
        if info > 3 {
            return None;
        }
        let size = 1usize << info;
        let bytes = self.data.get(pos + 1..pos + 1 + size)?;
        let mut value: i64 = 0;
        for &b in bytes {
            value = (value << 8) | i64::from(b);
        }
        Some(Value::Int(value))
    }

    fn real(&self, pos: usize, info: usize) -> Option<Value> {
        match info {
            2 => {
                let bytes = self.data.get(pos + 1..pos + 5)?;
                Some(Value::Real(f64::from(f32::from_be_bytes(
                    bytes.try_into().ok()?,
                ))))
            }
            3 => {
                let bytes = self.data.get(pos + 1..pos + 9)?;
                Some(Value::Real(f64::from_be_bytes(bytes.try_into().ok()?)))
            }
            _ => None,
        }
    }

    /// Element count for a variable-length object. Info 0xF means the real
    /// count follows inline as an integer object. Returns the count and the
    /// payload start position.
    fn length(&self, pos: usize, info: usize) -> Option<(usize, usize)> {
        if info != 0x0F {
            return Some((info, pos + 1));
        }
        let marker = *self.data.get(pos + 1)?;
        if marker >> 4 != 0x1 || (marker & 0x0F) > 3 {
            return None;
        }
        let size = 1usize << (marker & 0x0F);
        let count = self.read_sized_uint(pos + 2, size)?;
        // A count can never exceed the payload bytes available.
        if count > self.data.len() {
            return None;
        }
        Some((count, pos + 2 + size))
    }
}

// ============================================================================
// Tests
// ============================================================================
