//! SVG dimension extraction.
//!
//! Reads the root `<svg>` tag's `width`/`height` attributes, falling back to
//! the `viewBox`. Unit suffixes are dropped and values round to whole pixels.
//! A text scan is plenty here; no XML parser needed for one tag.

pub(super) fn dimensions(text: &str) -> Option<(u32, u32)> {
    let tag = root_tag(text)?;

    let width = attr_value(tag, "width").and_then(parse_length);
    let height = attr_value(tag, "height").and_then(parse_length);
    if let (Some(width), Some(height)) = (width, height) {
        return Some((width, height));
    }

    let view_box = attr_value(tag, "viewBox")?;
    let numbers: Vec<f64> = view_box
        .split([',', ' '])
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    if numbers.len() != 4 {
        return None;
    }
    Some((round_positive(numbers[2])?, round_positive(numbers[3])?))
}

/// The opening `<svg ...>` tag, attributes only.
fn root_tag(text: &str) -> Option<&str> {
    let start = text.find("<svg")?;
    let rest = &text[start + 4..];
    // Reject tags like <svgfoo>.
    let next = rest.chars().next()?;
    if !next.is_whitespace() && next != '>' {
        return None;
    }
    let end = rest.find('>')?;
    Some(&rest[..end])
}

/// Value of a named attribute within a tag body.
fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let bytes = tag.as_bytes();
    let mut search_from = 0;
    while let Some(found) = tag[search_from..].find(name) {
        let start = search_from + found;
        search_from = start + name.len();

        // The name must stand alone: preceded by whitespace, followed by `=`.
        let preceded_ok = start == 0 || bytes[start - 1].is_ascii_whitespace();
        let mut after = start + name.len();
        while after < tag.len() && bytes[after].is_ascii_whitespace() {
            after += 1;
        }
        if !preceded_ok || after >= tag.len() || bytes[after] != b'=' {
            continue;
        }

        let mut value_start = after + 1;
        while value_start < tag.len() && bytes[value_start].is_ascii_whitespace() {
            value_start += 1;
        }
        let quote = *bytes.get(value_start)?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }
        let value = &tag[value_start + 1..];
        let end = value.find(quote as char)?;
        return Some(&value[..end]);
    }
    None
}

/// Parse a CSS-style length: leading number, unit suffix ignored.
fn parse_length(value: &str) -> Option<u32> {
    let numeric: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
        .collect();
    round_positive(numeric.parse().ok()?)
}

fn round_positive(value: f64) -> Option<u32> {
    if value > 0.0 && value.is_finite() {
        Some(value.round() as u32)
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
