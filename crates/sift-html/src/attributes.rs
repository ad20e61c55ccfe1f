//! Attribute parsing for the raw text between a tag name and its `>`.
//!
//! Parsing never fails. Unterminated quotes, stray `=` or quote characters,
//! and embedded `<`/`>` all yield a best-effort map.

use sift_dom::AttributesMap;

const fn ends_name(byte: u8) -> bool {
    byte.is_ascii_whitespace() || matches!(byte, b'=' | b'/' | b'>' | b'"' | b'\'')
}

fn skip_spaces(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    idx
}

/// Read a value starting at `start`, returning it and the position after it.
///
/// Quoted values run to the matching quote, or to the end of input when the
/// quote is never closed. Bare values run to the next whitespace.
fn read_value(raw: &str, start: usize) -> (&str, usize) {
    let bytes = raw.as_bytes();
    match bytes.get(start) {
        None => ("", bytes.len()),
        Some(&quote @ (b'"' | b'\'')) => {
            let body = start + 1;
            match bytes[body..].iter().position(|&b| b == quote) {
                Some(len) => (&raw[body..body + len], body + len + 1),
                None => (&raw[body..], bytes.len()),
            }
        }
        Some(_) => {
            let stop = bytes[start..]
                .iter()
                .position(u8::is_ascii_whitespace)
                .map_or(bytes.len(), |len| start + len);
            (&raw[start..stop], stop)
        }
    }
}

/// Parse raw attribute text into a name→value map.
///
/// Recognizes double-quoted, single-quoted, and bare values, plus valueless
/// attributes (stored with an empty value). Names are ASCII-lowercased. When
/// a name repeats, the last occurrence wins. A single trailing `/` (from a
/// self-closing tag) is ignored.
///
/// ```
/// use sift_html::parse_attributes;
///
/// let attrs = parse_attributes(r#" id=a class='x y' hidden ID="b""#);
/// assert_eq!(attrs["id"], "b");
/// assert_eq!(attrs["class"], "x y");
/// assert_eq!(attrs["hidden"], "");
/// ```
#[must_use]
pub fn parse_attributes(raw: &str) -> AttributesMap {
    let trimmed = raw.trim_end();
    let raw = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let bytes = raw.as_bytes();
    let mut attrs = AttributesMap::new();
    let mut idx = 0;

    while idx < bytes.len() {
        idx = skip_spaces(bytes, idx);
        let name_start = idx;
        while idx < bytes.len() && !ends_name(bytes[idx]) {
            idx += 1;
        }
        if idx == name_start {
            // Stray '=', '/', '>', or quote with no name in front of it.
            idx += 1;
            continue;
        }

        let name = raw[name_start..idx].to_ascii_lowercase();
        let after_name = skip_spaces(bytes, idx);
        if bytes.get(after_name) == Some(&b'=') {
            let (value, next) = read_value(raw, skip_spaces(bytes, after_name + 1));
            let _ = attrs.insert(name, value.to_string());
            idx = next;
        } else {
            let _ = attrs.insert(name, String::new());
            idx = after_name;
        }
    }

    attrs
}
