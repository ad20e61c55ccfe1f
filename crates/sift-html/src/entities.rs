//! Character reference decoding.
//!
//! This is a text-normalization pass over strings that were already
//! extracted from the tree. It never runs during scanning, so it cannot
//! change tree shape.
//!
//! Only a table of common named references is recognized. Unknown
//! references pass through unchanged.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Longest name we bother trying to match, in bytes.
const MAX_NAME_LEN: usize = 32;

/// Named references: name → (replacement, also valid without `;`).
static NAMED: LazyLock<HashMap<&'static str, (&'static str, bool)>> = LazyLock::new(|| {
    HashMap::from([
        ("amp", ("&", true)),
        ("lt", ("<", true)),
        ("gt", (">", true)),
        ("quot", ("\"", true)),
        ("apos", ("'", false)),
        ("nbsp", ("\u{00A0}", true)),
        ("copy", ("\u{00A9}", true)),
        ("reg", ("\u{00AE}", true)),
        ("trade", ("\u{2122}", false)),
        ("mdash", ("\u{2014}", false)),
        ("ndash", ("\u{2013}", false)),
        ("hellip", ("\u{2026}", false)),
        ("bull", ("\u{2022}", false)),
        ("middot", ("\u{00B7}", false)),
        ("lsquo", ("\u{2018}", false)),
        ("rsquo", ("\u{2019}", false)),
        ("sbquo", ("\u{201A}", false)),
        ("ldquo", ("\u{201C}", false)),
        ("rdquo", ("\u{201D}", false)),
        ("bdquo", ("\u{201E}", false)),
        ("laquo", ("\u{00AB}", false)),
        ("raquo", ("\u{00BB}", false)),
        ("cent", ("\u{00A2}", false)),
        ("pound", ("\u{00A3}", false)),
        ("euro", ("\u{20AC}", false)),
        ("yen", ("\u{00A5}", false)),
        ("sect", ("\u{00A7}", false)),
        ("para", ("\u{00B6}", false)),
        ("deg", ("\u{00B0}", false)),
        ("plusmn", ("\u{00B1}", false)),
        ("times", ("\u{00D7}", false)),
        ("divide", ("\u{00F7}", false)),
        ("frac12", ("\u{00BD}", false)),
        ("frac14", ("\u{00BC}", false)),
        ("frac34", ("\u{00BE}", false)),
        ("larr", ("\u{2190}", false)),
        ("rarr", ("\u{2192}", false)),
        ("uarr", ("\u{2191}", false)),
        ("darr", ("\u{2193}", false)),
        ("shy", ("\u{00AD}", false)),
        ("zwj", ("\u{200D}", false)),
        ("zwnj", ("\u{200C}", false)),
        ("ensp", ("\u{2002}", false)),
        ("emsp", ("\u{2003}", false)),
        ("thinsp", ("\u{2009}", false)),
        ("aacute", ("\u{00E1}", false)),
        ("eacute", ("\u{00E9}", false)),
        ("iacute", ("\u{00ED}", false)),
        ("oacute", ("\u{00F3}", false)),
        ("uacute", ("\u{00FA}", false)),
        ("Aacute", ("\u{00C1}", false)),
        ("Eacute", ("\u{00C9}", false)),
        ("Iacute", ("\u{00CD}", false)),
        ("Oacute", ("\u{00D3}", false)),
        ("Uacute", ("\u{00DA}", false)),
        ("agrave", ("\u{00E0}", false)),
        ("egrave", ("\u{00E8}", false)),
        ("auml", ("\u{00E4}", false)),
        ("ouml", ("\u{00F6}", false)),
        ("uuml", ("\u{00FC}", false)),
        ("Auml", ("\u{00C4}", false)),
        ("Ouml", ("\u{00D6}", false)),
        ("Uuml", ("\u{00DC}", false)),
        ("szlig", ("\u{00DF}", false)),
        ("ntilde", ("\u{00F1}", false)),
        ("Ntilde", ("\u{00D1}", false)),
        ("ccedil", ("\u{00E7}", false)),
        ("Ccedil", ("\u{00C7}", false)),
    ])
});

/// Code point for a numeric reference, with invalid values replaced.
fn numeric_char(value: u32) -> char {
    match value {
        0 => char::REPLACEMENT_CHARACTER,
        _ => char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}

/// Try to decode one reference at the start of `rest` (which begins with
/// `&`). Returns the replacement and the number of bytes consumed.
fn decode_one(rest: &str) -> Option<(Cow<'static, str>, usize)> {
    let bytes = rest.as_bytes();

    if bytes.get(1) == Some(&b'#') {
        let hex = matches!(bytes.get(2), Some(b'x' | b'X'));
        let digits_start = if hex { 3 } else { 2 };
        let digits_len = bytes[digits_start..]
            .iter()
            .take_while(|b| if hex { b.is_ascii_hexdigit() } else { b.is_ascii_digit() })
            .count();
        if digits_len == 0 {
            return None;
        }
        let digits = &rest[digits_start..digits_start + digits_len];
        let value = u32::from_str_radix(digits, if hex { 16 } else { 10 }).unwrap_or(u32::MAX);
        let mut consumed = digits_start + digits_len;
        if bytes.get(consumed) == Some(&b';') {
            consumed += 1;
        }
        return Some((Cow::Owned(numeric_char(value).to_string()), consumed));
    }

    let name_len = bytes[1..]
        .iter()
        .take(MAX_NAME_LEN)
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return None;
    }
    let name = &rest[1..=name_len];
    let &(replacement, legacy) = NAMED.get(name)?;
    if bytes.get(name_len + 1) == Some(&b';') {
        Some((Cow::Borrowed(replacement), name_len + 2))
    } else if legacy {
        Some((Cow::Borrowed(replacement), name_len + 1))
    } else {
        None
    }
}

/// Decode character references in `input`.
///
/// Returns the input unchanged (borrowed) when it contains no `&`.
///
/// ```
/// use sift_html::entities::decode_entities;
///
/// assert_eq!(
///     decode_entities("Fish &amp; Chips &#8212; &#x263A;"),
///     "Fish & Chips \u{2014} \u{263A}"
/// );
/// assert_eq!(decode_entities("&bogus; &"), "&bogus; &");
/// ```
#[must_use]
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find('&') else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..first]);
    let mut idx = first;

    while idx < input.len() {
        let rest = &input[idx..];
        if rest.starts_with('&') {
            if let Some((replacement, consumed)) = decode_one(rest) {
                out.push_str(&replacement);
                idx += consumed;
                continue;
            }
            out.push('&');
            idx += 1;
            continue;
        }
        let next = rest.find('&').map_or(input.len(), |offset| idx + offset);
        out.push_str(&input[idx..next]);
        idx = next;
    }

    Cow::Owned(out)
}
