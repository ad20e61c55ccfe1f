//! Byte-level scanning helpers for the tree builder.
//!
//! Every position handed out here sits on an ASCII byte (`<`, `>`, a quote,
//! whitespace, or a tag-name byte), so slicing the input at these positions
//! always lands on a char boundary.

use std::collections::HashMap;

use crate::options::CloserMatching;

/// Half-open byte range `[start, end)` of a closing tag such as `</div >`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

/// An opening tag `<name ...>` found by [`next_markup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenTag<'a> {
    /// Position of the `<`.
    pub start: usize,
    /// Tag name with its original case.
    pub name: &'a str,
    /// Everything between the name and the closing `>`.
    pub raw_attrs: &'a str,
    /// Position just past the `>`.
    pub end: usize,
}

/// The next piece of markup in a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Markup<'a> {
    /// A tag opener.
    Open(OpenTag<'a>),
    /// A stray closer, comment, doctype, or processing instruction.
    /// Contributes no text.
    Skip(Span),
    /// A tag opener with no `>` before the end of the range.
    Unterminated {
        /// Position of the `<`.
        start: usize,
    },
}

pub(crate) const fn is_tag_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':' | b'.')
}

fn find_byte(bytes: &[u8], from: usize, end: usize, byte: u8) -> Option<usize> {
    if from >= end {
        return None;
    }
    bytes[from..end]
        .iter()
        .position(|candidate| *candidate == byte)
        .map(|offset| from + offset)
}

fn skip_spaces(bytes: &[u8], mut idx: usize, end: usize) -> usize {
    while idx < end && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    idx
}

fn name_end(bytes: &[u8], mut idx: usize, end: usize) -> usize {
    while idx < end && is_tag_name_byte(bytes[idx]) {
        idx += 1;
    }
    idx
}

/// Locate the `>` that ends a tag whose name ends at `from`.
///
/// Quotes only open a value when they follow `=`, so a stray apostrophe in
/// a bare attribute does not swallow the rest of the document. If a quote is
/// left open, the first plain `>` is used instead.
pub(crate) fn find_tag_end(bytes: &[u8], from: usize, end: usize) -> Option<usize> {
    let mut idx = from;
    let mut quote: Option<u8> = None;
    let mut last_significant: Option<u8> = None;

    while idx < end {
        let byte = bytes[idx];
        match quote {
            Some(q) => {
                if byte == q {
                    quote = None;
                    last_significant = Some(byte);
                }
            }
            None => match byte {
                b'"' | b'\'' if last_significant == Some(b'=') => quote = Some(byte),
                b'>' => return Some(idx),
                _ if byte.is_ascii_whitespace() => {}
                _ => last_significant = Some(byte),
            },
        }
        idx += 1;
    }

    if quote.is_some() {
        return find_byte(bytes, from, end, b'>');
    }
    None
}

/// Find the next tag opener or skippable construct in `[from, end)`.
///
/// A `<` followed by anything other than a letter, `/`, `!`, or `?` is
/// literal text and scanning continues past it.
pub(crate) fn next_markup(input: &str, from: usize, end: usize) -> Option<Markup<'_>> {
    let bytes = input.as_bytes();
    let mut idx = from;

    while let Some(lt) = find_byte(bytes, idx, end, b'<') {
        let Some(&next) = bytes.get(lt + 1).filter(|_| lt + 1 < end) else {
            return None;
        };

        if next.is_ascii_alphabetic() {
            let name_stop = name_end(bytes, lt + 1, end);
            return Some(match find_tag_end(bytes, name_stop, end) {
                Some(gt) => Markup::Open(OpenTag {
                    start: lt,
                    name: &input[lt + 1..name_stop],
                    raw_attrs: &input[name_stop..gt],
                    end: gt + 1,
                }),
                None => Markup::Unterminated { start: lt },
            });
        }

        if matches!(next, b'/' | b'!' | b'?') {
            let stop = find_byte(bytes, lt + 2, end, b'>').map_or(end, |gt| gt + 1);
            return Some(Markup::Skip(Span {
                start: lt,
                end: stop,
            }));
        }

        idx = lt + 1;
    }

    None
}

/// If a closing tag `</name ... >` starts at `lt`, return its span.
fn closer_at(bytes: &[u8], lt: usize, end: usize) -> Option<(usize, Span)> {
    if bytes.get(lt + 1) != Some(&b'/') {
        return None;
    }
    let name_start = lt + 2;
    let name_stop = name_end(bytes, name_start, end);
    if name_stop == name_start {
        return None;
    }
    let gt = skip_spaces(bytes, name_stop, end);
    if gt < end && bytes[gt] == b'>' {
        Some((
            name_stop,
            Span {
                start: lt,
                end: gt + 1,
            },
        ))
    } else {
        None
    }
}

/// Positions of every closing tag, and optionally every non-self-closing
/// opening tag, keyed by lowercased tag name.
///
/// Built once per parse so each closer lookup is a binary search instead of
/// a rescan of the remaining input.
#[derive(Debug, Default)]
pub(crate) struct CloserIndex {
    closers: HashMap<String, Vec<Span>>,
    openers: HashMap<String, Vec<usize>>,
}

impl CloserIndex {
    pub(crate) fn build(input: &str, mode: CloserMatching) -> Self {
        let bytes = input.as_bytes();
        let end = bytes.len();
        let mut index = Self::default();
        let mut idx = 0;

        while let Some(lt) = find_byte(bytes, idx, end, b'<') {
            idx = lt + 1;

            if let Some((name_stop, span)) = closer_at(bytes, lt, end) {
                let name = input[lt + 2..name_stop].to_ascii_lowercase();
                index.closers.entry(name).or_default().push(span);
                idx = span.end;
                continue;
            }

            if mode == CloserMatching::Balanced
                && bytes.get(lt + 1).is_some_and(u8::is_ascii_alphabetic)
            {
                let name_stop = name_end(bytes, lt + 1, end);
                let Some(gt) = find_tag_end(bytes, name_stop, end) else {
                    continue;
                };
                if input[name_stop..gt].trim_end().ends_with('/') {
                    continue;
                }
                let name = input[lt + 1..name_stop].to_ascii_lowercase();
                index.openers.entry(name).or_default().push(lt);
            }
        }

        index
    }

    /// Closing tag for an element named `name` whose content starts at
    /// `from`, constrained to lie entirely before `end`.
    pub(crate) fn find(
        &self,
        name: &str,
        from: usize,
        end: usize,
        mode: CloserMatching,
    ) -> Option<Span> {
        let key = name.to_ascii_lowercase();
        let closers = self.closers.get(&key)?;
        let first = closers.partition_point(|span| span.start < from);
        let candidates = closers[first..].iter().take_while(|span| span.end <= end);

        match mode {
            CloserMatching::Nearest => candidates.copied().next(),
            CloserMatching::Balanced => {
                let openers = self.openers.get(&key).map_or(&[][..], Vec::as_slice);
                let opened_before = |pos: usize| openers.partition_point(|&o| o < pos);
                let base = opened_before(from);
                candidates
                    .enumerate()
                    .find(|(seen, span)| opened_before(span.start) - base <= *seen)
                    .map(|(_, span)| *span)
            }
        }
    }
}
