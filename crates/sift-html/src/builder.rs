//! Single-pass tree construction.
//!
//! The scanner walks the input left to right. Each open element owns a
//! frame holding the byte range of its content, a cursor into that range,
//! and where its text starts in the document's text buffer. Opening a
//! container pushes a frame for its content; exhausting a range pops the
//! frame and records the buffer run written since it opened. Because frames
//! live on a heap-allocated stack, nesting depth is bounded by memory rather
//! than by the call stack.
//!
//! Every byte is scanned by exactly one frame: a parent resumes after the
//! child's closing tag (or at the end of its own range when the child was
//! never closed). Text therefore reaches the buffer in document order and
//! each element's text is one contiguous run of it.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use sift_dom::{Document, DocumentBuilder, ElementData, NodeId, TextSpan};
use strum_macros::Display;

use crate::attributes::parse_attributes;
use crate::entities::decode_entities;
use crate::options::ParseOptions;
use crate::scanner::{CloserIndex, Markup, OpenTag, next_markup};
use crate::tags::TagKind;

/// Category of an anomaly the scanner absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// An element had no matching closing tag; its content ran to the end
    /// of the enclosing element.
    UnclosedElement,
    /// A `<name` with no `>` before the end of the enclosing element.
    UnterminatedTag,
    /// A stray closer, comment, doctype, or processing instruction that was
    /// dropped from text.
    SkippedMarkup,
    /// Input was cut to the configured byte limit.
    InputTruncated,
}

/// An anomaly encountered while building the tree.
///
/// Issues are informational. The tree is always produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What happened.
    pub kind: IssueKind,
    /// Byte offset into the (possibly truncated) input.
    pub offset: usize,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}: {}", self.kind, self.offset, self.message)
    }
}

/// Content of one open element still being scanned.
#[derive(Debug)]
struct Frame {
    node: NodeId,
    cursor: usize,
    end: usize,
    text_start: usize,
}

impl Frame {
    const fn new(node: NodeId, start: usize, end: usize, text_start: usize) -> Self {
        Self {
            node,
            cursor: start,
            end,
            text_start,
        }
    }
}

/// Byte range of `body` (starting at `offset`) with surrounding whitespace
/// removed.
fn trimmed_range(body: &str, offset: usize) -> Range<usize> {
    let start = offset + (body.len() - body.trim_start().len());
    start..start + body.trim().len()
}

/// Largest char boundary not above `limit`.
fn floor_char_boundary(input: &str, limit: usize) -> usize {
    if limit >= input.len() {
        return input.len();
    }
    let mut cut = limit;
    while !input.is_char_boundary(cut) {
        cut -= 1;
    }
    cut
}

/// Builds a [`Document`] from markup in one pass.
///
/// ```
/// use sift_html::TreeBuilder;
///
/// let doc = TreeBuilder::new("<ul><li>A</li><li>B</li></ul>").run();
/// assert_eq!(doc.get_elements_by_tag_name("li").len(), 2);
/// assert_eq!(doc.text_content(), "A B");
/// ```
pub struct TreeBuilder<'a> {
    input: &'a str,
    options: ParseOptions,
    document: DocumentBuilder,
    closers: Option<CloserIndex>,
    stack: Vec<Frame>,
    issues: Vec<ParseIssue>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder over `input` with default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            options: ParseOptions::default(),
            document: DocumentBuilder::new(),
            closers: None,
            stack: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Replace the parse options.
    #[must_use]
    pub const fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the tree.
    #[must_use]
    pub fn run(self) -> Document {
        self.run_with_issues().0
    }

    /// Build the tree and also return every anomaly that was absorbed.
    #[must_use]
    pub fn run_with_issues(mut self) -> (Document, Vec<ParseIssue>) {
        if let Some(limit) = self.options.max_input_bytes {
            let cut = floor_char_boundary(self.input, limit);
            if cut < self.input.len() {
                self.issue(
                    IssueKind::InputTruncated,
                    cut,
                    format!("input truncated from {} to {cut} bytes", self.input.len()),
                );
                self.input = &self.input[..cut];
            }
        }

        self.document = DocumentBuilder::with_source(self.input);
        self.closers = Some(CloserIndex::build(self.input, self.options.closer_matching));
        self.stack.push(Frame::new(NodeId::ROOT, 0, self.input.len(), 0));

        while !self.stack.is_empty() {
            self.step();
        }

        if self.options.decode_entities {
            self.document.for_each_element(decode_attributes);
        }

        (self.document.finish(), self.issues)
    }

    fn issue(&mut self, kind: IssueKind, offset: usize, message: String) {
        self.issues.push(ParseIssue {
            kind,
            offset,
            message,
        });
    }

    /// Write one raw text segment into the document's text buffer.
    fn push_text(&mut self, segment: &str) {
        for word in segment.split_whitespace() {
            if self.options.decode_entities {
                self.document.push_word(&decode_entities(word));
            } else {
                self.document.push_word(word);
            }
        }
    }

    /// Advance the innermost frame by one piece of markup.
    fn step(&mut self) {
        let input = self.input;
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let (cursor, end) = (frame.cursor, frame.end);

        match next_markup(input, cursor, end) {
            None => {
                self.push_text(&input[cursor..end]);
                self.set_cursor(end);
                self.close_frame();
            }
            Some(Markup::Skip(span)) => {
                self.push_text(&input[cursor..span.start]);
                self.set_cursor(span.end);
                let construct = &input[span.start..span.end];
                let preview: String = construct.chars().take(32).collect();
                self.issue(
                    IssueKind::SkippedMarkup,
                    span.start,
                    format!("skipped markup {preview:?}"),
                );
            }
            Some(Markup::Unterminated { start }) => {
                self.push_text(&input[cursor..start]);
                self.set_cursor(end);
                self.issue(
                    IssueKind::UnterminatedTag,
                    start,
                    "tag opener has no closing '>'".to_string(),
                );
            }
            Some(Markup::Open(tag)) => {
                self.push_text(&input[cursor..tag.start]);
                self.open_element(&tag);
            }
        }
    }

    /// Allocate the element for `tag` and arrange for its content to be
    /// scanned.
    fn open_element(&mut self, tag: &OpenTag<'a>) {
        let Some(frame) = self.stack.last() else {
            return;
        };
        let (parent, range_end) = (frame.node, frame.end);

        let kind = TagKind::classify(tag.name, tag.raw_attrs);
        let data = ElementData::new(tag.name, parse_attributes(tag.raw_attrs));
        let id = self.document.append_element(parent, data);

        if kind == TagKind::Void {
            self.set_cursor(tag.end);
            return;
        }

        let closer = self.closers.as_ref().and_then(|index| {
            index.find(tag.name, tag.end, range_end, self.options.closer_matching)
        });
        let (content_end, resume) = match closer {
            Some(span) => (span.start, span.end),
            None => {
                self.issue(
                    IssueKind::UnclosedElement,
                    tag.start,
                    format!("<{}> has no closing tag", tag.name),
                );
                (range_end, range_end)
            }
        };
        self.set_cursor(resume);

        let input = self.input;
        let body = &input[tag.end..content_end];
        if let Some(element) = self.document.element_mut(id) {
            element.inner_html = tag.end..content_end;
            if kind == TagKind::RawText {
                element.text_content = TextSpan::Source(trimmed_range(body, tag.end));
            }
        }

        if kind == TagKind::Container {
            let text_start = self.document.text_len();
            self.stack.push(Frame::new(id, tag.end, content_end, text_start));
        }
    }

    fn set_cursor(&mut self, position: usize) {
        if let Some(frame) = self.stack.last_mut() {
            frame.cursor = position;
        }
    }

    /// Pop the innermost frame and record the text written since it opened.
    fn close_frame(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.document.finish_text(frame.node, frame.text_start);
        }
    }
}

fn decode_attributes(element: &mut ElementData) {
    for value in element.attrs.values_mut() {
        if let Cow::Owned(decoded) = decode_entities(value) {
            *value = decoded;
        }
    }
}

/// Parse `markup` with default options.
///
/// Never fails: malformed or truncated markup yields a partial tree.
///
/// ```
/// let doc = sift_html::parse("<div><p>unclosed");
/// assert_eq!(doc.text_content(), "unclosed");
/// ```
#[must_use]
pub fn parse(markup: &str) -> Document {
    TreeBuilder::new(markup).run()
}

/// Parse `markup` with the given options.
#[must_use]
pub fn parse_with_options(markup: &str, options: ParseOptions) -> Document {
    TreeBuilder::new(markup).with_options(options).run()
}
