//! Element tree for the sift markup scanner.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. A parent
//! link is an index used for upward traversal only; the parent's `children`
//! list is the sole owner of a node, and the whole arena is released together
//! when the [`Document`] is dropped.
//!
//! There are no text nodes. The document keeps its source markup once and
//! one buffer of whitespace-normalized text written in document order. An
//! element's aggregated text is the contiguous run of that buffer covering
//! its descendants, so elements store byte ranges rather than copies and
//! memory stays linear in the input however deep the nesting goes.
//!
//! A [`Document`] is immutable once built. Construction goes through
//! [`DocumentBuilder`], which is what the scanner in `sift-html` drives.

mod snapshot;
mod view;

pub use snapshot::NodeSnapshot;
pub use view::{Descendants, NodeRef};

use std::collections::HashMap;
use std::ops::Range;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Tag name given to the synthetic root element of every [`Document`].
pub const ROOT_TAG_NAME: &str = "root";

/// A type-safe index into the element arena.
///
/// Nodes are allocated in the order their opening tags are scanned, so
/// comparing two ids compares their position in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic root element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Location of an element's text content inside its [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSpan {
    /// Run of the document's aggregated text buffer.
    Aggregated(Range<usize>),
    /// Run of the source markup, used for `script` and `style` bodies.
    Source(Range<usize>),
}

impl Default for TextSpan {
    fn default() -> Self {
        Self::Aggregated(0..0)
    }
}

/// Element-specific data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name exactly as written in the markup.
    pub tag_name: String,
    /// Attribute map. Names are lowercased by the scanner, values are verbatim.
    pub attrs: AttributesMap,
    /// Whitespace-normalized text of this element and its descendants,
    /// excluding `script` and `style` bodies.
    pub text_content: TextSpan,
    /// Byte range of the raw markup between the opening tag and its
    /// matching closing tag, into [`Document::source`].
    pub inner_html: Range<usize>,
}

impl ElementData {
    /// Create element data with no text or inner markup yet.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
            text_content: TextSpan::default(),
            inner_html: 0..0,
        }
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Iterate over the whitespace-separated tokens of the class attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .map(String::as_str)
            .unwrap_or_default()
            .split_whitespace()
    }

    /// Exact class-token membership; `"c"` does not match `class="card-c"`.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.classes().any(|class| class == name)
    }

    /// ASCII case-insensitive tag name comparison.
    #[must_use]
    pub fn tag_is(&self, name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(name)
    }

    /// Look up an attribute by name, ASCII case-insensitively.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.attrs.get(name) {
            return Some(value.as_str());
        }
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            return self
                .attrs
                .get(&name.to_ascii_lowercase())
                .map(String::as_str);
        }
        None
    }
}

/// A single element in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Tag name, attributes, and aggregated text.
    pub data: ElementData,
    /// Non-owning link to the parent; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Children in document order. This list owns its nodes.
    pub children: Vec<NodeId>,
}

/// Arena-based element tree produced by one parse call.
///
/// Index 0 ([`NodeId::ROOT`]) holds the synthetic root element named
/// [`ROOT_TAG_NAME`], whose children are the top-level parsed elements.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
    /// Markup the tree was built from.
    source: String,
    /// Normalized text of every element, in document order.
    text: String,
}

impl Document {
    /// Create a document holding only the root element.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            data: ElementData::new(ROOT_TAG_NAME, AttributesMap::new()),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            source: String::new(),
            text: String::new(),
        }
    }

    /// Markup the tree was built from, after any truncation.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resolve a text span of this document. Out-of-range spans are empty.
    #[must_use]
    pub fn text_of(&self, span: &TextSpan) -> &str {
        let (buffer, range) = match span {
            TextSpan::Aggregated(range) => (&self.text, range),
            TextSpan::Source(range) => (&self.source, range),
        };
        buffer.get(range.clone()).unwrap_or_default()
    }

    /// Resolve a byte range of the source markup. Out-of-range spans are
    /// empty.
    #[must_use]
    pub fn source_slice(&self, range: &Range<usize>) -> &str {
        self.source.get(range.clone()).unwrap_or_default()
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// View of the root element.
    #[must_use]
    pub const fn root_ref(&self) -> NodeRef<'_> {
        NodeRef::new(self, NodeId::ROOT)
    }

    /// View of any node, or `None` if the id is out of range.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.get(id).map(|_| NodeRef::new(self, id))
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the root exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get element data for a node.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).map(|n| &n.data)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Aggregated text of the whole document.
    #[must_use]
    pub fn text_content(&self) -> &str {
        self.root_ref().text_content()
    }

    /// First descendant of the root whose `id` attribute equals `id`.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef<'_>> {
        self.root_ref().get_element_by_id(id)
    }

    /// All elements carrying the exact class token `name`, in document order.
    #[must_use]
    pub fn get_elements_by_class_name(&self, name: &str) -> Vec<NodeRef<'_>> {
        self.root_ref().get_elements_by_class_name(name)
    }

    /// All elements whose tag name equals `name` case-insensitively.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, name: &str) -> Vec<NodeRef<'_>> {
        self.root_ref().get_elements_by_tag_name(name)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Write access to a [`Document`] while it is being built.
///
/// Elements must be appended in document order (the order their opening
/// tags appear) so that [`NodeId`] order stays equal to document order.
/// Text is written the same way: an element's aggregated text is whatever
/// was pushed between [`text_len`](Self::text_len) at its start and
/// [`finish_text`](Self::finish_text) at its end.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Start a new document containing only the root element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new document over `source`, which inner markup and raw text
    /// ranges point into.
    #[must_use]
    pub fn with_source(source: impl Into<String>) -> Self {
        let mut builder = Self::new();
        builder.document.source = source.into();
        builder
    }

    /// Append one word to the text buffer, separated from earlier text by
    /// a single space. Empty words are ignored.
    pub fn push_word(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        if !self.document.text.is_empty() {
            self.document.text.push(' ');
        }
        self.document.text.push_str(word);
    }

    /// Append `segment` with its whitespace runs collapsed.
    pub fn push_text(&mut self, segment: &str) {
        for word in segment.split_whitespace() {
            self.push_word(word);
        }
    }

    /// Current length of the text buffer; pass it to
    /// [`finish_text`](Self::finish_text) once the element is complete.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.document.text.len()
    }

    /// Set the aggregated text of `id` to everything pushed since `start`.
    pub fn finish_text(&mut self, id: NodeId, start: usize) {
        let end = self.document.text.len();
        // A separator is written at `start` exactly when text precedes it.
        let start = if start > 0 && start < end {
            start + 1
        } else {
            start.min(end)
        };
        if let Some(data) = self.element_mut(id) {
            data.text_content = TextSpan::Aggregated(start..end);
        }
    }

    /// Allocate a new element and append it as the last child of `parent`.
    ///
    /// An out-of-range `parent` attaches the element to the root instead.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let parent = if parent.0 < self.document.nodes.len() {
            parent
        } else {
            NodeId::ROOT
        };
        let id = NodeId(self.document.nodes.len());
        self.document.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.document.nodes[parent.0].children.push(id);
        id
    }

    /// Mutable access to an element's data, used to fill in text and markup
    /// once its content has been scanned.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.document.nodes.get_mut(id.0).map(|n| &mut n.data)
    }

    /// Read access to the partially built document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Apply `f` to every element's data, root included.
    pub fn for_each_element(&mut self, mut f: impl FnMut(&mut ElementData)) {
        for node in &mut self.document.nodes {
            f(&mut node.data);
        }
    }

    /// Finish building and hand out the immutable document.
    #[must_use]
    pub fn finish(self) -> Document {
        self.document
    }
}
