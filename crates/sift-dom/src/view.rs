//! Read-only traversal handle over a [`Document`].

use std::fmt;
use std::ptr;

use crate::{AncestorIterator, AttributesMap, Document, ElementData, NodeId};

/// A borrowed view of one element: the document plus an index into it.
///
/// All lookups (`get_element_by_id` and friends) search the element's
/// descendants depth-first in document order; the element itself is never
/// part of its own results.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) const fn new(document: &'a Document, id: NodeId) -> Self {
        Self { document, id }
    }

    /// Arena index of this node.
    #[must_use]
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// The document this node belongs to.
    #[must_use]
    pub const fn document(&self) -> &'a Document {
        self.document
    }

    /// True for the synthetic document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    /// Full element data.
    ///
    /// # Panics
    ///
    /// Never in practice: a `NodeRef` is only created for ids inside its
    /// document's arena.
    #[must_use]
    pub fn data(&self) -> &'a ElementData {
        &self.document.nodes[self.id.0].data
    }

    /// Tag name with its original case.
    #[must_use]
    pub fn tag_name(&self) -> &'a str {
        &self.data().tag_name
    }

    /// Aggregated, whitespace-normalized text.
    #[must_use]
    pub fn text_content(&self) -> &'a str {
        self.document.text_of(&self.data().text_content)
    }

    /// Raw markup between the opening and closing tag.
    #[must_use]
    pub fn inner_html(&self) -> &'a str {
        self.document.source_slice(&self.data().inner_html)
    }

    /// All attributes of this element.
    #[must_use]
    pub fn attributes(&self) -> &'a AttributesMap {
        &self.data().attrs
    }

    /// Value of the named attribute, if present.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&'a str> {
        self.data().attribute(name)
    }

    /// Whether the named attribute is present (valueless attributes count).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Value of the `id` attribute.
    #[must_use]
    pub fn element_id(&self) -> Option<&'a str> {
        self.data().id()
    }

    /// Class tokens of this element.
    pub fn classes(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.data().classes()
    }

    /// Exact class-token membership.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.data().has_class(name)
    }

    /// Parent element, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.document
            .parent(self.id)
            .map(|id| Self::new(self.document, id))
    }

    /// Direct children in document order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let document = self.document;
        document
            .children(self.id)
            .iter()
            .map(move |&id| NodeRef::new(document, id))
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let document = self.document;
        AncestorIterator {
            tree: document,
            current: document.parent(self.id),
        }
        .map(move |id| NodeRef::new(document, id))
    }

    /// Depth-first, left-to-right iterator over all descendants.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants::new(self.document, self.id)
    }

    /// First descendant whose `id` attribute equals `id` exactly.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<Self> {
        self.descendants().find(|node| node.element_id() == Some(id))
    }

    /// Descendants whose class attribute contains the exact token `name`.
    #[must_use]
    pub fn get_elements_by_class_name(&self, name: &str) -> Vec<Self> {
        self.descendants().filter(|node| node.has_class(name)).collect()
    }

    /// Descendants whose tag name equals `name`, ignoring ASCII case.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, name: &str) -> Vec<Self> {
        self.descendants()
            .filter(|node| node.data().tag_is(name))
            .collect()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag_name", &self.tag_name())
            .finish()
    }
}

/// Pre-order iterator over the descendants of a node.
///
/// Uses an explicit stack, so arbitrarily deep trees are walked without
/// recursion.
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    fn new(document: &'a Document, start: NodeId) -> Self {
        let stack = document.children(start).iter().rev().copied().collect();
        Self { document, stack }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children(id).iter().rev().copied());
        Some(NodeRef::new(self.document, id))
    }
}
