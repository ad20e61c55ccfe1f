//! Selector evaluation against a subtree.
//!
//! A selector string is split on whitespace into independent tokens. Each
//! token collects its own matches and the results are concatenated in
//! token order, so `"a b"` means "nodes matching `a`, then nodes matching
//! `b`". A node that matches several tokens appears once per token.

use sift_dom::{Document, NodeRef};

use crate::error::SelectorError;
use crate::parser::{CompoundSelector, SimpleSelector};

impl CompoundSelector {
    /// Collect the descendants of `context` matching this compound, in
    /// document order.
    ///
    /// The primary fragment picks the candidates: an id looks up the first
    /// element carrying that id (at most one node), a class or tag uses
    /// the corresponding lookup, and an attribute or `*` scans every
    /// descendant. Remaining fragments filter that set.
    #[must_use]
    pub fn select<'a>(&self, context: NodeRef<'a>) -> Vec<NodeRef<'a>> {
        let Some((primary, rest)) = self.simple_selectors.split_first() else {
            return Vec::new();
        };

        let candidates: Vec<NodeRef<'a>> = match primary {
            SimpleSelector::Id(id) => context.get_element_by_id(id).into_iter().collect(),
            SimpleSelector::Class(name) => context.get_elements_by_class_name(name),
            SimpleSelector::Type(name) => context.get_elements_by_tag_name(name),
            SimpleSelector::Universal => context.descendants().collect(),
            SimpleSelector::Attribute(attr) => context
                .descendants()
                .filter(|node| attr.matches(node.data()))
                .collect(),
        };

        if rest.is_empty() {
            return candidates;
        }
        candidates
            .into_iter()
            .filter(|node| rest.iter().all(|s| s.matches(node.data())))
            .collect()
    }
}

/// A parsed selector string: one entry per whitespace-separated token.
///
/// Parsing never fails. Tokens that cannot be parsed are kept as errors
/// for the caller to report, and match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    /// Each token's parse result, in the order written.
    pub tokens: Vec<Result<CompoundSelector, SelectorError>>,
}

impl SelectorList {
    /// Parse a whitespace-separated list of compound selectors.
    ///
    /// ```
    /// use sift_select::SelectorList;
    ///
    /// let list = SelectorList::parse("li a:hover #main");
    /// assert_eq!(list.selectors().count(), 2);
    /// assert_eq!(list.errors().count(), 1);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut tokens: Vec<_> = raw.split_whitespace().map(CompoundSelector::parse).collect();
        if tokens.is_empty() {
            tokens.push(Err(SelectorError::Empty));
        }
        Self { tokens }
    }

    /// Successfully parsed compounds.
    pub fn selectors(&self) -> impl Iterator<Item = &CompoundSelector> {
        self.tokens.iter().filter_map(|t| t.as_ref().ok())
    }

    /// Errors for tokens that were rejected.
    pub fn errors(&self) -> impl Iterator<Item = &SelectorError> {
        self.tokens.iter().filter_map(|t| t.as_ref().err())
    }

    /// True when every token parsed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.tokens.iter().all(Result::is_ok)
    }

    /// All matches under `context`, token by token, duplicates kept.
    #[must_use]
    pub fn select<'a>(&self, context: NodeRef<'a>) -> Vec<NodeRef<'a>> {
        self.selectors()
            .flat_map(|compound| compound.select(context))
            .collect()
    }

    /// The match that comes first in document order, across all tokens.
    #[must_use]
    pub fn first<'a>(&self, context: NodeRef<'a>) -> Option<NodeRef<'a>> {
        self.selectors()
            .filter_map(|compound| compound.select(context).into_iter().next())
            .min_by_key(NodeRef::node_id)
    }

    /// Check if any token matches `node` itself.
    #[must_use]
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        self.selectors().any(|compound| compound.matches(node.data()))
    }
}

/// Selector entry points shared by documents and element views.
///
/// Queries search the descendants of the receiver. A document searches
/// every element; an element never matches itself.
pub trait Selectable<'a>: Sized {
    /// The node whose descendants are searched.
    fn scope(self) -> NodeRef<'a>;

    /// First match in document order, or `None`.
    fn query_selector(self, selector: &str) -> Option<NodeRef<'a>> {
        SelectorList::parse(selector).first(self.scope())
    }

    /// Every match, token by token, duplicates kept.
    fn query_selector_all(self, selector: &str) -> Vec<NodeRef<'a>> {
        SelectorList::parse(selector).select(self.scope())
    }
}

impl<'a> Selectable<'a> for &'a Document {
    fn scope(self) -> NodeRef<'a> {
        self.root_ref()
    }
}

impl<'a> Selectable<'a> for NodeRef<'a> {
    fn scope(self) -> NodeRef<'a> {
        self
    }
}
