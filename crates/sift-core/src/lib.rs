//! Parse-and-query API for sift.
//!
//! # Scope
//!
//! This crate provides:
//! - **Parsing** - turn a markup string into a [`Document`], never failing
//! - **Querying** - `query_selector` / `query_selector_all` through the
//!   [`Selectable`] trait, plus id/class/tag lookups on every node
//! - **Diagnostics** - the anomalies the tree builder absorbed, on request
//!
//! # Not Provided
//!
//! - Network fetching, caching, or any other I/O
//! - Mutation of a parsed tree
//! - Script execution
//!
//! ```
//! use sift_core::prelude::*;
//!
//! let doc = sift_core::parse(r#"<div id="main" class="card"><p>Hi</p></div>"#);
//! assert_eq!(doc.query_selector("#main"), doc.query_selector(".card"));
//! assert_eq!(doc.text_content(), "Hi");
//! ```

pub use sift_dom as dom;
pub use sift_html as html;
pub use sift_select as select;

pub use sift_dom::{Document, NodeId, NodeRef, NodeSnapshot};
pub use sift_html::{CloserMatching, IssueKind, ParseIssue, ParseOptions};
pub use sift_select::{Selectable, SelectorError, SelectorList};

use sift_html::TreeBuilder;

/// Items most callers need, for glob import.
pub mod prelude {
    pub use sift_dom::{Document, NodeRef};
    pub use sift_html::ParseOptions;
    pub use sift_select::Selectable;
}

/// Parse `markup` into a document with default options.
///
/// Malformed, truncated, or empty input yields a partial or empty tree.
#[must_use]
pub fn parse(markup: &str) -> Document {
    sift_html::parse(markup)
}

/// Parse `markup` with explicit options.
#[must_use]
pub fn parse_with_options(markup: &str, options: ParseOptions) -> Document {
    sift_html::parse_with_options(markup, options)
}

/// Parse `markup` and also return every anomaly the builder absorbed.
#[must_use]
pub fn parse_with_issues(markup: &str, options: ParseOptions) -> (Document, Vec<ParseIssue>) {
    TreeBuilder::new(markup).with_options(options).run_with_issues()
}
