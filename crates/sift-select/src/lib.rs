//! Compound CSS selectors over sift documents.
//!
//! # Scope
//!
//! This crate implements:
//! - **Parsing** of whitespace-free compound tokens made of type, `.class`,
//!   `#id`, `[attr]`, `[attr=value]`, and `*` fragments
//! - **Evaluation** of a whitespace-separated list of such tokens as a
//!   union of their matches
//! - **[`Selectable`]**, the `query_selector` / `query_selector_all` entry
//!   points for [`sift_dom::Document`] and [`sift_dom::NodeRef`]
//!
//! # Deliberately Not Implemented
//!
//! - Combinators: whitespace separates independent tokens, it does not
//!   mean "descendant of"
//! - Pseudo-classes and pseudo-elements
//! - Attribute operators other than `=`
//!
//! Unsupported tokens are rejected with a [`SelectorError`] and match
//! nothing. Query entry points never fail.
//!
//! ```
//! use sift_select::Selectable;
//!
//! let doc = sift_html::parse("<ul><li>A</li><li class=on>B</li></ul>");
//! let items = doc.query_selector_all("li");
//! assert_eq!(items.len(), 2);
//! assert_eq!(doc.query_selector("li.on").map(|n| n.text_content()), Some("B"));
//! ```

pub mod error;
pub mod parser;
pub mod query;

pub use error::{FragmentKind, SelectorError};
pub use parser::{AttributeSelector, CompoundSelector, SimpleSelector};
pub use query::{Selectable, SelectorList};
