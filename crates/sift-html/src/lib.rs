//! Forgiving HTML scanner and tree builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **Attribute parsing** for the raw text inside a tag
//! - **Tag classification** into void, raw-text, and container elements
//! - **Tree construction** in a single left-to-right pass with an explicit
//!   stack of open elements
//! - **Entity decoding** as an optional pass over extracted strings
//!
//! Parsing never fails. Malformed, truncated, or adversarial markup
//! produces a partial tree, and the anomalies can be inspected through
//! [`TreeBuilder::run_with_issues`].
//!
//! # Deliberately Not Implemented
//!
//! - Implicit tag closing (a second `<p>` does not close an open `<p>`)
//! - Comments, CDATA, and doctypes as node types (they are skipped)
//! - Character reference decoding during scanning

pub mod attributes;
pub mod builder;
pub mod entities;
pub mod options;
pub mod print;
pub mod tags;

mod scanner;

pub use attributes::parse_attributes;
pub use builder::{IssueKind, ParseIssue, TreeBuilder, parse, parse_with_options};
pub use options::{CloserMatching, ParseOptions};
pub use print::{format_tree, print_tree};
pub use tags::{TagKind, VoidElement};
