//! Tag classification.
//!
//! There are exactly three behaviors: void elements never have children,
//! raw-text elements keep their body unparsed, and everything else scans
//! for a closing tag.

use strum_macros::{Display, EnumString};

/// The closed set of element names that never take children or a closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoidElement {
    /// `<area>`
    Area,
    /// `<base>`
    Base,
    /// `<br>`
    Br,
    /// `<col>`
    Col,
    /// `<embed>`
    Embed,
    /// `<hr>`
    Hr,
    /// `<img>`
    Img,
    /// `<input>`
    Input,
    /// `<link>`
    Link,
    /// `<meta>`
    Meta,
    /// `<param>`
    Param,
    /// `<source>`
    Source,
    /// `<track>`
    Track,
    /// `<wbr>`
    Wbr,
}

/// Elements whose body is kept verbatim and excluded from ancestor text.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// How the tree builder treats a freshly opened tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TagKind {
    /// Childless; scanning resumes right after the tag.
    Void,
    /// Body runs to the closer but is not parsed into children.
    RawText,
    /// Body is scanned recursively for children.
    Container,
}

impl TagKind {
    /// Classify a tag from its name and the raw text after the name.
    ///
    /// A trailing `/` in the attribute text (`<x-icon />`) makes any tag void.
    #[must_use]
    pub fn classify(name: &str, raw_attrs: &str) -> Self {
        if name.parse::<VoidElement>().is_ok() || raw_attrs.trim_end().ends_with('/') {
            Self::Void
        } else if RAW_TEXT_ELEMENTS
            .iter()
            .any(|raw| name.eq_ignore_ascii_case(raw))
        {
            Self::RawText
        } else {
            Self::Container
        }
    }
}
