//! Parse configuration.

use strum_macros::{Display, EnumString};

/// How the scanner pairs an element with its closing tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CloserMatching {
    /// Take the first `</name>` after the opening tag, even if it belongs to
    /// a nested element of the same name. `<div><div></div></div>` closes the
    /// outer `div` at the first `</div>`.
    #[default]
    Nearest,
    /// Skip closers that pair with nested openers of the same name.
    Balanced,
}

/// Options for [`TreeBuilder`](crate::TreeBuilder).
///
/// The defaults reproduce the plain scanner: no entity decoding, nearest
/// closer matching, and no input cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Decode character references in text and attribute values after the
    /// tree is built.
    pub decode_entities: bool,
    /// Closing-tag pairing strategy.
    pub closer_matching: CloserMatching,
    /// Truncate input longer than this many bytes before scanning.
    pub max_input_bytes: Option<usize>,
}

impl ParseOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the entity-decoding pass.
    #[must_use]
    pub const fn decode_entities(mut self, enabled: bool) -> Self {
        self.decode_entities = enabled;
        self
    }

    /// Choose the closing-tag pairing strategy.
    #[must_use]
    pub const fn closer_matching(mut self, mode: CloserMatching) -> Self {
        self.closer_matching = mode;
        self
    }

    /// Cap the number of input bytes scanned.
    #[must_use]
    pub const fn max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }
}
