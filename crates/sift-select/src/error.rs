//! Selector parse errors.

use strum_macros::Display;
use thiserror::Error;

/// Fragment that requires a name after its sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FragmentKind {
    /// `.name`
    Class,
    /// `#name`
    Id,
    /// `[name]`
    Attribute,
}

/// Why a selector token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector contained nothing but whitespace.
    #[error("empty selector")]
    Empty,

    /// A character that cannot start or continue any supported fragment.
    #[error("unexpected character {ch:?} at byte {position}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset within the token.
        position: usize,
    },

    /// `[` without a closing `]`, or a quoted value without its closing
    /// quote.
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,

    /// A `.`, `#`, or `[` with no name after it.
    #[error("{kind} selector has no name")]
    EmptyName {
        /// Which fragment was missing its name.
        kind: FragmentKind,
    },

    /// Valid CSS that this engine deliberately does not evaluate:
    /// pseudo-classes, combinators, selector groups, and attribute
    /// operators other than `=`.
    #[error("unsupported selector syntax {syntax:?}")]
    Unsupported {
        /// The rejected syntax as written.
        syntax: String,
    },
}
