//! Compound selector parsing.
//!
//! A compound selector is one whitespace-free token such as
//! `div.card#main[data-id=7]`. Every fragment in it constrains the same
//! element. There are no combinators.

use std::iter::Peekable;
use std::str::CharIndices;

use sift_dom::ElementData;

use crate::error::{FragmentKind, SelectorError};

type Chars<'a> = Peekable<CharIndices<'a>>;

/// A single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Tag name, compared ASCII case-insensitively.
    ///
    /// Examples: `div`, `li`, `H1`
    Type(String),

    /// One exact token of the `class` attribute.
    ///
    /// Example: `.card` matches `class="card wide"` but not `class="cards"`
    Class(String),

    /// Exact `id` attribute value.
    ///
    /// Example: `#main`
    Id(String),

    /// Any element.
    ///
    /// Example: `*`
    Universal,

    /// Attribute presence or value.
    ///
    /// Examples: `[href]`, `[type=text]`, `[title="a b"]`
    Attribute(AttributeSelector),
}

/// Attribute conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]`: the attribute is present, with any value.
    Exists(String),

    /// `[attr=value]`: the attribute value is exactly `value`.
    Equals(String, String),
}

impl AttributeSelector {
    /// Check this condition against an element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Exists(name) => element.attribute(name).is_some(),
            Self::Equals(name, value) => element.attribute(name) == Some(value.as_str()),
        }
    }
}

impl SimpleSelector {
    /// Check this simple selector against an element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.tag_is(name),
            Self::Class(name) => element.has_class(name),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Universal => true,
            Self::Attribute(attr) => attr.matches(element),
        }
    }
}

/// A sequence of simple selectors that must all match one element.
///
/// The first simple selector is the primary one: it decides how the
/// candidate set is collected. The rest filter those candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors in the order they were written.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// Check if a character can start a tag name.
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

/// Check if a character can continue a name.
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit()
}

fn skip_whitespace(chars: &mut Chars<'_>) {
    while chars.peek().is_some_and(|&(_, ch)| ch.is_whitespace()) {
        let _ = chars.next();
    }
}

fn read_ident(chars: &mut Chars<'_>, first: Option<char>) -> String {
    let mut ident = first.map(String::from).unwrap_or_default();
    while let Some(&(_, ch)) = chars.peek() {
        if !is_ident_char(ch) {
            break;
        }
        ident.push(ch);
        let _ = chars.next();
    }
    ident
}

fn read_name(chars: &mut Chars<'_>, kind: FragmentKind) -> Result<String, SelectorError> {
    let name = read_ident(chars, None);
    if name.is_empty() {
        return Err(SelectorError::EmptyName { kind });
    }
    Ok(name)
}

/// Parse an attribute value after `=`. Quoted values may contain anything
/// except their own quote; bare values run to `]` or whitespace.
fn parse_attr_value(chars: &mut Chars<'_>) -> Result<String, SelectorError> {
    skip_whitespace(chars);

    match chars.peek() {
        None => Err(SelectorError::UnterminatedAttribute),
        Some(&(_, q @ ('"' | '\''))) => {
            let _ = chars.next();
            let mut value = String::new();
            for (_, ch) in chars.by_ref() {
                if ch == q {
                    return Ok(value);
                }
                value.push(ch);
            }
            Err(SelectorError::UnterminatedAttribute)
        }
        Some(&(position, ch)) => {
            let mut value = String::new();
            while let Some(&(_, ch)) = chars.peek() {
                if ch == ']' || ch.is_whitespace() {
                    break;
                }
                value.push(ch);
                let _ = chars.next();
            }
            if value.is_empty() {
                return Err(SelectorError::UnexpectedCharacter { ch, position });
            }
            Ok(value)
        }
    }
}

/// Parse the inside of `[...]`, with the opening bracket already consumed.
fn parse_attribute(chars: &mut Chars<'_>) -> Result<AttributeSelector, SelectorError> {
    skip_whitespace(chars);
    if chars.peek().is_none() {
        return Err(SelectorError::UnterminatedAttribute);
    }

    let name = read_name(chars, FragmentKind::Attribute)?.to_ascii_lowercase();
    skip_whitespace(chars);

    let selector = match chars.next() {
        None => return Err(SelectorError::UnterminatedAttribute),
        Some((_, ']')) => return Ok(AttributeSelector::Exists(name)),
        Some((_, '=')) => AttributeSelector::Equals(name, parse_attr_value(chars)?),
        Some((_, op @ ('~' | '|' | '^' | '$' | '*')))
            if chars.peek().map(|&(_, c)| c) == Some('=') =>
        {
            return Err(SelectorError::Unsupported {
                syntax: format!("[{name}{op}=]"),
            });
        }
        Some((position, ch)) => return Err(SelectorError::UnexpectedCharacter { ch, position }),
    };

    skip_whitespace(chars);
    match chars.next() {
        Some((_, ']')) => Ok(selector),
        Some((position, ch)) => Err(SelectorError::UnexpectedCharacter { ch, position }),
        None => Err(SelectorError::UnterminatedAttribute),
    }
}

impl CompoundSelector {
    /// Parse a single compound selector token.
    ///
    /// ```
    /// use sift_select::{CompoundSelector, SimpleSelector};
    ///
    /// let compound = CompoundSelector::parse("div.card#main").unwrap();
    /// assert_eq!(
    ///     compound.simple_selectors,
    ///     [
    ///         SimpleSelector::Type("div".to_string()),
    ///         SimpleSelector::Class("card".to_string()),
    ///         SimpleSelector::Id("main".to_string()),
    ///     ]
    /// );
    /// assert!(CompoundSelector::parse("a:hover").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] for empty input, malformed fragments, or
    /// syntax outside the supported subset (pseudo-classes, combinators,
    /// selector groups, attribute operators other than `=`).
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut chars = token.char_indices().peekable();
        let mut simple_selectors = Vec::new();

        while let Some((position, ch)) = chars.next() {
            let simple = match ch {
                '.' => SimpleSelector::Class(read_name(&mut chars, FragmentKind::Class)?),
                '#' => SimpleSelector::Id(read_name(&mut chars, FragmentKind::Id)?),
                '*' => SimpleSelector::Universal,
                '[' => SimpleSelector::Attribute(parse_attribute(&mut chars)?),
                ':' => {
                    return Err(SelectorError::Unsupported {
                        syntax: token[position..].to_string(),
                    });
                }
                '>' | '+' | '~' | ',' => {
                    return Err(SelectorError::Unsupported {
                        syntax: ch.to_string(),
                    });
                }
                _ if ch.is_whitespace() => {
                    return Err(SelectorError::Unsupported {
                        syntax: "descendant combinator".to_string(),
                    });
                }
                // A type selector can only lead the compound.
                _ if simple_selectors.is_empty() && is_ident_start_char(ch) => {
                    SimpleSelector::Type(read_ident(&mut chars, Some(ch)))
                }
                _ => return Err(SelectorError::UnexpectedCharacter { ch, position }),
            };
            simple_selectors.push(simple);
        }

        Ok(Self { simple_selectors })
    }

    /// Check if every simple selector matches the element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        self.simple_selectors.iter().all(|s| s.matches(element))
    }
}
