//! Value-definition micro-grammar for style properties.
//!
//! A property's grammar is a small string language built from keywords,
//! token references (`<color>`, `<length [0,10]>`), function calls,
//! alternation (`|`), grouping (`[...]`), and repetition (`+`, `*`, `?`,
//! `{min,max}`). This crate expands named token references to primitive
//! form, parses expanded grammars into concrete alternative [`Shape`]s,
//! extracts top-level separators, and matches literal values against
//! shapes.

#![forbid(unsafe_code)]

use std::fmt;

mod expand;
mod matching;
mod parse;
mod reference;
mod separator;

pub use expand::{TokenAliases, expand_tokens};
pub use matching::value_matches_shape;
pub use parse::{Component, MAX_REPEAT, Shape, parse_syntax};
pub use reference::{TokenReference, parse_token_reference};
pub use separator::{SEPARATORS, extract_separator, extract_separators};

/// Grammar-level failure. All variants are configuration errors: they are
/// raised when a seed grammar is loaded, never when a user value is merely
/// unmatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxError {
    /// A token alias expands, directly or indirectly, through itself.
    /// The path lists the alias names in expansion order, ending with the
    /// name that closed the cycle.
    CyclicToken { path: Vec<String> },
    /// An opening delimiter has no matching closer.
    Unbalanced { delimiter: char, text: String },
    /// A token reference is not of the form `<name>` or `<name [a,b]>`.
    MalformedReference(String),
    /// A `{min,max}` suffix with non-numeric or inverted bounds.
    BadRepetition(String),
    /// An alternation branch with no content, e.g. `a||b`.
    EmptyAlternative(String),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CyclicToken { path } => {
                write!(formatter, "cyclic token expansion: {}", path.join(" -> "))
            }
            Self::Unbalanced { delimiter, text } => {
                write!(formatter, "unbalanced '{delimiter}' in grammar '{text}'")
            }
            Self::MalformedReference(text) => {
                write!(formatter, "malformed token reference '{text}'")
            }
            Self::BadRepetition(text) => {
                write!(formatter, "bad repetition bounds '{text}'")
            }
            Self::EmptyAlternative(text) => {
                write!(formatter, "empty alternation branch in '{text}'")
            }
        }
    }
}

impl std::error::Error for SyntaxError {}
