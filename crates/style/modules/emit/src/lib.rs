//! Serializing resolved styles into injectable CSS text.

#![forbid(unsafe_code)]

use std::fmt::Write as _;
use style_cascade::{ALL, ResolvedStyle};

/// Identifier-based selector for a block, with a pseudo-class suffix
/// unless the pseudo key is the generic sentinel:
/// `selector_for("block-7", "hover")` is `#block-7:hover`.
pub fn selector_for(block_id: &str, pseudo: &str) -> String {
    if pseudo == ALL || pseudo.is_empty() {
        format!("#{block_id}")
    } else {
        format!("#{block_id}:{pseudo}")
    }
}

/// Serialize a flat style into `property: value;` lines.
///
/// Keys are already kebab-case by composition; empty values are skipped;
/// insertion order is preserved, not sorted.
pub fn declarations_for(style: &ResolvedStyle, indent: &str) -> String {
    let mut out = String::new();
    for (property, value) in style.iter() {
        if value.is_empty() {
            continue;
        }
        // Infallible for String targets.
        let _ = writeln!(out, "{indent}{property}: {value};");
    }
    out
}

/// Wrap declarations in a selector block. An empty style produces empty
/// output rather than an empty rule.
pub fn rule_for(selector: &str, style: &ResolvedStyle, indent: &str) -> String {
    let declarations = declarations_for(style, indent);
    if declarations.is_empty() {
        return String::new();
    }
    format!("{selector} {{\n{declarations}}}\n")
}
