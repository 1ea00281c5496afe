//! Top-level separator extraction.
//!
//! Token references and whole function calls (nested parens included) are
//! opaque during the scan, so punctuation inside `rgba(1,2,3,0.5)` or
//! `<length [0,10]>` is never mistaken for a join separator.

use crate::parse::Shape;

/// The separator characters recognized between shape components.
pub const SEPARATORS: [char; 3] = [' ', ',', '/'];

#[inline]
fn is_separator(ch: char) -> bool {
    SEPARATORS.contains(&ch)
}

/// Split a shape or value text into its top-level component substrings and
/// the separators between them. A separator run containing `/` records
/// `/`, a run containing `,` records `,`, an all-space run records `' '`.
pub(crate) fn scan_parts(text: &str) -> (Vec<String>, Vec<char>) {
    let chars: Vec<char> = text.chars().collect();
    let mut parts: Vec<String> = Vec::new();
    let mut separators: Vec<char> = Vec::new();
    let mut index = 0;
    let mut pending_separator: Option<char> = None;

    while index < chars.len() {
        if is_separator(chars[index]) {
            let mut run = ' ';
            while index < chars.len() && is_separator(chars[index]) {
                match chars[index] {
                    '/' => run = '/',
                    ',' if run == ' ' => run = ',',
                    _ => {}
                }
                index += 1;
            }
            if !parts.is_empty() {
                pending_separator = Some(run);
            }
            continue;
        }

        let start = index;
        let mut paren_depth = 0i32;
        while index < chars.len() {
            let ch = chars[index];
            if ch == '(' {
                paren_depth += 1;
            } else if ch == ')' {
                paren_depth = (paren_depth - 1).max(0);
            } else if ch == '<' && paren_depth == 0 {
                // Opaque token reference; skip through its closer.
                while index < chars.len() && chars[index] != '>' {
                    index += 1;
                }
                if index < chars.len() {
                    index += 1;
                }
                continue;
            } else if paren_depth == 0 && is_separator(ch) {
                break;
            }
            index += 1;
        }
        if let Some(separator) = pending_separator.take() {
            separators.push(separator);
        }
        parts.push(chars[start..index].iter().collect());
    }

    (parts, separators)
}

/// Derive the ordered top-level separators of a shape or value text.
///
/// `extract_separator("10px 20px / 30px")` is `[' ', '/']`;
/// `extract_separator("rgba(1,2,3,0.5)")` is `[]`.
pub fn extract_separator(text: &str) -> Vec<char> {
    scan_parts(text).1
}

/// Map [`extract_separator`] over many shapes, preserving shape order.
pub fn extract_separators(shapes: &[Shape]) -> Vec<Vec<char>> {
    shapes
        .iter()
        .map(|shape| extract_separator(&shape.text))
        .collect()
}
