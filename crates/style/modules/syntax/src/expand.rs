//! Alias expansion: rewriting token-of-tokens references to primitive form.

use crate::SyntaxError;
use std::collections::HashMap;

/// Raw alias table: token name to its raw grammar text, e.g.
/// `filter-function` -> `blur(<length>)|brightness(<number>)`.
pub type TokenAliases = HashMap<String, String>;

/// Substitute every token reference that has an alias definition with that
/// definition's raw text, repeated until only primitive references remain.
///
/// A definition containing top-level alternation is wrapped in `[...]` on
/// substitution so the surrounding grammar keeps its structure. A visited
/// stack is carried per expansion path; revisiting an alias before hitting
/// a primitive is a cycle.
///
/// # Errors
/// [`SyntaxError::CyclicToken`] on cyclic definitions,
/// [`SyntaxError::Unbalanced`] when a reference never closes.
pub fn expand_tokens(raw: &str, aliases: &TokenAliases) -> Result<String, SyntaxError> {
    expand_internal(raw, aliases, &mut Vec::new())
}

fn expand_internal(
    text: &str,
    aliases: &TokenAliases,
    stack: &mut Vec<String>,
) -> Result<String, SyntaxError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let (head, tail) = rest.split_at(open);
        out.push_str(head);
        let Some(close) = tail.find('>') else {
            return Err(SyntaxError::Unbalanced {
                delimiter: '<',
                text: text.to_owned(),
            });
        };
        let inner = &tail[1..close];
        let name = inner
            .split(|ch: char| ch == ' ' || ch == '[')
            .next()
            .unwrap_or(inner)
            .trim();
        if let Some(definition) = aliases.get(name) {
            if stack.iter().any(|seen| seen == name) {
                let mut path = stack.clone();
                path.push(name.to_owned());
                return Err(SyntaxError::CyclicToken { path });
            }
            stack.push(name.to_owned());
            let expanded = expand_internal(definition, aliases, stack)?;
            stack.pop();
            if needs_grouping(&expanded) {
                out.push('[');
                out.push_str(&expanded);
                out.push(']');
            } else {
                out.push_str(&expanded);
            }
        } else {
            // Primitive reference; kept verbatim, parameters included.
            out.push('<');
            out.push_str(inner);
            out.push('>');
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Whether substituted text must be bracket-wrapped to keep its binding
/// at the substitution site: a top-level `|`, or a top-level separator (a
/// multi-component sequence, which a trailing repetition would otherwise
/// split).
fn needs_grouping(text: &str) -> bool {
    let mut bracket_depth = 0i32;
    let mut paren_depth = 0i32;
    let mut in_token = false;
    for ch in text.trim().chars() {
        match ch {
            '<' if !in_token => in_token = true,
            '>' if in_token => in_token = false,
            _ if in_token => {}
            '[' => bracket_depth += 1,
            ']' => bracket_depth -= 1,
            '(' => paren_depth += 1,
            ')' => paren_depth -= 1,
            '|' | ' ' | ',' | '/' if bracket_depth == 0 && paren_depth == 0 => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(entries: &[(&str, &str)]) -> TokenAliases {
        entries
            .iter()
            .map(|(name, def)| ((*name).to_owned(), (*def).to_owned()))
            .collect()
    }

    #[test]
    fn primitive_references_pass_through() {
        let table = aliases(&[]);
        let expanded = expand_tokens("none|<number [0,1]>", &table).expect("expands");
        assert_eq!(expanded, "none|<number [0,1]>");
    }

    #[test]
    fn alias_substituted_with_grouping() {
        let table = aliases(&[("filter-function", "blur(<length>)|brightness(<number>)")]);
        let expanded = expand_tokens("none|<filter-function>+", &table).expect("expands");
        assert_eq!(expanded, "none|[blur(<length>)|brightness(<number>)]+");
    }

    #[test]
    fn nested_aliases_expand_to_fixed_point() {
        let table = aliases(&[
            ("outer", "<inner> <inner>"),
            ("inner", "<length>|<number>"),
        ]);
        let expanded = expand_tokens("<outer>", &table).expect("expands");
        assert_eq!(expanded, "[[<length>|<number>] [<length>|<number>]]");
    }

    #[test]
    fn multi_component_alias_grouped_under_repetition() {
        let table = aliases(&[("shadow", "<length> <length> <color>")]);
        let expanded = expand_tokens("none|<shadow>+", &table).expect("expands");
        assert_eq!(expanded, "none|[<length> <length> <color>]+");
    }

    #[test]
    fn direct_cycle_reports_path() {
        let table = aliases(&[("a", "<a>")]);
        let error = expand_tokens("<a>", &table).expect_err("cycle is fatal");
        assert_eq!(
            error,
            SyntaxError::CyclicToken {
                path: vec!["a".to_owned(), "a".to_owned()]
            }
        );
    }

    #[test]
    fn indirect_cycle_reports_path_in_order() {
        let table = aliases(&[("a", "<b>"), ("b", "<c>"), ("c", "<a>")]);
        let error = expand_tokens("<a>", &table).expect_err("cycle is fatal");
        let SyntaxError::CyclicToken { path } = error else {
            panic!("expected cyclic token error");
        };
        assert_eq!(path, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn unclosed_reference_is_unbalanced() {
        let table = aliases(&[]);
        let error = expand_tokens("<number", &table).expect_err("must fail");
        assert!(matches!(error, SyntaxError::Unbalanced { delimiter: '<', .. }));
    }
}
