//! Matching literal values against concrete shapes.

use crate::parse::{Component, Shape};
use crate::separator::scan_parts;
use style_tokens::TokenTypeRegistry;

/// Whether a literal value fits one concrete shape.
///
/// The value is tokenized with the same separator scan used on shape
/// texts, then paired one-to-one with the shape's components: keywords
/// compare case-insensitively, function slots compare the call name, and
/// token slots delegate to the referenced token type under the
/// reference's numeric parameters. Separators must agree as well, so a
/// comma-joined value never satisfies a space-joined shape.
pub fn value_matches_shape(value: &str, shape: &Shape, registry: &TokenTypeRegistry) -> bool {
    let (parts, separators) = scan_parts(value);
    if parts.len() != shape.components.len() || separators != shape.separators {
        return false;
    }
    parts
        .iter()
        .zip(&shape.components)
        .all(|(part, component)| component_accepts(part, component, registry))
}

fn component_accepts(part: &str, component: &Component, registry: &TokenTypeRegistry) -> bool {
    match component {
        Component::Keyword(keyword) => part.eq_ignore_ascii_case(keyword),
        Component::Function { name } => part
            .find('(')
            .is_some_and(|open| part[..open].eq_ignore_ascii_case(name) && part.ends_with(')')),
        Component::Token(reference) => match registry.get(&reference.name) {
            Some(token_type) => token_type.matches(part, &reference.params),
            None => {
                // A grammar referencing an unregistered primitive cannot
                // accept anything; the loader warns about these at startup.
                log::debug!("no token type registered for <{}>", reference.name);
                false
            }
        },
    }
}
