//! Built-in match predicates for the primitive token types.

use crate::{OptionKind, TokenParams, TokenTypeDef, UnitDefinition};

/// The built-in token types in their canonical registration order.
///
/// Order matters for first-match classification: `integer` precedes
/// `number` so whole literals route to the integer widget, and both
/// precede `length` so a bare `0` is numeric rather than a unitless
/// length. `keyword` comes last as the catch-all for plain identifiers.
pub fn builtin_token_types(units: &[UnitDefinition]) -> Vec<TokenTypeDef> {
    let suffixes: Vec<String> = units.iter().map(|unit| unit.suffix.clone()).collect();
    vec![
        TokenTypeDef::new(
            "color",
            OptionKind::ColorPicker,
            Box::new(|value, _| matches_color(value)),
        ),
        TokenTypeDef::new(
            "integer",
            OptionKind::IntegerField,
            Box::new(|value, params| matches_integer(value, params)),
        ),
        TokenTypeDef::new(
            "number",
            OptionKind::NumberField,
            Box::new(|value, params| matches_number(value, params)),
        ),
        TokenTypeDef::new(
            "length",
            OptionKind::LengthField,
            Box::new(move |value, params| matches_length(value, &suffixes, params)),
        ),
        TokenTypeDef::new(
            "link",
            OptionKind::LinkField,
            Box::new(|value, _| matches_link(value)),
        ),
        TokenTypeDef::new(
            "function",
            OptionKind::FunctionEditor,
            Box::new(|value, _| matches_function(value)),
        ),
        TokenTypeDef::new(
            "keyword",
            OptionKind::KeywordSelect,
            Box::new(|value, _| matches_keyword(value)),
        ),
    ]
}

/// Hex, rgb()/hsl(), and named colors, delegated to `csscolorparser`.
fn matches_color(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    // csscolorparser accepts "transparent" and named colors, which is the
    // behavior the color picker expects.
    csscolorparser::parse(trimmed).is_ok()
}

fn matches_integer(value: &str, params: &TokenParams) -> bool {
    value
        .trim()
        .parse::<i64>()
        .is_ok_and(|parsed| params.contains(parsed as f64))
}

fn matches_number(value: &str, params: &TokenParams) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|parsed| parsed.is_finite() && params.contains(parsed))
}

/// A number followed by one of the registered unit suffixes. Unitless zero
/// is a valid length.
fn matches_length(value: &str, suffixes: &[String], params: &TokenParams) -> bool {
    let trimmed = value.trim();
    if trimmed == "0" {
        return params.contains(0.0);
    }
    suffixes.iter().any(|suffix| {
        trimmed
            .strip_suffix(suffix.as_str())
            .and_then(|magnitude| magnitude.parse::<f64>().ok())
            .is_some_and(|parsed| parsed.is_finite() && params.contains(parsed))
    })
}

/// `url(...)`, an http(s) URL, or a local anchor reference.
fn matches_link(value: &str) -> bool {
    let trimmed = value.trim();
    (trimmed.starts_with("url(") && trimmed.ends_with(')'))
        || trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || (trimmed.starts_with('#') && trimmed.len() > 1 && !trimmed.contains(char::is_whitespace))
}

/// `name(args)` with an identifier-shaped name and balanced outer parens.
fn matches_function(value: &str) -> bool {
    let trimmed = value.trim();
    let Some(open) = trimmed.find('(') else {
        return false;
    };
    let name = &trimmed[..open];
    !name.is_empty() && is_identifier(name) && trimmed.ends_with(')')
}

/// A plain identifier: starts alphabetic, continues with alphanumerics,
/// `-`, or `_`.
fn matches_keyword(value: &str) -> bool {
    is_identifier(value.trim())
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TokenParams {
        TokenParams::default()
    }

    #[test]
    fn color_matcher_accepts_hex_rgb_named() {
        assert!(matches_color("#fff"));
        assert!(matches_color("#ff8800cc"));
        assert!(matches_color("rgb(1, 2, 3)"));
        assert!(matches_color("rgba(1, 2, 3, 0.5)"));
        assert!(matches_color("rebeccapurple"));
        assert!(!matches_color("10px"));
    }

    #[test]
    fn length_matcher_requires_registered_unit() {
        let suffixes = vec!["px".to_owned(), "%".to_owned()];
        assert!(matches_length("10px", &suffixes, &params()));
        assert!(matches_length("50%", &suffixes, &params()));
        assert!(matches_length("0", &suffixes, &params()));
        assert!(!matches_length("10pt", &suffixes, &params()));
        assert!(!matches_length("px", &suffixes, &params()));
    }

    #[test]
    fn link_matcher_shapes() {
        assert!(matches_link("url(/assets/bg.png)"));
        assert!(matches_link("https://example.com/x.png"));
        assert!(matches_link("#section-2"));
        assert!(!matches_link("plain words"));
    }

    #[test]
    fn function_matcher_shapes() {
        assert!(matches_function("blur(4px)"));
        assert!(matches_function("translate(10px, 20px)"));
        assert!(!matches_function("(4px)"));
        assert!(!matches_function("blur"));
    }

    #[test]
    fn keyword_matcher_identifier_only() {
        assert!(matches_keyword("inline-block"));
        assert!(matches_keyword("auto"));
        assert!(!matches_keyword("10px"));
        assert!(!matches_keyword("two words"));
    }
}
