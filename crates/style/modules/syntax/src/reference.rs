//! Token references: `<name>` with optional bracketed numeric parameters.

use crate::SyntaxError;
use style_tokens::TokenParams;

/// A named reference inside a grammar, resolved later against a token
/// type (or an alias definition during expansion).
#[derive(Clone, Debug, PartialEq)]
pub struct TokenReference {
    pub name: String,
    pub params: TokenParams,
}

impl TokenReference {
    /// Render back to grammar text, without parameters.
    #[inline]
    pub fn token_text(&self) -> String {
        format!("<{}>", self.name)
    }
}

/// Parse `<length>`, `<number [0,1]>`, or `<length [0,100,5]>` (min, max,
/// optional step). The surrounding angle brackets are required.
///
/// # Errors
/// [`SyntaxError::MalformedReference`] when the text is not a well-formed
/// reference.
pub fn parse_token_reference(text: &str) -> Result<TokenReference, SyntaxError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .ok_or_else(|| SyntaxError::MalformedReference(trimmed.to_owned()))?
        .trim();
    if inner.is_empty() {
        return Err(SyntaxError::MalformedReference(trimmed.to_owned()));
    }

    let (name, params_text) = match inner.split_once('[') {
        Some((head, tail)) => {
            let body = tail
                .strip_suffix(']')
                .ok_or_else(|| SyntaxError::MalformedReference(trimmed.to_owned()))?;
            (head.trim(), Some(body))
        }
        None => (inner, None),
    };
    if name.is_empty() || !is_token_name(name) {
        return Err(SyntaxError::MalformedReference(trimmed.to_owned()));
    }

    let mut params = TokenParams::default();
    if let Some(body) = params_text {
        let values: Vec<&str> = body.split(',').map(str::trim).collect();
        if values.len() < 2 || values.len() > 3 {
            return Err(SyntaxError::MalformedReference(trimmed.to_owned()));
        }
        params.min = Some(parse_bound(values[0], trimmed)?);
        params.max = Some(parse_bound(values[1], trimmed)?);
        if let Some(step_text) = values.get(2) {
            params.step = Some(parse_bound(step_text, trimmed)?);
        }
        if let (Some(min), Some(max)) = (params.min, params.max)
            && min > max
        {
            return Err(SyntaxError::MalformedReference(trimmed.to_owned()));
        }
    }

    Ok(TokenReference {
        name: name.to_owned(),
        params,
    })
}

fn parse_bound(text: &str, reference: &str) -> Result<f64, SyntaxError> {
    text.parse::<f64>()
        .map_err(|_| SyntaxError::MalformedReference(reference.to_owned()))
}

fn is_token_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reference() {
        let reference = parse_token_reference("<color>").expect("parses");
        assert_eq!(reference.name, "color");
        assert_eq!(reference.params, TokenParams::default());
    }

    #[test]
    fn reference_with_range() {
        let reference = parse_token_reference("<number [0,1]>").expect("parses");
        assert_eq!(reference.name, "number");
        assert_eq!(reference.params.min, Some(0.0));
        assert_eq!(reference.params.max, Some(1.0));
        assert_eq!(reference.params.step, None);
    }

    #[test]
    fn reference_with_step() {
        let reference = parse_token_reference("<length [0,100,5]>").expect("parses");
        assert_eq!(reference.params.step, Some(5.0));
    }

    #[test]
    fn malformed_references_rejected() {
        for text in ["color", "<>", "<number [0]>", "<number [1,0]>", "<number [a,b]>"] {
            assert!(
                parse_token_reference(text).is_err(),
                "'{text}' should be rejected"
            );
        }
    }
}
