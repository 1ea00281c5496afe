//! Property key composition.

use std::fmt;

/// Invalid input to [`compose_style_key`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyError {
    /// A supplied segment (base, position, or suffix) was empty.
    EmptySegment,
}

impl fmt::Display for KeyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySegment => write!(formatter, "style key segments must be non-empty"),
        }
    }
}

impl std::error::Error for KeyError {}

/// Compose a property key from base, optional position, and optional
/// suffix: `base`, `base-suffix`, `base-position`, or
/// `base-position-suffix`. Pure, no side effects.
///
/// # Errors
/// [`KeyError::EmptySegment`] when the base, or any supplied optional
/// segment, is empty.
pub fn compose_style_key(
    base: &str,
    position: Option<&str>,
    suffix: Option<&str>,
) -> Result<String, KeyError> {
    if base.is_empty() || position == Some("") || suffix == Some("") {
        return Err(KeyError::EmptySegment);
    }
    let mut key = base.to_owned();
    if let Some(position) = position {
        key.push('-');
        key.push_str(position);
    }
    if let Some(suffix) = suffix {
        key.push('-');
        key.push_str(suffix);
    }
    Ok(key)
}
