//! Multi-axis cascade resolution over per-context value maps.
//!
//! A block's styles live in a value map keyed by the (device, orientation,
//! pseudo-state) context triple, each axis carrying the generic `all`
//! sentinel alongside concrete keys. Resolution probes exactly eight
//! coordinates, most specific first; writes touch exactly one coordinate
//! and never write through the cascade.

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::fmt;
use style_definitions::StyleDefinitionRegistry;
use style_syntax::value_matches_shape;
use style_tokens::TokenTypeRegistry;

mod resolved;

pub use resolved::ResolvedStyle;

/// Generic sentinel matching any concrete selection on an axis.
pub const ALL: &str = "all";

/// One rendering situation: which device, orientation, and interaction
/// pseudo-state a value applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleContext {
    pub device: String,
    pub orientation: String,
    pub pseudo: String,
}

impl StyleContext {
    pub fn new(device: &str, orientation: &str, pseudo: &str) -> Self {
        Self {
            device: device.to_owned(),
            orientation: orientation.to_owned(),
            pseudo: pseudo.to_owned(),
        }
    }

    /// The fully generic context: `(all, all, all)`.
    pub fn generic() -> Self {
        Self::new(ALL, ALL, ALL)
    }
}

impl fmt::Display for StyleContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "({}, {}, {})",
            self.device, self.orientation, self.pseudo
        )
    }
}

/// Rejected write. The write is not committed; the caller decides whether
/// to surface the rejection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteError {
    /// The property key is not in the definition registry.
    UnknownProperty(String),
    /// The value matched none of the property's concrete shapes.
    InvalidValue { property: String, value: String },
}

impl fmt::Display for WriteError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty(property) => {
                write!(formatter, "unknown style property '{property}'")
            }
            Self::InvalidValue { property, value } => {
                write!(formatter, "value '{value}' is not valid for '{property}'")
            }
        }
    }
}

impl std::error::Error for WriteError {}

/// Per-block styles: a composite-key map from context triple to the
/// property values set at exactly that coordinate.
///
/// Writes are atomic single-coordinate updates; [`ValueMap::snapshot`]
/// clones the map so resolution observes either the full pre- or full
/// post-state of a write, never a partial one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueMap {
    coordinates: HashMap<StyleContext, HashMap<String, String>>,
    /// Property keys in first-write order, for deterministic flattening.
    property_order: Vec<String>,
}

impl ValueMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A stable copy for resolution while the original keeps mutating.
    #[inline]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Raw read of one exact coordinate; no cascade involved.
    pub fn get(&self, context: &StyleContext, property: &str) -> Option<&str> {
        self.coordinates
            .get(context)
            .and_then(|values| values.get(property))
            .map(String::as_str)
    }

    /// Write one exact coordinate without validation. Cascade writes go
    /// through [`set_style`], which validates first.
    pub fn write(&mut self, context: StyleContext, property: &str, value: &str) {
        if !self.property_order.iter().any(|seen| seen == property) {
            self.property_order.push(property.to_owned());
        }
        self.coordinates
            .entry(context)
            .or_default()
            .insert(property.to_owned(), value.to_owned());
    }

    /// Clear one exact coordinate. The empty entry is kept (distinct from
    /// never-set, for diagnostics) but resolution treats both the same.
    pub fn clear(&mut self, context: StyleContext, property: &str) {
        self.coordinates
            .entry(context)
            .or_default()
            .insert(property.to_owned(), String::new());
    }

    /// Property keys seen by this map, in first-write order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.property_order.iter().map(String::as_str)
    }
}

/// The eight probe coordinates for a concrete context, most specific
/// first. Exhaustive because each axis is binary: the concrete key or the
/// generic `all` sentinel.
fn probe_order(device: &str, orientation: &str, pseudo: &str) -> [StyleContext; 8] {
    [
        StyleContext::new(device, orientation, pseudo),
        StyleContext::new(device, orientation, ALL),
        StyleContext::new(device, ALL, pseudo),
        StyleContext::new(device, ALL, ALL),
        StyleContext::new(ALL, orientation, pseudo),
        StyleContext::new(ALL, orientation, ALL),
        StyleContext::new(ALL, ALL, pseudo),
        StyleContext::new(ALL, ALL, ALL),
    ]
}

/// Resolve the effective value of one property for one concrete context.
///
/// Probes the eight coordinates in priority order and returns the first
/// defined non-empty value. `None` means the property is absent for this
/// context — an expected outcome, not an error; callers decide whether to
/// fall back to the definition's default.
pub fn resolve_style(
    map: &ValueMap,
    property: &str,
    device: &str,
    orientation: &str,
    pseudo: &str,
) -> Option<String> {
    probe_order(device, orientation, pseudo)
        .iter()
        .find_map(|context| {
            map.get(context, property)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        })
}

/// Validate and write one exact coordinate.
///
/// The property must be registered and the value must match at least one
/// of its concrete shapes; the empty string is always accepted and means
/// "explicitly cleared".
///
/// # Errors
/// [`WriteError::UnknownProperty`] or [`WriteError::InvalidValue`]; the
/// map is unchanged on error.
pub fn set_style(
    map: &mut ValueMap,
    definitions: &StyleDefinitionRegistry,
    tokens: &TokenTypeRegistry,
    context: StyleContext,
    property: &str,
    value: &str,
) -> Result<(), WriteError> {
    let Some(shapes) = definitions.shapes(property) else {
        return Err(WriteError::UnknownProperty(property.to_owned()));
    };
    if !value.is_empty()
        && !shapes
            .iter()
            .any(|shape| value_matches_shape(value, shape, tokens))
    {
        return Err(WriteError::InvalidValue {
            property: property.to_owned(),
            value: value.to_owned(),
        });
    }
    map.write(context, property, value);
    Ok(())
}

/// Clear one exact coordinate; behaviorally equivalent to never-set for
/// resolution.
///
/// # Errors
/// [`WriteError::UnknownProperty`] when the property is not registered.
pub fn remove_style(
    map: &mut ValueMap,
    definitions: &StyleDefinitionRegistry,
    context: StyleContext,
    property: &str,
) -> Result<(), WriteError> {
    if definitions.get(property).is_none() {
        return Err(WriteError::UnknownProperty(property.to_owned()));
    }
    map.clear(context, property);
    Ok(())
}

/// Flatten a block's map for one concrete context: every property the map
/// has ever seen is resolved, and the ones that resolve to a value appear
/// in the output in first-write order.
pub fn resolved_style(map: &ValueMap, context: &StyleContext) -> ResolvedStyle {
    let mut resolved = ResolvedStyle::new();
    for property in map.properties() {
        if let Some(value) = resolve_style(
            map,
            property,
            &context.device,
            &context.orientation,
            &context.pseudo,
        ) {
            resolved.insert(property, &value);
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_specific_coordinate_wins() {
        let mut map = ValueMap::new();
        map.write(StyleContext::new("mobile", "portrait", "hover"), "color", "red");
        map.write(StyleContext::generic(), "color", "blue");
        assert_eq!(
            resolve_style(&map, "color", "mobile", "portrait", "hover"),
            Some("red".to_owned())
        );
        assert_eq!(
            resolve_style(&map, "color", "desktop", "landscape", "all"),
            Some("blue".to_owned())
        );
    }

    #[test]
    fn device_generic_beats_fully_generic() {
        let mut map = ValueMap::new();
        map.write(StyleContext::new("mobile", ALL, ALL), "width", "A");
        map.write(StyleContext::generic(), "width", "B");
        assert_eq!(
            resolve_style(&map, "width", "mobile", "portrait", "hover"),
            Some("A".to_owned())
        );
    }

    #[test]
    fn unresolved_is_absent_not_error() {
        let map = ValueMap::new();
        assert_eq!(resolve_style(&map, "color", "mobile", ALL, ALL), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        let mut map = ValueMap::new();
        map.write(StyleContext::new("mobile", ALL, "hover"), "color", "red");
        map.write(StyleContext::new(ALL, "portrait", ALL), "color", "green");
        let first = resolve_style(&map, "color", "mobile", "portrait", "hover");
        let second = resolve_style(&map, "color", "mobile", "portrait", "hover");
        assert_eq!(first, second);
        // Device-axis specificity outranks orientation-axis specificity.
        assert_eq!(first, Some("red".to_owned()));
    }

    #[test]
    fn cleared_value_does_not_mask_generic_coordinate() {
        let mut map = ValueMap::new();
        map.write(StyleContext::generic(), "color", "blue");
        map.clear(StyleContext::new("mobile", ALL, ALL), "color");
        assert_eq!(
            resolve_style(&map, "color", "mobile", "portrait", "all"),
            Some("blue".to_owned())
        );
        // The cleared entry is still tracked at its exact coordinate.
        assert_eq!(map.get(&StyleContext::new("mobile", ALL, ALL), "color"), Some(""));
    }

    #[test]
    fn snapshot_isolated_from_later_writes() {
        let mut map = ValueMap::new();
        map.write(StyleContext::generic(), "color", "blue");
        let snapshot = map.snapshot();
        map.write(StyleContext::generic(), "color", "red");
        assert_eq!(
            resolve_style(&snapshot, "color", "mobile", ALL, ALL),
            Some("blue".to_owned())
        );
        assert_eq!(
            resolve_style(&map, "color", "mobile", ALL, ALL),
            Some("red".to_owned())
        );
    }

    #[test]
    fn resolved_style_flattens_in_first_write_order() {
        let mut map = ValueMap::new();
        map.write(StyleContext::generic(), "width", "10px");
        map.write(StyleContext::generic(), "color", "red");
        map.write(StyleContext::new("mobile", ALL, ALL), "width", "20px");
        let resolved = resolved_style(&map, &StyleContext::new("mobile", "portrait", "all"));
        let pairs: Vec<(&str, &str)> = resolved.iter().collect();
        assert_eq!(pairs, vec![("width", "20px"), ("color", "red")]);
    }
}
