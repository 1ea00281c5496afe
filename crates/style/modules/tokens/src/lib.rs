//! Token type classification for style value grammars.
//!
//! A token type is the validator for a family of literal values: the
//! `color` type matches hex/rgb/hsl strings, the `length` type matches
//! dimensions with a registered unit suffix, and so on. Classification is
//! first-match over registration order, implemented as an ordered list of
//! predicates rather than dynamic dispatch.

#![forbid(unsafe_code)]

use std::fmt;

mod matchers;

pub use matchers::builtin_token_types;

/// Numeric constraints attached to a token reference in a grammar,
/// extracted from bracket syntax such as `<number [0,1]>`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TokenParams {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl TokenParams {
    /// Whether a numeric value satisfies the min/max bounds.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Editor widget family a token type routes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    ColorPicker,
    IntegerField,
    NumberField,
    LengthField,
    KeywordSelect,
    LinkField,
    FunctionEditor,
}

/// Descriptor handed to property editors so they can pick and configure
/// the widget for a token-typed value slot.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionDescriptor {
    /// Token string this option stands for, e.g. `<color>`.
    pub token: String,
    pub kind: OptionKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

/// A unit suffix accepted by the `length` token type, e.g. `px` or `%`.
///
/// Units are injected at registry construction from the seed tables; the
/// matcher itself is unit-agnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitDefinition {
    pub suffix: String,
    pub description: String,
}

impl UnitDefinition {
    #[inline]
    pub fn new(suffix: &str, description: &str) -> Self {
        Self {
            suffix: suffix.to_owned(),
            description: description.to_owned(),
        }
    }
}

/// Predicate deciding whether a literal value belongs to a token type,
/// under the numeric constraints of the referencing grammar token.
pub type TokenMatcher = Box<dyn Fn(&str, &TokenParams) -> bool>;

/// Validator/classifier for one family of literal values.
pub struct TokenTypeDef {
    name: String,
    kind: OptionKind,
    matcher: TokenMatcher,
}

impl fmt::Debug for TokenTypeDef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TokenTypeDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl TokenTypeDef {
    /// Create a token type from a name, widget kind, and match predicate.
    pub fn new(name: &str, kind: OptionKind, matcher: TokenMatcher) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            matcher,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Whether `value` is a member of this type under `params`.
    #[inline]
    pub fn matches(&self, value: &str, params: &TokenParams) -> bool {
        (self.matcher)(value, params)
    }

    /// The `<name>` token string for `value`, or `None` when the value is
    /// not a member of this type.
    pub fn canonical_token(&self, value: &str) -> Option<String> {
        self.matches(value, &TokenParams::default())
            .then(|| format!("<{}>", self.name))
    }

    /// Build the editor option descriptor for a reference to this type.
    pub fn make_option(&self, params: &TokenParams) -> OptionDescriptor {
        OptionDescriptor {
            token: format!("<{}>", self.name),
            kind: self.kind,
            min: params.min,
            max: params.max,
            step: params.step,
        }
    }
}

/// Registration failure for the token type registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenRegistryError {
    /// A type with this name is already registered.
    Duplicate(String),
}

impl fmt::Display for TokenRegistryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(name) => {
                write!(formatter, "token type '{name}' is already registered")
            }
        }
    }
}

impl std::error::Error for TokenRegistryError {}

/// Ordered collection of token types with first-match classification.
///
/// At most one registered type classifies a given concrete value under the
/// first-match policy; ties are broken by registration order.
#[derive(Debug, Default)]
pub struct TokenTypeRegistry {
    types: Vec<TokenTypeDef>,
}

impl TokenTypeRegistry {
    #[inline]
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Registry pre-populated with the built-in token types, with `length`
    /// recognizing the given unit suffixes.
    pub fn with_builtin_types(units: &[UnitDefinition]) -> Self {
        let mut registry = Self::new();
        for def in builtin_token_types(units) {
            // Built-in names are distinct by construction.
            if let Err(error) = registry.register(def) {
                log::warn!("skipping built-in token type: {error}");
            }
        }
        registry
    }

    /// Register a token type definition.
    ///
    /// # Errors
    /// Returns [`TokenRegistryError::Duplicate`] when a type with the same
    /// name already exists; the registry is left unchanged.
    pub fn register(&mut self, def: TokenTypeDef) -> Result<(), TokenRegistryError> {
        if self.get(def.name()).is_some() {
            return Err(TokenRegistryError::Duplicate(def.name().to_owned()));
        }
        self.types.push(def);
        Ok(())
    }

    /// Look up a token type by name.
    pub fn get(&self, name: &str) -> Option<&TokenTypeDef> {
        self.types.iter().find(|def| def.name() == name)
    }

    /// Classify a literal value: the first registered type whose matcher
    /// accepts it, else `None`. Unmatched values are legal free-form text,
    /// not an error.
    pub fn match_token_type(&self, value: &str) -> Option<&TokenTypeDef> {
        let params = TokenParams::default();
        self.types.iter().find(|def| def.matches(value, &params))
    }

    /// Registered type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(TokenTypeDef::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_units() -> Vec<UnitDefinition> {
        vec![
            UnitDefinition::new("px", "pixels"),
            UnitDefinition::new("em", "font-relative"),
            UnitDefinition::new("%", "percent"),
        ]
    }

    #[test]
    fn first_match_wins_by_registration_order() {
        let registry = TokenTypeRegistry::with_builtin_types(&default_units());
        // "12" is both a valid integer and a valid number; integer is
        // registered first.
        let matched = registry.match_token_type("12").expect("classified");
        assert_eq!(matched.name(), "integer");
        let matched = registry.match_token_type("0.5").expect("classified");
        assert_eq!(matched.name(), "number");
    }

    #[test]
    fn unmatched_value_is_none_not_error() {
        let registry = TokenTypeRegistry::with_builtin_types(&default_units());
        assert!(registry.match_token_type("12 13 quux!").is_none());
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = TokenTypeRegistry::with_builtin_types(&default_units());
        let dup = TokenTypeDef::new("color", OptionKind::ColorPicker, Box::new(|_, _| true));
        let error = registry.register(dup).expect_err("duplicate must fail");
        assert_eq!(error, TokenRegistryError::Duplicate("color".to_owned()));
    }

    #[test]
    fn canonical_token_formats_name() {
        let registry = TokenTypeRegistry::with_builtin_types(&default_units());
        let color = registry.get("color").expect("built-in color type");
        assert_eq!(color.canonical_token("#ff0000"), Some("<color>".to_owned()));
        assert_eq!(color.canonical_token("12px"), None);
    }

    #[test]
    fn make_option_carries_params() {
        let registry = TokenTypeRegistry::with_builtin_types(&default_units());
        let number = registry.get("number").expect("built-in number type");
        let params = TokenParams {
            min: Some(0.0),
            max: Some(1.0),
            step: None,
        };
        let option = number.make_option(&params);
        assert_eq!(option.token, "<number>");
        assert_eq!(option.kind, OptionKind::NumberField);
        assert_eq!(option.min, Some(0.0));
        assert_eq!(option.max, Some(1.0));
    }

    #[test]
    fn params_bound_number_matching() {
        let registry = TokenTypeRegistry::with_builtin_types(&default_units());
        let number = registry.get("number").expect("built-in number type");
        let params = TokenParams {
            min: Some(0.0),
            max: Some(1.0),
            step: None,
        };
        assert!(number.matches("0.5", &params));
        assert!(!number.matches("1.5", &params));
    }
}
