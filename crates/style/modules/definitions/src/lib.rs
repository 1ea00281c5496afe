//! Style property definitions: the catalogue backing every property
//! editor, plus the key composition utility.

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::fmt;
use style_syntax::{Shape, SyntaxError, expand_tokens, parse_syntax};

mod key;

pub use key::{KeyError, compose_style_key};
pub use style_syntax::TokenAliases;

/// One property definition, created at startup and immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleDefinition {
    /// Property key, e.g. `border-top-width`.
    pub key: String,
    /// Raw value grammar, e.g. `none|<number [0,1]>`.
    pub syntax: String,
    /// Human-readable description shown in the editor.
    pub description: String,
    /// Default value editors fall back to when the cascade resolves to
    /// nothing. Optional; absence means "no value".
    pub default_value: Option<String>,
    /// Sub-properties a shorthand decomposes into, in declaration order.
    pub longhand: Option<Vec<String>>,
    /// Per-variant editor icons keyed by shape variant label.
    pub icons: HashMap<String, String>,
}

impl StyleDefinition {
    /// Minimal definition with only key and grammar set.
    pub fn new(key: &str, syntax: &str) -> Self {
        Self {
            key: key.to_owned(),
            syntax: syntax.to_owned(),
            description: String::new(),
            default_value: None,
            longhand: None,
            icons: HashMap::new(),
        }
    }
}

/// Registration failure for the definition registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefinitionError {
    /// A definition with this key is already registered. Duplicates are
    /// rejected, never silently overwritten.
    Duplicate(String),
    /// The definition's grammar failed to expand or parse.
    BadSyntax { key: String, source: SyntaxError },
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(key) => {
                write!(formatter, "style definition '{key}' is already registered")
            }
            Self::BadSyntax { key, source } => {
                write!(formatter, "style definition '{key}' has a bad grammar: {source}")
            }
        }
    }
}

impl std::error::Error for DefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Duplicate(_) => None,
            Self::BadSyntax { source, .. } => Some(source),
        }
    }
}

/// Append-only map of property key to definition, with the expanded and
/// parsed shape list cached per key at registration time.
#[derive(Debug, Default)]
pub struct StyleDefinitionRegistry {
    definitions: HashMap<String, StyleDefinition>,
    shapes: HashMap<String, Vec<Shape>>,
    /// Registration order, kept so iteration is deterministic.
    order: Vec<String>,
    aliases: TokenAliases,
}

impl StyleDefinitionRegistry {
    #[inline]
    pub fn new(aliases: TokenAliases) -> Self {
        Self {
            definitions: HashMap::new(),
            shapes: HashMap::new(),
            order: Vec::new(),
            aliases,
        }
    }

    /// Register one definition, expanding and parsing its grammar.
    ///
    /// # Errors
    /// [`DefinitionError::Duplicate`] for an already-registered key;
    /// [`DefinitionError::BadSyntax`] when the grammar does not expand or
    /// parse. In both cases the registry is left unchanged.
    pub fn register(&mut self, def: StyleDefinition) -> Result<(), DefinitionError> {
        if self.definitions.contains_key(&def.key) {
            return Err(DefinitionError::Duplicate(def.key.clone()));
        }
        let expanded =
            expand_tokens(&def.syntax, &self.aliases).map_err(|source| DefinitionError::BadSyntax {
                key: def.key.clone(),
                source,
            })?;
        let shapes = parse_syntax(&expanded).map_err(|source| DefinitionError::BadSyntax {
            key: def.key.clone(),
            source,
        })?;
        self.shapes.insert(def.key.clone(), shapes);
        self.order.push(def.key.clone());
        self.definitions.insert(def.key.clone(), def);
        Ok(())
    }

    /// Register many definitions, skipping and logging failed entries so a
    /// single bad seed never fails the whole table.
    pub fn register_all(&mut self, defs: Vec<StyleDefinition>) -> usize {
        let mut registered = 0;
        for def in defs {
            let key = def.key.clone();
            match self.register(def) {
                Ok(()) => registered += 1,
                Err(error) => log::warn!("skipping style definition '{key}': {error}"),
            }
        }
        registered
    }

    /// Look up a definition; absence is a normal outcome, not an error.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&StyleDefinition> {
        self.definitions.get(key)
    }

    /// The cached concrete shapes for a registered property.
    #[inline]
    pub fn shapes(&self, key: &str) -> Option<&[Shape]> {
        self.shapes.get(key).map(Vec::as_slice)
    }

    /// The sub-property list for a shorthand, or `None` when the property
    /// has no shorthand relationship.
    pub fn longhand<'def>(&self, def: &'def StyleDefinition) -> Option<&'def [String]> {
        def.longhand.as_deref()
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use style_syntax::Component;

    fn aliases() -> TokenAliases {
        let mut table = TokenAliases::new();
        table.insert(
            "filter-function".to_owned(),
            "blur(<length>)|brightness(<number>)".to_owned(),
        );
        table
    }

    #[test]
    fn register_and_get() {
        let mut registry = StyleDefinitionRegistry::new(aliases());
        registry
            .register(StyleDefinition::new("opacity", "<number [0,1]>"))
            .expect("registers");
        let def = registry.get("opacity").expect("present");
        assert_eq!(def.syntax, "<number [0,1]>");
        assert!(registry.get("margin").is_none());
    }

    #[test]
    fn duplicate_rejected_and_registry_unchanged() {
        let mut registry = StyleDefinitionRegistry::new(aliases());
        registry
            .register(StyleDefinition::new("opacity", "<number [0,1]>"))
            .expect("registers");
        let error = registry
            .register(StyleDefinition::new("opacity", "<number>"))
            .expect_err("duplicate must fail");
        assert_eq!(error, DefinitionError::Duplicate("opacity".to_owned()));
        let def = registry.get("opacity").expect("original survives");
        assert_eq!(def.syntax, "<number [0,1]>");
    }

    #[test]
    fn shapes_cached_through_alias_expansion() {
        let mut registry = StyleDefinitionRegistry::new(aliases());
        registry
            .register(StyleDefinition::new("filter", "none|[<filter-function>]+"))
            .expect("registers");
        let shapes = registry.shapes("filter").expect("shapes cached");
        assert_eq!(shapes[0].components, vec![Component::Keyword("none".to_owned())]);
        assert!(shapes.len() > 2, "repetition expands multiple variants");
    }

    #[test]
    fn bad_grammar_rejected_at_registration() {
        let mut table = TokenAliases::new();
        table.insert("a".to_owned(), "<a>".to_owned());
        let mut registry = StyleDefinitionRegistry::new(table);
        let error = registry
            .register(StyleDefinition::new("broken", "<a>"))
            .expect_err("cyclic alias must fail");
        assert!(matches!(error, DefinitionError::BadSyntax { .. }));
        assert!(registry.get("broken").is_none());
    }

    #[test]
    fn register_all_skips_bad_entries() {
        let mut registry = StyleDefinitionRegistry::new(aliases());
        let registered = registry.register_all(vec![
            StyleDefinition::new("opacity", "<number [0,1]>"),
            StyleDefinition::new("broken", "[<length>"),
            StyleDefinition::new("color", "<color>"),
        ]);
        assert_eq!(registered, 2);
        assert!(registry.get("opacity").is_some());
        assert!(registry.get("color").is_some());
        assert!(registry.get("broken").is_none());
    }

    #[test]
    fn longhand_lookup() {
        let mut registry = StyleDefinitionRegistry::new(TokenAliases::new());
        let mut margin = StyleDefinition::new("margin", "<length>{1,4}");
        margin.longhand = Some(vec![
            "margin-top".to_owned(),
            "margin-right".to_owned(),
            "margin-bottom".to_owned(),
            "margin-left".to_owned(),
        ]);
        registry.register(margin).expect("registers");
        let def = registry.get("margin").expect("present");
        let longhand = registry.longhand(def).expect("has longhand");
        assert_eq!(longhand.len(), 4);

        let simple = StyleDefinition::new("opacity", "<number [0,1]>");
        registry.register(simple).expect("registers");
        let def = registry.get("opacity").expect("present");
        assert!(registry.longhand(def).is_none());
    }

    #[test]
    fn keys_follow_registration_order() {
        let mut registry = StyleDefinitionRegistry::new(TokenAliases::new());
        for key in ["width", "height", "color"] {
            registry
                .register(StyleDefinition::new(key, "<length>|auto|<color>"))
                .expect("registers");
        }
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["width", "height", "color"]);
    }
}
