//! Engine facade for the block builder's style subsystem.
//!
//! `StyleEngine` owns the token type registry, the style definition
//! catalogue, and one value map per block. The block tree itself, the
//! panel chrome, and rendering are external collaborators; they hand the
//! engine block keys and context triples and get back resolved values or
//! CSS text.

#![forbid(unsafe_code)]

use anyhow::{Result, bail};
use log::{debug, info, warn};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use style_cascade::{ResolvedStyle, StyleContext, ValueMap};
use style_definitions::{StyleDefinition, StyleDefinitionRegistry};
use style_syntax::Component;
use style_tokens::{OptionDescriptor, TokenTypeDef, TokenTypeRegistry};

pub mod config;

pub use config::EngineConfig;
pub use style_cascade::ALL;
pub use style_definitions::compose_style_key;

/// A 64-bit stable key for blocks used to correlate style state with the
/// external block tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BlockKey(pub u64);

impl BlockKey {
    /// The root block key (always present in a document).
    pub const ROOT: BlockKey = BlockKey(0);
}

impl fmt::Display for BlockKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "block-{}", self.0)
    }
}

/// The style engine: registries plus per-block value maps.
///
/// Registry population happens once at startup; the registries seal at
/// the first resolution and later registrations are rejected, so a
/// resolver never observes a registry that changes mid-session.
pub struct StyleEngine {
    tokens: TokenTypeRegistry,
    definitions: StyleDefinitionRegistry,
    blocks: HashMap<BlockKey, ValueMap>,
    /// Set by the first resolution; single-threaded interior mutability
    /// so resolution stays `&self`.
    sealed: Cell<bool>,
}

impl StyleEngine {
    /// Engine loaded from the built-in seed tables.
    ///
    /// # Errors
    /// Only if the embedded seed tables fail to parse.
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(&EngineConfig::builtin()?))
    }

    /// Engine loaded from an explicit configuration. Bad entries are
    /// skipped and logged; the rest load.
    pub fn with_config(config: &EngineConfig) -> Self {
        let tokens = config.build_token_registry();
        let aliases = config.build_aliases();
        let definitions = config.build_definition_registry(aliases);
        info!(
            "StyleEngine: loaded {} token types, {} style definitions",
            tokens.len(),
            definitions.len()
        );
        Self {
            tokens,
            definitions,
            blocks: HashMap::new(),
            sealed: Cell::new(false),
        }
    }

    /// Register a style definition after startup configuration.
    ///
    /// # Errors
    /// Rejected once the registries are sealed, on duplicate keys, and on
    /// grammars that fail to expand or parse.
    pub fn register_style_definition(&mut self, def: StyleDefinition) -> Result<()> {
        if self.sealed.get() {
            warn!("rejected registration of '{}' after first resolution", def.key);
            bail!("style registries are sealed after the first resolution");
        }
        self.definitions.register(def)?;
        Ok(())
    }

    /// Register a token type after startup configuration.
    ///
    /// # Errors
    /// Rejected once the registries are sealed and on duplicate names.
    pub fn register_token_type(&mut self, def: TokenTypeDef) -> Result<()> {
        if self.sealed.get() {
            warn!("rejected registration of token type '{}' after first resolution", def.name());
            bail!("style registries are sealed after the first resolution");
        }
        self.tokens.register(def)?;
        Ok(())
    }

    /// Create the value map for a new block, seeded from the style
    /// definitions' defaults at the fully generic context.
    pub fn insert_block(&mut self, block: BlockKey) {
        let mut map = ValueMap::new();
        let generic = StyleContext::generic();
        for key in self.definitions.keys() {
            if let Some(def) = self.definitions.get(key)
                && let Some(default) = def.default_value.as_deref()
            {
                match style_cascade::set_style(
                    &mut map,
                    &self.definitions,
                    &self.tokens,
                    generic.clone(),
                    key,
                    default,
                ) {
                    Ok(()) => {}
                    Err(error) => warn!("default for '{key}' not seeded: {error}"),
                }
            }
        }
        self.blocks.insert(block, map);
    }

    /// Drop a block's value map.
    pub fn remove_block(&mut self, block: BlockKey) {
        self.blocks.remove(&block);
    }

    /// Write one exact coordinate of a block's value map. The value must
    /// validate against the property's grammar (empty string clears).
    ///
    /// # Errors
    /// Unknown block, unknown property, or a value matching no shape; the
    /// map is unchanged on error.
    pub fn set_style(
        &mut self,
        block: BlockKey,
        device: &str,
        orientation: &str,
        pseudo: &str,
        property: &str,
        value: &str,
    ) -> Result<()> {
        let Some(map) = self.blocks.get_mut(&block) else {
            bail!("unknown block {block}");
        };
        style_cascade::set_style(
            map,
            &self.definitions,
            &self.tokens,
            StyleContext::new(device, orientation, pseudo),
            property,
            value,
        )
        .map_err(|error| {
            debug!("rejected write to {block}: {error}");
            anyhow::Error::new(error)
        })
    }

    /// Clear one exact coordinate of a block's value map.
    ///
    /// # Errors
    /// Unknown block or unknown property.
    pub fn remove_style(
        &mut self,
        block: BlockKey,
        device: &str,
        orientation: &str,
        pseudo: &str,
        property: &str,
    ) -> Result<()> {
        let Some(map) = self.blocks.get_mut(&block) else {
            bail!("unknown block {block}");
        };
        style_cascade::remove_style(
            map,
            &self.definitions,
            StyleContext::new(device, orientation, pseudo),
            property,
        )?;
        Ok(())
    }

    /// Resolve one property for one block in one concrete context via the
    /// 8-path cascade. `None` is the normal "no value set" outcome.
    pub fn resolve_style(
        &self,
        block: BlockKey,
        property: &str,
        device: &str,
        orientation: &str,
        pseudo: &str,
    ) -> Option<String> {
        self.seal();
        let map = self.blocks.get(&block)?;
        style_cascade::resolve_style(map, property, device, orientation, pseudo)
    }

    /// Flatten a block's styles for one concrete context.
    pub fn resolved_style(&self, block: BlockKey, context: &StyleContext) -> ResolvedStyle {
        self.seal();
        self.blocks
            .get(&block)
            .map(|map| style_cascade::resolved_style(map, context))
            .unwrap_or_default()
    }

    /// Resolve and serialize a block's styles as an injectable CSS rule.
    /// An unknown block or a context with no values yields empty text.
    pub fn css_rule_for(&self, block: BlockKey, context: &StyleContext, indent: &str) -> String {
        let resolved = self.resolved_style(block, context);
        let selector = style_emit::selector_for(&block.to_string(), &context.pseudo);
        style_emit::rule_for(&selector, &resolved, indent)
    }

    /// Look up a property definition (for editor panels).
    #[inline]
    pub fn style_definition(&self, key: &str) -> Option<&StyleDefinition> {
        self.definitions.get(key)
    }

    /// Classify a literal value against the registered token types.
    #[inline]
    pub fn match_token_type(&self, value: &str) -> Option<&TokenTypeDef> {
        self.tokens.match_token_type(value)
    }

    /// The editor option descriptor implied by a property's current value:
    /// the first token slot of the first shape the value fits (or of the
    /// first token-bearing shape when no value is given).
    pub fn option_for(&self, property: &str, value: Option<&str>) -> Option<OptionDescriptor> {
        let shapes = self.definitions.shapes(property)?;
        let shape = match value {
            Some(value) => shapes
                .iter()
                .find(|shape| style_syntax::value_matches_shape(value, shape, &self.tokens))?,
            None => shapes.iter().find(|shape| {
                shape
                    .components
                    .iter()
                    .any(|component| matches!(component, Component::Token(_)))
            })?,
        };
        shape.components.iter().find_map(|component| {
            if let Component::Token(reference) = component {
                self.tokens
                    .get(&reference.name)
                    .map(|token_type| token_type.make_option(&reference.params))
            } else {
                None
            }
        })
    }

    fn seal(&self) {
        if !self.sealed.replace(true) {
            debug!("style registries sealed at first resolution");
        }
    }
}
