//! Seed configuration for the engine registries.
//!
//! The built-in tables are embedded JSON, deserialized once at startup.
//! Loading is partial-failure tolerant: a bad entry is skipped with a
//! warning and the rest of its table still loads.

use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use style_definitions::{StyleDefinition, StyleDefinitionRegistry, TokenAliases};
use style_syntax::expand_tokens;
use style_tokens::{TokenTypeRegistry, UnitDefinition};

/// One unit suffix entry.
#[derive(Clone, Debug, Deserialize)]
pub struct UnitSeed {
    pub suffix: String,
    #[serde(default)]
    pub description: String,
}

/// One token alias entry: a token defined in terms of other tokens.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenSeed {
    pub name: String,
    pub syntax: String,
}

/// One style definition entry.
#[derive(Clone, Debug, Deserialize)]
pub struct StyleSeed {
    pub key: String,
    pub syntax: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub longhand: Option<Vec<String>>,
    #[serde(default)]
    pub icons: HashMap<String, String>,
}

/// The full seed table set consumed by [`crate::StyleEngine`].
#[derive(Clone, Debug, Deserialize)]
pub struct EngineConfig {
    pub units: Vec<UnitSeed>,
    pub tokens: Vec<TokenSeed>,
    pub styles: Vec<StyleSeed>,
}

impl EngineConfig {
    /// The built-in seed tables.
    ///
    /// # Errors
    /// Returns an error only if the embedded JSON itself is malformed.
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(serde_json::from_str(SEED_JSON)?)
    }

    /// Build the token type registry from the unit table.
    pub(crate) fn build_token_registry(&self) -> TokenTypeRegistry {
        let units: Vec<UnitDefinition> = self
            .units
            .iter()
            .map(|unit| UnitDefinition::new(&unit.suffix, &unit.description))
            .collect();
        TokenTypeRegistry::with_builtin_types(&units)
    }

    /// Build the alias table, dropping entries that do not expand (cyclic
    /// or malformed definitions).
    pub(crate) fn build_aliases(&self) -> TokenAliases {
        let mut aliases = TokenAliases::new();
        for token in &self.tokens {
            if aliases.contains_key(&token.name) {
                warn!("skipping token definition '{}': duplicate name", token.name);
                continue;
            }
            aliases.insert(token.name.clone(), token.syntax.clone());
        }
        // Probe each alias against the full table so every member of a
        // cycle is caught at load time, then drop the offenders together.
        let mut bad: Vec<String> = Vec::new();
        for name in aliases.keys() {
            if let Err(error) = expand_tokens(&format!("<{name}>"), &aliases) {
                warn!("skipping token definition '{name}': {error}");
                bad.push(name.clone());
            }
        }
        for name in bad {
            aliases.remove(&name);
        }
        aliases
    }

    /// Build the style definition registry; bad entries are skipped and
    /// logged by `register_all`.
    pub(crate) fn build_definition_registry(&self, aliases: TokenAliases) -> StyleDefinitionRegistry {
        let mut registry = StyleDefinitionRegistry::new(aliases);
        let defs: Vec<StyleDefinition> = self
            .styles
            .iter()
            .map(|seed| StyleDefinition {
                key: seed.key.clone(),
                syntax: seed.syntax.clone(),
                description: seed.description.clone(),
                default_value: seed.default.clone(),
                longhand: seed.longhand.clone(),
                icons: seed.icons.clone(),
            })
            .collect();
        let total = defs.len();
        let registered = registry.register_all(defs);
        if registered < total {
            warn!("loaded {registered} of {total} style definitions");
        }
        registry
    }
}

/// Built-in seed tables: unit suffixes, token aliases, and the property
/// catalogue the builder's editors are populated from.
const SEED_JSON: &str = r#"{
  "units": [
    { "suffix": "px", "description": "pixels" },
    { "suffix": "em", "description": "relative to element font size" },
    { "suffix": "rem", "description": "relative to root font size" },
    { "suffix": "%", "description": "percentage" },
    { "suffix": "vw", "description": "viewport width" },
    { "suffix": "vh", "description": "viewport height" }
  ],
  "tokens": [
    { "name": "filter-function",
      "syntax": "blur(<length>)|brightness(<number>)|contrast(<number>)|grayscale(<number [0,1]>)|opacity(<number [0,1]>)" },
    { "name": "line-style", "syntax": "none|solid|dashed|dotted" },
    { "name": "size-value", "syntax": "auto|<length>" },
    { "name": "shadow", "syntax": "<length> <length> <length> <color>" }
  ],
  "styles": [
    { "key": "display", "syntax": "block|inline|flex|none",
      "description": "Layout mode of the block", "default": "block" },
    { "key": "opacity", "syntax": "<number [0,1]>",
      "description": "Block transparency", "default": "1" },
    { "key": "color", "syntax": "<color>",
      "description": "Foreground text color" },
    { "key": "background-color", "syntax": "<color>|transparent",
      "description": "Background fill color" },
    { "key": "background-image", "syntax": "none|<link>",
      "description": "Background image source", "default": "none" },
    { "key": "width", "syntax": "<size-value>",
      "description": "Block width", "default": "auto" },
    { "key": "height", "syntax": "<size-value>",
      "description": "Block height", "default": "auto" },
    { "key": "margin", "syntax": "<length>{1,4}",
      "description": "Outer spacing shorthand",
      "longhand": ["margin-top", "margin-right", "margin-bottom", "margin-left"] },
    { "key": "margin-top", "syntax": "<length>", "description": "Top outer spacing" },
    { "key": "margin-right", "syntax": "<length>", "description": "Right outer spacing" },
    { "key": "margin-bottom", "syntax": "<length>", "description": "Bottom outer spacing" },
    { "key": "margin-left", "syntax": "<length>", "description": "Left outer spacing" },
    { "key": "padding", "syntax": "<length>{1,4}",
      "description": "Inner spacing shorthand",
      "longhand": ["padding-top", "padding-right", "padding-bottom", "padding-left"] },
    { "key": "padding-top", "syntax": "<length>", "description": "Top inner spacing" },
    { "key": "padding-right", "syntax": "<length>", "description": "Right inner spacing" },
    { "key": "padding-bottom", "syntax": "<length>", "description": "Bottom inner spacing" },
    { "key": "padding-left", "syntax": "<length>", "description": "Left inner spacing" },
    { "key": "border", "syntax": "<length> <line-style> <color>",
      "description": "Border shorthand",
      "longhand": ["border-width", "border-style", "border-color"] },
    { "key": "border-width", "syntax": "<length>", "description": "Border thickness" },
    { "key": "border-style", "syntax": "<line-style>",
      "description": "Border line style", "default": "none",
      "icons": { "none": "border-none", "solid": "border-solid",
                 "dashed": "border-dashed", "dotted": "border-dotted" } },
    { "key": "border-color", "syntax": "<color>", "description": "Border color" },
    { "key": "font-size", "syntax": "<length>",
      "description": "Text size", "default": "16px" },
    { "key": "line-height", "syntax": "normal|<number>|<length>",
      "description": "Line box height", "default": "normal" },
    { "key": "text-align", "syntax": "left|center|right|justify",
      "description": "Horizontal text alignment", "default": "left",
      "icons": { "left": "align-left", "center": "align-center",
                 "right": "align-right", "justify": "align-justify" } },
    { "key": "filter", "syntax": "none|[<filter-function>]+",
      "description": "Visual effect pipeline", "default": "none" },
    { "key": "box-shadow", "syntax": "none|<shadow>",
      "description": "Drop shadow", "default": "none" }
  ]
}"#;
