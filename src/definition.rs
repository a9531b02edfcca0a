//! Generator definitions: the tag table and seed variables
//!
//! Definitions are usually JSON documents of the form
//!
//! ```json
//! {
//!     "generator": {
//!         "tags": { "START": { "a": "Hello <<NAME>>!" }, "NAME": { "x": "World" } },
//!         "variables": {}
//!     }
//! }
//! ```
//!
//! The same shape is accepted as TOML. `variables` is optional.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Name of the tag every generation starts from
pub const START_TAG: &str = "START";

/// Key used by switch tags when the variable's value is not a key of the tag
pub const DEFAULT_KEY: &str = "default";

/// Values of a single tag, keyed by switch key
pub type Tag = BTreeMap<String, String>;

/// Errors that can occur when loading a generator definition
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Failed to read generator file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse generator JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse generator TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("START tag not found in generator definition")]
    MissingStart,
}

/// The loaded tag table plus the initial variable store
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratorDefinition {
    /// Tag name -> key -> replacement text
    pub tags: BTreeMap<String, Tag>,
    /// Values every generation starts with
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Top-level document wrapping the definition
#[derive(Deserialize)]
struct DefinitionDocument {
    generator: GeneratorDefinition,
}

impl GeneratorDefinition {
    /// Build and validate a definition from its parts
    pub fn new(
        tags: BTreeMap<String, Tag>,
        variables: BTreeMap<String, String>,
    ) -> Result<Self, DefinitionError> {
        Self { tags, variables }.validated()
    }

    /// Load a definition from a file, choosing the format by extension
    ///
    /// `.toml` files are read as TOML, everything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Load a definition from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self, DefinitionError> {
        let parsed: DefinitionDocument = serde_json::from_str(content)?;
        parsed.generator.validated()
    }

    /// Load a definition from an already parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, DefinitionError> {
        let parsed: DefinitionDocument = serde_json::from_value(value)?;
        parsed.generator.validated()
    }

    /// Load a definition from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, DefinitionError> {
        let parsed: DefinitionDocument = toml::from_str(content)?;
        parsed.generator.validated()
    }

    /// Ensure a start tag exists, renaming a differently cased one to `START`
    fn validated(mut self) -> Result<Self, DefinitionError> {
        if self.tags.contains_key(START_TAG) {
            return Ok(self);
        }

        let found = self
            .tags
            .keys()
            .find(|name| name.eq_ignore_ascii_case(START_TAG))
            .cloned();
        let start = found
            .and_then(|name| self.tags.remove(&name))
            .ok_or(DefinitionError::MissingStart)?;
        self.tags.insert(START_TAG.to_string(), start);
        Ok(self)
    }

    /// Look up a tag by its exact name
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.get(name)
    }

    /// Check if a tag exists
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Get all tag names
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(|s| s.as_str())
    }
}
