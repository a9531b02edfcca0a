//! Configuration for generation runs

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::definition::START_TAG;

/// Passes allowed per generation before giving up on a runaway definition
pub const MAX_GENERATOR_ITERATIONS: usize = 50;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for a generation run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum number of scan passes per generation
    pub max_iterations: usize,

    /// Tag the start text is built from
    pub start_tag: String,

    /// Debug mode: trace every substitution on stderr
    pub debug: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_GENERATOR_ITERATIONS,
            start_tag: START_TAG.to_string(),
            debug: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the tag generation starts from
    pub fn with_start_tag(mut self, tag: impl Into<String>) -> Self {
        self.start_tag = tag.into();
        self
    }

    /// Enable or disable debug tracing
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The start text for a generation, e.g. `<<START>>`
    pub fn start_text(&self) -> String {
        crate::start_text(&self.start_tag)
    }
}
