//! Tag resolution - expands a start text into generated output
//!
//! The resolver scans the working text for its leftmost tag, replaces it, and
//! repeats until no tag is left or the iteration budget is spent. The tag
//! table is only borrowed; every run works on its own copy of the variables.

mod error;

pub use error::DataError;

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::definition::{GeneratorDefinition, Tag, DEFAULT_KEY};
use crate::scanner::{scan, TagKind, ASSIGN_SEPARATOR, SWITCH_SEPARATOR};
use crate::GenerateError;

/// State of a single generation run
#[derive(Debug, Clone)]
pub struct ResolutionContext<'a> {
    /// Tag table shared by every run
    tags: &'a BTreeMap<String, Tag>,
    /// Variables private to this run
    variables: BTreeMap<String, String>,
}

impl<'a> ResolutionContext<'a> {
    /// Start a run from the definition's seed variables
    pub fn new(definition: &'a GeneratorDefinition) -> Self {
        Self {
            tags: &definition.tags,
            variables: definition.variables.clone(),
        }
    }

    fn tag(&self, name: &str, text: &str) -> Result<&'a Tag, DataError> {
        self.tags
            .get(name)
            .ok_or_else(|| DataError::tag_not_found(name, text))
    }

    /// Variables set so far in this run
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Read a variable
    pub fn variable(&self, name: &str, text: &str) -> Result<&str, DataError> {
        self.variables
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| DataError::variable_not_set(name, text))
    }

    /// `<<NAME>>`: one value of the tag, uniformly at random
    pub fn pick_random<R: Rng + ?Sized>(
        &self,
        name: &str,
        text: &str,
        rng: &mut R,
    ) -> Result<String, DataError> {
        let values: Vec<&String> = self.tag(name, text)?.values().collect();
        values
            .choose(rng)
            .map(|value| value.to_string())
            .ok_or_else(|| DataError::empty_tag(name, text))
    }

    /// `[[name = value]]`: store the value, contributing nothing to the text
    pub fn assign(&mut self, body: &str) {
        let (name, value) = body.split_once(ASSIGN_SEPARATOR).unwrap_or((body, ""));
        let value = strip_matching_quotes(value.trim());
        self.variables
            .insert(name.trim().to_string(), value.to_string());
    }

    /// `<<TAG|variable>>`: the tag's value keyed by the variable
    pub fn switch(&self, body: &str, text: &str) -> Result<&'a str, DataError> {
        let (tag_name, variable) = body.split_once(SWITCH_SEPARATOR).unwrap_or((body, ""));
        let (tag_name, variable) = (tag_name.trim(), variable.trim());

        let tag = self.tag(tag_name, text)?;
        let key = self.variable(variable, text)?;
        tag.get(key)
            .or_else(|| tag.get(DEFAULT_KEY))
            .map(String::as_str)
            .ok_or_else(|| DataError::invalid_key(key, tag_name, text))
    }
}

/// Remove one layer of matching `"` or `'` around a value
fn strip_matching_quotes(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| value.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(value)
}

/// Expand `start_text` against `definition`.
///
/// Grammar problems in the text are returned as [`GenerateError::Grammar`];
/// everything else that stops resolution is a [`GenerateError::Data`].
pub fn resolve<R: Rng + ?Sized>(
    start_text: &str,
    definition: &GeneratorDefinition,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<String, GenerateError> {
    let mut ctx = ResolutionContext::new(definition);
    let mut text = start_text.to_string();

    for pass in 1..=config.max_iterations {
        let tag = scan(&text)?;
        let body = tag.body.trim();

        let replacement = match tag.kind {
            TagKind::None => return Ok(text),
            TagKind::Random => ctx.pick_random(body, &text, rng)?,
            TagKind::VarSet => {
                ctx.assign(body);
                String::new()
            }
            TagKind::VarGet => ctx.variable(body, &text)?.to_string(),
            TagKind::Switch => ctx.switch(body, &text)?.to_string(),
        };

        if config.debug {
            eprintln!(
                "[pass {:>2}] {:<7} {:?} -> {:?}",
                pass, tag.kind, body, replacement
            );
        }

        text = tag.replace_with(&replacement);
    }

    Err(DataError::max_iterations(text).into())
}
