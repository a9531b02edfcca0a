//! namegen - randomized text from tag-based generator definitions
//!
//! A generator definition maps tag names to keyed values. Generation starts
//! from a text such as `<<START>>` and keeps replacing the leftmost tag until
//! none is left:
//!
//! - `<<NAME>>` picks one value of tag `NAME` at random
//! - `<<NAME|var>>` picks the value of `NAME` keyed by variable `var`
//!   (falling back to the `default` key)
//! - `[[var = value]]` sets a variable and produces no text
//! - `[[var]]` produces the variable's value
//!
//! # Example
//!
//! ```rust
//! use namegen::{generate, GeneratorDefinition};
//!
//! let def = GeneratorDefinition::from_json_str(r#"{
//!     "generator": {
//!         "tags": {
//!             "START": { "a": "Hello <<NAME>>!" },
//!             "NAME": { "x": "World" }
//!         }
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(generate("<<START>>", &def).unwrap(), "Hello World!");
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod lint;
pub mod resolver;
pub mod scanner;

pub use config::{ConfigError, GeneratorConfig, MAX_GENERATOR_ITERATIONS};
pub use definition::{DefinitionError, GeneratorDefinition, Tag, DEFAULT_KEY, START_TAG};
pub use error::GrammarError;
pub use lint::{LintCategory, LintWarning};
pub use resolver::DataError;
pub use scanner::{scan, TagKind, TagOccurrence};

use rand::Rng;
use thiserror::Error;

/// Errors that can stop a generation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The template text is malformed; retrying will not help
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// The definition could not be resolved on this run
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Wrap a tag name in select delimiters, e.g. `START` -> `<<START>>`
pub fn start_text(tag: &str) -> String {
    format!(
        "{}{}{}",
        scanner::Delimiter::SelectOpen.as_str(),
        tag,
        scanner::Delimiter::SelectClose.as_str()
    )
}

/// Expand `start_text` with default configuration and the thread RNG
///
/// Unknown tags, unset variables, invalid switch keys and runaway
/// definitions are reported as `ERROR: ...` strings in the `Ok` value. Only
/// grammar errors are returned as `Err`.
pub fn generate(start_text: &str, definition: &GeneratorDefinition) -> Result<String, GrammarError> {
    generate_with_config(
        start_text,
        definition,
        &GeneratorConfig::default(),
        &mut rand::rng(),
    )
}

/// Expand `start_text` with custom configuration and random number generator
///
/// # Example
///
/// ```rust
/// use namegen::{generate_with_config, GeneratorConfig, GeneratorDefinition};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let def = GeneratorDefinition::from_json_str(
///     r#"{ "generator": { "tags": { "START": { "a": "<<START>>" } } } }"#,
/// ).unwrap();
/// let config = GeneratorConfig::new().with_max_iterations(5);
///
/// let out = generate_with_config("<<START>>", &def, &config, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert!(out.starts_with("ERROR: Maximum iterations"));
/// ```
pub fn generate_with_config<R: Rng + ?Sized>(
    start_text: &str,
    definition: &GeneratorDefinition,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<String, GrammarError> {
    match try_generate(start_text, definition, config, rng) {
        Ok(text) => Ok(text),
        Err(GenerateError::Data(e)) => Ok(e.to_string()),
        Err(GenerateError::Grammar(e)) => Err(e),
    }
}

/// Expand `start_text`, keeping data errors typed
pub fn try_generate<R: Rng + ?Sized>(
    start_text: &str,
    definition: &GeneratorDefinition,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<String, GenerateError> {
    resolver::resolve(start_text, definition, config, rng)
}

/// Run `count` independent generations from the configured start tag
///
/// Each entry is either generated text or an `ERROR: ...` string; a grammar
/// error aborts the whole batch.
pub fn generate_batch<R: Rng + ?Sized>(
    definition: &GeneratorDefinition,
    count: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<String>, GrammarError> {
    let start = config.start_text();
    let mut lines = Vec::with_capacity(count);
    for _ in 0..count {
        lines.push(generate_with_config(&start, definition, config, &mut *rng)?);
    }
    Ok(lines)
}
