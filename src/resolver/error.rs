//! Data errors reported as `ERROR:` strings

use thiserror::Error;

/// A definition that is well formed but cannot be resolved on this run.
///
/// Which of these happens can depend on the random branch taken, so callers
/// of [`crate::generate`] receive them as ordinary result strings. Every
/// variant carries the working text as it was before the failing substitution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Select tag naming a tag that is not in the table
    #[error("ERROR: Tag {name} not found.\nText: {text}")]
    TagNotFound { name: String, text: String },

    /// Tag with nothing to pick from
    #[error("ERROR: Tag {name} has no values.\nText: {text}")]
    EmptyTag { name: String, text: String },

    /// Variable read (directly or by a switch) before any assignment
    #[error("ERROR: Variable {name} used before setting.\nText: {text}")]
    VariableNotSet { name: String, text: String },

    /// Switch key missing from the tag, which has no `default` either
    #[error("ERROR: Invalid key {key} into tag {tag}.\nText: {text}")]
    InvalidKey {
        key: String,
        tag: String,
        text: String,
    },

    /// Iteration budget spent without reaching a tag-free text
    #[error(
        "ERROR: Maximum iterations for generator reached. Check the generator definition for loops.\nText: {text}"
    )]
    MaxIterations { text: String },
}

impl DataError {
    pub fn tag_not_found(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::TagNotFound {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn empty_tag(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::EmptyTag {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn variable_not_set(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::VariableNotSet {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn invalid_key(
        key: impl Into<String>,
        tag: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::InvalidKey {
            key: key.into(),
            tag: tag.into(),
            text: text.into(),
        }
    }

    pub fn max_iterations(text: impl Into<String>) -> Self {
        Self::MaxIterations { text: text.into() }
    }

    /// The working text at the point of failure
    pub fn text(&self) -> &str {
        match self {
            Self::TagNotFound { text, .. }
            | Self::EmptyTag { text, .. }
            | Self::VariableNotSet { text, .. }
            | Self::InvalidKey { text, .. }
            | Self::MaxIterations { text } => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_not_found_display() {
        let err = DataError::tag_not_found("MISSING", "<<MISSING>>");
        assert_eq!(err.to_string(), "ERROR: Tag MISSING not found.\nText: <<MISSING>>");
    }

    #[test]
    fn test_variable_display() {
        let err = DataError::variable_not_set("who", "Hi [[who]]");
        assert_eq!(
            err.to_string(),
            "ERROR: Variable who used before setting.\nText: Hi [[who]]"
        );
    }

    #[test]
    fn test_invalid_key_display() {
        let err = DataError::invalid_key("red", "PICK", "<<PICK|color>>");
        assert_eq!(
            err.to_string(),
            "ERROR: Invalid key red into tag PICK.\nText: <<PICK|color>>"
        );
        assert_eq!(err.text(), "<<PICK|color>>");
    }

    #[test]
    fn test_max_iterations_display() {
        let err = DataError::max_iterations("<<START>>");
        assert!(err.to_string().starts_with("ERROR: Maximum iterations"));
        assert!(err.to_string().ends_with("\nText: <<START>>"));
    }
}
