//! Tag occurrences produced by a single scan

use std::fmt;

use crate::error::Span;

use super::lexer::Delimiter;

/// Separator that turns a select tag into a switch tag
pub const SWITCH_SEPARATOR: char = '|';
/// Separator that turns a variable tag into an assignment
pub const ASSIGN_SEPARATOR: char = '=';

/// The two bracket families of the template language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// `<<` … `>>`: pick from the tag table
    Select,
    /// `[[` … `]]`: read or write the variable store
    Variable,
}

impl Family {
    pub fn open(&self) -> Delimiter {
        match self {
            Family::Select => Delimiter::SelectOpen,
            Family::Variable => Delimiter::VariableOpen,
        }
    }

    pub fn close(&self) -> Delimiter {
        match self {
            Family::Select => Delimiter::SelectClose,
            Family::Variable => Delimiter::VariableClose,
        }
    }

    /// Classify a raw tag body belonging to this family
    pub fn classify(&self, body: &str) -> TagKind {
        match self {
            Family::Select if body.contains(SWITCH_SEPARATOR) => TagKind::Switch,
            Family::Select => TagKind::Random,
            Family::Variable if body.contains(ASSIGN_SEPARATOR) => TagKind::VarSet,
            Family::Variable => TagKind::VarGet,
        }
    }
}

/// What a located tag asks the resolver to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<<NAME>>`
    Random,
    /// `<<NAME|variable>>`
    Switch,
    /// `[[variable = value]]`
    VarSet,
    /// `[[variable]]`
    VarGet,
    /// No tag left in the text
    None,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagKind::Random => "RANDOM",
            TagKind::Switch => "SWITCH",
            TagKind::VarSet => "VAR_SET",
            TagKind::VarGet => "VAR_GET",
            TagKind::None => "NONE",
        };
        f.pad(name)
    }
}

/// The leftmost complete tag of a text, split out of its surroundings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
    pub kind: TagKind,
    /// Text preceding the opening delimiter
    pub before: String,
    /// Raw text between the delimiters, untrimmed
    pub body: String,
    /// Text following the closing delimiter
    pub after: String,
    /// Byte range of the whole tag, delimiters included
    pub span: Span,
}

impl TagOccurrence {
    /// Occurrence signalling a fully resolved text
    pub fn none(text: &str) -> Self {
        Self {
            kind: TagKind::None,
            before: text.to_string(),
            body: String::new(),
            after: String::new(),
            span: text.len()..text.len(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == TagKind::None
    }

    /// Rebuild the surrounding text with `replacement` in place of the tag
    pub fn replace_with(&self, replacement: &str) -> String {
        let mut text =
            String::with_capacity(self.before.len() + replacement.len() + self.after.len());
        text.push_str(&self.before);
        text.push_str(replacement);
        text.push_str(&self.after);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_select() {
        assert_eq!(Family::Select.classify("NAME"), TagKind::Random);
        assert_eq!(Family::Select.classify("PICK|color"), TagKind::Switch);
        assert_eq!(Family::Select.classify("A|b|c"), TagKind::Switch);
    }

    #[test]
    fn test_classify_variable() {
        assert_eq!(Family::Variable.classify("name"), TagKind::VarGet);
        assert_eq!(Family::Variable.classify("name = Bob"), TagKind::VarSet);
        assert_eq!(Family::Variable.classify("eq = a=b"), TagKind::VarSet);
    }

    #[test]
    fn test_replace_with() {
        let tag = TagOccurrence {
            kind: TagKind::Random,
            before: "Hello ".to_string(),
            body: "NAME".to_string(),
            after: "!".to_string(),
            span: 6..14,
        };
        assert_eq!(tag.replace_with("World"), "Hello World!");
        assert_eq!(tag.replace_with(""), "Hello !");
    }

    #[test]
    fn test_none_keeps_text() {
        let tag = TagOccurrence::none("done");
        assert!(tag.is_none());
        assert_eq!(tag.replace_with(""), "done");
    }
}
