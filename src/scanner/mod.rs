//! Tag scanner for template text
//!
//! Locates the leftmost complete tag of either bracket family and classifies
//! it. Scanning is a pure function of the input text.

mod lexer;
mod tag;

pub use lexer::{delimiters, Delimiter, DELIMITER_LEN};
pub use tag::{Family, TagKind, TagOccurrence, ASSIGN_SEPARATOR, SWITCH_SEPARATOR};

use crate::error::GrammarError;

use lexer::FirstDelimiters;

/// Scan `text` for its leftmost tag.
///
/// Returns an occurrence of kind [`TagKind::None`] when no tag is left.
/// Unbalanced delimiters and delimiters inside a tag body are grammar errors.
pub fn scan(text: &str) -> Result<TagOccurrence, GrammarError> {
    let first = FirstDelimiters::locate(text);

    // Each family must have both halves somewhere in the text
    for family in [Family::Select, Family::Variable] {
        match (first.get(family.open()), first.get(family.close())) {
            (Some(at), None) => {
                return Err(GrammarError::malformed(
                    family.open(),
                    at..at + DELIMITER_LEN,
                    text,
                ))
            }
            (None, Some(at)) => {
                return Err(GrammarError::malformed(
                    family.close(),
                    at..at + DELIMITER_LEN,
                    text,
                ))
            }
            _ => {}
        }
    }

    let (family, open) = match (
        first.get(Delimiter::SelectOpen),
        first.get(Delimiter::VariableOpen),
    ) {
        (None, None) => return Ok(TagOccurrence::none(text)),
        (Some(select), Some(variable)) if variable < select => (Family::Variable, variable),
        (Some(select), _) => (Family::Select, select),
        (None, Some(variable)) => (Family::Variable, variable),
    };

    let body_start = open + DELIMITER_LEN;
    let body_end = lexer::find(&text[body_start..], family.close())
        .map(|offset| body_start + offset)
        .ok_or_else(|| GrammarError::malformed(family.open(), open..body_start, text))?;
    let tag_end = body_end + DELIMITER_LEN;
    let body = &text[body_start..body_end];

    if delimiters(body).next().is_some() {
        return Err(GrammarError::nested(body, open..tag_end, text));
    }

    Ok(TagOccurrence {
        kind: family.classify(body),
        before: text[..open].to_string(),
        body: body.to_string(),
        after: text[tag_end..].to_string(),
        span: open..tag_end,
    })
}
