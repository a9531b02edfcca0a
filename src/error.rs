//! Grammar errors raised by the tag scanner

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::scanner::Delimiter;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A template that cannot be tokenized into tags.
///
/// These are author mistakes in the definition itself, so they abort the
/// current generation instead of being folded into an `ERROR:` string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// An opening delimiter with no closer of its family (or the reverse)
    #[error("unmatched {delimiter} delimiter at {span:?}")]
    MalformedTag {
        delimiter: Delimiter,
        span: Span,
        text: String,
    },

    /// A delimiter token inside a tag body
    #[error("delimiter inside tag body '{body}'; use a switch tag instead")]
    NestedDelimiter {
        body: String,
        span: Span,
        text: String,
    },
}

impl GrammarError {
    pub fn malformed(delimiter: Delimiter, span: Span, text: impl Into<String>) -> Self {
        Self::MalformedTag {
            delimiter,
            span,
            text: text.into(),
        }
    }

    pub fn nested(body: impl Into<String>, span: Span, text: impl Into<String>) -> Self {
        Self::NestedDelimiter {
            body: body.into(),
            span,
            text: text.into(),
        }
    }

    /// Location of the offending delimiter or tag in [`GrammarError::text`]
    pub fn span(&self) -> &Span {
        match self {
            Self::MalformedTag { span, .. } | Self::NestedDelimiter { span, .. } => span,
        }
    }

    /// The working text that was being scanned when the error occurred
    pub fn text(&self) -> &str {
        match self {
            Self::MalformedTag { text, .. } | Self::NestedDelimiter { text, .. } => text,
        }
    }

    /// Format the error with the scanned text as context using ariadne
    pub fn format(&self, filename: &str) -> String {
        let span = self.span().clone();
        let (message, note) = match self {
            Self::MalformedTag { delimiter, .. } => (
                format!("Unmatched {} delimiter", delimiter),
                format!("no matching {} in this text", delimiter.partner()),
            ),
            Self::NestedDelimiter { .. } => (
                "Delimiter inside a tag".to_string(),
                "tags cannot be nested; use a switch tag instead".to_string(),
            ),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(note)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(self.text())), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", message, self.text()),
        }
    }
}
