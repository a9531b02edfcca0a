//! Delimiter lexer for template text using logos

use std::fmt;

use logos::Logos;

use crate::error::Span;

/// Width in bytes of every delimiter token
pub const DELIMITER_LEN: usize = 2;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    #[token("<<")]
    SelectOpen,
    #[token(">>")]
    SelectClose,
    #[token("[[")]
    VariableOpen,
    #[token("]]")]
    VariableClose,

    // Single bracket characters that do not form a delimiter
    #[token("<")]
    #[token(">")]
    #[token("[")]
    #[token("]")]
    Stray,

    #[regex(r"[^<>\[\]]+")]
    Text,
}

/// One of the four two-character delimiter tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    SelectOpen,
    SelectClose,
    VariableOpen,
    VariableClose,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::SelectOpen => "<<",
            Delimiter::SelectClose => ">>",
            Delimiter::VariableOpen => "[[",
            Delimiter::VariableClose => "]]",
        }
    }

    /// The delimiter that closes (or opens) a tag started (or ended) by this one
    pub fn partner(&self) -> Delimiter {
        match self {
            Delimiter::SelectOpen => Delimiter::SelectClose,
            Delimiter::SelectClose => Delimiter::SelectOpen,
            Delimiter::VariableOpen => Delimiter::VariableClose,
            Delimiter::VariableClose => Delimiter::VariableOpen,
        }
    }

    fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::SelectOpen => Some(Delimiter::SelectOpen),
            Token::SelectClose => Some(Delimiter::SelectClose),
            Token::VariableOpen => Some(Delimiter::VariableOpen),
            Token::VariableClose => Some(Delimiter::VariableClose),
            Token::Stray | Token::Text => None,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_str())
    }
}

/// Lex input string into delimiter tokens with spans, left to right
pub fn delimiters(input: &str) -> impl Iterator<Item = (Delimiter, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().and_then(Delimiter::from_token).map(|d| (d, span)))
}

/// Byte offset of the first occurrence of each delimiter in a text
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FirstDelimiters {
    select_open: Option<usize>,
    select_close: Option<usize>,
    variable_open: Option<usize>,
    variable_close: Option<usize>,
}

impl FirstDelimiters {
    pub fn locate(input: &str) -> Self {
        let mut first = Self::default();
        for (delimiter, span) in delimiters(input) {
            let slot = first.slot_mut(delimiter);
            if slot.is_none() {
                *slot = Some(span.start);
            }
        }
        first
    }

    pub fn get(&self, delimiter: Delimiter) -> Option<usize> {
        match delimiter {
            Delimiter::SelectOpen => self.select_open,
            Delimiter::SelectClose => self.select_close,
            Delimiter::VariableOpen => self.variable_open,
            Delimiter::VariableClose => self.variable_close,
        }
    }

    fn slot_mut(&mut self, delimiter: Delimiter) -> &mut Option<usize> {
        match delimiter {
            Delimiter::SelectOpen => &mut self.select_open,
            Delimiter::SelectClose => &mut self.select_close,
            Delimiter::VariableOpen => &mut self.variable_open,
            Delimiter::VariableClose => &mut self.variable_close,
        }
    }
}

/// Byte offset of the first `wanted` delimiter in `input`
pub fn find(input: &str, wanted: Delimiter) -> Option<usize> {
    delimiters(input)
        .find(|(d, _)| *d == wanted)
        .map(|(_, span)| span.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Delimiter> {
        delimiters(input).map(|(d, _)| d).collect()
    }

    #[test]
    fn test_all_delimiters() {
        assert_eq!(
            kinds("<<a>> [[b]]"),
            vec![
                Delimiter::SelectOpen,
                Delimiter::SelectClose,
                Delimiter::VariableOpen,
                Delimiter::VariableClose,
            ]
        );
    }

    #[test]
    fn test_single_brackets_are_not_delimiters() {
        assert!(kinds("a < b > c [d] e").is_empty());
        assert_eq!(kinds("<[[x]]>"), vec![Delimiter::VariableOpen, Delimiter::VariableClose]);
    }

    #[test]
    fn test_runs_of_brackets_match_leftmost() {
        let spans: Vec<_> = delimiters("<<<x>>>").collect();
        assert_eq!(
            spans,
            vec![(Delimiter::SelectOpen, 0..2), (Delimiter::SelectClose, 4..6)]
        );
    }

    #[test]
    fn test_first_delimiters() {
        let first = FirstDelimiters::locate("ab [[x]] <<y>> <<z>>");
        assert_eq!(first.get(Delimiter::VariableOpen), Some(3));
        assert_eq!(first.get(Delimiter::VariableClose), Some(6));
        assert_eq!(first.get(Delimiter::SelectOpen), Some(9));
        assert_eq!(first.get(Delimiter::SelectClose), Some(12));
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(find("héllo <<wörld>>", Delimiter::SelectOpen), Some(7));
        assert_eq!(find("héllo <<wörld>>", Delimiter::SelectClose), Some(15));
    }

    #[test]
    fn test_display() {
        assert_eq!(Delimiter::SelectOpen.to_string(), "'<<'");
        assert_eq!(Delimiter::VariableClose.partner(), Delimiter::VariableOpen);
    }
}
