//! Quotes shown during breaks
//!
//! [`QuoteCorpus`] is the immutable set loaded at startup and
//! [`QuoteRotator`] hands out one quote per break without repeating any
//! quote until the whole corpus has been shown.

pub mod corpus;
pub mod rotator;

pub use corpus::QuoteCorpus;
pub use rotator::QuoteRotator;

use crate::constants::PLACEHOLDER_QUOTE_TEXT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single quote. Two quotes with the same `text` are the same quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            text: text.into(),
            author: author.map(str::to_string),
        }
    }

    /// Quote used when there is nothing else to show
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_QUOTE_TEXT, None)
    }

    /// "— Author" line, if the quote is attributed
    pub fn attribution(&self) -> Option<String> {
        self.author.as_ref().map(|author| format!("— {}", author))
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribution() {
            Some(attribution) => write!(f, "\"{}\" {}", self.text, attribution),
            None => write!(f, "\"{}\"", self.text),
        }
    }
}

/// On-disk layout of the quote resource
#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteCollection {
    pub quotes: Vec<Quote>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_author() {
        let attributed = Quote::new("Rest is not idleness.", Some("John Lubbock"));
        assert_eq!(
            attributed.to_string(),
            "\"Rest is not idleness.\" — John Lubbock"
        );

        let anonymous = Quote::new("Look far to see far.", None);
        assert_eq!(anonymous.to_string(), "\"Look far to see far.\"");
        assert!(anonymous.attribution().is_none());
    }

    #[test]
    fn test_author_is_optional_in_json() {
        let quote: Quote = serde_json::from_str(r#"{"text": "Blink."}"#).unwrap();
        assert_eq!(quote.author, None);

        let quote: Quote = serde_json::from_str(r#"{"text": "Blink.", "author": null}"#).unwrap();
        assert_eq!(quote.author, None);
    }
}
