use super::{Quote, QuoteCollection};
use crate::constants::FALLBACK_QUOTE_TEXTS;
use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Quote resource compiled into the binary
const BUNDLED_QUOTES_JSON: &str = include_str!("../../assets/quotes.json");

/// Ordered, immutable set of quotes loaded once at startup
#[derive(Debug, Clone)]
pub struct QuoteCorpus {
    quotes: Vec<Quote>,
}

impl QuoteCorpus {
    /// Build a corpus, dropping blank texts and repeated texts (first one wins)
    pub fn new(quotes: Vec<Quote>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(quotes.len());

        for quote in quotes {
            if quote.text.trim().is_empty() {
                warn!("Skipping quote with empty text");
                continue;
            }
            if !seen.insert(quote.text.clone()) {
                warn!("Skipping duplicate quote: {}", quote.text);
                continue;
            }
            kept.push(quote);
        }

        Self { quotes: kept }
    }

    /// The built-in three-quote set
    pub fn fallback() -> Self {
        Self::new(
            FALLBACK_QUOTE_TEXTS
                .iter()
                .map(|text| Quote::new(*text, None))
                .collect(),
        )
    }

    /// Parse a quote resource. A resource with no usable quotes is an error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let collection: QuoteCollection =
            serde_json::from_str(json).context("Failed to parse quote resource")?;
        let corpus = Self::new(collection.quotes);

        if corpus.is_empty() {
            anyhow::bail!("Quote resource contains no usable quotes");
        }

        Ok(corpus)
    }

    /// Read and parse a quote resource from disk
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read quote file: {}", path.display()))?;

        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid quote file: {}", path.display()))
    }

    /// Quotes compiled into the binary, or the fallback set if they don't parse
    pub fn bundled() -> Self {
        match Self::from_json_str(BUNDLED_QUOTES_JSON) {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!("Error loading bundled quotes: {:#}. Using fallback quotes.", e);
                Self::fallback()
            }
        }
    }

    /// Load the startup corpus. Never fails: an unreadable override falls back
    /// to the bundled quotes, and unusable bundled quotes to the built-in set.
    pub fn load(override_path: Option<&Path>) -> Self {
        let corpus = match override_path {
            Some(path) => match Self::load_from_path(path) {
                Ok(corpus) => {
                    info!("Loaded {} quotes from {}", corpus.len(), path.display());
                    corpus
                }
                Err(e) => {
                    warn!("{:#}. Using bundled quotes.", e);
                    Self::bundled()
                }
            },
            None => Self::bundled(),
        };

        info!(
            "Quote corpus ready: {} quotes ({} with authors)",
            corpus.len(),
            corpus.authored_count()
        );
        corpus
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Number of quotes that carry an author
    pub fn authored_count(&self) -> usize {
        self.quotes.iter().filter(|q| q.author.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_quotes_parse() {
        let corpus = QuoteCorpus::from_json_str(BUNDLED_QUOTES_JSON)
            .expect("Bundled quote resource should be valid");
        assert!(corpus.len() > FALLBACK_QUOTE_TEXTS.len());
        assert!(corpus.authored_count() > 0);
    }

    #[test]
    fn test_fallback_has_three_anonymous_quotes() {
        let corpus = QuoteCorpus::fallback();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.authored_count(), 0);
        assert_eq!(corpus.quotes()[1].text, "Look far to see far.");
    }

    #[test]
    fn test_blank_and_duplicate_texts_are_dropped() {
        let corpus = QuoteCorpus::new(vec![
            Quote::new("A", Some("first")),
            Quote::new("   ", None),
            Quote::new("B", None),
            Quote::new("A", Some("second")),
            Quote::new("", Some("nobody")),
        ]);

        let texts: Vec<&str> = corpus.quotes().iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
        assert_eq!(
            corpus.quotes()[0].author.as_deref(),
            Some("first"),
            "First occurrence should win"
        );
    }

    #[test]
    fn test_empty_resource_is_rejected() {
        let result = QuoteCorpus::from_json_str(r#"{"quotes": []}"#);
        assert!(result.is_err());

        let result = QuoteCorpus::from_json_str(r#"{"quotes": [{"text": ""}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_resource_is_rejected() {
        assert!(QuoteCorpus::from_json_str("not json").is_err());
        assert!(QuoteCorpus::from_json_str(r#"{"items": []}"#).is_err());
        assert!(QuoteCorpus::from_json_str(r#"{"quotes": [{"author": "x"}]}"#).is_err());
    }
}
