//! Rule-based lexical/numeric name finding over token forms.
//!
//! A deliberately small grammar: numeric and temporal expressions that
//! are recognizable from token shape alone. Anything needing context or
//! a model belongs to the statistical source. Note that only some of the
//! produced types map to CoNLL codes; the BIO encoder reports the rest.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::span::CandidateSpan;
use crate::{ExactNameFinder, NameFinder, Result};

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:[.,]\d{3})+$|^\d+(?:[.,]\d+)?$").unwrap());
static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:[.,]\d+)?%$").unwrap());
static DATE_ISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static DATE_SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}$").unwrap());
static MONEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[$€£]\d[\d.,]*$").unwrap());
static MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i:January|February|March|April|May|June|July|August|September|October|November|December)$",
    )
    .unwrap()
});

/// Rule-based recognizer for numeric and temporal expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericFinder;

impl NumericFinder {
    /// Create the recognizer. Stateless; one instance serves any number
    /// of sentences.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl NameFinder for NumericFinder {
    fn find(&self, tokens: &[&str]) -> Result<Vec<CandidateSpan>> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            // "January 15" style bigrams.
            if MONTH.is_match(tokens[i]) && i + 1 < tokens.len() && NUMBER.is_match(tokens[i + 1]) {
                spans.push(CandidateSpan::lexical(i, i + 2, "DATE"));
                i += 2;
                continue;
            }

            let entity_type = if DATE_ISO.is_match(tokens[i]) || DATE_SLASH.is_match(tokens[i]) {
                Some("DATE")
            } else if PERCENT.is_match(tokens[i]) {
                Some("PERCENT")
            } else if MONEY.is_match(tokens[i]) {
                Some("MONEY")
            } else if NUMBER.is_match(tokens[i]) {
                Some("NUMBER")
            } else {
                None
            };
            if let Some(entity_type) = entity_type {
                spans.push(CandidateSpan::lexical(i, i + 1, entity_type));
            }
            i += 1;
        }
        Ok(spans)
    }

    fn name(&self) -> &'static str {
        "numeric-lexer"
    }
}

impl ExactNameFinder for NumericFinder {
    fn find_exact(&self, tokens: &[&str]) -> Result<Vec<CandidateSpan>> {
        self.find(tokens)
    }
}
