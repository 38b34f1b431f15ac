//! In-memory gazetteer exact matching.
//!
//! Matches are exact only: a span is proposed iff its whitespace-joined,
//! lowercased form equals a gazetteer phrase. No fuzzy or partial
//! matching, and overlapping proposals are allowed here; resolving them
//! is the fusion engine's job.
//!
//! Loading gazetteer files is a caller concern; construction takes plain
//! `(phrase, type)` pairs.

use std::collections::HashMap;

use crate::span::CandidateSpan;
use crate::{ExactNameFinder, NameFinder, Result};

/// Exact-match dictionary of entity phrases.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: HashMap<String, String>,
    max_phrase_tokens: usize,
}

impl Gazetteer {
    /// Create an empty gazetteer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a gazetteer from `(phrase, entity type)` pairs.
    pub fn from_entries<I, P, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: Into<String>,
    {
        let mut gazetteer = Self::new();
        for (phrase, entity_type) in entries {
            gazetteer.insert(phrase.as_ref(), entity_type);
        }
        gazetteer
    }

    /// Add a phrase. Later inserts of the same phrase overwrite the type.
    pub fn insert(&mut self, phrase: &str, entity_type: impl Into<String>) {
        let key = normalize(phrase);
        if key.is_empty() {
            return;
        }
        let tokens = key.split(' ').count();
        self.max_phrase_tokens = self.max_phrase_tokens.max(tokens);
        self.entries.insert(key, entity_type.into());
    }

    /// Number of phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no phrases are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lowercase and collapse whitespace so lookup is insensitive to both.
fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl NameFinder for Gazetteer {
    fn find(&self, tokens: &[&str]) -> Result<Vec<CandidateSpan>> {
        self.find_exact(tokens)
    }

    fn name(&self) -> &'static str {
        "gazetteer"
    }
}

impl ExactNameFinder for Gazetteer {
    fn find_exact(&self, tokens: &[&str]) -> Result<Vec<CandidateSpan>> {
        let mut spans = Vec::new();
        if self.entries.is_empty() {
            return Ok(spans);
        }
        for start in 0..tokens.len() {
            let longest = self.max_phrase_tokens.min(tokens.len() - start);
            // Longest window first, so containing matches precede
            // contained ones in the candidate order.
            for len in (1..=longest).rev() {
                let key = normalize(&tokens[start..start + len].join(" "));
                if let Some(entity_type) = self.entries.get(&key) {
                    spans.push(CandidateSpan::exact(start, start + len, entity_type.clone()));
                }
            }
        }
        Ok(spans)
    }
}
