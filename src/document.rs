//! Document model contract and an in-memory implementation.
//!
//! The document (sentences, tokens with stable identifiers, terms, and an
//! appendable entity layer) is owned externally; this crate only consumes
//! the narrow [`Document`] trait. [`MemoryDocument`] is a self-contained
//! implementation for tests and for callers without a richer store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A token of a sentence, read-only for this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Stable identifier within the document.
    pub id: String,
    /// Surface form.
    pub form: String,
    /// Zero-based sentence index within the document.
    pub sentence: usize,
    /// Zero-based position within the sentence.
    pub index: usize,
}

/// The term (lexical analysis) behind a token.
///
/// Lemma and morphological tag default to `"_"` when the analysis layer
/// is absent, which is also what the CoNLL columns expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Stable identifier within the document.
    pub id: String,
    /// Surface form.
    pub form: String,
    /// Lemma, `"_"` when unknown.
    pub lemma: String,
    /// Morphological tag, `"_"` when unknown.
    pub morphofeat: String,
}

impl Term {
    /// Create a term with placeholder lemma and morphological tag.
    #[must_use]
    pub fn new(id: impl Into<String>, form: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            form: form.into(),
            lemma: "_".to_string(),
            morphofeat: "_".to_string(),
        }
    }

    /// Set the lemma.
    #[must_use]
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Set the morphological tag.
    #[must_use]
    pub fn with_morphofeat(mut self, morphofeat: impl Into<String>) -> Self {
        self.morphofeat = morphofeat.into();
        self
    }
}

/// An entry of the document's entity layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntity {
    /// Identifiers of the covered terms, in token order.
    pub term_ids: Vec<String>,
    /// Entity type label.
    pub entity_type: String,
}

/// Narrow contract of the externally-owned document model.
///
/// The annotator reads sentences, resolves terms for token identifiers,
/// and appends entities. Nothing is ever removed or merged; repeated
/// annotation of the same sentence duplicates entities by design (no
/// duplicate detection is performed by this sink).
pub trait Document {
    /// All sentences of the document, in order.
    fn sentences(&self) -> Vec<Vec<Token>>;

    /// Resolve the terms behind the given token identifiers, in order.
    ///
    /// Fails with [`Error::OutOfRange`] when an identifier is unknown.
    fn terms_for_tokens(&self, token_ids: &[String]) -> Result<Vec<Term>>;

    /// Append an entity covering the given terms to the entity layer.
    fn new_entity(&mut self, term_ids: Vec<String>, entity_type: &str);
}

/// In-memory [`Document`] with a one-to-one token/term mapping.
///
/// Token identifiers are generated as `t{sentence}.{index}`. Terms start
/// with placeholder lemma/morphofeat; use [`MemoryDocument::set_term`] to
/// install a real analysis for a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    sentences: Vec<Vec<Token>>,
    terms: HashMap<String, Term>,
    entities: Vec<DocumentEntity>,
}

impl MemoryDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from tokenized sentences.
    #[must_use]
    pub fn from_sentences(sentences: &[&[&str]]) -> Self {
        let mut doc = Self::new();
        for forms in sentences {
            doc.push_sentence(forms);
        }
        doc
    }

    /// Append a sentence of token forms.
    pub fn push_sentence(&mut self, forms: &[&str]) {
        let sentence = self.sentences.len();
        let tokens: Vec<Token> = forms
            .iter()
            .enumerate()
            .map(|(index, form)| Token {
                id: format!("t{sentence}.{index}"),
                form: (*form).to_string(),
                sentence,
                index,
            })
            .collect();
        for token in &tokens {
            self.terms
                .insert(token.id.clone(), Term::new(token.id.clone(), &token.form));
        }
        self.sentences.push(tokens);
    }

    /// Replace the term behind a token identifier.
    pub fn set_term(&mut self, token_id: &str, term: Term) {
        self.terms.insert(token_id.to_string(), term);
    }

    /// The entity layer, in insertion order.
    #[must_use]
    pub fn entities(&self) -> &[DocumentEntity] {
        &self.entities
    }
}

impl Document for MemoryDocument {
    fn sentences(&self) -> Vec<Vec<Token>> {
        self.sentences.clone()
    }

    fn terms_for_tokens(&self, token_ids: &[String]) -> Result<Vec<Term>> {
        token_ids
            .iter()
            .map(|id| {
                self.terms
                    .get(id)
                    .cloned()
                    .ok_or_else(|| Error::out_of_range(format!("unknown token id {id:?}")))
            })
            .collect()
    }

    fn new_entity(&mut self, term_ids: Vec<String>, entity_type: &str) {
        self.entities.push(DocumentEntity {
            term_ids,
            entity_type: entity_type.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ids_are_stable() {
        let doc = MemoryDocument::from_sentences(&[&["a", "b"], &["c"]]);
        let sentences = doc.sentences();
        assert_eq!(sentences[0][1].id, "t0.1");
        assert_eq!(sentences[1][0].id, "t1.0");
        assert_eq!(sentences[1][0].sentence, 1);
    }

    #[test]
    fn test_terms_resolve_in_order() {
        let doc = MemoryDocument::from_sentences(&[&["John", "Smith"]]);
        let terms = doc
            .terms_for_tokens(&["t0.1".to_string(), "t0.0".to_string()])
            .unwrap();
        assert_eq!(terms[0].form, "Smith");
        assert_eq!(terms[1].form, "John");
        assert_eq!(terms[0].lemma, "_");
    }

    #[test]
    fn test_unknown_token_id_is_out_of_range() {
        let doc = MemoryDocument::from_sentences(&[&["a"]]);
        let err = doc.terms_for_tokens(&["t9.9".to_string()]).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));
    }

    #[test]
    fn test_entity_layer_is_append_only() {
        let mut doc = MemoryDocument::from_sentences(&[&["a", "b"]]);
        doc.new_entity(vec!["t0.0".to_string()], "PER");
        doc.new_entity(vec!["t0.0".to_string()], "PER");
        assert_eq!(doc.entities().len(), 2); // no duplicate detection
    }

    #[test]
    fn test_set_term_overrides_analysis() {
        let mut doc = MemoryDocument::from_sentences(&[&["works"]]);
        doc.set_term(
            "t0.0",
            Term::new("t0.0", "works").with_lemma("work").with_morphofeat("VBZ"),
        );
        let terms = doc.terms_for_tokens(&["t0.0".to_string()]).unwrap();
        assert_eq!(terms[0].lemma, "work");
        assert_eq!(terms[0].morphofeat, "VBZ");
    }
}
