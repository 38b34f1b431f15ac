//! # nerfuse
//!
//! Multi-source named-entity span fusion with CoNLL BIO serialization.
//!
//! Up to three independent sources propose entity spans over the same
//! tokenized sentence — a statistical sequence tagger, a dictionary
//! exact-matcher, and a rule-based lexical recognizer. This crate
//! reconciles their overlapping and duplicate proposals into one
//! authoritative, conflict-free set of entity spans, then serializes the
//! result either into a document's entity layer or as a BIO-tagged
//! column table in one of two CoNLL dialects.
//!
//! ```text
//!            ┌──────────────┐
//! config ───▶│ mode resolver │──▶ AnnotationMode (computed once)
//!            └──────────────┘
//!
//! per sentence:
//!   statistical ─┐
//!   dictionary ──┼─▶ span fusion ─▶ name materializer ─▶ entity sink
//!   lexical ─────┘   (dedup +        (spans bound to      (document
//!                     overlap         token ids)           entity layer,
//!                     resolution)                          or CoNLL BIO)
//! ```
//!
//! Source internals (model decoding, dictionary files, lexer grammars)
//! are out of scope: sources are anything implementing [`NameFinder`].
//! The crate ships two reference sources — [`Gazetteer`] for exact
//! dictionary matching and [`NumericFinder`] for rule-based numeric
//! expressions — while the statistical tagger is always injected by the
//! caller.
//!
//! ## Quick start
//!
//! ```rust
//! use nerfuse::{
//!     AnnotationMode, Annotator, CandidateSpan, ConllDialect, MemoryDocument, MockFinder,
//! };
//!
//! // Any NameFinder works here; MockFinder stands in for a real tagger.
//! let tagger = MockFinder::new("tagger")
//!     .with_spans(vec![CandidateSpan::statistical(0, 2, "PERSON", 0.9)]);
//!
//! let annotator = Annotator::builder()
//!     .mode(AnnotationMode::statistical())
//!     .statistical(tagger)
//!     .build()?;
//!
//! let doc = MemoryDocument::from_sentences(&[&["John", "Smith", "laughs"]]);
//! let (conll, report) = annotator.annotate_to_conll(&doc, ConllDialect::Conll2002)?;
//! assert!(report.is_clean());
//! assert_eq!(
//!     conll,
//!     "John\t_\t_\tB-PER\nSmith\t_\t_\tI-PER\nlaughs\t_\t_\tO\n\n"
//! );
//! # Ok::<(), nerfuse::Error>(())
//! ```
//!
//! ## Guarantees
//!
//! - **No overlaps**: fused spans are pairwise non-overlapping.
//! - **Determinism**: identical inputs yield byte-identical output.
//! - **Dictionary precedence**: in post-process mode, a dictionary span
//!   that exactly matches a statistical span wins the type label.
//! - **Per-sentence isolation**: no state crosses sentence boundaries;
//!   a bad span fails only its own sentence.

#![warn(missing_docs)]

pub mod conll;
pub mod fuse;

mod annotate;
mod document;
mod error;
mod gazetteer;
mod lexer;
mod mode;
mod span;

pub use annotate::{AnnotationReport, Annotator, AnnotatorBuilder};
pub use conll::ConllDialect;
pub use document::{Document, DocumentEntity, MemoryDocument, Term, Token};
pub use error::{Error, Result};
pub use gazetteer::Gazetteer;
pub use lexer::NumericFinder;
pub use mode::{
    AnnotationMode, DictOption, ModeConfig, Primary, DEFAULT_DICT_OPTION, DEFAULT_LEXER_OPTION,
};
pub use span::{CandidateSpan, Name, Span, SpanSource, EXACT_CONFIDENCE, LEXICAL_CONFIDENCE};

/// Trait for entity span sources.
///
/// This is the single capability interface the fusion engine depends
/// on; statistical, dictionary, and lexical sources are all distinct
/// implementations of it. Implementations must be safe to call from
/// multiple threads (`Send + Sync`) so callers can process sentences in
/// parallel.
pub trait NameFinder: Send + Sync {
    /// Propose candidate spans for one sentence of token forms.
    ///
    /// Spans are token-indexed and untrusted: the fusion engine
    /// validates them against the sentence length.
    fn find(&self, tokens: &[&str]) -> Result<Vec<CandidateSpan>>;

    /// Identifier used in logs.
    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// Sources that support exact matching with no partial or fuzzy hits.
///
/// Dictionary and lexical sources expose this; the post-process and
/// dictionary-only modes only ever consult `find_exact`.
pub trait ExactNameFinder: NameFinder {
    /// Propose exact-match candidate spans for one sentence.
    fn find_exact(&self, tokens: &[&str]) -> Result<Vec<CandidateSpan>>;
}

/// A canned-response source for tests and examples.
///
/// Returns the same spans for every sentence, regardless of input.
///
/// # Example
///
/// ```rust
/// use nerfuse::{CandidateSpan, MockFinder, NameFinder};
///
/// let finder = MockFinder::new("mock")
///     .with_spans(vec![CandidateSpan::statistical(0, 1, "PER", 0.8)]);
/// assert_eq!(finder.find(&["John"]).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockFinder {
    name: &'static str,
    spans: Vec<CandidateSpan>,
}

impl MockFinder {
    /// Create a mock source with no spans.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            spans: Vec::new(),
        }
    }

    /// Set the spans to return for every sentence.
    #[must_use]
    pub fn with_spans(mut self, spans: Vec<CandidateSpan>) -> Self {
        self.spans = spans;
        self
    }
}

impl NameFinder for MockFinder {
    fn find(&self, _tokens: &[&str]) -> Result<Vec<CandidateSpan>> {
        Ok(self.spans.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl ExactNameFinder for MockFinder {
    fn find_exact(&self, _tokens: &[&str]) -> Result<Vec<CandidateSpan>> {
        Ok(self.spans.clone())
    }
}

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use nerfuse::prelude::*;
    //!
    //! let mode = AnnotationMode::post_process().with_lexical(true);
    //! assert!(mode.dictionary_active());
    //! ```
    pub use crate::annotate::{AnnotationReport, Annotator, AnnotatorBuilder};
    pub use crate::conll::ConllDialect;
    pub use crate::document::{Document, MemoryDocument, Term, Token};
    pub use crate::error::{Error, Result};
    pub use crate::gazetteer::Gazetteer;
    pub use crate::lexer::NumericFinder;
    pub use crate::mode::{AnnotationMode, ModeConfig};
    pub use crate::span::{CandidateSpan, Name, Span, SpanSource};
    pub use crate::{ExactNameFinder, MockFinder, NameFinder};
}
