//! Span and name types shared across the annotation pipeline.
//!
//! Everything here is token-indexed: a [`Span`] is a half-open range of
//! token positions within a single sentence, never a character range.
//! [`CandidateSpan`]s are produced by the source collaborators and consumed
//! by the fusion engine; a [`Name`] is a surviving span bound to the
//! concrete token identifiers it covers.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Half-open token-index range within one sentence.
///
/// Invariant for valid spans: `start < end` and `end <= sentence length`.
/// The invariant is not enforced at construction (sources hand spans in
/// untrusted); the fusion engine checks it per sentence and rejects
/// offenders with [`Error::InvalidSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start token index (inclusive).
    pub start: usize,
    /// End token index (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of tokens covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the span covers no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check whether this span's token range intersects another's.
    ///
    /// Containment and equality count as overlap; adjacency does not.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }

    /// Validate the span against a sentence of `sentence_len` tokens.
    pub(crate) fn check(&self, sentence_len: usize) -> Result<()> {
        if self.start >= self.end || self.end > sentence_len {
            return Err(Error::InvalidSpan {
                start: self.start,
                end: self.end,
                len: sentence_len,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Which collaborator proposed a candidate span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanSource {
    /// Statistical sequence tagger.
    Statistical,
    /// Dictionary exact-matcher.
    Dictionary,
    /// Rule-based lexical/numeric recognizer.
    Lexical,
}

/// Confidence assigned to exact dictionary matches.
///
/// Exact sources carry no model score; pinning them at the top of the
/// range folds source priority into the fusion tie-break key.
pub const EXACT_CONFIDENCE: f64 = 1.0;

/// Confidence assigned to rule-based lexical matches.
pub const LEXICAL_CONFIDENCE: f64 = 0.9;

/// A typed, scored span proposal from one source.
///
/// Never mutated after creation: the fusion engine only reorders, prunes
/// and selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSpan {
    /// Token range within the sentence.
    pub span: Span,
    /// Entity type label (e.g. `"PER"`, `"ORGANIZATION"`).
    pub entity_type: String,
    /// Tie-break key for overlap resolution, in `[0, 1]`.
    pub confidence: f64,
    /// Source that proposed the span.
    pub source: SpanSource,
}

impl CandidateSpan {
    /// Create a candidate span. Confidence is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(
        span: Span,
        entity_type: impl Into<String>,
        confidence: f64,
        source: SpanSource,
    ) -> Self {
        Self {
            span,
            entity_type: entity_type.into(),
            confidence: confidence.clamp(0.0, 1.0),
            source,
        }
    }

    /// Candidate from the statistical tagger, with a model score.
    #[must_use]
    pub fn statistical(
        start: usize,
        end: usize,
        entity_type: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self::new(
            Span::new(start, end),
            entity_type,
            confidence,
            SpanSource::Statistical,
        )
    }

    /// Exact dictionary match.
    #[must_use]
    pub fn exact(start: usize, end: usize, entity_type: impl Into<String>) -> Self {
        Self::new(
            Span::new(start, end),
            entity_type,
            EXACT_CONFIDENCE,
            SpanSource::Dictionary,
        )
    }

    /// Rule-based lexical match.
    #[must_use]
    pub fn lexical(start: usize, end: usize, entity_type: impl Into<String>) -> Self {
        Self::new(
            Span::new(start, end),
            entity_type,
            LEXICAL_CONFIDENCE,
            SpanSource::Lexical,
        )
    }
}

/// A fused entity span bound to the token identifiers it covers.
///
/// Created by materialization from a surviving [`CandidateSpan`];
/// immutable; discarded once written to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// Token range within the sentence.
    pub span: Span,
    /// Entity type label, carried through from the winning candidate.
    pub entity_type: String,
    /// Ordered identifiers of the covered tokens.
    pub token_ids: Vec<String>,
}

impl Name {
    /// Resolve the covered token identifiers by slicing the sentence's
    /// identifier array at `[start, end)`.
    ///
    /// Fails with [`Error::OutOfRange`] when the range does not fit the
    /// sentence. Defensive: with the fusion engine's validation upstream
    /// this cannot happen, and a failure here is treated as fatal.
    pub fn materialize(
        span: Span,
        entity_type: impl Into<String>,
        token_ids: &[String],
    ) -> Result<Self> {
        if span.is_empty() {
            return Err(Error::out_of_range(format!(
                "empty span {span} cannot cover any token"
            )));
        }
        let covered = token_ids.get(span.start..span.end).ok_or_else(|| {
            Error::out_of_range(format!(
                "span {span} does not fit sentence of {} token ids",
                token_ids.len()
            ))
        })?;
        Ok(Self {
            span,
            entity_type: entity_type.into(),
            token_ids: covered.to_vec(),
        })
    }

    /// Number of tokens covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// True when the name covers no tokens (cannot happen for
    /// materialized names).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_cases() {
        let a = Span::new(0, 2);
        assert!(a.overlaps(&Span::new(1, 3))); // partial
        assert!(a.overlaps(&Span::new(0, 2))); // equal
        assert!(a.overlaps(&Span::new(0, 5))); // contained
        assert!(!a.overlaps(&Span::new(2, 4))); // adjacent
        assert!(!a.overlaps(&Span::new(3, 4))); // disjoint
    }

    #[test]
    fn test_span_check() {
        assert!(Span::new(0, 2).check(2).is_ok());
        assert!(matches!(
            Span::new(0, 3).check(2),
            Err(Error::InvalidSpan { end: 3, len: 2, .. })
        ));
        assert!(Span::new(1, 1).check(5).is_err());
        assert!(Span::new(2, 1).check(5).is_err());
    }

    #[test]
    fn test_confidence_clamped() {
        let c = CandidateSpan::statistical(0, 1, "PER", 1.5);
        assert!((c.confidence - 1.0).abs() < f64::EPSILON);
        let c = CandidateSpan::statistical(0, 1, "PER", -0.5);
        assert!(c.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn test_materialize_slices_ids() {
        let ids: Vec<String> = ["w1", "w2", "w3", "w4"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let name = Name::materialize(Span::new(1, 3), "ORG", &ids).unwrap();
        assert_eq!(name.token_ids, vec!["w2".to_string(), "w3".to_string()]);
        assert_eq!(name.len(), 2);
    }

    #[test]
    fn test_materialize_out_of_range() {
        let ids: Vec<String> = vec!["w1".to_string()];
        assert!(matches!(
            Name::materialize(Span::new(0, 2), "ORG", &ids),
            Err(Error::OutOfRange(_))
        ));
        assert!(Name::materialize(Span::new(1, 1), "ORG", &ids).is_err());
    }

    #[test]
    fn test_token_coverage_round_trip() {
        let ids: Vec<String> = (0..6).map(|i| format!("t0.{i}")).collect();
        let span = Span::new(2, 5);
        let name = Name::materialize(span, "LOC", &ids).unwrap();
        // Re-derive the span from the covered ids.
        let start = ids.iter().position(|id| id == &name.token_ids[0]).unwrap();
        let end = start + name.token_ids.len();
        assert_eq!((start, end), (span.start, span.end));
    }
}
