//! Span fusion: merge candidate lists from multiple sources into one
//! conflict-free span list.
//!
//! ```text
//! statistical ──┐
//!               ├─ primary-mode merge ──┐
//! dictionary ───┘                       ├─ drop_overlapping ──▶ fused
//! lexical ──────── appended last ───────┘
//! ```
//!
//! The engine is stateless: every function takes the per-sentence
//! candidate lists and returns a fresh result, so sentences can be fused
//! independently and in any order.
//!
//! # Overlap resolution
//!
//! [`drop_overlapping`] selects a conflict-free subset with a
//! deterministic greedy rule: candidates are visited by confidence
//! descending, then span length descending, then start index ascending,
//! and a candidate is accepted iff it is disjoint from everything already
//! accepted. Higher-ranked, longer, earlier candidates therefore always
//! win conflicts, and identical inputs always produce identical output.

use crate::mode::{AnnotationMode, Primary};
use crate::span::CandidateSpan;
use crate::Result;

/// Validate every candidate against the sentence length.
///
/// Fails with [`crate::Error::InvalidSpan`] on the first empty,
/// inverted, or out-of-bounds span.
pub fn validate(candidates: &[CandidateSpan], sentence_len: usize) -> Result<()> {
    for candidate in candidates {
        candidate.span.check(sentence_len)?;
    }
    Ok(())
}

/// Post-process merge rule: remove every statistical span that exactly
/// equals (same start and end) a dictionary span.
///
/// The dictionary's label wins for exact duplicates; the caller then
/// concatenates the pruned statistical list with the full dictionary
/// list.
pub fn prune_exact_duplicates(statistical: &mut Vec<CandidateSpan>, dictionary: &[CandidateSpan]) {
    statistical.retain(|s| !dictionary.iter().any(|d| d.span == s.span));
}

/// Select a conflict-free subset of candidates.
///
/// Greedy and deterministic; see the module docs for the visiting order.
/// The surviving spans are returned sorted by `(start, end)`, pairwise
/// non-overlapping.
#[must_use]
pub fn drop_overlapping(mut candidates: Vec<CandidateSpan>) -> Vec<CandidateSpan> {
    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.span.len().cmp(&a.span.len()))
            .then_with(|| a.span.start.cmp(&b.span.start))
    });

    let mut accepted: Vec<CandidateSpan> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if accepted
            .iter()
            .all(|kept| !kept.span.overlaps(&candidate.span))
        {
            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|c| (c.span.start, c.span.end));
    accepted
}

/// Fuse the per-sentence outputs of the active sources into one
/// conflict-free span list.
///
/// Applies the primary-mode merge (statistical, dictionary-only, or
/// statistical + dictionary post-process), appends lexical candidates
/// last when augmentation is enabled, then resolves overlaps.
///
/// All three lists are validated against `sentence_len` up front; a bad
/// span from any source fails the whole sentence with
/// [`crate::Error::InvalidSpan`].
pub fn fuse(
    mode: &AnnotationMode,
    statistical: Vec<CandidateSpan>,
    dictionary: Vec<CandidateSpan>,
    lexical: Vec<CandidateSpan>,
    sentence_len: usize,
) -> Result<Vec<CandidateSpan>> {
    validate(&statistical, sentence_len)?;
    validate(&dictionary, sentence_len)?;
    validate(&lexical, sentence_len)?;

    let mut combined = match mode.primary() {
        Primary::Statistical { .. } => statistical,
        Primary::DictionaryOnly => dictionary,
        Primary::PostProcess => {
            let mut pruned = statistical;
            prune_exact_duplicates(&mut pruned, &dictionary);
            pruned.extend(dictionary);
            pruned
        }
    };

    if mode.lexical() {
        combined.extend(lexical);
    }

    Ok(drop_overlapping(combined))
}
