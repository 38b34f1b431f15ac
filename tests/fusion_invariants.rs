//! Property tests for the span fusion engine.

use nerfuse::fuse::{drop_overlapping, fuse};
use nerfuse::{AnnotationMode, CandidateSpan, Span, SpanSource};
use proptest::prelude::*;

fn candidate() -> impl Strategy<Value = CandidateSpan> {
    (
        0usize..30,
        1usize..5,
        0u8..3,
        0u32..=100,
        prop::sample::select(vec!["PER", "ORG", "LOC", "MISC"]),
    )
        .prop_map(|(start, len, source, confidence, entity_type)| {
            let source = match source {
                0 => SpanSource::Statistical,
                1 => SpanSource::Dictionary,
                _ => SpanSource::Lexical,
            };
            CandidateSpan::new(
                Span::new(start, start + len),
                entity_type,
                f64::from(confidence) / 100.0,
                source,
            )
        })
}

/// The greedy visiting order: confidence desc, length desc, start asc.
fn rank_order(a: &CandidateSpan, b: &CandidateSpan) -> std::cmp::Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.span.len().cmp(&a.span.len()))
        .then_with(|| a.span.start.cmp(&b.span.start))
}

proptest! {
    #[test]
    fn fused_spans_never_overlap(candidates in prop::collection::vec(candidate(), 0..40)) {
        let fused = drop_overlapping(candidates);
        for i in 0..fused.len() {
            for j in (i + 1)..fused.len() {
                let a = fused[i].span;
                let b = fused[j].span;
                prop_assert!(
                    a.end <= b.start || b.end <= a.start,
                    "overlap between {a} and {b}"
                );
            }
        }
    }

    #[test]
    fn fusion_is_deterministic(candidates in prop::collection::vec(candidate(), 0..40)) {
        let once = drop_overlapping(candidates.clone());
        let twice = drop_overlapping(candidates);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn output_is_sorted_and_a_subset(candidates in prop::collection::vec(candidate(), 0..40)) {
        let fused = drop_overlapping(candidates.clone());
        for pair in fused.windows(2) {
            prop_assert!(
                (pair[0].span.start, pair[0].span.end) < (pair[1].span.start, pair[1].span.end)
            );
        }
        for kept in &fused {
            prop_assert!(candidates.contains(kept));
        }
    }

    #[test]
    fn top_ranked_candidate_always_survives(
        candidates in prop::collection::vec(candidate(), 1..40)
    ) {
        let mut by_rank = candidates.clone();
        by_rank.sort_by(rank_order);
        let fused = drop_overlapping(candidates);
        prop_assert!(fused.contains(&by_rank[0]));
    }

    #[test]
    fn dictionary_type_wins_exact_duplicates(
        start in 0usize..5,
        len in 1usize..3,
        confidence in 0.0f64..=1.0,
    ) {
        let fused = fuse(
            &AnnotationMode::post_process(),
            vec![CandidateSpan::statistical(start, start + len, "PER", confidence)],
            vec![CandidateSpan::exact(start, start + len, "ORG")],
            vec![],
            10,
        )
        .unwrap();
        prop_assert_eq!(fused.len(), 1);
        prop_assert_eq!(fused[0].entity_type.as_str(), "ORG");
    }

    #[test]
    fn fuse_never_panics_on_valid_spans(
        candidates in prop::collection::vec(candidate(), 0..40)
    ) {
        // All generated spans fit a 40-token sentence, so fusion must
        // succeed for every mode.
        for mode in [
            AnnotationMode::statistical(),
            AnnotationMode::dictionary_only(),
            AnnotationMode::post_process().with_lexical(true),
        ] {
            let result = fuse(
                &mode,
                candidates.clone(),
                candidates.clone(),
                candidates.clone(),
                40,
            );
            prop_assert!(result.is_ok());
        }
    }
}
