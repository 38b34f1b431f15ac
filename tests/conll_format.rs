//! End-to-end BIO output checks across both CoNLL dialects.

use nerfuse::{
    AnnotationMode, Annotator, CandidateSpan, ConllDialect, Gazetteer, MemoryDocument, MockFinder,
};

fn post_process_annotator() -> Annotator {
    let tagger = MockFinder::new("tagger")
        .with_spans(vec![CandidateSpan::statistical(0, 2, "PERSON", 0.9)]);
    let dictionary = Gazetteer::from_entries([("Acme", "ORG")]);
    Annotator::builder()
        .mode(AnnotationMode::post_process())
        .statistical(tagger)
        .dictionary(dictionary)
        .build()
        .unwrap()
}

#[test]
fn conll2002_block_for_fused_sources() {
    let doc = MemoryDocument::from_sentences(&[&["John", "Smith", "works", "at", "Acme"]]);
    let (out, report) = post_process_annotator()
        .annotate_to_conll(&doc, ConllDialect::Conll2002)
        .unwrap();
    assert!(report.is_clean());
    assert_eq!(report.entities, 2);
    assert_eq!(
        out,
        "John\t_\t_\tB-PER\n\
         Smith\t_\t_\tI-PER\n\
         works\t_\t_\tO\n\
         at\t_\t_\tO\n\
         Acme\t_\t_\tB-ORG\n\n"
    );
}

#[test]
fn dialects_diverge_only_on_sentence_initial_entities() {
    let tagger = MockFinder::new("tagger")
        .with_spans(vec![CandidateSpan::statistical(0, 1, "ORG", 0.9)]);
    let annotator = Annotator::builder()
        .mode(AnnotationMode::statistical())
        .statistical(tagger)
        .build()
        .unwrap();
    let doc = MemoryDocument::from_sentences(&[&["Acme", "expanded"]]);

    let (out02, _) = annotator
        .annotate_to_conll(&doc, ConllDialect::Conll2002)
        .unwrap();
    let (out03, _) = annotator
        .annotate_to_conll(&doc, ConllDialect::Conll2003)
        .unwrap();

    assert_eq!(out02, "Acme\t_\t_\tB-ORG\nexpanded\t_\t_\tO\n\n");
    // The 2003 encoder only uses B- straight after another entity, so a
    // sentence-initial entity stays I-.
    assert_eq!(out03, "Acme\t_\t_\tI-ORG\nexpanded\t_\t_\tO\n\n");
}

#[test]
fn output_is_byte_identical_across_runs() {
    let doc = MemoryDocument::from_sentences(&[
        &["John", "Smith", "works", "at", "Acme"],
        &["Acme", "grew"],
    ]);
    let annotator = post_process_annotator();
    let (first, _) = annotator
        .annotate_to_conll(&doc, ConllDialect::Conll2003)
        .unwrap();
    let (second, _) = annotator
        .annotate_to_conll(&doc, ConllDialect::Conll2003)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_token_gets_exactly_one_line() {
    let sentences: &[&[&str]] = &[
        &["John", "Smith", "works", "at", "Acme"],
        &["Acme", "grew"],
        &["nothing", "here"],
    ];
    let doc = MemoryDocument::from_sentences(sentences);
    let (out, _) = post_process_annotator()
        .annotate_to_conll(&doc, ConllDialect::Conll2002)
        .unwrap();

    let token_total: usize = sentences.iter().map(|s| s.len()).sum();
    let lines: Vec<&str> = out.lines().collect();
    let tagged = lines.iter().filter(|l| !l.is_empty()).count();
    let blanks = lines.iter().filter(|l| l.is_empty()).count();
    assert_eq!(tagged, token_total);
    assert_eq!(blanks, sentences.len());
    assert!(lines
        .iter()
        .filter(|l| !l.is_empty())
        .all(|l| l.matches('\t').count() == 3));
}

#[test]
fn skipped_sentence_emits_no_block() {
    // [0, 3) is out of bounds for the two-token second sentence.
    let tagger = MockFinder::new("tagger")
        .with_spans(vec![CandidateSpan::statistical(0, 3, "ORG", 0.9)]);
    let annotator = Annotator::builder()
        .mode(AnnotationMode::statistical())
        .statistical(tagger)
        .build()
        .unwrap();
    let doc = MemoryDocument::from_sentences(&[&["Acme", "Corp", "Ltd"], &["it", "grew"]]);

    let (out, report) = annotator
        .annotate_to_conll(&doc, ConllDialect::Conll2002)
        .unwrap();
    assert_eq!(report.sentences, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, 1);
    assert_eq!(
        out,
        "Acme\t_\t_\tB-ORG\nCorp\t_\t_\tI-ORG\nLtd\t_\t_\tI-ORG\n\n"
    );
}

#[test]
fn lexical_types_without_conll_codes_fall_back_to_outside() {
    // NUMBER has no 3-letter CoNLL code, so its lines come out as O.
    let annotator = Annotator::builder()
        .mode(AnnotationMode::statistical().with_lexical(true))
        .statistical(MockFinder::new("tagger"))
        .lexical(nerfuse::NumericFinder::new())
        .build()
        .unwrap();
    let doc = MemoryDocument::from_sentences(&[&["revenue", "hit", "1,500"]]);
    let (out, report) = annotator
        .annotate_to_conll(&doc, ConllDialect::Conll2002)
        .unwrap();
    assert_eq!(report.entities, 1); // fused, but not encodable
    assert_eq!(out, "revenue\t_\t_\tO\nhit\t_\t_\tO\n1,500\t_\t_\tO\n\n");
}
