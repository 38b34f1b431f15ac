//! Pipeline orchestration: run the active sources per sentence, fuse
//! their proposals, materialize names, and write them to a sink.
//!
//! The [`Annotator`] owns its sources (constructor-injected, no shared
//! globals) and an immutable [`AnnotationMode`]. Each sentence is
//! processed independently: nothing persists across sentences, so a
//! caller may fan sentences out to worker threads and serialize only the
//! sink writes.

use crate::conll::{self, ConllDialect};
use crate::document::{Document, Token};
use crate::fuse;
use crate::mode::AnnotationMode;
use crate::span::Name;
use crate::{Error, ExactNameFinder, NameFinder, Result};

/// Outcome summary of an annotation run.
///
/// Sentences that failed with [`Error::InvalidSpan`] are skipped rather
/// than aborting the run; they are listed here with their indices, and
/// everything written for earlier sentences stays written.
#[derive(Debug, Default)]
pub struct AnnotationReport {
    /// Sentences seen, including skipped ones.
    pub sentences: usize,
    /// Entities written to the sink.
    pub entities: usize,
    /// Skipped sentences with the error that caused each skip.
    pub skipped: Vec<(usize, Error)>,
}

impl AnnotationReport {
    /// True when no sentence was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Builder for [`Annotator`] with fluent source wiring.
#[derive(Default)]
pub struct AnnotatorBuilder {
    mode: Option<AnnotationMode>,
    statistical: Option<Box<dyn NameFinder>>,
    dictionary: Option<Box<dyn ExactNameFinder>>,
    lexical: Option<Box<dyn NameFinder>>,
}

impl AnnotatorBuilder {
    /// Set the annotation mode. Defaults to statistical-only.
    #[must_use]
    pub fn mode(mut self, mode: AnnotationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Wire the statistical sequence tagger.
    #[must_use]
    pub fn statistical<F: NameFinder + 'static>(mut self, finder: F) -> Self {
        self.statistical = Some(Box::new(finder));
        self
    }

    /// Wire the dictionary exact-matcher.
    #[must_use]
    pub fn dictionary<F: ExactNameFinder + 'static>(mut self, finder: F) -> Self {
        self.dictionary = Some(Box::new(finder));
        self
    }

    /// Wire the rule-based lexical recognizer.
    #[must_use]
    pub fn lexical<F: NameFinder + 'static>(mut self, finder: F) -> Self {
        self.lexical = Some(Box::new(finder));
        self
    }

    /// Build the annotator, checking the wiring against the mode.
    ///
    /// Fails with [`Error::Configuration`] when the mode activates a
    /// source that was not wired, so misconfiguration surfaces before
    /// any sentence is processed.
    pub fn build(self) -> Result<Annotator> {
        let mode = self.mode.unwrap_or_else(AnnotationMode::statistical);
        if mode.statistical_active() && self.statistical.is_none() {
            return Err(Error::configuration(
                "mode requires a statistical source, but none was wired",
            ));
        }
        if mode.dictionary_active() && self.dictionary.is_none() {
            return Err(Error::configuration(
                "mode requires a dictionary source, but none was wired",
            ));
        }
        if mode.lexical() && self.lexical.is_none() {
            return Err(Error::configuration(
                "lexical augmentation enabled, but no lexical source was wired",
            ));
        }
        Ok(Annotator {
            mode,
            statistical: self.statistical,
            dictionary: self.dictionary,
            lexical: self.lexical,
        })
    }
}

/// Multi-source named-entity annotator.
///
/// # Example
///
/// ```rust
/// use nerfuse::{AnnotationMode, Annotator, CandidateSpan, MockFinder};
/// use nerfuse::{Gazetteer, MemoryDocument};
///
/// let statistical = MockFinder::new("tagger")
///     .with_spans(vec![CandidateSpan::statistical(0, 2, "PER", 0.9)]);
/// let dictionary = Gazetteer::from_entries([("Acme", "ORG")]);
///
/// let annotator = Annotator::builder()
///     .mode(AnnotationMode::post_process())
///     .statistical(statistical)
///     .dictionary(dictionary)
///     .build()?;
///
/// let mut doc = MemoryDocument::from_sentences(&[
///     &["John", "Smith", "works", "at", "Acme"],
/// ]);
/// let report = annotator.annotate(&mut doc)?;
/// assert_eq!(report.entities, 2);
/// # Ok::<(), nerfuse::Error>(())
/// ```
pub struct Annotator {
    mode: AnnotationMode,
    statistical: Option<Box<dyn NameFinder>>,
    dictionary: Option<Box<dyn ExactNameFinder>>,
    lexical: Option<Box<dyn NameFinder>>,
}

impl std::fmt::Debug for Annotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotator")
            .field("mode", &self.mode)
            .field("statistical", &self.statistical.as_ref().map(|s| s.name()))
            .field("dictionary", &self.dictionary.as_ref().map(|s| s.name()))
            .field("lexical", &self.lexical.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl Annotator {
    /// Create a builder.
    #[must_use]
    pub fn builder() -> AnnotatorBuilder {
        AnnotatorBuilder::default()
    }

    /// The resolved mode this annotator runs in.
    #[must_use]
    pub fn mode(&self) -> &AnnotationMode {
        &self.mode
    }

    /// Annotate one sentence: run the active sources, fuse, materialize.
    ///
    /// Pure per sentence; holds no state across calls.
    pub fn annotate_sentence(&self, tokens: &[Token]) -> Result<Vec<Name>> {
        let forms: Vec<&str> = tokens.iter().map(|t| t.form.as_str()).collect();

        let statistical = match &self.statistical {
            Some(finder) if self.mode.statistical_active() => finder.find(&forms)?,
            _ => Vec::new(),
        };
        let dictionary = match &self.dictionary {
            Some(finder) if self.mode.dictionary_active() => finder.find_exact(&forms)?,
            _ => Vec::new(),
        };
        let lexical = match &self.lexical {
            Some(finder) if self.mode.lexical() => finder.find(&forms)?,
            _ => Vec::new(),
        };

        let fused = fuse::fuse(&self.mode, statistical, dictionary, lexical, tokens.len())?;

        let ids: Vec<String> = tokens.iter().map(|t| t.id.clone()).collect();
        fused
            .into_iter()
            .map(|candidate| Name::materialize(candidate.span, candidate.entity_type, &ids))
            .collect()
    }

    /// Annotate the whole document, appending entities to its entity
    /// layer in sentence order, then within-sentence span-start order.
    pub fn annotate<D: Document>(&self, doc: &mut D) -> Result<AnnotationReport> {
        let sentences = doc.sentences();
        let mut report = AnnotationReport::default();
        for (index, sentence) in sentences.iter().enumerate() {
            report.sentences += 1;
            match self.annotate_sentence(sentence) {
                Ok(names) => {
                    for name in names {
                        let terms = doc.terms_for_tokens(&name.token_ids)?;
                        let term_ids: Vec<String> = terms.into_iter().map(|t| t.id).collect();
                        doc.new_entity(term_ids, &name.entity_type);
                        report.entities += 1;
                    }
                }
                Err(err @ Error::InvalidSpan { .. }) => {
                    log::warn!("sentence {index} skipped: {err}");
                    report.skipped.push((index, err));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }

    /// Annotate the whole document and render it as a BIO-tagged table.
    ///
    /// A skipped sentence emits no block; blocks for earlier sentences
    /// are preserved in the returned text.
    pub fn annotate_to_conll<D: Document>(
        &self,
        doc: &D,
        dialect: ConllDialect,
    ) -> Result<(String, AnnotationReport)> {
        let mut out = String::new();
        let mut report = AnnotationReport::default();
        for (index, sentence) in doc.sentences().iter().enumerate() {
            report.sentences += 1;
            let names = match self.annotate_sentence(sentence) {
                Ok(names) => names,
                Err(err @ Error::InvalidSpan { .. }) => {
                    log::warn!("sentence {index} skipped: {err}");
                    report.skipped.push((index, err));
                    continue;
                }
                Err(err) => return Err(err),
            };
            let ids: Vec<String> = sentence.iter().map(|t| t.id.clone()).collect();
            let terms = doc.terms_for_tokens(&ids)?;
            report.entities += names.len();
            conll::encode_sentence(&mut out, &terms, &names, dialect);
        }
        Ok((out, report))
    }
}
