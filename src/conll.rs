//! BIO serialization of materialized names in two CoNLL dialects.
//!
//! Output is a tab-separated table, one token per line
//! (`form \t lemma \t morphofeat \t BIO-tag`), one blank line per
//! sentence boundary, no header.
//!
//! # Dialects
//!
//! The two dialects differ only in the prefix of the *first* token of an
//! entity:
//!
//! | | first token | non-first tokens |
//! |---|---|---|
//! | [`ConllDialect::Conll2002`] | always `B-` | `I-` |
//! | [`ConllDialect::Conll2003`] | `B-` only straight after another entity, else `I-` | `I-` |
//!
//! The 2003 rule means a lone, sentence-initial entity is tagged `I-`
//! rather than `B-`. That contradicts textbook BIO but is the behavior
//! this encoder has always had; downstream consumers depend on it, so it
//! is preserved and documented rather than fixed.

use serde::{Deserialize, Serialize};

use crate::document::Term;
use crate::span::Name;
use crate::{Error, Result};

/// CoNLL output dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConllDialect {
    /// CoNLL-2002 style: every entity starts with `B-`.
    Conll2002,
    /// CoNLL-2003 style: `B-` only between adjacent entities.
    Conll2003,
}

impl std::fmt::Display for ConllDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConllDialect::Conll2002 => write!(f, "conll02"),
            ConllDialect::Conll2003 => write!(f, "conll03"),
        }
    }
}

/// Normalize an entity type label to its CoNLL 3-letter code.
///
/// `PER`/`ORG`/`LOC`/`GPE`-prefixed labels keep their first three
/// characters (so `"PERSON"` becomes `"PER"`); `MISC` is kept verbatim.
/// Anything else fails with [`Error::UnknownType`]: silently dropping
/// unknown labels would corrupt the column alignment downstream.
pub fn conll_type(entity_type: &str) -> Result<&str> {
    if entity_type.starts_with("PER")
        || entity_type.starts_with("ORG")
        || entity_type.starts_with("LOC")
        || entity_type.starts_with("GPE")
    {
        Ok(&entity_type[..3])
    } else if entity_type.eq_ignore_ascii_case("MISC") {
        Ok(entity_type)
    } else {
        Err(Error::unknown_type(entity_type))
    }
}

/// BIO prefix for one entity token.
///
/// `first` marks the first token of the entity; `previous_is_entity` is
/// the state on entering the entity.
fn bio_prefix(dialect: ConllDialect, first: bool, previous_is_entity: bool) -> &'static str {
    match dialect {
        ConllDialect::Conll2002 => {
            if first {
                "B-"
            } else {
                "I-"
            }
        }
        // Inherited 2003 quirk: B- only when the entity directly follows
        // another entity, even for the entity's first token.
        ConllDialect::Conll2003 => {
            if first && previous_is_entity {
                "B-"
            } else {
                "I-"
            }
        }
    }
}

fn outside_line(out: &mut String, term: &Term) {
    out.push_str(&format!(
        "{}\t{}\t{}\tO\n",
        term.form, term.lemma, term.morphofeat
    ));
}

/// Encode one sentence as a BIO-tagged block.
///
/// Walks the sentence tokens in order, skipping ahead by span length
/// whenever a token begins a [`Name`]. Emits exactly one line per term
/// plus a terminating blank line. Names must be within range and
/// pairwise non-overlapping (the fusion engine guarantees both); an
/// entity whose type has no CoNLL code is reported and its tokens fall
/// back to `O`.
pub fn encode_sentence(out: &mut String, terms: &[Term], names: &[Name], dialect: ConllDialect) {
    // Index entities by their starting token.
    let mut starts: Vec<Option<&Name>> = vec![None; terms.len()];
    for name in names {
        if let Some(slot) = starts.get_mut(name.span.start) {
            *slot = Some(name);
        }
    }

    let mut previous_is_entity = false;
    let mut i = 0;
    while i < terms.len() {
        let Some(name) = starts[i] else {
            outside_line(out, &terms[i]);
            previous_is_entity = false;
            i += 1;
            continue;
        };

        // Materialization guarantees the range fits; the clamp must
        // never actually truncate.
        debug_assert!(
            name.span.end <= terms.len(),
            "name {} exceeds sentence of {} terms",
            name.span,
            terms.len()
        );
        let end = name.span.end.min(terms.len());
        match conll_type(&name.entity_type) {
            Ok(ne_type) => {
                for (j, term) in terms[i..end].iter().enumerate() {
                    let prefix = bio_prefix(dialect, j == 0, previous_is_entity);
                    out.push_str(&format!(
                        "{}\t{}\t{}\t{}{}\n",
                        term.form, term.lemma, term.morphofeat, prefix, ne_type
                    ));
                }
                previous_is_entity = true;
            }
            Err(err) => {
                log::warn!("dropping entity lines for span {}: {err}", name.span);
                for term in &terms[i..end] {
                    outside_line(out, term);
                }
                previous_is_entity = false;
            }
        }
        i = end;
    }

    out.push('\n'); // end of sentence
}
