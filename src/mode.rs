//! Mode resolution: which sources run, and in what combination.
//!
//! The original design scattered the source selection across a tangle of
//! boolean flags checked at every annotation call. Here the flags are
//! resolved exactly once, up front, into an immutable [`AnnotationMode`]
//! value; everything downstream branches on that value and nothing else.
//!
//! # Resolution rules
//!
//! First match wins:
//!
//! 1. dictionary configured, option `tag` — dictionary-only tagging, the
//!    statistical source never runs.
//! 2. dictionary configured, option `post` — statistical tagging,
//!    dictionary applied as a post-process (exact duplicates take the
//!    dictionary's label).
//! 3. dictionary configured, option left at its default (`none`) —
//!    statistical tagging with dictionary feature enrichment (a detail
//!    of the statistical collaborator, invisible to fusion).
//! 4. otherwise — statistical-only.
//!
//! Lexical augmentation is an independent toggle on top of whichever
//! primary mode was selected.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default sentinel for the rule-based lexer option: disabled.
pub const DEFAULT_LEXER_OPTION: &str = "off";

/// Default sentinel for the dictionary option: feature enrichment only.
pub const DEFAULT_DICT_OPTION: &str = "none";

/// How a configured dictionary participates in tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DictOption {
    /// Dictionary-only tagging; no statistical source runs.
    Tag,
    /// Statistical tagging post-processed with exact dictionary matches.
    Post,
}

impl FromStr for DictOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("tag") {
            Ok(DictOption::Tag)
        } else if s.eq_ignore_ascii_case("post") {
            Ok(DictOption::Post)
        } else {
            Err(Error::configuration(format!(
                "unrecognized dictionary option {s:?} (expected \"tag\" or \"post\")"
            )))
        }
    }
}

/// Flat key-value configuration consumed by the mode resolver.
///
/// This mirrors the option surface of the original pipeline; it is the
/// whole configuration contract of the crate. Anything beyond these keys
/// (model paths, dictionary file formats) belongs to the collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeConfig {
    /// Path of the configured dictionary, if any. Only its presence
    /// matters here; loading is the dictionary collaborator's job.
    pub dictionary_path: Option<String>,
    /// Dictionary option (`"tag"` or `"post"`); `None` or the
    /// [`DEFAULT_DICT_OPTION`] sentinel selects the default.
    pub dict_option: Option<String>,
    /// Rule-based lexer option; `None` or [`DEFAULT_LEXER_OPTION`]
    /// leaves lexical augmentation disabled.
    pub lexer_option: Option<String>,
    /// Whether the statistical source is enabled.
    pub statistical: bool,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            dictionary_path: None,
            dict_option: None,
            lexer_option: None,
            statistical: true,
        }
    }
}

impl ModeConfig {
    /// Resolve the configuration into an [`AnnotationMode`].
    ///
    /// Fails with [`Error::Configuration`] when the dictionary option is
    /// unrecognized, when `tag`/`post` is requested without a dictionary
    /// path, or when the resolved mode needs a disabled statistical
    /// source.
    pub fn resolve(&self) -> Result<AnnotationMode> {
        let lexical = match self.lexer_option.as_deref() {
            None => false,
            Some(option) => option != DEFAULT_LEXER_OPTION,
        };

        // "none" is the documented default sentinel, same as the lexer's
        // "off": equivalent to leaving the option unset.
        let dict_option = self
            .dict_option
            .as_deref()
            .filter(|option| !option.eq_ignore_ascii_case(DEFAULT_DICT_OPTION));

        let primary = match (&self.dictionary_path, dict_option) {
            (Some(_), Some(option)) => match option.parse::<DictOption>()? {
                DictOption::Tag => Primary::DictionaryOnly,
                DictOption::Post => Primary::PostProcess,
            },
            (Some(_), None) => Primary::Statistical {
                dict_features: true,
            },
            (None, Some(option)) => {
                // Reject junk values before complaining about the path.
                let parsed = option.parse::<DictOption>()?;
                return Err(Error::configuration(format!(
                    "dictionary option {parsed:?} requires a dictionary path"
                )));
            }
            (None, None) => Primary::Statistical {
                dict_features: false,
            },
        };

        if !self.statistical && !matches!(primary, Primary::DictionaryOnly) {
            return Err(Error::configuration(
                "statistical source disabled, but only dictionary-only mode can run without it",
            ));
        }

        let mode = AnnotationMode { primary, lexical };
        log::debug!("resolved annotation mode: {mode:?}");
        Ok(mode)
    }
}

/// Primary tagging mode. Exactly one is active per annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primary {
    /// Statistical sequence tagger.
    Statistical {
        /// Whether the tagger should enrich its features with dictionary
        /// membership. Collaborator detail; fusion ignores it.
        dict_features: bool,
    },
    /// Dictionary exact matches only.
    DictionaryOnly,
    /// Statistical tagger post-processed with exact dictionary matches.
    PostProcess,
}

/// Resolved, immutable description of which sources run.
///
/// Compute once (via [`ModeConfig::resolve`] or the constructors here) and
/// share freely; it is `Copy` and read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationMode {
    primary: Primary,
    lexical: bool,
}

impl AnnotationMode {
    /// Statistical-only tagging.
    #[must_use]
    pub fn statistical() -> Self {
        Self {
            primary: Primary::Statistical {
                dict_features: false,
            },
            lexical: false,
        }
    }

    /// Statistical tagging with dictionary feature enrichment.
    #[must_use]
    pub fn statistical_with_dict_features() -> Self {
        Self {
            primary: Primary::Statistical {
                dict_features: true,
            },
            lexical: false,
        }
    }

    /// Dictionary-only tagging.
    #[must_use]
    pub fn dictionary_only() -> Self {
        Self {
            primary: Primary::DictionaryOnly,
            lexical: false,
        }
    }

    /// Statistical tagging post-processed with dictionary matches.
    #[must_use]
    pub fn post_process() -> Self {
        Self {
            primary: Primary::PostProcess,
            lexical: false,
        }
    }

    /// Enable or disable lexical augmentation on top of the primary mode.
    #[must_use]
    pub fn with_lexical(mut self, enabled: bool) -> Self {
        self.lexical = enabled;
        self
    }

    /// The primary tagging mode.
    #[must_use]
    pub fn primary(&self) -> Primary {
        self.primary
    }

    /// True when the statistical source runs.
    #[must_use]
    pub fn statistical_active(&self) -> bool {
        matches!(
            self.primary,
            Primary::Statistical { .. } | Primary::PostProcess
        )
    }

    /// True when the dictionary source runs as a tagger (dictionary-only
    /// or post-process); feature enrichment does not count.
    #[must_use]
    pub fn dictionary_active(&self) -> bool {
        matches!(self.primary, Primary::DictionaryOnly | Primary::PostProcess)
    }

    /// True when the statistical tagger should use dictionary features.
    #[must_use]
    pub fn dict_features(&self) -> bool {
        matches!(
            self.primary,
            Primary::Statistical {
                dict_features: true
            }
        )
    }

    /// True when lexical augmentation is enabled.
    #[must_use]
    pub fn lexical(&self) -> bool {
        self.lexical
    }
}
