//! Word normalization.
//!
//! The normalized form is the key words are indexed and compared by. It is the
//! analyzer's normal form, except for short nouns: a word of at most
//! [`SHORT_NOUN_MAX_LEN`] characters tagged as a noun keeps its raw form, so
//! short nouns are not collapsed into unrelated short lemmas.

use crate::error::AnalyzerError;
use crate::morph::MorphAnalyzer;

/// Nouns up to this many characters are never replaced by their lemma.
pub const SHORT_NOUN_MAX_LEN: usize = 4;

/// Outcome of normalizing one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// The canonical form of the word.
    Normalized(String),
    /// The analyzer failed; `original` is the untouched input.
    Failed {
        /// The word as it was passed in.
        original: String,
        /// Why the analyzer failed.
        cause: AnalyzerError,
    },
}

impl Normalization {
    /// The normalized word, falling back to the original when analysis failed.
    ///
    /// The fallback is logged at `warn` level.
    pub fn into_word(self) -> String {
        match self {
            Self::Normalized(word) => word,
            Self::Failed { original, cause } => {
                tracing::warn!(word = %original, error = %cause, "normalization failed, using raw word");
                original
            }
        }
    }

    /// Whether the analyzer failed.
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Normalizes words with a [`MorphAnalyzer`].
pub struct Normalizer {
    analyzer: Box<dyn MorphAnalyzer>,
}

impl Normalizer {
    /// Wrap an analyzer.
    pub fn new<A: MorphAnalyzer + 'static>(analyzer: A) -> Self {
        Self {
            analyzer: Box::new(analyzer),
        }
    }

    /// Name of the underlying analyzer.
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }

    /// Normalize a lowercase word, reporting analyzer failure explicitly.
    pub fn normalize(&self, word: &str) -> Normalization {
        match self.analyzer.parse(word) {
            Ok(parse) if word.chars().count() <= SHORT_NOUN_MAX_LEN && parse.is_noun() => {
                Normalization::Normalized(word.to_string())
            }
            Ok(parse) => Normalization::Normalized(parse.normal_form),
            Err(cause) => Normalization::Failed {
                original: word.to_string(),
                cause,
            },
        }
    }

    /// Normalize a word, falling back to the raw word on failure.
    pub fn normalize_or_raw(&self, word: &str) -> String {
        self.normalize(word).into_word()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}
