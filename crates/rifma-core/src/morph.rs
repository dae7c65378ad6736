//! Morphological analyzers.
//!
//! An analyzer turns a word into a [`Parse`]: its normal (dictionary) form and,
//! when the analyzer knows it, a part of speech. The [`Normalizer`] builds the
//! indexing key on top of this.
//!
//! Three analyzers ship with the crate:
//!
//! - [`IdentityAnalyzer`] keeps every word as-is.
//! - [`SnowballAnalyzer`] strips inflection with the Russian Snowball stemmer.
//! - [`DictionaryAnalyzer`] looks words up in a lemma dictionary exported as
//!   TSV (`form<TAB>lemma<TAB>TAG`, OpenCorpora part-of-speech tags).
//!
//! [`Normalizer`]: crate::normalize::Normalizer

use std::collections::HashMap;
use std::str::FromStr;

use camino::Utf8Path;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// Part of speech, using the OpenCorpora tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    /// Noun (`NOUN`).
    Noun,
    /// Full adjective (`ADJF`).
    Adjf,
    /// Short adjective (`ADJS`).
    Adjs,
    /// Comparative (`COMP`).
    Comp,
    /// Finite verb (`VERB`).
    Verb,
    /// Infinitive (`INFN`).
    Infn,
    /// Full participle (`PRTF`).
    Prtf,
    /// Short participle (`PRTS`).
    Prts,
    /// Gerund (`GRND`).
    Grnd,
    /// Numeral (`NUMR`).
    Numr,
    /// Adverb (`ADVB`).
    Advb,
    /// Pronoun-noun (`NPRO`).
    Npro,
    /// Predicative (`PRED`).
    Pred,
    /// Preposition (`PREP`).
    Prep,
    /// Conjunction (`CONJ`).
    Conj,
    /// Particle (`PRCL`).
    Prcl,
    /// Interjection (`INTJ`).
    Intj,
}

impl PartOfSpeech {
    /// Returns the OpenCorpora tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "NOUN",
            Self::Adjf => "ADJF",
            Self::Adjs => "ADJS",
            Self::Comp => "COMP",
            Self::Verb => "VERB",
            Self::Infn => "INFN",
            Self::Prtf => "PRTF",
            Self::Prts => "PRTS",
            Self::Grnd => "GRND",
            Self::Numr => "NUMR",
            Self::Advb => "ADVB",
            Self::Npro => "NPRO",
            Self::Pred => "PRED",
            Self::Prep => "PREP",
            Self::Conj => "CONJ",
            Self::Prcl => "PRCL",
            Self::Intj => "INTJ",
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = String;

    /// Parses the leading part-of-speech grammeme of an OpenCorpora tag, so
    /// both `NOUN` and `NOUN,inan,femn sing,nomn` are accepted.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let head = tag
            .split(|c: char| c == ',' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        Ok(match head.to_ascii_uppercase().as_str() {
            "NOUN" => Self::Noun,
            "ADJF" => Self::Adjf,
            "ADJS" => Self::Adjs,
            "COMP" => Self::Comp,
            "VERB" => Self::Verb,
            "INFN" => Self::Infn,
            "PRTF" => Self::Prtf,
            "PRTS" => Self::Prts,
            "GRND" => Self::Grnd,
            "NUMR" => Self::Numr,
            "ADVB" => Self::Advb,
            "NPRO" => Self::Npro,
            "PRED" => Self::Pred,
            "PREP" => Self::Prep,
            "CONJ" => Self::Conj,
            "PRCL" => Self::Prcl,
            "INTJ" => Self::Intj,
            _ => return Err(format!("unknown part-of-speech tag: {tag}")),
        })
    }
}

/// The most probable analysis of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    /// Dictionary form of the word.
    pub normal_form: String,
    /// Part of speech, if the analyzer determines it.
    pub pos: Option<PartOfSpeech>,
}

impl Parse {
    /// A parse that keeps the word unchanged and carries no tag.
    pub fn unknown(word: &str) -> Self {
        Self {
            normal_form: word.to_string(),
            pos: None,
        }
    }

    /// Whether the word was classified as a noun.
    pub fn is_noun(&self) -> bool {
        self.pos == Some(PartOfSpeech::Noun)
    }
}

/// A morphological analyzer.
///
/// Implementations are shared across request handlers, so they must be
/// `Send + Sync` and must not rely on interior mutability for correctness.
pub trait MorphAnalyzer: Send + Sync {
    /// Short name used in logs and `info` output.
    fn name(&self) -> &'static str;

    /// Analyze a lowercase word.
    fn parse(&self, word: &str) -> Result<Parse, AnalyzerError>;
}

impl<A: MorphAnalyzer + ?Sized> MorphAnalyzer for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn parse(&self, word: &str) -> Result<Parse, AnalyzerError> {
        (**self).parse(word)
    }
}

/// Reject input the stemmer and dictionary cannot say anything about.
fn require_letters(word: &str) -> Result<(), AnalyzerError> {
    if word.chars().any(char::is_alphabetic) {
        Ok(())
    } else {
        Err(AnalyzerError::Unparseable {
            word: word.to_string(),
            reason: "no alphabetic characters".to_string(),
        })
    }
}

/// Analyzer that returns every word unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAnalyzer;

impl MorphAnalyzer for IdentityAnalyzer {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn parse(&self, word: &str) -> Result<Parse, AnalyzerError> {
        Ok(Parse::unknown(word))
    }
}

/// Russian Snowball stemmer.
///
/// Stems are not dictionary forms, and the stemmer has no notion of part of
/// speech, so the short-noun rule never fires with this analyzer.
pub struct SnowballAnalyzer {
    stemmer: Stemmer,
}

impl SnowballAnalyzer {
    /// Create a Russian stemmer.
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::Russian),
        }
    }
}

impl Default for SnowballAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SnowballAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballAnalyzer").finish_non_exhaustive()
    }
}

impl MorphAnalyzer for SnowballAnalyzer {
    fn name(&self) -> &'static str {
        "snowball"
    }

    fn parse(&self, word: &str) -> Result<Parse, AnalyzerError> {
        require_letters(word)?;
        Ok(Parse {
            normal_form: self.stemmer.stem(word).into_owned(),
            pos: None,
        })
    }
}

/// Lemma dictionary analyzer.
///
/// Each non-comment line is `form<TAB>lemma<TAB>TAG`. When a form is listed
/// more than once, the first entry is its most probable parse and wins.
/// Words missing from the dictionary normalize to themselves.
#[derive(Debug, Clone, Default)]
pub struct DictionaryAnalyzer {
    entries: HashMap<String, Parse>,
}

impl DictionaryAnalyzer {
    /// Load a dictionary from a UTF-8 TSV file.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn from_path(path: &Utf8Path) -> Result<Self, AnalyzerError> {
        let text = std::fs::read_to_string(path.as_std_path()).map_err(|e| {
            AnalyzerError::Dictionary {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        let analyzer = Self::parse_tsv(&text).map_err(|message| AnalyzerError::Dictionary {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::info!(forms = analyzer.len(), "lemma dictionary loaded");
        Ok(analyzer)
    }

    /// Parse dictionary text. Errors name the offending line.
    pub fn parse_tsv(text: &str) -> Result<Self, String> {
        let mut entries = HashMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let (Some(form), Some(lemma), Some(tag)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(format!("line {}: expected form, lemma and tag", lineno + 1));
            };
            let pos = tag
                .parse::<PartOfSpeech>()
                .map_err(|e| format!("line {}: {e}", lineno + 1))?;
            entries
                .entry(form.trim().to_lowercase())
                .or_insert_with(|| Parse {
                    normal_form: lemma.trim().to_lowercase(),
                    pos: Some(pos),
                });
        }
        Ok(Self { entries })
    }

    /// Number of distinct word forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MorphAnalyzer for DictionaryAnalyzer {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn parse(&self, word: &str) -> Result<Parse, AnalyzerError> {
        require_letters(word)?;
        Ok(self
            .entries
            .get(word)
            .cloned()
            .unwrap_or_else(|| Parse::unknown(word)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    const LEMMAS: &str = "\
# form\tlemma\ttag
кошки\tкошка\tNOUN,anim,femn plur,nomn
кот\tкот\tNOUN,anim,masc sing,nomn
бежал\tбежать\tVERB,perf,intr masc,sing,past,indc
кошки\tкошка\tNOUN,anim,femn sing,gent
стали\tсталь\tNOUN,inan,femn plur,nomn
стали\tстать\tVERB,perf,intr plur,past,indc
";

    #[test]
    fn part_of_speech_parses_full_tags() {
        assert_eq!(
            "NOUN,anim,femn sing,nomn".parse::<PartOfSpeech>(),
            Ok(PartOfSpeech::Noun)
        );
        assert_eq!("infn".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Infn));
        assert!("LATN".parse::<PartOfSpeech>().is_err());
    }

    #[test]
    fn identity_keeps_word() {
        let parse = IdentityAnalyzer.parse("кошка").unwrap();
        assert_eq!(parse.normal_form, "кошка");
        assert!(parse.pos.is_none());
    }

    #[test]
    fn snowball_stems_russian() {
        let analyzer = SnowballAnalyzer::new();
        let parse = analyzer.parse("кошками").unwrap();
        assert_eq!(parse.normal_form, "кошк");
        assert!(!parse.is_noun());
    }

    #[test]
    fn snowball_rejects_punctuation() {
        let err = SnowballAnalyzer::new().parse("--").unwrap_err();
        assert!(matches!(err, AnalyzerError::Unparseable { .. }));
    }

    #[test]
    fn dictionary_first_entry_wins() {
        let dict = DictionaryAnalyzer::parse_tsv(LEMMAS).unwrap();
        assert_eq!(dict.len(), 4);

        let parse = dict.parse("стали").unwrap();
        assert_eq!(parse.normal_form, "сталь");
        assert!(parse.is_noun());

        let parse = dict.parse("бежал").unwrap();
        assert_eq!(parse.normal_form, "бежать");
        assert_eq!(parse.pos, Some(PartOfSpeech::Verb));
    }

    #[test]
    fn dictionary_unknown_word_is_identity() {
        let dict = DictionaryAnalyzer::parse_tsv(LEMMAS).unwrap();
        assert_eq!(dict.parse("ложка").unwrap(), Parse::unknown("ложка"));
    }

    #[test]
    fn dictionary_reports_bad_line() {
        let err = DictionaryAnalyzer::parse_tsv("кот\tкот\n").unwrap_err();
        assert!(err.contains("line 1"));
        let err = DictionaryAnalyzer::parse_tsv("кот\tкот\tWHAT\n").unwrap_err();
        assert!(err.contains("unknown part-of-speech"));
    }

    #[test]
    fn dictionary_from_path() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("lemmas.tsv")).unwrap();
        std::fs::write(&path, LEMMAS).unwrap();
        let dict = DictionaryAnalyzer::from_path(&path).unwrap();
        assert_eq!(dict.parse("кошки").unwrap().normal_form, "кошка");

        let missing = Utf8PathBuf::try_from(tmp.path().join("nope.tsv")).unwrap();
        assert!(matches!(
            DictionaryAnalyzer::from_path(&missing),
            Err(AnalyzerError::Dictionary { .. })
        ));
    }
}
