//! Error types for rifma-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// The `dictionary` analyzer was selected without a `dictionary_path`.
    #[error("analyzer `dictionary` requires `dictionary_path` to be set")]
    MissingDictionaryPath,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading the word list.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("failed to read corpus {path}: {source}")]
    Read {
        /// Path of the corpus file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configured encoding label is not known.
    #[error("unknown corpus encoding: {0}")]
    UnknownEncoding(String),

    /// The corpus contains bytes that are invalid in the configured encoding.
    #[error("corpus {path} is not valid {encoding}")]
    Malformed {
        /// Path of the corpus file.
        path: Utf8PathBuf,
        /// Name of the encoding used for decoding.
        encoding: &'static str,
    },
}

/// Result type alias using [`CorpusError`].
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors that can occur while loading or saving the rhyme index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The index file exists but could not be read.
    #[error("failed to read index {path}: {source}")]
    Read {
        /// Path of the index file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The index file could not be written.
    #[error("failed to write index {path}: {source}")]
    Write {
        /// Path of the index file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The index file is not a JSON object of suffix to word list.
    #[error("invalid index {path}: {source}")]
    Parse {
        /// Path of the index file.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The corpus needed for a rebuild could not be loaded.
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

/// Result type alias using [`IndexError`].
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors reported by a morphological analyzer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// The analyzer cannot produce a parse for this input.
    #[error("cannot parse {word:?}: {reason}")]
    Unparseable {
        /// The word that failed to parse.
        word: String,
        /// Why the analyzer rejected it.
        reason: String,
    },

    /// The lemma dictionary could not be read.
    #[error("failed to read lemma dictionary {path}: {message}")]
    Dictionary {
        /// Path of the dictionary file.
        path: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },
}

/// Errors returned to callers of a rhyme lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The query was missing or blank after trimming.
    #[error("Word is required")]
    WordRequired,
}

/// Errors that can occur while assembling the rhyme service at startup.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration is inconsistent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The analyzer could not be constructed.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// The index could not be loaded, built, or saved.
    #[error(transparent)]
    Index(#[from] IndexError),
}
