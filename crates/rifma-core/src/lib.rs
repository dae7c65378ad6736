//! Core library for rifma.
//!
//! rifma finds rhymes for Russian words by shared endings. A word list is
//! normalized and filed into a suffix index (2, 3 and 4 trailing letters);
//! a lookup gathers the buckets for the query's own endings and keeps the
//! words that share its last two or three letters.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`corpus`] - Word list decoding
//! - [`morph`] - Morphological analyzers
//! - [`normalize`] - Indexing key for a word
//! - [`index`] - Suffix index construction and persistence
//! - [`finder`] - Rhyme lookup
//! - [`cache`] - TTL cache for lookups
//! - [`service`] - Startup wiring and cached lookups
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use rifma_core::{IdentityAnalyzer, Normalizer, RhymeFinder, build_index};
//!
//! let normalizer = Normalizer::new(IdentityAnalyzer);
//! let index = build_index(["кошка", "ложка", "мошка"], &normalizer);
//! let rhymes = RhymeFinder::new(&index, &normalizer).find_rhymes("кошка");
//!
//! assert_eq!(rhymes.into_iter().collect::<Vec<_>>(), ["ложка", "мошка"]);
//! ```
#![deny(unsafe_code)]

pub mod cache;
pub mod config;
pub mod corpus;
pub mod error;
pub mod finder;
pub mod index;
pub mod morph;
pub mod normalize;
pub mod service;

pub use cache::TtlCache;
pub use config::{AnalyzerKind, Config, ConfigLoader, LogLevel};
pub use error::{
    AnalyzerError, ConfigError, ConfigResult, CorpusError, IndexError, IndexResult, LookupError,
    ServiceError,
};
pub use finder::{RhymeFinder, RhymeReport};
pub use index::{RhymeIndex, build_index, build_index_with_progress};
pub use morph::{DictionaryAnalyzer, IdentityAnalyzer, MorphAnalyzer, Parse, PartOfSpeech, SnowballAnalyzer};
pub use normalize::{Normalization, Normalizer};
pub use service::RhymeService;
