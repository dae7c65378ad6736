//! The rhyme service: index, normalizer and cache, assembled once at startup.
//!
//! Front ends (HTTP, MCP, CLI) hold an `Arc<RhymeService>` and call
//! [`RhymeService::lookup`]. Nothing here is global; tests build services from
//! in-memory word lists.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlCache;
use crate::config::{AnalyzerKind, Config};
use crate::corpus;
use crate::error::{ConfigError, LookupError, ServiceError};
use crate::finder::{RhymeFinder, RhymeReport};
use crate::index::{self, RhymeIndex};
use crate::morph::{DictionaryAnalyzer, IdentityAnalyzer, SnowballAnalyzer};
use crate::normalize::Normalizer;

/// Build the normalizer selected by `config`.
pub fn normalizer_from_config(config: &Config) -> Result<Normalizer, ServiceError> {
    Ok(match config.analyzer {
        AnalyzerKind::Identity => Normalizer::new(IdentityAnalyzer),
        AnalyzerKind::Snowball => Normalizer::new(SnowballAnalyzer::new()),
        AnalyzerKind::Dictionary => {
            let path = config
                .dictionary_path
                .as_deref()
                .ok_or(ConfigError::MissingDictionaryPath)?;
            Normalizer::new(DictionaryAnalyzer::from_path(path)?)
        }
    })
}

/// Trim and lowercase a raw query, rejecting blank input.
pub fn clean_query(raw: &str) -> Result<String, LookupError> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        Err(LookupError::WordRequired)
    } else {
        Ok(word)
    }
}

/// Shared, read-only lookup context.
#[derive(Debug)]
pub struct RhymeService {
    index: RhymeIndex,
    normalizer: Normalizer,
    cache: TtlCache<Arc<RhymeReport>>,
}

impl RhymeService {
    /// Assemble a service from its parts.
    pub fn new(
        index: RhymeIndex,
        normalizer: Normalizer,
        cache_ttl: Duration,
        cache_max_entries: usize,
    ) -> Self {
        Self {
            index,
            normalizer,
            cache: TtlCache::new(cache_ttl, cache_max_entries),
        }
    }

    /// Load the index named by `config`, building and saving it from the
    /// corpus when the index file is missing.
    #[tracing::instrument(skip_all, fields(index = %config.index_path, analyzer = config.analyzer.as_str()))]
    pub fn open(config: &Config) -> Result<Self, ServiceError> {
        let normalizer = normalizer_from_config(config)?;
        let index = index::load_or_build(
            &config.index_path,
            || Ok(corpus::load_words(&config.corpus_path, &config.corpus_encoding)?),
            &normalizer,
            config.progress_interval,
        )?;
        tracing::info!(
            suffixes = index.len(),
            entries = index.entry_count(),
            "rhyme service ready"
        );
        Ok(Self::new(
            index,
            normalizer,
            config.cache_ttl(),
            config.cache_max_entries,
        ))
    }

    /// Look up a raw query (trimmed and lowercased here).
    ///
    /// Results are cached per cleaned query for the configured TTL; a hit does
    /// not normalize again.
    #[tracing::instrument(skip(self))]
    pub fn lookup(&self, raw: &str) -> Result<Arc<RhymeReport>, LookupError> {
        let word = clean_query(raw)?;
        Ok(self.cache.get_or_insert_with(&word, || {
            Arc::new(RhymeFinder::new(&self.index, &self.normalizer).lookup(&word))
        }))
    }

    /// The underlying index.
    pub const fn index(&self) -> &RhymeIndex {
        &self.index
    }

    /// The normalizer shared by indexing and lookups.
    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}
