//! Suffix index construction and persistence.
//!
//! Every normalized word longer than [`MIN_INDEXED_LEN`] characters is filed
//! under its trailing substrings of each length in [`SUFFIX_LENGTHS`], so a
//! word lands in up to three buckets. Buckets keep corpus order and keep
//! duplicates; deduplication happens at query time.
//!
//! The index persists as a JSON object mapping suffix to word list. The file's
//! existence is the only validity check: a present file is trusted as-is, even
//! if the corpus has changed since it was written.

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Read, Write};
use std::ops::RangeInclusive;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::{IndexError, IndexResult};
use crate::normalize::Normalizer;

/// Suffix lengths (in characters) that words are indexed under.
pub const SUFFIX_LENGTHS: RangeInclusive<usize> = 2..=4;

/// Normalized words of this many characters or fewer are not indexed.
pub const MIN_INDEXED_LEN: usize = 2;

/// The last `n` characters of `word`, or `None` if it is shorter than `n`.
pub fn suffix(word: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return Some("");
    }
    word.char_indices()
        .rev()
        .nth(n - 1)
        .map(|(start, _)| &word[start..])
}

/// The last `n` characters of `word`, or all of it when it is shorter.
pub fn tail(word: &str, n: usize) -> &str {
    suffix(word, n).unwrap_or(word)
}

/// Mapping from suffix to the normalized words ending in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RhymeIndex {
    buckets: BTreeMap<String, Vec<String>>,
}

impl RhymeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// File one normalized word under each of its suffixes.
    ///
    /// Returns `false` (and does nothing) for words too short to index.
    pub fn insert(&mut self, normalized: &str) -> bool {
        let len = normalized.chars().count();
        if len <= MIN_INDEXED_LEN {
            return false;
        }
        for n in SUFFIX_LENGTHS {
            if let Some(end) = suffix(normalized, n) {
                self.buckets
                    .entry(end.to_string())
                    .or_default()
                    .push(normalized.to_string());
            }
        }
        true
    }

    /// Words filed under `suffix`, empty when there is no such bucket.
    pub fn bucket(&self, suffix: &str) -> &[String] {
        self.buckets.get(suffix).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct suffixes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the index has no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of bucket entries across all suffixes.
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Serialize as JSON. Non-ASCII characters are written literally.
    pub fn to_writer<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }

    /// Deserialize from JSON.
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// Write the index file, replacing any existing one.
    #[tracing::instrument(skip_all, fields(path = %path, suffixes = self.len()))]
    pub fn save(&self, path: &Utf8Path) -> IndexResult<()> {
        tracing::info!("saving index");
        let write_err = |source| IndexError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::create(path.as_std_path()).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer).map_err(|e| write_err(e.into()))?;
        writer.flush().map_err(write_err)?;
        tracing::info!("index saved");
        Ok(())
    }

    /// Read the index file, or `None` if it does not exist.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load(path: &Utf8Path) -> IndexResult<Option<Self>> {
        let file = match std::fs::File::open(path.as_std_path()) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no index file");
                return Ok(None);
            }
            Err(source) => {
                return Err(IndexError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        tracing::info!("loading index");
        let index = Self::from_reader(BufReader::new(file)).map_err(|source| IndexError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(suffixes = index.len(), "index loaded");
        Ok(Some(index))
    }
}

/// Build an index from raw corpus words.
pub fn build_index<I, S>(words: I, normalizer: &Normalizer) -> RhymeIndex
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_index_with_progress(words, normalizer, |_| {})
}

/// Build an index, calling `progress` with the number of words processed so
/// far after each word.
#[tracing::instrument(skip_all, fields(analyzer = normalizer.analyzer_name()))]
pub fn build_index_with_progress<I, S, F>(
    words: I,
    normalizer: &Normalizer,
    mut progress: F,
) -> RhymeIndex
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(usize),
{
    tracing::info!("building rhyme index");
    let mut index = RhymeIndex::new();
    let mut skipped = 0usize;
    let mut processed = 0usize;
    for word in words {
        let normalized = normalizer.normalize_or_raw(word.as_ref());
        if !index.insert(&normalized) {
            skipped += 1;
        }
        processed += 1;
        progress(processed);
    }
    tracing::info!(
        words = processed,
        skipped,
        suffixes = index.len(),
        "rhyme index built"
    );
    index
}

/// Load the index at `index_path`, or build and save it when the file is
/// missing.
///
/// `corpus` is only called on a rebuild. Words processed are logged every
/// `progress_interval` words. Read, parse and write failures are returned,
/// never retried.
#[tracing::instrument(skip_all, fields(index = %index_path))]
pub fn load_or_build<C>(
    index_path: &Utf8Path,
    corpus: C,
    normalizer: &Normalizer,
    progress_interval: usize,
) -> IndexResult<RhymeIndex>
where
    C: FnOnce() -> IndexResult<Vec<String>>,
{
    if let Some(index) = RhymeIndex::load(index_path)? {
        return Ok(index);
    }

    let words = corpus()?;
    let every = progress_interval.max(1);
    let index = build_index_with_progress(&words, normalizer, |done| {
        if done % every == 0 {
            tracing::info!(processed = done, total = words.len(), "indexing");
        }
    });
    index.save(index_path)?;
    Ok(index)
}
