//! Rhyme lookup over a [`RhymeIndex`].
//!
//! A lookup normalizes the query, collects the buckets for its 2-, 3- and
//! 4-letter suffixes, drops duplicates and the query itself, then keeps only
//! candidates whose last two letters or last three letters match the query's.
//!
//! The final filter repeats the 2/3-letter bucket condition. For an index built
//! by [`crate::index`] it removes nothing, but it is applied as-is so a
//! hand-edited index file cannot leak words that do not end like the query.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::index::{MIN_INDEXED_LEN, RhymeIndex, SUFFIX_LENGTHS, suffix, tail};
use crate::normalize::Normalizer;

/// Result of looking up one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RhymeReport {
    /// The query as given.
    pub word: String,
    /// The query's normalized form, used for matching.
    pub normalized: String,
    /// Matching words, in lexicographic order.
    pub rhymes: Vec<String>,
    /// Number of matches.
    pub count: usize,
}

/// Finds rhymes by suffix.
#[derive(Debug, Clone, Copy)]
pub struct RhymeFinder<'a> {
    index: &'a RhymeIndex,
    normalizer: &'a Normalizer,
}

impl<'a> RhymeFinder<'a> {
    /// Create a finder over `index`, normalizing queries with `normalizer`.
    ///
    /// Use the same normalizer the index was built with; otherwise queries and
    /// indexed words are keyed differently.
    pub const fn new(index: &'a RhymeIndex, normalizer: &'a Normalizer) -> Self {
        Self { index, normalizer }
    }

    /// Words rhyming with `word`. The query itself is never included.
    pub fn find_rhymes(&self, word: &str) -> BTreeSet<String> {
        let normalized = self.normalizer.normalize_or_raw(word);
        rhymes_for_normalized(self.index, &normalized)
    }

    /// Look up `word` and report the normalized form alongside the rhymes.
    #[tracing::instrument(skip(self))]
    pub fn lookup(&self, word: &str) -> RhymeReport {
        let normalized = self.normalizer.normalize_or_raw(word);
        tracing::debug!(%normalized, "normalized query");
        let rhymes: Vec<String> = rhymes_for_normalized(self.index, &normalized)
            .into_iter()
            .collect();
        tracing::debug!(count = rhymes.len(), "rhymes found");
        RhymeReport {
            word: word.to_string(),
            normalized,
            count: rhymes.len(),
            rhymes,
        }
    }
}

/// Rhymes for an already-normalized query.
pub fn rhymes_for_normalized(index: &RhymeIndex, normalized: &str) -> BTreeSet<String> {
    // Too short to have been indexed; treat as having no rhymes.
    if normalized.chars().count() <= MIN_INDEXED_LEN {
        return BTreeSet::new();
    }

    let candidates: BTreeSet<&str> = SUFFIX_LENGTHS
        .filter_map(|n| suffix(normalized, n))
        .flat_map(|end| index.bucket(end))
        .map(String::as_str)
        .filter(|candidate| *candidate != normalized)
        .collect();

    let end2 = tail(normalized, 2);
    let end3 = tail(normalized, 3);
    candidates
        .into_iter()
        .filter(|candidate| tail(candidate, 2) == end2 || tail(candidate, 3) == end3)
        .map(str::to_string)
        .collect()
}
