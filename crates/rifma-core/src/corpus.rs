//! Word list loading.
//!
//! The corpus is a plain text file with one word per line in a legacy
//! single-byte encoding (`windows-1251` for the stock Russian list). Every line
//! is trimmed and lowercased; blank lines are dropped.

use camino::{Utf8Path, Utf8PathBuf};
use encoding_rs::Encoding;

use crate::error::{CorpusError, CorpusResult};

/// Read and decode a word-per-line corpus.
///
/// `encoding` is a WHATWG encoding label such as `windows-1251`, `cp1251`,
/// `koi8-r` or `utf-8`. Bytes that are invalid in that encoding are an error
/// rather than being replaced.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_words(path: &Utf8Path, encoding: &str) -> CorpusResult<Vec<String>> {
    let bytes = std::fs::read(path.as_std_path()).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let words = decode_words(&bytes, encoding).map_err(|err| match err {
        CorpusError::Malformed { encoding, .. } => CorpusError::Malformed {
            path: path.to_path_buf(),
            encoding,
        },
        other => other,
    })?;
    tracing::info!(words = words.len(), "corpus loaded");
    Ok(words)
}

/// Decode raw corpus bytes into trimmed, lowercased words.
pub fn decode_words(bytes: &[u8], encoding: &str) -> CorpusResult<Vec<String>> {
    let encoding = Encoding::for_label(encoding.as_bytes())
        .ok_or_else(|| CorpusError::UnknownEncoding(encoding.to_string()))?;
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| CorpusError::Malformed {
            path: Utf8PathBuf::new(),
            encoding: encoding.name(),
        })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect())
}
