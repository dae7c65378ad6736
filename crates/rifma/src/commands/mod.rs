//! Command implementations.

use anyhow::Context;
use rifma_core::{Config, RhymeService};

pub mod build;
pub mod info;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod rhyme;
pub mod serve;

/// Open the rhyme service described by `config`, building the index on first
/// use.
pub fn open_service(config: &Config) -> anyhow::Result<RhymeService> {
    RhymeService::open(config).with_context(|| {
        format!(
            "failed to open rhyme index {} (corpus {})",
            config.index_path, config.corpus_path
        )
    })
}
