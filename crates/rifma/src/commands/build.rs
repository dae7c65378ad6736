//! Build command: read the word list and write the suffix index.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use rifma_core::service::normalizer_from_config;
use rifma_core::{Config, RhymeIndex, build_index_with_progress, corpus};

/// Arguments for the `build` subcommand.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Word list to index (overrides `corpus_path`).
    #[arg(long, value_name = "FILE")]
    pub corpus: Option<Utf8PathBuf>,

    /// Where to write the index (overrides `index_path`).
    #[arg(long, value_name = "FILE")]
    pub index: Option<Utf8PathBuf>,

    /// Rebuild even if the index file already exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct BuildSummary {
    index_path: Utf8PathBuf,
    rebuilt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    words: Option<usize>,
    suffixes: usize,
    entries: usize,
}

/// Build the index, or report the existing one unless `--force` is given.
#[instrument(name = "cmd_build", skip_all, fields(force = args.force))]
pub fn cmd_build(
    args: BuildArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let corpus_path = args.corpus.unwrap_or_else(|| config.corpus_path.clone());
    let index_path = args.index.unwrap_or_else(|| config.index_path.clone());
    debug!(corpus = %corpus_path, index = %index_path, "executing build command");

    let existing = if args.force {
        None
    } else {
        RhymeIndex::load(&index_path)
            .with_context(|| format!("failed to load existing index {index_path}"))?
    };

    let summary = match existing {
        Some(index) => BuildSummary {
            index_path,
            rebuilt: false,
            words: None,
            suffixes: index.len(),
            entries: index.entry_count(),
        },
        None => {
            let normalizer = normalizer_from_config(config)?;
            let words = corpus::load_words(&corpus_path, &config.corpus_encoding)
                .with_context(|| format!("failed to read word list {corpus_path}"))?;

            let bar = if quiet || global_json {
                ProgressBar::hidden()
            } else {
                ProgressBar::new(words.len() as u64)
            };
            bar.set_style(
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} words ({eta})")
                    .context("invalid progress bar template")?,
            );
            let index = build_index_with_progress(&words, &normalizer, |done| {
                bar.set_position(done as u64);
            });
            bar.finish_and_clear();

            index
                .save(&index_path)
                .with_context(|| format!("failed to write index {index_path}"))?;
            info!(index = %index_path, suffixes = index.len(), "index written");

            BuildSummary {
                index_path,
                rebuilt: true,
                words: Some(words.len()),
                suffixes: index.len(),
                entries: index.entry_count(),
            }
        }
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if summary.rebuilt {
        println!(
            "{} {} ({} words, {} suffixes)",
            "Built".green(),
            summary.index_path.cyan(),
            summary.words.unwrap_or_default(),
            summary.suffixes,
        );
    } else if !quiet {
        println!(
            "{} {} ({} suffixes); pass --force to rebuild",
            "Up to date:".yellow(),
            summary.index_path.cyan(),
            summary.suffixes,
        );
    }

    Ok(())
}
