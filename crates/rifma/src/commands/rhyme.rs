//! Rhyme command: a single lookup from the command line.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use rifma_core::Config;

/// Arguments for the `rhyme` subcommand.
#[derive(Args, Debug)]
pub struct RhymeArgs {
    /// Word to find rhymes for.
    pub word: String,
}

/// Print the rhymes for one word.
#[instrument(name = "cmd_rhyme", skip_all, fields(word = %args.word))]
pub fn cmd_rhyme(args: RhymeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!("executing rhyme command");

    let service = super::open_service(config)?;
    let report = service.lookup(&args.word)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&*report)?);
    } else if report.rhymes.is_empty() {
        eprintln!("{} {}", "No rhymes for".yellow(), report.word.bold());
    } else {
        for rhyme in &report.rhymes {
            println!("{rhyme}");
        }
    }

    Ok(())
}
