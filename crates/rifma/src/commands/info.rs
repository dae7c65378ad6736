//! Info command implementation

use clap::Args;
use owo_colors::OwoColorize;
use rifma_core::config::{Config, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    corpus_path: String,
    corpus_encoding: String,
    index_path: String,
    index_present: bool,
    analyzer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dictionary_path: Option<String>,
    bind: String,
    cache_ttl_secs: u64,
    cache_max_entries: usize,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            corpus_path: config.corpus_path.to_string(),
            corpus_encoding: config.corpus_encoding.clone(),
            index_path: config.index_path.to_string(),
            index_present: config.index_path.is_file(),
            analyzer: config.analyzer.as_str().to_string(),
            dictionary_path: config.dictionary_path.as_ref().map(|p| p.to_string()),
            bind: config.bind.clone(),
            cache_ttl_secs: config.cache_ttl_secs,
            cache_max_entries: config.cache_max_entries,
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }
    if !package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), package.repository.cyan());
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match cfg.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Index".bold().underline());
    let state = if cfg.index_present {
        "present".green().to_string()
    } else {
        "missing, built on first use".yellow().to_string()
    };
    println!("{}: {} ({state})", "Index file".dimmed(), cfg.index_path);
    println!(
        "{}: {} ({})",
        "Word list".dimmed(),
        cfg.corpus_path,
        cfg.corpus_encoding
    );
    println!("{}: {}", "Analyzer".dimmed(), cfg.analyzer);
    if let Some(ref path) = cfg.dictionary_path {
        println!("{}: {}", "Dictionary".dimmed(), path);
    }

    println!();
    println!("{}", "Service".bold().underline());
    println!("{}: {}", "Bind".dimmed(), cfg.bind);
    println!(
        "{}: {}s, {} entries",
        "Cache".dimmed(),
        cfg.cache_ttl_secs,
        cfg.cache_max_entries
    );

    Ok(())
}
