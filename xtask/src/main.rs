//! Development tasks: `cargo xtask man <dir>` and `cargo xtask completions <dir>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "rifma development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Render man pages for rifma and its subcommands
    Man {
        /// Output directory
        dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        dir: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { dir } => man(&dir),
        Task::Completions { dir } => completions(&dir),
    }
}

fn man(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let command = rifma::command();
    clap_mangen::generate_to(command, dir)?;
    println!("man pages written to {}", dir.display());
    Ok(())
}

fn completions(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut command = rifma::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let path = clap_complete::generate_to(shell, &mut command, "rifma", dir)?;
        println!("{}", path.display());
    }
    Ok(())
}
