//! # Completions Command Implementation
//!
//! Prints a completion script for `modsync` to stdout. The script covers the
//! subcommands, the global flags (`--root`, `--config`, `--no-install`,
//! `--color`, `--log-level`) and the `--color`/`--log-level` values. Module
//! names are not completed, since they live in each repository's manifest.
//!
//! ```bash
//! modsync completions bash > ~/.local/share/bash-completion/completions/modsync
//! modsync completions zsh > ~/.zfunc/_modsync
//! modsync completions fish > ~/.config/fish/completions/modsync.fish
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
