//! CLI argument parsing and command dispatch

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use modsync::config;
use modsync::output::OutputConfig;
use modsync::repository::Workspace;

use crate::commands;

/// modsync - Manage pinned git submodules and keep shared ones in step
#[derive(Parser, Debug)]
#[command(name = "modsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Repository root holding the submodule manifest (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR", env = "MODSYNC_ROOT")]
    root: Option<PathBuf>,

    /// Configuration file (defaults to .modsync.yaml in the repository root, if present)
    #[arg(long, global = true, value_name = "FILE", env = "MODSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Skip the dependency installation step after checkout and pull
    #[arg(long, global = true)]
    no_install: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the submodules declared in the manifest, one per line
    List,

    /// Revert submodules to their uninitialized state, keeping them declared
    Clean(commands::ModuleArgs),

    /// Check out submodules at their pinned revision and install their dependencies
    Checkout(commands::ModuleArgs),

    /// Update submodules to the latest remote revision and install their dependencies
    Pull(commands::ModuleArgs),

    /// Deinitialize submodules and remove them from the manifest
    Remove(commands::ModuleArgs),

    /// Propagate a submodule's current revision to the submodules that embed it
    Sync(commands::sync::SyncArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let Cli {
            command,
            root,
            config,
            no_install,
            color,
            log_level,
        } = self;

        let output = OutputConfig::from_env_and_flag(&color);
        init_logging(&log_level, &output);

        let open = || open_workspace(root.clone(), config.as_deref(), no_install);
        match command {
            Commands::List => commands::list::execute(&open()?),
            Commands::Clean(args) => commands::clean::execute(args, &open()?, &output),
            Commands::Checkout(args) => commands::checkout::execute(args, &open()?, &output),
            Commands::Pull(args) => commands::pull::execute(args, &open()?, &output),
            Commands::Remove(args) => commands::remove::execute(args, &open()?, &output),
            Commands::Sync(args) => commands::sync::execute(args, &open()?, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr, without timestamps. `RUST_LOG` wins over
/// `--log-level` when set.
fn init_logging(level: &str, output: &OutputConfig) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(filter)
        .format_timestamp(None)
        .format_target(false)
        .write_style(output.log_style())
        .parse_default_env();
    // A logger may already be installed when running under a test harness.
    let _ = builder.try_init();
}

fn open_workspace(
    root: Option<PathBuf>,
    config_path: Option<&Path>,
    no_install: bool,
) -> Result<Workspace> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };
    let mut config = config::load(&root, config_path)
        .with_context(|| format!("Failed to load configuration for {}", root.display()))?;
    if no_install {
        config.install.enabled = false;
    }
    Ok(Workspace::new(root, config))
}
