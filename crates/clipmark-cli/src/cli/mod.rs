//! CLI for capturing links as bookmarks.

mod bookmarks;
mod commands;
mod render;
mod source;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clipmark_core::config::{self, ClipmarkConfig};
use std::path::PathBuf;

use commands::{run_add, run_check, run_preview};

/// Top-level CLI for Clipmark.
#[derive(Debug, Parser)]
#[command(name = "clipmark")]
#[command(about = "Clipmark: capture a link, preview it, save it as a bookmark", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/clipmark/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate a URL and print its canonical form.
    Check {
        /// Text to check.
        input: String,
    },

    /// Fetch a page and show its link preview.
    Preview {
        /// Absolute URL of the page.
        url: String,
        /// Print the preview metadata as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Capture a link: validate, preview, confirm, and save it.
    Add {
        /// URL to capture, or `-` to read the first line of stdin.
        source: String,
        /// Save without asking for confirmation.
        #[arg(long, short = 'y')]
        yes: bool,
        /// Print the saved bookmark as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        cli.command.run(&cfg).await
    }

    async fn run(self, cfg: &ClipmarkConfig) -> Result<()> {
        match self {
            CliCommand::Check { input } => run_check(&input)?,
            CliCommand::Preview { url, json } => run_preview(cfg, &url, json).await?,
            CliCommand::Add { source, yes, json } => run_add(cfg, &source, yes, json).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
