//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{hooks_cmd, logging, render_cmd};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "dcf")]
#[command(author, version, about = "Render taxonomy terms and custom fields around post content")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./dcf.toml, then the global config)
    #[arg(long, short = 'c', global = true, env = "DCF_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a post's content with the information block
    Render(render_cmd::RenderArgs),

    /// Show the label/value rows that would be rendered for a post
    Fields(render_cmd::FieldsArgs),

    /// List registered hook callbacks in execution order
    Hooks,

    /// Register the stylesheet and show its versioned URL
    Stylesheet {
        /// Directory the stylesheet path is relative to
        #[arg(long)]
        base: Option<PathBuf>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format);

    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose);

    tracing::debug!(
        config = ?config.source,
        css_class = %config.display.css_class,
        placement = config.display.placement.as_str(),
        on_callback_error = config.display.on_callback_error.as_str(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Render(args) => render_cmd::render(&output, &config, &args)?,
        Commands::Fields(args) => render_cmd::fields(&output, &config, &args)?,
        Commands::Hooks => hooks_cmd::list(&output, &config)?,
        Commands::Stylesheet { base } => hooks_cmd::stylesheet(&output, config, base)?,
    }

    tracing::debug!("command completed");
    Ok(())
}
