//! Warden - authenticating reverse proxy
//!
//! Main entry point for the Warden CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{SettingsArgs, check, email, provider};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Warden - authenticating reverse proxy
#[derive(Parser)]
#[command(name = "warden")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./warden.toml, then the user config dir)
    #[arg(short, long, global = true, env = "WARDEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the configuration and report every problem found
    Check(check::CheckArgs),

    /// Show the resolved identity provider endpoints
    Provider(provider::ProviderArgs),

    /// Resolve the email identity from a saved token-exchange result
    Email(email::EmailArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "warden=debug,warden_config=debug,warden_oauth=debug,info"
    } else {
        "warden=info,warden_config=info,warden_oauth=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::Context {
        config_path: cli.config,
        settings: cli.settings,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Check(args) => check::run(args, &ctx),
        Commands::Provider(args) => provider::run(args, &ctx),
        Commands::Email(args) => email::run(args, &ctx),
    }
}
