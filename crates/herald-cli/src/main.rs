//! Herald CLI application
//!
//! # Subcommands
//!
//! - `herald run` (default): discover handlers, synchronize the command
//!   catalog in the background and dispatch gateway events read from stdin
//!   as JSON lines (`{"t": "interactionCreate", "d": {...}}`) until EOF or
//!   Ctrl+C
//! - `herald sync`: discover commands and wait for catalog synchronization
//! - `herald commands`: list the commands discovery would register
//! - `herald replay <file>`: dispatch recorded gateway events; with
//!   `--dry-run` replies are printed instead of sent and the catalog is
//!   left alone

mod args;
mod commands;
mod gateway;
mod logging;
mod router;
mod signal_handler;

use anyhow::Context;
use clap::Parser;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match cli.loader().load() {
        Ok(settings) => settings,
        Err(e) => {
            // Settings carry the logging config; fall back to defaults to report the failure.
            logging::init(&Default::default(), cli.verbose);
            tracing::error!(error = %e, "Failed to load settings");
            return Err(e).context("Startup aborted");
        }
    };
    let settings = cli.apply_overrides(settings);

    logging::init(&settings.logging, cli.verbose);
    router::route(cli, settings).await
}
