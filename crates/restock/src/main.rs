// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! restock - watches a retailer listing and texts subscribers on restock.
//!
//! Designed to be invoked periodically by an external scheduler; each
//! invocation reconstructs its state from the persisted record and exits.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Watches a retailer listing page and texts opt-in subscribers when the
/// tracked product comes back in stock.
#[derive(Parser, Debug)]
#[command(name = "restock", version, about, long_about = None)]
struct Cli {
    /// Path to a restock.toml (defaults to the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one check cycle: process inbound messages, probe, notify.
    Check,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => restock_config::load_and_validate_path(path),
        None => restock_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            restock_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("restock: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        Some(Commands::Check) | None => {
            // The run downgrades every component failure internally; the
            // process boundary only ever sees the summary.
            let _summary = restock::run(&config).await;
        }
    }
}
