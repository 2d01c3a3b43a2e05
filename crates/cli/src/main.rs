// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tl - Traffic light phase cycler CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod completions;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, run};

use crate::completions::{generate_completions, CompletionsArgs};

#[derive(Parser)]
#[command(
    name = "tl",
    version,
    about = "Traffic light - a red/green phase cycler with waiting observers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the light and observers until interrupted
    Run(run::RunArgs),
    /// Show the effective timing configuration
    Config(config::ConfigArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    match cli.command {
        Commands::Run(args) => run::handle(args).await,
        Commands::Config(args) => config::handle(args),
        Commands::Completions(args) => {
            generate_completions::<Cli>(args.shell);
            Ok(())
        }
    }
}

/// Log to stderr so stdout carries only command output.
///
/// `RUST_LOG=info` shows every phase change from the cycle thread.
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
