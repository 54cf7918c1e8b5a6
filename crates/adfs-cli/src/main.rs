//! # ADFS CLI
//!
//! Command-line tools for operating an ADFS SAML integration.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod output;

use adfs_saml::AdfsConfig;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::commands::{run_inspect, run_request};
use crate::output::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match AdfsConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Request {
            format,
            issue_instant,
            now,
            relay_state,
        } => run_request(&config, format, issue_instant, now, relay_state.as_deref()),
        Command::Inspect {
            response,
            xml,
            store,
        } => run_inspect(&config, response, xml, store).await,
    };

    if let Err(e) = result {
        error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
