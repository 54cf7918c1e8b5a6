//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// ADFS CLI - build SAML requests and inspect ADFS responses.
#[derive(Debug, Parser)]
#[command(name = "adfs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the integration settings file.
    #[arg(short, long, env = "ADFS_CONFIG", default_value = "adfs.toml")]
    pub config: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the AuthnRequest described by the settings file.
    Request {
        /// Output format.
        #[arg(short, long, value_enum, default_value = "encoded")]
        format: RequestFormat,

        /// Issue timestamp (overrides the settings file).
        #[arg(long, conflicts_with = "now")]
        issue_instant: Option<String>,

        /// Use the current UTC time as the issue timestamp.
        #[arg(long)]
        now: bool,

        /// RelayState to include in the HTML form.
        #[arg(long)]
        relay_state: Option<String>,
    },

    /// Decode and inspect a posted SAMLResponse value.
    Inspect {
        /// The SAMLResponse value; read from stdin when omitted.
        response: Option<String>,

        /// Print the decoded XML instead of the summary.
        #[arg(long)]
        xml: bool,

        /// Write the decoded response to the configured response log.
        #[arg(long)]
        store: bool,
    },
}

/// Output format for built requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestFormat {
    /// The serialized XML document.
    Xml,
    /// The DEFLATE + base64 `SAMLRequest` value.
    Encoded,
    /// An auto-submitting HTML form posting to the IdP.
    Form,
}
