//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compose payload codec CLI
#[derive(Parser, Debug)]
#[command(name = "compose-codec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Codec configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a captured payload
    Decode {
        /// Payload file (JSON), or `-` for stdin
        input: PathBuf,

        /// Payload direction
        #[arg(short, long, default_value = "auto")]
        kind: PayloadKind,
    },

    /// Replace the body of a captured request payload
    ReplaceBody {
        /// Payload file (JSON), or `-` for stdin
        input: PathBuf,

        /// Replacement body (HTML fragment)
        #[arg(long, conflicts_with = "body_file", required_unless_present = "body_file")]
        body: Option<String>,

        /// Read the replacement body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,
    },

    /// List registered shapes
    Shapes,
}

/// Payload direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PayloadKind {
    /// Detect from structure
    Auto,
    /// Compose save/send request
    Request,
    /// Compose save/send response
    Response,
}
