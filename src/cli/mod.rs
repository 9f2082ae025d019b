//! CLI module
//!
//! Command-line interface for inspecting captured compose payloads.
//!
//! # Commands
//!
//! - `decode` - Decode a request or response payload into its record
//! - `replace-body` - Print a request payload with its body replaced
//! - `shapes` - List registered shapes

mod commands;
mod runner;

pub use commands::{Cli, Commands, PayloadKind};
pub use runner::Runner;
