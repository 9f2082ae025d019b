//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, PayloadKind};
use crate::codec::Codec;
use crate::config::CodecConfig;
use crate::error::{Error, Result, ResultExt};
use crate::shape::{Shape, REQUEST_SHAPES, RESPONSE_SHAPES};
use crate::types::{ParsedCompose, RawPayload};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its output
    pub fn run(&self) -> Result<()> {
        let output = self.execute()?;
        println!("{output}");
        Ok(())
    }

    /// Run the CLI command and return its output
    pub fn execute(&self) -> Result<String> {
        let codec = self.build_codec()?;

        match &self.cli.command {
            Commands::Decode { input, kind } => self.decode(&codec, input, *kind),
            Commands::ReplaceBody {
                input,
                body,
                body_file,
            } => {
                let body = match (body, body_file) {
                    (Some(body), _) => body.clone(),
                    (None, Some(path)) => fs::read_to_string(path)
                        .with_context(|| format!("Failed to read body file '{}'", path.display()))?,
                    (None, None) => return Err(Error::config("Either --body or --body-file is required")),
                };
                self.replace_body(&codec, input, &body)
            }
            Commands::Shapes => self.shapes(&codec),
        }
    }

    /// Build the codec from the config file, if any
    fn build_codec(&self) -> Result<Codec> {
        match &self.cli.config {
            Some(path) => {
                let config = CodecConfig::load(path)?;
                debug!(path = %path.display(), ?config, "Loaded codec config");
                Codec::new(&config)
            }
            None => Ok(Codec::default()),
        }
    }

    fn decode(&self, codec: &Codec, input: &Path, kind: PayloadKind) -> Result<String> {
        let raw = read_payload(input)?;

        if self.cli.verbose {
            if let Ok(shape) = codec.match_shape(&raw) {
                info!(%shape, "Payload shape");
            }
        }

        let parsed = match kind {
            PayloadKind::Auto => codec.decode(&raw)?,
            PayloadKind::Request => ParsedCompose::Request(codec.parse_compose_request(&raw)?),
            PayloadKind::Response => ParsedCompose::Response(codec.parse_compose_response(&raw)?),
        };
        self.render(&parsed)
    }

    fn replace_body(&self, codec: &Codec, input: &Path, body: &str) -> Result<String> {
        let raw = read_payload(input)?;
        let replaced = codec.replace_body_into(raw, body)?;
        self.render(&replaced)
    }

    fn shapes(&self, codec: &Codec) -> Result<String> {
        let rows: Vec<Value> = REQUEST_SHAPES
            .iter()
            .map(|&s| Shape::Request(s))
            .chain(RESPONSE_SHAPES.iter().map(|&s| Shape::Response(s)))
            .map(|shape| {
                json!({
                    "kind": shape.kind().to_string(),
                    "version": shape.version(),
                    "enabled": codec.registry().contains(shape),
                })
            })
            .collect();
        self.render(&rows)
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let text = if self.cli.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }
}

/// Read and parse a JSON payload from a file, or stdin for `-`
pub fn read_payload(path: &Path) -> Result<RawPayload> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?
    };

    Ok(serde_json::from_str(&text)?)
}
