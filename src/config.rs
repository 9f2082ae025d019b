//! Codec configuration
//!
//! Loaded from YAML. Configuration only narrows or extends the built-in
//! tables; it never describes new shapes.
//!
//! ```yaml
//! disabled_shapes:
//!   - "2024-03-12"
//! extra_send_actions:
//!   - "^sched_send"
//! ```

use crate::error::{Error, Result};
use crate::shape::builtin_versions;
use crate::types::is_action_token;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for building a [`Codec`](crate::Codec)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Version labels excluded from matching
    #[serde(default)]
    pub disabled_shapes: Vec<String>,

    /// Tokens treated as send signals in addition to the built-in ones
    #[serde(default)]
    pub extra_send_actions: Vec<String>,
}

impl CodecConfig {
    /// Create an empty config (all built-in shapes, built-in send tokens)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Disable a shape version
    #[must_use]
    pub fn with_disabled_shape(mut self, version: impl Into<String>) -> Self {
        self.disabled_shapes.push(version.into());
        self
    }

    /// Add a send token
    #[must_use]
    pub fn with_extra_send_action(mut self, token: impl Into<String>) -> Self {
        self.extra_send_actions.push(token.into());
        self
    }

    /// Check version labels against the built-in tables and token syntax
    pub fn validate(&self) -> Result<()> {
        let known = builtin_versions();
        for version in &self.disabled_shapes {
            if !known.contains(&version.as_str()) {
                return Err(Error::invalid_config(
                    "disabled_shapes",
                    format!(
                        "unknown shape version '{version}' (known: {})",
                        known.join(", ")
                    ),
                ));
            }
        }

        for token in &self.extra_send_actions {
            if !is_action_token(token) {
                return Err(Error::invalid_config(
                    "extra_send_actions",
                    format!("'{token}' is not an action token (expected a '^' prefix)"),
                ));
            }
        }

        Ok(())
    }
}
