// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Pilot Configuration Manifest
//
// Layered configuration addressed by (section, option). Populated from an
// optional YAML manifest; every option carries a compiled-in default so a
// pilot launched without a manifest still starts. Loaded once during
// bootstrap and read-only afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PilotConfig {
    /// Pilot-process options.
    #[serde(default)]
    pub pilot: PilotSection,

    /// Job server options.
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotSection {
    /// User agent presented on HTTPS calls to the server.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Connect timeout applied to the shared HTTPS client.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Default job server URL, used when the invocation does not carry one.
    #[serde(default = "default_server_url")]
    pub url: String,
}

fn default_user_agent() -> String {
    concat!("aegis-pilot/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_connect_timeout() -> u64 {
    20
}

fn default_server_url() -> String {
    "https://jobs.100monkeys.ai".to_string()
}

impl Default for PilotSection {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No such configuration option [{section}] {option}")]
    UnknownOption { section: String, option: String },
}

impl PilotConfig {
    /// Load the manifest from an explicit path, or fall back to the
    /// compiled-in defaults when no path was supplied.
    ///
    /// An explicit path that cannot be read or parsed is fatal; a missing
    /// path is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            tracing::debug!("no config manifest supplied, using compiled-in defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };

        tracing::info!("loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate option values after load.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "[server] url must not be empty".to_string(),
            ));
        }
        if self.pilot.connect_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "[pilot] connect_timeout_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Generic (section, option) lookup.
    ///
    /// A key that is neither in the manifest nor compiled in is an error for
    /// the caller to handle, never a silent default.
    pub fn option(&self, section: &str, option: &str) -> Result<String, ConfigError> {
        match (section, option) {
            ("server", "url") => Ok(self.server.url.clone()),
            ("pilot", "user_agent") => Ok(self.pilot.user_agent.clone()),
            ("pilot", "connect_timeout_seconds") => {
                Ok(self.pilot.connect_timeout_seconds.to_string())
            }
            _ => Err(ConfigError::UnknownOption {
                section: section.to_string(),
                option: option.to_string(),
            }),
        }
    }
}
