pub mod defaults;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use defaults::{
    default_resources, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_PORT, DEFAULT_UPSTREAM_BASE_URL,
    DEFAULT_WINDOW_CAPACITY,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub window: WindowConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Category code to upstream resource name, in presentation order.
    pub resources: IndexMap<String, String>,
}

impl ServerConfig {
    /// Load configuration from a TOML file, or use defaults when no path is
    /// given. Missing fields fall back to their defaults either way.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = if let Some(path) = config_path {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&config_str)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        Ok(config)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.window.capacity == 0 {
            return Err(anyhow::anyhow!("Window capacity must be greater than 0"));
        }

        if self.upstream.timeout_ms == 0 {
            return Err(anyhow::anyhow!("Upstream timeout must be greater than 0"));
        }

        if self.upstream.resources.is_empty() {
            return Err(anyhow::anyhow!(
                "At least one category resource mapping must be configured"
            ));
        }

        Url::parse(&self.upstream.base_url)
            .with_context(|| format!("Invalid upstream base URL: {}", self.upstream.base_url))?;

        Ok(())
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            window: WindowConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            resources: default_resources(),
        }
    }
}
