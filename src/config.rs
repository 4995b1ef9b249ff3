//! Client configuration
//!
//! Endpoint locations and per-call settings that would otherwise be
//! hidden constants. Every field has a default, so an empty YAML document
//! is a valid configuration.

use crate::error::{Error, Result};
use crate::types::SortOrder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default groups API host
pub const DEFAULT_GROUPS_API_URL: &str = "https://groups.roblox.com";

/// Default per-call timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration, loadable from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the groups API
    #[serde(default = "default_groups_api_url")]
    pub groups_api_url: String,

    /// Timeout applied to every single network call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Wall post listing settings
    #[serde(default)]
    pub wall: WallConfig,
}

fn default_groups_api_url() -> String {
    DEFAULT_GROUPS_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("groupkit/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            groups_api_url: default_groups_api_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            wall: WallConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load and validate a config from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // serde_yaml treats an empty document as unit, not as an empty map
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the groups API base URL
    #[must_use]
    pub fn with_groups_api_url(mut self, url: impl Into<String>) -> Self {
        self.groups_api_url = url.into();
        self
    }

    /// Per-call timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed groups API base URL
    pub fn groups_base(&self) -> Result<Url> {
        Ok(Url::parse(&self.groups_api_url)?)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        let base = self.groups_base()?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "groups_api_url '{}' cannot be used as a base URL",
                self.groups_api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if self.wall.page_size == 0 {
            return Err(Error::config("wall.page_size must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// Wall Config
// ============================================================================

/// Query settings for the wall post listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallConfig {
    /// Posts per page (`limit` query parameter)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Listing order (`sortOrder` query parameter)
    #[serde(default)]
    pub sort_order: SortOrder,
}

fn default_page_size() -> u32 {
    100
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sort_order: SortOrder::default(),
        }
    }
}
