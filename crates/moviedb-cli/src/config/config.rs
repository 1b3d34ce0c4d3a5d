//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use moviedb_api::tmdb::Credential;
use serde::{Deserialize, Serialize};

/// Environment variable holding a v4 bearer token.
pub const ENV_ACCESS_TOKEN: &str = "TMDB_API_TOKEN";

/// Environment variable holding a v3 API key.
pub const ENV_API_KEY: &str = "TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB client settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB client configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// v4 read access token (preferred over `api_key`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Response language.
    #[serde(default = "default_language")]
    pub language: String,
    /// API base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Bounded wait for searches, in milliseconds.
    #[serde(default = "default_search_timeout_ms")]
    pub search_timeout_ms: u64,
    /// Bounded wait for listings, in milliseconds (unset = none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_timeout_ms: Option<u64>,
}

fn default_language() -> String {
    String::from("en-US")
}

const fn default_search_timeout_ms() -> u64 {
    8000
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            language: default_language(),
            base_url: None,
            search_timeout_ms: default_search_timeout_ms(),
            listing_timeout_ms: None,
        }
    }
}

impl TmdbConfig {
    /// Resolves the credential once, environment first.
    ///
    /// Order: `TMDB_API_TOKEN`, `TMDB_API_KEY`, `access_token`, `api_key`.
    /// Blank values are skipped.
    pub fn credential_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<Credential> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        non_blank(lookup(ENV_ACCESS_TOKEN))
            .map(Credential::BearerToken)
            .or_else(|| non_blank(lookup(ENV_API_KEY)).map(Credential::ApiKey))
            .or_else(|| non_blank(self.access_token.clone()).map(Credential::BearerToken))
            .or_else(|| non_blank(self.api_key.clone()).map(Credential::ApiKey))
    }

    /// Base URL override with a trailing slash, so relative paths join under it.
    #[must_use]
    pub fn normalized_base_url(&self) -> Option<String> {
        self.base_url.as_deref().map(|url| {
            if url.ends_with('/') {
                String::from(url)
            } else {
                format!("{url}/")
            }
        })
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
