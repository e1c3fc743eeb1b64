//! Application configuration loaded from environment variables.

use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::error::{ProxyError, Result};

/// Environment variable holding the USDA FoodData Central key.
pub const USDA_API_KEY_VAR: &str = "USDA_API_KEY";

/// Environment variable holding the YouTube Data API key.
pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Application configuration loaded from environment variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    // === Upstream Credentials ===
    /// USDA FoodData Central API key. Food searches fail without it.
    #[serde(default)]
    pub usda_api_key: Option<String>,

    /// YouTube Data API v3 key. Video searches fail without it.
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    // === Upstream Endpoints ===
    /// USDA API base URL.
    #[serde(default = "default_usda_base_url")]
    pub usda_base_url: String,

    /// YouTube API base URL.
    #[serde(default = "default_youtube_base_url")]
    pub youtube_base_url: String,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_usda_base_url() -> String {
    "https://api.nal.usda.gov/fdc/v1".to_string()
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    ///
    /// Missing API keys are not an error here: each endpoint reports its own
    /// missing credential per request.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("USDA_BASE_URL", &self.usda_base_url),
            ("YOUTUBE_BASE_URL", &self.youtube_base_url),
        ] {
            let parsed = Url::parse(value)
                .map_err(|e| ProxyError::InvalidConfig(format!("{name} is not a URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ProxyError::InvalidConfig(format!(
                    "{name} must use http or https"
                )));
            }
        }

        Ok(())
    }

    /// USDA key, treating an empty value as unset.
    pub fn usda_key(&self) -> Option<&str> {
        self.usda_api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// YouTube key, treating an empty value as unset.
    pub fn youtube_key(&self) -> Option<&str> {
        self.youtube_api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: Option<&str>| key.map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("usda_api_key", &redact(self.usda_key()))
            .field("youtube_api_key", &redact(self.youtube_key()))
            .field("usda_base_url", &self.usda_base_url)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("port", &self.port)
            .finish()
    }
}
