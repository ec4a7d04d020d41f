use geo_mcp_shared::{optional_env, require_env, ConfigError};

/// Required Google Maps Platform key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Optional base URL override, used to point the server at a mock upstream.
pub const BASE_URL_ENV: &str = "GOOGLE_MAPS_DIRECTIONS_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Immutable server configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsConfig {
    pub api_key: String,
    pub base_url: String,
}

impl DirectionsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fails when `GOOGLE_MAPS_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::new(require_env(API_KEY_ENV)?);
        Ok(match optional_env(BASE_URL_ENV) {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }
}
