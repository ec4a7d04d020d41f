use geo_mcp_shared::{optional_env, require_env, ConfigError};

/// Required RapidAPI key.
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Optional base URL override, used to point the server at a mock upstream.
pub const BASE_URL_ENV: &str = "TRANSIT_API_BASE_URL";

pub const API_HOST: &str = "navitime-route-totalnavi.p.rapidapi.com";

pub const DEFAULT_BASE_URL: &str = "https://navitime-route-totalnavi.p.rapidapi.com";

/// Immutable server configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitConfig {
    pub api_key: String,
    pub base_url: String,
    /// Value of the `X-RapidAPI-Host` header; stays fixed when the base URL is overridden.
    pub api_host: String,
}

impl TransitConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_host: API_HOST.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fails when `RAPIDAPI_KEY` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::new(require_env(API_KEY_ENV)?);
        Ok(match optional_env(BASE_URL_ENV) {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }
}
