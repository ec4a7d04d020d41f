use geo_mcp_shared::{optional_env, require_env, ConfigError};

/// Required Google Places key.
pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

/// Optional base URL override, used to point the server at a mock upstream.
pub const BASE_URL_ENV: &str = "GOOGLE_PLACES_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesConfig {
    pub api_key: String,
    pub base_url: String,
}

impl PlacesConfig {
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

    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::new(require_env(API_KEY_ENV)?);
        Ok(match optional_env(BASE_URL_ENV) {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_google_endpoint() {
        let config = PlacesConfig::new("k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.with_base_url("http://127.0.0.1:1").base_url, "http://127.0.0.1:1");
    }
}
