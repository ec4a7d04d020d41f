//! Startup configuration shared by the server binaries.

use clap::Args;
use thiserror::Error;

use crate::http::UpstreamError;
use crate::logging::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("{name} environment variable is required")]
    MissingEnv { name: &'static str },

    #[error("failed to build upstream client: {0}")]
    Client(#[from] UpstreamError),
}

/// Read a required variable. Unset and empty are both treated as missing.
pub fn require_env(name: &'static str) -> Result<String, ConfigError> {
    optional_env(name).ok_or(ConfigError::MissingEnv { name })
}

/// Read an optional variable, ignoring empty values.
pub fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Flags accepted by every server binary.
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Log filter directive; overrides RUST_LOG (e.g. "debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log output format; overrides LOG_FORMAT.
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl ServeArgs {
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_env()
            .with_level(self.log_level.as_deref())
            .with_format(self.log_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_missing() {
        let err = require_env("GEO_MCP_TEST_DEFINITELY_UNSET").unwrap_err();
        assert_eq!(
            err.to_string(),
            "GEO_MCP_TEST_DEFINITELY_UNSET environment variable is required"
        );
    }

    #[test]
    fn test_require_env_empty_is_missing() {
        std::env::set_var("GEO_MCP_TEST_EMPTY_KEY", "");
        assert!(matches!(
            require_env("GEO_MCP_TEST_EMPTY_KEY"),
            Err(ConfigError::MissingEnv { .. })
        ));
    }

    #[test]
    fn test_require_env_present() {
        std::env::set_var("GEO_MCP_TEST_PRESENT_KEY", "abc123");
        assert_eq!(require_env("GEO_MCP_TEST_PRESENT_KEY").unwrap(), "abc123");
    }

    #[test]
    fn test_serve_args_override_logging() {
        let args = ServeArgs {
            log_level: Some("trace".to_string()),
            log_format: Some(LogFormat::Json),
        };
        let config = args.logging_config();
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Json);
    }
}
