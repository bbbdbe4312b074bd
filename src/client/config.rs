/**
 * Client Configuration
 *
 * Wraps the shared `AppConfig` with the API base URL the client talks to.
 * The URL includes the `/api` prefix; endpoint paths are appended to it.
 */

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// Environment variable overriding the API base URL
pub const API_URL_VAR: &str = "TODOBOARD_API_URL";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    app: AppConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app: AppConfig {
                server_url: Some(DEFAULT_API_URL.to_string()),
            },
        }
    }
}

impl ClientConfig {
    /// Read `TODOBOARD_API_URL`, falling back to the local default
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => Self::with_builder(AppConfig::builder().server_url(url.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
        })
    }

    /// Shorthand for a config pointing at `api_url`
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_builder(AppConfig::builder().server_url(api_url))
    }

    pub fn api_base(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Full URL of an endpoint path such as `/todos`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base(), path)
    }
}
