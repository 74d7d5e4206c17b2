//! Server configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL of the CRM API, without a trailing slash.
    pub crm_api_url: String,
    pub crm_upload_url: String,
    pub relay_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `CRM_API_URL`: base URL of the CRM API; GraphQL is at `/graphql`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `CRM_UPLOAD_URL`: default `<CRM_API_URL>/upload-file`
    /// - `RELAY_TIMEOUT_SECS`: default 30
    /// - `MAX_UPLOAD_BYTES`: default 20 MiB
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| get(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let crm_api_url = get("CRM_API_URL")
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("CRM_API_URL"))?;
        let crm_upload_url = get("CRM_UPLOAD_URL").unwrap_or_else(|| format!("{crm_api_url}/upload-file"));

        Ok(Self {
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            crm_api_url,
            crm_upload_url,
            relay_timeout_secs: parse_or("RELAY_TIMEOUT_SECS", get("RELAY_TIMEOUT_SECS"), DEFAULT_RELAY_TIMEOUT_SECS)?,
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", get("MAX_UPLOAD_BYTES"), DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    #[must_use]
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.crm_api_url)
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
