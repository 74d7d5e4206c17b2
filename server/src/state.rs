//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! server keeps no data of its own; it holds the upstream HTTP client and the
//! parsed configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Clone is required by Axum; all fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns the builder error when the TLS backend cannot be initialized.
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.relay_timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, config: Arc::new(config) })
    }
}
