//! Rate provider transport.
//!
//! The provider is an external collaborator: this module defines the
//! transport boundary and an HTTP implementation over `reqwest`.
//! Response bodies are decoded by the pipeline, not here.

use std::time::Duration;

use async_trait::async_trait;
use cambio_shared::Currency;
use cambio_shared::config::ProviderConfig;
use tracing::debug;

use super::error::RateError;
use super::types::ProviderResponse;

/// Transport used to fetch the latest rate table for a base currency.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the raw provider response for `base`.
    ///
    /// # Errors
    ///
    /// Returns a transport-kind [`RateError`] on connection or timeout
    /// failures, surfaced verbatim. Status classification is left to the
    /// caller. There is no retry or backoff: a timed-out request fails.
    async fn fetch_latest(&self, base: Currency) -> Result<ProviderResponse, RateError>;
}

/// HTTP rate provider client.
///
/// Connect and receive timeouts are fixed at construction from
/// configuration; exceeding one surfaces as a transport error.
pub struct HttpRateProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRateProvider {
    /// Builds a client from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, RateError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.receive_timeout_secs))
            .build()
            .map_err(|e| RateError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch_latest(&self, base: Currency) -> Result<ProviderResponse, RateError> {
        let url = format!("{}/{}", self.base_url, base.code());
        debug!(%base, %url, "fetching latest rates");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport)?;

        Ok(ProviderResponse { status, body })
    }
}

/// Maps a transport failure onto the error kind it represents.
fn classify_transport(err: reqwest::Error) -> RateError {
    if err.is_timeout() {
        if err.is_connect() {
            RateError::ConnectTimeout
        } else {
            RateError::ReceiveTimeout
        }
    } else if err.is_connect() {
        RateError::ConnectionFailed(err.to_string())
    } else {
        RateError::Transport(err.to_string())
    }
}
