//! Payment gateway client utilities.
//!
//! This crate provides the connection side of paygate:
//!
//! - Holding the immutable [`Configuration`] shared by every call
//! - Resolving authentication and content headers ([`AuthStrategy`])
//! - Resolving request URLs against the configured `https://` base
//! - Sending requests through a pluggable [`Transport`]
//!
//! The primary entry point is [`GatewayClient`]. Build one from a
//! configuration with [`GatewayClient::new`], or from the environment with
//! [`GatewayClient::from_env`]; request interpretation lives one layer up in
//! `paygate-util`.
//!
//! # Example
//!
//! ```ignore
//! use paygate_api::GatewayClient;
//! use paygate_types::{Configuration, Provider};
//!
//! let config = Configuration::builder(Provider::Airwallex)
//!     .client_id("client-id")
//!     .api_key("api-key")
//!     .build()?;
//! let client = GatewayClient::new(config)?;
//! ```

use std::{fmt, sync::Arc, time::Instant};

pub use paygate_types::Configuration;
use paygate_types::{ConfigError, GatewayError, Provider, RawResponse};
use reqwest::Url;
use tracing::{debug, warn};

pub mod auth;
pub mod transport;

pub use auth::AuthStrategy;
pub use reqwest::Method;
pub use transport::{PreparedRequest, ReplayTransport, ReqwestTransport, RequestBody, Transport};

/// Configuration plus the transport that carries requests.
///
/// Cloning is cheap; clones share configuration and transport.
#[derive(Clone)]
pub struct GatewayClient {
    config: Arc<Configuration>,
    transport: Arc<dyn Transport>,
}

impl GatewayClient {
    /// Construct a client backed by [`ReqwestTransport`].
    pub fn new(config: Configuration) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Construct a client from `<PREFIX>_*` environment variables.
    pub fn from_env(provider: Provider) -> Result<Self, GatewayError> {
        Self::new(Configuration::from_env(provider)?)
    }

    pub fn with_transport(config: Configuration, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Client sharing this transport whose configuration carries `token`.
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self {
            config: Arc::new(self.config.with_access_token(token)),
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn auth(&self) -> AuthStrategy<'_> {
        AuthStrategy::new(&self.config)
    }

    /// Resolve an API-relative path and query pairs into a request URL.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url, GatewayError> {
        let separator = if path.starts_with('/') || path.is_empty() { "" } else { "/" };
        let raw = format!("{}{}{}", self.config.api_url(), separator, path);
        let mut url = Url::parse(&raw).map_err(|error| ConfigError::invalid_base_url(raw.as_str(), error))?;
        validate_request_url(&url)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send a prepared request through the transport.
    pub async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, GatewayError> {
        let start = Instant::now();
        let method = request.method.clone();
        let path = request.url.path().to_string();
        debug!(%method, %path, provider = %self.config.provider(), "sending request");

        match self.transport.execute(request).await {
            Ok(response) => {
                debug!(
                    %method,
                    %path,
                    status = response.status,
                    duration_ms = start.elapsed().as_millis(),
                    "request completed"
                );
                Ok(response)
            }
            Err(error) => {
                warn!(
                    %method,
                    %path,
                    error = %error,
                    duration_ms = start.elapsed().as_millis(),
                    "request failed"
                );
                Err(error)
            }
        }
    }
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Requests only ever leave over HTTPS to a named host.
fn validate_request_url(url: &Url) -> Result<(), GatewayError> {
    if url.scheme() != "https" {
        return Err(ConfigError::invalid_base_url(url.as_str(), format!("scheme must be https; got '{}://'", url.scheme())).into());
    }
    if url.host_str().is_none() {
        return Err(ConfigError::invalid_base_url(url.as_str(), "URL must include a host").into());
    }
    Ok(())
}
