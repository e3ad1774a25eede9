//! Transport seam between the executor and the network.

use async_trait::async_trait;
use paygate_types::{GatewayError, RawResponse};
use reqwest::{Method, Url, header::HeaderMap};
use serde_json::{Map, Value};

mod http;
mod replay;

pub use http::ReqwestTransport;
pub use replay::ReplayTransport;

/// Outbound body after filtering and key transcoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// Top-level fields sent as `multipart/form-data` text parts.
    Multipart(Map<String, Value>),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Json(_) => false,
            Self::Multipart(fields) => fields.is_empty(),
        }
    }
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// Performs one HTTPS exchange.
///
/// Implementations must verify the peer certificate and fail the call when
/// verification is impossible; they never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, GatewayError>;
}
