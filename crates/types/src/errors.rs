//! Error taxonomy for gateway calls.

use serde_json::Value;
use thiserror::Error;

use crate::{Provider, ProviderFamily};

/// Failure of a single gateway call.
///
/// A call either succeeds or fails with exactly one of these variants and is
/// never retried. [`GatewayError::Remote`] means the provider rejected the
/// business operation; the response variants mean the client could not
/// interpret what came back; the rest are integration problems detected
/// before or while sending.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("invalid response shape: expected a JSON object or array, got {body}")]
    InvalidResponseShape { body: Value },

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("missing credential `{name}` for {provider}")]
    MissingCredential { provider: Provider, name: &'static str },

    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("`on_behalf_of` must be passed through RequestOptions, not the request body")]
    OnBehalfOfInBody,

    #[error("resource `{resource}` belongs to {expected} but the client is configured for {actual}")]
    ProviderMismatch {
        resource: &'static str,
        expected: ProviderFamily,
        actual: Provider,
    },

    #[error("unexpected payload for `{resource}`: {reason}")]
    UnexpectedPayload { resource: &'static str, reason: String },
}

impl GatewayError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse { message: message.into() }
    }

    /// Create an invalid header error.
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an unexpected payload error.
    pub fn unexpected_payload(resource: &'static str, reason: impl ToString) -> Self {
        Self::UnexpectedPayload {
            resource,
            reason: reason.to_string(),
        }
    }

    /// True when the provider rejected the operation.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// True when a response arrived but could not be interpreted.
    pub fn is_response_failure(&self) -> bool {
        matches!(self, Self::InvalidResponse { .. } | Self::InvalidResponseShape { .. })
    }

    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(remote) => Some(remote),
            _ => None,
        }
    }
}

/// Provider rejection normalized from any of the known error payload shapes.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{description}")]
pub struct RemoteError {
    description: String,
    body: Value,
}

impl RemoteError {
    pub fn new(description: impl Into<String>, body: Value) -> Self {
        Self {
            description: description.into(),
            body,
        }
    }

    /// Human-readable description extracted from the payload.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parsed response body the description was extracted from.
    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// Errors raised while building a [`crate::Configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{provider} does not accept {supplied} credentials")]
    CredentialMismatch { provider: Provider, supplied: &'static str },

    #[error("invalid value '{value}' for {name}")]
    InvalidEnvValue { name: String, value: String },
}

impl ConfigError {
    pub fn invalid_base_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remote_error_displays_description_only() {
        let error = GatewayError::from(RemoteError::new("bad currency", json!({"code": "invalid_argument"})));
        assert_eq!(error.to_string(), "bad currency");
        assert!(error.is_remote());
        assert!(!error.is_response_failure());
        assert_eq!(error.as_remote().map(|remote| remote.body()["code"].clone()), Some(json!("invalid_argument")));
    }

    #[test]
    fn response_failures_are_distinguished_from_rejections() {
        let parse = GatewayError::invalid_response("expected value at line 1 column 1");
        let shape = GatewayError::InvalidResponseShape { body: json!(42) };
        assert!(parse.is_response_failure());
        assert!(shape.is_response_failure());
        assert!(!shape.is_remote());
        assert!(shape.to_string().contains("42"));
    }
}
