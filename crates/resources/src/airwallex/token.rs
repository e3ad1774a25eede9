use std::fmt;

use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::{RequestExecutor, Resource, decode};

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new("token", "token", &["token", "expires_at"]);

/// Bearer token issued for the configured client id and API key.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Token {
    pub token: Option<String>,
    pub expires_at: Option<String>,
}

impl Resource for Token {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::authentication(ProviderFamily::Airwallex, ATTRIBUTES);
    const ENDPOINT: &'static str = "/authentication/login";
}

impl Token {
    /// Log in with `x-client-id` and `x-api-key`.
    pub async fn fetch(executor: &RequestExecutor) -> Result<Self, GatewayError> {
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, Self::ENDPOINT, Map::new(), &RequestOptions::default())
            .await?;
        decode(response)
    }

    /// Fetch a token and return an executor that sends it as the bearer.
    pub async fn authorize(executor: &RequestExecutor) -> Result<RequestExecutor, GatewayError> {
        let token = Self::fetch(executor)
            .await?
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| GatewayError::unexpected_payload(ATTRIBUTES.resource(), "login response carried no token"))?;
        Ok(executor.with_access_token(token))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
