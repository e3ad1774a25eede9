use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RequestExecutor, Resource, decode, decode_items, expect_raw, with_query};

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "webhook",
    "id",
    &["id", "created_at", "events", "request_id", "secret", "updated_at", "url", "version"],
);

/// Notification subscription for account events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub id: Option<String>,
    pub created_at: Option<String>,
    pub events: Option<Vec<String>>,
    pub request_id: Option<String>,
    pub secret: Option<String>,
    pub updated_at: Option<String>,
    pub url: Option<String>,
    pub version: Option<String>,
}

impl Resource for Webhook {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Airwallex, ATTRIBUTES);
    const ENDPOINT: &'static str = "/webhooks";
}

impl Webhook {
    pub async fn create(executor: &RequestExecutor, body: Map<String, Value>, options: &RequestOptions) -> Result<Self, GatewayError> {
        let writable = ATTRIBUTES.writable();
        let response = executor
            .send_filtered(&Self::DESCRIPTOR, Method::POST, &Self::path("create"), &writable, body, options)
            .await?;
        decode(response)
    }

    pub async fn find(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<Self, GatewayError> {
        let response = executor
            .send(&Self::DESCRIPTOR, Method::GET, &Self::path(id), Map::new(), options)
            .await?;
        decode(response)
    }

    pub async fn all(executor: &RequestExecutor, params: Map<String, Value>, options: &RequestOptions) -> Result<Vec<Self>, GatewayError> {
        let options = with_query(options, params);
        let response = executor
            .send(&Self::DESCRIPTOR, Method::GET, Self::ENDPOINT, Map::new(), &options)
            .await?;
        decode_items(response)
    }

    pub async fn update(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        let writable = ATTRIBUTES.writable();
        let response = executor
            .send_filtered(&Self::DESCRIPTOR, Method::POST, &Self::path(&format!("{id}/update")), &writable, body, options)
            .await?;
        decode(response)
    }

    /// `true` when the API answered `200`.
    pub async fn delete(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<bool, GatewayError> {
        Self::toggle(executor, id, "delete", options).await
    }

    pub async fn connect(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<bool, GatewayError> {
        Self::toggle(executor, id, "connect", options).await
    }

    pub async fn disconnect(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<bool, GatewayError> {
        Self::toggle(executor, id, "disconnect", options).await
    }

    async fn toggle(executor: &RequestExecutor, id: &str, action: &str, options: &RequestOptions) -> Result<bool, GatewayError> {
        let options = options.clone().raw_response(true);
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, &Self::path(&format!("{id}/{action}")), Map::new(), &options)
            .await?;
        Ok(expect_raw(ATTRIBUTES.resource(), response)?.status == 200)
    }
}
