use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RequestExecutor, Resource, decode, decode_items, with_query};

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "account",
    "id",
    &[
        "id",
        "identifier",
        "account_details",
        "created_at",
        "customer_agreements",
        "metadata",
        "next_action",
        "nickname",
        "primary_contact",
        "reactivate_details",
        "requirements",
        "status",
        "suspend_details",
        "view_type",
    ],
);

/// Connected account of a platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: Option<String>,
    pub identifier: Option<String>,
    pub account_details: Option<Value>,
    pub created_at: Option<String>,
    pub customer_agreements: Option<Value>,
    pub metadata: Option<Value>,
    pub next_action: Option<Value>,
    pub nickname: Option<String>,
    pub primary_contact: Option<Value>,
    pub reactivate_details: Option<Value>,
    pub requirements: Option<Value>,
    pub status: Option<String>,
    pub suspend_details: Option<Value>,
    pub view_type: Option<String>,
}

impl Resource for Account {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Airwallex, ATTRIBUTES);
    const ENDPOINT: &'static str = "/accounts";
}

impl Account {
    /// Create a connected account from `account_details`,
    /// `customer_agreements` and `primary_contact`.
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

    /// List connected accounts; accepts `pagesize`, `gettotal`, `after` and `before`.
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
            .send_filtered(&Self::DESCRIPTOR, Method::PUT, &Self::path(&format!("{id}/update")), &writable, body, options)
            .await?;
        decode(response)
    }

    /// Submit the account for activation.
    pub async fn submit(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<Self, GatewayError> {
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, &Self::path(&format!("{id}/submit")), Map::new(), options)
            .await?;
        decode(response)
    }
}
