use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RequestExecutor, Resource, decode, decode_items, with_query};

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "refund",
    "id",
    &[
        "id",
        "acquirer_reference_number",
        "amount",
        "created_at",
        "currency",
        "failure_details",
        "metadata",
        "payment_attempt_id",
        "payment_intent_id",
        "reason",
        "request_id",
        "status",
        "updated_at",
    ],
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refund {
    pub id: Option<String>,
    pub acquirer_reference_number: Option<String>,
    pub amount: Option<f64>,
    pub created_at: Option<String>,
    pub currency: Option<String>,
    pub failure_details: Option<Value>,
    pub metadata: Option<Value>,
    pub payment_attempt_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub reason: Option<String>,
    pub request_id: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<String>,
}

impl Resource for Refund {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Airwallex, ATTRIBUTES);
    const ENDPOINT: &'static str = "/pa/refunds";
}

impl Refund {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{declared_fields, serialized_fields};

    #[test]
    fn fields_match_declared_attributes() {
        assert_eq!(serialized_fields::<Refund>(), declared_fields::<Refund>());
    }
}
