use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RequestExecutor, Resource, decode, decode_items, with_query};

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "payment_intent",
    "id",
    &[
        "id",
        "additional_info",
        "amount",
        "cancellation_reason",
        "cancelled_at",
        "captured_amount",
        "client_secret",
        "connected_account_id",
        "conversion_quote_id",
        "created_at",
        "currency",
        "customer",
        "customer_id",
        "descriptor",
        "funds_split_data",
        "invoice_id",
        "latest_payment_attempt",
        "merchant_order_id",
        "metadata",
        "next_action",
        "order",
        "payment_consent",
        "payment_consent_id",
        "payment_link_id",
        "payment_method_options",
        "request_id",
        "return_url",
        "risk_control_options",
        "status",
        "triggered_by",
        "updated_at",
    ],
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentIntent {
    pub id: Option<String>,
    pub additional_info: Option<Value>,
    pub amount: Option<f64>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<String>,
    pub captured_amount: Option<f64>,
    pub client_secret: Option<String>,
    pub connected_account_id: Option<String>,
    pub conversion_quote_id: Option<String>,
    pub created_at: Option<String>,
    pub currency: Option<String>,
    pub customer: Option<Value>,
    pub customer_id: Option<String>,
    pub descriptor: Option<String>,
    pub funds_split_data: Option<Value>,
    pub invoice_id: Option<String>,
    pub latest_payment_attempt: Option<Value>,
    pub merchant_order_id: Option<String>,
    pub metadata: Option<Value>,
    pub next_action: Option<Value>,
    pub order: Option<Value>,
    pub payment_consent: Option<Value>,
    pub payment_consent_id: Option<String>,
    pub payment_link_id: Option<String>,
    pub payment_method_options: Option<Value>,
    pub request_id: Option<String>,
    pub return_url: Option<String>,
    pub risk_control_options: Option<Value>,
    pub status: Option<String>,
    pub triggered_by: Option<String>,
    pub updated_at: Option<String>,
}

impl Resource for PaymentIntent {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Airwallex, ATTRIBUTES);
    const ENDPOINT: &'static str = "/pa/payment_intents";
}

impl PaymentIntent {
    /// Create a payment intent. `amount`, `currency`, `merchant_order_id`
    /// and `request_id` are required by the API.
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

    /// List payment intents matching filters such as `status`,
    /// `from_created_at`, `page_num` and `page_size`.
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

    pub async fn confirm(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        Self::action(executor, id, "confirm", body, options).await
    }

    /// Continue a confirmation that required a next action, e.g. 3DS.
    pub async fn confirm_continue(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        Self::action(executor, id, "confirm_continue", body, options).await
    }

    pub async fn capture(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        Self::action(executor, id, "capture", body, options).await
    }

    pub async fn cancel(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        Self::action(executor, id, "cancel", body, options).await
    }

    // Action bodies are forwarded unfiltered.
    async fn action(
        executor: &RequestExecutor,
        id: &str,
        action: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, &Self::path(&format!("{id}/{action}")), body, options)
            .await?;
        decode(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{declared_fields, serialized_fields};

    #[test]
    fn fields_match_declared_attributes() {
        assert_eq!(serialized_fields::<PaymentIntent>(), declared_fields::<PaymentIntent>());
    }

    #[test]
    fn paths_hang_off_the_endpoint() {
        assert_eq!(PaymentIntent::path("int_1/confirm"), "/pa/payment_intents/int_1/confirm");
        assert!(!ATTRIBUTES.writable().contains("id"));
    }
}
