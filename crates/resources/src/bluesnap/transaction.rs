use std::fmt;

use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RequestExecutor, Resource, decode};

const CARD_TRANSACTION_TYPE: &str = "card_transaction_type";
const MERCHANT_TRANSACTION_ID: &str = "merchant_transaction_id";

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "transaction",
    "transaction_id",
    &[
        "transaction_id",
        "wallet_id",
        "wallet",
        "amount",
        "usd_amount",
        "open_to_capture",
        "vaulted_shopper_id",
        "merchant_transaction_id",
        "soft_descriptor",
        "descriptor_phone_number",
        "tax_reference",
        "vendors_info",
        "card_holder_info",
        "currency",
        "transaction_fraud_info",
        "credit_card",
        "card_transaction_type",
        "three_d_secure",
        "transaction_meta_data",
        "pf_token",
        "level3_data",
        "store_card",
        "network_transaction_info",
        "transaction_order_source",
        "transaction_initiator",
        "transaction_approval_date",
        "transaction_approval_time",
    ],
);

/// Value of `cardTransactionType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTransactionType {
    AuthCapture,
    AuthOnly,
    Capture,
    AuthReversal,
}

impl CardTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthCapture => "AUTH_CAPTURE",
            Self::AuthOnly => "AUTH_ONLY",
            Self::Capture => "CAPTURE",
            Self::AuthReversal => "AUTH_REVERSAL",
        }
    }
}

impl fmt::Display for CardTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub transaction_id: Option<String>,
    pub wallet_id: Option<Value>,
    pub wallet: Option<Value>,
    pub amount: Option<f64>,
    pub usd_amount: Option<f64>,
    pub open_to_capture: Option<f64>,
    pub vaulted_shopper_id: Option<i64>,
    pub merchant_transaction_id: Option<String>,
    pub soft_descriptor: Option<String>,
    pub descriptor_phone_number: Option<String>,
    pub tax_reference: Option<String>,
    pub vendors_info: Option<Value>,
    pub card_holder_info: Option<Value>,
    pub currency: Option<String>,
    pub transaction_fraud_info: Option<Value>,
    pub credit_card: Option<Value>,
    pub card_transaction_type: Option<String>,
    pub three_d_secure: Option<Value>,
    pub transaction_meta_data: Option<Value>,
    pub pf_token: Option<String>,
    pub level3_data: Option<Value>,
    pub store_card: Option<bool>,
    pub network_transaction_info: Option<Value>,
    pub transaction_order_source: Option<String>,
    pub transaction_initiator: Option<String>,
    pub transaction_approval_date: Option<String>,
    pub transaction_approval_time: Option<String>,
}

impl Resource for Transaction {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Bluesnap, ATTRIBUTES);
    const ENDPOINT: &'static str = "/services/2/transactions";
}

impl Transaction {
    pub async fn create(executor: &RequestExecutor, body: Map<String, Value>, options: &RequestOptions) -> Result<Self, GatewayError> {
        let writable = ATTRIBUTES.writable();
        let response = executor
            .send_filtered(&Self::DESCRIPTOR, Method::POST, Self::ENDPOINT, &writable, body, options)
            .await?;
        decode(response)
    }

    /// Authorize and capture in one step.
    pub async fn auth_capture(executor: &RequestExecutor, body: Map<String, Value>, options: &RequestOptions) -> Result<Self, GatewayError> {
        Self::create(executor, with_type(body, CardTransactionType::AuthCapture), options).await
    }

    /// Authorize only; capture later with [`Transaction::capture`].
    pub async fn auth_only(executor: &RequestExecutor, body: Map<String, Value>, options: &RequestOptions) -> Result<Self, GatewayError> {
        Self::create(executor, with_type(body, CardTransactionType::AuthOnly), options).await
    }

    /// Update an existing transaction. The id travels in the body.
    pub async fn update(
        executor: &RequestExecutor,
        id: &str,
        mut body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        body.insert(ATTRIBUTES.identifier().to_string(), Value::String(id.to_string()));
        let response = executor
            .send_filtered(&Self::DESCRIPTOR, Method::PUT, Self::ENDPOINT, &ATTRIBUTES.all(), body, options)
            .await?;
        decode(response)
    }

    pub async fn capture(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        Self::update(executor, id, with_type(body, CardTransactionType::Capture), options).await
    }

    /// Reverse an authorization, addressed by BlueSnap's or the merchant's id.
    ///
    /// Only the selected id field is sent.
    pub async fn auth_reversal(
        executor: &RequestExecutor,
        id: &str,
        using_merchant_id: bool,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        let body = with_type(reversal_body(id, using_merchant_id), CardTransactionType::AuthReversal);
        let response = executor
            .send_filtered(&Self::DESCRIPTOR, Method::PUT, Self::ENDPOINT, &ATTRIBUTES.all(), body, options)
            .await?;
        decode(response)
    }

    pub async fn find(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<Self, GatewayError> {
        let response = executor
            .send(&Self::DESCRIPTOR, Method::GET, &Self::path(id), Map::new(), options)
            .await?;
        decode(response)
    }
}

fn reversal_body(id: &str, using_merchant_id: bool) -> Map<String, Value> {
    let id_field = if using_merchant_id { MERCHANT_TRANSACTION_ID } else { ATTRIBUTES.identifier() };
    Map::from_iter([(id_field.to_string(), Value::String(id.to_string()))])
}

fn with_type(mut body: Map<String, Value>, kind: CardTransactionType) -> Map<String, Value> {
    body.insert(CARD_TRANSACTION_TYPE.to_string(), Value::String(kind.as_str().to_string()));
    body
}
