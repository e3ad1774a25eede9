use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor, SIMULATION_PATH};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RequestExecutor, Resource, decode, decode_items, expect_raw, with_query};

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "transfer",
    "id",
    &[
        "id",
        "amount_beneficiary_receives",
        "amount_payer_pays",
        "application_fee_options",
        "application_fees",
        "batch_transfer_id",
        "beneficiary",
        "beneficiary_id",
        "conversion",
        "created_at",
        "dispatch_date",
        "dispatch_info",
        "failure_reason",
        "failure_type",
        "fee_amount",
        "fee_currency",
        "fee_paid_by",
        "funding",
        "lock_rate_on_create",
        "metadata",
        "payer",
        "payer_id",
        "prepayment",
        "reason",
        "reference",
        "remarks",
        "request_id",
        "short_reference_id",
        "source_amount",
        "source_currency",
        "status",
        "swift_charge_option",
        "transfer_amount",
        "transfer_currency",
        "transfer_date",
        "transfer_method",
        "updated_at",
    ],
);

/// Payout from the wallet to a beneficiary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfer {
    pub id: Option<String>,
    pub amount_beneficiary_receives: Option<f64>,
    pub amount_payer_pays: Option<f64>,
    pub application_fee_options: Option<Value>,
    pub application_fees: Option<Value>,
    pub batch_transfer_id: Option<String>,
    pub beneficiary: Option<Value>,
    pub beneficiary_id: Option<String>,
    pub conversion: Option<Value>,
    pub created_at: Option<String>,
    pub dispatch_date: Option<String>,
    pub dispatch_info: Option<Value>,
    pub failure_reason: Option<String>,
    pub failure_type: Option<String>,
    pub fee_amount: Option<f64>,
    pub fee_currency: Option<String>,
    pub fee_paid_by: Option<String>,
    pub funding: Option<Value>,
    pub lock_rate_on_create: Option<bool>,
    pub metadata: Option<Value>,
    pub payer: Option<Value>,
    pub payer_id: Option<String>,
    pub prepayment: Option<Value>,
    pub reason: Option<String>,
    pub reference: Option<String>,
    pub remarks: Option<String>,
    pub request_id: Option<String>,
    pub short_reference_id: Option<String>,
    pub source_amount: Option<f64>,
    pub source_currency: Option<String>,
    pub status: Option<String>,
    pub swift_charge_option: Option<String>,
    pub transfer_amount: Option<f64>,
    pub transfer_currency: Option<String>,
    pub transfer_date: Option<String>,
    pub transfer_method: Option<String>,
    pub updated_at: Option<String>,
}

impl Resource for Transfer {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Airwallex, ATTRIBUTES);
    const ENDPOINT: &'static str = "/transfers";
}

impl Transfer {
    /// `reason`, `reference`, `request_id` and `transfer_currency` are
    /// required by the API.
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

    /// `true` when the API answered `200`.
    pub async fn cancel(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<bool, GatewayError> {
        Self::status_of(executor, &Self::path(&format!("{id}/cancel")), Map::new(), options).await
    }

    pub async fn confirm_funding(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<Self, GatewayError> {
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, &Self::path(&format!("{id}/confirm_funding")), Map::new(), options)
            .await?;
        decode(response)
    }

    /// Dry-run a transfer body; `true` when the API accepts it.
    pub async fn validate(executor: &RequestExecutor, body: Map<String, Value>, options: &RequestOptions) -> Result<bool, GatewayError> {
        Self::status_of(executor, &Self::path("validate"), body, options).await
    }

    /// Move a sandbox transfer to another status through the simulation API.
    pub async fn transition(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        let path = format!("{SIMULATION_PATH}{}", Self::path(&format!("{id}/transition")));
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, &path, body, options)
            .await?;
        decode(response)
    }

    async fn status_of(
        executor: &RequestExecutor,
        path: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<bool, GatewayError> {
        let options = options.clone().raw_response(true);
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, path, body, &options)
            .await?;
        Ok(expect_raw(ATTRIBUTES.resource(), response)?.status == 200)
    }
}
