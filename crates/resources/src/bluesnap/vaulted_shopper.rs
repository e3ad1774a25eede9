use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor, TypedResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RequestExecutor, Resource, decode, expect_raw};

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "vaulted_shopper",
    "vaulted_shopper_id",
    &[
        "vaulted_shopper_id",
        "payment_sources",
        "first_name",
        "last_name",
        "soft_descriptor",
        "descriptor_phone_number",
        "merchant_shopper_id",
        "country",
        "state",
        "city",
        "address",
        "address2",
        "email",
        "zip",
        "phone",
        "company_name",
        "shopper_currency",
        "shipping_contact_info",
        "wallet_id",
        "transaction_fraud_info",
        "transaction_order_source",
        "three_d_secure",
    ],
);

/// Which identifier a shopper lookup uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShopperLookup {
    /// BlueSnap's vaulted shopper id.
    #[default]
    VaultedShopperId,
    /// The merchant's own shopper id.
    MerchantShopperId,
}

/// Shopper with stored payment sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultedShopper {
    pub vaulted_shopper_id: Option<i64>,
    pub payment_sources: Option<Value>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub soft_descriptor: Option<String>,
    pub descriptor_phone_number: Option<String>,
    pub merchant_shopper_id: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub address2: Option<String>,
    pub email: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub shopper_currency: Option<String>,
    pub shipping_contact_info: Option<Value>,
    pub wallet_id: Option<Value>,
    pub transaction_fraud_info: Option<Value>,
    pub transaction_order_source: Option<String>,
    pub three_d_secure: Option<Value>,
}

impl Resource for VaultedShopper {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Bluesnap, ATTRIBUTES);
    const ENDPOINT: &'static str = "/services/2/vaulted-shoppers";
}

impl VaultedShopper {
    /// Create a shopper and return its id, read from the `location` header.
    ///
    /// `Ok(None)` when the API did not answer with a location.
    pub async fn create(
        executor: &RequestExecutor,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Option<String>, GatewayError> {
        let writable = ATTRIBUTES.writable();
        let raw_options = options.clone().raw_response(true);
        let response = executor
            .send_filtered(&Self::DESCRIPTOR, Method::POST, Self::ENDPOINT, &writable, body, &raw_options)
            .await?;
        let raw = expect_raw(ATTRIBUTES.resource(), response)?;
        let location_id = raw.location_id();
        // error bodies still fail the call
        executor.interpret(raw)?;
        Ok(location_id)
    }

    pub async fn find(
        executor: &RequestExecutor,
        id: &str,
        lookup: ShopperLookup,
        options: &RequestOptions,
    ) -> Result<Self, GatewayError> {
        let response = executor
            .send(&Self::DESCRIPTOR, Method::GET, &Self::lookup_path(id, lookup), Map::new(), options)
            .await?;
        decode(response)
    }

    /// `true` when the API answered `204`.
    pub async fn update(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<bool, GatewayError> {
        let writable = ATTRIBUTES.writable();
        let raw_options = options.clone().raw_response(true);
        let response = executor
            .send_filtered(&Self::DESCRIPTOR, Method::PUT, &Self::path(id), &writable, body, &raw_options)
            .await?;
        Ok(checked_status(executor, response)? == 204)
    }

    /// `true` when the API answered `200`.
    pub async fn delete(
        executor: &RequestExecutor,
        id: &str,
        lookup: ShopperLookup,
        options: &RequestOptions,
    ) -> Result<bool, GatewayError> {
        let raw_options = options.clone().raw_response(true);
        let response = executor
            .send(&Self::DESCRIPTOR, Method::DELETE, &Self::lookup_path(id, lookup), Map::new(), &raw_options)
            .await?;
        Ok(checked_status(executor, response)? == 200)
    }

    fn lookup_path(id: &str, lookup: ShopperLookup) -> String {
        match lookup {
            ShopperLookup::VaultedShopperId => Self::path(id),
            ShopperLookup::MerchantShopperId => Self::path(&format!("merchant/{id}")),
        }
    }
}

/// Status of a raw response whose body, if any, is not an error payload.
fn checked_status(executor: &RequestExecutor, response: TypedResponse) -> Result<u16, GatewayError> {
    let raw = expect_raw(ATTRIBUTES.resource(), response)?;
    let status = raw.status;
    executor.interpret(raw)?;
    Ok(status)
}
