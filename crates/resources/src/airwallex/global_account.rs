use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RawResponse, RequestOptions, ResourceDescriptor, TypedResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RequestExecutor, Resource, decode, decode_items, expect_raw, with_query};

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "global_account",
    "id",
    &[
        "id",
        "account_name",
        "account_number",
        "account_type",
        "alternate_account_identifiers",
        "close_reason",
        "country_code",
        "deposit_conversion_currency",
        "failure_reason",
        "iban",
        "institution",
        "nick_name",
        "request_id",
        "required_features",
        "status",
        "supported_features",
        "swift_code",
    ],
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalAccount {
    pub id: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub account_type: Option<String>,
    pub alternate_account_identifiers: Option<Value>,
    pub close_reason: Option<String>,
    pub country_code: Option<String>,
    pub deposit_conversion_currency: Option<String>,
    pub failure_reason: Option<String>,
    pub iban: Option<String>,
    pub institution: Option<Value>,
    pub nick_name: Option<String>,
    pub request_id: Option<String>,
    pub required_features: Option<Value>,
    pub status: Option<String>,
    pub supported_features: Option<Value>,
    pub swift_code: Option<String>,
}

impl Resource for GlobalAccount {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Airwallex, ATTRIBUTES);
    const ENDPOINT: &'static str = "/global_accounts";
}

impl GlobalAccount {
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

    pub async fn close(executor: &RequestExecutor, id: &str, options: &RequestOptions) -> Result<Self, GatewayError> {
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, &Self::path(&format!("{id}/close")), Map::new(), options)
            .await?;
        decode(response)
    }

    /// Transactions credited to or debited from a global account.
    ///
    /// Entries are returned as host-cased mappings; no `items` means none.
    pub async fn transactions(
        executor: &RequestExecutor,
        id: &str,
        params: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Vec<Map<String, Value>>, GatewayError> {
        let options = with_query(options, params);
        let response = executor
            .send(&Self::DESCRIPTOR, Method::GET, &Self::path(&format!("{id}/transactions")), Map::new(), &options)
            .await?;

        let items = match response {
            TypedResponse::Object(mut map) => match map.remove("items") {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(_) => return Err(GatewayError::unexpected_payload(ATTRIBUTES.resource(), "`items` is not a list")),
            },
            TypedResponse::List(items) => items,
            TypedResponse::Raw(_) => Vec::new(),
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::Object(entry) => Ok(entry),
                other => Err(GatewayError::unexpected_payload(
                    ATTRIBUTES.resource(),
                    format!("transaction entry is not an object: {other}"),
                )),
            })
            .collect()
    }

    /// Request an account statement letter.
    ///
    /// The body goes out as `multipart/form-data` and the document comes
    /// back untouched in the raw response.
    pub async fn generate_statement_letter(
        executor: &RequestExecutor,
        id: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<RawResponse, GatewayError> {
        let options = options.clone().file(true).raw_response(true);
        let path = Self::path(&format!("{id}/generate_statement_letter"));
        let response = executor
            .send(&Self::DESCRIPTOR, Method::POST, &path, body, &options)
            .await?;
        expect_raw(ATTRIBUTES.resource(), response)
    }
}
