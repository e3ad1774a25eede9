//! Typed resources for the supported payment providers.
//!
//! Every resource is a serde struct whose fields are exactly the attributes
//! declared in its [`ResourceDescriptor`]. Endpoint methods are associated
//! functions taking the [`RequestExecutor`] that carries the configuration:
//!
//! ```ignore
//! use paygate_resources::airwallex::PaymentIntent;
//! use paygate_types::RequestOptions;
//!
//! let intent = PaymentIntent::find(&executor, "int_hkdm2d6wlg6x3xq9nm", &RequestOptions::default()).await?;
//! ```

use paygate_types::{AttributeRegistry, GatewayError, RawResponse, RequestOptions, ResourceDescriptor, TypedResponse};
use paygate_util::build_query_pairs;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

pub mod airwallex;
pub mod bluesnap;

pub use paygate_util::RequestExecutor;

/// A provider entity with a declared attribute set and a base endpoint.
pub trait Resource: DeserializeOwned + Serialize + Default {
    const DESCRIPTOR: ResourceDescriptor;
    /// Endpoint path relative to the provider's API URL.
    const ENDPOINT: &'static str;

    fn attributes() -> AttributeRegistry {
        Self::DESCRIPTOR.attributes
    }

    /// `ENDPOINT/<suffix>`.
    fn path(suffix: &str) -> String {
        format!("{}/{}", Self::ENDPOINT, suffix.trim_start_matches('/'))
    }
}

/// `options` with `params` appended as query pairs. Keys are sent as given.
pub(crate) fn with_query(options: &RequestOptions, params: Map<String, Value>) -> RequestOptions {
    options.clone().query_pairs(build_query_pairs(params))
}

pub(crate) fn decode<R: Resource>(response: TypedResponse) -> Result<R, GatewayError> {
    let kind = R::DESCRIPTOR.kind();
    match response {
        TypedResponse::Object(map) => from_object(kind, map),
        TypedResponse::List(_) => Err(GatewayError::unexpected_payload(kind, "expected an object, got a list")),
        TypedResponse::Raw(raw) => Err(GatewayError::unexpected_payload(
            kind,
            format!("expected an object, got an empty body with status {}", raw.status),
        )),
    }
}

/// Decode the `items` of a paginated collection; no `items` means no entries.
pub(crate) fn decode_items<R: Resource>(response: TypedResponse) -> Result<Vec<R>, GatewayError> {
    let kind = R::DESCRIPTOR.kind();
    match response {
        TypedResponse::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => from_values(kind, items),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(_) => Err(GatewayError::unexpected_payload(kind, "`items` is not a list")),
        },
        TypedResponse::List(items) => from_values(kind, items),
        TypedResponse::Raw(_) => Ok(Vec::new()),
    }
}

/// Decode a top-level list payload.
pub(crate) fn decode_list<R: Resource>(response: TypedResponse) -> Result<Vec<R>, GatewayError> {
    let kind = R::DESCRIPTOR.kind();
    match response {
        TypedResponse::List(items) => from_values(kind, items),
        TypedResponse::Object(_) => Err(GatewayError::unexpected_payload(kind, "expected a list, got an object")),
        TypedResponse::Raw(_) => Ok(Vec::new()),
    }
}

pub(crate) fn expect_raw(kind: &'static str, response: TypedResponse) -> Result<RawResponse, GatewayError> {
    response
        .into_raw()
        .ok_or_else(|| GatewayError::unexpected_payload(kind, "expected the raw transport response"))
}

fn from_object<R: Resource>(kind: &'static str, map: Map<String, Value>) -> Result<R, GatewayError> {
    serde_json::from_value(Value::Object(map)).map_err(|error| GatewayError::unexpected_payload(kind, error))
}

fn from_values<R: Resource>(kind: &'static str, items: Vec<Value>) -> Result<Vec<R>, GatewayError> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => from_object(kind, map),
            other => Err(GatewayError::unexpected_payload(kind, format!("list entry is not an object: {other}"))),
        })
        .collect()
}
