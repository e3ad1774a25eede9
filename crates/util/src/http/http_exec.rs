//! # Request Execution
//!
//! [`RequestExecutor`] runs one call end to end: it checks that the resource
//! belongs to the configured provider, resolves headers and the URL, shapes
//! the body for the wire, sends it, and turns the response into a
//! [`TypedResponse`] or a single [`GatewayError`].
//!
//! Outbound bodies are always filtered on host (snake_case) keys before they
//! are transcoded to the provider's wire case. Response bodies are inspected
//! for provider error shapes regardless of the HTTP status.

use std::time::Instant;

use paygate_api::{GatewayClient, Method, PreparedRequest, RequestBody};
use paygate_types::{
    Configuration, FieldSet, GatewayError, Provider, RawResponse, RequestOptions, ResourceDescriptor, ToProviderInfo,
    TypedResponse,
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::parser::{ErrorTranslator, parse_response_json_strict};
use crate::{
    body_filter::{filter_for_request, filter_request_body},
    key_case::{KeyCaseTranscoder, to_snake_key, transcoder_for},
    redact_sensitive,
};

const ON_BEHALF_OF_FIELD: &str = "on_behalf_of";

/// Executes requests for resources of the configured provider.
///
/// Cloning is cheap and clones share the underlying client.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: GatewayClient,
}

impl RequestExecutor {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// Build an executor backed by the default HTTPS transport.
    pub fn from_config(config: Configuration) -> Result<Self, GatewayError> {
        Ok(Self::new(GatewayClient::new(config)?))
    }

    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// Executor authenticating with a freshly issued bearer token.
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self::new(self.client.with_access_token(token))
    }

    pub fn config(&self) -> &Configuration {
        self.client.config()
    }

    pub fn provider(&self) -> Provider {
        self.config().provider()
    }

    /// Key-case strategy of the configured provider.
    pub fn transcoder(&self) -> &'static dyn KeyCaseTranscoder {
        transcoder_for(self.provider().wire_case())
    }

    /// Writable attributes of `resource` present in `body`.
    pub fn filter_for_request(&self, resource: &ResourceDescriptor, body: &Map<String, Value>) -> Map<String, Value> {
        filter_for_request(&resource.attributes, body)
    }

    /// Send `body` after keeping only the fields in `fields`.
    ///
    /// Filtering happens on host keys, before wire transcoding.
    pub async fn send_filtered(
        &self,
        resource: &ResourceDescriptor,
        method: Method,
        path: &str,
        fields: &FieldSet,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<TypedResponse, GatewayError> {
        reject_on_behalf_of_field(&body)?;
        let filtered = filter_request_body(fields, &body);
        self.send(resource, method, path, filtered, options).await
    }

    /// Send `body` as given, only transcoding its keys to wire case.
    pub async fn send(
        &self,
        resource: &ResourceDescriptor,
        method: Method,
        path: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<TypedResponse, GatewayError> {
        let start = Instant::now();
        let request = self.prepare(resource, method.clone(), path, body, options)?;
        debug!(
            method = %method,
            path = %path,
            resource = resource.kind(),
            file = options.file,
            on_behalf_of = options.on_behalf_of.is_some(),
            "request prepared"
        );

        let raw = self.client.execute(request).await?;
        if options.skips_body_parsing() {
            debug!(
                method = %method,
                path = %path,
                status = raw.status,
                duration_ms = start.elapsed().as_millis(),
                "returning raw response"
            );
            return Ok(TypedResponse::Raw(raw));
        }

        let outcome = self.interpret(raw);
        match &outcome {
            Ok(_) => debug!(
                method = %method,
                path = %path,
                duration_ms = start.elapsed().as_millis(),
                "response interpreted"
            ),
            Err(error) => warn!(
                method = %method,
                path = %path,
                resource = resource.kind(),
                error = %redact_sensitive(&error.to_string()),
                duration_ms = start.elapsed().as_millis(),
                "request rejected"
            ),
        }
        outcome
    }

    /// Resolve everything the transport needs for one call.
    pub fn prepare(
        &self,
        resource: &ResourceDescriptor,
        method: Method,
        path: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<PreparedRequest, GatewayError> {
        self.ensure_family(resource)?;
        reject_on_behalf_of_field(&body)?;

        let headers = self.client.auth().apply_headers(resource.auth, options)?;
        let url = self.client.url_for(path, &options.query)?;
        let body_field_count = body.len();
        let body = if body.is_empty() {
            RequestBody::Empty
        } else if options.file {
            RequestBody::Multipart(body)
        } else {
            RequestBody::Json(self.transcoder().to_wire_case(Value::Object(body)))
        };
        debug!(method = %method, path = %path, body_field_count, "request body prepared");

        Ok(PreparedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Turn a transport response into a host-cased payload or an error.
    ///
    /// Empty bodies come back as [`TypedResponse::Raw`].
    pub fn interpret(&self, raw: RawResponse) -> Result<TypedResponse, GatewayError> {
        if raw.has_empty_body() {
            return Ok(TypedResponse::Raw(raw));
        }

        let provider = self.provider();
        let text = raw.text();
        let parsed = parse_response_json_strict(&text, Some(raw.status)).map_err(|error| {
            warn!(
                status = raw.status,
                body_len = text.len(),
                error = %redact_sensitive(&error.to_string()),
                "response JSON parse failed"
            );
            GatewayError::from(error)
        })?;

        ErrorTranslator::for_provider(provider).translate(&parsed)?;
        if !raw.is_success() {
            warn!(status = raw.status, provider = %provider, "non-success status without a recognized error body");
        }

        let payload = if provider.wraps_success_payload() {
            unwrap_success_envelope(parsed)
        } else {
            parsed
        };
        match self.transcoder().to_host_case(payload) {
            Value::Object(map) => Ok(TypedResponse::Object(map)),
            Value::Array(items) => Ok(TypedResponse::List(items)),
            other => Err(GatewayError::InvalidResponseShape { body: other }),
        }
    }

    fn ensure_family(&self, resource: &ResourceDescriptor) -> Result<(), GatewayError> {
        let provider = self.provider();
        if provider.family() != resource.family {
            return Err(GatewayError::ProviderMismatch {
                resource: resource.kind(),
                expected: resource.family,
                actual: provider,
            });
        }
        Ok(())
    }
}

fn reject_on_behalf_of_field(body: &Map<String, Value>) -> Result<(), GatewayError> {
    if body.keys().any(|key| to_snake_key(key) == ON_BEHALF_OF_FIELD) {
        return Err(GatewayError::OnBehalfOfInBody);
    }
    Ok(())
}

fn unwrap_success_envelope(parsed: Value) -> Value {
    match parsed {
        Value::Object(mut map) => match map.remove("response") {
            Some(inner @ (Value::Object(_) | Value::Array(_))) => inner,
            Some(other) => {
                map.insert("response".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Convert a parameter map into ordered query pairs.
///
/// Array values repeat the key once per element; strings are used as they
/// are and every other value is rendered as JSON.
pub fn build_query_pairs(query_parameters: Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in query_parameters {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), query_value_to_string(item)));
                }
            }
            Value::Null => {}
            other => pairs.push((key, query_value_to_string(other))),
        }
    }
    pairs
}

fn query_value_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
