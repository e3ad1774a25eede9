//! # Response Parsing
//!
//! Strict JSON parsing of response bodies and normalization of the error
//! payload shapes used by the supported providers.

use paygate_types::{GatewayError, Provider, RemoteError, ToProviderInfo};
use serde_json::{Map, Value};
use thiserror::Error;

/// Parse HTTP response text into JSON, providing detailed errors on failure.
///
/// This helper performs strict JSON deserialization and decorates any parsing
/// error with context about the originating HTTP status code plus a truncated
/// preview of the response body.
///
/// # Errors
/// Returns a [`JsonParseError`] describing the parse failure. The message
/// includes the original serde error and up to 200 characters of the response
/// body (with whitespace collapsed).
///
/// # Example
/// ```rust
/// use paygate_util::http::parse_response_json_strict;
///
/// assert!(parse_response_json_strict(r#"{"id": "int_1"}"#, Some(200)).is_ok());
/// let error = parse_response_json_strict("<html>Bad Gateway</html>", Some(502)).unwrap_err();
/// assert!(error.to_string().contains("status 502"));
/// ```
pub fn parse_response_json_strict(text: &str, status: Option<u16>) -> Result<Value, JsonParseError> {
    serde_json::from_str::<Value>(text).map_err(|error| {
        let status_note = status
            .map(|code| format!("status {code}"))
            .unwrap_or_else(|| "unknown status".to_string());
        let preview = truncate_response_preview(text, 200);

        JsonParseError::new(status_note, error, preview)
    })
}

fn truncate_response_preview(text: &str, limit: usize) -> String {
    if text.trim().is_empty() {
        return "<empty>".to_string();
    }

    let mut preview = String::new();
    for ch in text.chars() {
        if preview.len() >= limit {
            preview.push_str("...");
            break;
        }
        match ch {
            '\n' | '\r' | '\t' => {
                if !preview.ends_with(' ') {
                    preview.push(' ');
                }
            }
            _ => preview.push(ch),
        }
    }

    preview.trim().to_string()
}

/// Error returned when strict JSON parsing of an HTTP response fails.
#[derive(Debug, Error)]
#[error("failed to parse JSON response ({status_note}): {source}. body preview: {body_preview}")]
pub struct JsonParseError {
    status_note: String,
    #[source]
    source: serde_json::Error,
    body_preview: String,
}

impl JsonParseError {
    pub fn new(status_note: String, source: serde_json::Error, body_preview: String) -> Self {
        Self {
            status_note,
            source,
            body_preview,
        }
    }

    /// Access the truncated response preview captured during parsing.
    pub fn body_preview(&self) -> &str {
        &self.body_preview
    }
}

impl From<JsonParseError> for GatewayError {
    fn from(error: JsonParseError) -> Self {
        GatewayError::invalid_response(crate::redact_sensitive(&error.to_string()))
    }
}

/// Ordered rules turning a parsed body into "proceed" or a typed failure.
///
/// 1. neither object nor array: [`GatewayError::InvalidResponseShape`]
/// 2. `message` is an array: first element's `description` (or the element itself)
/// 3. `message` is any other truthy value: its string form
/// 4. `error` is truthy (BlueSnap only): the error plus `error_description`
///    and a summary of each entry in `messages`, joined with `&`
/// 5. anything else is a success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorTranslator {
    error_envelope: bool,
}

impl ErrorTranslator {
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            error_envelope: provider.recognizes_error_envelope(),
        }
    }

    /// Recognize only the `message` shapes.
    pub fn message_only() -> Self {
        Self { error_envelope: false }
    }

    /// Recognize the `message` shapes and the `error`/`messages` envelope.
    pub fn with_error_envelope() -> Self {
        Self { error_envelope: true }
    }

    /// `Ok(())` when the body is a success payload.
    pub fn translate(&self, body: &Value) -> Result<(), GatewayError> {
        if !body.is_object() && !body.is_array() {
            return Err(GatewayError::InvalidResponseShape { body: body.clone() });
        }
        match self.normalize(body) {
            Some(remote) => Err(remote.into()),
            None => Ok(()),
        }
    }

    /// Apply the error-shape rules to an object body.
    pub fn normalize(&self, body: &Value) -> Option<RemoteError> {
        let object = body.as_object()?;

        match object.get("message") {
            Some(Value::Array(items)) => return Some(RemoteError::new(describe_first(items), body.clone())),
            Some(message) if is_truthy(message) => return Some(RemoteError::new(stringify(message), body.clone())),
            _ => {}
        }

        if !self.error_envelope {
            return None;
        }
        let error = object.get("error").filter(|error| is_truthy(error))?;
        let mut description = stringify(error);

        if let Some(Value::String(detail)) = object.get("error_description")
            && !detail.trim().is_empty()
        {
            description = format!("{description}: {detail}");
        }
        if let Some(Value::Array(messages)) = object.get("messages") {
            let summaries = messages
                .iter()
                .filter_map(Value::as_object)
                .map(summarize_message)
                .filter(|summary| !summary.is_empty())
                .collect::<Vec<String>>();
            if !summaries.is_empty() {
                description = format!("{description} - {}", summaries.join(" & "));
            }
        }

        let response_body = object
            .get("response")
            .filter(|response| !response.is_null())
            .cloned()
            .unwrap_or_else(|| body.clone());
        Some(RemoteError::new(description, response_body))
    }
}

fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn describe_first(items: &[Value]) -> String {
    match items.first() {
        Some(first @ Value::Object(entry)) => entry
            .get("description")
            .filter(|description| is_truthy(description))
            .map(stringify)
            .unwrap_or_else(|| first.to_string()),
        Some(other) => stringify(other),
        None => "unknown error".to_string(),
    }
}

fn lookup<'a>(entry: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| entry.get(*key)).filter(|value| !value.is_null())
}

/// `errorName (code): description`, omitting absent parts.
fn summarize_message(entry: &Map<String, Value>) -> String {
    let name = lookup(entry, &["errorName", "ErrorName", "error_name"]).map(stringify);
    let code = lookup(entry, &["code", "Code"]).map(stringify);
    let description = lookup(entry, &["description", "Description"]).map(stringify);

    let label = match (name, code) {
        (Some(name), Some(code)) => format!("{name} ({code})"),
        (Some(name), None) => name,
        (None, Some(code)) => code,
        (None, None) => String::new(),
    };
    match description {
        Some(description) if label.is_empty() => description,
        Some(description) => format!("{label}: {description}"),
        None => label,
    }
}
