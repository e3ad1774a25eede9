use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Transport response as received: status, headers and body bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Header names are stored lower-cased.
    pub headers: IndexMap<String, String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: IndexMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn has_empty_body(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Last path segment of the `location` header, the identifier of a
    /// newly created resource on endpoints that answer `201` without a body.
    pub fn location_id(&self) -> Option<String> {
        let location = self.header("location")?.trim().trim_end_matches('/');
        let segment = location.rsplit('/').next()?;
        (!segment.is_empty()).then(|| segment.to_string())
    }
}

/// Successful outcome of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedResponse {
    /// Host-cased JSON object.
    Object(Map<String, Value>),
    /// Host-cased JSON array, as returned by list endpoints.
    List(Vec<Value>),
    /// Transport response returned untouched (empty body, `raw_response`,
    /// `no_response_body`).
    Raw(RawResponse),
}

impl TypedResponse {
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_raw(self) -> Option<RawResponse> {
        match self {
            Self::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    /// Convert parsed variants back into a JSON value; `None` for raw responses.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Object(map) => Some(Value::Object(map)),
            Self::List(items) => Some(Value::Array(items)),
            Self::Raw(_) => None,
        }
    }
}
