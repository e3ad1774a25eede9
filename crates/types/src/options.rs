use indexmap::IndexMap;

/// Per-call options recognized by the request executor.
///
/// Options are built with consuming setters so a resource can layer its own
/// requirements over what the caller passed:
///
/// ```
/// use paygate_types::RequestOptions;
///
/// let options = RequestOptions::default().on_behalf_of("acct_123").raw_response(true);
/// assert_eq!(options.on_behalf_of.as_deref(), Some("acct_123"));
/// assert!(options.raw_response);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Connected account to act for; sent as the `x-on-behalf-of` header and
    /// never as part of the body.
    pub on_behalf_of: Option<String>,
    /// Authenticate with client-id + api-key instead of the bearer token.
    pub use_client_id: bool,
    /// Send the body as `multipart/form-data`, untransformed.
    pub file: bool,
    /// Return the transport response without parsing the body.
    pub no_response_body: bool,
    /// Return the transport response (status, headers, body) untouched.
    pub raw_response: bool,
    /// Extra literal headers, e.g. `x-pan` for card BIN lookups.
    pub headers: IndexMap<String, String>,
    /// Query pairs appended to the request URL in order.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn on_behalf_of(mut self, account_id: impl Into<String>) -> Self {
        self.on_behalf_of = Some(account_id.into());
        self
    }

    pub fn use_client_id(mut self, enabled: bool) -> Self {
        self.use_client_id = enabled;
        self
    }

    pub fn file(mut self, enabled: bool) -> Self {
        self.file = enabled;
        self
    }

    pub fn no_response_body(mut self, enabled: bool) -> Self {
        self.no_response_body = enabled;
        self
    }

    pub fn raw_response(mut self, enabled: bool) -> Self {
        self.raw_response = enabled;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Whether the executor should hand back the transport response verbatim.
    pub fn skips_body_parsing(&self) -> bool {
        self.no_response_body || self.raw_response
    }
}
