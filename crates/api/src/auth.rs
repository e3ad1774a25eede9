//! Authentication and content headers for outgoing requests.
//!
//! Header selection, first match wins:
//!
//! | condition | headers |
//! |---|---|
//! | Basic credentials (BlueSnap family) | `Authorization: Basic base64(username:password)` |
//! | token resource, or `use_client_id` | `x-client-id`, `x-api-key` |
//! | otherwise | `Authorization: Bearer <access_token>` |
//!
//! `Accept` is always `application/json`. `Content-Type` is
//! `application/json`, or `multipart/form-data` for file uploads.

use base64::{Engine, engine::general_purpose::STANDARD};
use paygate_types::{AuthRole, Configuration, Credentials, GatewayError, RequestOptions, ToProviderInfo};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

pub const CLIENT_ID_HEADER: &str = "x-client-id";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const ON_BEHALF_OF_HEADER: &str = "x-on-behalf-of";

const JSON: &str = "application/json";
const MULTIPART: &str = "multipart/form-data";

/// Resolves the headers a call carries from configuration and options.
#[derive(Debug, Clone, Copy)]
pub struct AuthStrategy<'a> {
    config: &'a Configuration,
}

impl<'a> AuthStrategy<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// Build the full header set for one call.
    ///
    /// Extra headers from `options.headers` are applied last and marked
    /// sensitive, since they may carry card data such as `x-pan`.
    pub fn apply_headers(&self, role: AuthRole, options: &RequestOptions) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(JSON));
        let content_type = if options.file { MULTIPART } else { JSON };
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));

        self.apply_credentials(&mut headers, role, options)?;

        if let Some(account_id) = options.on_behalf_of.as_deref() {
            insert(&mut headers, ON_BEHALF_OF_HEADER, account_id, false)?;
        }
        if let Some(version) = self.config.provider_version() {
            insert(&mut headers, self.config.provider().version_header(), version, false)?;
        }
        for (name, value) in &options.headers {
            insert(&mut headers, name, value, true)?;
        }

        Ok(headers)
    }

    fn apply_credentials(&self, headers: &mut HeaderMap, role: AuthRole, options: &RequestOptions) -> Result<(), GatewayError> {
        let provider = self.config.provider();
        match self.config.credentials() {
            Credentials::Basic { username, password } => {
                if username.is_empty() {
                    return Err(GatewayError::MissingCredential { provider, name: "username" });
                }
                if password.is_empty() {
                    return Err(GatewayError::MissingCredential { provider, name: "password" });
                }
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                insert(headers, header::AUTHORIZATION.as_str(), &format!("Basic {encoded}"), true)
            }
            Credentials::Platform(platform) => {
                if role == AuthRole::Authentication || options.use_client_id {
                    let client_id = platform
                        .client_id
                        .as_deref()
                        .ok_or(GatewayError::MissingCredential { provider, name: "client_id" })?;
                    let api_key = platform
                        .api_key
                        .as_deref()
                        .ok_or(GatewayError::MissingCredential { provider, name: "api_key" })?;
                    insert(headers, CLIENT_ID_HEADER, client_id, false)?;
                    return insert(headers, API_KEY_HEADER, api_key, true);
                }

                let token = platform
                    .access_token
                    .as_deref()
                    .ok_or(GatewayError::MissingCredential { provider, name: "access_token" })?;
                insert(headers, header::AUTHORIZATION.as_str(), &format!("Bearer {token}"), true)
            }
        }
    }
}

fn insert(headers: &mut HeaderMap, name: &str, value: &str, sensitive: bool) -> Result<(), GatewayError> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|error| GatewayError::invalid_header(name, error))?;
    let mut header_value = HeaderValue::from_str(value).map_err(|error| GatewayError::invalid_header(name, error))?;
    header_value.set_sensitive(sensitive);
    headers.insert(header_name, header_value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_types::Provider;

    fn airwallex() -> Configuration {
        Configuration::builder(Provider::Airwallex)
            .access_token("token-123")
            .client_id("client-abc")
            .api_key("key-xyz")
            .build()
            .expect("config")
    }

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|value| value.to_str().ok())
    }

    #[test]
    fn bearer_token_is_the_default_platform_auth() {
        let config = airwallex();
        let headers = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Standard, &RequestOptions::default())
            .expect("headers");

        assert_eq!(header(&headers, "authorization"), Some("Bearer token-123"));
        assert_eq!(header(&headers, "accept"), Some("application/json"));
        assert_eq!(header(&headers, "content-type"), Some("application/json"));
        assert!(headers.get(CLIENT_ID_HEADER).is_none());
    }

    #[test]
    fn use_client_id_never_sends_bearer() {
        let config = airwallex();
        let options = RequestOptions::default().use_client_id(true);
        let headers = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Standard, &options)
            .expect("headers");

        assert!(headers.get(header::AUTHORIZATION).is_none());
        assert_eq!(header(&headers, CLIENT_ID_HEADER), Some("client-abc"));
        assert_eq!(header(&headers, API_KEY_HEADER), Some("key-xyz"));
    }

    #[test]
    fn authentication_resource_uses_client_id_without_access_token() {
        let config = Configuration::builder(Provider::Airwallex)
            .client_id("client-abc")
            .api_key("key-xyz")
            .build()
            .expect("config");
        let headers = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Authentication, &RequestOptions::default())
            .expect("headers");

        assert!(headers.get(header::AUTHORIZATION).is_none());
        assert_eq!(header(&headers, CLIENT_ID_HEADER), Some("client-abc"));
    }

    #[test]
    fn missing_token_is_reported_by_name() {
        let config = Configuration::builder(Provider::Airwallex).build().expect("config");
        let error = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Standard, &RequestOptions::default())
            .expect_err("no token configured");
        assert!(matches!(error, GatewayError::MissingCredential { name: "access_token", .. }));
    }

    #[test]
    fn basic_credentials_are_base64_encoded() {
        let config = Configuration::builder(Provider::Bluesnap)
            .basic("merchant", "secret")
            .provider_version("3.0")
            .build()
            .expect("config");
        let options = RequestOptions::default().use_client_id(true);
        let headers = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Standard, &options)
            .expect("headers");

        assert_eq!(header(&headers, "authorization"), Some("Basic bWVyY2hhbnQ6c2VjcmV0"));
        assert_eq!(header(&headers, "bluesnap-version"), Some("3.0"));
        assert!(headers.get(CLIENT_ID_HEADER).is_none());
    }

    #[test]
    fn version_header_absent_when_not_configured() {
        let config = airwallex();
        let headers = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Standard, &RequestOptions::default())
            .expect("headers");
        assert!(headers.get("airwallex-version").is_none());
    }

    #[test]
    fn on_behalf_of_file_and_extra_headers() {
        let config = airwallex();
        let options = RequestOptions::default()
            .on_behalf_of("acct_42")
            .file(true)
            .header("x-pan", "4111111111111111");
        let headers = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Standard, &options)
            .expect("headers");

        assert_eq!(header(&headers, ON_BEHALF_OF_HEADER), Some("acct_42"));
        assert_eq!(header(&headers, "content-type"), Some("multipart/form-data"));
        assert_eq!(header(&headers, "x-pan"), Some("4111111111111111"));
    }

    #[test]
    fn extra_headers_are_hidden_from_debug_output() {
        let config = airwallex();
        let options = RequestOptions::default().header("x-pan", "4111111111111111");
        let headers = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Standard, &options)
            .expect("headers");

        assert!(headers.get("x-pan").is_some_and(HeaderValue::is_sensitive));
        assert!(headers.get(header::AUTHORIZATION).is_some_and(HeaderValue::is_sensitive));
        assert!(!format!("{headers:?}").contains("4111111111111111"));
    }

    #[test]
    fn invalid_extra_header_name_is_rejected() {
        let config = airwallex();
        let options = RequestOptions::default().header("bad header", "value");
        let error = AuthStrategy::new(&config)
            .apply_headers(AuthRole::Standard, &options)
            .expect_err("space in header name");
        assert!(matches!(error, GatewayError::InvalidHeader { ref name, .. } if name == "bad header"));
    }
}
