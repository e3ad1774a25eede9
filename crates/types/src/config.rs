//! Immutable gateway configuration.
//!
//! A [`Configuration`] is built once by the embedding application, either
//! explicitly through [`ConfigurationBuilder`] or from the environment with
//! [`Configuration::from_env`], and then shared read-only by every call.
//! Replacing credentials means building a new configuration (see
//! [`Configuration::with_access_token`]) before new traffic starts; there is
//! no in-place mutation.

use std::{env, fmt, time::Duration};

use url::Url;

use crate::{ConfigError, Environment, Provider, ProviderFamily, ToProviderInfo};

const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path prefix, relative to [`Configuration::api_url`], of the Airwallex
/// sandbox simulation endpoints.
pub const SIMULATION_PATH: &str = "/simulation";

/// Credential material presented to the provider.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic credentials used by the BlueSnap family.
    Basic { username: String, password: String },
    /// Bearer token and/or client-id + api-key pair used by Airwallex.
    Platform(PlatformCredentials),
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct PlatformCredentials {
    pub access_token: Option<String>,
    pub client_id: Option<String>,
    pub api_key: Option<String>,
}

impl PlatformCredentials {
    fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.client_id.is_none() && self.api_key.is_none()
    }
}

fn redacted(value: &Option<String>) -> &'static str {
    if value.is_some() { "<redacted>" } else { "<unset>" }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Platform(platform) => platform.fmt(f),
        }
    }
}

impl fmt::Debug for PlatformCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformCredentials")
            .field("access_token", &redacted(&self.access_token))
            .field("client_id", &self.client_id)
            .field("api_key", &redacted(&self.api_key))
            .finish()
    }
}

/// Read-only configuration consumed by every request.
///
/// Mutating configuration while calls are in flight is not supported; build
/// a new value and hand it to a new client instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    provider: Provider,
    environment: Environment,
    base_url: String,
    api_version: String,
    provider_version: Option<String>,
    credentials: Credentials,
    timeout: Duration,
    user_agent: String,
}

impl Configuration {
    pub fn builder(provider: Provider) -> ConfigurationBuilder {
        ConfigurationBuilder::new(provider)
    }

    /// Build a configuration from `<PREFIX>_*` environment variables.
    ///
    /// Recognized variables (prefix `AIRWALLEX` or `BLUESNAP`):
    /// - `<PREFIX>_ENVIRONMENT`: `production` or `sandbox`
    /// - `<PREFIX>_API_BASE`: base URL override
    /// - `<PREFIX>_API_VERSION`: API path version (Airwallex)
    /// - `<PREFIX>_PROVIDER_VERSION`: value of the versioning header
    /// - `AIRWALLEX_ACCESS_TOKEN`, `AIRWALLEX_CLIENT_ID`, `AIRWALLEX_API_KEY`
    /// - `BLUESNAP_USERNAME`, `BLUESNAP_PASSWORD`
    pub fn from_env(provider: Provider) -> Result<Self, ConfigError> {
        let prefix = provider.env_prefix();
        let mut builder = Self::builder(provider);

        if let Some(raw) = env_value(prefix, "ENVIRONMENT") {
            let environment = raw.parse::<Environment>().map_err(|_| ConfigError::InvalidEnvValue {
                name: format!("{prefix}_ENVIRONMENT"),
                value: raw.clone(),
            })?;
            builder = builder.environment(environment);
        }
        if let Some(base_url) = env_value(prefix, "API_BASE") {
            builder = builder.base_url(base_url);
        }
        if let Some(api_version) = env_value(prefix, "API_VERSION") {
            builder = builder.api_version(api_version);
        }
        if let Some(provider_version) = env_value(prefix, "PROVIDER_VERSION") {
            builder = builder.provider_version(provider_version);
        }

        match provider.family() {
            ProviderFamily::Airwallex => {
                if let Some(token) = env_value(prefix, "ACCESS_TOKEN") {
                    builder = builder.access_token(token);
                }
                if let Some(client_id) = env_value(prefix, "CLIENT_ID") {
                    builder = builder.client_id(client_id);
                }
                if let Some(api_key) = env_value(prefix, "API_KEY") {
                    builder = builder.api_key(api_key);
                }
            }
            ProviderFamily::Bluesnap => {
                let username = env_value(prefix, "USERNAME");
                let password = env_value(prefix, "PASSWORD");
                if username.is_some() || password.is_some() {
                    builder = builder.basic(username.unwrap_or_default(), password.unwrap_or_default());
                }
            }
        }

        builder.build()
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Server base URL; always begins with `https://`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Versioning header value, present only when configured and non-empty.
    pub fn provider_version(&self) -> Option<&str> {
        self.provider_version.as_deref()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// URL that resource paths are appended to.
    ///
    /// Airwallex versions its API in the path (`<server>/v1`); BlueSnap
    /// resource paths are absolute under the server.
    pub fn api_url(&self) -> String {
        match self.provider.family() {
            ProviderFamily::Airwallex => format!("{}/{}", self.base_url, self.api_version),
            ProviderFamily::Bluesnap => self.base_url.clone(),
        }
    }

    /// Base of the simulation endpoints (`<server>/<version>/simulation`).
    /// Only Airwallex offers them.
    pub fn simulation_api_url(&self) -> Option<String> {
        match self.provider.family() {
            ProviderFamily::Airwallex => Some(format!("{}{SIMULATION_PATH}", self.api_url())),
            ProviderFamily::Bluesnap => None,
        }
    }

    /// Copy of this configuration carrying a freshly issued access token.
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Credentials::Platform(platform) = &mut next.credentials {
            platform.access_token = Some(token.into());
        }
        next
    }
}

fn env_value(prefix: &str, suffix: &str) -> Option<String> {
    env::var(format!("{prefix}_{suffix}"))
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Builder for [`Configuration`].
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    provider: Provider,
    environment: Environment,
    base_url: Option<String>,
    api_version: Option<String>,
    provider_version: Option<String>,
    basic: Option<(String, String)>,
    platform: PlatformCredentials,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ConfigurationBuilder {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            environment: Environment::default(),
            base_url: None,
            api_version: None,
            provider_version: None,
            basic: None,
            platform: PlatformCredentials::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the server URL. A missing scheme is replaced by `https://`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn provider_version(mut self, provider_version: impl Into<String>) -> Self {
        self.provider_version = Some(provider_version.into());
        self
    }

    pub fn basic(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic = Some((username.into(), password.into()));
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.platform.access_token = Some(token.into());
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.platform.client_id = Some(client_id.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.platform.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Configuration, ConfigError> {
        let base_url = match self.base_url {
            Some(raw) => normalize_base_url(&raw)?,
            None => self.provider.default_base_url(self.environment).to_string(),
        };

        let credentials = match self.provider.family() {
            ProviderFamily::Airwallex => {
                if self.basic.is_some() {
                    return Err(ConfigError::CredentialMismatch {
                        provider: self.provider,
                        supplied: "basic",
                    });
                }
                Credentials::Platform(self.platform)
            }
            ProviderFamily::Bluesnap => {
                if !self.platform.is_empty() {
                    return Err(ConfigError::CredentialMismatch {
                        provider: self.provider,
                        supplied: "platform",
                    });
                }
                let (username, password) = self.basic.unwrap_or_default();
                Credentials::Basic { username, password }
            }
        };

        Ok(Configuration {
            provider: self.provider,
            environment: self.environment,
            base_url,
            api_version: self
                .api_version
                .filter(|version| !version.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            provider_version: self.provider_version.filter(|version| !version.trim().is_empty()),
            credentials,
            timeout: self.timeout,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("paygate/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS)),
        })
    }
}

/// Normalize a caller-supplied base URL so it always uses `https://`.
///
/// - surrounding whitespace and trailing slashes are removed
/// - a missing scheme is replaced by `https://`
/// - `http://` is rewritten to `https://`
/// - the result must parse and carry a host
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let lowered = trimmed.to_ascii_lowercase();
    let rest = if lowered.starts_with("https://") {
        &trimmed["https://".len()..]
    } else if lowered.starts_with("http://") {
        &trimmed["http://".len()..]
    } else if trimmed.contains("://") {
        return Err(ConfigError::invalid_base_url(raw, "only https is supported"));
    } else {
        trimmed
    };

    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        return Err(ConfigError::invalid_base_url(raw, "URL must include a host"));
    }
    let normalized = format!("https://{rest}");

    let parsed = Url::parse(&normalized).map_err(|error| ConfigError::invalid_base_url(raw, error))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::invalid_base_url(raw, "URL must include a host"));
    }

    Ok(normalized)
}
