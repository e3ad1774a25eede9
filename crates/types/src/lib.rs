//! Shared types for the paygate workspace.
//!
//! Everything in this crate is plain data: provider identities, the
//! immutable [`Configuration`], per-call [`RequestOptions`], the attribute
//! registry each resource declares, response containers and the error
//! taxonomy surfaced by every call.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub mod config;
pub mod errors;
pub mod options;
pub mod registry;
pub mod response;

pub use config::{Configuration, ConfigurationBuilder, Credentials, PlatformCredentials, SIMULATION_PATH};
pub use errors::{ConfigError, GatewayError, RemoteError};
pub use options::RequestOptions;
pub use registry::{AttributeRegistry, AuthRole, FieldSet, ResourceDescriptor};
pub use response::{RawResponse, TypedResponse};

/// Remote payment gateway a [`Configuration`] talks to.
///
/// Each variant is a distinct request pipeline: authentication scheme, key
/// casing on the wire and error payload shapes all differ, so variants are
/// never interchangeable.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    #[default]
    Airwallex,
    Bluesnap,
    /// Earlier BlueSnap payload convention: PascalCase keys and a
    /// `{"response": ...}` envelope around successful payloads.
    BluesnapLegacy,
}

/// Group of providers sharing one set of resources.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ProviderFamily {
    Airwallex,
    Bluesnap,
}

/// Key naming convention used in payloads exchanged with a provider.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WireCase {
    Snake,
    /// camelCase with a lower-case first character.
    LowerCamel,
    Pascal,
}

/// Deployment targeted by a configuration.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Sandbox,
}

pub trait ToProviderInfo {
    fn family(&self) -> ProviderFamily;
    fn env_prefix(&self) -> &str;
    fn default_base_url(&self, environment: Environment) -> &str;
    fn version_header(&self) -> &str;
    fn wire_case(&self) -> WireCase;
    /// Whether the `error`/`messages` payload shape is recognized in
    /// addition to the `message` shapes.
    fn recognizes_error_envelope(&self) -> bool;
    /// Whether successful payloads arrive wrapped in a `response` field.
    fn wraps_success_payload(&self) -> bool;
}

impl ToProviderInfo for Provider {
    fn family(&self) -> ProviderFamily {
        match self {
            Self::Airwallex => ProviderFamily::Airwallex,
            Self::Bluesnap | Self::BluesnapLegacy => ProviderFamily::Bluesnap,
        }
    }

    fn env_prefix(&self) -> &str {
        match self {
            Self::Airwallex => "AIRWALLEX",
            Self::Bluesnap | Self::BluesnapLegacy => "BLUESNAP",
        }
    }

    fn default_base_url(&self, environment: Environment) -> &str {
        match (self, environment) {
            (Self::Airwallex, Environment::Production) => "https://api.airwallex.com/api",
            (Self::Airwallex, Environment::Sandbox) => "https://api-demo.airwallex.com/api",
            (Self::Bluesnap | Self::BluesnapLegacy, Environment::Production) => "https://ws.bluesnap.com",
            (Self::Bluesnap | Self::BluesnapLegacy, Environment::Sandbox) => "https://sandbox.bluesnap.com",
        }
    }

    fn version_header(&self) -> &str {
        match self {
            Self::Airwallex => "airwallex-version",
            Self::Bluesnap | Self::BluesnapLegacy => "bluesnap-version",
        }
    }

    fn wire_case(&self) -> WireCase {
        match self {
            Self::Airwallex => WireCase::Snake,
            Self::Bluesnap => WireCase::LowerCamel,
            Self::BluesnapLegacy => WireCase::Pascal,
        }
    }

    fn recognizes_error_envelope(&self) -> bool {
        matches!(self, Self::Bluesnap | Self::BluesnapLegacy)
    }

    fn wraps_success_payload(&self) -> bool {
        matches!(self, Self::BluesnapLegacy)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Airwallex => "airwallex",
            Self::Bluesnap => "bluesnap",
            Self::BluesnapLegacy => "bluesnap-legacy",
        })
    }
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Airwallex => "airwallex",
            Self::Bluesnap => "bluesnap",
        })
    }
}

impl FromStr for Provider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "airwallex" => Ok(Self::Airwallex),
            "bluesnap" => Ok(Self::Bluesnap),
            "bluesnap-legacy" | "bluesnap_legacy" => Ok(Self::BluesnapLegacy),
            _ => Err(ParseProviderError),
        }
    }
}

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" | "demo" => Ok(Self::Sandbox),
            _ => Err(ParseEnvironmentError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseProviderError;

impl fmt::Display for ParseProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid provider; expected 'airwallex', 'bluesnap' or 'bluesnap-legacy'")
    }
}

impl Error for ParseProviderError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEnvironmentError;

impl fmt::Display for ParseEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid environment; expected 'production' or 'sandbox'")
    }
}

impl Error for ParseEnvironmentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_parse_from_kebab_names() {
        assert_eq!("airwallex".parse::<Provider>(), Ok(Provider::Airwallex));
        assert_eq!(" Bluesnap ".parse::<Provider>(), Ok(Provider::Bluesnap));
        assert_eq!("bluesnap-legacy".parse::<Provider>(), Ok(Provider::BluesnapLegacy));
        assert!("stripe".parse::<Provider>().is_err());
    }

    #[test]
    fn provider_variants_map_to_distinct_wire_cases() {
        assert_eq!(Provider::Airwallex.wire_case(), WireCase::Snake);
        assert_eq!(Provider::Bluesnap.wire_case(), WireCase::LowerCamel);
        assert_eq!(Provider::BluesnapLegacy.wire_case(), WireCase::Pascal);
        assert_eq!(Provider::BluesnapLegacy.family(), Provider::Bluesnap.family());
    }

    #[test]
    fn default_servers_are_https() {
        for provider in [Provider::Airwallex, Provider::Bluesnap, Provider::BluesnapLegacy] {
            for environment in [Environment::Production, Environment::Sandbox] {
                assert!(provider.default_base_url(environment).starts_with("https://"));
            }
        }
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("SANDBOX".parse::<Environment>(), Ok(Environment::Sandbox));
        assert!("staging".parse::<Environment>().is_err());
    }
}
