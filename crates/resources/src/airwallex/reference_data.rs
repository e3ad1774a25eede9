use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::{RequestExecutor, Resource, decode_list};

const PAN_HEADER: &str = "x-pan";

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new(
    "reference_data",
    "id",
    &[
        "id",
        "card_brand",
        "card_type",
        "commercial_card",
        "issuer_country_code",
        "issuer_name",
        "product_code",
        "product_description",
        "product_subtype_code",
        "product_subtype_description",
    ],
);

/// Card BIN information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    pub id: Option<String>,
    pub card_brand: Option<String>,
    pub card_type: Option<String>,
    pub commercial_card: Option<bool>,
    pub issuer_country_code: Option<String>,
    pub issuer_name: Option<String>,
    pub product_code: Option<String>,
    pub product_description: Option<String>,
    pub product_subtype_code: Option<String>,
    pub product_subtype_description: Option<String>,
}

impl Resource for ReferenceData {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Airwallex, ATTRIBUTES);
    const ENDPOINT: &'static str = "/pa/reference/bin/lookup";
}

impl ReferenceData {
    /// Look up the BIN of `pan`, sent in the `x-pan` header.
    pub async fn lookup_bin(executor: &RequestExecutor, pan: &str, options: &RequestOptions) -> Result<Vec<Self>, GatewayError> {
        let options = options.clone().header(PAN_HEADER, pan);
        let response = executor
            .send(&Self::DESCRIPTOR, Method::GET, Self::ENDPOINT, Map::new(), &options)
            .await?;
        decode_list(response)
    }
}
