//! Key-case transcoding between wire payloads and host mappings.
//!
//! Host mappings always use snake_case keys. The wire side depends on the
//! provider: Airwallex speaks snake_case, BlueSnap camelCase, and the legacy
//! BlueSnap payloads PascalCase. Every transcoder rewrites keys recursively
//! through nested objects and arrays and leaves scalar values untouched.

use once_cell::sync::Lazy;
use paygate_types::WireCase;
use regex::Regex;
use serde_json::{Map, Value};

static ACRONYM_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("static regex"));
static WORD_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("static regex"));

/// Convert a wire key to snake_case.
///
/// Acronym runs are split before a following capitalized word, hyphens
/// become underscores and the result is lower-cased.
///
/// ```rust
/// use paygate_util::key_case::to_snake_key;
///
/// assert_eq!(to_snake_key("AccountID"), "account_id");
/// assert_eq!(to_snake_key("HTTPServer"), "http_server");
/// assert_eq!(to_snake_key("next-page-token"), "next_page_token");
/// ```
pub fn to_snake_key(key: &str) -> String {
    let split = ACRONYM_BOUNDARY.replace_all(key, "${1}_${2}");
    let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");
    split.replace('-', "_").to_lowercase()
}

/// Strategy for translating payload keys of one provider.
pub trait KeyCaseTranscoder: Send + Sync {
    /// Wire form of a single host (snake_case) key.
    fn wire_key(&self, host_key: &str) -> String;

    /// Host form of a single wire key.
    fn host_key(&self, wire_key: &str) -> String {
        to_snake_key(wire_key)
    }

    fn to_wire_case(&self, value: Value) -> Value {
        rewrite_keys(value, &|key| self.wire_key(key))
    }

    fn to_host_case(&self, value: Value) -> Value {
        rewrite_keys(value, &|key| self.host_key(key))
    }
}

/// Wire keys are snake_case, like host keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseKeys;

/// Wire keys are camelCase with a lower-case first character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseKeys;

/// Wire keys are PascalCase.
#[derive(Debug, Clone, Copy, Default)]
pub struct PascalCaseKeys;

impl KeyCaseTranscoder for SnakeCaseKeys {
    fn wire_key(&self, host_key: &str) -> String {
        to_snake_key(host_key)
    }
}

impl KeyCaseTranscoder for CamelCaseKeys {
    fn wire_key(&self, host_key: &str) -> String {
        camelize(host_key, false)
    }
}

impl KeyCaseTranscoder for PascalCaseKeys {
    fn wire_key(&self, host_key: &str) -> String {
        camelize(host_key, true)
    }
}

/// Join `_`-separated words, capitalizing the first character of each.
///
/// Only an underscore between two alphanumeric characters is a separator;
/// every other character, including leading or doubled underscores, is kept
/// as written. The first character is upper-cased for PascalCase and
/// lower-cased otherwise.
fn camelize(host_key: &str, upper_first: bool) -> String {
    let chars = host_key.chars().collect::<Vec<char>>();
    let mut camelized = String::with_capacity(host_key.len());
    let mut capitalize_next = false;

    for (index, &ch) in chars.iter().enumerate() {
        let joins_words = ch == '_'
            && index > 0
            && chars[index - 1].is_alphanumeric()
            && chars.get(index + 1).is_some_and(|next| next.is_alphanumeric());
        if joins_words {
            capitalize_next = true;
            continue;
        }

        if index == 0 {
            if upper_first {
                camelized.extend(ch.to_uppercase());
            } else {
                camelized.extend(ch.to_lowercase());
            }
        } else if capitalize_next {
            camelized.extend(ch.to_uppercase());
        } else {
            camelized.push(ch);
        }
        capitalize_next = false;
    }
    camelized
}

static SNAKE: SnakeCaseKeys = SnakeCaseKeys;
static CAMEL: CamelCaseKeys = CamelCaseKeys;
static PASCAL: PascalCaseKeys = PascalCaseKeys;

/// Transcoder instance for a provider's wire convention.
pub fn transcoder_for(case: WireCase) -> &'static dyn KeyCaseTranscoder {
    match case {
        WireCase::Snake => &SNAKE,
        WireCase::LowerCamel => &CAMEL,
        WireCase::Pascal => &PASCAL,
    }
}

fn rewrite_keys(value: Value, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, nested)| (rename(&key), rewrite_keys(nested, rename)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(|item| rewrite_keys(item, rename)).collect()),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camel_case_lowers_first_character_at_every_depth() {
        let wire = CamelCaseKeys.to_wire_case(json!({"account_id": 1, "nested": {"first_name": "x"}}));
        assert_eq!(wire, json!({"accountId": 1, "nested": {"firstName": "x"}}));
    }

    #[test]
    fn pascal_case_capitalizes_first_character() {
        let wire = PascalCaseKeys.to_wire_case(json!({"vaulted_shopper_id": 7, "three_d_secure": {"eci": "05"}}));
        assert_eq!(wire, json!({"VaultedShopperId": 7, "ThreeDSecure": {"Eci": "05"}}));
    }

    #[test]
    fn camelizing_only_consumes_underscores_between_words() {
        let camel = |key: &str| CamelCaseKeys.wire_key(key);
        assert_eq!(camel("sku-42"), "sku-42");
        assert_eq!(camel("order.ref"), "order.ref");
        assert_eq!(camel("_private"), "_private");
        assert_eq!(camel("a__b"), "a__b");
        assert_eq!(camel("trailing_"), "trailing_");
        assert_eq!(camel("Order ID"), "order ID");

        let pascal = |key: &str| PascalCaseKeys.wire_key(key);
        assert_eq!(pascal("a__b"), "A__b");
        assert_eq!(pascal("order.ref"), "Order.ref");
        assert_eq!(pascal("merchant_order_id"), "MerchantOrderId");
    }

    #[test]
    fn free_form_nested_keys_keep_their_punctuation() {
        let wire = CamelCaseKeys.to_wire_case(json!({"metadata": {"Order ID": 1, "sku-42": 2, "gift_wrap": true}}));
        assert_eq!(wire, json!({"metadata": {"order ID": 1, "sku-42": 2, "giftWrap": true}}));
    }

    #[test]
    fn doubled_underscores_survive_a_pascal_round_trip() {
        let restored = PascalCaseKeys.to_host_case(PascalCaseKeys.to_wire_case(json!({"a__b": 1, "_private": 2})));
        assert_eq!(restored, json!({"a__b": 1, "_private": 2}));
    }

    #[test]
    fn host_case_splits_acronyms_before_capitalized_words() {
        assert_eq!(CamelCaseKeys.to_host_case(json!({"AccountID": 1})), json!({"account_id": 1}));
        assert_eq!(to_snake_key("vaultedShopperId"), "vaulted_shopper_id");
        assert_eq!(to_snake_key("level3Data"), "level3_data");
        assert_eq!(to_snake_key("already_snake"), "already_snake");
    }

    #[test]
    fn transcoding_recurses_into_sequences_of_mappings() {
        let host = CamelCaseKeys.to_host_case(json!({
            "paymentSources": {"creditCardInfo": [{"billingContactInfo": {"firstName": "Ada"}}, "literalString"]}
        }));
        assert_eq!(
            host,
            json!({"payment_sources": {"credit_card_info": [{"billing_contact_info": {"first_name": "Ada"}}, "literalString"]}})
        );
    }

    #[test]
    fn values_and_non_mappings_pass_through() {
        assert_eq!(CamelCaseKeys.to_wire_case(json!("plain_string")), json!("plain_string"));
        assert_eq!(CamelCaseKeys.to_wire_case(json!(42)), json!(42));
        assert_eq!(CamelCaseKeys.to_host_case(Value::Null), Value::Null);
        assert_eq!(CamelCaseKeys.to_wire_case(json!({})), json!({}));
        assert_eq!(
            CamelCaseKeys.to_wire_case(json!({"merchant_order_id": null, "card_brand": "VISA_CARD"})),
            json!({"merchantOrderId": null, "cardBrand": "VISA_CARD"})
        );
    }

    #[test]
    fn snake_case_keys_round_trip_through_camel_case() {
        let original = json!({
            "merchant_order_id": "order-1",
            "payment_method_options": {"card": {"auto_capture": true}},
            "funds_split_data": [{"amount": 10, "destination": "acct"}]
        });
        let restored = CamelCaseKeys.to_host_case(CamelCaseKeys.to_wire_case(original.clone()));
        assert_eq!(restored, original);
    }

    #[test]
    fn snake_wire_case_normalizes_mixed_input_keys() {
        assert_eq!(SnakeCaseKeys.to_wire_case(json!({"requestId": "r-1"})), json!({"request_id": "r-1"}));
    }

    #[test]
    fn providers_select_their_own_transcoder() {
        let body = json!({"first_name": "Ada"});
        assert_eq!(transcoder_for(WireCase::Snake).to_wire_case(body.clone()), json!({"first_name": "Ada"}));
        assert_eq!(transcoder_for(WireCase::LowerCamel).to_wire_case(body.clone()), json!({"firstName": "Ada"}));
        assert_eq!(transcoder_for(WireCase::Pascal).to_wire_case(body), json!({"FirstName": "Ada"}));
    }
}
