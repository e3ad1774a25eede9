//! Whitelisting of outbound request bodies.
//!
//! Only top-level keys are compared against the allowed set; nested values
//! are forwarded as they are. Filtering never changes key case.

use paygate_types::{AttributeRegistry, FieldSet};
use serde_json::{Map, Value};

/// Keep the entries of `body` whose top-level key is in `allowed`.
pub fn filter_request_body(allowed: &FieldSet, body: &Map<String, Value>) -> Map<String, Value> {
    body.iter()
        .filter(|(key, _)| allowed.contains(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Filter `body` down to the writable attributes of a resource, i.e. every
/// declared field except the server-assigned identifier.
pub fn filter_for_request(registry: &AttributeRegistry, body: &Map<String, Value>) -> Map<String, Value> {
    filter_request_body(&registry.writable(), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TRANSFERS: AttributeRegistry = AttributeRegistry::new("transfer", "id", &["id", "amount", "beneficiary"]);

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn unknown_top_level_keys_are_dropped() {
        let allowed = FieldSet::from_iter(["id", "amount"]);
        let filtered = filter_request_body(&allowed, &object(json!({"id": "x", "amount": 5, "extra": "drop-me"})));
        assert_eq!(Value::Object(filtered), json!({"id": "x", "amount": 5}));
    }

    #[test]
    fn nested_values_are_not_filtered() {
        let body = object(json!({"amount": 5, "beneficiary": {"bank_details": {"swift_code": "X"}, "unlisted": true}}));
        let filtered = filter_for_request(&TRANSFERS, &body);
        assert_eq!(filtered["beneficiary"], json!({"bank_details": {"swift_code": "X"}, "unlisted": true}));
    }

    #[test]
    fn identifier_is_never_forwarded_for_writes() {
        let filtered = filter_for_request(&TRANSFERS, &object(json!({"id": "tfr_1", "amount": 10})));
        assert_eq!(Value::Object(filtered), json!({"amount": 10}));
    }

    #[test]
    fn matching_is_case_sensitive_and_does_not_transcode() {
        let allowed = FieldSet::from_iter(["merchant_order_id"]);
        let filtered = filter_request_body(&allowed, &object(json!({"merchantOrderId": "o-1", "merchant_order_id": "o-2"})));
        assert_eq!(Value::Object(filtered), json!({"merchant_order_id": "o-2"}));
    }
}
