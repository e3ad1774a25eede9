//! Request pipeline for paygate: body filtering, key-case transcoding,
//! response parsing and the request executor.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub mod body_filter;
pub mod http;
pub mod key_case;

pub use body_filter::{filter_for_request, filter_request_body};
pub use http::{ErrorTranslator, RequestExecutor, build_query_pairs, parse_response_json_strict};
pub use key_case::{KeyCaseTranscoder, transcoder_for};

static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization:\s*(?:basic|bearer)?\s*)([\w\-\.=:/+]+)",
        r"(?i)([A-Z0-9_]*?(?:KEY|TOKEN|SECRET|PASSWORD)=)([^\s]+)",
        r#"(?i)("(?:access_token|accessToken|token|client_secret|api_key|apiKey|password)"\s*:\s*")([^"]+)"#,
        r#"(?i)("(?:card_number|cardNumber|CardNumber|security_code|securityCode)"\s*:\s*")([^"]+)"#,
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("static regex"))
    .collect()
});

/// Redacts values that look like secrets in a string.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in SECRET_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |caps: &Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}<redacted>")
            })
            .into_owned();
    }
    redacted
}
