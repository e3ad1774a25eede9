//! Airwallex resources: snake_case payloads under `<server>/<version>`.
//!
//! Collections answer `{"items": [...]}`; list calls take their filters as a
//! parameter map that is turned into query pairs.

mod account;
mod global_account;
mod payment_intent;
mod reference_data;
mod refund;
mod token;
mod transfer;
mod webhook;

pub use account::Account;
pub use global_account::GlobalAccount;
pub use payment_intent::PaymentIntent;
pub use reference_data::ReferenceData;
pub use refund::Refund;
pub use token::Token;
pub use transfer::Transfer;
pub use webhook::Webhook;
