//! BlueSnap resources: absolute `/services/2/...` paths under the server,
//! Basic authentication and camelCase (or legacy PascalCase) payloads.

mod report;
mod transaction;
mod vaulted_shopper;

pub use report::{Report, ReportPage};
pub use transaction::{CardTransactionType, Transaction};
pub use vaulted_shopper::{ShopperLookup, VaultedShopper};
