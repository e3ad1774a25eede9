use paygate_api::Method;
use paygate_types::{AttributeRegistry, GatewayError, ProviderFamily, RequestOptions, ResourceDescriptor, TypedResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{RequestExecutor, Resource, decode, expect_raw, with_query};

const NEXT_PAGE_TOKEN_HEADER: &str = "next-page-token";
const START_ROW_HEADER: &str = "start-row";
const TOTAL_ROW_COUNT_HEADER: &str = "total-row-count";

const ATTRIBUTES: AttributeRegistry = AttributeRegistry::new("report", "title", &["data", "title", "params", "date_range"]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub data: Option<Value>,
    pub title: Option<String>,
    pub params: Option<Value>,
    pub date_range: Option<Value>,
}

/// A report plus the pagination metadata BlueSnap sends as headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub report: Report,
    pub next_page_token: Option<String>,
    pub start_row: Option<u64>,
    pub total_row_count: Option<u64>,
}

impl Resource for Report {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ProviderFamily::Bluesnap, ATTRIBUTES);
    const ENDPOINT: &'static str = "/services/2/report";
}

impl Report {
    /// Fetch report `code`, e.g. `PayoutDetail` or `TransactionDetail`.
    ///
    /// `params` are sent as query pairs with their keys unchanged, so they
    /// use BlueSnap's names (`period`, `from_date`, `pageSize`, ...).
    pub async fn fetch(
        executor: &RequestExecutor,
        code: &str,
        params: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<ReportPage, GatewayError> {
        let options = with_query(options, params).raw_response(true);
        let response = executor
            .send(&Self::DESCRIPTOR, Method::GET, &Self::path(code), Map::new(), &options)
            .await?;
        let raw = expect_raw(ATTRIBUTES.resource(), response)?;

        let next_page_token = raw.header(NEXT_PAGE_TOKEN_HEADER).map(str::to_string);
        let start_row = numeric_header(raw.header(START_ROW_HEADER));
        let total_row_count = numeric_header(raw.header(TOTAL_ROW_COUNT_HEADER));
        debug!(code, has_next_page = next_page_token.is_some(), total_row_count, "report page received");

        let report = match executor.interpret(raw)? {
            TypedResponse::Raw(_) => Report::default(),
            parsed => decode(parsed)?,
        };
        Ok(ReportPage {
            report,
            next_page_token,
            start_row,
            total_row_count,
        })
    }

    pub async fn account_balance(
        executor: &RequestExecutor,
        params: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<ReportPage, GatewayError> {
        Self::fetch(executor, "AccountBalance", params, options).await
    }
}

fn numeric_header(value: Option<&str>) -> Option<u64> {
    value.and_then(|value| value.trim().parse().ok())
}
