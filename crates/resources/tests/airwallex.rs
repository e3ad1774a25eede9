use std::sync::Arc;

use paygate_api::{GatewayClient, PreparedRequest, ReplayTransport, RequestBody};
use paygate_resources::{
    RequestExecutor,
    airwallex::{Account, GlobalAccount, PaymentIntent, ReferenceData, Refund, Token, Transfer, Webhook},
};
use paygate_types::{Configuration, GatewayError, Provider, RawResponse, RequestOptions};
use serde_json::{Map, Value, json};

fn executor(token: Option<&str>, responses: Vec<RawResponse>) -> (RequestExecutor, Arc<ReplayTransport>) {
    let mut builder = Configuration::builder(Provider::Airwallex).client_id("cid").api_key("key");
    if let Some(token) = token {
        builder = builder.access_token(token);
    }
    let config = builder.build().expect("config");
    let transport = Arc::new(ReplayTransport::new(responses));
    let client = GatewayClient::with_transport(config, transport.clone());
    (RequestExecutor::new(client), transport)
}

fn ok(value: Value) -> RawResponse {
    RawResponse::new(200, value.to_string())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be an object"),
    }
}

fn header(request: &PreparedRequest, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn json_body(request: &PreparedRequest) -> Value {
    match &request.body {
        RequestBody::Json(value) => value.clone(),
        other => panic!("expected JSON body, got {other:?}"),
    }
}

#[tokio::test]
async fn token_authorization_switches_later_calls_to_bearer() {
    let (executor, transport) = executor(
        None,
        vec![
            ok(json!({"token": "tok-1", "expires_at": "2024-01-01T00:30:00+0000"})),
            ok(json!({"id": "int_1", "amount": 10.5, "currency": "USD", "status": "REQUIRES_PAYMENT_METHOD"})),
        ],
    );

    let authorized = Token::authorize(&executor).await.expect("token");
    let intent = PaymentIntent::find(&authorized, "int_1", &RequestOptions::default())
        .await
        .expect("intent");

    assert_eq!(intent.amount, Some(10.5));
    assert_eq!(intent.status.as_deref(), Some("REQUIRES_PAYMENT_METHOD"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.path(), "/api/v1/authentication/login");
    assert_eq!(header(&requests[0], "x-client-id").as_deref(), Some("cid"));
    assert_eq!(header(&requests[0], "x-api-key").as_deref(), Some("key"));
    assert!(header(&requests[0], "authorization").is_none());
    assert_eq!(header(&requests[1], "authorization").as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn login_without_token_is_an_unexpected_payload() {
    let (executor, _) = executor(None, vec![ok(json!({"expires_at": "2024-01-01T00:30:00+0000"}))]);
    let error = Token::authorize(&executor).await.unwrap_err();
    assert!(matches!(error, GatewayError::UnexpectedPayload { .. }));
}

#[tokio::test]
async fn create_drops_identifier_and_undeclared_fields() {
    let (executor, transport) = executor(Some("tok"), vec![ok(json!({"id": "int_2", "merchant_order_id": "o-1"}))]);
    let body = object(json!({
        "id": "client-chosen",
        "amount": 10,
        "currency": "USD",
        "merchant_order_id": "o-1",
        "request_id": "r-1",
        "bogus": true
    }));

    let intent = PaymentIntent::create(&executor, body, &RequestOptions::default())
        .await
        .expect("intent");
    assert_eq!(intent.id.as_deref(), Some("int_2"));

    let request = transport.last_request().expect("request");
    assert_eq!(request.url.path(), "/api/v1/pa/payment_intents/create");
    assert_eq!(
        json_body(&request),
        json!({"amount": 10, "currency": "USD", "merchant_order_id": "o-1", "request_id": "r-1"})
    );
}

#[tokio::test]
async fn actions_forward_their_body_unfiltered() {
    let (executor, transport) = executor(Some("tok"), vec![ok(json!({"id": "int_1", "status": "SUCCEEDED"}))]);
    let body = object(json!({"request_id": "r-2", "payment_method": {"type": "card", "card": {"number": "4111111111111111"}}}));

    PaymentIntent::confirm(&executor, "int_1", body.clone(), &RequestOptions::default())
        .await
        .expect("intent");

    let request = transport.last_request().expect("request");
    assert_eq!(request.url.path(), "/api/v1/pa/payment_intents/int_1/confirm");
    assert_eq!(json_body(&request), Value::Object(body));
}

#[tokio::test]
async fn all_sends_filters_and_reads_items() {
    let (executor, transport) = executor(
        Some("tok"),
        vec![ok(json!({"has_more": false, "items": [{"id": "rfd_1", "amount": 5}, {"id": "rfd_2"}]}))],
    );
    let params = object(json!({"status": "SUCCEEDED", "page_size": 20}));

    let refunds = Refund::all(&executor, params, &RequestOptions::default()).await.expect("refunds");
    assert_eq!(refunds.len(), 2);
    assert_eq!(refunds[0].amount, Some(5.0));

    let request = transport.last_request().expect("request");
    let query = request.url.query().unwrap_or_default().to_string();
    assert!(query.contains("status=SUCCEEDED"));
    assert!(query.contains("page_size=20"));
}

#[tokio::test]
async fn collections_without_items_are_empty() {
    let (executor, _) = executor(Some("tok"), vec![ok(json!({"has_more": false}))]);
    let webhooks = Webhook::all(&executor, Map::new(), &RequestOptions::default())
        .await
        .expect("webhooks");
    assert!(webhooks.is_empty());
}

#[tokio::test]
async fn webhook_state_changes_report_status_200() {
    let (executor, transport) = executor(Some("tok"), vec![RawResponse::new(200, ""), RawResponse::new(204, "")]);

    assert!(Webhook::delete(&executor, "wh_1", &RequestOptions::default()).await.expect("delete"));
    assert!(!Webhook::disconnect(&executor, "wh_1", &RequestOptions::default()).await.expect("disconnect"));

    let requests = transport.requests();
    assert_eq!(requests[0].url.path(), "/api/v1/webhooks/wh_1/delete");
    assert_eq!(requests[1].url.path(), "/api/v1/webhooks/wh_1/disconnect");
    assert_eq!(requests[0].body, RequestBody::Empty);
}

#[tokio::test]
async fn account_updates_use_put() {
    let (executor, transport) = executor(Some("tok"), vec![ok(json!({"id": "acct_1", "nickname": "Shop"}))]);
    let account = Account::update(&executor, "acct_1", object(json!({"nickname": "Shop", "id": "acct_1"})), &RequestOptions::default())
        .await
        .expect("account");
    assert_eq!(account.nickname.as_deref(), Some("Shop"));

    let request = transport.last_request().expect("request");
    assert_eq!(request.method.as_str(), "PUT");
    assert_eq!(request.url.path(), "/api/v1/accounts/acct_1/update");
    assert_eq!(json_body(&request), json!({"nickname": "Shop"}));
}

#[tokio::test]
async fn bin_lookup_sends_pan_header_and_reads_a_list() {
    let (executor, transport) = executor(
        Some("tok"),
        vec![ok(json!([{"card_brand": "visa", "card_type": "CREDIT", "issuer_country_code": "US"}]))],
    );

    let results = ReferenceData::lookup_bin(&executor, "411111", &RequestOptions::default())
        .await
        .expect("bin lookup");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].card_brand.as_deref(), Some("visa"));

    let request = transport.last_request().expect("request");
    assert_eq!(request.url.path(), "/api/v1/pa/reference/bin/lookup");
    assert_eq!(header(&request, "x-pan").as_deref(), Some("411111"));
    assert!(!format!("{request:?}").contains("411111"));
}

#[tokio::test]
async fn statement_letters_are_multipart_and_raw() {
    let (executor, transport) = executor(
        Some("tok"),
        vec![RawResponse::new(200, "%PDF-1.4").with_header("Content-Type", "application/pdf")],
    );

    let letter = GlobalAccount::generate_statement_letter(&executor, "ga_1", object(json!({"currency": "USD"})), &RequestOptions::default())
        .await
        .expect("letter");
    assert_eq!(letter.header("content-type"), Some("application/pdf"));
    assert_eq!(letter.body, b"%PDF-1.4".to_vec());

    let request = transport.last_request().expect("request");
    assert_eq!(header(&request, "content-type").as_deref(), Some("multipart/form-data"));
    assert_eq!(request.body, RequestBody::Multipart(object(json!({"currency": "USD"}))));
}

#[tokio::test]
async fn on_behalf_of_is_forwarded_as_a_header() {
    let (executor, transport) = executor(Some("tok"), vec![ok(json!({"id": "ga_1", "status": "ACTIVE"}))]);
    let options = RequestOptions::default().on_behalf_of("acct_connected");

    let account = GlobalAccount::find(&executor, "ga_1", &options).await.expect("global account");
    assert_eq!(account.status.as_deref(), Some("ACTIVE"));
    let request = transport.last_request().expect("request");
    assert_eq!(header(&request, "x-on-behalf-of").as_deref(), Some("acct_connected"));
}

#[tokio::test]
async fn provider_messages_become_remote_errors() {
    let (executor, _) = executor(
        Some("tok"),
        vec![RawResponse::new(400, json!({"code": "validation_error", "message": "amount must be positive"}).to_string())],
    );

    let error = Refund::create(&executor, object(json!({"amount": -1})), &RequestOptions::default())
        .await
        .unwrap_err();
    let remote = error.as_remote().expect("remote error");
    assert_eq!(remote.description(), "amount must be positive");
    assert_eq!(remote.body()["code"], json!("validation_error"));
}

#[tokio::test]
async fn transfer_create_sends_only_writable_fields() {
    let (executor, transport) = executor(
        Some("tok"),
        vec![ok(json!({"id": "tfr_1", "status": "SCHEDULED", "transfer_amount": 100, "transfer_currency": "AUD"}))],
    );
    let body = object(json!({
        "id": "client-chosen",
        "beneficiary_id": "ben_1",
        "reason": "travel",
        "reference": "inv-7",
        "request_id": "r-9",
        "transfer_amount": 100,
        "transfer_currency": "AUD",
        "transfer_method": "LOCAL",
        "unknown": "dropped"
    }));

    let transfer = Transfer::create(&executor, body, &RequestOptions::default())
        .await
        .expect("transfer");
    assert_eq!(transfer.id.as_deref(), Some("tfr_1"));
    assert_eq!(transfer.transfer_amount, Some(100.0));

    let request = transport.last_request().expect("request");
    assert_eq!(request.url.path(), "/api/v1/transfers/create");
    let sent = json_body(&request);
    assert!(sent.get("id").is_none());
    assert!(sent.get("unknown").is_none());
    assert_eq!(sent["beneficiary_id"], json!("ben_1"));
}

#[tokio::test]
async fn transfer_cancel_and_validate_report_status_200() {
    let (executor, transport) = executor(Some("tok"), vec![RawResponse::new(200, ""), RawResponse::new(400, "")]);

    assert!(Transfer::cancel(&executor, "tfr_1", &RequestOptions::default()).await.expect("cancel"));
    let body = object(json!({"reason": "travel", "not_a_transfer_field": 1}));
    assert!(!Transfer::validate(&executor, body.clone(), &RequestOptions::default()).await.expect("validate"));

    let requests = transport.requests();
    assert_eq!(requests[0].url.path(), "/api/v1/transfers/tfr_1/cancel");
    assert_eq!(requests[0].body, RequestBody::Empty);
    assert_eq!(requests[1].url.path(), "/api/v1/transfers/validate");
    assert_eq!(json_body(&requests[1]), Value::Object(body));
}

#[tokio::test]
async fn transfer_funding_and_listing() {
    let (executor, transport) = executor(
        Some("tok"),
        vec![
            ok(json!({"id": "tfr_1", "status": "PROCESSING"})),
            ok(json!({"items": [{"id": "tfr_1"}, {"id": "tfr_2"}]})),
        ],
    );

    let funded = Transfer::confirm_funding(&executor, "tfr_1", &RequestOptions::default())
        .await
        .expect("confirm funding");
    assert_eq!(funded.status.as_deref(), Some("PROCESSING"));

    let transfers = Transfer::all(&executor, object(json!({"status": "PROCESSING"})), &RequestOptions::default())
        .await
        .expect("transfers");
    assert_eq!(transfers.len(), 2);

    let requests = transport.requests();
    assert_eq!(requests[0].url.path(), "/api/v1/transfers/tfr_1/confirm_funding");
    assert_eq!(requests[1].url.query(), Some("status=PROCESSING"));
}

#[tokio::test]
async fn transfer_transition_goes_through_the_simulation_api() {
    let (executor, transport) = executor(Some("tok"), vec![ok(json!({"id": "tfr_1", "status": "PAID"}))]);

    let transfer = Transfer::transition(&executor, "tfr_1", object(json!({"next_status": "PAID"})), &RequestOptions::default())
        .await
        .expect("transition");
    assert_eq!(transfer.status.as_deref(), Some("PAID"));

    let request = transport.last_request().expect("request");
    let simulation = executor.config().simulation_api_url().expect("airwallex simulation url");
    assert_eq!(request.url.as_str(), format!("{simulation}/transfers/tfr_1/transition"));
    assert_eq!(json_body(&request), json!({"next_status": "PAID"}));
}

#[tokio::test]
async fn global_account_transactions_are_plain_mappings() {
    let (executor, transport) = executor(
        Some("tok"),
        vec![ok(json!({"items": [{"id": "txn_1", "amount": 12.5, "status": "SETTLED"}]}))],
    );

    let transactions = GlobalAccount::transactions(&executor, "ga_1", object(json!({"page_size": 10})), &RequestOptions::default())
        .await
        .expect("transactions");
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["status"], json!("SETTLED"));

    let request = transport.last_request().expect("request");
    assert_eq!(request.url.path(), "/api/v1/global_accounts/ga_1/transactions");
    assert_eq!(request.url.query(), Some("page_size=10"));
}
