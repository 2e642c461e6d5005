//! HTTP API tests
//!
//! Exercises the router end to end over in-memory ports. Scenarios avoid
//! depending on the wall clock: with no logged efforts the hourly amount
//! is zero and a retainer bills its flat rate, whatever today is.

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use core_kernel::{BillingSettings, Currency, Money};
use domain_billing::InvoicingService;
use domain_client::ServiceRateTerm;
use interface_api::{config::ApiConfig, router_with_state, AppState};
use test_utils::{
    in_memory_service, TestBillingContextBuilder, TestClientBuilder, TestProjectBuilder,
};

fn server_over(service: InvoicingService) -> TestServer {
    // Lazy pool that never connects; only the readiness probe touches it
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost:1/unreachable")
        .expect("lazy pool");
    let state = AppState {
        service,
        pool,
        config: ApiConfig::default(),
    };
    TestServer::new(router_with_state(state)).expect("test server")
}

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimal serialized as string")
        .parse()
        .expect("parseable decimal")
}

#[tokio::test]
async fn test_health_is_public() {
    let (service, _directory, _invoices) = in_memory_service(BillingSettings::default());
    let server = server_over(service);

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_readiness_fails_without_a_database() {
    let (service, _directory, _invoices) = in_memory_service(BillingSettings::default());
    let server = server_over(service);

    let response = server.get("/ready").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_preview_for_hourly_client_with_no_hours() {
    let (service, directory, _invoices) = in_memory_service(BillingSettings::default());
    let context = TestBillingContextBuilder::new()
        .with_client(TestClientBuilder::new().build())
        .build();
    let project_id = Uuid::from(context.project.id);
    directory.insert(context);
    let server = server_over(service);

    let response = server
        .get(&format!("/projects/{}/billing/preview", project_id))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["number"], "SP/0001");
    assert_eq!(body["rate_source"], "client");
    assert_eq!(body["rate_term"], "per_hour");
    assert_eq!(decimal(&body["amount"]["amount"]), Decimal::ZERO);
    assert_eq!(decimal(&body["tax"]["amount"]), Decimal::ZERO);
    assert_eq!(decimal(&body["bank_charges"]["amount"]), dec!(500));
    assert_eq!(decimal(&body["total"]["amount"]), dec!(500));
    assert_eq!(body["total"]["currency"], "INR");
    assert!(body["next_billing_date"].is_string());
    assert!(body["period"]["start"].is_string());
}

#[tokio::test]
async fn test_preview_for_amc_retainer_bills_the_flat_rate() {
    let (service, directory, _invoices) = in_memory_service(BillingSettings::default());
    let client = TestClientBuilder::new()
        .with_service_rate(Money::new(dec!(40000), Currency::INR))
        .with_rate_term(ServiceRateTerm::PerMonth)
        .build();
    let project = TestProjectBuilder::new().for_client(&client).as_amc().build();
    let project_id = Uuid::from(project.id);
    directory.insert(
        TestBillingContextBuilder::new()
            .with_client(client)
            .with_project(project)
            .build(),
    );
    let server = server_over(service);

    let response = server
        .get(&format!("/projects/{}/billing/preview", project_id))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["rate_term"], "per_month");
    assert_eq!(decimal(&body["amount"]["amount"]), dec!(40000));
    assert_eq!(decimal(&body["bank_charges"]["amount"]), dec!(500));
    assert_eq!(decimal(&body["total"]["amount"]), dec!(40500));
}

#[tokio::test]
async fn test_preview_for_unknown_project_is_404() {
    let (service, _directory, _invoices) = in_memory_service(BillingSettings::default());
    let server = server_over(service);

    let response = server
        .get(&format!("/projects/{}/billing/preview", Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_record_invoice_then_listing_shows_it() {
    let (service, directory, invoices) = in_memory_service(BillingSettings::default());
    let context = TestBillingContextBuilder::new()
        .with_client(TestClientBuilder::new().build())
        .build();
    let project_id = Uuid::from(context.project.id);
    directory.insert(context);
    let server = server_over(service);

    let response = server
        .post(&format!("/projects/{}/invoices", project_id))
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: Value = response.json();
    assert_eq!(created["number"], "SP/0001");
    assert_eq!(created["status"], "draft");
    assert!(created.get("sent_on").is_none());
    assert_eq!(decimal(&created["total"]["amount"]), dec!(500));

    let listing = server
        .get(&format!("/projects/{}/invoices", project_id))
        .await;
    listing.assert_status_ok();
    let body: Value = listing.json();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["number"], "SP/0001");

    assert_eq!(invoices.all().len(), 1);
}

#[tokio::test]
async fn test_recording_a_sent_invoice_carries_the_date() {
    let (service, directory, _invoices) = in_memory_service(BillingSettings::default());
    let context = TestBillingContextBuilder::new()
        .with_client(TestClientBuilder::new().build())
        .build();
    let project_id = Uuid::from(context.project.id);
    directory.insert(context);
    let server = server_over(service);

    let response = server
        .post(&format!("/projects/{}/invoices", project_id))
        .json(&json!({ "sent_on": "2024-05-02" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: Value = response.json();
    assert_eq!(created["status"], "sent");
    assert_eq!(created["sent_on"], "2024-05-02");
}

#[tokio::test]
async fn test_ready_listing_returns_due_projects() {
    let (service, directory, _invoices) = in_memory_service(BillingSettings::default());
    // Billing day 1 is always reached, and nothing has been sent
    let context = TestBillingContextBuilder::new()
        .with_client(
            TestClientBuilder::new()
                .with_name("Acme Exports")
                .with_billing_day(1)
                .build(),
        )
        .build();
    let project_id = Uuid::from(context.project.id);
    directory.insert(context);
    let server = server_over(service);

    let response = server.get("/projects/ready-to-invoice").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["client_name"], "Acme Exports");
    assert_eq!(body[0]["project_id"], project_id.to_string());
    assert_eq!(body[0]["billing_day"], 1);
}

#[tokio::test]
async fn test_next_billing_date_returns_a_parseable_date() {
    let (service, directory, _invoices) = in_memory_service(BillingSettings::default());
    let context = TestBillingContextBuilder::new()
        .with_client(TestClientBuilder::new().build())
        .build();
    let project_id = Uuid::from(context.project.id);
    directory.insert(context);
    let server = server_over(service);

    let response = server
        .get(&format!("/projects/{}/billing/next-date", project_id))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["project_id"], project_id.to_string());
    let next = body["next_billing_date"].as_str().expect("a date string");
    assert!(next.parse::<NaiveDate>().is_ok());
}
