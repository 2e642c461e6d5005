//! HTTP API Layer
//!
//! This crate provides the REST API for the billing system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for billing and health
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent JSON error responses
//!
//! The router is assembled in two steps: `create_router` wires the
//! invoicing service over the PostgreSQL adapters, while
//! `router_with_state` accepts prepared state so tests can substitute
//! in-memory ports.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{config::ApiConfig, create_router};
//!
//! let app = create_router(pool, ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_billing::InvoicingService;
use infra_db::{FinancialYearNumbering, PgInvoiceStore, PgProjectDirectory};

use crate::config::ApiConfig;
use crate::handlers::{billing, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: InvoicingService,
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the API router backed by the PostgreSQL adapters
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let directory = Arc::new(PgProjectDirectory::new(pool.clone()));
    let invoices = Arc::new(PgInvoiceStore::new(pool.clone()));
    let numbering = Arc::new(FinancialYearNumbering::new(
        pool.clone(),
        config.invoice_prefix.clone(),
    ));
    let service = InvoicingService::new(directory, invoices, numbering, config.billing_settings());

    router_with_state(AppState {
        service,
        pool,
        config,
    })
}

/// Builds the router over prepared application state
pub fn router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/projects/ready-to-invoice", get(billing::ready_to_invoice))
        .route("/projects/:id/billing/preview", get(billing::billing_preview))
        .route(
            "/projects/:id/billing/next-date",
            get(billing::next_billing_date),
        )
        .route(
            "/projects/:id/invoices",
            get(billing::list_invoices).post(billing::record_invoice),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
