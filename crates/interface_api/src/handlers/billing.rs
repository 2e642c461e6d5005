//! Billing handlers
//!
//! Thin translations between HTTP and the invoicing service. Each handler
//! resolves "now" at the edge and hands it to the service so the
//! computation chain itself stays clock-free.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use core_kernel::ProjectId;
use domain_billing::RecordInvoiceRequest;

use crate::dto::billing::{
    InvoiceResponse, NextBillingDateResponse, PreviewResponse, ReadyProjectResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Computes the invoice preview for a project
pub async fn billing_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let preview = state
        .service
        .billing_preview(ProjectId::from(id), Utc::now())
        .await?;
    Ok(Json(preview.into()))
}

/// The date the next invoice is due to go out
pub async fn next_billing_date(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NextBillingDateResponse>, ApiError> {
    let next = state.service.next_billing_date(ProjectId::from(id)).await?;
    Ok(Json(NextBillingDateResponse {
        project_id: id,
        next_billing_date: next,
    }))
}

/// Lists projects due for invoicing today
pub async fn ready_to_invoice(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReadyProjectResponse>>, ApiError> {
    let ready = state.service.ready_to_invoice(Utc::now()).await?;
    Ok(Json(ready.into_iter().map(Into::into).collect()))
}

/// Lists invoices recorded for a project, newest first
pub async fn list_invoices(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.service.invoices_for(ProjectId::from(id)).await?;
    Ok(Json(invoices.into_iter().map(Into::into).collect()))
}

/// Records an invoice for the project's current period
pub async fn record_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let invoice = state
        .service
        .record_invoice(ProjectId::from(id), request, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(invoice.into())))
}
