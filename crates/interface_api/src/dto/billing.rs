//! Billing DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use core_kernel::{DateRange, Money};
use domain_billing::{Invoice, InvoicePreview, RateSource, ReadyToInvoice};

/// Money rendered as an amount plus ISO currency code
#[derive(Debug, Serialize)]
pub struct MoneyDto {
    pub amount: Decimal,
    pub currency: String,
}

impl From<&Money> for MoneyDto {
    fn from(money: &Money) -> Self {
        Self {
            amount: money.amount(),
            currency: money.currency().code().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PeriodDto {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<&DateRange> for PeriodDto {
    fn from(range: &DateRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// The invoice preview for a project, as the invoice form shows it
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub number: String,
    pub period: PeriodDto,
    pub billed_hours: Decimal,
    pub expected_hours: Decimal,
    pub velocity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amc_billable_hours: Option<Decimal>,
    pub amount: MoneyDto,
    pub tax: MoneyDto,
    pub bank_charges: MoneyDto,
    pub total: MoneyDto,
    pub rate_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_term: Option<String>,
    pub next_billing_date: NaiveDate,
}

impl From<InvoicePreview> for PreviewResponse {
    fn from(preview: InvoicePreview) -> Self {
        Self {
            project_id: preview.project_id.into(),
            client_id: preview.client_id.into(),
            number: preview.number,
            period: PeriodDto::from(&preview.period),
            billed_hours: preview.billed_hours,
            expected_hours: preview.expected_hours,
            velocity: preview.velocity,
            amc_billable_hours: preview.amc_billable_hours,
            amount: MoneyDto::from(&preview.amount),
            tax: MoneyDto::from(&preview.tax),
            bank_charges: MoneyDto::from(&preview.bank_charges),
            total: MoneyDto::from(&preview.total),
            rate_source: rate_source_label(preview.rate_source).to_string(),
            rate_term: preview.rate_term.map(|term| term.as_db_value().to_string()),
            next_billing_date: preview.next_billing_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub number: String,
    pub period: PeriodDto,
    pub amount: MoneyDto,
    pub tax: MoneyDto,
    pub bank_charges: MoneyDto,
    pub total: MoneyDto,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.into(),
            number: invoice.number,
            period: PeriodDto::from(&invoice.period),
            amount: MoneyDto::from(&invoice.amount),
            tax: MoneyDto::from(&invoice.tax),
            bank_charges: MoneyDto::from(&invoice.bank_charges),
            total: MoneyDto::from(&invoice.total),
            status: invoice.status.as_db_value().to_string(),
            sent_on: invoice.sent_on,
            created_at: invoice.created_at,
        }
    }
}

/// One row of the ready-to-invoice listing
#[derive(Debug, Serialize)]
pub struct ReadyProjectResponse {
    pub project_id: Uuid,
    pub project_name: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub billing_day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sent_on: Option<NaiveDate>,
}

impl From<ReadyToInvoice> for ReadyProjectResponse {
    fn from(ready: ReadyToInvoice) -> Self {
        Self {
            project_id: ready.project_id.into(),
            project_name: ready.project_name,
            client_id: ready.client_id.into(),
            client_name: ready.client_name,
            billing_day: ready.billing_day,
            last_sent_on: ready.last_sent_on,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NextBillingDateResponse {
    pub project_id: Uuid,
    pub next_billing_date: NaiveDate,
}

fn rate_source_label(source: RateSource) -> &'static str {
    match source {
        RateSource::Project => "project",
        RateSource::Client => "client",
    }
}
