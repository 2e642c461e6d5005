//! Invoicing application service
//!
//! Loads the project graph through the ports, runs the computation chain,
//! and produces invoice previews and records. Every call reads fresh data;
//! nothing is cached between requests.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{BillingSettings, ClientId, DateRange, Money, ProjectId};
use domain_client::ServiceRateTerm;
use domain_project::velocity;

use crate::amount::{
    amc_billable_hours_display, billable_amount, period_amount, total_payable,
};
use crate::error::BillingError;
use crate::invoice::Invoice;
use crate::period::{billing_period, next_billing_date};
use crate::ports::{InvoiceNumbering, InvoiceStore, ProjectDirectory, ReadyToInvoice};
use crate::rates::{resolve, RateSource};
use crate::tax::tax_for;

/// Everything the invoice form needs for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePreview {
    pub project_id: ProjectId,
    pub client_id: ClientId,
    /// The number the invoice would carry if recorded now
    pub number: String,
    /// The period the invoice covers
    pub period: DateRange,
    /// Hours logged in the last completed billing month
    pub billed_hours: Decimal,
    /// Expected hours for that month
    pub expected_hours: Decimal,
    /// Billed over expected
    pub velocity: Decimal,
    /// Hours figure shown on hourly AMC invoices
    pub amc_billable_hours: Option<Decimal>,
    /// Billable amount before tax and charges
    pub amount: Money,
    pub tax: Money,
    pub bank_charges: Money,
    pub total: Money,
    pub rate_source: RateSource,
    pub rate_term: Option<ServiceRateTerm>,
    /// When the following invoice is due to go out
    pub next_billing_date: NaiveDate,
}

/// Request body for recording an invoice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordInvoiceRequest {
    /// Marks the invoice sent on this date; omitted leaves it a draft
    pub sent_on: Option<NaiveDate>,
}

/// The invoicing service over the billing ports
#[derive(Clone)]
pub struct InvoicingService {
    directory: Arc<dyn ProjectDirectory>,
    invoices: Arc<dyn InvoiceStore>,
    numbering: Arc<dyn InvoiceNumbering>,
    settings: BillingSettings,
}

impl InvoicingService {
    pub fn new(
        directory: Arc<dyn ProjectDirectory>,
        invoices: Arc<dyn InvoiceStore>,
        numbering: Arc<dyn InvoiceNumbering>,
        settings: BillingSettings,
    ) -> Self {
        Self {
            directory,
            invoices,
            numbering,
            settings,
        }
    }

    pub fn settings(&self) -> &BillingSettings {
        &self.settings
    }

    /// Computes the invoice preview for a project
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn billing_preview(
        &self,
        project_id: ProjectId,
        now: DateTime<Utc>,
    ) -> Result<InvoicePreview, BillingError> {
        let ctx = self.directory.billing_context(project_id).await?;
        let details = ctx.client.billing_details()?;
        let resolved = resolve(details, ctx.billing_detail.as_ref());

        let today = self.settings.today(now);
        let anchor = self.invoice_anchor(project_id, &ctx.project.created_at).await?;
        let period = billing_period(
            anchor,
            ctx.client.last_marked_active_on,
            details.frequency,
            details.billing_day,
        );

        let window = details.completed_month_window(today);
        let billed_hours = ctx.project.hours_booked_in(&window);
        let expected_hours = ctx.project.expected_hours_for(&window);
        debug!(%billed_hours, %expected_hours, "Aggregated hours for billing month");

        let monthly_billable = billable_amount(&resolved.rate, billed_hours);
        let tax = tax_for(&monthly_billable, &ctx.client, &self.settings);
        let bank_charges = details.bank_charges_or_zero();

        let (amount, total) = if ctx.project.is_amc {
            match resolved.term {
                Some(term) => {
                    let charge = period_amount(
                        term,
                        resolved.source,
                        details.frequency,
                        &period,
                        &resolved.rate,
                        billed_hours,
                        &tax,
                        &bank_charges,
                    )?;
                    (charge.amount, charge.total)
                }
                // An AMC without a configured term has nothing to bill
                None => {
                    let zero = Money::zero(resolved.rate.currency());
                    (zero, zero)
                }
            }
        } else {
            let total = total_payable(&monthly_billable, &tax, &bank_charges)?;
            (monthly_billable, total)
        };

        let amc_billable_hours = if ctx.project.is_amc {
            amc_billable_hours_display(resolved.term, billed_hours, details.frequency)
        } else {
            None
        };

        let number = self
            .numbering
            .next_number(ctx.client.id, project_id, today, ctx.billing_level)
            .await?;

        Ok(InvoicePreview {
            project_id,
            client_id: ctx.client.id,
            number,
            period,
            billed_hours,
            expected_hours,
            velocity: velocity(billed_hours, expected_hours),
            amc_billable_hours,
            amount,
            tax,
            bank_charges,
            total,
            rate_source: resolved.source,
            rate_term: resolved.term,
            next_billing_date: next_billing_date(anchor, details.frequency),
        })
    }

    /// The date the next invoice is due to go out
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn next_billing_date(
        &self,
        project_id: ProjectId,
    ) -> Result<NaiveDate, BillingError> {
        let ctx = self.directory.billing_context(project_id).await?;
        let details = ctx.client.billing_details()?;
        let anchor = self.invoice_anchor(project_id, &ctx.project.created_at).await?;

        Ok(next_billing_date(anchor, details.frequency))
    }

    /// Projects due for invoicing today
    #[instrument(skip(self))]
    pub async fn ready_to_invoice(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReadyToInvoice>, BillingError> {
        let today = self.settings.today(now);
        Ok(self.directory.ready_to_invoice(today).await?)
    }

    /// All invoices recorded for a project
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn invoices_for(&self, project_id: ProjectId) -> Result<Vec<Invoice>, BillingError> {
        Ok(self.invoices.list_for_project(project_id).await?)
    }

    /// Records an invoice for the project's computed period
    #[instrument(skip(self, request), fields(project_id = %project_id))]
    pub async fn record_invoice(
        &self,
        project_id: ProjectId,
        request: RecordInvoiceRequest,
        now: DateTime<Utc>,
    ) -> Result<Invoice, BillingError> {
        let preview = self.billing_preview(project_id, now).await?;

        let mut invoice = Invoice::new(
            preview.project_id,
            preview.client_id,
            preview.number,
            preview.period,
            preview.amount,
            preview.tax,
            preview.bank_charges,
            preview.total,
        );
        if let Some(sent_on) = request.sent_on {
            invoice.mark_sent(sent_on)?;
        }

        self.invoices.record(&invoice).await?;
        debug!(invoice_id = %invoice.id, "Invoice recorded");

        Ok(invoice)
    }

    /// The anchor the next period hangs off: the last sent invoice, else
    /// the project's creation date in the billing timezone.
    async fn invoice_anchor(
        &self,
        project_id: ProjectId,
        created_at: &DateTime<Utc>,
    ) -> Result<NaiveDate, BillingError> {
        let last_sent = self.invoices.last_sent(project_id).await?;
        Ok(last_sent
            .and_then(|invoice| invoice.sent_on)
            .unwrap_or_else(|| self.settings.timezone.local_date(*created_at)))
    }
}
