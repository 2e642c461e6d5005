//! PostgreSQL billing adapters
//!
//! This module provides the database adapters for the billing ports,
//! implementing `ProjectDirectory`, `InvoiceStore` and `InvoiceNumbering`
//! over the repository layer.
//!
//! # Overview
//!
//! The adapters bridge the domain's port interfaces and the database:
//!
//! - Translate port requests into repository operations
//! - Convert database row types back to domain models
//! - Handle error translation between database and port errors
//!
//! Decoding is strict for values the computation chain depends on (status,
//! currency, billing day) and lenient for the rate term, where unrecognized
//! historical strings behave as an unset term.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PgProjectDirectory;
//! use domain_billing::ProjectDirectory;
//! use std::sync::Arc;
//!
//! let directory = PgProjectDirectory::new(pool.clone());
//! let port: Arc<dyn ProjectDirectory> = Arc::new(directory);
//! let context = port.billing_context(project_id).await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    ClientId, Currency, DateRange, InvoiceId, Money, ProjectId, TeamMemberId, UserId,
};
use domain_billing::{
    fiscal_year, invoice_due, BillingContext, BillingLevel, Invoice, InvoiceNumbering,
    InvoiceStatus, InvoiceStore, PortError, ProjectBillingDetail, ProjectDirectory, ReadyToInvoice,
};
use domain_client::{
    BillingFrequency, Client, ClientBillingDetails, CountryCode, ServiceRateTerm,
};
use domain_project::{
    Designation, EffortEntry, EffortLog, Project, ProjectStatus, ProjectType, TeamMember,
};

use crate::error::DatabaseError;
use crate::repositories::invoices::{InvoiceRepository, InvoiceRow, NewInvoiceRecord};
use crate::repositories::projects::{
    ClientBillingRow, ClientRow, EffortRow, ProjectBillingRow, ProjectRepository, ProjectRow,
    ReadyRow, TeamMemberRow,
};

/// PostgreSQL-backed implementation of the `ProjectDirectory` port
///
/// Loads the full billing context in a handful of queries: the project row,
/// its client and billing configuration, the roster, and all logged effort
/// for the roster in one batch.
#[derive(Debug, Clone)]
pub struct PgProjectDirectory {
    repository: ProjectRepository,
}

impl PgProjectDirectory {
    /// Creates a new PostgreSQL project directory
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ProjectRepository::new(pool),
        }
    }
}

#[async_trait]
impl ProjectDirectory for PgProjectDirectory {
    #[instrument(skip(self), fields(project_id = %id))]
    async fn billing_context(&self, id: ProjectId) -> Result<BillingContext, PortError> {
        let project_id = Uuid::from(id);

        let project_row = self
            .repository
            .get_project(project_id)
            .await
            .map_err(db_to_port_error)?;
        let client_row = self
            .repository
            .get_client(project_row.client_id)
            .await
            .map_err(db_to_port_error)?;
        let client_billing = self
            .repository
            .get_client_billing(project_row.client_id)
            .await
            .map_err(db_to_port_error)?;
        let override_row = self
            .repository
            .get_project_billing(project_id)
            .await
            .map_err(db_to_port_error)?;
        let team_rows = self
            .repository
            .get_team(project_id)
            .await
            .map_err(db_to_port_error)?;

        let member_ids: Vec<Uuid> = team_rows.iter().map(|row| row.id).collect();
        let effort_rows = self
            .repository
            .get_efforts(&member_ids)
            .await
            .map_err(db_to_port_error)?;

        let billing_level = BillingLevel::from_db_value(&project_row.billing_level)
            .ok_or_else(|| {
                PortError::invalid_data(format!(
                    "unknown billing level '{}'",
                    project_row.billing_level
                ))
            })?;
        let client = client_from_rows(client_row, client_billing)?;
        let billing_detail = override_row.map(billing_detail_from_row).transpose()?;
        let project = project_from_rows(project_row, team_rows, effort_rows)?;

        debug!(team = project.team.len(), "Billing context loaded");
        Ok(BillingContext {
            project,
            client,
            billing_detail,
            billing_level,
        })
    }

    #[instrument(skip(self), fields(%today))]
    async fn ready_to_invoice(&self, today: NaiveDate) -> Result<Vec<ReadyToInvoice>, PortError> {
        let candidates = self
            .repository
            .ready_candidates()
            .await
            .map_err(db_to_port_error)?;

        let ready: Vec<ReadyToInvoice> = candidates
            .into_iter()
            .map(ready_from_row)
            .filter(|row| invoice_due(row.last_sent_on, row.billing_day, today))
            .collect();

        debug!(count = ready.len(), "Ready-to-invoice listing computed");
        Ok(ready)
    }
}

/// PostgreSQL-backed implementation of the `InvoiceStore` port
#[derive(Debug, Clone)]
pub struct PgInvoiceStore {
    repository: InvoiceRepository,
}

impl PgInvoiceStore {
    /// Creates a new PostgreSQL invoice store
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InvoiceRepository::new(pool),
        }
    }
}

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    #[instrument(skip(self), fields(project_id = %project_id))]
    async fn last_sent(&self, project_id: ProjectId) -> Result<Option<Invoice>, PortError> {
        self.repository
            .last_sent(Uuid::from(project_id))
            .await
            .map_err(db_to_port_error)?
            .map(invoice_from_row)
            .transpose()
    }

    #[instrument(skip(self), fields(project_id = %project_id))]
    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<Invoice>, PortError> {
        self.repository
            .list_for_project(Uuid::from(project_id))
            .await
            .map_err(db_to_port_error)?
            .into_iter()
            .map(invoice_from_row)
            .collect()
    }

    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.id))]
    async fn record(&self, invoice: &Invoice) -> Result<(), PortError> {
        self.repository
            .insert(invoice_to_record(invoice))
            .await
            .map_err(db_to_port_error)?;
        debug!("Invoice stored");
        Ok(())
    }
}

/// Fiscal-year invoice numbering
///
/// Numbers follow `SP/2024-25/0042`: a configured prefix, the Indian fiscal
/// year (April through March) the reference date falls in, and a four-digit
/// sequence. The sequence counts invoices already recorded in that fiscal
/// year, scoped per project or per client according to the billing level.
#[derive(Debug, Clone)]
pub struct FinancialYearNumbering {
    repository: InvoiceRepository,
    prefix: String,
}

impl FinancialYearNumbering {
    /// Creates a numbering scheme with the given invoice prefix
    pub fn new(pool: PgPool, prefix: impl Into<String>) -> Self {
        Self {
            repository: InvoiceRepository::new(pool),
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl InvoiceNumbering for FinancialYearNumbering {
    #[instrument(skip(self), fields(project_id = %project_id, %reference_date))]
    async fn next_number(
        &self,
        client_id: ClientId,
        project_id: ProjectId,
        reference_date: NaiveDate,
        level: BillingLevel,
    ) -> Result<String, PortError> {
        let start_year = fiscal_year(reference_date);
        let (from, to) = fiscal_year_bounds(start_year);

        let existing = match level {
            BillingLevel::Project => {
                self.repository
                    .count_for_project_between(Uuid::from(project_id), from, to)
                    .await
            }
            BillingLevel::Client => {
                self.repository
                    .count_for_client_between(Uuid::from(client_id), from, to)
                    .await
            }
        }
        .map_err(db_to_port_error)?;

        Ok(format!(
            "{}/{}/{:04}",
            self.prefix,
            fiscal_year_segment(start_year),
            existing + 1
        ))
    }
}

/// First and last day of the fiscal year starting in April of `start_year`
fn fiscal_year_bounds(start_year: i32) -> (NaiveDate, NaiveDate) {
    let from = NaiveDate::from_ymd_opt(start_year, 4, 1).expect("date out of range");
    let to = NaiveDate::from_ymd_opt(start_year + 1, 3, 31).expect("date out of range");
    (from, to)
}

/// The `2024-25` piece of an invoice number
fn fiscal_year_segment(start_year: i32) -> String {
    format!("{}-{:02}", start_year, (start_year + 1) % 100)
}

fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound { entity, id } => PortError::NotFound { entity, id },
        other => PortError::storage(other),
    }
}

fn currency_from_code(code: &str) -> Result<Currency, PortError> {
    Currency::from_code(code)
        .ok_or_else(|| PortError::invalid_data(format!("unsupported currency '{code}'")))
}

/// Converts client rows to a domain `Client`
fn client_from_rows(
    row: ClientRow,
    billing: Option<ClientBillingRow>,
) -> Result<Client, PortError> {
    let billing_details = billing.map(client_billing_from_row).transpose()?;

    Ok(Client {
        id: ClientId::from(row.id),
        name: row.name,
        country: CountryCode::new(row.country),
        last_marked_active_on: row.last_marked_active_on,
        billing_details,
    })
}

fn client_billing_from_row(row: ClientBillingRow) -> Result<ClientBillingDetails, PortError> {
    let currency = currency_from_code(&row.currency)?;
    let frequency = BillingFrequency::from_code_lossy(row.billing_frequency);

    let mut details = ClientBillingDetails::new(
        frequency,
        row.billing_day as u32,
        Money::new(row.service_rate, currency),
    )
    .map_err(|e| PortError::invalid_data(e.to_string()))?;

    // Unrecognized term strings behave as an unset term
    if let Some(term) = row
        .service_rate_term
        .as_deref()
        .and_then(ServiceRateTerm::from_db_value)
    {
        details = details.with_rate_term(term);
    }
    if let Some(charges) = row.bank_charges {
        details = details
            .with_bank_charges(Money::new(charges, currency))
            .map_err(|e| PortError::invalid_data(e.to_string()))?;
    }

    Ok(details)
}

/// Converts project rows to a domain `Project`, attaching the roster and
/// each member's logged effort
fn project_from_rows(
    row: ProjectRow,
    team_rows: Vec<TeamMemberRow>,
    effort_rows: Vec<EffortRow>,
) -> Result<Project, PortError> {
    let status = ProjectStatus::from_db_value(&row.status).ok_or_else(|| {
        PortError::invalid_data(format!("unknown project status '{}'", row.status))
    })?;
    let project_type = ProjectType::from_db_value(&row.project_type).ok_or_else(|| {
        PortError::invalid_data(format!("unknown project type '{}'", row.project_type))
    })?;

    let mut efforts_by_member: HashMap<Uuid, Vec<EffortEntry>> = HashMap::new();
    for effort in effort_rows {
        efforts_by_member
            .entry(effort.team_member_id)
            .or_default()
            .push(EffortEntry::new(effort.added_on, effort.actual_effort));
    }

    let team = team_rows
        .into_iter()
        .map(|member| team_member_from_row(member, &mut efforts_by_member))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Project {
        id: ProjectId::from(row.id),
        client_id: ClientId::from(row.client_id),
        name: row.name,
        status,
        project_type,
        is_amc: row.is_amc,
        team,
        created_at: row.created_at,
        deleted_at: row.deleted_at,
    })
}

fn team_member_from_row(
    row: TeamMemberRow,
    efforts: &mut HashMap<Uuid, Vec<EffortEntry>>,
) -> Result<TeamMember, PortError> {
    let designation = Designation::from_db_value(&row.designation).ok_or_else(|| {
        PortError::invalid_data(format!("unknown designation '{}'", row.designation))
    })?;
    let effort_log = efforts.remove(&row.id).map(EffortLog::new);

    Ok(TeamMember {
        id: TeamMemberId::from(row.id),
        user_id: UserId::from(row.user_id),
        designation,
        daily_expected_effort: row.daily_expected_effort,
        billing_engagement: row.billing_engagement,
        started_on: row.started_on,
        ended_on: row.ended_on,
        effort_log,
    })
}

fn billing_detail_from_row(row: ProjectBillingRow) -> Result<ProjectBillingDetail, PortError> {
    let service_rate = match (row.service_rate, row.currency.as_deref()) {
        (Some(amount), Some(code)) => Some(Money::new(amount, currency_from_code(code)?)),
        (Some(_), None) => {
            return Err(PortError::invalid_data(
                "billing override carries a rate without a currency",
            ));
        }
        (None, _) => None,
    };
    let service_rate_term = row
        .service_rate_term
        .as_deref()
        .and_then(ServiceRateTerm::from_db_value);

    Ok(ProjectBillingDetail {
        service_rate,
        service_rate_term,
    })
}

fn invoice_from_row(row: InvoiceRow) -> Result<Invoice, PortError> {
    let currency = currency_from_code(&row.currency)?;
    let status = InvoiceStatus::from_db_value(&row.status).ok_or_else(|| {
        PortError::invalid_data(format!("unknown invoice status '{}'", row.status))
    })?;
    let period = DateRange::new(row.period_start, row.period_end)
        .map_err(|e| PortError::invalid_data(e.to_string()))?;

    Ok(Invoice {
        id: InvoiceId::from(row.id),
        project_id: ProjectId::from(row.project_id),
        client_id: ClientId::from(row.client_id),
        number: row.number,
        period,
        amount: Money::new(row.amount, currency),
        tax: Money::new(row.tax, currency),
        bank_charges: Money::new(row.bank_charges, currency),
        total: Money::new(row.total, currency),
        status,
        sent_on: row.sent_on,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn invoice_to_record(invoice: &Invoice) -> NewInvoiceRecord {
    NewInvoiceRecord {
        id: Uuid::from(invoice.id),
        project_id: Uuid::from(invoice.project_id),
        client_id: Uuid::from(invoice.client_id),
        number: invoice.number.clone(),
        period_start: invoice.period.start,
        period_end: invoice.period.end,
        amount: invoice.amount.amount(),
        tax: invoice.tax.amount(),
        bank_charges: invoice.bank_charges.amount(),
        total: invoice.total.amount(),
        currency: invoice.currency().code().to_string(),
        status: invoice.status.as_db_value().to_string(),
        sent_on: invoice.sent_on,
        created_at: invoice.created_at,
        updated_at: invoice.updated_at,
    }
}

fn ready_from_row(row: ReadyRow) -> ReadyToInvoice {
    ReadyToInvoice {
        project_id: ProjectId::from(row.project_id),
        project_name: row.project_name,
        client_id: ClientId::from(row.client_id),
        client_name: row.client_name,
        billing_day: row.billing_day as u32,
        last_sent_on: row.last_sent_on,
    }
}
