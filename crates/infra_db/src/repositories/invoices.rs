//! Invoice repository implementation
//!
//! Database access for recorded invoices: the per-project history, the
//! last-sent lookup that anchors billing periods, and the fiscal-year
//! counts the invoice numbering scheme runs on.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for recorded invoices
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The most recently sent invoice for a project, by sent date
    pub async fn last_sent(&self, project_id: Uuid) -> Result<Option<InvoiceRow>, DatabaseError> {
        let invoice = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT
                id,
                project_id,
                client_id,
                number,
                period_start,
                period_end,
                amount,
                tax,
                bank_charges,
                total,
                currency,
                status,
                sent_on,
                created_at,
                updated_at
            FROM invoices
            WHERE project_id = $1 AND sent_on IS NOT NULL
            ORDER BY sent_on DESC
            LIMIT 1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// All invoices for a project, newest first
    pub async fn list_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<InvoiceRow>, DatabaseError> {
        let invoices = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT
                id,
                project_id,
                client_id,
                number,
                period_start,
                period_end,
                amount,
                tax,
                bank_charges,
                total,
                currency,
                status,
                sent_on,
                created_at,
                updated_at
            FROM invoices
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    /// Inserts a recorded invoice
    pub async fn insert(&self, record: NewInvoiceRecord) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, project_id, client_id, number,
                period_start, period_end,
                amount, tax, bank_charges, total, currency,
                status, sent_on, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(record.id)
        .bind(record.project_id)
        .bind(record.client_id)
        .bind(record.number)
        .bind(record.period_start)
        .bind(record.period_end)
        .bind(record.amount)
        .bind(record.tax)
        .bind(record.bank_charges)
        .bind(record.total)
        .bind(record.currency)
        .bind(record.status)
        .bind(record.sent_on)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts invoices created for a project within a date window
    ///
    /// The window is inclusive on both ends; numbering passes fiscal-year
    /// bounds here.
    pub async fn count_for_project_between(
        &self,
        project_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM invoices
            WHERE project_id = $1
              AND created_at::date BETWEEN $2 AND $3
            "#,
        )
        .bind(project_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Counts invoices created for a client within a date window
    pub async fn count_for_client_between(
        &self,
        client_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM invoices
            WHERE client_id = $1
              AND created_at::date BETWEEN $2 AND $3
            "#,
        )
        .bind(client_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Database row for an invoice
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub number: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount: Decimal,
    pub tax: Decimal,
    pub bank_charges: Decimal,
    pub total: Decimal,
    pub currency: String,
    pub status: String,
    pub sent_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a recorded invoice
///
/// Identifiers and timestamps come from the domain; the repository stores
/// them as given.
#[derive(Debug, Clone)]
pub struct NewInvoiceRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub number: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount: Decimal,
    pub tax: Decimal,
    pub bank_charges: Decimal,
    pub total: Decimal,
    pub currency: String,
    pub status: String,
    pub sent_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
