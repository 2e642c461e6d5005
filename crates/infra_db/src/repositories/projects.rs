//! Project repository implementation
//!
//! This module provides database access for projects and everything a
//! billing computation loads alongside them: the owning client, the billing
//! configuration rows, the team roster and its logged effort.
//!
//! Queries are written against the runtime SQLx API so the crate builds
//! without a database; row structs derive `FromRow` and the adapters map
//! them into domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for projects and their billing inputs
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Creates a new ProjectRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a project by its identifier
    ///
    /// Soft-deleted rows are returned too; activity checks belong to the
    /// domain layer.
    pub async fn get_project(&self, project_id: Uuid) -> Result<ProjectRow, DatabaseError> {
        let project = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT
                id,
                client_id,
                name,
                status,
                project_type,
                is_amc,
                billing_level,
                created_at,
                deleted_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Project", project_id))?;

        Ok(project)
    }

    /// Retrieves a client by its identifier
    pub async fn get_client(&self, client_id: Uuid) -> Result<ClientRow, DatabaseError> {
        let client = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT
                id,
                name,
                country,
                last_marked_active_on
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Client", client_id))?;

        Ok(client)
    }

    /// Retrieves a client's billing configuration, if one is set up
    pub async fn get_client_billing(
        &self,
        client_id: Uuid,
    ) -> Result<Option<ClientBillingRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClientBillingRow>(
            r#"
            SELECT
                client_id,
                billing_frequency,
                billing_day,
                service_rate,
                currency,
                service_rate_term,
                bank_charges
            FROM client_billing_details
            WHERE client_id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a project's billing override row, if one exists
    pub async fn get_project_billing(
        &self,
        project_id: Uuid,
    ) -> Result<Option<ProjectBillingRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ProjectBillingRow>(
            r#"
            SELECT
                project_id,
                service_rate,
                currency,
                service_rate_term
            FROM project_billing_details
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves the full roster for a project, former members included
    pub async fn get_team(&self, project_id: Uuid) -> Result<Vec<TeamMemberRow>, DatabaseError> {
        let members = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT
                id,
                user_id,
                designation,
                daily_expected_effort,
                billing_engagement,
                started_on,
                ended_on
            FROM project_team_members
            WHERE project_id = $1
            ORDER BY started_on, id
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Retrieves all logged effort for the given roster entries
    pub async fn get_efforts(
        &self,
        member_ids: &[Uuid],
    ) -> Result<Vec<EffortRow>, DatabaseError> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entries = sqlx::query_as::<_, EffortRow>(
            r#"
            SELECT
                team_member_id,
                added_on,
                actual_effort
            FROM effort_entries
            WHERE team_member_id = ANY($1)
            ORDER BY added_on
            "#,
        )
        .bind(member_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Lists live projects with the fields the invoice-due check reads
    ///
    /// One row per active, non-deleted project whose client has billing set
    /// up, carrying the client's billing day and the latest sent date. The
    /// due predicate itself runs in the domain layer.
    pub async fn ready_candidates(&self) -> Result<Vec<ReadyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReadyRow>(
            r#"
            SELECT
                p.id AS project_id,
                p.name AS project_name,
                c.id AS client_id,
                c.name AS client_name,
                cbd.billing_day,
                last_sent.sent_on AS last_sent_on
            FROM projects p
            JOIN clients c ON c.id = p.client_id
            JOIN client_billing_details cbd ON cbd.client_id = c.id
            LEFT JOIN LATERAL (
                SELECT i.sent_on
                FROM invoices i
                WHERE i.project_id = p.id AND i.sent_on IS NOT NULL
                ORDER BY i.sent_on DESC
                LIMIT 1
            ) last_sent ON TRUE
            WHERE p.status = 'active' AND p.deleted_at IS NULL
            ORDER BY c.name, p.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Database row for a project
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub status: String,
    pub project_type: String,
    pub is_amc: bool,
    pub billing_level: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database row for a client
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRow {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub last_marked_active_on: Option<NaiveDate>,
}

/// Database row for a client's billing configuration
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientBillingRow {
    pub client_id: Uuid,
    pub billing_frequency: i16,
    pub billing_day: i16,
    pub service_rate: Decimal,
    pub currency: String,
    pub service_rate_term: Option<String>,
    pub bank_charges: Option<Decimal>,
}

/// Database row for a project's billing override
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectBillingRow {
    pub project_id: Uuid,
    pub service_rate: Option<Decimal>,
    pub currency: Option<String>,
    pub service_rate_term: Option<String>,
}

/// Database row for a roster entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamMemberRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub designation: String,
    pub daily_expected_effort: Decimal,
    pub billing_engagement: Decimal,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
}

/// Database row for one logged effort record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EffortRow {
    pub team_member_id: Uuid,
    pub added_on: NaiveDate,
    pub actual_effort: Decimal,
}

/// Database row for the ready-to-invoice listing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReadyRow {
    pub project_id: Uuid,
    pub project_name: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub billing_day: i16,
    pub last_sent_on: Option<NaiveDate>,
}
