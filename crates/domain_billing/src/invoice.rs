//! Invoice records
//!
//! An invoice captures one computed billing period for a project. The
//! `sent_on` date matters beyond bookkeeping: it anchors the next period's
//! start and the once-per-month invoice-due check.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, Currency, DateRange, InvoiceId, Money, ProjectId};

use crate::error::BillingError;

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Recorded but not yet sent to the client
    Draft,
    /// Sent to the client, anchors the next billing period
    Sent,
    /// Payment received
    Paid,
}

impl InvoiceStatus {
    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub fn as_db_value(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
        }
    }
}

/// An invoice for one billing period of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Project the period was billed for
    pub project_id: ProjectId,
    /// Client the invoice goes to
    pub client_id: ClientId,
    /// Human-readable invoice number
    pub number: String,
    /// The billing period covered
    pub period: DateRange,
    /// Billable amount before tax and charges
    pub amount: Money,
    /// Tax on the billable amount
    pub tax: Money,
    /// Flat bank charges
    pub bank_charges: Money,
    /// Amount payable
    pub total: Money,
    /// Lifecycle status
    pub status: InvoiceStatus,
    /// When the invoice was sent, if it has been
    pub sent_on: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a draft invoice for a computed period
    pub fn new(
        project_id: ProjectId,
        client_id: ClientId,
        number: impl Into<String>,
        period: DateRange,
        amount: Money,
        tax: Money,
        bank_charges: Money,
        total: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InvoiceId::new_v7(),
            project_id,
            client_id,
            number: number.into(),
            period,
            amount,
            tax,
            bank_charges,
            total,
            status: InvoiceStatus::Draft,
            sent_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The invoice currency
    pub fn currency(&self) -> Currency {
        self.total.currency()
    }

    /// Marks the invoice sent on the given date
    pub fn mark_sent(&mut self, on: NaiveDate) -> Result<(), BillingError> {
        if self.status != InvoiceStatus::Draft {
            return Err(BillingError::InvalidStatusTransition {
                id: self.id,
                from: self.status,
                to: InvoiceStatus::Sent,
            });
        }
        self.status = InvoiceStatus::Sent;
        self.sent_on = Some(on);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks the invoice paid
    pub fn mark_paid(&mut self) -> Result<(), BillingError> {
        if self.status != InvoiceStatus::Sent {
            return Err(BillingError::InvalidStatusTransition {
                id: self.id,
                from: self.status,
                to: InvoiceStatus::Paid,
            });
        }
        self.status = InvoiceStatus::Paid;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether this invoice was sent within the given month
    pub fn sent_in_month(&self, year: i32, month: u32) -> bool {
        use chrono::Datelike;
        self.sent_on
            .map(|sent| sent.year() == year && sent.month() == month)
            .unwrap_or(false)
    }
}
