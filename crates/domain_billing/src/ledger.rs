//! Project ledger entries
//!
//! A minimal credit/debit record per project with a net-amount summary.
//! Quarters follow the Indian fiscal year, April through March, matching
//! the organization's reporting periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, LedgerEntryId, Money, MoneyError, ProjectId};

/// Which side of the ledger an entry posts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Credit,
    Debit,
}

impl EntryKind {
    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }

    pub fn as_db_value(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

/// One credit or debit against a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: LedgerEntryId,
    /// Project the entry belongs to
    pub project_id: ProjectId,
    /// Credit or debit
    pub kind: EntryKind,
    /// Posted amount
    pub amount: Money,
    /// Date the entry applies to
    pub entry_date: NaiveDate,
    /// Free-text narration
    pub narration: Option<String>,
}

impl LedgerEntry {
    pub fn new(project_id: ProjectId, kind: EntryKind, amount: Money, entry_date: NaiveDate) -> Self {
        Self {
            id: LedgerEntryId::new_v7(),
            project_id,
            kind,
            amount,
            entry_date,
            narration: None,
        }
    }

    /// Sets the narration text
    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// The fiscal quarter (1-4) a date falls in, April through March
pub fn fiscal_quarter(date: NaiveDate) -> u32 {
    match date.month() {
        4..=6 => 1,
        7..=9 => 2,
        10..=12 => 3,
        _ => 4,
    }
}

/// The fiscal year a date belongs to, named by its starting calendar year
pub fn fiscal_year(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Net ledger position: credits minus debits
pub fn net_amount<'a>(
    entries: impl IntoIterator<Item = &'a LedgerEntry>,
    currency: Currency,
) -> Result<Money, MoneyError> {
    let mut net = Money::zero(currency);
    for entry in entries {
        net = match entry.kind {
            EntryKind::Credit => net.checked_add(&entry.amount)?,
            EntryKind::Debit => net.checked_sub(&entry.amount)?,
        };
    }
    Ok(net)
}

/// Net ledger position restricted to one fiscal quarter
pub fn net_amount_for_quarter(
    entries: &[LedgerEntry],
    currency: Currency,
    year: i32,
    quarter: u32,
) -> Result<Money, MoneyError> {
    let in_quarter = entries.iter().filter(|entry| {
        fiscal_year(entry.entry_date) == year && fiscal_quarter(entry.entry_date) == quarter
    });
    net_amount(in_quarter, currency)
}
