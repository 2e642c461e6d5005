//! Rate and term resolution
//!
//! Every period computation starts from one authoritative rate and term.
//! A project may carry its own billing detail row overriding the client's
//! configuration; resolution picks the override when it holds a non-zero
//! rate and falls back to the client otherwise. Nothing is cached, so
//! removing an override immediately restores the client values.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_client::{ClientBillingDetails, ServiceRateTerm};

/// Whether invoices for a project are grouped at the project or client level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingLevel {
    Project,
    Client,
}

impl BillingLevel {
    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "project" => Some(Self::Project),
            "client" => Some(Self::Client),
            _ => None,
        }
    }

    pub fn as_db_value(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Client => "client",
        }
    }
}

/// Per-project billing override
///
/// Both fields are optional; a zero or absent rate means "no rate override"
/// while the row itself may still carry a term override.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectBillingDetail {
    /// Overriding service rate, ignored when zero
    pub service_rate: Option<Money>,
    /// Overriding rate term
    pub service_rate_term: Option<ServiceRateTerm>,
}

impl ProjectBillingDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overriding rate
    pub fn with_rate(mut self, rate: Money) -> Self {
        self.service_rate = Some(rate);
        self
    }

    /// Sets the overriding term
    pub fn with_rate_term(mut self, term: ServiceRateTerm) -> Self {
        self.service_rate_term = Some(term);
        self
    }

    /// The override rate when it is present and non-zero
    pub fn effective_rate(&self) -> Option<&Money> {
        self.service_rate.as_ref().filter(|rate| !rate.is_zero())
    }
}

/// Which side supplied the resolved rate
///
/// The period-amount calculator keys its billing-cycle inference on this:
/// project-sourced rates read the cycle off the period length, client-sourced
/// rates read it off the client's billing frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Project,
    Client,
}

/// The authoritative rate and term for one project and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// The service rate to bill at
    pub rate: Money,
    /// The term the rate is quoted per, when one is configured anywhere
    pub term: Option<ServiceRateTerm>,
    /// Where the rate came from
    pub source: RateSource,
}

/// Resolves the rate and term for a project
///
/// Rate precedence: non-zero project override, else the client rate. Term
/// precedence: the override row's term, else the client term. The two are
/// resolved independently; an override row with only a term still bills at
/// the client rate.
pub fn resolve(
    client_details: &ClientBillingDetails,
    override_detail: Option<&ProjectBillingDetail>,
) -> ResolvedRate {
    let override_rate = override_detail.and_then(ProjectBillingDetail::effective_rate);

    let (rate, source) = match override_rate {
        Some(rate) => (*rate, RateSource::Project),
        None => (client_details.service_rate, RateSource::Client),
    };

    let term = override_detail
        .and_then(|detail| detail.service_rate_term)
        .or(client_details.service_rate_term);

    ResolvedRate { rate, term, source }
}
