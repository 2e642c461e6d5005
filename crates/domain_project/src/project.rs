//! Project aggregate
//!
//! A project belongs to a client and carries the team roster the hour
//! calculators read. Billing cares about two classifications: the project
//! type (retainer-style monthly vs fixed budget) and whether the engagement
//! is an annual maintenance contract.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, DateRange, ProjectId};

use crate::error::ProjectError;
use crate::hours;
use crate::team::{group_by_engagement, EngagementGroup, TeamMember};

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Inactive,
}

impl ProjectStatus {
    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn as_db_value(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Commercial shape of the engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// Billed per period from logged hours or contracted resources
    Monthly,
    /// Billed against a fixed contract value
    FixedBudget,
}

impl ProjectType {
    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "monthly" => Some(Self::Monthly),
            "fixed_budget" => Some(Self::FixedBudget),
            _ => None,
        }
    }

    pub fn as_db_value(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::FixedBudget => "fixed_budget",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::FixedBudget => "Fixed budget",
        }
    }
}

/// A client engagement with its team roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier
    pub id: ProjectId,
    /// Client the project is billed to
    pub client_id: ClientId,
    /// Display name
    pub name: String,
    /// Lifecycle status
    pub status: ProjectStatus,
    /// Commercial shape
    pub project_type: ProjectType,
    /// Whether this engagement is an annual maintenance contract
    pub is_amc: bool,
    /// Full roster, active and former members alike
    pub team: Vec<TeamMember>,
    /// When the project was created, the billing anchor before any invoice
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Creates a new active project with an empty roster
    pub fn new(client_id: ClientId, name: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            id: ProjectId::new_v7(),
            client_id,
            name: name.into(),
            status: ProjectStatus::Active,
            project_type,
            is_amc: false,
            team: Vec::new(),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Flags the project as an annual maintenance contract
    pub fn as_amc(mut self) -> Self {
        self.is_amc = true;
        self
    }

    /// Sets the full roster
    pub fn with_team(mut self, team: Vec<TeamMember>) -> Self {
        self.team = team;
        self
    }

    /// Overrides the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Adds a member to the roster
    pub fn add_member(&mut self, member: TeamMember) {
        self.team.push(member);
    }

    /// Whether the project is live for billing purposes
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active && self.deleted_at.is_none()
    }

    /// Members currently on the roster
    pub fn active_members(&self) -> Vec<&TeamMember> {
        self.team.iter().filter(|m| m.is_active()).collect()
    }

    /// Members who have rolled off
    pub fn former_members(&self) -> Vec<&TeamMember> {
        self.team.iter().filter(|m| !m.is_active()).collect()
    }

    /// Active roster condensed into engagement-percentage groups
    pub fn members_grouped_by_engagement(&self) -> Vec<EngagementGroup> {
        group_by_engagement(&self.team)
    }

    /// Marks the project deleted
    pub fn soft_delete(&mut self, at: DateTime<Utc>) -> Result<(), ProjectError> {
        if self.deleted_at.is_some() {
            return Err(ProjectError::AlreadyDeleted(self.id.to_string()));
        }
        self.deleted_at = Some(at);
        Ok(())
    }

    /// Expected hours for the active roster over a range
    pub fn expected_hours_for(&self, range: &DateRange) -> Decimal {
        hours::expected_hours_for(&self.team, range)
    }

    /// Hours logged by the full roster inside a range
    pub fn hours_booked_in(&self, range: &DateRange) -> Decimal {
        hours::hours_booked(&self.team, range)
    }

    /// Hours logged by the active roster for the running window
    pub fn live_hours_booked_in(&self, window: &DateRange) -> Decimal {
        hours::live_hours_booked(&self.team, window)
    }

    /// Billed-to-expected ratio over a completed range
    pub fn velocity_for(&self, range: &DateRange) -> Decimal {
        hours::velocity(self.hours_booked_in(range), self.expected_hours_for(range))
    }

    /// Billed-to-expected ratio for the running window
    pub fn live_velocity_for(&self, window: &DateRange) -> Decimal {
        hours::velocity(
            self.live_hours_booked_in(window),
            self.expected_hours_for(window),
        )
    }
}
