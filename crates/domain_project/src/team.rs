//! Project team roster
//!
//! Roster rows tie a user to a project with the staffing attributes billing
//! reads: expected daily effort in hours, billing engagement as a percentage
//! of full allocation, and the membership period. A member with no `ended_on`
//! date is active; former members stay on the roster because their logged
//! effort still counts toward completed billing windows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{TeamMemberId, UserId};

use crate::effort::EffortLog;
use crate::error::ProjectError;

/// Role of a team member on a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Designation {
    ProjectManager,
    Developer,
    Designer,
}

impl Designation {
    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "project_manager" => Some(Designation::ProjectManager),
            "developer" => Some(Designation::Developer),
            "designer" => Some(Designation::Designer),
            _ => None,
        }
    }

    pub fn as_db_value(&self) -> &'static str {
        match self {
            Designation::ProjectManager => "project_manager",
            Designation::Developer => "developer",
            Designation::Designer => "designer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Designation::ProjectManager => "Project Manager",
            Designation::Developer => "Developer",
            Designation::Designer => "Designer",
        }
    }
}

/// One roster entry on a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Roster entry identifier
    pub id: TeamMemberId,
    /// The staffed user
    pub user_id: UserId,
    /// Role on the project
    pub designation: Designation,
    /// Hours this member is expected to put in per working day
    pub daily_expected_effort: Decimal,
    /// Share of a full allocation billed to the client, in percent (0-100)
    pub billing_engagement: Decimal,
    /// First day on the project
    pub started_on: NaiveDate,
    /// Last day on the project, `None` while the member is active
    pub ended_on: Option<NaiveDate>,
    /// Logged actual effort, `None` when effort tracking never ran for this
    /// member
    pub effort_log: Option<EffortLog>,
}

impl TeamMember {
    /// Creates an active roster entry, validating the staffing attributes
    pub fn new(
        user_id: UserId,
        designation: Designation,
        daily_expected_effort: Decimal,
        billing_engagement: Decimal,
        started_on: NaiveDate,
    ) -> Result<Self, ProjectError> {
        if daily_expected_effort.is_sign_negative() {
            return Err(ProjectError::InvalidExpectedEffort(
                daily_expected_effort.to_string(),
            ));
        }
        if billing_engagement.is_sign_negative() || billing_engagement > dec!(100) {
            return Err(ProjectError::InvalidEngagement(
                billing_engagement.to_string(),
            ));
        }
        Ok(Self {
            id: TeamMemberId::new_v7(),
            user_id,
            designation,
            daily_expected_effort,
            billing_engagement,
            started_on,
            ended_on: None,
            effort_log: None,
        })
    }

    /// Attaches the member's effort log
    pub fn with_effort_log(mut self, log: EffortLog) -> Self {
        self.effort_log = Some(log);
        self
    }

    /// Closes the membership on the given date
    pub fn end_on(&mut self, date: NaiveDate) -> Result<(), ProjectError> {
        if date < self.started_on {
            return Err(ProjectError::EndedBeforeStarted {
                started_on: self.started_on.to_string(),
                ended_on: date.to_string(),
            });
        }
        self.ended_on = Some(date);
        Ok(())
    }

    /// Whether the member is currently on the project
    pub fn is_active(&self) -> bool {
        self.ended_on.is_none()
    }
}

/// Roster members sharing one billing engagement, counted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementGroup {
    /// The shared engagement percentage
    pub billing_engagement: Decimal,
    /// How many active members bill at it
    pub resource_count: u32,
}

/// Groups the active roster by billing engagement
///
/// Resource-based billing prices each group as a whole instead of walking
/// members one by one.
pub fn group_by_engagement(members: &[TeamMember]) -> Vec<EngagementGroup> {
    let mut groups: BTreeMap<Decimal, u32> = BTreeMap::new();
    for member in members.iter().filter(|m| m.is_active()) {
        *groups.entry(member.billing_engagement).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|(billing_engagement, resource_count)| EngagementGroup {
            billing_engagement,
            resource_count,
        })
        .collect()
}
