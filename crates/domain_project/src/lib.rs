//! Project Domain
//!
//! This crate manages projects and the staffing data billing runs on: the
//! team roster with per-member expected daily effort and billing engagement,
//! logged actual effort, and the hours calculators (expected hours, billed
//! hours, velocity) that feed invoice amounts.
//!
//! Monetary computations live in `domain_billing`; this crate stops at hours.

pub mod effort;
pub mod error;
pub mod hours;
pub mod project;
pub mod team;

pub use effort::{EffortEntry, EffortLog};
pub use error::ProjectError;
pub use hours::{expected_hours, expected_hours_for, hours_booked, live_hours_booked, velocity};
pub use project::{Project, ProjectStatus, ProjectType};
pub use team::{Designation, EngagementGroup, TeamMember};
