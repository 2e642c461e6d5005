//! Project domain errors

use thiserror::Error;

/// Errors that can occur in the project domain
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Project with the given ID was not found
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Project is already soft-deleted
    #[error("Project already deleted: {0}")]
    AlreadyDeleted(String),

    /// Daily expected effort cannot be negative
    #[error("Invalid daily expected effort: {0}")]
    InvalidExpectedEffort(String),

    /// Billing engagement must fall between 0 and 100 percent
    #[error("Invalid billing engagement: {0}")]
    InvalidEngagement(String),

    /// Membership end date cannot precede the start date
    #[error("Member ended {ended_on} before starting {started_on}")]
    EndedBeforeStarted { started_on: String, ended_on: String },
}

impl ProjectError {
    /// Creates a ProjectNotFound error from any ID type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ProjectError::ProjectNotFound(id.to_string())
    }
}
