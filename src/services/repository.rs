use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Candidate, Profile, UserId};

/// Errors raised by a user/connection repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of users and mentorship connections
#[async_trait]
pub trait MentorRepository: Send + Sync {
    /// Fetch a user's profile, or `None` when the id is unknown
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError>;

    /// Fetch every mentor eligible for the mentee
    ///
    /// Implementations exclude the mentee itself and every mentor holding a
    /// pending or accepted connection to the mentee, and annotate each row
    /// with its most recent connection creation time.
    async fn get_mentor_candidates(&self, mentee_id: UserId) -> Result<Vec<Candidate>, RepositoryError>;

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        Ok(true)
    }
}
