use std::sync::Arc;
use thiserror::Error;

use crate::core::Matcher;
use crate::models::{ScoredCandidate, UserId};
use crate::services::repository::{MentorRepository, RepositoryError};

/// Number of recommendations returned when the caller does not choose
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Errors that can occur while recommending mentors
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Mentee not found: {0}")]
    MenteeNotFound(UserId),

    #[error("User {0} does not hold the mentee role")]
    NotMentee(UserId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Mentor recommendation engine
///
/// Stateless and read-only: every call reads a fresh snapshot from the
/// repository and ranks it in memory. Scores are never persisted.
#[derive(Clone)]
pub struct MentorRecommender {
    repository: Arc<dyn MentorRepository>,
    matcher: Matcher,
}

impl MentorRecommender {
    pub fn new(repository: Arc<dyn MentorRepository>, matcher: Matcher) -> Self {
        Self { repository, matcher }
    }

    pub fn repository(&self) -> &Arc<dyn MentorRepository> {
        &self.repository
    }

    /// Recommend up to `limit` mentors for a mentee
    ///
    /// # Errors
    /// * `MenteeNotFound` if the id does not resolve to a user
    /// * `NotMentee` if the user holds no mentee role
    /// * `Repository` if a read fails; not retried
    pub async fn recommend_mentors(
        &self,
        mentee_id: UserId,
        limit: usize,
    ) -> Result<Vec<ScoredCandidate>, RecommendError> {
        let mentee = self
            .repository
            .get_profile(mentee_id)
            .await?
            .ok_or(RecommendError::MenteeNotFound(mentee_id))?;

        if !mentee.roles.is_mentee() {
            return Err(RecommendError::NotMentee(mentee_id));
        }

        if limit == 0 {
            return Ok(Vec::new());
        }

        let candidates = self.repository.get_mentor_candidates(mentee_id).await?;

        let result = self.matcher.rank(&mentee, candidates, limit);

        tracing::debug!(
            "Ranked {} of {} candidates for mentee {}",
            result.recommendations.len(),
            result.total_candidates,
            mentee_id
        );

        Ok(result.recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, Profile, Role, RoleSet, Seniority};
    use async_trait::async_trait;

    struct FailingRepository;

    #[async_trait]
    impl MentorRepository for FailingRepository {
        async fn get_profile(&self, _user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
            Ok(Some(Profile {
                id: 1,
                name: "Mentee".to_string(),
                roles: RoleSet::new().with(Role::Mentee),
                expertise: vec![],
                profession: None,
                seniority: Seniority::Entry,
                country: None,
                preferred_language: None,
            }))
        }

        async fn get_mentor_candidates(&self, _mentee_id: UserId) -> Result<Vec<Candidate>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_repository_error_propagates() {
        let recommender = MentorRecommender::new(Arc::new(FailingRepository), Matcher::default());

        let err = recommender.recommend_mentors(1, 5).await.unwrap_err();

        assert!(matches!(err, RecommendError::Repository(RepositoryError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_zero_limit_skips_candidate_read() {
        let recommender = MentorRecommender::new(Arc::new(FailingRepository), Matcher::default());

        let result = recommender.recommend_mentors(1, 0).await.unwrap();

        assert!(result.is_empty());
    }
}
