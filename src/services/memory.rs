use async_trait::async_trait;
use std::collections::HashSet;

use crate::core::filters::{exclusion_set, last_matched_at};
use crate::models::{Candidate, Connection, Profile, UserId};
use crate::services::repository::{MentorRepository, RepositoryError};

/// In-memory snapshot of users and connections
///
/// Used for tests, benchmarks and local experimentation without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    profiles: Vec<Profile>,
    connections: Vec<Connection>,
}

impl InMemoryRepository {
    pub fn new(profiles: Vec<Profile>, connections: Vec<Connection>) -> Self {
        Self { profiles, connections }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

#[async_trait]
impl MentorRepository for InMemoryRepository {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn get_mentor_candidates(&self, mentee_id: UserId) -> Result<Vec<Candidate>, RepositoryError> {
        let excluded: HashSet<UserId> = exclusion_set(mentee_id, &self.connections);

        let candidates: Vec<Candidate> = self
            .profiles
            .iter()
            .filter(|p| p.roles.is_mentor() && p.id != mentee_id && !excluded.contains(&p.id))
            .map(|p| Candidate {
                profile: p.clone(),
                last_matched_at: last_matched_at(p.id, &self.connections),
            })
            .collect();

        tracing::debug!(
            "In-memory candidate pool for mentee {}: {} mentors ({} excluded)",
            mentee_id,
            candidates.len(),
            excluded.len()
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConnectionStatus, Role, RoleSet, Seniority};
    use chrono::{Duration, Utc};

    fn create_profile(id: UserId, roles: RoleSet) -> Profile {
        Profile {
            id,
            name: format!("User {}", id),
            roles,
            expertise: vec![],
            profession: None,
            seniority: Seniority::Entry,
            country: None,
            preferred_language: None,
        }
    }

    #[tokio::test]
    async fn test_get_profile() {
        let repo = InMemoryRepository::default()
            .with_profile(create_profile(1, RoleSet::new().with(Role::Mentee)));

        assert!(repo.get_profile(1).await.unwrap().is_some());
        assert!(repo.get_profile(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_candidates_are_filtered_and_annotated() {
        let matched_at = Utc::now() - Duration::days(3);
        let repo = InMemoryRepository::default()
            .with_profile(create_profile(1, RoleSet::new().with(Role::Mentee).with(Role::Mentor)))
            .with_profile(create_profile(2, RoleSet::new().with(Role::Mentor)))
            .with_profile(create_profile(3, RoleSet::new().with(Role::Mentor)))
            .with_profile(create_profile(4, RoleSet::new().with(Role::Mentee)))
            .with_connection(Connection {
                mentor_id: 2,
                mentee_id: 1,
                status: ConnectionStatus::Pending,
                created_at: Utc::now(),
            })
            .with_connection(Connection {
                mentor_id: 3,
                mentee_id: 4,
                status: ConnectionStatus::Accepted,
                created_at: matched_at,
            });

        let candidates = repo.get_mentor_candidates(1).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].profile.id, 3);
        assert_eq!(candidates[0].last_matched_at, Some(matched_at));
    }
}
