use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::models::{Candidate, Connection, Profile, UserId};

/// Compute the set of mentors that must never be recommended to a mentee
///
/// Every mentor with a pending or accepted connection to the mentee is
/// excluded. A rejected connection does not exclude.
pub fn exclusion_set(mentee_id: UserId, connections: &[Connection]) -> HashSet<UserId> {
    connections
        .iter()
        .filter(|c| c.mentee_id == mentee_id && c.status.blocks_recommendation())
        .map(|c| c.mentor_id)
        .collect()
}

/// Most recent connection creation time naming this user as mentor, across all mentees
pub fn last_matched_at(mentor_id: UserId, connections: &[Connection]) -> Option<DateTime<Utc>> {
    connections
        .iter()
        .filter(|c| c.mentor_id == mentor_id)
        .map(|c| c.created_at)
        .max()
}

/// Check whether a candidate may be recommended to the mentee
///
/// Candidates must hold the mentor role, must not be the mentee, and must
/// not be in the mentee's exclusion set.
#[inline]
pub fn is_eligible_candidate(
    mentee: &Profile,
    candidate: &Candidate,
    exclusion: &HashSet<UserId>,
) -> bool {
    let profile = &candidate.profile;

    if !profile.roles.is_mentor() {
        return false;
    }

    if profile.id == mentee.id {
        return false;
    }

    !exclusion.contains(&profile.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConnectionStatus, Role, RoleSet, Seniority};
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn connection(mentor_id: UserId, mentee_id: UserId, status: ConnectionStatus, day: u32) -> Connection {
        Connection {
            mentor_id,
            mentee_id,
            status,
            created_at: ts(day),
        }
    }

    fn create_profile(id: UserId, roles: RoleSet) -> Profile {
        Profile {
            id,
            name: format!("User {}", id),
            roles,
            expertise: vec!["backend".to_string()],
            profession: None,
            seniority: Seniority::Entry,
            country: None,
            preferred_language: None,
        }
    }

    fn create_candidate(id: UserId, roles: RoleSet) -> Candidate {
        Candidate {
            profile: create_profile(id, roles),
            last_matched_at: None,
        }
    }

    #[test]
    fn test_exclusion_set_skips_rejected() {
        let connections = vec![
            connection(10, 1, ConnectionStatus::Pending, 1),
            connection(11, 1, ConnectionStatus::Accepted, 2),
            connection(12, 1, ConnectionStatus::Rejected, 3),
            connection(13, 2, ConnectionStatus::Accepted, 4),
        ];

        let excluded = exclusion_set(1, &connections);

        assert_eq!(excluded.len(), 2);
        assert!(excluded.contains(&10));
        assert!(excluded.contains(&11));
        assert!(!excluded.contains(&12));
        assert!(!excluded.contains(&13));
    }

    #[test]
    fn test_last_matched_at_spans_all_mentees() {
        let connections = vec![
            connection(10, 1, ConnectionStatus::Rejected, 1),
            connection(10, 2, ConnectionStatus::Pending, 9),
            connection(10, 3, ConnectionStatus::Accepted, 4),
            connection(11, 1, ConnectionStatus::Accepted, 20),
        ];

        assert_eq!(last_matched_at(10, &connections), Some(ts(9)));
        assert_eq!(last_matched_at(11, &connections), Some(ts(20)));
        assert_eq!(last_matched_at(12, &connections), None);
    }

    #[test]
    fn test_candidate_must_be_mentor() {
        let mentee = create_profile(1, RoleSet::new().with(Role::Mentee));
        let excluded = HashSet::new();

        let mentor = create_candidate(2, RoleSet::new().with(Role::Mentor));
        let other_mentee = create_candidate(3, RoleSet::new().with(Role::Mentee));

        assert!(is_eligible_candidate(&mentee, &mentor, &excluded));
        assert!(!is_eligible_candidate(&mentee, &other_mentee, &excluded));
    }

    #[test]
    fn test_self_is_never_eligible() {
        let both = RoleSet::new().with(Role::Mentor).with(Role::Mentee);
        let mentee = create_profile(1, both.clone());
        let candidate = create_candidate(1, both);

        assert!(!is_eligible_candidate(&mentee, &candidate, &HashSet::new()));
    }

    #[test]
    fn test_excluded_candidate_filtered() {
        let mentee = create_profile(1, RoleSet::new().with(Role::Mentee));
        let candidate = create_candidate(2, RoleSet::new().with(Role::Mentor));
        let excluded: HashSet<UserId> = [2].into_iter().collect();

        assert!(!is_eligible_candidate(&mentee, &candidate, &excluded));
    }
}
