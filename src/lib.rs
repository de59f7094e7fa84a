//! Mentor Match - mentor recommendation service for the mentorship network
//!
//! Ranks candidate mentors for a mentee by an additive similarity score,
//! excluding mentors the mentee already has a pending or accepted connection
//! with, and spreading ties toward mentors who have gone longest unmatched.

pub mod auth;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, calculate_similarity};
pub use models::{Candidate, Profile, ScoredCandidate, ScoringWeights, RecommendMentorsResponse};
pub use services::{InMemoryRepository, MentorRecommender, MentorRepository, RecommendError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.weights().expertise, 3.0);
    }
}
