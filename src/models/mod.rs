// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, Connection, ConnectionStatus, Profile, Role, RoleSet, ScoredCandidate,
    ScoringWeights, Seniority, UserId,
};
pub use requests::RecommendMentorsQuery;
pub use responses::{ErrorResponse, HealthResponse, RecommendMentorsResponse};
