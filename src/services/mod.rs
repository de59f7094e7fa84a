// Service exports
pub mod memory;
pub mod postgres;
pub mod recommender;
pub mod repository;

pub use memory::InMemoryRepository;
pub use postgres::PostgresClient;
pub use recommender::{MentorRecommender, RecommendError, DEFAULT_RECOMMENDATION_LIMIT};
pub use repository::{MentorRepository, RepositoryError};
