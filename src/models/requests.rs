use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the recommendations endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendMentorsQuery {
    /// Non-positive values yield an empty list
    #[validate(range(max = 100))]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl RecommendMentorsQuery {
    /// Resolve the effective limit, clamping negative values to zero
    pub fn effective_limit(&self, default_limit: usize) -> usize {
        match self.limit {
            Some(limit) => usize::try_from(limit).unwrap_or(0),
            None => default_limit,
        }
    }
}
