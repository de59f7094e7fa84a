// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod overlap;
pub mod scoring;

pub use filters::{exclusion_set, is_eligible_candidate, last_matched_at};
pub use matcher::{Matcher, RankResult};
pub use overlap::{expertise_overlap, jaccard, normalize_tag, normalize_tags};
pub use scoring::calculate_similarity;
