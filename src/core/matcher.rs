use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{Candidate, Profile, ScoredCandidate, ScoringWeights, UserId};
use crate::core::{filters::is_eligible_candidate, scoring::calculate_similarity};

/// Result of ranking a candidate pool
#[derive(Debug)]
pub struct RankResult {
    pub recommendations: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Mentor ranking orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility filter (mentor role, not self, not excluded)
/// 2. Similarity scoring
/// 3. Ordering: score descending, then least recently matched first
/// 4. Truncation to the requested limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank candidate mentors for a mentee
    ///
    /// # Arguments
    /// * `mentee` - The mentee's profile
    /// * `candidates` - Candidate mentors, normally already filtered by the repository
    /// * `limit` - Maximum number of recommendations; zero yields none
    pub fn rank(&self, mentee: &Profile, candidates: Vec<Candidate>, limit: usize) -> RankResult {
        self.rank_excluding(mentee, candidates, &HashSet::new(), limit)
    }

    /// Rank candidates, additionally dropping any id in `exclusion`
    pub fn rank_excluding(
        &self,
        mentee: &Profile,
        candidates: Vec<Candidate>,
        exclusion: &HashSet<UserId>,
        limit: usize,
    ) -> RankResult {
        let total_candidates = candidates.len();

        if limit == 0 {
            return RankResult {
                recommendations: Vec::new(),
                total_candidates,
            };
        }

        let mut recommendations: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter(|candidate| is_eligible_candidate(mentee, candidate, exclusion))
            .map(|candidate| {
                let (score, shared_expertise) =
                    calculate_similarity(mentee, &candidate.profile, &self.weights);
                ScoredCandidate::from_candidate(candidate, score, shared_expertise)
            })
            .collect();

        recommendations.sort_by(compare_recommendations);
        recommendations.truncate(limit);

        RankResult {
            recommendations,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Score descending, then `last_matched_at` ascending with never-matched first, then id
fn compare_recommendations(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.similarity_score
        .total_cmp(&a.similarity_score)
        .then_with(|| a.last_matched_at.cmp(&b.last_matched_at))
        .then_with(|| a.id.cmp(&b.id))
}
