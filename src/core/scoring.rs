use crate::models::{Profile, ScoringWeights};
use crate::core::overlap::{expertise_overlap, normalize_tag, normalize_tags};

/// Calculate the similarity score of a mentor for a mentee
///
/// Scoring rule table (additive, independent contributions):
/// ```text
/// expertise           weights.expertise * jaccard(mentee tags, mentor tags)
/// profession          weights.profession when both present and equal
/// seniority           Senior 1.5 / Mid-level 1.0 / Entry 0
/// country             2 when both present and equal, 1 otherwise
/// preferred language  1 when the mentee's language is among the mentor's tags
/// ```
///
/// There is no normalization; scores are only comparable within a single
/// recommendation call.
///
/// # Returns
/// The score and the expertise tags both profiles share
pub fn calculate_similarity(
    mentee: &Profile,
    mentor: &Profile,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let (overlap, shared_expertise) = expertise_overlap(&mentee.expertise, &mentor.expertise);
    let expertise_score = overlap * weights.expertise;

    let profession_score = if matching_field(&mentee.profession, &mentor.profession) {
        weights.profession
    } else {
        0.0
    };

    let seniority_score = weights.seniority(mentor.seniority);

    let country_score = if matching_field(&mentee.country, &mentor.country) {
        weights.country_match
    } else {
        weights.country_mismatch
    };

    let language_score = if speaks_preferred_language(mentee, mentor) {
        weights.preferred_language
    } else {
        0.0
    };

    let total = expertise_score + profession_score + seniority_score + country_score + language_score;

    (total, shared_expertise)
}

/// Exact equality of two optional category fields; absent never matches
#[inline]
fn matching_field(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[inline]
fn speaks_preferred_language(mentee: &Profile, mentor: &Profile) -> bool {
    let Some(language) = mentee.preferred_language.as_deref().and_then(normalize_tag) else {
        return false;
    };

    normalize_tags(&mentor.expertise).contains(&language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, RoleSet, Seniority};

    fn create_profile(
        expertise: &[&str],
        profession: Option<&str>,
        seniority: Seniority,
        country: Option<&str>,
    ) -> Profile {
        Profile {
            id: 1,
            name: "Test User".to_string(),
            roles: RoleSet::new().with(Role::Mentor),
            expertise: expertise.iter().map(|s| s.to_string()).collect(),
            profession: profession.map(String::from),
            seniority,
            country: country.map(String::from),
            preferred_language: None,
        }
    }

    #[test]
    fn test_full_match_score() {
        let mentee = create_profile(&["Backend"], Some("Engineer"), Seniority::MidLevel, Some("Korea"));
        let mentor = create_profile(&["Backend"], Some("Engineer"), Seniority::Senior, Some("Korea"));

        let (score, shared) = calculate_similarity(&mentee, &mentor, &ScoringWeights::default());

        assert_eq!(score, 8.5);
        assert_eq!(shared, vec!["backend"]);
    }

    #[test]
    fn test_partial_country_credit() {
        let mentee = create_profile(&["Backend"], Some("Engineer"), Seniority::MidLevel, Some("Korea"));
        let mentor = create_profile(&["Design"], Some("Engineer"), Seniority::Entry, Some("USA"));

        let (score, shared) = calculate_similarity(&mentee, &mentor, &ScoringWeights::default());

        assert_eq!(score, 3.0);
        assert!(shared.is_empty());
    }

    #[test]
    fn test_missing_fields_never_match() {
        let mentee = create_profile(&[], None, Seniority::Entry, None);
        let mentor = create_profile(&[], None, Seniority::Entry, None);

        let (score, _) = calculate_similarity(&mentee, &mentor, &ScoringWeights::default());

        // Only the different-country partial credit applies
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_expertise_overlap_is_proportional() {
        let mentee = create_profile(&["rust", "go"], None, Seniority::Entry, Some("Korea"));
        let mentor = create_profile(&["Rust", "python"], None, Seniority::Entry, Some("Korea"));

        let (score, shared) = calculate_similarity(&mentee, &mentor, &ScoringWeights::default());

        assert_eq!(score, 3.0 / 3.0 + 2.0);
        assert_eq!(shared, vec!["rust"]);
    }

    #[test]
    fn test_preferred_language_bonus() {
        let mut mentee = create_profile(&["backend"], None, Seniority::Entry, Some("Korea"));
        let mentor = create_profile(&["backend", "Korean"], None, Seniority::Entry, Some("Korea"));

        let (without, _) = calculate_similarity(&mentee, &mentor, &ScoringWeights::default());

        mentee.preferred_language = Some("korean".to_string());
        let (with, _) = calculate_similarity(&mentee, &mentor, &ScoringWeights::default());

        assert_eq!(with - without, 1.0);
    }

    #[test]
    fn test_seniority_weights() {
        let mentee = create_profile(&[], None, Seniority::Entry, Some("Korea"));
        let weights = ScoringWeights::default();

        let score_for = |seniority| {
            let mentor = create_profile(&[], None, seniority, Some("Korea"));
            calculate_similarity(&mentee, &mentor, &weights).0
        };

        assert_eq!(score_for(Seniority::Senior) - score_for(Seniority::Entry), 1.5);
        assert_eq!(score_for(Seniority::MidLevel) - score_for(Seniority::Entry), 1.0);
    }
}
