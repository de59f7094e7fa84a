use std::collections::BTreeSet;

/// Normalize a free-text tag for comparison
///
/// Returns `None` for tags that are empty after trimming.
#[inline]
pub fn normalize_tag(tag: &str) -> Option<String> {
    let normalized = tag.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Normalize a tag list into a sorted, de-duplicated set
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> BTreeSet<String> {
    tags.iter()
        .filter_map(|tag| normalize_tag(tag.as_ref()))
        .collect()
}

/// Jaccard similarity `|a ∩ b| / |a ∪ b|`, zero when both sets are empty
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Case-insensitive overlap between two expertise tag lists
///
/// # Returns
/// The Jaccard similarity and the shared normalized tags in sorted order
pub fn expertise_overlap<S: AsRef<str>>(mentee: &[S], mentor: &[S]) -> (f64, Vec<String>) {
    let mentee_tags = normalize_tags(mentee);
    let mentor_tags = normalize_tags(mentor);

    let shared: Vec<String> = mentee_tags.intersection(&mentor_tags).cloned().collect();

    (jaccard(&mentee_tags, &mentor_tags), shared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> BTreeSet<String> {
        normalize_tags(tags)
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("  Backend "), Some("backend".to_string()));
        assert_eq!(normalize_tag("   "), None);
    }

    #[test]
    fn test_normalize_tags_dedups() {
        let tags = set(&["Rust", "rust", " RUST", "Go"]);
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("rust"));
        assert!(tags.contains("go"));
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["a", "b"])), 1.0);
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["b", "c"])), 1.0 / 3.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&["b"])), 0.0);
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn test_expertise_overlap_is_case_insensitive() {
        let (score, shared) = expertise_overlap(&["Backend", "Databases"], &["backend", "Frontend"]);
        assert_eq!(score, 1.0 / 3.0);
        assert_eq!(shared, vec!["backend"]);
    }

    #[test]
    fn test_singleton_exact_match() {
        let (score, shared) = expertise_overlap(&["Backend"], &["Backend"]);
        assert_eq!(score, 1.0);
        assert_eq!(shared, vec!["backend"]);
    }
}
