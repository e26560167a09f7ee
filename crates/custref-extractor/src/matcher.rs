//! Vocabulary matching
//!
//! Maps free-text categorical values onto a controlled vocabulary. A
//! case-insensitive exact hit always wins. Otherwise the entry with the
//! highest normalized edit-distance similarity is taken, provided it reaches
//! [`SIMILARITY_THRESHOLD`].

/// Minimum similarity (0..=1) for an approximate match
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Matches values against one controlled vocabulary
#[derive(Debug, Clone, Copy)]
pub struct VocabularyMatcher<'a> {
    vocabulary: &'a [String],
}

impl<'a> VocabularyMatcher<'a> {
    /// Create a matcher over an ordered vocabulary
    pub fn new(vocabulary: &'a [String]) -> Self {
        Self { vocabulary }
    }

    /// Canonical entry for `input`, in the vocabulary's original casing
    ///
    /// Returns `None` for empty input, an empty vocabulary, or when no entry
    /// is similar enough. On equal similarity the earlier entry wins.
    pub fn find(&self, input: &str) -> Option<&'a str> {
        let input = input.trim();
        if input.is_empty() || self.vocabulary.is_empty() {
            return None;
        }
        let needle = input.to_lowercase();

        if let Some(exact) = self
            .vocabulary
            .iter()
            .find(|entry| entry.to_lowercase() == needle)
        {
            return Some(exact.as_str());
        }

        let mut best: Option<(&'a str, f64)> = None;
        for entry in self.vocabulary {
            let score = similarity(&needle, &entry.to_lowercase());
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((entry.as_str(), score));
            }
        }

        best.filter(|(_, score)| *score >= SIMILARITY_THRESHOLD)
            .map(|(entry, _)| entry)
    }
}

/// Normalized similarity: `1 - distance / max_len`, 1.0 for two empty strings
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Edit distance over chars (insert, delete, substitute)
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vocab(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let v = vocab(&["Oracle", "SAP"]);
        assert_eq!(VocabularyMatcher::new(&v).find("oracle"), Some("Oracle"));
        assert_eq!(VocabularyMatcher::new(&v).find("sap"), Some("SAP"));
    }

    #[test]
    fn test_close_match_above_threshold() {
        let v = vocab(&["Oracle", "SAP"]);
        assert_eq!(VocabularyMatcher::new(&v).find("oracl"), Some("Oracle"));
    }

    #[test]
    fn test_no_match() {
        let v = vocab(&["Oracle", "SAP"]);
        assert_eq!(VocabularyMatcher::new(&v).find("xyz123"), None);
    }

    #[test]
    fn test_empty_input_or_vocabulary() {
        let v = vocab(&["Oracle"]);
        assert_eq!(VocabularyMatcher::new(&v).find(""), None);
        assert_eq!(VocabularyMatcher::new(&v).find("   "), None);
        assert_eq!(VocabularyMatcher::new(&[]).find("Oracle"), None);
    }

    #[test]
    fn test_exact_beats_earlier_fuzzy_candidate() {
        // "Saps" is a close match and comes first
        let v = vocab(&["Saps", "SAP"]);
        assert_eq!(VocabularyMatcher::new(&v).find("sap"), Some("SAP"));
    }

    #[test]
    fn test_ties_go_to_first_entry() {
        let v = vocab(&["Retail", "Retaix"]);
        // "retaiz" is one substitution away from both
        assert_eq!(VocabularyMatcher::new(&v).find("retaiz"), Some("Retail"));
    }

    #[test]
    fn test_similarity_values() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert!((similarity("oracl", "oracle") - 5.0 / 6.0).abs() < 1e-9);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("retail", "retial"), 2);
    }

    proptest! {
        #[test]
        fn prop_exact_hit_returns_vocabulary_casing(idx in 0usize..4, upper in any::<bool>()) {
            let v = vocab(&["Manufacturing", "Retail", "MS Dynamics", "Readsoft Invoices"]);
            let input = if upper { v[idx].to_uppercase() } else { v[idx].to_lowercase() };
            prop_assert_eq!(VocabularyMatcher::new(&v).find(&input), Some(v[idx].as_str()));
        }

        #[test]
        fn prop_similarity_is_symmetric_and_bounded(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
            prop_assert_eq!(s, similarity(&b, &a));
        }
    }
}
