//! Keyword autocomplete suggestions.
//!
//! Scores every `(keyword, category)` pair of the taxonomy against a partial
//! input with a fixed precedence (first matching rule wins):
//!
//! | Condition | Relevance |
//! |-----------|-----------|
//! | keyword equals input | 100 |
//! | keyword starts with input | 80 |
//! | keyword contains input | 60 |
//! | input contains keyword | 40 |
//! | otherwise | excluded |
//!
//! Results are ordered by relevance descending, then keyword ascending, and
//! capped at [`defaults::SUGGESTION_LIMIT`]. The table holds a few hundred
//! entries at most, so a linear scan per keystroke is enough.

use cafm_core::{defaults, KeywordSuggestion};

use crate::taxonomy::Taxonomy;

/// Relevance of `keyword` for a lower-cased `input`. Zero means no match.
pub fn relevance(keyword: &str, input: &str) -> u8 {
    if keyword == input {
        defaults::RELEVANCE_EXACT
    } else if keyword.starts_with(input) {
        defaults::RELEVANCE_PREFIX
    } else if keyword.contains(input) {
        defaults::RELEVANCE_CONTAINS
    } else if input.contains(keyword) {
        defaults::RELEVANCE_CONTAINED
    } else {
        0
    }
}

/// Up to ten suggestions for a partially typed keyword.
///
/// Input is trimmed first; blank input or input shorter than
/// [`defaults::MIN_SUGGESTION_INPUT_LEN`] characters yields nothing.
pub fn get_suggestions(taxonomy: &Taxonomy, input: &str) -> Vec<KeywordSuggestion> {
    get_suggestions_with_limit(taxonomy, input, defaults::SUGGESTION_LIMIT)
}

/// Like [`get_suggestions`] with a caller-chosen limit, clamped to
/// `1..=SUGGESTION_LIMIT`.
pub fn get_suggestions_with_limit(
    taxonomy: &Taxonomy,
    input: &str,
    limit: usize,
) -> Vec<KeywordSuggestion> {
    let trimmed = input.trim();
    if trimmed.chars().count() < defaults::MIN_SUGGESTION_INPUT_LEN {
        return Vec::new();
    }
    let needle = trimmed.to_lowercase();

    let mut suggestions: Vec<KeywordSuggestion> = taxonomy
        .keyword_entries()
        .filter_map(|(keyword, category)| {
            let score = relevance(keyword, &needle);
            (score > 0).then(|| KeywordSuggestion {
                keyword: keyword.to_string(),
                category,
                relevance: score,
            })
        })
        .collect();

    // Stable: equal (relevance, keyword) pairs keep taxonomy order
    suggestions.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    suggestions.truncate(limit.clamp(1, defaults::SUGGESTION_LIMIT));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafm_core::Category;

    fn standard() -> &'static Taxonomy {
        Taxonomy::standard()
    }

    #[test]
    fn test_relevance_precedence() {
        assert_eq!(relevance("water", "water"), 100);
        assert_eq!(relevance("thermostat", "therm"), 80);
        assert_eq!(relevance("thermostat", "stat"), 60);
        assert_eq!(relevance("water", "waterproof"), 40);
        assert_eq!(relevance("water", "fire"), 0);
    }

    #[test]
    fn test_relevance_exact_beats_prefix() {
        // An exact match is also a prefix match; exact must win
        assert_eq!(relevance("leak", "leak"), defaults::RELEVANCE_EXACT);
    }

    #[test]
    fn test_short_input_returns_nothing() {
        assert!(get_suggestions(standard(), "").is_empty());
        assert!(get_suggestions(standard(), "a").is_empty());
        assert!(get_suggestions(standard(), "   ").is_empty());
        assert!(get_suggestions(standard(), " a ").is_empty());
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let results = get_suggestions(standard(), "water");
        assert_eq!(
            results[0],
            KeywordSuggestion {
                keyword: "water".to_string(),
                category: Category::Plumbing,
                relevance: 100,
            }
        );
    }

    #[test]
    fn test_input_is_case_insensitive() {
        let results = get_suggestions(standard(), "WaTeR");
        assert_eq!(results[0].keyword, "water");
        assert_eq!(results[0].relevance, 100);
    }

    #[test]
    fn test_prefix_only() {
        let results = get_suggestions(standard(), "therm");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].keyword, "thermostat");
        assert_eq!(results[0].category, Category::Hvac);
        assert_eq!(results[0].relevance, 80);
    }

    #[test]
    fn test_substring_only() {
        let results = get_suggestions(standard(), "stat");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].keyword, "thermostat");
        assert_eq!(results[0].relevance, 60);
    }

    #[test]
    fn test_input_contains_keyword() {
        let results = get_suggestions(standard(), "waterproof");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].keyword, "water");
        assert_eq!(results[0].relevance, 40);
    }

    #[test]
    fn test_shared_keyword_yields_entry_per_category() {
        let results = get_suggestions(standard(), "access");
        let exact: Vec<&KeywordSuggestion> =
            results.iter().filter(|s| s.relevance == 100).collect();
        assert_eq!(exact.len(), 2);
        assert_eq!(exact[0].category, Category::Security);
        assert_eq!(exact[1].category, Category::It);
    }

    #[test]
    fn test_capped_at_ten_and_sorted() {
        let results = get_suggestions(standard(), "er");
        assert_eq!(results.len(), 10);
        for pair in results.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.relevance > b.relevance
                    || (a.relevance == b.relevance && a.keyword <= b.keyword),
                "out of order: {:?} before {:?}",
                a,
                b
            );
        }
        // No keyword starts with "er", so everything is a substring hit
        assert_eq!(results[0].keyword, "boiler");
        assert!(results.iter().all(|s| s.relevance == 60));
    }

    #[test]
    fn test_relevance_groups_sort_before_keyword() {
        let results = get_suggestions(standard(), "lock");
        assert_eq!(results[0].keyword, "lock");
        assert_eq!(results[0].relevance, 100);
        let rest: Vec<(&str, u8)> = results[1..]
            .iter()
            .map(|s| (s.keyword.as_str(), s.relevance))
            .collect();
        assert_eq!(rest, vec![("locked", 80), ("locker", 80)]);
    }

    #[test]
    fn test_custom_limit_is_clamped() {
        assert_eq!(get_suggestions_with_limit(standard(), "er", 3).len(), 3);
        assert_eq!(get_suggestions_with_limit(standard(), "er", 0).len(), 1);
        assert_eq!(get_suggestions_with_limit(standard(), "er", 500).len(), 10);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(get_suggestions(standard(), "zzzz").is_empty());
    }
}
