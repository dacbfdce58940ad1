//! Property-style tests for the keyword routing engine over the standard
//! taxonomy.
//!
//! These exercise the public API the way the ticket workflow uses it:
//! - classification and extraction of realistic ticket texts
//! - per-profile round trips (a text made of one profile's keywords)
//! - suggestion ordering and limits
//! - role resolution for every category

use std::collections::HashSet;

use cafm_core::defaults;
use cafm_routing::{
    determine_category, extract_keywords, get_role_for_category, get_suggestions, Category,
    KeywordRouter, Taxonomy,
};

fn standard() -> &'static Taxonomy {
    Taxonomy::standard()
}

#[test]
fn test_text_without_keywords_is_general() {
    let texts = [
        ("", ""),
        ("Hello", "Thanks for the quick turnaround last week"),
        ("???", "!!! ... ,,,"),
        ("a b c", "de fg hi"),
    ];
    for (title, description) in texts {
        assert_eq!(
            determine_category(standard(), title, description),
            Category::General,
            "expected General for {:?}",
            (title, description)
        );
    }
}

#[test]
fn test_single_profile_text_routes_to_that_profile() {
    for profile in standard().profiles() {
        let text = profile.keywords.join(" ");

        assert_eq!(
            determine_category(standard(), &text, ""),
            profile.category,
            "full keyword text for {} routed elsewhere",
            profile.category
        );

        let extracted: HashSet<String> = extract_keywords(standard(), &text, "")
            .into_iter()
            .collect();
        let expected: HashSet<String> = profile.keywords.iter().cloned().collect();
        assert_eq!(extracted, expected, "extraction for {}", profile.category);
    }
}

#[test]
fn test_realistic_tickets() {
    let cases = [
        (
            "Leaking pipe in kitchen",
            "There is a water leak near the sink",
            Category::Plumbing,
        ),
        (
            "Lights flickering",
            "The breaker trips whenever the outlet in room 12 is used",
            Category::Electrical,
        ),
        (
            "Coffee spill",
            "Someone spilled coffee, the carpet has a stain and needs cleaning",
            Category::Cleaning,
        ),
        (
            "Broken chair",
            "Replace the damaged chair at desk 4",
            Category::AssetManagement,
        ),
        (
            "Too hot in office",
            "Air conditioning not working, thermostat shows 30 degrees",
            Category::Hvac,
        ),
        (
            "Badge not working",
            "My access badge no longer opens the gate",
            Category::Security,
        ),
        (
            "Printer offline",
            "The network printer on floor 2 shows an error, laptop cannot connect",
            Category::It,
        ),
    ];

    for (title, description, expected) in cases {
        assert_eq!(
            determine_category(standard(), title, description),
            expected,
            "{} / {}",
            title,
            description
        );
    }
}

#[test]
fn test_scenario_keywords() {
    let keywords = extract_keywords(
        standard(),
        "Leaking pipe in kitchen",
        "There is a water leak near the sink",
    );
    assert_eq!(keywords, vec!["leak", "pipe", "water", "sink"]);
}

#[test]
fn test_punctuation_and_case_do_not_matter() {
    let plain = determine_category(standard(), "toilet clogged", "flush broken");
    let noisy = determine_category(standard(), "TOILET!!! clogged???", "flush... (BROKEN)");
    assert_eq!(plain, noisy);
    assert_eq!(plain, Category::Plumbing);
}

#[test]
fn test_repeated_calls_are_identical() {
    let router = KeywordRouter::default();
    let first = router.classify("Server room too hot", "the fan stopped and the cooling failed");
    for _ in 0..5 {
        assert_eq!(
            router.classify("Server room too hot", "the fan stopped and the cooling failed"),
            first
        );
    }
}

#[test]
fn test_suggestions_empty_for_short_input() {
    assert!(get_suggestions(standard(), "").is_empty());
    assert!(get_suggestions(standard(), "a").is_empty());
}

#[test]
fn test_suggestions_water_exact_first() {
    let results = get_suggestions(standard(), "water");
    let first = &results[0];
    assert_eq!(first.keyword, "water");
    assert_eq!(first.category, Category::Plumbing);
    assert_eq!(first.relevance, 100);
}

#[test]
fn test_suggestions_bounded_and_ordered_for_every_two_letter_prefix() {
    let letters: Vec<char> = ('a'..='z').collect();
    for a in &letters {
        for b in &letters {
            let input = format!("{}{}", a, b);
            let results = get_suggestions(standard(), &input);
            assert!(results.len() <= defaults::SUGGESTION_LIMIT);
            for pair in results.windows(2) {
                assert!(
                    pair[0].relevance > pair[1].relevance
                        || (pair[0].relevance == pair[1].relevance
                            && pair[0].keyword <= pair[1].keyword),
                    "bad order for {}: {:?}",
                    input,
                    results
                );
            }
            assert!(results.iter().all(|s| s.relevance > 0 && s.relevance <= 100));
        }
    }
}

#[test]
fn test_roles() {
    assert_eq!(get_role_for_category(Category::General), defaults::DEFAULT_ROLE);
    assert_eq!(get_role_for_category(Category::Plumbing), "Plumber");
    for category in Category::ALL {
        assert!(!get_role_for_category(category).is_empty());
    }
}
