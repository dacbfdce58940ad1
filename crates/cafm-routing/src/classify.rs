//! Keyword classification and extraction.
//!
//! A category's score is the number of its distinct keywords present among
//! the ticket tokens. Token frequency does not matter. The highest score wins
//! and ties go to the category declared first in the taxonomy. A ticket with
//! no keyword hit is `General`.

use std::collections::HashSet;

use tracing::trace;

use cafm_core::Category;

use crate::taxonomy::Taxonomy;
use crate::tokenizer::ticket_tokens;

/// Per-category scores in taxonomy declaration order.
pub fn category_scores(taxonomy: &Taxonomy, tokens: &HashSet<String>) -> Vec<(Category, usize)> {
    taxonomy
        .profiles()
        .iter()
        .map(|profile| {
            let score = profile
                .keywords
                .iter()
                .filter(|k| tokens.contains(k.as_str()))
                .count();
            trace!(category = %profile.category, score, "Category scored");
            (profile.category, score)
        })
        .collect()
}

/// Pick the winning category from declaration-ordered scores.
///
/// A later category replaces the current best only with a strictly greater
/// score, so the first maximum wins. Zero everywhere yields `General`.
pub fn best_category(scores: &[(Category, usize)]) -> (Category, usize) {
    scores
        .iter()
        .fold((Category::General, 0), |best, &(category, score)| {
            if score > best.1 {
                (category, score)
            } else {
                best
            }
        })
}

/// Classify ticket text into a category.
pub fn determine_category(taxonomy: &Taxonomy, title: &str, description: &str) -> Category {
    let tokens = ticket_tokens(title, description);
    best_category(&category_scores(taxonomy, &tokens)).0
}

/// Every known keyword present in the ticket text, across all profiles.
///
/// Returned in profile-then-keyword declaration order; a keyword shared by
/// several profiles appears once, at its first position.
pub fn extract_keywords(taxonomy: &Taxonomy, title: &str, description: &str) -> Vec<String> {
    let tokens = ticket_tokens(title, description);
    matched_keywords(taxonomy, &tokens)
}

/// Keywords present in an already tokenized ticket.
pub fn matched_keywords(taxonomy: &Taxonomy, tokens: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    taxonomy
        .keyword_entries()
        .filter(|(keyword, _)| tokens.contains(*keyword) && seen.insert(*keyword))
        .map(|(keyword, _)| keyword.to_string())
        .collect()
}
