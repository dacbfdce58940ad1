//! Injectable handle over a taxonomy.
//!
//! [`KeywordRouter`] is what services hold: a cheap-to-clone reference to an
//! immutable [`Taxonomy`] with the routing operations as methods.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use cafm_core::{Category, Classification, KeywordSuggestion};

use crate::classify::{best_category, category_scores, matched_keywords};
use crate::suggest::get_suggestions_with_limit;
use crate::taxonomy::Taxonomy;
use crate::tokenizer::ticket_tokens;

/// Keyword routing engine bound to one taxonomy.
///
/// Stateless apart from the shared, read-only taxonomy, so it is safe to call
/// from any number of request handlers at once.
#[derive(Debug, Clone)]
pub struct KeywordRouter {
    taxonomy: Arc<Taxonomy>,
}

impl KeywordRouter {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Category for a ticket's title and description.
    pub fn determine_category(&self, title: &str, description: &str) -> Category {
        self.classify(title, description).category
    }

    /// Known keywords found in a ticket's title and description.
    pub fn extract_keywords(&self, title: &str, description: &str) -> Vec<String> {
        let tokens = ticket_tokens(title, description);
        let keywords = matched_keywords(&self.taxonomy, &tokens);
        debug!(
            token_count = tokens.len(),
            keyword_count = keywords.len(),
            "Keywords extracted"
        );
        keywords
    }

    /// Category, keywords, and role in one pass over the text.
    pub fn classify(&self, title: &str, description: &str) -> Classification {
        let start = Instant::now();
        let tokens = ticket_tokens(title, description);
        let scores = category_scores(&self.taxonomy, &tokens);
        let (category, score) = best_category(&scores);
        let keywords = matched_keywords(&self.taxonomy, &tokens);
        let role = self.taxonomy.role_for(category).to_string();

        debug!(
            subsystem = "routing",
            component = "classifier",
            op = "classify",
            category = %category,
            score,
            role = %role,
            token_count = tokens.len(),
            keyword_count = keywords.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Ticket classified"
        );

        Classification {
            category,
            keywords,
            role,
        }
    }

    /// Up to ten autocomplete suggestions for `input`.
    pub fn get_suggestions(&self, input: &str) -> Vec<KeywordSuggestion> {
        self.get_suggestions_with_limit(input, cafm_core::defaults::SUGGESTION_LIMIT)
    }

    /// Autocomplete suggestions with a caller-chosen limit (at most ten).
    pub fn get_suggestions_with_limit(&self, input: &str, limit: usize) -> Vec<KeywordSuggestion> {
        let suggestions = get_suggestions_with_limit(&self.taxonomy, input, limit);
        debug!(
            subsystem = "routing",
            component = "suggester",
            op = "get_suggestions",
            input_len = input.chars().count(),
            result_count = suggestions.len(),
            "Suggestions computed"
        );
        suggestions
    }

    /// Role that handles `category`; the default role when it has no profile.
    pub fn get_role_for_category(&self, category: Category) -> &str {
        self.taxonomy.role_for(category)
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::new(Taxonomy::shared())
    }
}
