//! # cafm-routing
//!
//! Keyword-based classification and routing engine for CAFM tickets.
//!
//! This crate provides:
//! - A compiled-in taxonomy mapping each category to a role and keywords
//! - Ticket classification by distinct keyword hits
//! - Keyword extraction across every category profile
//! - Ranked autocomplete suggestions for partial input
//! - Role resolution for auto-assignment
//!
//! Every operation is a pure function over the taxonomy and its input and
//! never fails.
//!
//! ## Example
//!
//! ```
//! use cafm_routing::{Category, KeywordRouter};
//!
//! let router = KeywordRouter::default();
//!
//! let result = router.classify(
//!     "Leaking pipe in kitchen",
//!     "There is a water leak near the sink",
//! );
//! assert_eq!(result.category, Category::Plumbing);
//! assert_eq!(router.get_role_for_category(result.category), "Plumber");
//!
//! let suggestions = router.get_suggestions("water");
//! assert_eq!(suggestions[0].relevance, 100);
//! ```

pub mod classify;
pub mod router;
pub mod suggest;
pub mod taxonomy;
pub mod tokenizer;

// Re-export the core types the engine speaks in
pub use cafm_core::{Category, Classification, KeywordSuggestion};

pub use classify::{best_category, category_scores, determine_category, extract_keywords};
pub use router::KeywordRouter;
pub use suggest::{get_suggestions, get_suggestions_with_limit, relevance};
pub use taxonomy::{CategoryProfile, Taxonomy};
pub use tokenizer::{ticket_tokens, tokenize};

/// Role responsible for `category` in the standard taxonomy.
pub fn get_role_for_category(category: Category) -> &'static str {
    Taxonomy::standard().role_for(category)
}
