//! Centralized default constants for the CAFM ticket service.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// ROUTING
// =============================================================================

/// Tokens of this many characters or fewer are discarded by the tokenizer.
pub const MAX_DISCARDED_TOKEN_LEN: usize = 2;

/// Autocomplete inputs shorter than this (after trimming) yield no suggestions.
pub const MIN_SUGGESTION_INPUT_LEN: usize = 2;

/// Maximum number of autocomplete suggestions returned.
pub const SUGGESTION_LIMIT: usize = 10;

/// Role returned for categories without a profile (covers `General`).
pub const DEFAULT_ROLE: &str = "AssetManager";

/// Separator used when joining extracted keywords onto a ticket.
pub const KEYWORD_SEPARATOR: &str = ", ";

// Relevance scores, first matching rule wins.

/// Keyword equals the input.
pub const RELEVANCE_EXACT: u8 = 100;

/// Keyword starts with the input.
pub const RELEVANCE_PREFIX: u8 = 80;

/// Keyword contains the input.
pub const RELEVANCE_CONTAINS: u8 = 60;

/// Input contains the keyword.
pub const RELEVANCE_CONTAINED: u8 = 40;

// =============================================================================
// TICKETS
// =============================================================================

/// Maximum ticket title length in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum ticket description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 10_000;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for list endpoints.
pub const PAGE_LIMIT: usize = 50;

/// Upper bound for caller-supplied page sizes.
pub const PAGE_LIMIT_MAX: usize = 200;

/// Default page offset.
pub const PAGE_OFFSET: usize = 0;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u64 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum request body size in bytes (1 MB).
pub const MAX_BODY_SIZE_BYTES: usize = 1024 * 1024;

/// Default allowed CORS origins.
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
