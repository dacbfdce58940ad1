//! Structured logging schema and field name constants for the CAFM service.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query routing and workflow events by the same names.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data (tokens, keyword hits) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the HTTP layer.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "routing", "workflow", "store"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "classifier", "suggester", "round_robin"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "determine_category", "get_suggestions", "auto_assign"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Ticket UUID being operated on.
pub const TICKET_ID: &str = "ticket_id";

/// Technician UUID selected or referenced.
pub const TECHNICIAN_ID: &str = "technician_id";

/// Ticket category chosen by classification.
pub const CATEGORY: &str = "category";

/// Role name resolved for a category.
pub const ROLE: &str = "role";

/// Character length of an autocomplete input fragment.
pub const INPUT_LEN: &str = "input_len";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a query or suggestion request.
pub const RESULT_COUNT: &str = "result_count";

/// Number of tokens produced from ticket text.
pub const TOKEN_COUNT: &str = "token_count";

/// Number of keywords matched in ticket text.
pub const KEYWORD_COUNT: &str = "keyword_count";

/// Winning classification score.
pub const SCORE: &str = "score";

/// Number of assignment candidates considered.
pub const CANDIDATE_COUNT: &str = "candidate_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
