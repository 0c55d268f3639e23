//! Structured logging schema and field name constants for jobgrid.
//!
//! All crates use these constants for consistent structured logging fields.
//! This ensures log aggregation tools (Loki, Elasticsearch) can query by
//! standardized field names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, cache outcomes, config choices |
//! | TRACE | Per-record iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across request → fetch → detail sub-calls.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "aggregator", "cache", "board"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "microsoft", "eightfold", "listing_cache", "enricher"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "fetch_listings", "fetch_page", "fetch_detail", "get", "set"
pub const OPERATION: &str = "op";

// ─── Request fields ────────────────────────────────────────────────────────

/// Provider selector tag for the request.
pub const PROVIDER: &str = "provider";

/// 1-based page number requested.
pub const PAGE: &str = "page";

/// Requested results per page.
pub const PAGE_SIZE: &str = "page_size";

/// Number of active (non-empty) filters on the request.
pub const FILTER_COUNT: &str = "filter_count";

// ─── Cache fields ──────────────────────────────────────────────────────────

/// Derived cache key for the request.
pub const CACHE_KEY: &str = "cache_key";

/// Tier that satisfied (or rejected) a lookup: "memory", "disk".
pub const CACHE_TIER: &str = "cache_tier";

/// Lookup outcome: "hit", "miss", "expired".
pub const CACHE_OUTCOME: &str = "cache_outcome";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of records returned by a page fetch.
pub const RESULT_COUNT: &str = "result_count";

/// Number of detail fetches that failed (and fell back) on a page.
pub const DETAIL_FAILURES: &str = "detail_failures";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
