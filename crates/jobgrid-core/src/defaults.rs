//! Centralized default constants for the jobgrid system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// PAGINATION
// =============================================================================

/// Results per page requested from every provider.
pub const PAGE_SIZE: usize = 10;

/// First page number. Pages are 1-based throughout the system.
pub const FIRST_PAGE: u32 = 1;

// =============================================================================
// CACHING
// =============================================================================

/// Default listing-page cache TTL in seconds (2 minutes).
///
/// Career-site feeds change slowly; two minutes keeps repeated pagination
/// within one browsing session off the upstream APIs.
pub const LISTING_TTL_SECS: u64 = 120;

/// Cache TTL for providers that serve one full feed per request (1 hour).
///
/// A full-feed fetch returns every open position at once, so it is far more
/// expensive than a paged fetch and warrants a much longer expiry.
pub const FULL_FEED_TTL_SECS: u64 = 3600;

/// Prefix applied to every derived cache key.
pub const CACHE_KEY_PREFIX: &str = "jg:listings:";

/// Hex characters of the key digest kept after the prefix.
pub const CACHE_KEY_DIGEST_LEN: usize = 16;

// =============================================================================
// UPSTREAM FETCHES
// =============================================================================

/// Timeout for a provider page fetch in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Timeout for a single per-record detail fetch in seconds.
pub const DETAIL_TIMEOUT_SECS: u64 = 10;

/// Maximum detail fetches in flight at once for a single page.
pub const DETAIL_CONCURRENCY: usize = 8;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;
