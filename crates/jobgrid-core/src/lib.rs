//! # jobgrid-core
//!
//! Core types, traits, and abstractions for the jobgrid aggregation service.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the provider adapters and the API server depend on:
//! - Normalized filter sets with a single canonicalization boundary
//! - Normalized job listing records and page results
//! - The `JobBoard` adapter trait implemented once per upstream career site
//! - Pagination policy that folds heterogeneous paging signals into one
//!   `{current_page, has_next, has_previous, total_count?}` contract
//! - The shared error taxonomy and `Result` alias
//! - Centralized defaults and the structured-logging field schema

pub mod defaults;
pub mod error;
pub mod filters;
pub mod logging;
pub mod models;
pub mod paging;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use filters::{FilterKey, FilterSet};
pub use models::{
    rfc3339_from_epoch_millis, rfc3339_from_epoch_secs, BoardPage, JobDetail, JobPage, JobSummary,
    PageRequest, PagingSignal,
};
pub use paging::PageMeta;
pub use traits::JobBoard;
