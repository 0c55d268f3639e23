//! Pagination normalization policy.
//!
//! Providers report their position in a result set three different ways:
//! a total count, an explicit has-more flag, or nothing at all. This module
//! folds all three into one uniform contract.

use serde::{Deserialize, Serialize};

use crate::models::PagingSignal;

/// Normalized pagination metadata attached to every page result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// 1-based page number of this result.
    pub current_page: u32,
    /// Whether a next page exists (exactly or heuristically, see
    /// [`resolve`](Self::resolve)).
    pub has_next: bool,
    /// Whether a previous page exists. True iff `current_page > 1`.
    pub has_previous: bool,
    /// Total result count, when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl PageMeta {
    /// Fold a raw paging signal into normalized metadata.
    ///
    /// - With a total count: `has_next = page * page_size < total`.
    /// - With an explicit has-more flag: used directly.
    /// - Otherwise: a full page (`records_returned >= page_size`) is taken
    ///   to mean more records exist. A provider that pads or truncates a
    ///   non-final page irregularly can make this heuristic under- or
    ///   over-report the last page; that approximation is accepted rather
    ///   than fabricating a boundary from an assumed total.
    pub fn resolve(
        signal: PagingSignal,
        page: u32,
        page_size: usize,
        records_returned: usize,
    ) -> Self {
        let has_previous = page > 1;
        let (has_next, total_count) = match signal {
            PagingSignal::TotalCount(total) => {
                (u64::from(page) * (page_size as u64) < total, Some(total))
            }
            PagingSignal::HasMore(more) => (more, None),
            PagingSignal::Unknown => (records_returned >= page_size, None),
        };
        Self {
            current_page: page,
            has_next,
            has_previous,
            total_count,
        }
    }
}
