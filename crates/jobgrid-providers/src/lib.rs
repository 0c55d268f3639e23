//! # jobgrid-providers
//!
//! Provider adapters for the jobgrid aggregation service.
//!
//! This crate provides:
//! - One [`JobBoard`](jobgrid_core::JobBoard) implementation per upstream
//!   career-site API shape
//! - A [`ProviderRegistry`] resolving provider-selector tags to adapters
//! - A deterministic mock board for tests (feature `mock`)
//!
//! Career sites built on the same vendor platform share one adapter and
//! differ only in configuration: the three Eightfold tenants (Morgan
//! Stanley, Juniper, UKG) are all served by [`EightfoldBoard`], the same
//! way one OpenAI-compatible client serves several vendors.
//!
//! # Example
//!
//! ```rust,no_run
//! use jobgrid_core::{FilterKey, FilterSet, JobBoard};
//! use jobgrid_providers::MicrosoftBoard;
//!
//! #[tokio::main]
//! async fn main() {
//!     let board = MicrosoftBoard::new();
//!     let filters = FilterSet::new().with(FilterKey::Keyword, "rust");
//!     let page = board.fetch_page(&filters, 1, 10).await.unwrap();
//!     println!("{} records", page.records.len());
//! }
//! ```

pub mod eightfold;
pub mod huawei;
pub mod lever;
pub mod makemytrip;
pub mod microsoft;
pub mod registry;
pub mod thoughtworks;

mod wire;

// Mock board for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use eightfold::EightfoldBoard;
pub use huawei::HuaweiBoard;
pub use lever::LeverBoard;
pub use makemytrip::MakeMyTripBoard;
pub use microsoft::MicrosoftBoard;
pub use registry::ProviderRegistry;
pub use thoughtworks::ThoughtworksBoard;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockBoard;
