//! Shared application state.

use std::sync::Arc;

use crate::services::JobAggregator;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<JobAggregator>,
}
