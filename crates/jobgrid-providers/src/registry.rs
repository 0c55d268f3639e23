//! Provider registry: resolves a provider-selector tag to an adapter.
//!
//! One registry is built at startup and shared by reference for the life of
//! the process. Boards are registered under their [`JobBoard::id`] tag;
//! an inbound request names a provider and the registry hands back the
//! adapter that owns that provider's wire format.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use jobgrid_core::{Error, JobBoard, Result};

use crate::{
    EightfoldBoard, HuaweiBoard, LeverBoard, MakeMyTripBoard, MicrosoftBoard, ThoughtworksBoard,
};

/// Registry of configured provider adapters.
#[derive(Default)]
pub struct ProviderRegistry {
    boards: HashMap<String, Arc<dyn JobBoard>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with the full default board fleet.
    pub fn with_default_boards() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MicrosoftBoard::new()));
        registry.register(Arc::new(EightfoldBoard::morgan_stanley()));
        registry.register(Arc::new(EightfoldBoard::juniper()));
        registry.register(Arc::new(EightfoldBoard::ukg()));
        registry.register(Arc::new(LeverBoard::meesho()));
        registry.register(Arc::new(HuaweiBoard::new()));
        registry.register(Arc::new(MakeMyTripBoard::new()));
        registry.register(Arc::new(ThoughtworksBoard::new()));
        registry
    }

    /// Register a board under its id. A later registration under the same
    /// id replaces the earlier one.
    pub fn register(&mut self, board: Arc<dyn JobBoard>) {
        info!(
            provider = board.id(),
            display_name = board.display_name(),
            needs_detail = board.needs_detail(),
            "Registering provider board"
        );
        self.boards.insert(board.id().to_string(), board);
    }

    /// Resolve a provider-selector tag to its board.
    pub fn get(&self, provider: &str) -> Result<Arc<dyn JobBoard>> {
        self.boards
            .get(provider)
            .cloned()
            .ok_or_else(|| Error::UnknownProvider(provider.to_string()))
    }

    /// Check if a provider is registered.
    pub fn has(&self, provider: &str) -> bool {
        self.boards.contains_key(provider)
    }

    /// All registered provider ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.boards.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered boards.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// True if no boards are registered.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBoard;

    #[test]
    fn default_fleet_registers_all_providers() {
        let registry = ProviderRegistry::with_default_boards();
        assert_eq!(registry.len(), 8);
        for id in [
            "microsoft",
            "morganstanley",
            "juniper",
            "ukg",
            "meesho",
            "huawei",
            "makemytrip",
            "thoughtworks",
        ] {
            assert!(registry.has(id), "missing provider {}", id);
        }
    }

    #[test]
    fn ids_are_sorted() {
        let registry = ProviderRegistry::with_default_boards();
        let ids = registry.ids();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn unknown_provider_errors() {
        let registry = ProviderRegistry::with_default_boards();
        let err = match registry.get("acme") {
            Ok(_) => panic!("Expected error for unknown provider"),
            Err(e) => e,
        };
        match err {
            Error::UnknownProvider(name) => assert_eq!(name, "acme"),
            other => panic!("Expected UnknownProvider, got {:?}", other),
        }
    }

    #[test]
    fn get_returns_the_matching_board() {
        let registry = ProviderRegistry::with_default_boards();
        let board = registry.get("huawei").unwrap();
        assert_eq!(board.id(), "huawei");
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(MockBoard::new("dup")));
        registry.register(Arc::new(
            MockBoard::new("dup").with_display_name("Replacement"),
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("dup").unwrap().display_name(), "Replacement");
    }
}
