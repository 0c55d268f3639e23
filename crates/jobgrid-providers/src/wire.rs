//! Shared helpers for provider wire formats.

use serde::Deserialize;

/// A listing identifier as served by an upstream API.
///
/// Several providers are inconsistent about whether ids are JSON numbers
/// or strings (sometimes across versions of the same API), so adapters
/// deserialize through this and normalize to `String` immediately.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum UpstreamId {
    Num(u64),
    Str(String),
}

impl UpstreamId {
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Num(n) => n.to_string(),
            Self::Str(s) => s,
        }
    }
}

impl Default for UpstreamId {
    fn default() -> Self {
        Self::Str(String::new())
    }
}
