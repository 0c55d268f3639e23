//! Normalized filter sets.
//!
//! Every inbound request carries a set of named, optional, single-valued
//! filters. Providers differ wildly in what they call these (one site's
//! `BusinessArea` is another's `team`), so the rest of the system only ever
//! sees the normalized [`FilterKey`] vocabulary; each adapter owns the
//! mapping to its provider's native parameter names.
//!
//! Normalization happens in exactly one place: [`FilterSet::insert`] converts
//! absent, empty, and whitespace-only values to one canonical "not set"
//! representation (the key is simply not present). Two filter sets that
//! differ only by explicit-empty vs. absent keys are therefore equal, and
//! derived cache keys and query strings cannot tell them apart.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Normalized filter vocabulary shared by all providers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    /// Free-text search keyword.
    Keyword,
    /// Job category / profession / team / business area.
    Category,
    /// City or office location.
    Location,
    /// Country or country code.
    Country,
    /// Employment type (full-time, contract, internship).
    JobType,
    /// Industry experience band.
    ExperienceLevel,
    /// Seniority / job level.
    Seniority,
    /// Required skills.
    Skills,
    /// Engineering discipline.
    Discipline,
    /// Workplace arrangement (on-site, hybrid, remote).
    Workplace,
}

impl FilterKey {
    /// Stable lowercase name, used in cache-key canonicalization and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Category => "category",
            Self::Location => "location",
            Self::Country => "country",
            Self::JobType => "job_type",
            Self::ExperienceLevel => "experience_level",
            Self::Seniority => "seniority",
            Self::Skills => "skills",
            Self::Discipline => "discipline",
            Self::Workplace => "workplace",
        }
    }

    /// All known filter keys.
    pub const ALL: [FilterKey; 10] = [
        Self::Keyword,
        Self::Category,
        Self::Location,
        Self::Country,
        Self::JobType,
        Self::ExperienceLevel,
        Self::Seniority,
        Self::Skills,
        Self::Discipline,
        Self::Workplace,
    ];
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of normalized filters.
///
/// Backed by a sorted map so iteration order (and everything derived from
/// it: query strings, cache keys) is independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    values: BTreeMap<FilterKey, String>,
}

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter value.
    ///
    /// The value is trimmed; an empty or whitespace-only value removes the
    /// key entirely, making "explicitly empty" indistinguishable from
    /// "absent" everywhere downstream.
    pub fn insert(&mut self, key: FilterKey, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, trimmed.to_string());
        }
        self
    }

    /// Set a filter value, rejecting values no provider can safely encode.
    ///
    /// Control characters are refused before any network call is issued.
    pub fn insert_checked(&mut self, key: FilterKey, value: impl Into<String>) -> Result<&mut Self> {
        let value = value.into();
        if value.chars().any(|c| c.is_control()) {
            return Err(Error::MalformedFilter(format!(
                "{} contains control characters",
                key
            )));
        }
        Ok(self.insert(key, value))
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a filter value, if set.
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(|s| s.as_str())
    }

    /// Iterate over set filters in stable key order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of set filters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no filters are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Canonical serialization used for cache-key derivation.
    ///
    /// One `key=value` pair per line, in stable key order. Identical for any
    /// two filter sets that are semantically equal.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key.as_str());
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}
