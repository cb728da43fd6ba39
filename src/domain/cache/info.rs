//! Cache freshness descriptor

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Freshness metadata for a single cache key.
///
/// Only `cached` is present when the key has no entry. An entry that has
/// outlived its TTL but was not replaced yet is still reported, with
/// `expires_in_seconds` clamped to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheInfo {
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<f64>,
}

impl CacheInfo {
    /// Descriptor for a key without an entry
    pub fn absent() -> Self {
        Self {
            cached: false,
            cached_at: None,
            expires_at: None,
            age_seconds: None,
            expires_in_seconds: None,
        }
    }

    /// Descriptor for an entry computed at `computed_at`, observed at `now`
    pub fn present(
        computed_at: DateTime<Utc>,
        ttl: Duration,
        ttl_delta: TimeDelta,
        now: DateTime<Utc>,
    ) -> Self {
        let age = (now - computed_at).to_std().unwrap_or_default();
        let expires_in = ttl.saturating_sub(age);

        Self {
            cached: true,
            cached_at: Some(computed_at),
            expires_at: Some(computed_at + ttl_delta),
            age_seconds: Some(age.as_secs_f64()),
            expires_in_seconds: Some(expires_in.as_secs_f64()),
        }
    }
}
