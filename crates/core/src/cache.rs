//! Short-lived cache of generated targets.
//!
//! Owned by the caller and never consulted by the scoring functions. Entries
//! are keyed by location rounded to [`CachePolicy::location_resolution_deg`]
//! and by time bucket (`timestamp / ttl`), so repeated requests for nearly
//! the same place within one bucket reuse the previous result.

use crate::core_types::{BaseParameters, Target};
use chrono::{DateTime, TimeDelta, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Expiry and key granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Entry lifetime and time-bucket width (seconds).
    pub ttl_seconds: u32,
    /// Location rounding (degrees).
    pub location_resolution_deg: f64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl_seconds: 600,
            location_resolution_deg: 0.1,
        }
    }
}

impl CachePolicy {
    #[must_use]
    pub fn ttl(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.ttl_seconds.max(1)))
    }

    fn key(&self, latitude: f64, longitude: f64, at: DateTime<Utc>) -> CacheKey {
        let resolution = if self.location_resolution_deg > 0.0 {
            self.location_resolution_deg
        } else {
            Self::default().location_resolution_deg
        };
        CacheKey {
            lat: (latitude / resolution).round() as i64,
            lon: (longitude / resolution).round() as i64,
            bucket: at.timestamp().div_euclid(self.ttl().num_seconds()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    lat: i64,
    lon: i64,
    bucket: i64,
}

/// One cached generation result.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub parameters: BaseParameters,
    pub targets: Vec<Target>,
    pub stored_at: DateTime<Utc>,
}

/// Map of recent generation results.
#[derive(Debug, Clone, Default)]
pub struct TargetCache {
    policy: CachePolicy,
    entries: FxHashMap<CacheKey, CacheEntry>,
}

impl TargetCache {
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Live entry for the location at `now`, if any.
    #[must_use]
    pub fn get(&self, latitude: f64, longitude: f64, now: DateTime<Utc>) -> Option<&CacheEntry> {
        let key = self.policy.key(latitude, longitude, now);
        self.entries
            .get(&key)
            .filter(|entry| now - entry.stored_at < self.policy.ttl())
    }

    /// Store a result, replacing any entry with the same key.
    pub fn insert(
        &mut self,
        latitude: f64,
        longitude: f64,
        parameters: BaseParameters,
        targets: Vec<Target>,
        now: DateTime<Utc>,
    ) {
        let key = self.policy.key(latitude, longitude, now);
        self.entries.insert(
            key,
            CacheEntry {
                parameters,
                targets,
                stored_at: now,
            },
        );
    }

    /// Drop entries older than the TTL. Returns how many were removed.
    pub fn evict_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.policy.ttl();
        self.entries.retain(|_, entry| now - entry.stored_at < ttl);
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!("Evicted {removed} expired target cache entries");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
