//! Per-key query cache with stale-while-revalidate display.
//!
//! [`QueryCache`] never performs I/O. [`QueryCache::activate`] tells the
//! caller whether a fetch must be started, and [`QueryCache::resolve`] feeds
//! the outcome back in. Only the active key drives [`QueryCache::result`];
//! outcomes for superseded keys populate the cache and are otherwise ignored.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::{SearchError, SearchPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// What the displayed query currently looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub status: QueryStatus,
    pub data: Option<Arc<SearchPayload>>,
    pub error: Option<String>,
}

impl QueryResult {
    pub const fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.status, QueryStatus::Loading)
    }
}

/// Outcome of [`QueryCache::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Key too short; nothing is fetched and the result is idle.
    Disabled,
    /// A fresh success is cached for this key.
    Fresh,
    /// A fetch for this key is already outstanding.
    InFlight,
    /// The caller must start a fetch for this key.
    Fetch,
}

#[derive(Debug, Default)]
struct CacheEntry {
    payload: Option<Arc<SearchPayload>>,
    fetched_at: Option<Instant>,
    error: Option<String>,
    in_flight: bool,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        self.payload.is_some()
            && self
                .fetched_at
                .map(|fetched_at| now.saturating_duration_since(fetched_at) < stale_time)
                .unwrap_or(false)
    }
}

#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
    stale_time: Duration,
    min_key_len: usize,
    active: Option<String>,
    /// Last payload shown for any active key; the loading placeholder.
    displayed: Option<Arc<SearchPayload>>,
}

impl QueryCache {
    pub fn new(stale_time: Duration, min_key_len: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stale_time,
            min_key_len,
            active: None,
            displayed: None,
        }
    }

    pub fn is_enabled_for(&self, key: &str) -> bool {
        key.chars().count() >= self.min_key_len
    }

    /// Make `key` the displayed query.
    pub fn activate(&mut self, key: &str, now: Instant) -> Lookup {
        self.prune(now);

        if !self.is_enabled_for(key) {
            self.active = None;
            return Lookup::Disabled;
        }

        self.active = Some(key.to_owned());
        let stale_time = self.stale_time;
        let entry = self.entries.entry(key.to_owned()).or_default();

        if let Some(payload) = &entry.payload {
            self.displayed = Some(Arc::clone(payload));
        }

        if entry.in_flight {
            debug!(key, "search already in flight");
            return Lookup::InFlight;
        }

        if entry.is_fresh(now, stale_time) {
            debug!(key, "search cache hit");
            return Lookup::Fresh;
        }

        debug!(key, "search cache miss");
        entry.in_flight = true;
        entry.error = None;
        Lookup::Fetch
    }

    /// Store the outcome of a fetch for `key`.
    ///
    /// Returns `true` when `key` is still the active key, i.e. when the
    /// displayed result changed.
    pub fn resolve(
        &mut self,
        key: &str,
        outcome: Result<SearchPayload, SearchError>,
        now: Instant,
    ) -> bool {
        let is_active = self.active.as_deref() == Some(key);
        let entry = self.entries.entry(key.to_owned()).or_default();
        entry.in_flight = false;

        match outcome {
            Ok(payload) => {
                let payload = Arc::new(payload);
                entry.payload = Some(Arc::clone(&payload));
                entry.fetched_at = Some(now);
                entry.error = None;
                if is_active {
                    self.displayed = Some(payload);
                }
            }
            Err(error) => {
                entry.error = Some(error.to_string());
            }
        }

        if !is_active {
            debug!(key, "search completed for superseded key");
        }
        is_active
    }

    pub fn result(&self) -> QueryResult {
        let Some(entry) = self.active.as_ref().and_then(|key| self.entries.get(key)) else {
            return QueryResult::idle();
        };

        let data = entry.payload.clone().or_else(|| self.displayed.clone());

        if entry.in_flight {
            return QueryResult {
                status: QueryStatus::Loading,
                data,
                error: None,
            };
        }

        if let Some(error) = &entry.error {
            return QueryResult {
                status: QueryStatus::Error,
                data,
                error: Some(error.clone()),
            };
        }

        if entry.payload.is_some() {
            return QueryResult {
                status: QueryStatus::Success,
                data,
                error: None,
            };
        }

        QueryResult::idle()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop settled entries for inactive keys once they are no longer fresh.
    fn prune(&mut self, now: Instant) {
        let stale_time = self.stale_time;
        let active = self.active.as_deref();
        self.entries.retain(|key, entry| {
            entry.in_flight || Some(key.as_str()) == active || entry.is_fresh(now, stale_time)
        });
    }
}
