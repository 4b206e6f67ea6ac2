//! Query Cache
//!
//! Keyed store of fetched query results. Mutations never write here directly;
//! they return [`CacheDirective`]s that the orchestrator applies after success.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::model::{LicenseId, LicenseInfo, LicenseItem, ProjectOption};

/// Minutes fetched project options stay fresh
pub const PROJECT_OPTIONS_FRESH_MINUTES: i64 = 5;

/// Cache key of a query
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `["license"]`
    Licenses,

    /// `["licenseDetail", id]`
    LicenseDetail(LicenseId),

    /// `["projectOptions"]`
    ProjectOptions,
}

impl QueryKey {
    pub fn detail(id: impl Into<LicenseId>) -> Self {
        QueryKey::LicenseDetail(id.into())
    }

    /// Key as path segments, e.g. `["licenseDetail", "L1"]`
    pub fn segments(&self) -> Vec<&str> {
        match self {
            QueryKey::Licenses => vec!["license"],
            QueryKey::LicenseDetail(id) => vec!["licenseDetail", id.as_str()],
            QueryKey::ProjectOptions => vec!["projectOptions"],
        }
    }

    /// Freshness window; `None` keeps the entry fresh until invalidated
    pub fn fresh_for(&self) -> Option<TimeDelta> {
        match self {
            QueryKey::ProjectOptions => Some(TimeDelta::minutes(PROJECT_OPTIONS_FRESH_MINUTES)),
            QueryKey::Licenses | QueryKey::LicenseDetail(_) => None,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self
            .segments()
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect();
        write!(f, "[{}]", quoted.join(","))
    }
}

/// Cache change requested by a successful mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheDirective {
    /// Mark stale; the next read refetches
    Invalidate(QueryKey),

    /// Drop the entry entirely
    Remove(QueryKey),
}

impl CacheDirective {
    pub fn key(&self) -> &QueryKey {
        match self {
            CacheDirective::Invalidate(key) | CacheDirective::Remove(key) => key,
        }
    }
}

/// A cached query result
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachedValue {
    Licenses(Vec<LicenseItem>),
    LicenseDetail(LicenseInfo),
    ProjectOptions(Vec<ProjectOption>),
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: CachedValue,
    fetched_at: DateTime<Utc>,
    invalidated: bool,
}

impl CacheEntry {
    fn is_fresh(&self, key: &QueryKey, now: DateTime<Utc>) -> bool {
        if self.invalidated {
            return false;
        }
        key.fresh_for()
            .is_none_or(|window| now - self.fetched_at < window)
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<QueryKey, CacheEntry>,

    /// Bumped by every invalidate/remove, whether or not the key is cached
    generations: HashMap<QueryKey, u64>,
}

impl CacheState {
    fn generation(&self, key: &QueryKey) -> u64 {
        self.generations.get(key).copied().unwrap_or_default()
    }

    fn bump(&mut self, key: &QueryKey) {
        *self.generations.entry(key.clone()).or_default() += 1;
    }
}

/// In-memory query cache
///
/// Each key carries a generation. Readers take it with
/// [`generation`](Self::generation) before fetching and store through
/// [`put_if_current`](Self::put_if_current), so a fetch that started before
/// an invalidation cannot bring the old snapshot back.
#[derive(Debug, Default)]
pub struct QueryCache {
    state: RwLock<CacheState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fetch result unconditionally
    pub fn put(&self, key: QueryKey, value: CachedValue, now: DateTime<Utc>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: now,
                invalidated: false,
            },
        );
    }

    /// Current generation of `key`; take it before starting a fetch
    pub fn generation(&self, key: &QueryKey) -> u64 {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.generation(key)
    }

    /// Store a fetch result unless `key` was invalidated or removed after
    /// `generation` was taken. Returns whether the value was stored.
    pub fn put_if_current(
        &self,
        key: QueryKey,
        value: CachedValue,
        now: DateTime<Utc>,
        generation: u64,
    ) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation(&key) != generation {
            tracing::debug!(%key, "Discarded fetch result that predates an invalidation");
            return false;
        }
        state.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: now,
                invalidated: false,
            },
        );
        true
    }

    /// Fresh value for `key`, if any
    pub fn get_fresh(&self, key: &QueryKey, now: DateTime<Utc>) -> Option<CachedValue> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(key, now))
            .map(|entry| entry.value.clone())
    }

    /// Last known value regardless of freshness
    pub fn peek(&self, key: &QueryKey) -> Option<CachedValue> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.contains_key(key)
    }

    /// Whether an entry exists but has been marked stale
    pub fn is_invalidated(&self, key: &QueryKey) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.get(key).is_some_and(|entry| entry.invalidated)
    }

    pub fn invalidate(&self, key: &QueryKey) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.bump(key);
        if let Some(entry) = state.entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    pub fn remove(&self, key: &QueryKey) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.bump(key);
        state.entries.remove(key);
    }

    /// Apply the directives returned by a mutation
    pub fn apply(&self, directives: &[CacheDirective]) {
        for directive in directives {
            match directive {
                CacheDirective::Invalidate(key) => self.invalidate(key),
                CacheDirective::Remove(key) => self.remove(key),
            }
            tracing::debug!(key = %directive.key(), ?directive, "Applied cache directive");
        }
    }

    pub fn licenses(&self, now: DateTime<Utc>) -> Option<Vec<LicenseItem>> {
        match self.get_fresh(&QueryKey::Licenses, now)? {
            CachedValue::Licenses(items) => Some(items),
            _ => None,
        }
    }

    pub fn license_detail(&self, id: &LicenseId, now: DateTime<Utc>) -> Option<LicenseInfo> {
        match self.get_fresh(&QueryKey::LicenseDetail(id.clone()), now)? {
            CachedValue::LicenseDetail(info) => Some(info),
            _ => None,
        }
    }

    pub fn project_options(&self, now: DateTime<Utc>) -> Option<Vec<ProjectOption>> {
        match self.get_fresh(&QueryKey::ProjectOptions, now)? {
            CachedValue::ProjectOptions(options) => Some(options),
            _ => None,
        }
    }
}
