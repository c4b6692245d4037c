//! Plan cache.
//!
//! Concurrent map from [`ClassId`] to its [`ClonePlan`]. Lookups go through
//! `DashMap`'s sharded read locks, so cache hits from many threads do not
//! contend on one lock. No lock is held while a plan is built or executed.
//!
//! Concurrent misses on the same class may each build a plan. The first
//! one published stays; later publishers get the survivor back and drop
//! their own copy, so every caller ends up executing the same plan.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use ditto_model::ClassId;

use crate::plan::ClonePlan;
use crate::CloneError;

/// Counters describing cache effectiveness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// `get_or_build` calls answered from the cache.
    pub hits: u64,
    /// `get_or_build` calls that had to build.
    pub misses: u64,
    /// Plans built, nested ones included.
    pub builds: u64,
}

/// Store of built clone plans.
pub struct PlanCache {
    plans: DashMap<ClassId, Arc<ClonePlan>, FxBuildHasher>,
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
}

impl PlanCache {
    pub fn new() -> Self {
        PlanCache {
            plans: DashMap::with_hasher(FxBuildHasher),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            builds: AtomicU64::new(0),
        }
    }

    /// Return the cached plan for `class`, or run `build` and publish its result.
    pub fn get_or_build(
        &self,
        class: ClassId,
        build: impl FnOnce() -> Result<Arc<ClonePlan>, CloneError>,
    ) -> Result<Arc<ClonePlan>, CloneError> {
        if let Some(plan) = self.peek(class) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(plan);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let plan = build()?;
        Ok(self.publish(class, plan))
    }

    /// Cached plan for `class`, without touching the statistics.
    pub fn peek(&self, class: ClassId) -> Option<Arc<ClonePlan>> {
        self.plans.get(&class).map(|entry| Arc::clone(entry.value()))
    }

    /// Install `plan` unless one is already present; return whichever is cached.
    pub(crate) fn publish(&self, class: ClassId, plan: Arc<ClonePlan>) -> Arc<ClonePlan> {
        match self.plans.entry(class) {
            Entry::Occupied(existing) => {
                tracing::trace!(class = plan.class_name(), "plan already published, keeping existing");
                Arc::clone(existing.get())
            }
            Entry::Vacant(slot) => {
                tracing::debug!(class = plan.class_name(), "published clone plan");
                Arc::clone(slot.insert(plan).value())
            }
        }
    }

    pub(crate) fn record_build(&self) {
        self.builds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn contains(&self, class: ClassId) -> bool {
        self.plans.contains_key(&class)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Drop every cached plan. Statistics keep counting.
    pub fn clear(&self) {
        self.plans.clear();
        tracing::debug!("plan cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
        }
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
