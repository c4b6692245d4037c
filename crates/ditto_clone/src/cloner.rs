//! The deep-clone entry points.

use std::sync::{Arc, OnceLock};

use ditto_model::{ClassId, Object, Registry, Value};

use crate::builder::PlanBuilder;
use crate::cache::PlanCache;
use crate::plan::{CloneCtx, ClonePlan};
use crate::{CloneConfig, CloneError};

/// Deep-copy engine bound to one registry.
///
/// Owns the plan cache for that registry's classes. `Cloner` is `Send +
/// Sync`; share one instance (or use [`Cloner::global`]) so plans are built
/// once per class.
pub struct Cloner {
    registry: Arc<Registry>,
    cache: PlanCache,
    config: CloneConfig,
}

static GLOBAL_CLONER: OnceLock<Cloner> = OnceLock::new();

impl Cloner {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_config(registry, CloneConfig::default())
    }

    pub fn with_config(registry: Arc<Registry>, config: CloneConfig) -> Self {
        Cloner {
            registry,
            cache: PlanCache::new(),
            config,
        }
    }

    /// Process-wide cloner over [`Registry::global`], configured from the
    /// environment on first use.
    pub fn global() -> &'static Cloner {
        GLOBAL_CLONER.get_or_init(|| Cloner::with_config(Registry::global(), CloneConfig::from_env()))
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &CloneConfig {
        &self.config
    }

    pub fn cache(&self) -> &PlanCache {
        &self.cache
    }

    /// Forget every built plan; the next clone of each class rebuilds it.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// The plan for `class`, building (and caching) it on first request.
    pub fn plan_for(&self, class: ClassId) -> Result<Arc<ClonePlan>, CloneError> {
        self.cache.get_or_build(class, || {
            PlanBuilder::new(&self.registry, &self.cache).build(class)
        })
    }

    /// Deep-clone any value.
    ///
    /// `Null`, value kinds and text come back as-is; callables come back as
    /// the same immutable callable; objects are deep-cloned.
    pub fn clone_value(&self, value: &Value) -> Result<Value, CloneError> {
        match value {
            Value::Object(obj) => self.clone_object(obj).map(Value::Object),
            other => Ok(other.clone()),
        }
    }

    /// Deep-clone an object into a new, independent object of the same class.
    pub fn clone_object(&self, source: &Object) -> Result<Object, CloneError> {
        let plan = self.plan_for(source.class_id())?;
        tracing::trace!(class = plan.class_name(), mode = ?self.config.mode, "clone");
        let mut ctx = CloneCtx::new(self);
        plan.execute(source, &mut ctx)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
