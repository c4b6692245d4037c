//! Plan builder.
//!
//! Walks a class and, recursively, the classes of its class-typed attributes,
//! producing one [`ClonePlan`] per class. Uses the plan cache and a per-build
//! memo so each class is inspected at most once, and an in-progress set for
//! cycle detection: a class met again while its own plan is still under
//! construction is linked with [`PlanRef::Deferred`] instead of recursed into.
//!
//! Nested plans are published to the cache only after the whole build
//! succeeded, so a failed build leaves the cache untouched.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use ditto_model::{ClassId, Construction, Registry};

use crate::cache::PlanCache;
use crate::classify::{classify_attr, AttrClass};
use crate::plan::{ClonePlan, CopyAction, PlanRef, SkippedAttr};
use crate::stack::ensure_sufficient_stack;
use crate::CloneError;

pub(crate) struct PlanBuilder<'a> {
    registry: &'a Registry,
    cache: &'a PlanCache,
    /// Classes whose plan is currently under construction.
    building: FxHashSet<ClassId>,
    /// Plans finished during this build, not yet published.
    finished: FxHashMap<ClassId, Arc<ClonePlan>>,
}

impl<'a> PlanBuilder<'a> {
    pub(crate) fn new(registry: &'a Registry, cache: &'a PlanCache) -> Self {
        PlanBuilder {
            registry,
            cache,
            building: FxHashSet::default(),
            finished: FxHashMap::default(),
        }
    }

    /// Build the plan for `root`, publishing every nested plan built on the
    /// way. The root plan itself is returned unpublished.
    pub(crate) fn build(mut self, root: ClassId) -> Result<Arc<ClonePlan>, CloneError> {
        let plan = self.build_class(root)?;
        for (id, nested) in self.finished.drain() {
            if id != root {
                self.cache.publish(id, nested);
            }
        }
        Ok(plan)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn build_class(&mut self, id: ClassId) -> Result<Arc<ClonePlan>, CloneError> {
        let class = self.registry.class(id)?;
        if class.construction() == Construction::Unavailable {
            return Err(CloneError::ConstructionFailure {
                class: class.name().to_string(),
            });
        }

        self.building.insert(id);

        let mut actions = SmallVec::new();
        let mut skipped = Vec::new();
        for attr in class.attrs() {
            match classify_attr(attr) {
                AttrClass::Direct => actions.push(CopyAction::Direct { slot: attr.slot }),
                AttrClass::Recurse(nested) => {
                    let plan = ensure_sufficient_stack(|| self.link(nested))?;
                    actions.push(CopyAction::Recurse {
                        slot: attr.slot,
                        plan,
                    });
                }
                AttrClass::Skip(reason) => skipped.push(SkippedAttr {
                    name: Arc::clone(&attr.name),
                    reason,
                }),
            }
        }

        self.building.remove(&id);

        let plan = Arc::new(ClonePlan::new(class, actions, skipped));
        tracing::debug!(
            class = plan.class_name(),
            direct = plan.direct_count(),
            recurse = plan.recurse_count(),
            skipped = plan.skipped().len(),
            "built clone plan"
        );
        self.cache.record_build();
        self.finished.insert(id, Arc::clone(&plan));
        Ok(plan)
    }

    /// Find or build the plan a recurse action for `nested` should point at.
    fn link(&mut self, nested: ClassId) -> Result<PlanRef, CloneError> {
        if self.building.contains(&nested) {
            tracing::trace!(class = %nested, "type-level cycle, deferring");
            return Ok(PlanRef::Deferred(nested));
        }
        if let Some(plan) = self.finished.get(&nested) {
            return Ok(PlanRef::Inline(Arc::clone(plan)));
        }
        if let Some(plan) = self.cache.peek(nested) {
            return Ok(PlanRef::Inline(plan));
        }
        self.build_class(nested).map(PlanRef::Inline)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
