//! Clone plans and their execution.
//!
//! A [`ClonePlan`] is plain data: the class to construct plus an ordered list
//! of [`CopyAction`]s. One generic interpreter ([`ClonePlan::execute`]) runs
//! every plan, so building a plan is the only per-type cost.
//!
//! Nested plans are normally linked in directly ([`PlanRef::Inline`]). A
//! class that was still being built when the reference was created (a
//! type-level cycle such as `Node { child: Node }`) is linked by id instead
//! ([`PlanRef::Deferred`]) and looked up through the cache when executed.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use ditto_model::{ClassDef, ClassId, Object, Value};

use crate::classify::SkipReason;
use crate::stack::ensure_sufficient_stack;
use crate::{CloneError, CloneMode, Cloner};

/// Link from a recurse action to the plan for the attribute's class.
#[derive(Clone)]
pub enum PlanRef {
    Inline(Arc<ClonePlan>),
    /// Resolved through the plan cache at execution time.
    Deferred(ClassId),
}

impl PlanRef {
    pub fn class_id(&self) -> ClassId {
        match self {
            PlanRef::Inline(plan) => plan.class_id(),
            PlanRef::Deferred(id) => *id,
        }
    }

    fn resolve(&self, ctx: &CloneCtx<'_>) -> Result<Arc<ClonePlan>, CloneError> {
        match self {
            PlanRef::Inline(plan) => Ok(Arc::clone(plan)),
            PlanRef::Deferred(id) => ctx.cloner.plan_for(*id),
        }
    }
}

impl fmt::Debug for PlanRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanRef::Inline(plan) => write!(f, "Inline({})", plan.class_name()),
            PlanRef::Deferred(id) => write!(f, "Deferred({id})"),
        }
    }
}

/// One step of a plan.
#[derive(Clone, Debug)]
pub enum CopyAction {
    /// Assign the source slot to the target slot.
    Direct { slot: usize },
    /// Deep-clone the source slot (or copy `Null`) into the target slot.
    Recurse { slot: usize, plan: PlanRef },
}

impl CopyAction {
    pub fn slot(&self) -> usize {
        match self {
            CopyAction::Direct { slot } | CopyAction::Recurse { slot, .. } => *slot,
        }
    }
}

/// An attribute the plan leaves at its construction default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedAttr {
    pub name: Arc<str>,
    pub reason: SkipReason,
}

/// Precomputed copy routine for one class. Immutable once built.
pub struct ClonePlan {
    class: Arc<ClassDef>,
    actions: SmallVec<[CopyAction; 8]>,
    skipped: Vec<SkippedAttr>,
}

impl ClonePlan {
    pub(crate) fn new(
        class: Arc<ClassDef>,
        actions: SmallVec<[CopyAction; 8]>,
        skipped: Vec<SkippedAttr>,
    ) -> Self {
        ClonePlan {
            class,
            actions,
            skipped,
        }
    }

    pub fn class(&self) -> &Arc<ClassDef> {
        &self.class
    }

    pub fn class_id(&self) -> ClassId {
        self.class.id()
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// Actions in slot order.
    pub fn actions(&self) -> &[CopyAction] {
        &self.actions
    }

    pub fn skipped(&self) -> &[SkippedAttr] {
        &self.skipped
    }

    pub fn direct_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, CopyAction::Direct { .. }))
            .count()
    }

    pub fn recurse_count(&self) -> usize {
        self.actions.len() - self.direct_count()
    }

    /// Clone `source`, which must be an instance of this plan's class.
    pub(crate) fn execute(
        &self,
        source: &Object,
        ctx: &mut CloneCtx<'_>,
    ) -> Result<Object, CloneError> {
        if let Some(copy) = ctx.lookup(source) {
            return Ok(copy);
        }
        ctx.enter()?;

        let target = Object::construct(Arc::clone(&self.class))?;
        ctx.remember(source, &target);

        let slots = source.snapshot();
        for action in &self.actions {
            match action {
                CopyAction::Direct { slot } => target.set_slot(*slot, slots[*slot].clone())?,
                CopyAction::Recurse { slot, plan } => {
                    // Class slots are type-checked on write: null or an instance.
                    let copy = match &slots[*slot] {
                        Value::Object(child) => {
                            let plan = plan.resolve(ctx)?;
                            Value::Object(ensure_sufficient_stack(|| plan.execute(child, ctx))?)
                        }
                        _ => Value::Null,
                    };
                    target.set_slot(*slot, copy)?;
                }
            }
        }

        ctx.leave();
        Ok(target)
    }
}

impl fmt::Debug for ClonePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClonePlan")
            .field("class", &self.class.name())
            .field("actions", &self.actions)
            .field("skipped", &self.skipped)
            .finish()
    }
}

/// State threaded through one clone call.
pub(crate) struct CloneCtx<'c> {
    cloner: &'c Cloner,
    depth: usize,
    max_depth: Option<usize>,
    /// Graph mode only: source identity to (source, copy). The source is
    /// kept alive so its address cannot be reused during the call.
    visited: Option<FxHashMap<usize, (Object, Object)>>,
}

impl<'c> CloneCtx<'c> {
    pub(crate) fn new(cloner: &'c Cloner) -> Self {
        let config = cloner.config();
        CloneCtx {
            cloner,
            depth: 0,
            max_depth: config.max_depth,
            visited: match config.mode {
                CloneMode::Tree => None,
                CloneMode::Graph => Some(FxHashMap::default()),
            },
        }
    }

    fn lookup(&self, source: &Object) -> Option<Object> {
        let (_, copy) = self.visited.as_ref()?.get(&source.addr())?;
        Some(copy.clone())
    }

    fn remember(&mut self, source: &Object, copy: &Object) {
        if let Some(visited) = &mut self.visited {
            visited.insert(source.addr(), (source.clone(), copy.clone()));
        }
    }

    fn enter(&mut self) -> Result<(), CloneError> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => Err(CloneError::DepthExceeded { limit }),
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
