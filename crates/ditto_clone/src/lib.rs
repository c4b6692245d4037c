//! Plan-caching deep-copy engine.
//!
//! Produces fully independent copies of [`ditto_model`] object graphs: no
//! mutable object is shared between an original and its clone.
//!
//! # Design
//!
//! Inspecting a class's attributes is the expensive part of reflective
//! cloning, so it happens once per class:
//!
//! 1. **Classification** ([`classify_attr`]) sorts each attribute into
//!    direct copy (value kinds, immutable text), recursive copy (class
//!    types) or skip (callables, anything not public read/write).
//! 2. **Plan building** turns a class into a [`ClonePlan`]: a list of
//!    [`CopyAction`]s with nested plans linked in. Type-level cycles are
//!    broken with [`PlanRef::Deferred`].
//! 3. **The plan cache** ([`PlanCache`]) keeps one plan per class for the
//!    life of the [`Cloner`].
//! 4. **Execution** interprets a plan against a source object.
//!
//! # Usage
//!
//! ```text
//! let registry = Registry::global();
//! let point = registry.register(
//!     ClassBuilder::new("Point").field("x", Ty::Int).field("y", Ty::Int),
//! )?;
//! let p = registry.instantiate(point)?;
//! p.set("x", 1)?;
//! let copy = clone_deep(&Value::Object(p))?;
//! ```
//!
//! # Logging
//!
//! Plan builds log at `debug`, individual clones at `trace`. Call
//! [`init_tracing`] and set `RUST_LOG=ditto_clone=debug` to see them.

mod builder;
mod cache;
mod classify;
mod cloner;
mod config;
mod error;
mod plan;
mod stack;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "test fixtures unwrap registrations that cannot fail"
)]
mod test_helpers;

use std::sync::Once;

pub use cache::{CacheStats, PlanCache};
pub use classify::{classify_attr, classify_ty, AttrClass, SkipReason};
pub use cloner::Cloner;
pub use config::{CloneConfig, CloneMode, MAX_DEPTH_VAR, MODE_VAR};
pub use error::CloneError;
pub use plan::{ClonePlan, CopyAction, PlanRef, SkippedAttr};

use ditto_model::Value;

/// Deep-clone `value` with the process-wide [`Cloner::global`].
///
/// Objects must belong to classes of [`ditto_model::Registry::global`].
pub fn clone_deep(value: &Value) -> Result<Value, CloneError> {
    Cloner::global().clone_value(value)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}
