//! Type handles.
//!
//! `ClassId` and `EnumId` are 32-bit handles allocated from process-wide
//! counters. Two handles compare equal iff they denote the same registered
//! definition, even when several registries exist in one process. This is
//! what lets the plan cache key on a bare `ClassId`.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_CLASS: AtomicU32 = AtomicU32::new(0);
static NEXT_ENUM: AtomicU32 = AtomicU32::new(0);

/// Handle to one concrete class.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
    /// Allocate a fresh, never-before-seen class id.
    pub(crate) fn fresh() -> Self {
        ClassId(NEXT_CLASS.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to one enumeration type.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EnumId(u32);

impl EnumId {
    pub(crate) fn fresh() -> Self {
        EnumId(NEXT_ENUM.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for EnumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumId({})", self.0)
    }
}
