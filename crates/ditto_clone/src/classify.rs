//! Attribute classifier.
//!
//! Decides, once per attribute, how a clone plan treats it:
//!
//! - value kinds and immutable text are copied by assignment,
//! - class-typed attributes are cloned through a nested plan,
//! - callables and anything not public read/write are left alone.

use ditto_model::{AttrDef, AttrFlags, ClassId, Ty};

/// How a plan handles one attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrClass {
    /// Copy the source value as-is.
    Direct,
    /// Deep-clone the source value with the plan for this class.
    Recurse(ClassId),
    /// Leave the target at its construction default.
    Skip(SkipReason),
}

/// Why an attribute is left out of a plan.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Callable-typed attribute.
    Callable,
    /// Not visible outside the class.
    NotPublic,
    /// Missing a getter or a setter.
    NotReadWrite,
}

/// Classify a declared type, ignoring access flags.
pub fn classify_ty(ty: Ty) -> AttrClass {
    match ty {
        Ty::Int
        | Ty::Float
        | Ty::Bool
        | Ty::Char
        | Ty::Byte
        | Ty::Duration
        | Ty::Timestamp
        | Ty::Enum(_)
        | Ty::Str => AttrClass::Direct,

        Ty::Class(id) => AttrClass::Recurse(id),

        Ty::Function => AttrClass::Skip(SkipReason::Callable),
    }
}

/// Classify an attribute: access rules first, then its declared type.
pub fn classify_attr(attr: &AttrDef) -> AttrClass {
    if !attr.flags.contains(AttrFlags::PUBLIC) {
        return AttrClass::Skip(SkipReason::NotPublic);
    }
    if !attr.flags.contains(AttrFlags::READABLE | AttrFlags::WRITABLE) {
        return AttrClass::Skip(SkipReason::NotReadWrite);
    }
    classify_ty(attr.ty)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
