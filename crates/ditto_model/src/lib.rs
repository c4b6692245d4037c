//! Dynamic object model for the Ditto deep-copy engine.
//!
//! Rust has no runtime reflection, so the objects Ditto clones are described
//! by runtime descriptors instead:
//!
//! - **[`ClassId`]**: handle to one concrete class; equal iff same class.
//! - **[`ClassDef`] / [`AttrDef`]**: a class's attributes: name, declared
//!   [`Ty`], access [`AttrFlags`], construction default and slot index.
//! - **[`Registry`]**: thread-safe store of class and enum definitions,
//!   supporting forward declaration for self-referential classes.
//! - **[`Object`]**: shared handle to an instance; reading and writing
//!   attributes goes through the slot lock.
//! - **[`Value`]**: what a slot holds: value kinds, immutable text,
//!   callables and object references.

mod class;
mod error;
mod flags;
mod id;
mod object;
mod registry;
mod ty;
mod value;

pub use class::{AttrDef, ClassBuilder, ClassDef, Construction, EnumDef};
pub use error::ModelError;
pub use flags::AttrFlags;
pub use id::{ClassId, EnumId};
pub use object::Object;
pub use registry::Registry;
pub use ty::Ty;
pub use value::{Callable, CallableFn, EnumValue, Value};
