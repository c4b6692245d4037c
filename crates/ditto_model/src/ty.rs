//! Declared attribute types.

use std::fmt;

use crate::{ClassId, EnumId};

/// Declared type of an attribute.
///
/// Value kinds (`Int` through `Timestamp`, plus `Enum`) always hold a value.
/// `Str`, `Function` and `Class` are nullable references.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Ty {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    Bool,
    Char,
    Byte,
    /// Time span (`std::time::Duration`).
    Duration,
    /// Point in time (`std::time::SystemTime`).
    Timestamp,
    /// Immutable text.
    Str,
    /// Enumeration registered in the registry.
    Enum(EnumId),
    /// Callable value.
    Function,
    /// Instance of a registered class.
    Class(ClassId),
}

impl Ty {
    /// Returns `true` for types whose values carry no reference identity.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            Ty::Int
                | Ty::Float
                | Ty::Bool
                | Ty::Char
                | Ty::Byte
                | Ty::Duration
                | Ty::Timestamp
                | Ty::Enum(_)
        )
    }

    /// Returns `true` if an attribute of this type may hold `Null`.
    pub fn is_nullable(self) -> bool {
        !self.is_value()
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => f.write_str("int"),
            Ty::Float => f.write_str("float"),
            Ty::Bool => f.write_str("bool"),
            Ty::Char => f.write_str("char"),
            Ty::Byte => f.write_str("byte"),
            Ty::Duration => f.write_str("duration"),
            Ty::Timestamp => f.write_str("timestamp"),
            Ty::Str => f.write_str("str"),
            Ty::Enum(id) => write!(f, "enum {}", id.raw()),
            Ty::Function => f.write_str("fn"),
            Ty::Class(id) => write!(f, "class {id}"),
        }
    }
}
