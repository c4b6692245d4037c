//! Runtime values stored in object slots.
//!
//! Construct values through the factory methods (`Value::int`,
//! `Value::string`, ...). Text is held as `Arc<str>`, so copying a text
//! value shares the (immutable) buffer.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::{EnumId, Object, Ty};

/// Signature of a callable body.
pub type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Immutable function value. Compared by identity.
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Callable(Arc::new(f))
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// Returns `true` if both handles point at the same function.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {:p}>", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// A variant of a registered enumeration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EnumValue {
    pub ty: EnumId,
    pub variant: u32,
}

/// A slot value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absent reference.
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Byte(u8),
    Duration(Duration),
    Timestamp(SystemTime),
    /// Immutable text.
    Str(Arc<str>),
    Enum(EnumValue),
    Function(Callable),
    /// Reference to a shared, mutable instance.
    Object(Object),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(n: f64) -> Self {
        Value::Float(n)
    }

    #[inline]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn function(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Value::Function(Callable::new(f))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Byte(_) => "byte",
            Value::Duration(_) => "duration",
            Value::Timestamp(_) => "timestamp",
            Value::Str(_) => "str",
            Value::Enum(_) => "enum",
            Value::Function(_) => "fn",
            Value::Object(_) => "object",
        }
    }

    /// Check whether this value may be stored in a slot declared as `ty`.
    ///
    /// Object values must be instances of exactly the declared class.
    pub fn conforms_to(&self, ty: Ty) -> bool {
        match (self, ty) {
            (Value::Null, ty) => ty.is_nullable(),
            (Value::Int(_), Ty::Int)
            | (Value::Float(_), Ty::Float)
            | (Value::Bool(_), Ty::Bool)
            | (Value::Char(_), Ty::Char)
            | (Value::Byte(_), Ty::Byte)
            | (Value::Duration(_), Ty::Duration)
            | (Value::Timestamp(_), Ty::Timestamp)
            | (Value::Str(_), Ty::Str)
            | (Value::Function(_), Ty::Function) => true,
            (Value::Enum(v), Ty::Enum(id)) => v.ty == id,
            (Value::Object(obj), Ty::Class(id)) => obj.class_id() == id,
            _ => false,
        }
    }

    /// The zero value for a declared type: `Null` for references.
    pub fn zero(ty: Ty) -> Self {
        match ty {
            Ty::Int => Value::Int(0),
            Ty::Float => Value::Float(0.0),
            Ty::Bool => Value::Bool(false),
            Ty::Char => Value::Char('\0'),
            Ty::Byte => Value::Byte(0),
            Ty::Duration => Value::Duration(Duration::ZERO),
            Ty::Timestamp => Value::Timestamp(SystemTime::UNIX_EPOCH),
            Ty::Enum(id) => Value::Enum(EnumValue { ty: id, variant: 0 }),
            Ty::Str | Ty::Function | Ty::Class(_) => Value::Null,
        }
    }
}

/// Shallow equality: objects and callables compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
