//! Object model errors.

use thiserror::Error;

use crate::{ClassId, EnumId, Ty};

/// Errors raised while defining classes or reading and writing objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The id was never declared in this registry.
    #[error("unknown class {0}")]
    UnknownClass(ClassId),

    #[error("unknown enum {0:?}")]
    UnknownEnum(EnumId),

    /// An enumeration needs at least one variant to have a zero value.
    #[error("enum `{name}` has no variants")]
    EmptyEnum { name: String },

    /// The id was declared but `define` has not been called for it yet.
    #[error("class `{class}` is declared but not defined")]
    UndefinedClass { class: String },

    #[error("class `{class}` is already defined")]
    AlreadyDefined { class: String },

    #[error("class `{class}` declares attribute `{attr}` twice")]
    DuplicateAttribute { class: String, attr: String },

    #[error("class `{class}` has no attribute `{attr}`")]
    NoSuchAttribute { class: String, attr: String },

    #[error("attribute `{class}.{attr}` expects {expected}, found {found}")]
    TypeMismatch {
        class: String,
        attr: String,
        expected: Ty,
        found: &'static str,
    },

    #[error("default for `{class}.{attr}` must be {expected}, found {found}")]
    BadDefault {
        class: String,
        attr: String,
        expected: Ty,
        found: &'static str,
    },

    /// The class has no parameterless constructor.
    #[error("class `{class}` has no parameterless constructor")]
    ConstructionFailure { class: String },
}
