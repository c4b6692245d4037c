//! Clone errors.

use ditto_model::{ClassId, ModelError};
use thiserror::Error;

/// Errors surfaced by [`Cloner`](crate::Cloner).
///
/// Nothing is caught or retried inside the engine. A failed clone leaves no
/// usable partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloneError {
    /// A class in the transitive attribute closure has no parameterless
    /// constructor.
    #[error("cannot clone `{class}`: no parameterless constructor")]
    ConstructionFailure { class: String },

    /// The class is not known to the cloner's registry.
    #[error("class {0} is not registered with this cloner")]
    UnknownClass(ClassId),

    /// Tree-mode recursion went deeper than the configured limit.
    #[error("object graph deeper than the configured limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error(transparent)]
    Model(ModelError),
}

impl From<ModelError> for CloneError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ConstructionFailure { class } => CloneError::ConstructionFailure { class },
            ModelError::UnknownClass(id) => CloneError::UnknownClass(id),
            other => CloneError::Model(other),
        }
    }
}
