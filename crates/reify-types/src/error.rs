//! Type model errors

use crate::ty::{ClassId, TypeParameterId};
use thiserror::Error;

/// Errors that can occur while building or querying a type context
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A class id that was never declared in the context
    #[error("Unknown classifier: {id}")]
    UnknownClassifier {
        /// The dangling id
        id: ClassId,
    },

    /// A type parameter id that was never declared in the context
    #[error("Unknown type parameter: {id}")]
    UnknownTypeParameter {
        /// The dangling id
        id: TypeParameterId,
    },

    /// A variance tag that does not decode to any variance
    #[error("Unknown variance tag: {tag:?}")]
    UnknownVariance {
        /// The tag as found
        tag: String,
    },

    /// Two classifier declarations share one qualified name
    #[error("Duplicate classifier: {name}")]
    DuplicateClassifier {
        /// Qualified name declared twice
        name: String,
    },

    /// A declaration list outgrew the id space
    #[error("Too many {kind} declarations")]
    TooManyDeclarations {
        /// What was being declared
        kind: &'static str,
    },
}
