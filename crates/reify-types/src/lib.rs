//! Reify Type Model
//!
//! Fully resolved type trees, as handed to the descriptor lowering pass by
//! the type checker, and the context owning their declarations.

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod ty;

pub use context::TypeContext;
pub use error::TypeError;
pub use ty::{
    ClassId, ClassKind, Classifier, ClassifierDecl, ConcreteType, ResolvedType, TypeParameter,
    TypeParameterId, TypeProjection, Variance,
};
