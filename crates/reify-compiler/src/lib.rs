//! Reify Compiler - Type to Runtime Descriptor Lowering
//!
//! This crate lowers fully resolved types into runtime construction
//! expressions that reify each type as a first-class type descriptor.

pub mod error;
pub mod ir;
pub mod lower;

pub use error::{CompileError, CompileResult};
pub use ir::{DescriptorExpr, PrettyPrint, PrettyPrinter, RuntimeHelper};
pub use lower::{RecursionGuard, TypeDescriptorBuilder};

use reify_types::{ResolvedType, TypeContext};

/// Lower a single type against `type_ctx`
pub fn lower_type(type_ctx: &TypeContext, ty: &ResolvedType) -> CompileResult<DescriptorExpr> {
    TypeDescriptorBuilder::new(type_ctx).build(ty)
}
