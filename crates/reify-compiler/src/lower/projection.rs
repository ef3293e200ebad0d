//! Projection Lowering
//!
//! Converts type arguments into projection descriptors.

use super::{RecursionGuard, TypeDescriptorBuilder};
use crate::error::CompileResult;
use crate::ir::{DescriptorExpr, RuntimeHelper};
use reify_types::TypeProjection;

impl<'a> TypeDescriptorBuilder<'a> {
    /// `*` becomes `getStarProjection()`; variant projections wrap the
    /// lowered argument in the helper for their variance
    pub(crate) fn build_projection(
        &self,
        proj: &TypeProjection,
        guard: &mut RecursionGuard,
    ) -> CompileResult<DescriptorExpr> {
        match proj {
            TypeProjection::Star => Ok(DescriptorExpr::call0(RuntimeHelper::GetStarProjection)),
            TypeProjection::Variant { variance, ty } => {
                let inner = self.build_with_guard(ty, guard)?;
                Ok(DescriptorExpr::call(
                    RuntimeHelper::for_variance(*variance),
                    vec![inner],
                ))
            }
        }
    }
}
