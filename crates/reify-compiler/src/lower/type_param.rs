//! Type Parameter Lowering
//!
//! Converts type parameter declarations into type-parameter descriptors,
//! cutting cycles through self-referential bounds.

use super::{reified_class, RecursionGuard, TypeDescriptorBuilder};
use crate::error::CompileResult;
use crate::ir::{DescriptorExpr, RuntimeHelper};
use reify_types::{Classifier, TypeParameterId};
use rustc_hash::FxHashSet;
use tracing::debug;

impl<'a> TypeDescriptorBuilder<'a> {
    /// Lower a type parameter on the current path
    ///
    /// A parameter already being expanded lowers to `getStarProjection()`.
    /// Reified parameters lower to their runtime class and never enter the
    /// guard. Otherwise the parameter is entered, its bounds lowered in
    /// order, and it is left again whatever the outcome.
    pub(crate) fn build_type_parameter_with_guard(
        &self,
        id: TypeParameterId,
        guard: &mut RecursionGuard,
    ) -> CompileResult<DescriptorExpr> {
        let param = self.type_ctx.type_parameter(id)?;

        if guard.contains(id) {
            debug!(param = %param.name, "cutting recursive bound with a star projection");
            return Ok(DescriptorExpr::call0(RuntimeHelper::GetStarProjection));
        }

        if param.reified {
            return Ok(reified_class(&param.name, false));
        }

        guard.enter(id);
        let bounds: CompileResult<Vec<_>> = param
            .upper_bounds
            .iter()
            .map(|bound| self.build_with_guard(bound, guard))
            .collect();
        guard.leave(id);

        Ok(DescriptorExpr::call(
            RuntimeHelper::CreateTypeParameterDescriptor,
            vec![
                DescriptorExpr::string(&param.name),
                DescriptorExpr::Array(bounds?),
                DescriptorExpr::string(param.variance.tag()),
            ],
        ))
    }

    /// Runtime class standing in for a type parameter at runtime
    ///
    /// A reified parameter has its own class. Otherwise the first upper bound
    /// that reaches a class wins, following type parameter bounds in
    /// declaration order. Returns `None` when no bound reaches a class.
    pub(crate) fn erased_class(
        &self,
        id: TypeParameterId,
    ) -> CompileResult<Option<DescriptorExpr>> {
        let mut visited = FxHashSet::default();
        self.erased_class_inner(id, &mut visited)
    }

    fn erased_class_inner(
        &self,
        id: TypeParameterId,
        visited: &mut FxHashSet<TypeParameterId>,
    ) -> CompileResult<Option<DescriptorExpr>> {
        let param = self.type_ctx.type_parameter(id)?;
        if param.reified {
            return Ok(Some(reified_class(&param.name, false)));
        }
        if !visited.insert(id) {
            return Ok(None);
        }

        for bound in &param.upper_bounds {
            match bound.classifier() {
                Some(Classifier::Class(class)) => {
                    let decl = self.type_ctx.class(class)?;
                    return Ok(Some(DescriptorExpr::class_ref(&decl.name)));
                }
                Some(Classifier::TypeParameter(next)) => {
                    if let Some(class) = self.erased_class_inner(next, visited)? {
                        return Ok(Some(class));
                    }
                }
                None => {}
            }
        }
        Ok(None)
    }
}
