//! Type to Descriptor Lowering
//!
//! Converts resolved types into runtime construction expressions that build
//! a first-class type descriptor when evaluated.
//!
//! A concrete type lowers to
//! `createTypeDescriptor(classifier, [projections...], isNullable)`, where the
//! classifier is a runtime class reference, an intersection class, or a
//! type-parameter descriptor, and each projection recurses into the same
//! lowering. Recursive bounds such as `T : Comparable<T>` are cut with a
//! [`RecursionGuard`] scoped to one top-level request.

mod guard;
mod projection;
mod type_param;

pub use guard::RecursionGuard;

use crate::error::{CompileError, CompileResult};
use crate::ir::{DescriptorExpr, RuntimeHelper};
use reify_types::{Classifier, ConcreteType, ResolvedType, TypeContext, TypeParameterId};
use tracing::trace;

/// Lowers resolved types into descriptor expressions
///
/// Holds no per-request state, so one builder may serve many requests,
/// including from several threads.
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptorBuilder<'a> {
    /// Declarations referenced by the types being lowered
    type_ctx: &'a TypeContext,
}

impl<'a> TypeDescriptorBuilder<'a> {
    /// Create a new builder
    pub fn new(type_ctx: &'a TypeContext) -> Self {
        Self { type_ctx }
    }

    /// The context this builder resolves ids against
    pub fn type_context(&self) -> &'a TypeContext {
        self.type_ctx
    }

    /// Lower a type with a fresh recursion guard
    pub fn build(&self, ty: &ResolvedType) -> CompileResult<DescriptorExpr> {
        let mut guard = RecursionGuard::new();
        let result = self.build_with_guard(ty, &mut guard);
        debug_assert!(guard.is_empty());
        result
    }

    /// Lower a type parameter declaration with a fresh recursion guard
    pub fn build_type_parameter(&self, id: TypeParameterId) -> CompileResult<DescriptorExpr> {
        let mut guard = RecursionGuard::new();
        let result = self.build_type_parameter_with_guard(id, &mut guard);
        debug_assert!(guard.is_empty());
        result
    }

    /// Lower independent types, each with its own guard, in input order
    pub fn build_all(&self, types: &[ResolvedType]) -> Vec<CompileResult<DescriptorExpr>> {
        types.iter().map(|ty| self.build(ty)).collect()
    }

    /// Direct class lookup if `ty` is a use of a reified type parameter
    ///
    /// Callers that can consume a runtime class directly check this before
    /// asking for a full descriptor.
    pub fn reified_lookup(&self, ty: &ResolvedType) -> CompileResult<Option<DescriptorExpr>> {
        let Some(concrete) = ty.as_concrete() else {
            return Ok(None);
        };
        let Some(Classifier::TypeParameter(id)) = concrete.classifier else {
            return Ok(None);
        };

        let param = self.type_ctx.type_parameter(id)?;
        if !param.reified {
            return Ok(None);
        }
        Ok(Some(reified_class(&param.name, concrete.nullable)))
    }

    /// Lower a type on the current path
    pub(crate) fn build_with_guard(
        &self,
        ty: &ResolvedType,
        guard: &mut RecursionGuard,
    ) -> CompileResult<DescriptorExpr> {
        trace!(depth = guard.depth(), "lowering {}", self.type_ctx.display(ty));

        let concrete = match ty {
            ResolvedType::Dynamic => {
                return Ok(DescriptorExpr::call0(
                    RuntimeHelper::CreateDynamicTypeDescriptor,
                ))
            }
            ResolvedType::Concrete(concrete) => concrete,
        };

        if let Some(lookup) = self.reified_lookup(ty)? {
            return Ok(lookup);
        }

        let classifier = self.build_classifier(ty, concrete, guard)?;

        let mut arguments = Vec::with_capacity(concrete.arguments.len());
        for arg in &concrete.arguments {
            arguments.push(self.build_projection(arg, guard)?);
        }

        Ok(DescriptorExpr::call(
            RuntimeHelper::CreateTypeDescriptor,
            vec![
                classifier,
                DescriptorExpr::Array(arguments),
                DescriptorExpr::Boolean(concrete.nullable),
            ],
        ))
    }

    fn build_classifier(
        &self,
        ty: &ResolvedType,
        concrete: &ConcreteType,
        guard: &mut RecursionGuard,
    ) -> CompileResult<DescriptorExpr> {
        match concrete.classifier {
            Some(Classifier::TypeParameter(id)) => self.build_type_parameter_with_guard(id, guard),
            Some(Classifier::Class(id)) => {
                let decl = self.type_ctx.class(id)?;
                Ok(DescriptorExpr::class_ref(&decl.name))
            }
            None => self.build_intersection_class(ty, &concrete.supertypes),
        }
    }

    /// `getIntersectionClass([C1, C2, ...])`, one class per supertype in order
    ///
    /// A type parameter supertype contributes the runtime class of its erasure.
    fn build_intersection_class(
        &self,
        ty: &ResolvedType,
        supertypes: &[ResolvedType],
    ) -> CompileResult<DescriptorExpr> {
        if supertypes.is_empty() {
            return Err(CompileError::internal(format!(
                "intersection type `{}` has no supertypes",
                self.type_ctx.display(ty)
            )));
        }

        let mut classes = Vec::with_capacity(supertypes.len());
        for sup in supertypes {
            let class = match sup.classifier() {
                Some(Classifier::Class(id)) => {
                    DescriptorExpr::class_ref(&self.type_ctx.class(id)?.name)
                }
                Some(Classifier::TypeParameter(id)) => match self.erased_class(id)? {
                    Some(class) => class,
                    None => return Err(self.classless_supertype(ty, sup)),
                },
                None => return Err(self.classless_supertype(ty, sup)),
            };
            classes.push(class);
        }

        Ok(DescriptorExpr::call(
            RuntimeHelper::GetIntersectionClass,
            vec![DescriptorExpr::Array(classes)],
        ))
    }

    fn classless_supertype(&self, ty: &ResolvedType, sup: &ResolvedType) -> CompileError {
        CompileError::internal(format!(
            "supertype `{}` of intersection type `{}` has no runtime class",
            self.type_ctx.display_supertype(sup),
            self.type_ctx.display(ty)
        ))
    }
}

/// Runtime class lookup for a reified parameter, marked nullable when needed
fn reified_class(name: &str, nullable: bool) -> DescriptorExpr {
    let class = DescriptorExpr::reified_class(name);
    if nullable {
        DescriptorExpr::call(RuntimeHelper::MarkNullable, vec![class])
    } else {
        class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reify_types::{ClassKind, TypeParameter, TypeProjection};

    fn class_descriptor(name: &str, args: Vec<DescriptorExpr>, nullable: bool) -> DescriptorExpr {
        DescriptorExpr::call(
            RuntimeHelper::CreateTypeDescriptor,
            vec![
                DescriptorExpr::class_ref(name),
                DescriptorExpr::Array(args),
                DescriptorExpr::Boolean(nullable),
            ],
        )
    }

    #[test]
    fn test_dynamic() {
        let ctx = TypeContext::new();
        let builder = TypeDescriptorBuilder::new(&ctx);
        assert_eq!(
            builder.build(&ResolvedType::dynamic()).unwrap(),
            DescriptorExpr::call0(RuntimeHelper::CreateDynamicTypeDescriptor)
        );
    }

    #[test]
    fn test_nullable_class() {
        let mut ctx = TypeContext::new();
        let string = ctx.declare_class("String", ClassKind::Class).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let ty = ResolvedType::class(string, vec![]).nullable();
        assert_eq!(
            builder.build(&ty).unwrap(),
            class_descriptor("String", vec![], true)
        );
    }

    #[test]
    fn test_intersection() {
        let mut ctx = TypeContext::new();
        let a = ctx.declare_class("A", ClassKind::Interface).unwrap();
        let b = ctx.declare_class("B", ClassKind::Interface).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let ty = ResolvedType::intersection(vec![
            ResolvedType::class(b, vec![]),
            ResolvedType::class(a, vec![]),
        ]);
        let expected = DescriptorExpr::call(
            RuntimeHelper::CreateTypeDescriptor,
            vec![
                DescriptorExpr::call(
                    RuntimeHelper::GetIntersectionClass,
                    vec![DescriptorExpr::Array(vec![
                        DescriptorExpr::class_ref("B"),
                        DescriptorExpr::class_ref("A"),
                    ])],
                ),
                DescriptorExpr::Array(vec![]),
                DescriptorExpr::Boolean(false),
            ],
        );
        assert_eq!(builder.build(&ty).unwrap(), expected);
    }

    #[test]
    fn test_empty_intersection_is_internal_error() {
        let ctx = TypeContext::new();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let err = builder.build(&ResolvedType::intersection(vec![])).unwrap_err();
        assert!(err.is_internal());
        assert!(err.to_string().contains("has no supertypes"));
    }

    #[test]
    fn test_classless_supertype_is_internal_error() {
        let mut ctx = TypeContext::new();
        let a = ctx.declare_class("A", ClassKind::Interface).unwrap();
        let t = ctx.declare_type_parameter(TypeParameter::new("T")).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let nested = ResolvedType::intersection(vec![
            ResolvedType::class(a, vec![]),
            ResolvedType::dynamic(),
        ]);
        let err = builder.build(&nested).unwrap_err();
        assert_eq!(
            err,
            CompileError::internal(
                "supertype `dynamic` of intersection type `A & dynamic` has no runtime class"
            )
        );

        let with_param = ResolvedType::intersection(vec![
            ResolvedType::type_parameter(t),
            ResolvedType::class(a, vec![]),
        ]);
        assert_eq!(
            builder.build(&with_param).unwrap_err(),
            CompileError::internal(
                "supertype `T` of intersection type `T & A` has no runtime class"
            )
        );
    }

    #[test]
    fn test_nested_intersection_supertype_is_internal_error() {
        let mut ctx = TypeContext::new();
        let a = ctx.declare_class("A", ClassKind::Interface).unwrap();
        let b = ctx.declare_class("B", ClassKind::Interface).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let ty = ResolvedType::intersection(vec![
            ResolvedType::class(a, vec![]),
            ResolvedType::intersection(vec![ResolvedType::class(b, vec![])]),
        ]);
        assert_eq!(
            builder.build(&ty).unwrap_err(),
            CompileError::internal(
                "supertype `(B)` of intersection type `A & (B)` has no runtime class"
            )
        );
    }

    fn intersection_descriptor(classes: Vec<DescriptorExpr>) -> DescriptorExpr {
        DescriptorExpr::call(
            RuntimeHelper::CreateTypeDescriptor,
            vec![
                DescriptorExpr::call(
                    RuntimeHelper::GetIntersectionClass,
                    vec![DescriptorExpr::Array(classes)],
                ),
                DescriptorExpr::Array(vec![]),
                DescriptorExpr::Boolean(false),
            ],
        )
    }

    #[test]
    fn test_reified_supertype() {
        let mut ctx = TypeContext::new();
        let a = ctx.declare_class("A", ClassKind::Interface).unwrap();
        let r = ctx.declare_type_parameter(TypeParameter::new("R").reified()).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let ty = ResolvedType::intersection(vec![
            ResolvedType::class(a, vec![]),
            ResolvedType::type_parameter(r),
        ]);
        assert_eq!(
            builder.build(&ty).unwrap(),
            intersection_descriptor(vec![
                DescriptorExpr::class_ref("A"),
                DescriptorExpr::reified_class("R"),
            ])
        );
    }

    #[test]
    fn test_definitely_non_null_type_parameter() {
        // T & Any, where T : Number
        let mut ctx = TypeContext::new();
        let any = ctx.declare_class("Any", ClassKind::Class).unwrap();
        let number = ctx.declare_class("Number", ClassKind::Class).unwrap();
        let t = ctx
            .declare_type_parameter(
                TypeParameter::new("T")
                    .with_upper_bounds(vec![ResolvedType::class(number, vec![]).nullable()]),
            )
            .unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let ty = ResolvedType::intersection(vec![
            ResolvedType::type_parameter(t),
            ResolvedType::class(any, vec![]),
        ]);
        assert_eq!(
            builder.build(&ty).unwrap(),
            intersection_descriptor(vec![
                DescriptorExpr::class_ref("Number"),
                DescriptorExpr::class_ref("Any"),
            ])
        );
    }

    #[test]
    fn test_type_parameter_supertype_follows_bounds() {
        // T : U, U : V, V : Comparable<V>
        let mut ctx = TypeContext::new();
        let any = ctx.declare_class("Any", ClassKind::Class).unwrap();
        let comparable = ctx.declare_class("Comparable", ClassKind::Interface).unwrap();
        let t = ctx.declare_type_parameter(TypeParameter::new("T")).unwrap();
        let u = ctx.declare_type_parameter(TypeParameter::new("U")).unwrap();
        let v = ctx.declare_type_parameter(TypeParameter::new("V")).unwrap();
        let v_bound = ResolvedType::class(
            comparable,
            vec![TypeProjection::invariant(ResolvedType::type_parameter(v))],
        );
        ctx.set_upper_bounds(t, vec![ResolvedType::type_parameter(u)]).unwrap();
        ctx.set_upper_bounds(u, vec![ResolvedType::type_parameter(v)]).unwrap();
        ctx.set_upper_bounds(v, vec![v_bound]).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let ty = ResolvedType::intersection(vec![
            ResolvedType::type_parameter(t),
            ResolvedType::class(any, vec![]),
        ]);
        assert_eq!(
            builder.build(&ty).unwrap(),
            intersection_descriptor(vec![
                DescriptorExpr::class_ref("Comparable"),
                DescriptorExpr::class_ref("Any"),
            ])
        );
    }

    #[test]
    fn test_type_parameter_supertype_without_class_bound() {
        // T : U, U : T
        let mut ctx = TypeContext::new();
        let any = ctx.declare_class("Any", ClassKind::Class).unwrap();
        let t = ctx.declare_type_parameter(TypeParameter::new("T")).unwrap();
        let u = ctx.declare_type_parameter(TypeParameter::new("U")).unwrap();
        ctx.set_upper_bounds(t, vec![ResolvedType::type_parameter(u)]).unwrap();
        ctx.set_upper_bounds(u, vec![ResolvedType::type_parameter(t)]).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let ty = ResolvedType::intersection(vec![
            ResolvedType::type_parameter(t),
            ResolvedType::class(any, vec![]),
        ]);
        assert_eq!(
            builder.build(&ty).unwrap_err(),
            CompileError::internal(
                "supertype `T` of intersection type `T & Any` has no runtime class"
            )
        );
    }

    #[test]
    fn test_dangling_class_id() {
        let ctx = TypeContext::new();
        let builder = TypeDescriptorBuilder::new(&ctx);
        let ty = ResolvedType::class(reify_types::ClassId::new(7), vec![]);
        assert!(matches!(
            builder.build(&ty),
            Err(CompileError::Type(reify_types::TypeError::UnknownClassifier { .. }))
        ));
    }

    #[test]
    fn test_reified_lookup() {
        let mut ctx = TypeContext::new();
        let t = ctx.declare_type_parameter(TypeParameter::new("T").reified()).unwrap();
        let u = ctx.declare_type_parameter(TypeParameter::new("U")).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        assert_eq!(
            builder.reified_lookup(&ResolvedType::type_parameter(t)).unwrap(),
            Some(DescriptorExpr::reified_class("T"))
        );
        assert_eq!(
            builder.reified_lookup(&ResolvedType::type_parameter(u)).unwrap(),
            None
        );
        assert_eq!(builder.reified_lookup(&ResolvedType::dynamic()).unwrap(), None);
    }

    #[test]
    fn test_build_all_isolates_requests() {
        let mut ctx = TypeContext::new();
        let list = ctx.declare_class("List", ClassKind::Interface).unwrap();
        let builder = TypeDescriptorBuilder::new(&ctx);

        let results = builder.build_all(&[
            ResolvedType::dynamic(),
            ResolvedType::intersection(vec![]),
            ResolvedType::class(list, vec![TypeProjection::Star]),
        ]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap(),
            &class_descriptor(
                "List",
                vec![DescriptorExpr::call0(RuntimeHelper::GetStarProjection)],
                false
            )
        );
    }
}
