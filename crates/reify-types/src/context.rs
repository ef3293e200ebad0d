//! Type context owning classifier and type parameter declarations

use crate::error::TypeError;
use crate::ty::{
    ClassId, ClassKind, Classifier, ClassifierDecl, ResolvedType, TypeParameter,
    TypeParameterId, TypeProjection, Variance,
};
use rustc_hash::FxHashMap;
use std::fmt::Write;

/// Declarations referenced by resolved types
///
/// Resolved types refer to classes and type parameters by id. Type parameter
/// bounds may mention the parameter itself (`T : Comparable<T>`), so a
/// parameter is declared first and its bounds are attached afterwards.
#[derive(Debug, Clone, Default)]
pub struct TypeContext {
    /// Class and interface declarations, indexed by ClassId
    classes: Vec<ClassifierDecl>,

    /// Qualified name to ClassId
    class_names: FxHashMap<String, ClassId>,

    /// Type parameter declarations, indexed by TypeParameterId
    type_params: Vec<TypeParameter>,
}

impl TypeContext {
    /// Create a new empty type context
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from declaration lists, in id order
    pub fn from_declarations(
        classes: Vec<ClassifierDecl>,
        type_params: Vec<TypeParameter>,
    ) -> Result<Self, TypeError> {
        let mut ctx = TypeContext::new();
        for decl in classes {
            ctx.declare_class(decl.name, decl.kind)?;
        }
        for param in type_params {
            ctx.declare_type_parameter(param)?;
        }
        Ok(ctx)
    }

    /// Declare a class or interface
    pub fn declare_class(
        &mut self,
        name: impl Into<String>,
        kind: ClassKind,
    ) -> Result<ClassId, TypeError> {
        let name = name.into();
        if self.class_names.contains_key(&name) {
            return Err(TypeError::DuplicateClassifier { name });
        }

        let id = ClassId(next_index(self.classes.len(), "class")?);
        self.class_names.insert(name.clone(), id);
        self.classes.push(ClassifierDecl { name, kind });
        Ok(id)
    }

    /// Declare a type parameter, returning its id
    pub fn declare_type_parameter(
        &mut self,
        param: TypeParameter,
    ) -> Result<TypeParameterId, TypeError> {
        let id = TypeParameterId(next_index(self.type_params.len(), "type parameter")?);
        self.type_params.push(param);
        Ok(id)
    }

    /// Attach upper bounds to an already declared type parameter
    pub fn set_upper_bounds(
        &mut self,
        id: TypeParameterId,
        bounds: Vec<ResolvedType>,
    ) -> Result<(), TypeError> {
        let param = self
            .type_params
            .get_mut(id.0 as usize)
            .ok_or(TypeError::UnknownTypeParameter { id })?;
        param.upper_bounds = bounds;
        Ok(())
    }

    /// Look up a class id by qualified name
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// Get a classifier declaration by id
    pub fn get_class(&self, id: ClassId) -> Option<&ClassifierDecl> {
        self.classes.get(id.0 as usize)
    }

    /// Get a classifier declaration, failing on a dangling id
    pub fn class(&self, id: ClassId) -> Result<&ClassifierDecl, TypeError> {
        self.get_class(id).ok_or(TypeError::UnknownClassifier { id })
    }

    /// Get a type parameter declaration by id
    pub fn get_type_parameter(&self, id: TypeParameterId) -> Option<&TypeParameter> {
        self.type_params.get(id.0 as usize)
    }

    /// Get a type parameter declaration, failing on a dangling id
    pub fn type_parameter(&self, id: TypeParameterId) -> Result<&TypeParameter, TypeError> {
        self.get_type_parameter(id)
            .ok_or(TypeError::UnknownTypeParameter { id })
    }

    /// Number of declared classifiers
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of declared type parameters
    pub fn type_parameter_count(&self) -> usize {
        self.type_params.len()
    }

    /// Check that every id reachable from `ty` is declared
    ///
    /// Type parameter bounds are not followed; use [`TypeContext::validate_all`]
    /// to check the whole context.
    pub fn validate(&self, ty: &ResolvedType) -> Result<(), TypeError> {
        let concrete = match ty {
            ResolvedType::Dynamic => return Ok(()),
            ResolvedType::Concrete(concrete) => concrete,
        };

        match concrete.classifier {
            Some(Classifier::Class(id)) => {
                self.class(id)?;
            }
            Some(Classifier::TypeParameter(id)) => {
                self.type_parameter(id)?;
            }
            None => {}
        }

        for arg in &concrete.arguments {
            if let TypeProjection::Variant { ty, .. } = arg {
                self.validate(ty)?;
            }
        }
        for sup in &concrete.supertypes {
            self.validate(sup)?;
        }
        Ok(())
    }

    /// Check every type parameter bound in the context
    pub fn validate_all(&self) -> Result<(), TypeError> {
        for param in &self.type_params {
            for bound in &param.upper_bounds {
                self.validate(bound)?;
            }
        }
        Ok(())
    }

    /// Render a type in source syntax for diagnostics
    pub fn display(&self, ty: &ResolvedType) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    /// Render a type as it reads among the supertypes of an intersection
    pub fn display_supertype(&self, ty: &ResolvedType) -> String {
        let mut out = String::new();
        self.write_supertype(&mut out, ty);
        out
    }

    fn write_type(&self, out: &mut String, ty: &ResolvedType) {
        let concrete = match ty {
            ResolvedType::Dynamic => {
                out.push_str("dynamic");
                return;
            }
            ResolvedType::Concrete(concrete) => concrete,
        };

        match concrete.classifier {
            Some(classifier) => {
                self.write_classifier(out, classifier);
                if !concrete.arguments.is_empty() {
                    out.push('<');
                    for (i, arg) in concrete.arguments.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_projection(out, arg);
                    }
                    out.push('>');
                }
                if concrete.nullable {
                    out.push('?');
                }
            }
            None => {
                if concrete.nullable {
                    out.push('(');
                }
                if concrete.supertypes.is_empty() {
                    out.push_str("<empty intersection>");
                }
                for (i, sup) in concrete.supertypes.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" & ");
                    }
                    self.write_supertype(out, sup);
                }
                if concrete.nullable {
                    out.push_str(")?");
                }
            }
        }
    }

    /// Nested intersections are parenthesized so `A & (B)` stays distinct from `A & B`
    fn write_supertype(&self, out: &mut String, sup: &ResolvedType) {
        let nested = matches!(
            sup.as_concrete(),
            Some(concrete) if concrete.classifier.is_none() && !concrete.nullable
        );
        if nested {
            out.push('(');
            self.write_type(out, sup);
            out.push(')');
        } else {
            self.write_type(out, sup);
        }
    }

        fn write_classifier(&self, out: &mut String, classifier: Classifier) {
        match classifier {
            Classifier::Class(id) => match self.get_class(id) {
                Some(decl) => out.push_str(&decl.name),
                None => {
                    let _ = write!(out, "<{}>", id);
                }
            },
            Classifier::TypeParameter(id) => match self.get_type_parameter(id) {
                Some(param) => out.push_str(&param.name),
                None => {
                    let _ = write!(out, "<{}>", id);
                }
            },
        }
    }

    fn write_projection(&self, out: &mut String, proj: &TypeProjection) {
        match proj {
            TypeProjection::Star => out.push('*'),
            TypeProjection::Variant { variance, ty } => {
                if *variance != Variance::Invariant {
                    out.push_str(variance.keyword());
                    out.push(' ');
                }
                self.write_type(out, ty);
            }
        }
    }
}

/// Id for the next entry of a declaration list holding `len` entries
fn next_index(len: usize, kind: &'static str) -> Result<u32, TypeError> {
    u32::try_from(len).map_err(|_| TypeError::TooManyDeclarations { kind })
}
