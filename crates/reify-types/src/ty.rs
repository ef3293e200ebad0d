//! Core type definitions for resolved type trees

use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a class or interface declaration in the type context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub(crate) u32);

impl ClassId {
    /// Create a new ClassId from a raw value
    ///
    /// Note: Prefer `TypeContext::declare_class` to obtain ids.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value of this ClassId
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Identifier of a generic type parameter declaration in the type context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeParameterId(pub(crate) u32);

impl TypeParameterId {
    /// Create a new TypeParameterId from a raw value
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value of this TypeParameterId
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeParameterId({})", self.0)
    }
}

/// Declaration-site or use-site variance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    /// No variance annotation
    #[default]
    Invariant,
    /// `in T`: contravariant
    In,
    /// `out T`: covariant
    Out,
}

impl Variance {
    /// All variances, in declaration order
    pub const ALL: [Variance; 3] = [Variance::Invariant, Variance::In, Variance::Out];

    /// Runtime tag used in type-parameter descriptors
    pub fn tag(&self) -> &'static str {
        match self {
            Variance::Invariant => "invariant",
            Variance::In => "in",
            Variance::Out => "out",
        }
    }

    /// Decode a runtime tag produced by [`Variance::tag`]
    pub fn from_tag(tag: &str) -> Result<Self, TypeError> {
        match tag {
            "invariant" => Ok(Variance::Invariant),
            "in" => Ok(Variance::In),
            "out" => Ok(Variance::Out),
            other => Err(TypeError::UnknownVariance {
                tag: other.to_string(),
            }),
        }
    }

    /// Source keyword, empty for invariant
    pub fn keyword(&self) -> &'static str {
        match self {
            Variance::Invariant => "",
            Variance::In => "in",
            Variance::Out => "out",
        }
    }
}

impl FromStr for Variance {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variance::from_tag(s)
    }
}

impl fmt::Display for Variance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kind of a nominal classifier declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// A class
    #[default]
    Class,
    /// An interface
    Interface,
}

/// A class or interface declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassifierDecl {
    /// Fully qualified name, used for runtime class references
    pub name: String,
    /// Class or interface
    #[serde(default)]
    pub kind: ClassKind,
}

/// A generic type parameter declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Parameter name (e.g., "T")
    pub name: String,
    /// Upper bounds in declaration order (`T : A, B`)
    #[serde(default)]
    pub upper_bounds: Vec<ResolvedType>,
    /// Declaration-site variance
    #[serde(default)]
    pub variance: Variance,
    /// Whether a concrete runtime class is available for this parameter
    #[serde(default)]
    pub reified: bool,
}

impl TypeParameter {
    /// Create an unbounded, invariant, non-reified type parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            upper_bounds: Vec::new(),
            variance: Variance::Invariant,
            reified: false,
        }
    }

    /// Set the declaration-site variance
    pub fn with_variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }

    /// Mark the parameter as reified
    pub fn reified(mut self) -> Self {
        self.reified = true;
        self
    }

    /// Set the upper bounds
    pub fn with_upper_bounds(mut self, bounds: Vec<ResolvedType>) -> Self {
        self.upper_bounds = bounds;
        self
    }
}

/// The nominal part of a concrete type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classifier {
    /// A class or interface
    Class(ClassId),
    /// A generic type parameter
    TypeParameter(TypeParameterId),
}

impl Classifier {
    /// Get the class id if this is a class classifier
    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            Classifier::Class(id) => Some(*id),
            Classifier::TypeParameter(_) => None,
        }
    }

    /// Get the type parameter id if this is a type parameter classifier
    pub fn as_type_parameter(&self) -> Option<TypeParameterId> {
        match self {
            Classifier::TypeParameter(id) => Some(*id),
            Classifier::Class(_) => None,
        }
    }
}

/// A generic type argument: star projection or variance-annotated type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeProjection {
    /// `*`
    Star,
    /// `T`, `in T`, `out T`
    Variant {
        /// Use-site variance
        variance: Variance,
        /// Projected type
        ty: ResolvedType,
    },
}

impl TypeProjection {
    /// Invariant projection of `ty`
    pub fn invariant(ty: ResolvedType) -> Self {
        TypeProjection::Variant {
            variance: Variance::Invariant,
            ty,
        }
    }

    /// `in` projection of `ty`
    pub fn contravariant(ty: ResolvedType) -> Self {
        TypeProjection::Variant {
            variance: Variance::In,
            ty,
        }
    }

    /// `out` projection of `ty`
    pub fn covariant(ty: ResolvedType) -> Self {
        TypeProjection::Variant {
            variance: Variance::Out,
            ty,
        }
    }

    /// Check if this is the star projection
    pub fn is_star(&self) -> bool {
        matches!(self, TypeProjection::Star)
    }
}

/// A concrete (non-dynamic) resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConcreteType {
    /// Nominal classifier, absent for intersection types
    #[serde(default)]
    pub classifier: Option<Classifier>,
    /// Whether the type is marked nullable (`T?`)
    #[serde(default)]
    pub nullable: bool,
    /// Type arguments in positional order
    #[serde(default)]
    pub arguments: Vec<TypeProjection>,
    /// Supertypes of an intersection type (only meaningful without a classifier)
    #[serde(default)]
    pub supertypes: Vec<ResolvedType>,
}

/// A fully resolved type handed in by the type checker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedType {
    /// A nominal, type-parameter or intersection type
    Concrete(ConcreteType),
    /// The dynamic type
    Dynamic,
}

impl ResolvedType {
    /// `C<args>`, non-nullable
    pub fn class(id: ClassId, arguments: Vec<TypeProjection>) -> Self {
        ResolvedType::Concrete(ConcreteType {
            classifier: Some(Classifier::Class(id)),
            nullable: false,
            arguments,
            supertypes: Vec::new(),
        })
    }

    /// A use of a type parameter, non-nullable
    pub fn type_parameter(id: TypeParameterId) -> Self {
        ResolvedType::Concrete(ConcreteType {
            classifier: Some(Classifier::TypeParameter(id)),
            nullable: false,
            arguments: Vec::new(),
            supertypes: Vec::new(),
        })
    }

    /// `A & B & ...`
    pub fn intersection(supertypes: Vec<ResolvedType>) -> Self {
        ResolvedType::Concrete(ConcreteType {
            classifier: None,
            nullable: false,
            arguments: Vec::new(),
            supertypes,
        })
    }

    /// The dynamic type
    pub fn dynamic() -> Self {
        ResolvedType::Dynamic
    }

    /// The same type marked nullable (no-op for dynamic)
    pub fn nullable(self) -> Self {
        match self {
            ResolvedType::Concrete(mut concrete) => {
                concrete.nullable = true;
                ResolvedType::Concrete(concrete)
            }
            ResolvedType::Dynamic => ResolvedType::Dynamic,
        }
    }

    /// Check if this is the dynamic type
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ResolvedType::Dynamic)
    }

    /// Check if this type is marked nullable
    pub fn is_nullable(&self) -> bool {
        match self {
            ResolvedType::Concrete(concrete) => concrete.nullable,
            ResolvedType::Dynamic => false,
        }
    }

    /// Get the concrete type if this is not dynamic
    pub fn as_concrete(&self) -> Option<&ConcreteType> {
        match self {
            ResolvedType::Concrete(concrete) => Some(concrete),
            ResolvedType::Dynamic => None,
        }
    }

    /// Get the classifier, if any
    pub fn classifier(&self) -> Option<Classifier> {
        self.as_concrete().and_then(|c| c.classifier)
    }
}
