//! Runtime helper functions
//!
//! The closed set of runtime entry points a descriptor expression may call.
//! Names must match the runtime library's exported functions.

use reify_types::Variance;
use serde::Serialize;

/// Runtime helper addressed by a descriptor call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuntimeHelper {
    /// `createDynamicTypeDescriptor()`
    CreateDynamicTypeDescriptor,
    /// `createTypeDescriptor(classifier, arguments, isNullable)`
    CreateTypeDescriptor,
    /// `createTypeParameterDescriptor(name, upperBounds, variance)`
    CreateTypeParameterDescriptor,
    /// `createInvariantProjection(type)`
    CreateInvariantProjection,
    /// `createContravariantProjection(type)`
    CreateContravariantProjection,
    /// `createCovariantProjection(type)`
    CreateCovariantProjection,
    /// `getStarProjection()`
    GetStarProjection,
    /// `getIntersectionClass(classes)`
    GetIntersectionClass,
    /// `markNullable(class)`
    MarkNullable,
}

impl RuntimeHelper {
    pub const ALL: [RuntimeHelper; 9] = [
        RuntimeHelper::CreateDynamicTypeDescriptor,
        RuntimeHelper::CreateTypeDescriptor,
        RuntimeHelper::CreateTypeParameterDescriptor,
        RuntimeHelper::CreateInvariantProjection,
        RuntimeHelper::CreateContravariantProjection,
        RuntimeHelper::CreateCovariantProjection,
        RuntimeHelper::GetStarProjection,
        RuntimeHelper::GetIntersectionClass,
        RuntimeHelper::MarkNullable,
    ];

    /// Runtime function name
    pub fn name(&self) -> &'static str {
        match self {
            RuntimeHelper::CreateDynamicTypeDescriptor => "createDynamicTypeDescriptor",
            RuntimeHelper::CreateTypeDescriptor => "createTypeDescriptor",
            RuntimeHelper::CreateTypeParameterDescriptor => "createTypeParameterDescriptor",
            RuntimeHelper::CreateInvariantProjection => "createInvariantProjection",
            RuntimeHelper::CreateContravariantProjection => "createContravariantProjection",
            RuntimeHelper::CreateCovariantProjection => "createCovariantProjection",
            RuntimeHelper::GetStarProjection => "getStarProjection",
            RuntimeHelper::GetIntersectionClass => "getIntersectionClass",
            RuntimeHelper::MarkNullable => "markNullable",
        }
    }

    /// Number of arguments the runtime function takes
    pub fn arity(&self) -> usize {
        match self {
            RuntimeHelper::CreateDynamicTypeDescriptor | RuntimeHelper::GetStarProjection => 0,
            RuntimeHelper::CreateInvariantProjection
            | RuntimeHelper::CreateContravariantProjection
            | RuntimeHelper::CreateCovariantProjection
            | RuntimeHelper::GetIntersectionClass
            | RuntimeHelper::MarkNullable => 1,
            RuntimeHelper::CreateTypeDescriptor | RuntimeHelper::CreateTypeParameterDescriptor => 3,
        }
    }

    /// Projection helper for a use-site variance
    pub fn for_variance(variance: Variance) -> Self {
        match variance {
            Variance::Invariant => RuntimeHelper::CreateInvariantProjection,
            Variance::In => RuntimeHelper::CreateContravariantProjection,
            Variance::Out => RuntimeHelper::CreateCovariantProjection,
        }
    }

    /// Look up a helper by runtime function name
    pub fn from_name(name: &str) -> Option<Self> {
        RuntimeHelper::ALL.into_iter().find(|h| h.name() == name)
    }
}

impl std::fmt::Display for RuntimeHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
