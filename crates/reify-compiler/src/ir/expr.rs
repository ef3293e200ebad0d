//! Descriptor Expressions
//!
//! The output of descriptor lowering: an expression tree of runtime helper
//! calls over class references and literals.

use super::helper::RuntimeHelper;
use serde::Serialize;

/// Runtime construction expression for a type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DescriptorExpr {
    /// helper(args...)
    Call {
        helper: RuntimeHelper,
        args: Vec<DescriptorExpr>,
    },
    /// Reference to the runtime class of a classifier
    ClassRef(String),
    /// Runtime class lookup for a reified type parameter
    ReifiedClass(String),
    /// String literal
    String(String),
    /// Boolean literal
    Boolean(bool),
    /// Array literal
    Array(Vec<DescriptorExpr>),
}

impl DescriptorExpr {
    /// Call a runtime helper
    pub fn call(helper: RuntimeHelper, args: Vec<DescriptorExpr>) -> Self {
        debug_assert_eq!(
            args.len(),
            helper.arity(),
            "wrong argument count for {}",
            helper
        );
        DescriptorExpr::Call { helper, args }
    }

    /// Call a niladic runtime helper
    pub fn call0(helper: RuntimeHelper) -> Self {
        Self::call(helper, Vec::new())
    }

    pub fn class_ref(name: impl Into<String>) -> Self {
        DescriptorExpr::ClassRef(name.into())
    }

    pub fn reified_class(name: impl Into<String>) -> Self {
        DescriptorExpr::ReifiedClass(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        DescriptorExpr::String(value.into())
    }

    /// The helper called, if this is a call
    pub fn helper(&self) -> Option<RuntimeHelper> {
        match self {
            DescriptorExpr::Call { helper, .. } => Some(*helper),
            _ => None,
        }
    }

    /// Call arguments, empty for non-calls
    pub fn args(&self) -> &[DescriptorExpr] {
        match self {
            DescriptorExpr::Call { args, .. } => args,
            _ => &[],
        }
    }

    /// Check if this is a call to `helper`
    pub fn is_call_to(&self, helper: RuntimeHelper) -> bool {
        self.helper() == Some(helper)
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            DescriptorExpr::Call { args, .. } | DescriptorExpr::Array(args) => {
                1 + args.iter().map(DescriptorExpr::node_count).sum::<usize>()
            }
            _ => 1,
        }
    }

    /// Nesting depth, 1 for a leaf
    pub fn depth(&self) -> usize {
        match self {
            DescriptorExpr::Call { args, .. } | DescriptorExpr::Array(args) => {
                1 + args.iter().map(DescriptorExpr::depth).max().unwrap_or(0)
            }
            _ => 1,
        }
    }

    /// Count calls to `helper` anywhere in the tree
    pub fn count_calls(&self, helper: RuntimeHelper) -> usize {
        let own = usize::from(self.is_call_to(helper));
        match self {
            DescriptorExpr::Call { args, .. } | DescriptorExpr::Array(args) => {
                own + args.iter().map(|a| a.count_calls(helper)).sum::<usize>()
            }
            _ => own,
        }
    }
}
