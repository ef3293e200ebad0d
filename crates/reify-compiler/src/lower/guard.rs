//! Recursion guard for type parameter expansion

use reify_types::TypeParameterId;
use rustc_hash::FxHashSet;

/// Type parameters currently being expanded on the active lowering path
///
/// A parameter is entered before its bounds are lowered and left right after,
/// so it is only poisoned for its own descendants. Sibling subtrees that
/// mention the same parameter expand it in full.
#[derive(Debug, Default)]
pub struct RecursionGuard {
    active: FxHashSet<TypeParameterId>,
}

impl RecursionGuard {
    /// Empty guard for one top-level request
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as being expanded. Returns false if it already was.
    pub fn enter(&mut self, id: TypeParameterId) -> bool {
        self.active.insert(id)
    }

    /// Finish expanding `id`
    pub fn leave(&mut self, id: TypeParameterId) {
        let removed = self.active.remove(&id);
        debug_assert!(removed, "left {} without entering it", id);
    }

    /// Whether `id` is being expanded on the current path
    pub fn contains(&self, id: TypeParameterId) -> bool {
        self.active.contains(&id)
    }

    /// Number of parameters being expanded
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Whether no parameter is being expanded
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
