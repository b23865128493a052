//! Cycle detection.
//!
//! Tracks which (node identity, path) pairs are being compared on the
//! active recursion branch. Re-entering the same open reference along the
//! same branch is a cyclic reference; re-use of the same object at a
//! sibling path is not.

use simile_value::graph::NodeId;
use simile_value::path::MemberPath;

use crate::error::EquivalencyFailure;
use crate::options::CycleHandling;
use crate::scope::ValidationScope;

/// An expectation node whose comparison has started but not finished.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectReference {
    pub id: NodeId,
    pub path: MemberPath,
    /// Only complex references can participate in a cycle; simple values are
    /// compared without recursing.
    pub is_complex: bool,
}

impl ObjectReference {
    /// Same in-flight comparison: same node identity and one path is a
    /// prefix-ancestor of the other.
    fn is_same_open_comparison(&self, other: &ObjectReference) -> bool {
        self.id == other.id
            && (self.path.is_ancestor_of(&other.path) || other.path.is_ancestor_of(&self.path))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Clean,
    Cyclic,
}

/// Open-reference stack for one validation scope.
#[derive(Debug)]
pub struct CycleDetector {
    handling: CycleHandling,
    open: Vec<ObjectReference>,
}

impl CycleDetector {
    pub fn new(handling: CycleHandling) -> Self {
        Self {
            handling,
            open: Vec::new(),
        }
    }

    /// Called once per recursive step, before any comparison strategy runs.
    ///
    /// On a cyclic reference, either records a [`EquivalencyFailure::CyclicReference`]
    /// failure (handling `Forbid`) or treats the edge as vacuously satisfied
    /// (handling `Tolerate`); in both cases the caller must not recurse.
    pub fn enter(&mut self, reference: ObjectReference, scope: &ValidationScope) -> CycleOutcome {
        if !reference.is_complex {
            return CycleOutcome::Clean;
        }
        let cyclic = self
            .open
            .iter()
            .any(|open| open.is_same_open_comparison(&reference));
        if cyclic {
            tracing::trace!(path = %reference.path, "cyclic reference");
            if self.handling == CycleHandling::Forbid {
                scope.fail(EquivalencyFailure::CyclicReference {
                    path: reference.path,
                });
            }
            return CycleOutcome::Cyclic;
        }
        self.open.push(reference);
        CycleOutcome::Clean
    }

    /// Remove a reference when its comparison subtree is left, so sibling
    /// branches reusing the same node at a different path are not flagged.
    pub fn leave(&mut self, id: NodeId, path: &MemberPath) {
        if let Some(position) = self
            .open
            .iter()
            .rposition(|open| open.id == id && &open.path == path)
        {
            self.open.remove(position);
        }
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use simile_value::path::PathSegment;

    use super::*;

    fn field(path: &MemberPath, name: &str) -> MemberPath {
        path.child(PathSegment::Field(name.to_string()))
    }

    fn reference(id: usize, path: MemberPath) -> ObjectReference {
        ObjectReference {
            id: NodeId(id),
            path,
            is_complex: true,
        }
    }

    #[test]
    fn reentry_along_branch_is_cyclic_and_fails_by_default() {
        let scope = ValidationScope::open();
        let mut detector = CycleDetector::new(CycleHandling::Forbid);
        let root = MemberPath::root();

        assert_eq!(
            detector.enter(reference(0, root.clone()), &scope),
            CycleOutcome::Clean
        );
        assert_eq!(
            detector.enter(reference(0, field(&root, "next")), &scope),
            CycleOutcome::Cyclic
        );
        assert!(scope.has_failures());
    }

    #[test]
    fn tolerated_cycle_records_no_failure() {
        let scope = ValidationScope::open();
        let mut detector = CycleDetector::new(CycleHandling::Tolerate);
        let root = MemberPath::root();

        detector.enter(reference(0, root.clone()), &scope);
        assert_eq!(
            detector.enter(reference(0, field(&root, "next")), &scope),
            CycleOutcome::Cyclic
        );
        assert!(!scope.has_failures());
    }

    #[test]
    fn sibling_paths_sharing_a_node_are_not_cyclic() {
        let scope = ValidationScope::open();
        let mut detector = CycleDetector::new(CycleHandling::Forbid);
        let root = MemberPath::root();
        let left = field(&root, "left");
        let right = field(&root, "right");

        assert_eq!(
            detector.enter(reference(5, left.clone()), &scope),
            CycleOutcome::Clean
        );
        detector.leave(NodeId(5), &left);
        assert_eq!(
            detector.enter(reference(5, right), &scope),
            CycleOutcome::Clean
        );
        assert!(!scope.has_failures());
    }

    #[test]
    fn simple_references_never_open() {
        let scope = ValidationScope::open();
        let mut detector = CycleDetector::new(CycleHandling::Forbid);
        let simple = ObjectReference {
            id: NodeId(1),
            path: MemberPath::root(),
            is_complex: false,
        };
        assert_eq!(detector.enter(simple.clone(), &scope), CycleOutcome::Clean);
        assert_eq!(detector.enter(simple, &scope), CycleOutcome::Clean);
        assert_eq!(detector.open_count(), 0);
    }

    #[test]
    fn leave_removes_only_the_matching_entry() {
        let scope = ValidationScope::open();
        let mut detector = CycleDetector::new(CycleHandling::Forbid);
        let root = MemberPath::root();
        detector.enter(reference(0, root.clone()), &scope);
        detector.enter(reference(1, field(&root, "a")), &scope);
        assert_eq!(detector.open_count(), 2);

        detector.leave(NodeId(1), &field(&root, "a"));
        assert_eq!(detector.open_count(), 1);
        detector.leave(NodeId(1), &field(&root, "a"));
        assert_eq!(detector.open_count(), 1);
    }
}
