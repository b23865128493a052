//! Failure taxonomy.
//!
//! Failures are accumulated in the active [`crate::scope::ValidationScope`]
//! rather than unwinding the recursion, so one validation run can surface
//! multiple independent mismatches.

use simile_value::path::MemberPath;
use simile_value::value::{ObjectKey, ValueKind};
use thiserror::Error;

/// A single recorded mismatch, carrying the member path where it occurred.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EquivalencyFailure {
    #[error("Maximum recursion depth reached at path {path}")]
    MaxRecursionDepthExceeded { path: MemberPath },

    #[error("Cyclic reference encountered at path {path}")]
    CyclicReference { path: MemberPath },

    #[error("No equivalency step could handle the comparison at path {path}")]
    UnhandledComparison { path: MemberPath },

    #[error("Expected {expected}, but found {actual} at path {path}")]
    ValueMismatch {
        expected: String,
        actual: String,
        path: MemberPath,
    },

    #[error("Expected a value of kind {expected}, but found {actual} at path {path}")]
    KindMismatch {
        expected: ValueKind,
        actual: ValueKind,
        path: MemberPath,
    },

    #[error("Missing member '{member}' at path {path}")]
    MissingMember { member: String, path: MemberPath },

    #[error("Missing key {key} at path {path}")]
    MissingKey { key: ObjectKey, path: MemberPath },

    #[error("Expected {expected} elements, but found {actual} at path {path}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        path: MemberPath,
    },
}

impl EquivalencyFailure {
    /// The member path at which this failure was recorded.
    pub fn path(&self) -> &MemberPath {
        match self {
            Self::MaxRecursionDepthExceeded { path }
            | Self::CyclicReference { path }
            | Self::UnhandledComparison { path }
            | Self::ValueMismatch { path, .. }
            | Self::KindMismatch { path, .. }
            | Self::MissingMember { path, .. }
            | Self::MissingKey { path, .. }
            | Self::LengthMismatch { path, .. } => path,
        }
    }

    pub fn depth(&self) -> usize {
        self.path().depth()
    }
}
