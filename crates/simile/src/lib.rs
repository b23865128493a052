//! Deep structural-equivalence validation.
//!
//! Given a subject and an expectation value graph, the engine determines
//! whether they are structurally equivalent: recursively, across object
//! graphs, with bounded recursion, cycle detection, and pluggable
//! comparison strategies per value shape.
//!
//! # Architecture
//!
//! - [`classify::TypeClassifier`] caches, per runtime type, whether a value
//!   is compared by its own equality (`Simple`) or recursed into
//!   member-by-member (`Complex`).
//! - [`cycle::CycleDetector`] flags re-entry of an open reference along the
//!   active recursion branch instead of recursing forever.
//! - [`scope::ValidationScope`] threads diagnostic state through one
//!   top-level call and renders a single consolidated failure report.
//! - [`dispatch::EquivalencyValidator`] runs the recursion: depth check,
//!   cycle check, then the ordered steps; first match wins.
//!
//! # Example
//!
//! ```
//! use simile::{assert_equivalency, EquivalencyOptions};
//! use simile_value::graph::{CompositeNode, NodeContent, ValueGraph};
//! use simile_value::value::PrimitiveValue;
//!
//! let mut person = ValueGraph::new();
//! let root = person.root_id();
//! person.set_content(root, NodeContent::Composite(CompositeNode::new("Person")));
//! let name = person.add_field("name", root).unwrap();
//! person.set_content(name, NodeContent::Primitive(PrimitiveValue::from("A")));
//!
//! let report = assert_equivalency(&person, &person.clone(), EquivalencyOptions::new());
//! assert!(report.passed);
//! ```

pub mod classify;
pub mod cycle;
pub mod dispatch;
pub mod error;
pub mod options;
pub mod request;
pub mod scope;
pub mod steps;
pub mod trace;

pub use classify::{Complexity, TypeClassifier, TypeIntrospection};
pub use cycle::{CycleDetector, CycleOutcome, ObjectReference};
pub use dispatch::{EquivalencyValidator, RecursiveValidation};
pub use error::EquivalencyFailure;
pub use options::{CycleHandling, EquivalencyOptions, MAX_DEPTH};
pub use request::{ComparisonRequest, Reason};
pub use scope::{ValidationReport, ValidationScope};
pub use steps::{
    CompositeStep, EquivalencyStep, MappingStep, SequenceStep, SimpleEqualityStep, default_steps,
};
pub use trace::Tracer;

use simile_value::graph::ValueGraph;

/// Validate two graphs with the default step set.
pub fn assert_equivalency(
    subject: &ValueGraph,
    expectation: &ValueGraph,
    options: EquivalencyOptions,
) -> ValidationReport {
    let validator = EquivalencyValidator::new(options, default_steps());
    validator.assert_equality(&ComparisonRequest::root(subject, expectation))
}
