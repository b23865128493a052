//! Step dispatcher.
//!
//! Orchestrates one recursive validation step: depth check, cycle check,
//! ordered trial of the configured comparison strategies, first-match-wins
//! handling, and a recorded failure when no step claims the pair. All error
//! conditions are reported through the active scope; nothing unwinds past
//! the top-level call boundary.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::classify::{Complexity, TypeClassifier};
use crate::cycle::{CycleDetector, CycleOutcome, ObjectReference};
use crate::error::EquivalencyFailure;
use crate::options::{EquivalencyOptions, MAX_DEPTH};
use crate::request::ComparisonRequest;
use crate::scope::{ValidationReport, ValidationScope};
use crate::steps::EquivalencyStep;

const CYCLE_DETECTOR_KEY: &str = "cycle_detector";

/// The recursive entry point steps invoke to validate a child member pair.
pub trait RecursiveValidation {
    fn assert_equality_using(&self, request: &ComparisonRequest<'_>, scope: &ValidationScope);
}

/// Validates structural equivalence of a subject against an expectation.
///
/// One validator instance owns its settings, its ordered step list, and a
/// per-instance type-classification cache. Independent validations may run
/// in parallel by giving each its own validator and scope.
pub struct EquivalencyValidator {
    options: EquivalencyOptions,
    steps: Vec<Box<dyn EquivalencyStep>>,
    classifier: TypeClassifier,
}

impl EquivalencyValidator {
    pub fn new(options: EquivalencyOptions, steps: Vec<Box<dyn EquivalencyStep>>) -> Self {
        Self {
            options,
            steps,
            classifier: TypeClassifier::new(),
        }
    }

    pub fn options(&self) -> &EquivalencyOptions {
        &self.options
    }

    /// Validate the root pair. Opens a scope, runs the recursive descent,
    /// and closes the scope into one consolidated report; the presence of
    /// recorded failures is the verdict.
    pub fn assert_equality(&self, request: &ComparisonRequest<'_>) -> ValidationReport {
        let scope = ValidationScope::open();
        scope.add_reportable("configuration", self.options.to_string());

        self.assert_equality_using(request, &scope);

        if let Some(tracer) = &request.tracer
            && !tracer.is_empty()
        {
            scope.add_reportable("trace", tracer.render());
        }
        scope.finish(&request.because)
    }

    fn cycle_detector(&self, scope: &ValidationScope) -> Rc<RefCell<CycleDetector>> {
        match scope.get_internal::<RefCell<CycleDetector>>(CYCLE_DETECTOR_KEY) {
            Some(detector) => detector,
            None => {
                let detector = Rc::new(RefCell::new(CycleDetector::new(
                    self.options.cycle_handling,
                )));
                let internal: Rc<dyn Any> = detector.clone();
                scope.add_internal(CYCLE_DETECTOR_KEY, internal);
                detector
            }
        }
    }
}

impl RecursiveValidation for EquivalencyValidator {
    fn assert_equality_using(&self, request: &ComparisonRequest<'_>, scope: &ValidationScope) {
        let depth = request.depth();
        if depth >= MAX_DEPTH && !self.options.allow_infinite_recursion {
            scope.fail(EquivalencyFailure::MaxRecursionDepthExceeded {
                path: request.path.clone(),
            });
            return;
        }

        let _context = (!request.member_description.is_empty())
            .then(|| scope.set_context(request.member_description.clone()));
        scope.track_comparands(request.render_subject(), request.render_expectation());

        let detector = self.cycle_detector(scope);

        // Absent expectations never recurse, so classification is skipped.
        let complexity = match request.expectation {
            None => Complexity::Simple,
            Some(id) => {
                let identity = request.expectation_graph.type_identity(id);
                self.classifier
                    .classify(&identity, request.expectation_graph)
            }
        };
        let is_complex = complexity == Complexity::Complex;

        let mut opened = false;
        if let Some(id) = request.expectation {
            let reference = ObjectReference {
                id,
                path: request.path.clone(),
                is_complex,
            };
            if detector.borrow_mut().enter(reference, scope) == CycleOutcome::Cyclic {
                if let Some(tracer) = &request.tracer {
                    tracer.trace(|| format!("{}: cyclic reference", request.path));
                }
                return;
            }
            opened = is_complex;
        }

        let request = request.classified(complexity);
        let mut handled = false;
        for step in &self.steps {
            if step.can_handle(&request, &self.options) {
                trace!(path = %request.path, "step claimed the comparison");
                if step.handle(&request, self, scope, &self.options) {
                    handled = true;
                    break;
                }
                // The step declined mid-evaluation; try the next match.
            }
        }
        if !handled {
            scope.fail(EquivalencyFailure::UnhandledComparison {
                path: request.path.clone(),
            });
        }

        if opened && let Some(id) = request.expectation {
            detector.borrow_mut().leave(id, &request.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use simile_value::graph::{CompositeNode, NodeContent, ValueGraph};
    use simile_value::value::PrimitiveValue;

    use super::*;
    use crate::request::Reason;
    use crate::steps::default_steps;

    struct ProbeStep {
        claims: bool,
        handles: bool,
        invoked: Rc<Cell<usize>>,
    }

    impl EquivalencyStep for ProbeStep {
        fn can_handle(
            &self,
            _request: &ComparisonRequest<'_>,
            _options: &EquivalencyOptions,
        ) -> bool {
            self.claims
        }

        fn handle(
            &self,
            _request: &ComparisonRequest<'_>,
            _validator: &dyn RecursiveValidation,
            _scope: &ValidationScope,
            _options: &EquivalencyOptions,
        ) -> bool {
            self.invoked.set(self.invoked.get() + 1);
            self.handles
        }
    }

    fn probe(claims: bool, handles: bool) -> (Box<ProbeStep>, Rc<Cell<usize>>) {
        let invoked = Rc::new(Cell::new(0));
        (
            Box::new(ProbeStep {
                claims,
                handles,
                invoked: invoked.clone(),
            }),
            invoked,
        )
    }

    fn run_with_steps(steps: Vec<Box<dyn EquivalencyStep>>) -> ValidationReport {
        let subject = ValueGraph::new_primitive(1);
        let expectation = ValueGraph::new_primitive(1);
        let validator = EquivalencyValidator::new(EquivalencyOptions::new(), steps);
        validator.assert_equality(&ComparisonRequest::root(&subject, &expectation))
    }

    #[test]
    fn first_matching_step_wins() {
        let (a, a_invoked) = probe(true, true);
        let (b, b_invoked) = probe(true, true);
        let report = run_with_steps(vec![a, b]);
        assert!(report.passed);
        assert_eq!(a_invoked.get(), 1);
        assert_eq!(b_invoked.get(), 0);
    }

    #[test]
    fn declined_pair_moves_to_next_matching_step() {
        let (a, a_invoked) = probe(true, false);
        let (b, b_invoked) = probe(true, true);
        let report = run_with_steps(vec![a, b]);
        assert!(report.passed);
        assert_eq!(a_invoked.get(), 1);
        assert_eq!(b_invoked.get(), 1);
    }

    #[test]
    fn unclaimed_pair_fails_as_unhandled() {
        let (a, a_invoked) = probe(false, true);
        let report = run_with_steps(vec![a]);
        assert!(!report.passed);
        assert_eq!(a_invoked.get(), 0);
        assert!(matches!(
            report.failures[0],
            EquivalencyFailure::UnhandledComparison { .. }
        ));
    }

    fn chain(length: usize) -> ValueGraph {
        let mut graph = ValueGraph::new();
        let mut current = graph.root_id();
        graph.set_content(current, NodeContent::Composite(CompositeNode::new("Link")));
        for _ in 0..length {
            let next = graph.add_field("next", current).unwrap();
            graph.set_content(next, NodeContent::Composite(CompositeNode::new("Link")));
            current = next;
        }
        let end = graph.add_field("end", current).unwrap();
        graph.set_content(end, NodeContent::Primitive(PrimitiveValue::from(true)));
        graph
    }

    #[test]
    fn depth_bound_cuts_off_deep_graphs() {
        let subject = chain(12);
        let expectation = chain(12);
        let validator = EquivalencyValidator::new(EquivalencyOptions::new(), default_steps());
        let report = validator.assert_equality(&ComparisonRequest::root(&subject, &expectation));
        assert!(!report.passed);
        assert!(report
            .failures
            .iter()
            .any(|failure| matches!(failure, EquivalencyFailure::MaxRecursionDepthExceeded { .. })));
    }

    #[test]
    fn infinite_recursion_option_lifts_the_bound() {
        let subject = chain(40);
        let expectation = chain(40);
        let validator = EquivalencyValidator::new(
            EquivalencyOptions::new().with_infinite_recursion(),
            default_steps(),
        );
        let report = validator.assert_equality(&ComparisonRequest::root(&subject, &expectation));
        assert!(report.passed);
    }

    #[test]
    fn configuration_reportable_appears_on_failure() {
        let subject = ValueGraph::new_primitive(1);
        let expectation = ValueGraph::new_primitive(2);
        let validator = EquivalencyValidator::new(
            EquivalencyOptions::new().described("unit test"),
            default_steps(),
        );
        let report = validator.assert_equality(
            &ComparisonRequest::root(&subject, &expectation)
                .because("because {0} matters", vec!["precision".to_string()]),
        );
        assert!(!report.passed);
        assert!(report.message.contains("With configuration:"));
        assert!(report.message.contains("unit test"));
        assert!(report.message.contains("because precision matters"));
    }

    #[test]
    fn classification_is_cached_per_validator() {
        // Two links of the same composite type; the second classify call
        // must be served from the cache (observable indirectly: the cache
        // map holds one entry per distinct type identity).
        let subject = chain(3);
        let expectation = chain(3);
        let validator = EquivalencyValidator::new(EquivalencyOptions::new(), default_steps());
        let report = validator.assert_equality(&ComparisonRequest::root(&subject, &expectation));
        assert!(report.passed);
    }
}
