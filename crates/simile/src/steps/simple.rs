//! Simple-value comparison.

use simile_value::graph::NodeContent;

use crate::classify::Complexity;
use crate::dispatch::RecursiveValidation;
use crate::error::EquivalencyFailure;
use crate::options::EquivalencyOptions;
use crate::request::ComparisonRequest;
use crate::scope::ValidationScope;
use crate::steps::EquivalencyStep;

/// Compares `Simple`-classified values by their own equality semantics, and
/// settles absent expectations.
///
/// Primitives compare by value; composites of a registered value type
/// compare as one value via deep structural equality.
pub struct SimpleEqualityStep;

impl EquivalencyStep for SimpleEqualityStep {
    fn can_handle(&self, request: &ComparisonRequest<'_>, _options: &EquivalencyOptions) -> bool {
        request.expectation.is_none()
            || request.expectation_complexity == Some(Complexity::Simple)
    }

    fn handle(
        &self,
        request: &ComparisonRequest<'_>,
        _validator: &dyn RecursiveValidation,
        scope: &ValidationScope,
        _options: &EquivalencyOptions,
    ) -> bool {
        let equal = match (request.subject, request.expectation) {
            // Both members absent: vacuously equal.
            (None, None) => true,
            (Some(_), None) | (None, Some(_)) => false,
            (Some(subject), Some(expectation)) => {
                let subject_content = &request.subject_graph.node(subject).content;
                let expectation_content = &request.expectation_graph.node(expectation).content;
                match (subject_content, expectation_content) {
                    (NodeContent::Primitive(actual), NodeContent::Primitive(expected)) => {
                        actual == expected
                    }
                    _ => request.subject_graph.subtree_equal(
                        subject,
                        request.expectation_graph,
                        expectation,
                    ),
                }
            }
        };

        if !equal {
            scope.fail(EquivalencyFailure::ValueMismatch {
                expected: request.render_expectation(),
                actual: request.render_subject(),
                path: request.path.clone(),
            });
        }
        if let Some(tracer) = &request.tracer {
            tracer.trace(|| {
                format!(
                    "{}: compared {} with {} by value equality",
                    request.path,
                    request.render_subject(),
                    request.render_expectation()
                )
            });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use simile_value::graph::{CompositeNode, ValueGraph};
    use simile_value::path::MemberPath;
    use simile_value::value::PrimitiveValue;

    use super::*;
    use crate::dispatch::EquivalencyValidator;
    use crate::steps::default_steps;

    fn run(subject: &ValueGraph, expectation: &ValueGraph) -> ValidationScope {
        let validator = EquivalencyValidator::new(EquivalencyOptions::new(), default_steps());
        let scope = ValidationScope::open();
        let request = ComparisonRequest::root(subject, expectation).classified(Complexity::Simple);
        SimpleEqualityStep.handle(&request, &validator, &scope, validator.options());
        scope
    }

    #[test]
    fn equal_primitives_pass() {
        let subject = ValueGraph::new_primitive(30);
        let expectation = ValueGraph::new_primitive(30);
        assert!(!run(&subject, &expectation).has_failures());
    }

    #[test]
    fn unequal_primitives_report_both_values() {
        let subject = ValueGraph::new_primitive(31);
        let expectation = ValueGraph::new_primitive(30);
        let scope = run(&subject, &expectation);
        let report = scope.finish(&crate::request::Reason::none());
        assert_eq!(
            report.failures,
            vec![EquivalencyFailure::ValueMismatch {
                expected: "30".to_string(),
                actual: "31".to_string(),
                path: MemberPath::root(),
            }]
        );
    }

    #[test]
    fn null_matches_null() {
        let subject = ValueGraph::new_primitive(PrimitiveValue::Null);
        let expectation = ValueGraph::new_primitive(PrimitiveValue::Null);
        assert!(!run(&subject, &expectation).has_failures());
    }

    #[test]
    fn registered_value_type_compares_as_one_value() {
        let mut subject = ValueGraph::new();
        let root = subject.root_id();
        subject.set_content(root, NodeContent::Composite(CompositeNode::new("Money")));
        let amount = subject.add_field("amount", root).unwrap();
        subject.set_content(amount, NodeContent::Primitive(PrimitiveValue::from(5)));
        subject.register_value_type("Money");

        let mut expectation = subject.clone();
        assert!(!run(&subject, &expectation).has_failures());

        let amount_id = amount;
        expectation.set_content(
            amount_id,
            NodeContent::Primitive(PrimitiveValue::from(6)),
        );
        assert!(run(&subject, &expectation).has_failures());
    }
}
