//! Element-wise sequence comparison.

use simile_value::graph::NodeContent;
use simile_value::path::PathSegment;
use simile_value::value::ValueKind;

use crate::dispatch::RecursiveValidation;
use crate::error::EquivalencyFailure;
use crate::options::EquivalencyOptions;
use crate::request::ComparisonRequest;
use crate::scope::ValidationScope;
use crate::steps::EquivalencyStep;

/// Compares sequences element by element, recursing per element with an
/// `[index]` path segment. A length mismatch is reported and the common
/// prefix is still compared, so one run surfaces every element mismatch.
pub struct SequenceStep;

impl EquivalencyStep for SequenceStep {
    fn can_handle(&self, request: &ComparisonRequest<'_>, _options: &EquivalencyOptions) -> bool {
        matches!(
            request.expectation_node().map(|node| &node.content),
            Some(NodeContent::Sequence(_))
        )
    }

    fn handle(
        &self,
        request: &ComparisonRequest<'_>,
        validator: &dyn RecursiveValidation,
        scope: &ValidationScope,
        _options: &EquivalencyOptions,
    ) -> bool {
        let Some(NodeContent::Sequence(expected)) =
            request.expectation_node().map(|node| &node.content)
        else {
            return false;
        };

        let Some(subject) = request.subject_node() else {
            scope.fail(EquivalencyFailure::ValueMismatch {
                expected: request.render_expectation(),
                actual: request.render_subject(),
                path: request.path.clone(),
            });
            return true;
        };
        let NodeContent::Sequence(actual) = &subject.content else {
            scope.fail(EquivalencyFailure::KindMismatch {
                expected: ValueKind::Sequence,
                actual: subject.content.kind(),
                path: request.path.clone(),
            });
            return true;
        };

        if actual.len() != expected.len() {
            scope.fail(EquivalencyFailure::LengthMismatch {
                expected: expected.len(),
                actual: actual.len(),
                path: request.path.clone(),
            });
        }
        for (index, (subject_id, expectation_id)) in
            actual.iter().zip(expected.iter()).enumerate()
        {
            let child = request.child(
                PathSegment::Index(index),
                Some(*subject_id),
                Some(*expectation_id),
            );
            validator.assert_equality_using(&child, scope);
        }
        true
    }
}
