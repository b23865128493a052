//! Member-wise composite comparison.

use simile_value::graph::NodeContent;
use simile_value::path::PathSegment;
use simile_value::value::ValueKind;

use crate::dispatch::RecursiveValidation;
use crate::error::EquivalencyFailure;
use crate::options::EquivalencyOptions;
use crate::request::ComparisonRequest;
use crate::scope::ValidationScope;
use crate::steps::EquivalencyStep;

/// Compares composites member by member over the expectation's fields,
/// recursing per field with a named path segment.
///
/// Member selection is expectation-driven: subject members not named by the
/// expectation are ignored, and expectation members missing from the
/// subject are reported.
pub struct CompositeStep;

impl EquivalencyStep for CompositeStep {
    fn can_handle(&self, request: &ComparisonRequest<'_>, _options: &EquivalencyOptions) -> bool {
        matches!(
            request.expectation_node().map(|node| &node.content),
            Some(NodeContent::Composite(_))
        )
    }

    fn handle(
        &self,
        request: &ComparisonRequest<'_>,
        validator: &dyn RecursiveValidation,
        scope: &ValidationScope,
        _options: &EquivalencyOptions,
    ) -> bool {
        let Some(NodeContent::Composite(expected)) =
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
        let NodeContent::Composite(actual) = &subject.content else {
            scope.fail(EquivalencyFailure::KindMismatch {
                expected: ValueKind::Composite,
                actual: subject.content.kind(),
                path: request.path.clone(),
            });
            return true;
        };

        for (name, expectation_id) in &expected.fields {
            match actual.fields.get(name) {
                Some(subject_id) => {
                    let child = request.child(
                        PathSegment::Field(name.clone()),
                        Some(*subject_id),
                        Some(*expectation_id),
                    );
                    validator.assert_equality_using(&child, scope);
                }
                None => {
                    scope.fail(EquivalencyFailure::MissingMember {
                        member: name.clone(),
                        path: request.path.clone(),
                    });
                }
            }
        }
        true
    }
}
