//! Key-wise mapping comparison.

use simile_value::graph::NodeContent;
use simile_value::path::PathSegment;
use simile_value::value::ValueKind;

use crate::dispatch::RecursiveValidation;
use crate::error::EquivalencyFailure;
use crate::options::EquivalencyOptions;
use crate::request::ComparisonRequest;
use crate::scope::ValidationScope;
use crate::steps::EquivalencyStep;

/// Compares mappings key by key over the expectation's keys, recursing per
/// entry with a `[key]` path segment. Expectation keys missing from the
/// subject are reported; every expectation key is checked before returning.
pub struct MappingStep;

impl EquivalencyStep for MappingStep {
    fn can_handle(&self, request: &ComparisonRequest<'_>, _options: &EquivalencyOptions) -> bool {
        matches!(
            request.expectation_node().map(|node| &node.content),
            Some(NodeContent::Mapping(_))
        )
    }

    fn handle(
        &self,
        request: &ComparisonRequest<'_>,
        validator: &dyn RecursiveValidation,
        scope: &ValidationScope,
        _options: &EquivalencyOptions,
    ) -> bool {
        let Some(NodeContent::Mapping(expected)) =
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
        let NodeContent::Mapping(actual) = &subject.content else {
            scope.fail(EquivalencyFailure::KindMismatch {
                expected: ValueKind::Mapping,
                actual: subject.content.kind(),
                path: request.path.clone(),
            });
            return true;
        };

        for (key, expectation_id) in expected {
            match actual.get(key) {
                Some(subject_id) => {
                    let child = request.child(
                        PathSegment::Key(key.clone()),
                        Some(*subject_id),
                        Some(*expectation_id),
                    );
                    validator.assert_equality_using(&child, scope);
                }
                None => {
                    scope.fail(EquivalencyFailure::MissingKey {
                        key: key.clone(),
                        path: request.path.clone(),
                    });
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use simile_value::graph::ValueGraph;
    use simile_value::value::{ObjectKey, PrimitiveValue};

    use super::*;
    use crate::dispatch::EquivalencyValidator;
    use crate::request::Reason;
    use crate::steps::default_steps;

    fn mapping_of(entries: &[(&str, i64)]) -> ValueGraph {
        let mut graph = ValueGraph::new();
        let root = graph.root_id();
        graph.set_content(root, NodeContent::Mapping(Default::default()));
        for (key, value) in entries {
            let child = graph.add_mapping_child(ObjectKey::from(*key), root).unwrap();
            graph.set_content(child, NodeContent::Primitive(PrimitiveValue::from(*value)));
        }
        graph
    }

    fn validate(subject: &ValueGraph, expectation: &ValueGraph) -> crate::scope::ValidationReport {
        let validator = EquivalencyValidator::new(EquivalencyOptions::new(), default_steps());
        let scope = ValidationScope::open();
        validator.assert_equality_using(&ComparisonRequest::root(subject, expectation), &scope);
        scope.finish(&Reason::none())
    }

    #[test]
    fn equal_mappings_pass() {
        let report = validate(
            &mapping_of(&[("a", 1), ("b", 2)]),
            &mapping_of(&[("a", 1), ("b", 2)]),
        );
        assert!(report.passed);
    }

    #[test]
    fn entry_mismatch_reports_keyed_path() {
        let report = validate(
            &mapping_of(&[("a", 1), ("b", 9)]),
            &mapping_of(&[("a", 1), ("b", 2)]),
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path().to_string(), "[b]");
    }

    #[test]
    fn missing_key_is_reported_and_rest_still_checked() {
        let report = validate(
            &mapping_of(&[("a", 9)]),
            &mapping_of(&[("a", 1), ("b", 2)]),
        );
        assert!(report
            .failures
            .iter()
            .any(|failure| matches!(failure, EquivalencyFailure::MissingKey { key, .. } if key == &ObjectKey::from("b"))));
        assert!(report
            .failures
            .iter()
            .any(|failure| failure.path().to_string() == "[a]"));
    }
}
