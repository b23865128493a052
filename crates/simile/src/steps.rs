//! Comparison strategies.
//!
//! Each step implements the two-phase dispatch protocol: a cheap
//! applicability predicate ([`EquivalencyStep::can_handle`]) and a handling
//! operation that may itself trigger recursive child validations through
//! the supplied [`crate::dispatch::RecursiveValidation`]. Steps are tried
//! in a fixed configured order; the first step that both claims and handles
//! a pair wins, and a step may decline mid-evaluation by returning `false`
//! from `handle`.

mod composite;
mod mapping;
mod sequence;
mod simple;

pub use composite::CompositeStep;
pub use mapping::MappingStep;
pub use sequence::SequenceStep;
pub use simple::SimpleEqualityStep;

use crate::dispatch::RecursiveValidation;
use crate::options::EquivalencyOptions;
use crate::request::ComparisonRequest;
use crate::scope::ValidationScope;

pub trait EquivalencyStep {
    /// Cheap check whether this step applies to the pair.
    fn can_handle(&self, request: &ComparisonRequest<'_>, options: &EquivalencyOptions) -> bool;

    /// Process the pair. Returns `true` when conclusively processed
    /// (including the case where a failure was recorded); `false` passes the
    /// pair on to the next matching step.
    fn handle(
        &self,
        request: &ComparisonRequest<'_>,
        validator: &dyn RecursiveValidation,
        scope: &ValidationScope,
        options: &EquivalencyOptions,
    ) -> bool;
}

/// The default ordered step set: simple values first, then the recursing
/// shape steps.
pub fn default_steps() -> Vec<Box<dyn EquivalencyStep>> {
    vec![
        Box::new(SimpleEqualityStep),
        Box::new(SequenceStep),
        Box::new(MappingStep),
        Box::new(CompositeStep),
    ]
}
