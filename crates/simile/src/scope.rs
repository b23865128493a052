//! Validation scope.
//!
//! One scope spans one top-level validation call and all of its recursive
//! descent. Instead of ambient thread-local state, the scope is threaded
//! explicitly by reference through every recursive call; interior
//! mutability (`RefCell`) lets steps record failures without `&mut`.
//!
//! The scope accumulates diagnostic state (context description, reportable
//! key/value pairs, internal machinery such as the cycle detector) and the
//! recorded failures, then renders a single consolidated report on
//! [`ValidationScope::finish`].

use std::any::Any;
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::error::EquivalencyFailure;
use crate::request::Reason;

// =============================================================================
// ValidationReport (final result for public API)
// =============================================================================

/// Final outcome returned to callers.
///
/// A pass carries zero failures and an empty message.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub passed: bool,
    pub failures: Vec<EquivalencyFailure>,
    /// Consolidated human-readable report; empty on pass.
    pub message: String,
}

// =============================================================================
// ScopeState (internal mutable state)
// =============================================================================

#[derive(Default)]
struct ScopeState {
    context: Option<String>,
    reportables: IndexMap<String, String>,
    internals: AHashMap<&'static str, Rc<dyn Any>>,
    comparands: Option<(String, String)>,
    failures: Vec<EquivalencyFailure>,
}

// =============================================================================
// ValidationScope
// =============================================================================

pub struct ValidationScope {
    state: RefCell<ScopeState>,
}

impl Default for ValidationScope {
    fn default() -> Self {
        Self::open()
    }
}

impl ValidationScope {
    pub fn open() -> Self {
        Self {
            state: RefCell::new(ScopeState::default()),
        }
    }

    /// Add a key/value pair rendered into the failure report, in insertion
    /// order.
    pub fn add_reportable(&self, key: impl Into<String>, value: impl Into<String>) {
        self.state
            .borrow_mut()
            .reportables
            .insert(key.into(), value.into());
    }

    /// Stash an internal object for the duration of the scope. Not rendered;
    /// used to thread machinery (the cycle detector) through recursion.
    pub fn add_internal(&self, key: &'static str, value: Rc<dyn Any>) {
        self.state.borrow_mut().internals.insert(key, value);
    }

    pub fn get_internal<T: 'static>(&self, key: &'static str) -> Option<Rc<T>> {
        let state = self.state.borrow();
        let value = state.internals.get(key)?.clone();
        value.downcast::<T>().ok()
    }

    /// Remember the pair currently being compared, for report context.
    pub fn track_comparands(&self, subject: String, expectation: String) {
        self.state.borrow_mut().comparands = Some((subject, expectation));
    }

    /// Set the contextual description, restoring the previous one when the
    /// returned guard drops. The guard keeps nesting correct on every exit
    /// path.
    pub fn set_context(&self, description: impl Into<String>) -> ContextGuard<'_> {
        let previous = self.state.borrow_mut().context.replace(description.into());
        ContextGuard {
            scope: self,
            previous,
        }
    }

    pub fn context(&self) -> Option<String> {
        self.state.borrow().context.clone()
    }

    /// Record a failure; validation continues.
    pub fn fail(&self, failure: EquivalencyFailure) {
        self.state.borrow_mut().failures.push(failure);
    }

    pub fn has_failures(&self) -> bool {
        !self.state.borrow().failures.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.state.borrow().failures.len()
    }

    /// Close the scope and render the consolidated report.
    ///
    /// The `because` reason is rendered once here, not per recursive step.
    pub fn finish(self, because: &Reason) -> ValidationReport {
        let state = self.state.into_inner();
        let passed = state.failures.is_empty();
        let message = if passed {
            String::new()
        } else {
            render_report(&state, because)
        };
        ValidationReport {
            passed,
            failures: state.failures,
            message,
        }
    }
}

fn render_report(state: &ScopeState, because: &Reason) -> String {
    let mut message = String::from("Validation failed");
    if !because.is_empty() {
        let _ = write!(message, " {}", because.render());
    }
    message.push(':');
    for failure in &state.failures {
        let _ = write!(message, "\n  - {}", failure);
    }
    if let Some((subject, expectation)) = &state.comparands {
        let _ = write!(
            message,
            "\nWhile comparing {} with {}.",
            subject, expectation
        );
    }
    for (key, value) in &state.reportables {
        let _ = write!(message, "\nWith {}:\n{}", key, value);
    }
    message
}

/// Restores the prior context description on drop.
pub struct ContextGuard<'a> {
    scope: &'a ValidationScope,
    previous: Option<String>,
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.scope.state.borrow_mut().context = self.previous.take();
    }
}
