//! Optional append-only log of dispatch decision points.

use std::cell::RefCell;
use std::rc::Rc;

/// Cloneable handle to a shared trace buffer.
///
/// Recursive steps clone the handle; all lines land in one buffer which the
/// top-level scope attaches as the `trace` reportable on close.
#[derive(Debug, Clone, Default)]
pub struct Tracer {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line. Callers that hold only an `Option<Tracer>` skip
    /// the call (and the formatting) entirely when no tracer is attached.
    pub fn trace(&self, line: impl FnOnce() -> String) {
        self.lines.borrow_mut().push(line());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn render(&self) -> String {
        self.lines.borrow().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_buffer() {
        let tracer = Tracer::new();
        let clone = tracer.clone();
        tracer.trace(|| "first".to_string());
        clone.trace(|| "second".to_string());
        assert_eq!(tracer.render(), "first\nsecond");
    }

    #[test]
    fn empty_tracer_renders_nothing() {
        let tracer = Tracer::new();
        assert!(tracer.is_empty());
        assert_eq!(tracer.render(), "");
    }
}
