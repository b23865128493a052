//! Validation requests.
//!
//! A [`ComparisonRequest`] is immutable once constructed; each recursive
//! step derives a new request with an extended member path via
//! [`ComparisonRequest::child`].

use simile_value::graph::{Node, NodeId, ValueGraph};
use simile_value::path::{MemberPath, PathSegment};

use crate::classify::Complexity;
use crate::trace::Tracer;

/// A reason template plus positional arguments, rendered once into the
/// final failure message (e.g. `"because {0} was expected"`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reason {
    pub template: String,
    pub args: Vec<String>,
}

impl Reason {
    pub fn new(template: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            template: template.into(),
            args,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    /// Substitute `{0}`, `{1}`, ... placeholders with the positional args.
    pub fn render(&self) -> String {
        let mut rendered = self.template.clone();
        for (index, arg) in self.args.iter().enumerate() {
            rendered = rendered.replace(&format!("{{{}}}", index), arg);
        }
        rendered
    }
}

/// One subject/expectation pair to validate, with the member path that
/// locates it in the object graph.
///
/// `None` comparands represent absent members (e.g. a field present on one
/// side only); the root request always carries both graph roots.
#[derive(Debug, Clone)]
pub struct ComparisonRequest<'g> {
    pub subject_graph: &'g ValueGraph,
    pub expectation_graph: &'g ValueGraph,
    pub subject: Option<NodeId>,
    pub expectation: Option<NodeId>,
    pub path: MemberPath,
    pub member_description: String,
    pub because: Reason,
    pub tracer: Option<Tracer>,
    /// Cached classification of the expectation's runtime type, filled in by
    /// the dispatcher before steps are tried.
    pub expectation_complexity: Option<Complexity>,
}

impl<'g> ComparisonRequest<'g> {
    /// Request for the root pair of two graphs.
    pub fn root(subject_graph: &'g ValueGraph, expectation_graph: &'g ValueGraph) -> Self {
        Self {
            subject_graph,
            expectation_graph,
            subject: Some(subject_graph.root_id()),
            expectation: Some(expectation_graph.root_id()),
            path: MemberPath::root(),
            member_description: String::new(),
            because: Reason::none(),
            tracer: None,
            expectation_complexity: None,
        }
    }

    pub fn because(mut self, template: impl Into<String>, args: Vec<String>) -> Self {
        self.because = Reason::new(template, args);
        self
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Derive the request for a child member pair.
    pub fn child(
        &self,
        segment: PathSegment,
        subject: Option<NodeId>,
        expectation: Option<NodeId>,
    ) -> Self {
        let path = self.path.child(segment);
        Self {
            subject_graph: self.subject_graph,
            expectation_graph: self.expectation_graph,
            subject,
            expectation,
            member_description: path.to_string(),
            path,
            because: self.because.clone(),
            tracer: self.tracer.clone(),
            expectation_complexity: None,
        }
    }

    pub(crate) fn classified(&self, complexity: Complexity) -> Self {
        let mut request = self.clone();
        request.expectation_complexity = Some(complexity);
        request
    }

    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    pub fn subject_node(&self) -> Option<&'g Node> {
        self.subject.map(|id| self.subject_graph.node(id))
    }

    pub fn expectation_node(&self) -> Option<&'g Node> {
        self.expectation.map(|id| self.expectation_graph.node(id))
    }

    pub fn render_subject(&self) -> String {
        match self.subject {
            Some(id) => self.subject_graph.render_node(id),
            None => "<absent>".to_string(),
        }
    }

    pub fn render_expectation(&self) -> String {
        match self.expectation {
            Some(id) => self.expectation_graph.render_node(id),
            None => "<absent>".to_string(),
        }
    }
}
