use ahash::AHashSet;
use indexmap::IndexMap;

use crate::value::{ObjectKey, PrimitiveValue, ValueKind};

/// Identity of a node within one [`ValueGraph`].
///
/// Node ids are the reference identity of this value model: the same id
/// reachable through two parents is one shared object, and an id linked
/// under one of its own descendants forms a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A node in the value graph.
///
/// This does not implement `PartialEq` since content refers to other nodes,
/// so plain equality is not well-defined; see [`ValueGraph::subtree_equal`].
#[derive(Debug, Clone)]
pub struct Node {
    pub content: NodeContent,
}

#[derive(Debug, Clone)]
pub enum NodeContent {
    Primitive(PrimitiveValue),
    Sequence(Vec<NodeId>),
    Mapping(IndexMap<ObjectKey, NodeId>),
    Composite(CompositeNode),
}

impl NodeContent {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Primitive(value) => value.kind(),
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
            Self::Composite(_) => ValueKind::Composite,
        }
    }
}

/// A record-like value: a declared type name plus named fields in
/// insertion order.
#[derive(Debug, Clone)]
pub struct CompositeNode {
    pub type_name: String,
    pub fields: IndexMap<String, NodeId>,
}

impl CompositeNode {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }
}

/// Stable identity of a runtime type, used as the classifier cache key.
///
/// Primitives, sequences and mappings are identified by their shallow kind;
/// composites by their declared type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeIdentity {
    Kind(ValueKind),
    Named(String),
}

impl core::fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{}", kind),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Fail-fast errors raised while constructing a graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InsertError {
    #[error("expected a sequence node")]
    ExpectedSequence,
    #[error("expected a mapping node")]
    ExpectedMapping,
    #[error("expected a composite node")]
    ExpectedComposite,
    #[error("key already assigned: {key}")]
    KeyAlreadyAssigned { key: ObjectKey },
    #[error("field already assigned: {field}")]
    FieldAlreadyAssigned { field: String },
}

/// Arena holding one value graph.
#[derive(Debug, Clone)]
pub struct ValueGraph {
    root: NodeId,
    nodes: Vec<Node>,
    value_types: AHashSet<String>,
}

impl Default for ValueGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueGraph {
    /// Create a graph whose root is `null`.
    pub fn new() -> Self {
        Self {
            root: NodeId(0),
            nodes: vec![Node {
                content: NodeContent::Primitive(PrimitiveValue::Null),
            }],
            value_types: AHashSet::new(),
        }
    }

    /// Create a graph whose root holds a primitive value.
    pub fn new_primitive(value: impl Into<PrimitiveValue>) -> Self {
        let mut graph = Self::new();
        graph.set_content(graph.root, NodeContent::Primitive(value.into()));
        graph
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn create_node(&mut self, content: NodeContent) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { content });
        id
    }

    pub fn set_content(&mut self, id: NodeId, content: NodeContent) {
        self.nodes[id.0].content = content;
    }

    /// Declare a named composite type as defining its own value equality.
    ///
    /// Nodes of a registered type are compared as one value instead of being
    /// recursed into member-by-member.
    pub fn register_value_type(&mut self, type_name: impl Into<String>) {
        self.value_types.insert(type_name.into());
    }

    pub fn is_value_type(&self, type_name: &str) -> bool {
        self.value_types.contains(type_name)
    }

    pub fn kind(&self, id: NodeId) -> ValueKind {
        self.node(id).content.kind()
    }

    /// The classifier cache key for a node's runtime type.
    pub fn type_identity(&self, id: NodeId) -> TypeIdentity {
        match &self.node(id).content {
            NodeContent::Composite(composite) => TypeIdentity::Named(composite.type_name.clone()),
            other => TypeIdentity::Kind(other.kind()),
        }
    }

    // -------------------------------------------------------------------------
    // Create-and-attach operations
    // -------------------------------------------------------------------------

    /// Append a fresh `null` element to a sequence node, returning its id.
    pub fn add_sequence_element(&mut self, parent: NodeId) -> Result<NodeId, InsertError> {
        let child = self.create_node(NodeContent::Primitive(PrimitiveValue::Null));
        self.link_sequence_element(parent, child)?;
        Ok(child)
    }

    /// Insert a fresh `null` entry under a mapping node, returning its id.
    pub fn add_mapping_child(
        &mut self,
        key: ObjectKey,
        parent: NodeId,
    ) -> Result<NodeId, InsertError> {
        let child = self.create_node(NodeContent::Primitive(PrimitiveValue::Null));
        self.link_mapping_child(key, parent, child)?;
        Ok(child)
    }

    /// Add a fresh `null` field to a composite node, returning its id.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
    ) -> Result<NodeId, InsertError> {
        let child = self.create_node(NodeContent::Primitive(PrimitiveValue::Null));
        self.link_field(name, parent, child)?;
        Ok(child)
    }

    // -------------------------------------------------------------------------
    // Attach-existing operations (shared subtrees and cycles)
    // -------------------------------------------------------------------------

    pub fn link_sequence_element(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), InsertError> {
        match &mut self.nodes[parent.0].content {
            NodeContent::Sequence(elements) => {
                elements.push(child);
                Ok(())
            }
            _ => Err(InsertError::ExpectedSequence),
        }
    }

    pub fn link_mapping_child(
        &mut self,
        key: ObjectKey,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), InsertError> {
        match &mut self.nodes[parent.0].content {
            NodeContent::Mapping(entries) => {
                if entries.contains_key(&key) {
                    return Err(InsertError::KeyAlreadyAssigned { key });
                }
                entries.insert(key, child);
                Ok(())
            }
            _ => Err(InsertError::ExpectedMapping),
        }
    }

    pub fn link_field(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), InsertError> {
        let name = name.into();
        match &mut self.nodes[parent.0].content {
            NodeContent::Composite(composite) => {
                if composite.fields.contains_key(&name) {
                    return Err(InsertError::FieldAlreadyAssigned { field: name });
                }
                composite.fields.insert(name, child);
                Ok(())
            }
            _ => Err(InsertError::ExpectedComposite),
        }
    }

    // -------------------------------------------------------------------------
    // Rendering and deep equality
    // -------------------------------------------------------------------------

    /// Shallow one-line rendering of a node, for report text.
    pub fn render_node(&self, id: NodeId) -> String {
        match &self.node(id).content {
            NodeContent::Primitive(value) => value.to_string(),
            NodeContent::Sequence(elements) => format!("[{} elements]", elements.len()),
            NodeContent::Mapping(entries) => format!("{{{} entries}}", entries.len()),
            NodeContent::Composite(composite) => format!("{} {{ .. }}", composite.type_name),
        }
    }

    /// Structural deep equality between two subtrees, possibly across graphs.
    ///
    /// Node pairs already under comparison are treated as equal, so the walk
    /// terminates on cyclic subtrees.
    pub fn subtree_equal(&self, id: NodeId, other: &ValueGraph, other_id: NodeId) -> bool {
        let mut in_progress = AHashSet::new();
        self.subtree_equal_inner(id, other, other_id, &mut in_progress)
    }

    fn subtree_equal_inner(
        &self,
        id: NodeId,
        other: &ValueGraph,
        other_id: NodeId,
        in_progress: &mut AHashSet<(usize, usize)>,
    ) -> bool {
        if !in_progress.insert((id.0, other_id.0)) {
            return true;
        }
        let equal = match (&self.node(id).content, &other.node(other_id).content) {
            (NodeContent::Primitive(a), NodeContent::Primitive(b)) => a == b,
            (NodeContent::Sequence(a), NodeContent::Sequence(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| self.subtree_equal_inner(*x, other, *y, in_progress))
            }
            (NodeContent::Mapping(a), NodeContent::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, x)| match b.get(key) {
                        Some(y) => self.subtree_equal_inner(*x, other, *y, in_progress),
                        None => false,
                    })
            }
            (NodeContent::Composite(a), NodeContent::Composite(b)) => {
                a.type_name == b.type_name
                    && a.fields.len() == b.fields.len()
                    && a.fields.iter().all(|(name, x)| match b.fields.get(name) {
                        Some(y) => self.subtree_equal_inner(*x, other, *y, in_progress),
                        None => false,
                    })
            }
            _ => false,
        };
        in_progress.remove(&(id.0, other_id.0));
        equal
    }
}
