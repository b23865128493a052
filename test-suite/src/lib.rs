//! Shared graph fixtures for the integration tests.

use simile_value::graph::{CompositeNode, NodeContent, NodeId, ValueGraph};
use simile_value::value::PrimitiveValue;

/// `Person { name, age }` with both fields set.
pub fn person(name: &str, age: i64) -> ValueGraph {
    let mut graph = ValueGraph::new();
    let root = graph.root_id();
    graph.set_content(root, NodeContent::Composite(CompositeNode::new("Person")));
    set_field(&mut graph, root, "name", PrimitiveValue::from(name));
    set_field(&mut graph, root, "age", PrimitiveValue::from(age));
    graph
}

/// A linked list of `Link` composites, `length` hops deep, terminated by a
/// boolean `end` field.
pub fn chain(length: usize) -> ValueGraph {
    let mut graph = ValueGraph::new();
    let mut current = graph.root_id();
    graph.set_content(current, NodeContent::Composite(CompositeNode::new("Link")));
    for _ in 0..length {
        let next = graph.add_field("next", current).unwrap();
        graph.set_content(next, NodeContent::Composite(CompositeNode::new("Link")));
        current = next;
    }
    set_field(&mut graph, current, "end", PrimitiveValue::from(true));
    graph
}

/// `Node { label, next }` where `next` points back at the node itself.
pub fn self_loop(label: &str) -> ValueGraph {
    let mut graph = ValueGraph::new();
    let root = graph.root_id();
    graph.set_content(root, NodeContent::Composite(CompositeNode::new("Node")));
    set_field(&mut graph, root, "label", PrimitiveValue::from(label));
    graph.link_field("next", root, root).unwrap();
    graph
}

/// `Pair { left, right }` where both fields reference one shared `Leaf`.
pub fn shared_siblings(value: i64) -> ValueGraph {
    let mut graph = ValueGraph::new();
    let root = graph.root_id();
    graph.set_content(root, NodeContent::Composite(CompositeNode::new("Pair")));
    let leaf = graph.create_node(NodeContent::Composite(CompositeNode::new("Leaf")));
    set_field(&mut graph, leaf, "value", PrimitiveValue::from(value));
    graph.link_field("left", root, leaf).unwrap();
    graph.link_field("right", root, leaf).unwrap();
    graph
}

/// Add a primitive field to a composite node.
pub fn set_field(graph: &mut ValueGraph, parent: NodeId, name: &str, value: PrimitiveValue) {
    let field = graph.add_field(name, parent).unwrap();
    graph.set_content(field, NodeContent::Primitive(value));
}
