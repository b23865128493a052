//! Value graph model for structural-equivalence validation.
//!
//! Values are held in an arena ([`graph::ValueGraph`]) and addressed by
//! [`graph::NodeId`]. Node ids double as reference identity: attaching an
//! existing id under a second parent expresses a shared subtree, and linking
//! an id back to one of its ancestors expresses a cycle. The validation
//! engine keys its cycle detection on exactly this identity.

/// Arena-based value graph and node content types.
pub mod graph;

/// Member paths identifying a location within a value graph.
pub mod path;

/// Primitive values, shallow value kinds, and mapping keys.
pub mod value;

pub use graph::{CompositeNode, InsertError, Node, NodeContent, NodeId, TypeIdentity, ValueGraph};
pub use path::{MemberPath, PathSegment};
pub use value::{ObjectKey, PrimitiveValue, ValueKind};
