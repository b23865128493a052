use core::fmt::Display;

use thisisplural::Plural;

use crate::value::ObjectKey;

/// Ordered sequence of access segments identifying a location in a value
/// graph. Depth is the segment count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Plural)]
pub struct MemberPath(pub Vec<PathSegment>);

impl MemberPath {
    /// Create an empty path representing the graph root.
    pub fn root() -> Self {
        MemberPath(Vec::new())
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments; one recursive descent adds exactly one.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Derive the path of a child member.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        MemberPath(segments)
    }

    /// Whether this path is a prefix-ancestor of `other` (or equal to it).
    pub fn is_ancestor_of(&self, other: &MemberPath) -> bool {
        self.0.len() <= other.0.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }
}

impl Default for MemberPath {
    fn default() -> Self {
        Self::root()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named member of a composite value
    Field(String),
    /// Sequence element access
    Index(usize),
    /// Mapping entry access
    Key(ObjectKey),
}

impl Display for MemberPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            let is_first = i == 0;
            match segment {
                PathSegment::Field(name) => {
                    if !is_first {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Key(key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_path() {
        assert_eq!(format!("{}", MemberPath::root()), "(root)");
    }

    #[test]
    fn display_nested_fields() {
        let path = MemberPath(vec![
            PathSegment::Field("a".to_string()),
            PathSegment::Field("b".to_string()),
            PathSegment::Field("c".to_string()),
        ]);
        assert_eq!(format!("{}", path), "a.b.c");
    }

    #[test]
    fn display_index() {
        let path = MemberPath(vec![
            PathSegment::Field("items".to_string()),
            PathSegment::Index(0),
        ]);
        assert_eq!(format!("{}", path), "items[0]");
    }

    #[test]
    fn display_key() {
        let path = MemberPath(vec![
            PathSegment::Field("lookup".to_string()),
            PathSegment::Key(ObjectKey::from("k")),
        ]);
        assert_eq!(format!("{}", path), "lookup[k]");
    }

    #[test]
    fn child_extends_depth_by_one() {
        let path = MemberPath::root();
        let child = path.child(PathSegment::Field("x".to_string()));
        assert_eq!(path.depth(), 0);
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn ancestor_prefix() {
        let root = MemberPath::root();
        let left = root.child(PathSegment::Field("left".to_string()));
        let left_next = left.child(PathSegment::Field("next".to_string()));
        let right = root.child(PathSegment::Field("right".to_string()));

        assert!(root.is_ancestor_of(&left));
        assert!(left.is_ancestor_of(&left_next));
        assert!(left.is_ancestor_of(&left));
        assert!(!left.is_ancestor_of(&right));
        assert!(!left_next.is_ancestor_of(&left));
    }
}
