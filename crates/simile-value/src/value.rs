use num_bigint::BigInt;

/// Shallow shape of a value.
///
/// Used in diagnostics and as one half of [`crate::graph::TypeIdentity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    Text,
    Sequence,
    Mapping,
    Composite,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
            Self::Sequence => write!(f, "sequence"),
            Self::Mapping => write!(f, "mapping"),
            Self::Composite => write!(f, "composite"),
        }
    }
}

/// A leaf value compared by its own value equality.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Null,
    Bool(bool),
    Integer(BigInt),
    Float(f64),
    Text(String),
}

impl PrimitiveValue {
    /// Returns the text content as a string slice if this is a `Text` variant.
    pub fn as_str(&self) -> Option<&str> {
        if let Self::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
        }
    }
}

impl core::fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "\"{}\"", value),
        }
    }
}

impl From<bool> for PrimitiveValue {
    fn from(value: bool) -> Self {
        PrimitiveValue::Bool(value)
    }
}

impl From<i64> for PrimitiveValue {
    fn from(value: i64) -> Self {
        PrimitiveValue::Integer(BigInt::from(value))
    }
}

impl From<f64> for PrimitiveValue {
    fn from(value: f64) -> Self {
        PrimitiveValue::Float(value)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::Text(value.to_string())
    }
}

/// Key-comparable value which implements `Eq` and `Hash`.
///
/// Mapping keys are restricted to strings, booleans, and integers so that
/// key lookup during validation has deterministic, platform-independent
/// equality semantics. Floats and nulls are deliberately excluded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKey {
    Bool(bool),
    Number(BigInt),
    String(String),
}

impl core::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ObjectKey::Bool(value) => write!(f, "{}", value),
            ObjectKey::Number(value) => write!(f, "{}", value),
            ObjectKey::String(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for ObjectKey {
    fn from(s: &str) -> Self {
        ObjectKey::String(s.to_string())
    }
}

impl From<i64> for ObjectKey {
    fn from(n: i64) -> Self {
        ObjectKey::Number(BigInt::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_kind() {
        assert_eq!(PrimitiveValue::Null.kind(), ValueKind::Null);
        assert_eq!(PrimitiveValue::from(42).kind(), ValueKind::Integer);
        assert_eq!(PrimitiveValue::from("hi").kind(), ValueKind::Text);
    }

    #[test]
    fn primitive_display_quotes_text() {
        assert_eq!(format!("{}", PrimitiveValue::from("A")), "\"A\"");
        assert_eq!(format!("{}", PrimitiveValue::from(30)), "30");
        assert_eq!(format!("{}", PrimitiveValue::Null), "null");
    }

    #[test]
    fn object_key_display() {
        assert_eq!(format!("{}", ObjectKey::from("name")), "name");
        assert_eq!(format!("{}", ObjectKey::from(7)), "7");
    }
}
