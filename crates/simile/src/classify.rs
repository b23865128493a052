//! Type classification.
//!
//! A type is `Simple` when it defines its own meaningful value equality and
//! is compared as one value; otherwise it is `Complex` and must be recursed
//! into member-by-member. Classification is pure per type, so the result is
//! memoized for the life of one validator instance.

use std::cell::RefCell;

use ahash::AHashMap;
use simile_value::graph::{TypeIdentity, ValueGraph};
use simile_value::value::ValueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    /// Compared by the type's own equality semantics.
    Simple,
    /// Recursed into member-by-member.
    Complex,
}

/// Seam for "does this type define custom equality".
///
/// [`ValueGraph`] implements it from its value-type registry; tests may
/// instrument it to observe cache behavior.
pub trait TypeIntrospection {
    fn overrides_equality(&self, identity: &TypeIdentity) -> bool;
}

impl TypeIntrospection for ValueGraph {
    fn overrides_equality(&self, identity: &TypeIdentity) -> bool {
        match identity {
            TypeIdentity::Kind(ValueKind::Sequence)
            | TypeIdentity::Kind(ValueKind::Mapping)
            | TypeIdentity::Kind(ValueKind::Composite) => false,
            TypeIdentity::Kind(_) => true,
            TypeIdentity::Named(name) => self.is_value_type(name),
        }
    }
}

/// Caches, per observed runtime type, whether it must be recursed into.
///
/// A fresh validator starts with an empty cache; entries never go stale
/// within a run because classification depends only on the type.
#[derive(Debug, Default)]
pub struct TypeClassifier {
    cache: RefCell<AHashMap<TypeIdentity, Complexity>>,
}

impl TypeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(
        &self,
        identity: &TypeIdentity,
        introspection: &dyn TypeIntrospection,
    ) -> Complexity {
        if let Some(cached) = self.cache.borrow().get(identity) {
            return *cached;
        }
        let complexity = if introspection.overrides_equality(identity) {
            Complexity::Simple
        } else {
            Complexity::Complex
        };
        self.cache
            .borrow_mut()
            .insert(identity.clone(), complexity);
        complexity
    }
}
