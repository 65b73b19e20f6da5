//! Schema building blocks - nested type positions and shape schemas.
//!
//! Everywhere a combinator accepts a nested type it takes a [`Target`]: a
//! concrete [`Checkable`], a store [`Ref`] resolved by name at check time,
//! or a deferred closure. Shape schemas additionally allow a raw nested
//! schema in value position, interpreted as an implicit nested shape.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::checkable::Checkable;
use crate::kind::ValueKind;
use crate::store::Ref;

// ============================================================================
// TARGET
// ============================================================================

/// A nested type position.
///
/// `Ref` and `Deferred` postpone resolution until the moment a check needs
/// the underlying type, which is what lets two types reference each other
/// before either is fully defined.
#[derive(Clone)]
pub enum Target {
    /// A fully built type.
    Type(Arc<Checkable>),
    /// A named reference into a [`Store`](crate::store::Store).
    Ref(Ref),
    /// A closure producing the type on demand.
    Deferred(Arc<dyn Fn() -> Checkable + Send + Sync>),
}

impl Target {
    /// Wraps a closure evaluated at check time.
    pub fn deferred(f: impl Fn() -> Checkable + Send + Sync + 'static) -> Self {
        Self::Deferred(Arc::new(f))
    }

    /// Resolves to the underlying type.
    ///
    /// # Panics
    ///
    /// Panics if this is a [`Ref`] whose name was never added to its store;
    /// see [`Ref::unref`].
    #[must_use]
    pub fn resolve(&self) -> Arc<Checkable> {
        match self {
            Self::Type(ty) => Arc::clone(ty),
            Self::Ref(reference) => reference.unref(),
            Self::Deferred(f) => Arc::new(f()),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
            Self::Ref(reference) => f.debug_tuple("Ref").field(&reference.name()).finish(),
            Self::Deferred(_) => f.write_str("Deferred(<closure>)"),
        }
    }
}

impl From<Checkable> for Target {
    fn from(ty: Checkable) -> Self {
        Self::Type(Arc::new(ty))
    }
}

impl From<&Checkable> for Target {
    fn from(ty: &Checkable) -> Self {
        Self::Type(Arc::new(ty.clone()))
    }
}

impl From<Arc<Checkable>> for Target {
    fn from(ty: Arc<Checkable>) -> Self {
        Self::Type(ty)
    }
}

impl From<Ref> for Target {
    fn from(reference: Ref) -> Self {
        Self::Ref(reference)
    }
}

// ============================================================================
// SHAPE SCHEMAS
// ============================================================================

/// A value position inside a shape schema.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A nested type.
    Target(Target),
    /// A raw nested schema - an implicit nested shape that inherits the
    /// enclosing rule's exactness.
    Nested(ShapeSchema),
}

impl SchemaNode {
    /// Wraps a closure evaluated at check time.
    pub fn deferred(f: impl Fn() -> Checkable + Send + Sync + 'static) -> Self {
        Self::Target(Target::deferred(f))
    }
}

impl From<Target> for SchemaNode {
    fn from(target: Target) -> Self {
        Self::Target(target)
    }
}

impl From<Checkable> for SchemaNode {
    fn from(ty: Checkable) -> Self {
        Self::Target(ty.into())
    }
}

impl From<&Checkable> for SchemaNode {
    fn from(ty: &Checkable) -> Self {
        Self::Target(ty.into())
    }
}

impl From<Arc<Checkable>> for SchemaNode {
    fn from(ty: Arc<Checkable>) -> Self {
        Self::Target(ty.into())
    }
}

impl From<Ref> for SchemaNode {
    fn from(reference: Ref) -> Self {
        Self::Target(reference.into())
    }
}

impl From<ShapeSchema> for SchemaNode {
    fn from(schema: ShapeSchema) -> Self {
        Self::Nested(schema)
    }
}

/// A fixed structure description: keyed (object) or positional (array).
///
/// Keyed field order is preserved and determines the order of reported
/// issues. The [`schema!`](crate::schema) macro is the usual way to build
/// keyed schemas.
#[derive(Debug, Clone)]
pub enum ShapeSchema {
    Keyed(Vec<(String, SchemaNode)>),
    Positional(Vec<SchemaNode>),
}

impl ShapeSchema {
    /// A keyed schema from `(key, node)` pairs.
    #[must_use]
    pub fn keyed(fields: Vec<(String, SchemaNode)>) -> Self {
        Self::Keyed(fields)
    }

    /// A positional schema checked index-wise against an array.
    pub fn positional<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<SchemaNode>,
    {
        Self::Positional(nodes.into_iter().map(Into::into).collect())
    }

    /// The container kind this schema applies to.
    #[must_use]
    pub const fn container_kind(&self) -> ValueKind {
        match self {
            Self::Keyed(_) => ValueKind::Object,
            Self::Positional(_) => ValueKind::Array,
        }
    }
}

impl From<Vec<(String, SchemaNode)>> for ShapeSchema {
    fn from(fields: Vec<(String, SchemaNode)>) -> Self {
        Self::Keyed(fields)
    }
}

impl From<Vec<Checkable>> for ShapeSchema {
    fn from(nodes: Vec<Checkable>) -> Self {
        Self::positional(nodes)
    }
}

// ============================================================================
// SELECT ARMS
// ============================================================================

/// A predicate over the checked value.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// One `(predicate, type)` arm of a select rule.
///
/// The pairing of a callable with a type is enforced by construction; a
/// malformed arm is a compile error, not a runtime one.
#[derive(Clone)]
pub struct SelectArm {
    pub(crate) when: Predicate,
    pub(crate) target: Target,
}

impl SelectArm {
    pub fn new(
        when: impl Fn(&Value) -> bool + Send + Sync + 'static,
        target: impl Into<Target>,
    ) -> Self {
        Self {
            when: Arc::new(when),
            target: target.into(),
        }
    }

    /// The type this arm delegates to.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }
}

impl fmt::Debug for SelectArm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectArm")
            .field("when", &"<predicate>")
            .field("target", &self.target)
            .finish()
    }
}

/// Creates a select arm.
pub fn arm(
    when: impl Fn(&Value) -> bool + Send + Sync + 'static,
    target: impl Into<Target>,
) -> SelectArm {
    SelectArm::new(when, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{number, string};

    #[test]
    fn target_resolves_concrete_type() {
        let target = Target::from(number());
        let ty = target.resolve();
        assert!(ty.has_rule("type"));
    }

    #[test]
    fn deferred_resolves_at_call_time() {
        let target = Target::deferred(string);
        assert!(target.resolve().has_rule("type"));
    }

    #[test]
    fn container_kinds() {
        assert_eq!(
            ShapeSchema::keyed(vec![]).container_kind(),
            ValueKind::Object
        );
        assert_eq!(
            ShapeSchema::positional(Vec::<Checkable>::new()).container_kind(),
            ValueKind::Array
        );
    }
}
