//! Checking context - ancestry available to rules during a tree walk.

use serde_json::Value;

/// The chain of container values above the value currently being checked.
///
/// Structural rules push their container before descending, so a rule
/// checking `x` inside `{"x": 0, "y": 1}` can read its siblings through
/// [`Context::parent`]. Built-in rules ignore the context; it exists for
/// registered extension rules.
///
/// Ordered root-first: `parents().first()` is the root container,
/// `parents().last()` the immediate one.
#[derive(Debug, Clone, Default)]
pub struct Context<'v> {
    parents: Vec<&'v Value>,
}

impl<'v> Context<'v> {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    /// All container values above the current one, root-first.
    #[must_use]
    pub fn parents(&self) -> &[&'v Value] {
        &self.parents
    }

    /// The immediate container, if the check has descended at all.
    #[must_use]
    pub fn parent(&self) -> Option<&'v Value> {
        self.parents.last().copied()
    }

    /// Nesting depth of the current check.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// A context one level deeper, inside `container`.
    pub(crate) fn child(&self, container: &'v Value) -> Self {
        let mut parents = self.parents.clone();
        parents.push(container);
        Self { parents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_has_no_parent() {
        let ctx = Context::root();
        assert!(ctx.parent().is_none());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn child_pushes_container() {
        let outer = json!({"inner": {}});
        let inner = json!({});
        let ctx = Context::root().child(&outer).child(&inner);
        assert_eq!(ctx.depth(), 2);
        assert_eq!(ctx.parents()[0], &outer);
        assert_eq!(ctx.parent(), Some(&inner));
    }
}
