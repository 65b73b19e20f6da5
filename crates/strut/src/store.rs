//! Named type store and deferred references.
//!
//! Two mutually recursive types (a user has posts, a post has authors)
//! cannot both be fully constructed before the other exists. The store
//! breaks the cycle: each side embeds a [`Ref`] by name, and the lookup
//! happens at the moment a check needs the underlying type - never at
//! schema construction.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::checkable::Checkable;

type Registry = Arc<RwLock<HashMap<String, Arc<Checkable>>>>;

/// An arena of named types.
///
/// Cloning a store is cheap and every clone shares the same registry.
/// Registration is expected to happen during a single-threaded setup
/// phase; checking may then proceed concurrently from any number of
/// threads.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strut::{array_of, number, schema, shape, Store};
///
/// let store = Store::new();
/// store.add("user", shape(schema! {
///     "id" => number().required(),
///     "posts" => array_of(store.ref_to("post")),
/// }));
/// store.add("post", shape(schema! {
///     "id" => number().required(),
///     "authors" => array_of(store.ref_to("user")),
/// }));
///
/// let user = store.get("user").unwrap();
/// let bad = json!({"id": 1, "posts": [{"id": 2, "authors": [null]}]});
/// let issues = user.check(Some(&bad));
/// assert_eq!(issues[0].path_string(), "posts[0].authors[0]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    registry: Registry,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type under `name`, overwriting any previous entry.
    /// References already handed out observe the new type.
    pub fn add(&self, name: impl Into<String>, ty: Checkable) {
        self.registry.write().insert(name.into(), Arc::new(ty));
    }

    /// Looks up a registered type.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Checkable>> {
        self.registry.read().get(name).cloned()
    }

    /// Whether a type is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.registry.read().contains_key(name)
    }

    /// A reference to the named type, resolved at check time.
    ///
    /// The name does not need to be registered yet; it must be registered
    /// by the time a check first resolves the reference.
    #[must_use]
    pub fn ref_to(&self, name: impl Into<String>) -> Ref {
        Ref {
            name: name.into().into(),
            registry: Arc::clone(&self.registry),
        }
    }
}

/// A named pointer into a [`Store`].
#[derive(Debug, Clone)]
pub struct Ref {
    name: Arc<str>,
    registry: Registry,
}

impl Ref {
    /// The referenced name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves to the current type registered under the name.
    ///
    /// # Panics
    ///
    /// Panics if no type was ever registered under the name. A dangling
    /// reference is a bug in the schema definition, not in the data being
    /// validated, so it fails loudly rather than silently passing.
    #[must_use]
    pub fn unref(&self) -> Arc<Checkable> {
        match self.try_unref() {
            Some(ty) => ty,
            None => panic!("no type named `{}` is registered in the store", self.name),
        }
    }

    /// Resolves to the current type, or `None` for a dangling name.
    #[must_use]
    pub fn try_unref(&self) -> Option<Arc<Checkable>> {
        self.registry.read().get(self.name.as_ref()).cloned()
    }
}
