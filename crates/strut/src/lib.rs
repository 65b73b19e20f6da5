//! # strut
//!
//! Composable runtime type descriptions and structural checking for JSON
//! values. Types are built by chaining rule combinators; checking a value
//! walks the rules and returns every mismatch as a path-qualified
//! [`Issue`] - invalid data is reported, never thrown.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use strut::prelude::*;
//!
//! let user = shape(schema! {
//!     id => number().required(),
//!     name => string(),
//!     tags => array_of(string()),
//! });
//!
//! assert!(user.check(Some(&json!({"id": 1, "tags": ["a"]}))).is_empty());
//!
//! let issues = user.check(Some(&json!({"tags": ["a", 2]})));
//! assert_eq!(issues[0].path_string(), "id");      // required
//! assert_eq!(issues[1].path_string(), "tags[1]"); // not a string
//! ```
//!
//! ## Design
//!
//! - A [`Checkable`] is an immutable, ordered list of named rules; every
//!   combinator returns a new instance. Rules replace by name, so the
//!   last conflicting declaration wins.
//! - Checking short-circuits across independent rules (a kind mismatch
//!   suppresses later checks) but accumulates across children of
//!   structural rules (`array_of`, `shape`, ...), so one bad element
//!   never hides another.
//! - Absence (`None`, a missing key) is distinct from `null` and is
//!   governed solely by the `required` rule; every other rule skips
//!   absent values, so optionality composes freely.
//! - Mutually recursive types go through a [`Store`]: references resolve
//!   by name at check time, never at construction.
//!
//! Two error channels, never conflated: data mismatches are returned as
//! `Vec<Issue>`; schema bugs (dangling references, duplicate rule
//! registration) fail loudly at construction or registration time.

pub mod builders;
mod checkable;
mod context;
pub mod guard;
mod issue;
mod kind;
mod macros;
pub mod registry;
pub mod rule;
mod schema;
mod store;

pub mod prelude;

pub use builders::{
    any, array, array_of, boolean, custom, exact, exact_fuzzy, is, kind, null, number, object,
    object_of, one_of, one_of_type, optional, required, select, select_permissive, shape, string,
    strict,
};
pub use checkable::Checkable;
pub use context::Context;
pub use guard::{CheckError, Signature};
pub use issue::{format_path, Issue, IssueDetails, Path, PathSegment};
pub use kind::ValueKind;
pub use registry::{RegistryError, RuleBook};
pub use rule::{Exactness, RuleCheck, RuleEntry, RuleKind};
pub use schema::{arm, Predicate, SchemaNode, SelectArm, ShapeSchema, Target};
pub use store::{Ref, Store};
