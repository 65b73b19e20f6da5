//! Prelude - one import for the whole builder surface.
//!
//! ```
//! use strut::prelude::*;
//!
//! let ty = shape(schema! { id => number().required() });
//! assert!(ty.check(Some(&serde_json::json!({"id": 1}))).is_empty());
//! ```

pub use crate::builders::{
    any, array, array_of, boolean, custom, exact, exact_fuzzy, is, kind, null, number, object,
    object_of, one_of, one_of_type, optional, required, select, select_permissive, shape, string,
    strict,
};
pub use crate::checkable::Checkable;
pub use crate::context::Context;
pub use crate::guard::{CheckError, Signature};
pub use crate::issue::{format_path, Issue, IssueDetails, Path, PathSegment};
pub use crate::kind::ValueKind;
pub use crate::registry::{RegistryError, RuleBook};
pub use crate::rule::{Exactness, RuleCheck, RuleEntry, RuleKind};
pub use crate::schema::{arm, Predicate, SchemaNode, SelectArm, ShapeSchema, Target};
pub use crate::store::{Ref, Store};
pub use crate::{path, schema};
