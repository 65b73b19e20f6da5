//! Value kinds - the primitive categories a JSON value can belong to.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification of a [`Value`] into its primitive category.
///
/// `Object` excludes arrays and null by construction of the value enum,
/// so a kind check never needs the extra guards a dynamic language does.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strut::ValueKind;
///
/// assert_eq!(ValueKind::of(&json!(3.5)), ValueKind::Number);
/// assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Object);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classifies a value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// The lowercase name used in issue details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// True for the kinds structural rules can recurse into.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_every_kind() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(1)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn array_is_not_object() {
        assert_ne!(ValueKind::of(&json!([])), ValueKind::Object);
        assert_ne!(ValueKind::of(&json!(null)), ValueKind::Object);
    }

    #[test]
    fn containers() {
        assert!(ValueKind::Array.is_container());
        assert!(ValueKind::Object.is_container());
        assert!(!ValueKind::String.is_container());
    }
}
