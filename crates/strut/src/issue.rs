//! Validation issues - the single representation of a data mismatch.
//!
//! A check never throws for invalid data; it returns a list of [`Issue`]s.
//! Each issue carries the name of the rule that rejected the value, a path
//! locating the offending value inside the checked tree, and structured
//! [`IssueDetails`] recording the concrete conflict.

use std::borrow::Cow;
use std::fmt;
use std::fmt::Write as _;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;

use crate::kind::ValueKind;

// ============================================================================
// PATH
// ============================================================================

/// One step into a nested value: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A root-relative location inside a checked value.
///
/// Paths are short in practice; the inline capacity covers typical
/// nesting without a heap allocation.
pub type Path = SmallVec<[PathSegment; 4]>;

/// Renders a path in `users[0].name` form.
#[must_use]
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                // Writing to a String cannot fail.
                let _ = write!(out, "[{index}]");
            }
        }
    }
    out
}

// ============================================================================
// DETAILS
// ============================================================================

/// The concrete conflict behind an issue.
///
/// A closed set: every built-in rule reports through one of these, so
/// callers can match exhaustively instead of probing a free-form map.
/// Serializes as an object whose `reason` field names the conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueDetails {
    /// The value exists but has the wrong primitive kind.
    Kind { expect: ValueKind, is: ValueKind },
    /// A required value is absent.
    Missing,
    /// The value is not equal to the single expected value.
    NotEqual { expect: Value, is: Value },
    /// The value is not a member of the expected set.
    NotOneOf { expect: Vec<Value>, is: Value },
    /// No branch of a union or select matched.
    NoMatches,
    /// A property present in the value but absent from an exact schema.
    Redundant,
    /// A custom predicate returned false.
    Rejected,
}

impl Serialize for IssueDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Kind { expect, is } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("reason", "kind_mismatch")?;
                map.serialize_entry("expect", expect)?;
                map.serialize_entry("is", is)?;
                map.end()
            }
            Self::Missing => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("reason", "missing")?;
                map.end()
            }
            Self::NotEqual { expect, is } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("reason", "not_equal")?;
                map.serialize_entry("expect", expect)?;
                map.serialize_entry("is", is)?;
                map.end()
            }
            Self::NotOneOf { expect, is } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("reason", "no_matches")?;
                map.serialize_entry("expect", expect)?;
                map.serialize_entry("is", is)?;
                map.end()
            }
            Self::NoMatches => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("reason", "no_matches")?;
                map.end()
            }
            Self::Redundant => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("reason", "redundant")?;
                map.end()
            }
            Self::Rejected => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("reason", "mismatch")?;
                map.end()
            }
        }
    }
}

// ============================================================================
// ISSUE
// ============================================================================

/// A single reported mismatch.
///
/// The path is relative to the subtree where the issue originated;
/// structural rules prepend the child key or index while unwinding, so a
/// leaf issue ends up with an absolute path from the root value.
///
/// # Examples
///
/// ```
/// use strut::{Issue, IssueDetails};
///
/// let issue = Issue::new("required", IssueDetails::Missing)
///     .at("name")
///     .at("user");
/// assert_eq!(issue.path_string(), "user.name");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Name of the rule that produced the issue.
    pub rule: Cow<'static, str>,
    /// Root-relative location of the offending value.
    pub path: Path,
    /// The concrete conflict.
    pub details: IssueDetails,
}

impl Issue {
    /// Creates an issue with an empty path.
    pub fn new(rule: impl Into<Cow<'static, str>>, details: IssueDetails) -> Self {
        Self {
            rule: rule.into(),
            path: Path::new(),
            details,
        }
    }

    /// Prepends a segment to the path.
    ///
    /// Called while unwinding out of a structural rule, innermost first.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// The path in `users[0].name` form.
    #[must_use]
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {:?}", self.rule, self.details)
        } else {
            write!(f, "[{}] {}: {:?}", self.path_string(), self.rule, self.details)
        }
    }
}

/// Prepends `segment` to every issue in the list.
pub(crate) fn prefix(issues: Vec<Issue>, segment: &PathSegment) -> Vec<Issue> {
    issues
        .into_iter()
        .map(|issue| issue.at(segment.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_prepends() {
        let issue = Issue::new("type", IssueDetails::NoMatches).at(0_usize).at("posts");
        assert_eq!(
            issue.path.as_slice(),
            &[PathSegment::from("posts"), PathSegment::from(0_usize)]
        );
    }

    #[test]
    fn path_rendering() {
        let path = [
            PathSegment::from("posts"),
            PathSegment::from(0_usize),
            PathSegment::from("authors"),
            PathSegment::from(1_usize),
        ];
        assert_eq!(format_path(&path), "posts[0].authors[1]");
    }

    #[test]
    fn root_index_rendering() {
        let path = [PathSegment::from(2_usize), PathSegment::from("id")];
        assert_eq!(format_path(&path), "[2].id");
    }

    #[test]
    fn details_serialize_with_reason() {
        let details = IssueDetails::Kind {
            expect: ValueKind::Number,
            is: ValueKind::Null,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["reason"], "kind_mismatch");
        assert_eq!(json["expect"], "number");
        assert_eq!(json["is"], "null");
    }

    #[test]
    fn redundant_serializes_bare() {
        let json = serde_json::to_value(IssueDetails::Redundant).unwrap();
        assert_eq!(json, serde_json::json!({"reason": "redundant"}));
    }

    #[test]
    fn issue_serializes_path() {
        let issue = Issue::new("required", IssueDetails::Missing).at(1_usize).at("items");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["path"], serde_json::json!(["items", 1]));
    }
}
