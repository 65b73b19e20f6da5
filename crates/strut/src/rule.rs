//! Rules - named validation behaviors attached to a type.
//!
//! A rule is a closed variant of [`RuleKind`] plus the name it reports
//! issues under. Rules are stateless and shared; the same kind with
//! different params backs many types. Two conventions are load-bearing:
//!
//! - **Skip on absent.** Every rule except `required`, `custom`, and
//!   registered extensions returns no issues for an absent value. Absence
//!   is governed solely by the `required` rule, so any rule composes
//!   freely with optionality.
//! - **Replace by name.** Adding a rule removes any existing entry with
//!   the same name before appending, giving last-call-wins semantics for
//!   conflicting declarations.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::context::Context;
use crate::issue::{prefix, Issue, IssueDetails, PathSegment};
use crate::kind::ValueKind;
use crate::schema::{SchemaNode, SelectArm, ShapeSchema, Target};

// ============================================================================
// RULE NAMES
// ============================================================================

/// Names the built-in rules report issues under.
///
/// Registered extension rules must not reuse these; see
/// [`RuleBook::register`](crate::registry::RuleBook::register).
pub mod names {
    pub const REQUIRED: &str = "required";
    pub const TYPE: &str = "type";
    pub const IS: &str = "is";
    pub const ONE_OF: &str = "one_of";
    pub const ONE_OF_TYPE: &str = "one_of_type";
    pub const ARRAY_OF: &str = "array_of";
    pub const OBJECT_OF: &str = "object_of";
    pub const SHAPE: &str = "shape";
    pub const SELECT: &str = "select";
    pub const CUSTOM: &str = "custom";

    /// Every built-in rule name.
    pub const ALL: &[&str] = &[
        REQUIRED, TYPE, IS, ONE_OF, ONE_OF_TYPE, ARRAY_OF, OBJECT_OF, SHAPE, SELECT, CUSTOM,
    ];
}

// ============================================================================
// EXTENSION TRAIT
// ============================================================================

/// A check implementation for a registered extension rule.
///
/// Extension rules receive the raw `Option<&Value>` (they decide their own
/// absence behavior) and the checking [`Context`], which exposes the chain
/// of parent containers.
pub trait RuleCheck: Send + Sync {
    /// Checks a value; an empty list means the value passes.
    fn check(&self, value: Option<&Value>, ctx: &Context<'_>) -> Vec<Issue>;
}

/// A custom escape-hatch predicate.
pub type CustomPredicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

// ============================================================================
// RULE ENTRY
// ============================================================================

/// A named rule attached to a type.
///
/// Entries are evaluated in insertion order; the first entry to report
/// issues wins.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    name: std::borrow::Cow<'static, str>,
    rule: RuleKind,
}

impl RuleEntry {
    pub(crate) fn new(name: impl Into<std::borrow::Cow<'static, str>>, rule: RuleKind) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    /// The name the entry replaces by and reports issues under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule behavior and its params.
    #[must_use]
    pub fn rule(&self) -> &RuleKind {
        &self.rule
    }
}

// ============================================================================
// RULE KIND
// ============================================================================

/// The closed set of rule behaviors, each carrying its params.
#[derive(Clone)]
pub enum RuleKind {
    /// Rejects an absent value.
    Required,
    /// The value must belong to a primitive category.
    Kind(ValueKind),
    /// The value must equal the expected value exactly.
    Is(Value),
    /// The value must be a member of the set.
    OneOf(Vec<Value>),
    /// At least one listed type must accept the value.
    OneOfType(Vec<Target>),
    /// Every array element must match the element type.
    ArrayOf(Target),
    /// Every object property value must match the element type.
    ObjectOf(Target),
    /// Fixed keyed or positional structure; covers shape, exact, and
    /// fuzzy-exact.
    Shape(ShapeRule),
    /// Predicate-dispatched union.
    Select(SelectRule),
    /// Escape-hatch predicate; runs even for absent values.
    Custom(CustomPredicate),
    /// A rule registered through a [`RuleBook`](crate::registry::RuleBook).
    Extension(Arc<dyn RuleCheck>),
}

impl RuleKind {
    /// Evaluates the rule against a value.
    pub(crate) fn check<'v>(&self, value: Option<&'v Value>, ctx: &Context<'v>) -> Vec<Issue> {
        let value = match (self, value) {
            (Self::Required, None) => {
                return vec![Issue::new(names::REQUIRED, IssueDetails::Missing)];
            }
            (Self::Required, Some(_)) => return Vec::new(),
            (Self::Custom(predicate), value) => {
                return if predicate(value) {
                    Vec::new()
                } else {
                    vec![Issue::new(names::CUSTOM, IssueDetails::Rejected)]
                };
            }
            (Self::Extension(rule), value) => return rule.check(value, ctx),
            // Absence is governed solely by the `required` rule.
            (_, None) => return Vec::new(),
            (_, Some(value)) => value,
        };

        match self {
            Self::Kind(expect) => {
                let is = ValueKind::of(value);
                if is == *expect {
                    Vec::new()
                } else {
                    vec![Issue::new(names::TYPE, IssueDetails::Kind { expect: *expect, is })]
                }
            }
            Self::Is(expect) => {
                if value == expect {
                    Vec::new()
                } else {
                    vec![Issue::new(
                        names::IS,
                        IssueDetails::NotEqual {
                            expect: expect.clone(),
                            is: value.clone(),
                        },
                    )]
                }
            }
            Self::OneOf(values) => {
                if values.iter().any(|candidate| candidate == value) {
                    Vec::new()
                } else {
                    vec![Issue::new(
                        names::ONE_OF,
                        IssueDetails::NotOneOf {
                            expect: values.clone(),
                            is: value.clone(),
                        },
                    )]
                }
            }
            Self::OneOfType(targets) => {
                let matched = targets
                    .iter()
                    .any(|target| target.resolve().check_in(Some(value), ctx).is_empty());
                if matched {
                    Vec::new()
                } else {
                    // No single branch is "the" expected shape, so child
                    // diagnostics are swallowed.
                    vec![Issue::new(names::ONE_OF_TYPE, IssueDetails::NoMatches)]
                }
            }
            Self::ArrayOf(target) => check_array_of(target, value, ctx),
            Self::ObjectOf(target) => check_object_of(target, value, ctx),
            Self::Shape(rule) => rule.check(value, ctx),
            Self::Select(rule) => rule.check(value, ctx),
            // Handled before the presence match.
            Self::Required | Self::Custom(_) | Self::Extension(_) => Vec::new(),
        }
    }
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Self::Is(value) => f.debug_tuple("Is").field(value).finish(),
            Self::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
            Self::OneOfType(targets) => f.debug_tuple("OneOfType").field(targets).finish(),
            Self::ArrayOf(target) => f.debug_tuple("ArrayOf").field(target).finish(),
            Self::ObjectOf(target) => f.debug_tuple("ObjectOf").field(target).finish(),
            Self::Shape(rule) => f.debug_tuple("Shape").field(rule).finish(),
            Self::Select(rule) => f.debug_tuple("Select").field(rule).finish(),
            Self::Custom(_) => f.write_str("Custom(<predicate>)"),
            Self::Extension(_) => f.write_str("Extension(<rule>)"),
        }
    }
}

/// Checks every element of an array, accumulating issues across elements.
fn check_array_of<'v>(target: &Target, value: &'v Value, ctx: &Context<'v>) -> Vec<Issue> {
    // The `array` kind rule is injected ahead of this one; a non-array
    // value never reaches recursion.
    let Value::Array(items) = value else {
        return Vec::new();
    };

    let element_type = target.resolve();
    let child_ctx = ctx.child(value);
    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        issues.extend(prefix(
            element_type.check_in(Some(item), &child_ctx),
            &PathSegment::Index(index),
        ));
    }
    issues
}

/// Checks every property value of an object, accumulating issues.
fn check_object_of<'v>(target: &Target, value: &'v Value, ctx: &Context<'v>) -> Vec<Issue> {
    let Value::Object(map) = value else {
        return Vec::new();
    };

    let element_type = target.resolve();
    let child_ctx = ctx.child(value);
    let mut issues = Vec::new();
    for (key, item) in map {
        issues.extend(prefix(
            element_type.check_in(Some(item), &child_ctx),
            &PathSegment::Key(key.clone()),
        ));
    }
    issues
}

// ============================================================================
// SHAPE RULE
// ============================================================================

/// Whether properties outside the schema are tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exactness {
    /// Extra properties are ignored.
    Loose,
    /// Extra properties are reported as redundant.
    Exact,
}

/// Fixed-structure params: the schema, its exactness, and the ordered
/// fuzzy patterns consulted before flagging an extra key redundant.
#[derive(Debug, Clone)]
pub struct ShapeRule {
    schema: ShapeSchema,
    exactness: Exactness,
    fuzzy: Vec<(Regex, Target)>,
}

impl ShapeRule {
    /// Builds the rule, lowering raw nested schemas into implicit nested
    /// shapes of the same exactness.
    ///
    /// Fuzzy matching is a single-level fallback: implicit nested shapes
    /// under a fuzzy-exact rule are plain exact.
    pub(crate) fn new(
        schema: ShapeSchema,
        exactness: Exactness,
        fuzzy: Vec<(Regex, Target)>,
    ) -> Self {
        Self {
            schema: lower_schema(schema, exactness),
            exactness,
            fuzzy,
        }
    }

    /// The lowered schema.
    #[must_use]
    pub fn schema(&self) -> &ShapeSchema {
        &self.schema
    }

    #[must_use]
    pub fn exactness(&self) -> Exactness {
        self.exactness
    }

    pub(crate) fn check<'v>(&self, value: &'v Value, ctx: &Context<'v>) -> Vec<Issue> {
        match (&self.schema, value) {
            (ShapeSchema::Keyed(fields), Value::Object(map)) => {
                let child_ctx = ctx.child(value);
                let mut issues = Vec::new();

                for (key, node) in fields {
                    issues.extend(prefix(
                        check_node(node, map.get(key.as_str()), &child_ctx),
                        &PathSegment::Key(key.clone()),
                    ));
                }

                if self.exactness == Exactness::Exact {
                    for (key, child) in map {
                        if fields.iter().any(|(field, _)| field == key) {
                            continue;
                        }
                        issues.extend(self.check_extra_key(key, child, &child_ctx));
                    }
                }

                issues
            }
            (ShapeSchema::Positional(nodes), Value::Array(items)) => {
                let child_ctx = ctx.child(value);
                let mut issues = Vec::new();

                for (index, node) in nodes.iter().enumerate() {
                    issues.extend(prefix(
                        check_node(node, items.get(index), &child_ctx),
                        &PathSegment::Index(index),
                    ));
                }

                if self.exactness == Exactness::Exact {
                    for index in nodes.len()..items.len() {
                        issues.push(Issue::new(names::SHAPE, IssueDetails::Redundant).at(index));
                    }
                }

                issues
            }
            // The container kind rule is injected ahead of this one.
            _ => Vec::new(),
        }
    }

    /// A key present in the value but absent from the schema: the first
    /// matching fuzzy pattern consumes it, otherwise it is redundant.
    ///
    /// Redundant properties are flagged without recursing into them.
    fn check_extra_key<'v>(
        &self,
        key: &str,
        child: &'v Value,
        ctx: &Context<'v>,
    ) -> Vec<Issue> {
        for (pattern, target) in &self.fuzzy {
            if pattern.is_match(key) {
                return prefix(
                    target.resolve().check_in(Some(child), ctx),
                    &PathSegment::Key(key.to_owned()),
                );
            }
        }
        vec![Issue::new(names::SHAPE, IssueDetails::Redundant).at(key)]
    }
}

fn check_node<'v>(
    node: &SchemaNode,
    child: Option<&'v Value>,
    ctx: &Context<'v>,
) -> Vec<Issue> {
    match node {
        SchemaNode::Target(target) => target.resolve().check_in(child, ctx),
        // Lowered away in `ShapeRule::new`.
        SchemaNode::Nested(_) => Vec::new(),
    }
}

fn lower_schema(schema: ShapeSchema, exactness: Exactness) -> ShapeSchema {
    match schema {
        ShapeSchema::Keyed(fields) => ShapeSchema::Keyed(
            fields
                .into_iter()
                .map(|(key, node)| (key, lower_node(node, exactness)))
                .collect(),
        ),
        ShapeSchema::Positional(nodes) => ShapeSchema::Positional(
            nodes
                .into_iter()
                .map(|node| lower_node(node, exactness))
                .collect(),
        ),
    }
}

fn lower_node(node: SchemaNode, exactness: Exactness) -> SchemaNode {
    match node {
        SchemaNode::Target(target) => SchemaNode::Target(target),
        SchemaNode::Nested(inner) => {
            let ty = crate::checkable::Checkable::new().with_shape(inner, exactness, Vec::new());
            SchemaNode::Target(Target::Type(Arc::new(ty)))
        }
    }
}

// ============================================================================
// SELECT RULE
// ============================================================================

/// Predicate-dispatch params: ordered arms plus the no-match policy.
#[derive(Debug, Clone)]
pub struct SelectRule {
    arms: Vec<SelectArm>,
    fallthrough: bool,
}

impl SelectRule {
    pub(crate) fn new(arms: Vec<SelectArm>, fallthrough: bool) -> Self {
        Self { arms, fallthrough }
    }

    /// The arms in evaluation order.
    #[must_use]
    pub fn arms(&self) -> &[SelectArm] {
        &self.arms
    }

    /// Whether an unmatched value passes instead of reporting an issue.
    #[must_use]
    pub fn is_permissive(&self) -> bool {
        self.fallthrough
    }

    fn check<'v>(&self, value: &'v Value, ctx: &Context<'v>) -> Vec<Issue> {
        for arm in &self.arms {
            if (arm.when)(value) {
                // Select is a dispatch, not a container: the chosen type's
                // issues are returned verbatim, unprefixed.
                return arm.target.resolve().check_in(Some(value), ctx);
            }
        }

        if self.fallthrough {
            Vec::new()
        } else {
            vec![Issue::new(names::SELECT, IssueDetails::NoMatches)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> Context<'static> {
        Context::root()
    }

    #[test]
    fn required_rejects_absent_only() {
        assert_eq!(RuleKind::Required.check(None, &ctx()).len(), 1);
        assert!(RuleKind::Required.check(Some(&json!(null)), &ctx()).is_empty());
    }

    #[test]
    fn kind_skips_absent() {
        let rule = RuleKind::Kind(ValueKind::Number);
        assert!(rule.check(None, &ctx()).is_empty());
    }

    #[test]
    fn kind_reports_both_sides() {
        let rule = RuleKind::Kind(ValueKind::Number);
        let issues = rule.check(Some(&json!("nope")), &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, "type");
        assert_eq!(
            issues[0].details,
            IssueDetails::Kind {
                expect: ValueKind::Number,
                is: ValueKind::String,
            }
        );
    }

    #[test]
    fn custom_runs_for_absent_values() {
        let rule = RuleKind::Custom(Arc::new(|value| value.is_some()));
        assert_eq!(rule.check(None, &ctx()).len(), 1);
        assert!(rule.check(Some(&json!(0)), &ctx()).is_empty());
    }

    #[test]
    fn is_uses_structural_equality() {
        let rule = RuleKind::Is(json!({"a": [1, 2]}));
        assert!(rule.check(Some(&json!({"a": [1, 2]})), &ctx()).is_empty());
        assert_eq!(rule.check(Some(&json!({"a": [1]})), &ctx()).len(), 1);
    }
}
