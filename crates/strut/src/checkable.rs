//! The type builder and checking engine.
//!
//! A [`Checkable`] is an immutable, ordered list of named rule entries.
//! Combinator methods take `&self` and return a new instance; an existing
//! type is never mutated, so types can be shared freely across threads and
//! reused as building blocks for larger types.
//!
//! Checking walks the entries in insertion order and stops at the first
//! entry that reports issues (a kind mismatch suppresses later, more
//! specific checks). Structural rules are the exception internally: they
//! evaluate every child and concatenate, so one bad element never hides
//! another.

use std::borrow::Cow;

use regex::Regex;
use serde_json::Value;

use crate::context::Context;
use crate::issue::Issue;
use crate::kind::ValueKind;
use crate::rule::{names, Exactness, RuleEntry, RuleKind, SelectRule, ShapeRule};
use crate::schema::{SelectArm, ShapeSchema, Target};

/// An immutable description of acceptable values.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strut::{number, schema, shape};
///
/// let user = shape(schema! {
///     "id" => number().required(),
///     "name" => strut::string(),
/// });
///
/// assert!(user.check(Some(&json!({"id": 1, "name": "ada"}))).is_empty());
/// assert_eq!(user.check(Some(&json!({"name": 7}))).len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Checkable {
    entries: Vec<RuleEntry>,
}

impl Checkable {
    /// The empty type, which accepts anything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // CHECKING
    // ========================================================================

    /// Checks a value against this type.
    ///
    /// `None` means the value is absent (a missing object key), which is
    /// distinct from `Value::Null`. Returns every mismatch found; an empty
    /// list means the value is valid. Checking never fails for invalid
    /// data - issues are returned, not raised.
    #[must_use = "validation issues must be inspected"]
    pub fn check(&self, value: Option<&Value>) -> Vec<Issue> {
        self.check_in(value, &Context::root())
    }

    pub(crate) fn check_in<'v>(&self, value: Option<&'v Value>, ctx: &Context<'v>) -> Vec<Issue> {
        for entry in &self.entries {
            let issues = entry.rule().check(value, ctx);
            if !issues.is_empty() {
                return issues;
            }
        }
        Vec::new()
    }

    // ========================================================================
    // INTROSPECTION
    // ========================================================================

    /// The active rule entries, in evaluation order.
    #[must_use]
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    /// The params of the named rule, if present.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&RuleKind> {
        self.entries
            .iter()
            .find(|entry| entry.name() == name)
            .map(RuleEntry::rule)
    }

    /// The active rule names, in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.entries.iter().map(RuleEntry::name).collect()
    }

    /// Whether the named rule is active.
    #[must_use]
    pub fn has_rule(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name() == name)
    }

    // ========================================================================
    // RULE PLUMBING
    // ========================================================================

    /// Returns a new type with the rule appended, replacing any existing
    /// entry of the same name (last call wins).
    ///
    /// This is the generic attachment point every builder method goes
    /// through; extension mechanisms use it directly.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(&self, name: impl Into<Cow<'static, str>>, rule: RuleKind) -> Self {
        let name = name.into();
        let mut entries: Vec<RuleEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.name() != name)
            .cloned()
            .collect();
        entries.push(RuleEntry::new(name, rule));
        Self { entries }
    }

    /// Returns a new type with the named rule removed.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_rule(&self, name: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.name() != name)
                .cloned()
                .collect(),
        }
    }

    /// Container-kind injection plus the structural entry itself, shared
    /// by shape/exact/fuzzy.
    pub(crate) fn with_shape(
        &self,
        schema: ShapeSchema,
        exactness: Exactness,
        fuzzy: Vec<(Regex, Target)>,
    ) -> Self {
        self.with_rule(names::TYPE, RuleKind::Kind(schema.container_kind()))
            .with_rule(
                names::SHAPE,
                RuleKind::Shape(ShapeRule::new(schema, exactness, fuzzy)),
            )
    }

    // ========================================================================
    // EXISTENCE
    // ========================================================================

    /// Rejects an absent value.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(&self) -> Self {
        self.with_rule(names::REQUIRED, RuleKind::Required)
    }

    /// Removes any `required` entry. There is no explicit "optional"
    /// entry; absence of the rule is what makes a value optional.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(&self) -> Self {
        self.without_rule(names::REQUIRED)
    }

    // ========================================================================
    // PRIMITIVE KINDS
    // ========================================================================

    /// Removes any kind constraint, widening the type back out.
    #[must_use = "builder methods must be chained or built"]
    pub fn any(&self) -> Self {
        self.without_rule(names::TYPE)
    }

    /// The value must belong to the given primitive category.
    #[must_use = "builder methods must be chained or built"]
    pub fn kind(&self, kind: ValueKind) -> Self {
        self.with_rule(names::TYPE, RuleKind::Kind(kind))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn string(&self) -> Self {
        self.kind(ValueKind::String)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn number(&self) -> Self {
        self.kind(ValueKind::Number)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn boolean(&self) -> Self {
        self.kind(ValueKind::Bool)
    }

    /// The value must be `null` itself (not merely absent).
    #[must_use = "builder methods must be chained or built"]
    pub fn null(&self) -> Self {
        self.kind(ValueKind::Null)
    }

    /// The value must be an object; arrays and `null` do not qualify.
    #[must_use = "builder methods must be chained or built"]
    pub fn object(&self) -> Self {
        self.kind(ValueKind::Object)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn array(&self) -> Self {
        self.kind(ValueKind::Array)
    }

    // ========================================================================
    // EQUALITY AND MEMBERSHIP
    // ========================================================================

    /// The value must equal `expect` exactly (structural equality).
    #[must_use = "builder methods must be chained or built"]
    pub fn is(&self, expect: impl Into<Value>) -> Self {
        self.with_rule(names::IS, RuleKind::Is(expect.into()))
    }

    /// The value must be a member of `values`.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of<I, V>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_rule(
            names::ONE_OF,
            RuleKind::OneOf(values.into_iter().map(Into::into).collect()),
        )
    }

    // ========================================================================
    // STRUCTURAL COMBINATORS
    // ========================================================================

    /// At least one of `types` must accept the value. Child diagnostics
    /// are not surfaced; a failure reports a single `one_of_type` issue.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of_type<I, T>(&self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        self.with_rule(
            names::ONE_OF_TYPE,
            RuleKind::OneOfType(types.into_iter().map(Into::into).collect()),
        )
    }

    /// The value must be an array whose every element matches
    /// `element_type`. All offending indices are reported.
    #[must_use = "builder methods must be chained or built"]
    pub fn array_of(&self, element_type: impl Into<Target>) -> Self {
        self.with_rule(names::TYPE, RuleKind::Kind(ValueKind::Array))
            .with_rule(names::ARRAY_OF, RuleKind::ArrayOf(element_type.into()))
    }

    /// The value must be an object whose every property value matches
    /// `element_type`. All offending keys are reported.
    #[must_use = "builder methods must be chained or built"]
    pub fn object_of(&self, element_type: impl Into<Target>) -> Self {
        self.with_rule(names::TYPE, RuleKind::Kind(ValueKind::Object))
            .with_rule(names::OBJECT_OF, RuleKind::ObjectOf(element_type.into()))
    }

    /// Fixed structure; keys present in the value but absent from the
    /// schema are ignored.
    #[must_use = "builder methods must be chained or built"]
    pub fn shape(&self, schema: impl Into<ShapeSchema>) -> Self {
        self.with_shape(schema.into(), Exactness::Loose, Vec::new())
    }

    /// Fixed structure; keys outside the schema are reported as redundant
    /// (flagged, not recursed into).
    #[must_use = "builder methods must be chained or built"]
    pub fn exact(&self, schema: impl Into<ShapeSchema>) -> Self {
        self.with_shape(schema.into(), Exactness::Exact, Vec::new())
    }

    /// Like [`exact`](Self::exact), but a key outside the schema is first
    /// tested against the ordered `(pattern, type)` pairs; the first
    /// matching pattern checks the key's value instead of flagging it.
    #[must_use = "builder methods must be chained or built"]
    pub fn exact_fuzzy<I, T>(&self, schema: impl Into<ShapeSchema>, patterns: I) -> Self
    where
        I: IntoIterator<Item = (Regex, T)>,
        T: Into<Target>,
    {
        let fuzzy = patterns
            .into_iter()
            .map(|(pattern, target)| (pattern, target.into()))
            .collect();
        self.with_shape(schema.into(), Exactness::Exact, fuzzy)
    }

    /// Dispatches to the first arm whose predicate matches; that type's
    /// issues are returned verbatim. No matching arm is a `select` issue.
    #[must_use = "builder methods must be chained or built"]
    pub fn select(&self, arms: impl IntoIterator<Item = SelectArm>) -> Self {
        self.with_rule(
            names::SELECT,
            RuleKind::Select(SelectRule::new(arms.into_iter().collect(), false)),
        )
    }

    /// Like [`select`](Self::select), but a value no arm claims passes.
    #[must_use = "builder methods must be chained or built"]
    pub fn select_permissive(&self, arms: impl IntoIterator<Item = SelectArm>) -> Self {
        self.with_rule(
            names::SELECT,
            RuleKind::Select(SelectRule::new(arms.into_iter().collect(), true)),
        )
    }

    // ========================================================================
    // ESCAPE HATCH
    // ========================================================================

    /// The value passes iff the predicate returns true.
    ///
    /// Unlike every other rule, the predicate also runs for absent values
    /// (it receives `None`), so it can implement its own absence policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn custom(
        &self,
        predicate: impl Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.with_rule(
            names::CUSTOM,
            RuleKind::Custom(std::sync::Arc::new(predicate)),
        )
    }
}
