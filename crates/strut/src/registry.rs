//! Rule book - registration of consumer-defined rules.
//!
//! The built-in builder surface is a closed set; this is the explicit
//! table a consumer extends it through. A registered rule gets the same
//! treatment as a built-in: it is attached by name with replace-by-name
//! semantics and participates in the ordered entry walk.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::checkable::Checkable;
use crate::context::Context;
use crate::issue::{Issue, IssueDetails};
use crate::rule::{names, RuleCheck, RuleKind};

/// Errors from rule-book misuse.
///
/// These indicate a bug in the schema definition and are reported at
/// registration or application time, never during data checking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("rule `{0}` is already registered")]
    Duplicate(String),
    #[error("rule `{0}` shadows a built-in rule name")]
    Reserved(String),
    #[error("rule `{0}` is not registered")]
    Unknown(String),
}

/// A registration table mapping rule names to check implementations.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strut::{number, RuleBook};
///
/// let mut book = RuleBook::new();
/// book.register_predicate("finite", |value, _ctx| {
///     value.and_then(|v| v.as_f64()).is_none_or(f64::is_finite)
/// })
/// .unwrap();
///
/// let ty = book.apply(&number(), "finite").unwrap();
/// assert!(ty.check(Some(&json!(1.5))).is_empty());
/// ```
#[derive(Default)]
pub struct RuleBook {
    rules: HashMap<String, Arc<dyn RuleCheck>>,
}

impl RuleBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule under `name`.
    ///
    /// Rejects duplicate registration and the built-in names.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        rule: impl RuleCheck + 'static,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if names::ALL.contains(&name.as_str()) {
            return Err(RegistryError::Reserved(name));
        }
        if self.rules.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.rules.insert(name, Arc::new(rule));
        Ok(())
    }

    /// Registers a predicate rule under `name`.
    ///
    /// The predicate receives the raw `Option<&Value>` plus the checking
    /// context, and a `false` return reports one issue under `name`.
    /// Skip-on-absent is the predicate's own choice: return `true` for
    /// `None` to follow the built-in convention.
    pub fn register_predicate(
        &mut self,
        name: impl Into<String>,
        predicate: impl Fn(Option<&Value>, &Context<'_>) -> bool + Send + Sync + 'static,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let rule = PredicateRule {
            name: Arc::from(name.as_str()),
            predicate,
        };
        self.register(name, rule)
    }

    /// Returns `base` with the named registered rule attached
    /// (replace-by-name, like any built-in).
    pub fn apply(&self, base: &Checkable, name: &str) -> Result<Checkable, RegistryError> {
        let rule = self
            .rules
            .get(name)
            .ok_or_else(|| RegistryError::Unknown(name.to_owned()))?;
        Ok(base.with_rule(name.to_owned(), RuleKind::Extension(Arc::clone(rule))))
    }

    /// Whether a rule is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// The registered rule names, unordered.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for RuleBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleBook")
            .field("rules", &self.rule_names())
            .finish()
    }
}

struct PredicateRule<F> {
    name: Arc<str>,
    predicate: F,
}

impl<F> RuleCheck for PredicateRule<F>
where
    F: Fn(Option<&Value>, &Context<'_>) -> bool + Send + Sync,
{
    fn check(&self, value: Option<&Value>, ctx: &Context<'_>) -> Vec<Issue> {
        if (self.predicate)(value, ctx) {
            Vec::new()
        } else {
            vec![Issue::new(self.name.to_string(), IssueDetails::Rejected)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{any, number};
    use serde_json::json;

    #[test]
    fn registered_rule_checks_like_a_built_in() {
        let mut book = RuleBook::new();
        book.register_predicate("even", |value, _| {
            value.and_then(Value::as_i64).is_none_or(|n| n % 2 == 0)
        })
        .unwrap();

        let ty = book.apply(&number(), "even").unwrap();
        assert!(ty.check(Some(&json!(4))).is_empty());

        let issues = ty.check(Some(&json!(3)));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, "even");
        assert_eq!(issues[0].details, IssueDetails::Rejected);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut book = RuleBook::new();
        book.register_predicate("even", |_, _| true).unwrap();
        assert_eq!(
            book.register_predicate("even", |_, _| true),
            Err(RegistryError::Duplicate("even".into()))
        );
    }

    #[test]
    fn built_in_names_are_reserved() {
        let mut book = RuleBook::new();
        assert_eq!(
            book.register_predicate("shape", |_, _| true),
            Err(RegistryError::Reserved("shape".into()))
        );
    }

    #[test]
    fn unknown_rule_application_is_rejected() {
        let book = RuleBook::new();
        assert_eq!(
            book.apply(&any(), "missing").unwrap_err(),
            RegistryError::Unknown("missing".into())
        );
    }

    #[test]
    fn applying_twice_replaces_by_name() {
        let mut book = RuleBook::new();
        book.register_predicate("even", |_, _| true).unwrap();

        let ty = book.apply(&number(), "even").unwrap();
        let ty = book.apply(&ty, "even").unwrap();
        assert_eq!(ty.rule_names(), vec!["type", "even"]);
    }
}
