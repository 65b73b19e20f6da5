//! Fresh-type factories.
//!
//! Every chaining method on [`Checkable`] has a factory here that starts a
//! new type, so `string().required()` and `shape(...)` read the same at a
//! call site as further chaining does. The [`strict`] module mirrors the
//! whole set with `required` pre-seeded.

use regex::Regex;
use serde_json::Value;

use crate::checkable::Checkable;
use crate::kind::ValueKind;
use crate::schema::{SelectArm, ShapeSchema, Target};

/// A type with no constraints; accepts any value, present or absent.
#[must_use]
pub fn any() -> Checkable {
    Checkable::new()
}

/// A type whose value must belong to the given primitive category.
#[must_use]
pub fn kind(kind: ValueKind) -> Checkable {
    Checkable::new().kind(kind)
}

#[must_use]
pub fn string() -> Checkable {
    Checkable::new().string()
}

#[must_use]
pub fn number() -> Checkable {
    Checkable::new().number()
}

#[must_use]
pub fn boolean() -> Checkable {
    Checkable::new().boolean()
}

#[must_use]
pub fn null() -> Checkable {
    Checkable::new().null()
}

#[must_use]
pub fn object() -> Checkable {
    Checkable::new().object()
}

#[must_use]
pub fn array() -> Checkable {
    Checkable::new().array()
}

/// A type that only rejects absence.
#[must_use]
pub fn required() -> Checkable {
    Checkable::new().required()
}

/// A fresh optional type; identical to [`any`], present for symmetry
/// with the chaining form.
#[must_use]
pub fn optional() -> Checkable {
    Checkable::new()
}

#[must_use]
pub fn is(expect: impl Into<Value>) -> Checkable {
    Checkable::new().is(expect)
}

#[must_use]
pub fn one_of<I, V>(values: I) -> Checkable
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Checkable::new().one_of(values)
}

#[must_use]
pub fn one_of_type<I, T>(types: I) -> Checkable
where
    I: IntoIterator<Item = T>,
    T: Into<Target>,
{
    Checkable::new().one_of_type(types)
}

#[must_use]
pub fn array_of(element_type: impl Into<Target>) -> Checkable {
    Checkable::new().array_of(element_type)
}

#[must_use]
pub fn object_of(element_type: impl Into<Target>) -> Checkable {
    Checkable::new().object_of(element_type)
}

#[must_use]
pub fn shape(schema: impl Into<ShapeSchema>) -> Checkable {
    Checkable::new().shape(schema)
}

#[must_use]
pub fn exact(schema: impl Into<ShapeSchema>) -> Checkable {
    Checkable::new().exact(schema)
}

#[must_use]
pub fn exact_fuzzy<I, T>(schema: impl Into<ShapeSchema>, patterns: I) -> Checkable
where
    I: IntoIterator<Item = (Regex, T)>,
    T: Into<Target>,
{
    Checkable::new().exact_fuzzy(schema, patterns)
}

#[must_use]
pub fn select(arms: impl IntoIterator<Item = SelectArm>) -> Checkable {
    Checkable::new().select(arms)
}

#[must_use]
pub fn select_permissive(arms: impl IntoIterator<Item = SelectArm>) -> Checkable {
    Checkable::new().select_permissive(arms)
}

#[must_use]
pub fn custom(predicate: impl Fn(Option<&Value>) -> bool + Send + Sync + 'static) -> Checkable {
    Checkable::new().custom(predicate)
}

/// Factories that pre-seed every type with `required`.
///
/// `strict::string()` rejects an absent value before checking its kind;
/// chain [`optional`](Checkable::optional) to opt back out.
pub mod strict {
    use super::{Regex, SelectArm, ShapeSchema, Target, Value, ValueKind};
    use crate::checkable::Checkable;

    fn base() -> Checkable {
        Checkable::new().required()
    }

    #[must_use]
    pub fn any() -> Checkable {
        base()
    }

    #[must_use]
    pub fn kind(kind: ValueKind) -> Checkable {
        base().kind(kind)
    }

    #[must_use]
    pub fn string() -> Checkable {
        base().string()
    }

    #[must_use]
    pub fn number() -> Checkable {
        base().number()
    }

    #[must_use]
    pub fn boolean() -> Checkable {
        base().boolean()
    }

    #[must_use]
    pub fn null() -> Checkable {
        base().null()
    }

    #[must_use]
    pub fn object() -> Checkable {
        base().object()
    }

    #[must_use]
    pub fn array() -> Checkable {
        base().array()
    }

    #[must_use]
    pub fn is(expect: impl Into<Value>) -> Checkable {
        base().is(expect)
    }

    #[must_use]
    pub fn one_of<I, V>(values: I) -> Checkable
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        base().one_of(values)
    }

    #[must_use]
    pub fn one_of_type<I, T>(types: I) -> Checkable
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        base().one_of_type(types)
    }

    #[must_use]
    pub fn array_of(element_type: impl Into<Target>) -> Checkable {
        base().array_of(element_type)
    }

    #[must_use]
    pub fn object_of(element_type: impl Into<Target>) -> Checkable {
        base().object_of(element_type)
    }

    #[must_use]
    pub fn shape(schema: impl Into<ShapeSchema>) -> Checkable {
        base().shape(schema)
    }

    #[must_use]
    pub fn exact(schema: impl Into<ShapeSchema>) -> Checkable {
        base().exact(schema)
    }

    #[must_use]
    pub fn exact_fuzzy<I, T>(schema: impl Into<ShapeSchema>, patterns: I) -> Checkable
    where
        I: IntoIterator<Item = (Regex, T)>,
        T: Into<Target>,
    {
        base().exact_fuzzy(schema, patterns)
    }

    #[must_use]
    pub fn select(arms: impl IntoIterator<Item = SelectArm>) -> Checkable {
        base().select(arms)
    }

    #[must_use]
    pub fn select_permissive(arms: impl IntoIterator<Item = SelectArm>) -> Checkable {
        base().select_permissive(arms)
    }

    #[must_use]
    pub fn custom(
        predicate: impl Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    ) -> Checkable {
        base().custom(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_and_chained_forms_build_equal_entry_lists() {
        let fresh = number();
        let chained = Checkable::new().number();
        assert_eq!(fresh.rule_names(), chained.rule_names());
    }

    #[test]
    fn strict_factories_pre_seed_required() {
        for ty in [
            strict::string(),
            strict::number(),
            strict::boolean(),
            strict::object(),
            strict::array(),
            strict::is(1),
            strict::one_of([1]),
            strict::array_of(number()),
            strict::shape(ShapeSchema::keyed(vec![])),
            strict::custom(|_| true),
        ] {
            let issues = ty.check(None);
            assert_eq!(issues.len(), 1, "{:?}", ty.rule_names());
            assert_eq!(issues[0].rule, "required");
        }
    }

    #[test]
    fn strict_optional_opts_out() {
        let ty = strict::number().optional();
        assert!(ty.check(None).is_empty());
        assert_eq!(ty.check(Some(&json!("x"))).len(), 1);
    }
}
