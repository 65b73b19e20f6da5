//! Call-site guards - checking function arguments and results.
//!
//! A thin collaborator over the core engine: a [`Signature`] describes the
//! types of a function's arguments (with an optional variadic tail) and
//! result, and converts a non-empty issue list into a typed error. The
//! engine itself never raises for bad data; raising is this module's job.

use serde_json::Value;
use thiserror::Error;

use crate::checkable::Checkable;
use crate::issue::Issue;

/// A call failed validation.
#[derive(Debug, Clone, Error)]
pub enum CheckError {
    #[error("function arguments failed validation")]
    BadArguments { issues: Vec<Issue> },
    #[error("function result failed validation")]
    BadResult { issues: Vec<Issue> },
}

impl CheckError {
    /// The issues behind the failure. For argument failures each path
    /// starts with the absolute argument index.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::BadArguments { issues } | Self::BadResult { issues } => issues,
        }
    }
}

/// Argument and result types for a function.
///
/// Arguments are positional; an optional `rest` type covers every
/// argument past the positional ones. Extra arguments with no `rest`
/// type are ignored, and missing arguments are checked as absent (so a
/// `required` argument type rejects them).
///
/// # Examples
///
/// ```
/// use serde_json::{json, Value};
/// use strut::guard::Signature;
/// use strut::strict;
///
/// let sum = Signature::new()
///     .arg(strict::number())
///     .rest(strict::number())
///     .result(strict::number())
///     .wrap(|args: &[Value]| {
///         json!(args.iter().filter_map(Value::as_i64).sum::<i64>())
///     });
///
/// assert_eq!(sum(&[json!(1), json!(2), json!(3)]).unwrap(), json!(6));
/// assert!(sum(&[json!(1), json!("two")]).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Signature {
    args: Vec<Checkable>,
    rest: Option<Checkable>,
    result: Option<Checkable>,
}

impl Signature {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument type.
    #[must_use = "builder methods must be chained or built"]
    pub fn arg(mut self, ty: Checkable) -> Self {
        self.args.push(ty);
        self
    }

    /// Sets the type every argument past the positional ones must match.
    #[must_use = "builder methods must be chained or built"]
    pub fn rest(mut self, ty: Checkable) -> Self {
        self.rest = Some(ty);
        self
    }

    /// Sets the result type.
    #[must_use = "builder methods must be chained or built"]
    pub fn result(mut self, ty: Checkable) -> Self {
        self.result = Some(ty);
        self
    }

    /// Checks call arguments, short-circuiting on the first failing
    /// argument. Issue paths are prefixed with the argument index.
    pub fn check_call(&self, args: &[Value]) -> Result<(), CheckError> {
        for (index, ty) in self.args.iter().enumerate() {
            let issues = ty.check(args.get(index));
            if !issues.is_empty() {
                return Err(CheckError::BadArguments {
                    issues: issues.into_iter().map(|issue| issue.at(index)).collect(),
                });
            }
        }

        if let Some(rest) = &self.rest {
            for (index, value) in args.iter().enumerate().skip(self.args.len()) {
                let issues = rest.check(Some(value));
                if !issues.is_empty() {
                    return Err(CheckError::BadArguments {
                        issues: issues.into_iter().map(|issue| issue.at(index)).collect(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Checks a returned value.
    pub fn check_result(&self, value: &Value) -> Result<(), CheckError> {
        if let Some(ty) = &self.result {
            let issues = ty.check(Some(value));
            if !issues.is_empty() {
                return Err(CheckError::BadResult { issues });
            }
        }
        Ok(())
    }

    /// Wraps a function so that a call with mismatched arguments, or one
    /// producing a mismatched result, returns a [`CheckError`] instead.
    pub fn wrap<F>(self, f: F) -> impl Fn(&[Value]) -> Result<Value, CheckError>
    where
        F: Fn(&[Value]) -> Value,
    {
        move |args| {
            self.check_call(args)?;
            let result = f(args);
            self.check_result(&result)?;
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{number, string};
    use crate::strict;
    use serde_json::json;

    #[test]
    fn passing_call() {
        let sig = Signature::new().arg(strict::number()).arg(strict::string());
        assert!(sig.check_call(&[json!(1), json!("x")]).is_ok());
    }

    #[test]
    fn missing_required_argument() {
        let sig = Signature::new().arg(strict::number());
        let err = sig.check_call(&[]).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].rule, "required");
        assert_eq!(err.issues()[0].path_string(), "[0]");
    }

    #[test]
    fn bad_argument_carries_its_index() {
        let sig = Signature::new().arg(number()).arg(string());
        let err = sig.check_call(&[json!(1), json!(2)]).unwrap_err();
        assert_eq!(err.issues()[0].path_string(), "[1]");
    }

    #[test]
    fn missing_optional_argument_passes() {
        let sig = Signature::new().arg(number());
        assert!(sig.check_call(&[]).is_ok());
    }

    #[test]
    fn extra_arguments_without_rest_are_ignored() {
        let sig = Signature::new().arg(number());
        assert!(sig.check_call(&[json!(1), json!("anything")]).is_ok());
    }

    #[test]
    fn rest_checks_every_tail_argument() {
        let sig = Signature::new().arg(strict::string()).rest(strict::number());
        assert!(sig.check_call(&[json!("op"), json!(1), json!(2)]).is_ok());

        let err = sig
            .check_call(&[json!("op"), json!(1), json!("two")])
            .unwrap_err();
        assert_eq!(err.issues()[0].path_string(), "[2]");
    }

    #[test]
    fn bad_result_is_reported() {
        let broken = Signature::new()
            .result(strict::number())
            .wrap(|_| json!("not a number"));
        let err = broken(&[]).unwrap_err();
        assert!(matches!(err, CheckError::BadResult { .. }));
    }

    #[test]
    fn nested_argument_issue_path_is_absolute() {
        let sig = Signature::new().arg(crate::builders::shape(crate::ShapeSchema::keyed(vec![
            ("id".to_owned(), strict::number().into()),
        ])));
        let err = sig.check_call(&[json!({"id": "x"})]).unwrap_err();
        assert_eq!(err.issues()[0].path_string(), "[0].id");
    }
}
