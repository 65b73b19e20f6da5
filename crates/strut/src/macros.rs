//! Macros for building keyed schemas and issue paths.

/// Builds a keyed [`ShapeSchema`](crate::ShapeSchema).
///
/// Keys are identifiers or string literals; values are anything a schema
/// position accepts (a type, a store reference, a deferred node). A braced
/// value is an implicit nested schema, checked as a nested shape that
/// inherits the enclosing rule's exactness.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strut::{schema, shape, string};
///
/// let ty = shape(schema! {
///     user => {
///         name => string().required(),
///     },
/// });
///
/// let issues = ty.check(Some(&json!({"user": {}})));
/// assert_eq!(issues[0].path_string(), "user.name");
/// ```
#[macro_export]
macro_rules! schema {
    () => {
        $crate::ShapeSchema::keyed(::std::vec::Vec::new())
    };

    // Nested braces become an implicit nested schema.
    (@field $fields:ident; $key:literal => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $fields.push((
            ::std::string::String::from($key),
            $crate::SchemaNode::from($crate::schema! { $($inner)* }),
        ));
        $($crate::schema!(@field $fields; $($rest)*);)?
    };
    (@field $fields:ident; $key:ident => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $fields.push((
            ::std::string::String::from(::std::stringify!($key)),
            $crate::SchemaNode::from($crate::schema! { $($inner)* }),
        ));
        $($crate::schema!(@field $fields; $($rest)*);)?
    };
    (@field $fields:ident; $key:literal => $node:expr $(, $($rest:tt)*)?) => {
        $fields.push((
            ::std::string::String::from($key),
            $crate::SchemaNode::from($node),
        ));
        $($crate::schema!(@field $fields; $($rest)*);)?
    };
    (@field $fields:ident; $key:ident => $node:expr $(, $($rest:tt)*)?) => {
        $fields.push((
            ::std::string::String::from(::std::stringify!($key)),
            $crate::SchemaNode::from($node),
        ));
        $($crate::schema!(@field $fields; $($rest)*);)?
    };
    (@field $fields:ident;) => {};

    ($($rest:tt)+) => {{
        let mut fields = ::std::vec::Vec::new();
        $crate::schema!(@field fields; $($rest)+);
        $crate::ShapeSchema::keyed(fields)
    }};
}

/// Builds a [`Path`](crate::Path) from key and index literals.
///
/// # Examples
///
/// ```
/// use strut::path;
///
/// let p = path!["posts", 0, "authors"];
/// assert_eq!(strut::format_path(&p), "posts[0].authors");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::new()
    };
    ($($segment:expr),+ $(,)?) => {{
        let mut path = $crate::Path::new();
        $(path.push($crate::PathSegment::from($segment));)+
        path
    }};
}

#[cfg(test)]
mod tests {
    use crate::{exact, number, string, PathSegment, SchemaNode, ShapeSchema};
    use serde_json::json;

    #[test]
    fn keyed_schema_preserves_field_order() {
        let schema = schema! {
            one => number(),
            "two" => string(),
        };
        let ShapeSchema::Keyed(fields) = schema else {
            panic!("expected a keyed schema");
        };
        let keys: Vec<&str> = fields.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["one", "two"]);
    }

    #[test]
    fn nested_braces_build_nested_nodes() {
        let schema = schema! {
            user => { name => string() },
        };
        let ShapeSchema::Keyed(fields) = schema else {
            panic!("expected a keyed schema");
        };
        assert!(matches!(fields[0].1, SchemaNode::Nested(_)));
    }

    #[test]
    fn nested_schema_inherits_exactness() {
        let ty = exact(schema! {
            user => { name => string() },
        });
        let issues = ty.check(Some(&json!({"user": {"name": "a", "extra": 1}})));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, "shape");
        assert_eq!(issues[0].path_string(), "user.extra");
    }

    #[test]
    fn path_macro_mixes_keys_and_indices() {
        let p = path!["a", 1, "b"];
        assert_eq!(
            p.as_slice(),
            &[
                PathSegment::from("a"),
                PathSegment::from(1_usize),
                PathSegment::from("b"),
            ]
        );
    }

    #[test]
    fn empty_forms() {
        assert!(matches!(schema! {}, ShapeSchema::Keyed(fields) if fields.is_empty()));
        assert!(path![].is_empty());
    }
}
