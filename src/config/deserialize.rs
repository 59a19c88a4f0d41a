//! Populating a [`Schema`] type from a parsed JSON tree.

use serde_json::{Map, Value};

use super::member::{Member, Schema};
use super::naming::NamingConvention;
use super::normalize::normalize;
use super::path::PathExpression;
use super::ConfigError;

/// How member names are matched against the JSON document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonMapping {
    /// Flat top-level keys named after members (or their annotations).
    #[default]
    Flat,
    /// Dotted paths from annotations or member names, cased by the convention.
    Paths(NamingConvention),
}

impl JsonMapping {
    pub fn deserialize<T: Schema>(self, tree: &Value) -> Result<T, ConfigError> {
        match self {
            Self::Flat => from_flat(tree),
            Self::Paths(naming) => from_paths(tree, naming),
        }
    }
}

/// Builds a `T` by resolving every member at its dotted path.
///
/// The path is the member's annotation, or its name, with `naming` applied.
/// All paths are validated before any member is assigned. Missing and `null`
/// values leave the member at its default.
pub fn from_paths<T: Schema>(tree: &Value, naming: NamingConvention) -> Result<T, ConfigError> {
    root_object(tree)?;
    let table = T::schema();
    table.validate()?;

    let plan = table
        .iter()
        .map(|member| -> Result<_, ConfigError> {
            let declared = member.path().unwrap_or(member.name());
            Ok((member, PathExpression::parse(naming.apply(declared))?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut settings = T::default();
    for (member, path) in plan {
        if let Some(node) = path.resolve(tree) {
            assign(&mut settings, member, path.as_str(), normalize(node, member.shape()))?;
        }
    }
    Ok(settings)
}

/// Builds a `T` from the top-level keys of `tree`.
///
/// Keys are the member annotation or name, taken literally. An exact match
/// wins; otherwise the first key equal ignoring ASCII case is used.
pub fn from_flat<T: Schema>(tree: &Value) -> Result<T, ConfigError> {
    let object = root_object(tree)?;
    let table = T::schema();
    table.validate()?;

    let mut settings = T::default();
    for member in table.iter() {
        let key = member.path().unwrap_or(member.name());
        if let Some(value) = find_key(object, key).filter(|v| !v.is_null()) {
            assign(&mut settings, member, key, value.clone())?;
        }
    }
    Ok(settings)
}

fn root_object(tree: &Value) -> Result<&Map<String, Value>, ConfigError> {
    tree.as_object()
        .ok_or_else(|| ConfigError::NotAnObject(json_type(tree)))
}

fn find_key<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

fn assign<T>(
    settings: &mut T,
    member: &Member<T>,
    path: &str,
    value: Value,
) -> Result<(), ConfigError> {
    member
        .write(settings, value)
        .map_err(|source| ConfigError::MalformedValue {
            member: member.name().to_string(),
            path: path.to_string(),
            source,
        })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Nested {
        foo_bar: i32,
        really_deeply_nested: i32,
        this_isnt_in_the_json: i32,
        this_isnt_in_the_json_either: Option<String>,
        camel_case_conversion: i32,
        fields_should_work: i32,
    }

    crate::schema!(Nested {
        "FooBar" at "foo.bar" => foo_bar,
        "ReallyDeeplyNested" at "really.deeply.nested" => really_deeply_nested,
        "ThisIsntInTheJSON" => this_isnt_in_the_json,
        "ThisIsntInTheJSONEither" => this_isnt_in_the_json_either,
        "CamelCaseConversion" => camel_case_conversion,
        "FieldsShouldWork" => fields_should_work,
    });

    #[derive(Debug, Default)]
    struct Strings {
        strings: Vec<String>,
    }

    crate::schema!(Strings { "Strings" => strings });

    #[derive(Debug, Default)]
    struct BadPath {
        first: i32,
        second: i32,
    }

    crate::schema!(BadPath {
        "First" => first,
        "Second" at "has space" => second,
    });

    fn nested_json() -> Value {
        json!({
            "foo": { "bar": 33 },
            "really": { "deeply": { "nested": 42 } },
            "camelCaseConversion": 101,
            "fieldsShouldWork": 501
        })
    }

    #[test]
    fn test_deserialize_nested() {
        let result: Nested = from_paths(&nested_json(), NamingConvention::CamelCase).unwrap();

        assert_eq!(result.foo_bar, 33);
        assert_eq!(result.really_deeply_nested, 42);
        assert_eq!(result.camel_case_conversion, 101);
        assert_eq!(result.fields_should_work, 501);
        assert_eq!(result.this_isnt_in_the_json, 0);
        assert!(result.this_isnt_in_the_json_either.is_none());
    }

    #[test]
    fn test_verbatim_naming_misses_camel_keys() {
        let result: Nested = from_paths(&nested_json(), NamingConvention::Verbatim).unwrap();

        assert_eq!(result.foo_bar, 33);
        assert_eq!(result.camel_case_conversion, 0);
    }

    #[test]
    fn test_single_value_becomes_list() {
        let result: Strings = from_paths(
            &json!({ "strings": "haha i'm an array" }),
            NamingConvention::CamelCase,
        )
        .unwrap();
        assert_eq!(result.strings, ["haha i'm an array"]);

        let result: Strings =
            from_paths(&json!({ "strings": ["why"] }), NamingConvention::CamelCase).unwrap();
        assert_eq!(result.strings, ["why"]);
    }

    #[test]
    fn test_null_leaves_default() {
        let result: Nested = from_paths(
            &json!({ "foo": { "bar": null }, "camelCaseConversion": null }),
            NamingConvention::CamelCase,
        )
        .unwrap();

        assert_eq!(result.foo_bar, 0);
        assert_eq!(result.camel_case_conversion, 0);
    }

    #[test]
    fn test_invalid_path_is_fatal() {
        let result = from_paths::<BadPath>(&json!({ "first": 1 }), NamingConvention::CamelCase);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPathExpression(p)) if p == "has space"
        ));
    }

    #[test]
    fn test_type_mismatch_is_fatal() {
        let result = from_paths::<Nested>(
            &json!({ "foo": { "bar": "not a number" } }),
            NamingConvention::CamelCase,
        );

        match result {
            Err(ConfigError::MalformedValue { member, path, .. }) => {
                assert_eq!(member, "FooBar");
                assert_eq!(path, "foo.bar");
            }
            other => panic!("expected MalformedValue, got {other:?}"),
        }
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(
            from_paths::<Nested>(&json!([1, 2]), NamingConvention::CamelCase),
            Err(ConfigError::NotAnObject("an array"))
        ));
        assert!(matches!(
            from_flat::<Nested>(&json!("text")),
            Err(ConfigError::NotAnObject("a string"))
        ));
    }

    #[test]
    fn test_flat_matches_keys_ignoring_case() {
        let result: Nested = from_flat(&json!({
            "camelCaseConversion": 7,
            "FIELDSSHOULDWORK": 8,
            "foo.bar": 9
        }))
        .unwrap();

        assert_eq!(result.camel_case_conversion, 7);
        assert_eq!(result.fields_should_work, 8);
        assert_eq!(result.foo_bar, 9);
        assert_eq!(result.really_deeply_nested, 0);
    }

    #[test]
    fn test_flat_prefers_exact_key() {
        let result: Nested = from_flat(&json!({
            "camelcaseconversion": 1,
            "CamelCaseConversion": 2
        }))
        .unwrap();

        assert_eq!(result.camel_case_conversion, 2);
    }

    #[test]
    fn test_flat_does_not_wrap_singletons() {
        let result = from_flat::<Strings>(&json!({ "strings": "x" }));

        assert!(matches!(result, Err(ConfigError::MalformedValue { .. })));
    }

    #[test]
    fn test_mapping_dispatch() {
        let tree = json!({ "strings": "x" });

        let result: Strings = JsonMapping::Paths(NamingConvention::CamelCase)
            .deserialize(&tree)
            .unwrap();
        assert_eq!(result.strings, ["x"]);
        assert!(JsonMapping::Flat.deserialize::<Strings>(&tree).is_err());
    }
}
