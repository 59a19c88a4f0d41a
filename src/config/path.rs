//! Dotted path expressions into a JSON tree.

use std::fmt;

use serde_json::Value;

use super::ConfigError;

/// A validated, dot-separated path such as `really.deeply.nested`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    raw: String,
}

impl PathExpression {
    /// Validates `raw` against the path grammar.
    ///
    /// Segments may contain ASCII alphanumerics, `_`, `-` and `@`; they are
    /// separated by `.` and must not be empty.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        let valid = !raw.is_empty()
            && raw.split('.').all(|segment| {
                !segment.is_empty() && segment.chars().all(is_segment_char)
            });

        if valid {
            Ok(Self { raw })
        } else {
            Err(ConfigError::InvalidPathExpression(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }

    /// Walks `tree` along this path.
    ///
    /// Returns `None` when a segment is missing, when an intermediate node is
    /// not an object, or when the final node is `null`.
    pub fn resolve<'a>(&self, tree: &'a Value) -> Option<&'a Value> {
        let node = self
            .segments()
            .try_fold(tree, |node, segment| node.as_object()?.get(segment))?;

        if node.is_null() {
            None
        } else {
            Some(node)
        }
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '@')
}

/// Parses `path` and resolves it against `tree` in one step.
pub fn resolve<'a>(tree: &'a Value, path: &str) -> Result<Option<&'a Value>, ConfigError> {
    Ok(PathExpression::parse(path)?.resolve(tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Value {
        json!({
            "foo": { "bar": 33 },
            "really": { "deeply": { "nested": 42 } },
            "list": [1, 2, 3],
            "nothing": null,
            "odd-key@v2": { "x_y": "ok" }
        })
    }

    #[test]
    fn test_resolve_nested_values() {
        let tree = tree();

        assert_eq!(resolve(&tree, "foo.bar").unwrap(), Some(&json!(33)));
        assert_eq!(
            resolve(&tree, "really.deeply.nested").unwrap(),
            Some(&json!(42))
        );
        assert_eq!(resolve(&tree, "foo").unwrap(), Some(&json!({ "bar": 33 })));
        assert_eq!(resolve(&tree, "odd-key@v2.x_y").unwrap(), Some(&json!("ok")));
    }

    #[test]
    fn test_missing_segments_are_absent() {
        let tree = tree();

        assert_eq!(resolve(&tree, "missing").unwrap(), None);
        assert_eq!(resolve(&tree, "foo.baz").unwrap(), None);
        assert_eq!(resolve(&tree, "really.deeply.nested.more").unwrap(), None);
        assert_eq!(resolve(&tree, "list.0").unwrap(), None);
    }

    #[test]
    fn test_null_is_absent() {
        let tree = tree();

        assert_eq!(resolve(&tree, "nothing").unwrap(), None);
    }

    #[test]
    fn test_invalid_expressions_are_rejected() {
        for path in ["", "foo bar", "foo/bar", "a..b", ".a", "a.", "$.foo", "foo[0]", "ünï"] {
            let err = PathExpression::parse(path).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidPathExpression(p) if p == path),
                "{path:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_invalid_expression_fails_before_lookup() {
        let tree = tree();

        assert!(matches!(
            resolve(&tree, "foo:bar"),
            Err(ConfigError::InvalidPathExpression(_))
        ));
    }
}
