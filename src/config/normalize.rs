use serde_json::Value;

use super::member::Shape;

/// Prepares a resolved node for assignment to a member of the given shape.
///
/// Producers sometimes collapse a one-element array into the bare element, so
/// a non-array node bound for a sequence member is wrapped in a one-element
/// array. Everything else passes through unchanged.
pub fn normalize(node: &Value, shape: Shape) -> Value {
    if shape.sequence && !node.is_array() {
        Value::Array(vec![node.clone()])
    } else {
        node.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::member::{Kind, Shaped};
    use serde_json::json;

    #[test]
    fn test_scalar_wrapped_for_sequence() {
        let shape = <Vec<String>>::SHAPE;

        assert_eq!(normalize(&json!("x"), shape), json!(["x"]));
        assert_eq!(normalize(&json!({ "a": 1 }), shape), json!([{ "a": 1 }]));
    }

    #[test]
    fn test_array_passes_through() {
        let shape = <Vec<String>>::SHAPE;

        assert_eq!(normalize(&json!(["why"]), shape), json!(["why"]));
        assert_eq!(normalize(&json!(["a", "b", "c"]), shape), json!(["a", "b", "c"]));
        assert_eq!(normalize(&json!([]), shape), json!([]));
    }

    #[test]
    fn test_optional_sequence_is_wrapped() {
        let shape = <Option<Vec<u32>>>::SHAPE;

        assert_eq!(normalize(&json!(7), shape), json!([7]));
    }

    #[test]
    fn test_scalar_members_untouched() {
        assert_eq!(normalize(&json!(33), Shape::scalar(Kind::Integer)), json!(33));
        assert_eq!(normalize(&json!([1]), Shape::scalar(Kind::Json)), json!([1]));
    }
}
