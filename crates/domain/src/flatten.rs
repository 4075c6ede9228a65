//! Flattening of nested JSON into delimited key paths.
//!
//! `{"a": {"b": 1}}` becomes `{"a.b": 1}`. Arrays contribute the members of
//! their object elements under the array's own key; scalar array elements are
//! dropped, and when two elements share a member name the later one wins.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Delimiter joining nested keys.
pub const DEFAULT_DELIMITER: &str = ".";

/// Minimum key column width of [`render_flat`].
pub const RENDER_MIN_WIDTH: usize = 56;

/// A single-level JSON mapping keyed by delimited paths.
pub type FlatJson = BTreeMap<String, Value>;

/// Flattens `object` with the default `.` delimiter.
#[must_use]
pub fn flatten_json(object: &Map<String, Value>) -> FlatJson {
    flatten_json_with(object, DEFAULT_DELIMITER)
}

/// Flattens `object`, joining nested keys with `delimiter`.
#[must_use]
pub fn flatten_json_with(object: &Map<String, Value>, delimiter: &str) -> FlatJson {
    let mut flat = FlatJson::new();
    for (key, value) in object {
        flatten_into(key, value, delimiter, &mut flat);
    }
    flat
}

/// Flattens any JSON value; non-object values produce an empty mapping.
#[must_use]
pub fn flatten_value(value: &Value) -> FlatJson {
    value.as_object().map(flatten_json).unwrap_or_default()
}

fn flatten_into(path: &str, value: &Value, delimiter: &str, flat: &mut FlatJson) {
    match value {
        Value::Object(members) => {
            for (key, member) in members {
                flatten_into(&join(path, key, delimiter), member, delimiter, flat);
            }
        }
        Value::Array(items) => {
            for members in items.iter().filter_map(Value::as_object) {
                for (key, member) in members {
                    flatten_into(&join(path, key, delimiter), member, delimiter, flat);
                }
            }
        }
        scalar => {
            flat.insert(path.to_string(), scalar.clone());
        }
    }
}

fn join(path: &str, key: &str, delimiter: &str) -> String {
    format!("{path}{delimiter}{key}")
}

/// Renders a flat mapping as aligned `name ..... value` lines.
#[must_use]
pub fn render_flat(flat: &FlatJson, filler: char) -> String {
    let width = flat
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0)
        .max(RENDER_MIN_WIDTH);

    let mut out = String::new();
    for (name, value) in flat {
        let fill: String = std::iter::repeat_n(filler, width - name.chars().count()).collect();
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.push_str(&format!("{name} {fill} {shown}\n"));
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn flat(value: &Value) -> FlatJson {
        flatten_json(value.as_object().expect("object"))
    }

    #[test]
    fn test_nested_object() {
        let expected: FlatJson =
            BTreeMap::from([("a.b".to_string(), json!(1)), ("a.c".to_string(), json!(2))]);
        assert_eq!(flat(&json!({"a": {"b": 1, "c": 2}})), expected);
    }

    #[test]
    fn test_deeply_nested_object() {
        let result = flat(&json!({"a": {"b": {"c": {"d": "x"}}}, "e": null}));
        assert_eq!(result.get("a.b.c.d"), Some(&json!("x")));
        assert_eq!(result.get("e"), Some(&Value::Null));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_array_of_objects() {
        let result = flat(&json!({
            "report": [
                {"realm": "device", "data": 46},
                {"realm": "egress-port-service-pool"}
            ]
        }));
        assert_eq!(result.get("report.realm"), Some(&json!("egress-port-service-pool")));
        assert_eq!(result.get("report.data"), Some(&json!(46)));
    }

    #[test]
    fn test_scalar_array_elements_are_dropped() {
        let result = flat(&json!({"ports": [1, 2, 3], "id": 7}));
        assert_eq!(result, BTreeMap::from([("id".to_string(), json!(7))]));
    }

    #[test]
    fn test_empty_object_contributes_nothing() {
        assert!(flat(&json!({"a": {}})).is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let value = json!({"a": {"b": 1}});
        let result = flatten_json_with(value.as_object().expect("object"), "/");
        assert_eq!(result.get("a/b"), Some(&json!(1)));
    }

    #[test]
    fn test_flat_mapping_is_fixed_point() {
        let once = flat(&json!({"a": {"b": 1}, "c": [{"d": true}]}));
        let as_object: Map<String, Value> = once.clone().into_iter().collect();
        assert_eq!(flatten_json(&as_object), once);
    }

    #[test]
    fn test_flatten_value_of_non_object() {
        assert!(flatten_value(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_render_flat_aligns_values() {
        let rendered = render_flat(&flat(&json!({"ab": 1, "abcd": "on"})), '.');
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ab ...."));
        assert!(lines[0].ends_with(" 1"));
        assert!(lines[1].ends_with(" on"));
        // key + filler are padded to the same column
        assert_eq!(lines[0].len() - 2, lines[1].len() - 3);
    }
}
