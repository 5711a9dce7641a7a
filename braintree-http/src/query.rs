//! Query-string encoding of request data.

use serde_json::Value;

/// Flatten `data` into `key=value` pairs using bracket notation.
///
/// `{"a": {"b": 1}, "list": ["x"]}` becomes `a[b]=1` and `list[]=x`.
/// `null` values are skipped.
pub fn queryify(data: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = data {
        for (key, value) in map {
            flatten(key, value, &mut pairs);
        }
    }
    pairs
}

fn flatten(prefix: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, nested) in map {
                flatten(&format!("{prefix}[{key}]"), nested, pairs);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten(&format!("{prefix}[]"), item, pairs);
            }
        }
        Value::String(s) => pairs.push((prefix.to_string(), s.clone())),
        other => pairs.push((prefix.to_string(), other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_values() {
        let pairs = queryify(&json!({"a": "x", "n": 1, "t": true}));
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "x".to_string()),
                ("n".to_string(), "1".to_string()),
                ("t".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_values() {
        let pairs = queryify(&json!({
            "_meta": {"source": "client", "sessionId": "s"},
            "list": ["x", "y"],
            "skip": null
        }));
        assert!(pairs.contains(&("_meta[source]".to_string(), "client".to_string())));
        assert!(pairs.contains(&("_meta[sessionId]".to_string(), "s".to_string())));
        assert!(pairs.contains(&("list[]".to_string(), "x".to_string())));
        assert!(pairs.contains(&("list[]".to_string(), "y".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "skip"));
    }

    #[test]
    fn test_non_object_data_is_empty() {
        assert!(queryify(&json!(null)).is_empty());
        assert!(queryify(&json!("text")).is_empty());
    }
}
