//! Right-biased deep merge of JSON token trees.
use serde_json::{Map, Value};

/// Merge `overrides` onto `base`, returning a new tree.
///
/// Per key of `overrides`: `null` keeps the base value, arrays replace
/// wholesale, objects merge recursively, and scalars overwrite.
pub fn deep_merge(base: &Value, overrides: &Value) -> Value {
    match overrides {
        Value::Null => base.clone(),
        Value::Object(over) => {
            let mut merged = match base {
                Value::Object(base) => base.clone(),
                _ => Map::new(),
            };
            for (key, value) in over {
                match value {
                    Value::Null => {}
                    Value::Object(_) => {
                        let nested = merged.get(key).cloned().unwrap_or(Value::Null);
                        merged.insert(key.clone(), deep_merge(&nested, value));
                    }
                    _ => {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
            Value::Object(merged)
        }
        other => other.clone(),
    }
}
