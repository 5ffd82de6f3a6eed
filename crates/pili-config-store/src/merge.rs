//! Deep merge of configuration trees
//!
//! - Objects: deep-merge by key, base key order kept, new keys appended
//! - Arrays: REPLACE (patch wins entirely)
//! - Scalars and null: override (patch wins)

use serde_json::Value;

/// Deep merge a patch into a base value.
///
/// Merge semantics:
/// - Objects: deep-merge by key (recursive)
/// - Arrays: REPLACE (no concatenation)
/// - Scalars: override
/// - Null: override (null unsets a whole branch)
pub fn deep_merge(base: Value, patch: Value) -> Value {
    match (base, patch) {
        (Value::Object(mut base_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                // get_mut keeps the slot in place; remove+insert would reorder
                match base_map.get_mut(&key) {
                    Some(slot) => {
                        let base_value = slot.take();
                        *slot = deep_merge(base_value, patch_value);
                    }
                    None => {
                        base_map.insert(key, patch_value);
                    }
                }
            }
            Value::Object(base_map)
        }

        (_, patch) => patch,
    }
}

/// Merge multiple layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}
