use serde_json::Value;

/// Deep-merge `overlay` on top of `base`.
/// If both sides have an object for the same key, recurse.
/// Otherwise, `overlay`'s value wins.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn disjoint_keys_merge() {
        let merged = deep_merge(json!({"session": {"id": 1}}), json!({"features": {}}));
        assert_eq!(merged["session"]["id"], 1);
        assert!(merged["features"].is_object());
    }

    #[test]
    fn same_scalar_key_overlay_wins() {
        let merged = deep_merge(
            json!({"features": {"icon_style": "emoji"}}),
            json!({"features": {"icon_style": "ascii"}}),
        );
        assert_eq!(merged["features"]["icon_style"], "ascii");
    }

    #[test]
    fn nested_objects_recurse() {
        let base = json!({
            "features": {
                "legacy_flag": true,
                "context_warnings": {"warn_85": true, "extra": 1}
            }
        });
        let overlay = json!({
            "features": {
                "context_warnings": {"warn_85": false}
            }
        });
        let merged = deep_merge(base, overlay);
        assert_eq!(merged["features"]["legacy_flag"], true);
        assert_eq!(merged["features"]["context_warnings"]["warn_85"], false);
        assert_eq!(merged["features"]["context_warnings"]["extra"], 1);
    }

    #[test]
    fn overlay_object_replaces_scalar() {
        let merged = deep_merge(json!({"features": "off"}), json!({"features": {"a": 1}}));
        assert_eq!(merged["features"]["a"], 1);
    }

    #[test]
    fn non_object_base_is_replaced() {
        let merged = deep_merge(json!([1, 2]), json!({"features": {}}));
        assert!(merged.is_object());
    }
}
