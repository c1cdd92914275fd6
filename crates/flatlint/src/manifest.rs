//! Defensive accessors over a parsed manifest.
//!
//! Manifests arrive as arbitrary `serde_json::Value` trees; no schema is
//! enforced. Every accessor treats an absent or wrongly-typed field as
//! "not present" so rule units can skip inapplicable checks instead of
//! failing.

use serde_json::Value;

/// Application ids ending in this suffix are base applications and are
/// exempt from the checks that assume a runnable app.
pub const BASEAPP_SUFFIX: &str = ".BaseApp";

pub fn app_id(manifest: &Value) -> Option<&str> {
    str_field(manifest, "id")
}

pub fn is_baseapp(manifest: &Value) -> bool {
    app_id(manifest).is_some_and(|id| id.ends_with(BASEAPP_SUFFIX))
}

pub fn is_build_extension(manifest: &Value) -> bool {
    bool_field(manifest, "build-extension")
}

pub fn str_field<'a>(manifest: &'a Value, key: &str) -> Option<&'a str> {
    manifest.get(key).and_then(Value::as_str)
}

/// Missing and mistyped both read as false.
pub fn bool_field(manifest: &Value, key: &str) -> bool {
    manifest
        .get(key)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// String entries of a sequence field; non-string entries are skipped.
pub fn str_items<'a>(manifest: &'a Value, key: &str) -> Vec<&'a str> {
    manifest
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Object entries of a sequence field; non-object entries are skipped.
pub fn object_items<'a>(manifest: &'a Value, key: &str) -> Vec<&'a Value> {
    manifest
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter(|v| v.is_object()).collect())
        .unwrap_or_default()
}
