//! Multi-valued index over the manifest's `finish-args` flags.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::manifest;

/// Index from flag key (leading `--` stripped) to the set of values it was
/// given. A flag with no `=` records the empty-string value, so presence
/// and value lookups go through the same map. Built fresh per manifest and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgIndex {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ArgIndex {
    /// Splits each raw flag on the first `=` only, so values may themselves
    /// contain `=`. Unknown keys are indexed like any other; deciding what a
    /// key means is the rule units' business.
    pub fn from_finish_args<'a>(raw: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for arg in raw {
            let (key, value) = match arg.split_once('=') {
                Some((key, value)) => (key, value),
                None => (arg, ""),
            };
            let key = key.strip_prefix("--").unwrap_or(key);
            entries
                .entry(key.to_string())
                .or_default()
                .insert(value.to_string());
        }
        Self { entries }
    }

    /// Non-string entries in `finish-args` are skipped, not errors.
    pub fn from_manifest(manifest: &Value) -> Self {
        Self::from_finish_args(manifest::str_items(manifest, "finish-args"))
    }

    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|values| values.contains(value))
    }

    /// Values recorded for `key`; empty iterator when the key never appeared.
    pub fn values<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.entries
            .get(key)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn value_count(&self, key: &str) -> usize {
        self.entries.get(key).map_or(0, BTreeSet::len)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn splits_on_first_equals_only() {
        let index = ArgIndex::from_finish_args(["--env=RUST_LOG=debug,info"]);
        assert!(index.contains("env", "RUST_LOG=debug,info"));
    }

    #[test]
    fn flag_without_value_records_empty_string() {
        let index = ArgIndex::from_finish_args(["--devel"]);
        assert!(index.contains("devel", ""));
        assert_eq!(index.value_count("devel"), 1);
    }

    #[test]
    fn accumulates_and_dedups_values_per_key() {
        let index = ArgIndex::from_finish_args([
            "--socket=x11",
            "--socket=wayland",
            "--socket=x11",
        ]);
        assert_eq!(index.value_count("socket"), 2);
        let sockets: Vec<&str> = index.values("socket").collect();
        assert_eq!(sockets, vec!["wayland", "x11"]);
    }

    #[test]
    fn missing_key_yields_empty_values() {
        let index = ArgIndex::from_finish_args([]);
        assert_eq!(index.values("filesystem").count(), 0);
        assert!(!index.contains("filesystem", "home"));
    }

    #[test]
    fn keys_without_marker_are_kept_as_is() {
        let index = ArgIndex::from_finish_args(["share=network"]);
        assert!(index.contains("share", "network"));
    }

    #[test]
    fn manifest_index_skips_non_string_entries() {
        let manifest = json!({ "finish-args": ["--socket=x11", 42, {}] });
        let index = ArgIndex::from_manifest(&manifest);
        assert!(index.contains("socket", "x11"));
        assert_eq!(index.value_count("socket"), 1);
    }
}
