//! Accepted-diagnostic exceptions.
//!
//! Applications with a reviewed reason for a diagnostic are listed in an
//! exceptions file (app id, or the wildcard id, mapped to code → reason).
//! Suppression is code-exact; reasons are documentation and are dropped at
//! this boundary.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use jsonschema::Draft;
use serde_json::Value;

use flatlint_contracts::WILDCARD_APP_ID;

use crate::diagnostics::{Diagnostics, LintReport};

const EXCEPTIONS_SCHEMA_BYTES: &[u8] = include_bytes!("../schemas/exceptions.schema.json");
const STATIC_EXCEPTIONS_BYTES: &[u8] = include_bytes!("../staticfiles/exceptions.json");

/// Application id (or the wildcard id) to the codes accepted for it.
pub type ExceptionMap = BTreeMap<String, BTreeSet<String>>;

/// The exception list shipped with the tool.
pub fn builtin_exceptions() -> Result<ExceptionMap> {
    parse_exceptions(STATIC_EXCEPTIONS_BYTES).context("builtin exceptions file")
}

pub fn load_exceptions(path: &Path) -> Result<ExceptionMap> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read exceptions: {}", path.display()))?;
    parse_exceptions(&bytes).with_context(|| format!("exceptions file: {}", path.display()))
}

fn parse_exceptions(bytes: &[u8]) -> Result<ExceptionMap> {
    let doc: Value = serde_json::from_slice(bytes).context("parse exceptions JSON")?;
    let schema_errors = validate_exceptions_schema(&doc);
    if !schema_errors.is_empty() {
        anyhow::bail!("exceptions file is not schema-valid: {schema_errors:?}");
    }

    let mut out = ExceptionMap::new();
    if let Some(apps) = doc.as_object() {
        for (appid, codes) in apps {
            let Some(codes) = codes.as_object() else {
                continue;
            };
            out.insert(appid.clone(), codes.keys().cloned().collect());
        }
    }
    Ok(out)
}

fn validate_exceptions_schema(doc: &Value) -> Vec<String> {
    let schema_json: Value =
        serde_json::from_slice(EXCEPTIONS_SCHEMA_BYTES).expect("parse exceptions schema");
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema_json)
        .expect("build exceptions schema validator");

    validator
        .iter_errors(doc)
        .map(|err| format!("{} ({})", err, err.instance_path()))
        .collect()
}

/// Removes every accumulated code granted to this application id or to
/// the wildcard id. A run whose codes are all suppressed comes out as the
/// canonical empty report.
pub fn filter(diagnostics: Diagnostics, appid: Option<&str>, exceptions: &ExceptionMap) -> LintReport {
    let mut suppressed: BTreeSet<&str> = BTreeSet::new();
    if let Some(codes) = exceptions.get(WILDCARD_APP_ID) {
        suppressed.extend(codes.iter().map(String::as_str));
    }
    if let Some(codes) = appid.and_then(|id| exceptions.get(id)) {
        suppressed.extend(codes.iter().map(String::as_str));
    }

    let (errors, warnings) = diagnostics.into_parts();
    LintReport {
        errors: errors
            .into_iter()
            .filter(|code| !suppressed.contains(code.as_str()))
            .collect(),
        warnings: warnings
            .into_iter()
            .filter(|code| !suppressed.contains(code.as_str()))
            .collect(),
    }
}
