use std::collections::BTreeSet;

use serde::Serialize;

/// Per-run accumulator every rule unit writes into.
///
/// One instance is created at the start of a run and passed `&mut` into
/// each check; nothing survives across runs. Codes are facts, not faults:
/// adding one never interrupts evaluation, and adding the same code twice
/// is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: BTreeSet<String>,
    warnings: BTreeSet<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, code: impl Into<String>) {
        self.errors.insert(code.into());
    }

    pub fn add_warning(&mut self, code: impl Into<String>) {
        self.warnings.insert(code.into());
    }

    pub fn errors(&self) -> &BTreeSet<String> {
        &self.errors
    }

    pub fn warnings(&self) -> &BTreeSet<String> {
        &self.warnings
    }

    pub fn into_parts(self) -> (BTreeSet<String>, BTreeSet<String>) {
        (self.errors, self.warnings)
    }
}

/// Final result of one run, after suppression.
///
/// When both sets are empty the report serializes as `{}` and compares
/// equal to `LintReport::default()`, so "nothing to report" is a single
/// equality check for callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub errors: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub warnings: BTreeSet<String>,
}

impl LintReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
