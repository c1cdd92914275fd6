//! Rule units and the orchestrator that runs them.

mod appid;
mod finish_args;
mod flathub_json;
mod modules;
mod toplevel;

use serde_json::Value;

use crate::diagnostics::{Diagnostics, LintReport};
use crate::exceptions::{self, ExceptionMap};
use crate::manifest;

pub use appid::AppIdCheck;
pub use finish_args::FinishArgsCheck;
pub use flathub_json::FlathubJsonCheck;
pub use modules::ModuleCheck;
pub use toplevel::TopLevelCheck;

/// Selects when the orchestrator invokes a rule unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Runs once against the whole manifest.
    Manifest,
    /// Runs against every build module, including nested ones.
    Module,
}

/// One validation concern.
///
/// Implementations are stateless and independent: they never fail, never
/// read another unit's output, and produce the same codes when run twice
/// over the same input. Malformed fields are skipped, not raised.
pub trait Check {
    fn kind(&self) -> CheckKind;

    fn check_manifest(&self, _manifest: &Value, _diagnostics: &mut Diagnostics) {}

    fn check_module(&self, _module: &Value, _diagnostics: &mut Diagnostics) {}
}

/// Every known rule unit, in invocation order. New units are added here;
/// the orchestrator does not change.
pub fn registry() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(TopLevelCheck),
        Box::new(AppIdCheck),
        Box::new(FinishArgsCheck),
        Box::new(FlathubJsonCheck),
        Box::new(ModuleCheck),
    ]
}

/// Runs every applicable rule unit over one manifest into a fresh
/// accumulator. Suppression is not applied here.
pub fn run_checks(manifest: &Value) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let modules = collect_modules(manifest);

    for check in registry() {
        match check.kind() {
            CheckKind::Manifest => check.check_manifest(manifest, &mut diagnostics),
            CheckKind::Module => {
                for module in &modules {
                    check.check_module(module, &mut diagnostics);
                }
            }
        }
    }

    diagnostics
}

/// Full run: evaluate, then filter the accumulated codes through the
/// exception list for this manifest's application id.
pub fn lint_manifest(manifest: &Value, exceptions: &ExceptionMap) -> LintReport {
    let diagnostics = run_checks(manifest);
    exceptions::filter(diagnostics, manifest::app_id(manifest), exceptions)
}

/// Depth-first over `modules`, parents before their nested modules.
fn collect_modules(manifest: &Value) -> Vec<&Value> {
    let mut out = Vec::new();
    push_modules(manifest, &mut out);
    out
}

fn push_modules<'a>(parent: &'a Value, out: &mut Vec<&'a Value>) {
    for module in manifest::object_items(parent, "modules") {
        out.push(module);
        push_modules(module, out);
    }
}
