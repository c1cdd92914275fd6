use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::manifest;

use super::{Check, CheckKind};

/// Top-level structure rule unit: runnable command, module list, cleanup
/// and branch hygiene.
pub struct TopLevelCheck;

impl Check for TopLevelCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Manifest
    }

    fn check_manifest(&self, manifest: &Value, diagnostics: &mut Diagnostics) {
        let is_baseapp = manifest::is_baseapp(manifest);
        let build_extension = manifest::is_build_extension(manifest);

        // Extensions and base applications are not runnable and carry no
        // command.
        if !build_extension && !is_baseapp {
            match manifest::str_field(manifest, "command") {
                None => diagnostics.add_error("toplevel-no-command"),
                Some(command) if command.starts_with('/') => {
                    diagnostics.add_warning("toplevel-command-is-path");
                }
                Some(_) => {}
            }
        }

        if let Some(branch) = manifest::str_field(manifest, "branch") {
            if branch == "stable" || branch == "master" {
                diagnostics.add_warning("toplevel-unnecessary-branch");
            }
        }

        if manifest::str_items(manifest, "cleanup").contains(&"/lib/debug") {
            diagnostics.add_error("toplevel-cleanup-debug");
        }

        let has_modules = manifest
            .get("modules")
            .and_then(Value::as_array)
            .is_some_and(|modules| !modules.is_empty());
        if !has_modules {
            diagnostics.add_error("toplevel-no-modules");
        }
    }
}
