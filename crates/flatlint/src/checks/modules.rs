use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::manifest;

use super::{Check, CheckKind};

const RELEASE_BUILD_TYPES: &[&str] = &["Release", "RelWithDebInfo", "MinSizeRel"];

/// Build-module rule unit: buildsystem hygiene and source pinning.
/// The orchestrator feeds it every module, nested ones included; codes
/// carry the module name so one report can point into a deep tree.
pub struct ModuleCheck;

impl Check for ModuleCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Module
    }

    fn check_module(&self, module: &Value, diagnostics: &mut Diagnostics) {
        let Some(name) = manifest::str_field(module, "name") else {
            return;
        };

        let buildsystem = manifest::str_field(module, "buildsystem").unwrap_or("autotools");
        let config_opts = manifest::str_items(module, "config-opts");

        if buildsystem == "cmake" {
            diagnostics.add_warning(format!("module-{name}-buildsystem-is-plain-cmake"));
        }

        if buildsystem == "cmake" || buildsystem == "cmake-ninja" {
            for opt in &config_opts {
                if let Some(build_type) = opt.strip_prefix("-DCMAKE_BUILD_TYPE=") {
                    if !RELEASE_BUILD_TYPES.contains(&build_type) {
                        diagnostics.add_warning(format!("module-{name}-cmake-non-release-build"));
                    }
                }
            }
            if config_opts
                .iter()
                .any(|opt| opt.starts_with("-DCMAKE_INSTALL_PREFIX"))
            {
                diagnostics.add_warning(format!("module-{name}-cmake-redundant-prefix"));
            }
        } else if buildsystem == "autotools"
            && config_opts.iter().any(|opt| *opt == "--prefix=/app")
        {
            diagnostics.add_warning(format!("module-{name}-autotools-redundant-prefix"));
        }

        for source in manifest::object_items(module, "sources") {
            check_source(name, source, diagnostics);
        }
    }
}

fn check_source(module_name: &str, source: &Value, diagnostics: &mut Diagnostics) {
    let source_type = manifest::str_field(source, "type").unwrap_or("");

    if (source_type == "archive" || source_type == "file") && source.get("sha1").is_some() {
        diagnostics.add_warning(format!("module-{module_name}-source-sha1-deprecated"));
    }

    if source_type != "git" {
        return;
    }

    if source.get("path").is_some() {
        diagnostics.add_error(format!("module-{module_name}-source-git-local-path"));
    }

    let commit = manifest::str_field(source, "commit");
    let tag = manifest::str_field(source, "tag");
    // A branch that is a full commit hash is a pin too.
    let pinned_branch = manifest::str_field(source, "branch").is_some_and(is_commit_hash);
    if commit.is_none() && tag.is_none() && !pinned_branch {
        diagnostics.add_error(format!("module-{module_name}-source-git-no-commit-or-tag"));
    }

    match manifest::str_field(source, "url") {
        None => diagnostics.add_error(format!("module-{module_name}-source-git-no-url")),
        Some(url) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                diagnostics.add_error(format!("module-{module_name}-source-git-url-not-http"));
            }
        }
    }
}

fn is_commit_hash(s: &str) -> bool {
    s.len() == 40 && s.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
}
