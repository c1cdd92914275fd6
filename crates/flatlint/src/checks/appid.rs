use std::path::Path;

use serde_json::Value;

use flatlint_contracts::MANIFEST_FILENAME_KEY;

use crate::diagnostics::Diagnostics;
use crate::manifest;

use super::{Check, CheckKind};

const CODE_HOSTING_PREFIXES: &[&str] =
    &["io.github.", "io.gitlab.", "com.github.", "com.gitlab."];

/// Application-id hygiene: reverse-DNS depth, code-hosting id rules, and
/// the manifest-filename convention.
pub struct AppIdCheck;

impl Check for AppIdCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Manifest
    }

    fn check_manifest(&self, manifest: &Value, diagnostics: &mut Diagnostics) {
        let Some(appid) = manifest::app_id(manifest) else {
            return;
        };

        if appid.split('.').count() < 3 {
            diagnostics.add_error("appid-less-than-3-components");
        }

        let is_code_hosting = CODE_HOSTING_PREFIXES
            .iter()
            .any(|prefix| appid.starts_with(prefix));
        // Code-hosting ids reserve the first three components for the
        // hosting account, so the app name needs a fourth.
        if is_code_hosting && appid.split('.').count() < 4 {
            diagnostics.add_error("appid-code-hosting-too-few-components");
        }

        if appid.starts_with("com.github.") || appid.starts_with("com.gitlab.") {
            diagnostics.add_error("appid-uses-code-hosting-domain");
        }

        // The loader records where the manifest came from; the file stem
        // must equal the id.
        if let Some(filename) = manifest::str_field(manifest, MANIFEST_FILENAME_KEY) {
            let stem = Path::new(filename)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            if stem != appid {
                diagnostics.add_error("appid-filename-mismatch");
            }
        }
    }
}
