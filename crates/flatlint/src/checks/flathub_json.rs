use serde_json::Value;

use crate::diagnostics::Diagnostics;

use super::{Check, CheckKind};

/// Publishing delays shorter than this defeat the mirroring window.
const MIN_PUBLISH_DELAY_HOURS: i64 = 3;

/// Publishing-policy rule unit over the embedded `x-flathub` mapping.
pub struct FlathubJsonCheck;

impl Check for FlathubJsonCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Manifest
    }

    fn check_manifest(&self, manifest: &Value, diagnostics: &mut Diagnostics) {
        let Some(flathub) = manifest.get("x-flathub").and_then(Value::as_object) else {
            return;
        };

        if flathub
            .get("skip-appstream-check")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            diagnostics.add_error("flathub-json-skip-appstream-check");
        }

        if let Some(delay) = flathub.get("publish-delay-hours").and_then(Value::as_i64) {
            if delay < MIN_PUBLISH_DELAY_HOURS {
                diagnostics.add_error("flathub-json-modified-publish-delay");
            }
        }

        // An end-of-life rebase must name the id users are moved to.
        if flathub.contains_key("end-of-life-rebase") && !flathub.contains_key("end-of-life") {
            diagnostics.add_error("flathub-json-eol-rebase-misses-new-id");
        }

        if let Some(arches) = flathub.get("only-arches").and_then(Value::as_array) {
            if arches.is_empty() {
                diagnostics.add_error("flathub-json-only-arches-empty");
            }
            if arches.iter().filter_map(Value::as_str).any(|a| a == "i386") {
                diagnostics.add_warning("flathub-json-deprecated-i386-arch-included");
            }
        }
    }
}
