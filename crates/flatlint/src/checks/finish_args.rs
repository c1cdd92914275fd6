use regex::Regex;
use serde_json::Value;

use crate::args::ArgIndex;
use crate::diagnostics::Diagnostics;
use crate::manifest;

use super::{Check, CheckKind};

/// Session-tray own-names must use the org.freedesktop protocol; the KDE
/// prefix breaks tray icons under sandboxing.
const KDE_TRAY_PREFIX: &str = "org.kde.StatusNotifierItem";

/// Talking to the portal spawn service escapes the sandbox.
const FLATPAK_SPAWN_NAME: &str = "org.freedesktop.Flatpak";

/// gvfs is reached through the documents portal, not by bus name.
const GVFS_NAME: &str = "org.gtk.vfs";

const XDG_DIRS: &[&str] = &["xdg-data", "xdg-config", "xdg-cache"];

/// Permission rule unit over `finish-args`.
///
/// Build extensions carry no runtime permissions of their own and skip
/// every check; base applications are only exempt from the
/// missing-finish-args gate.
pub struct FinishArgsCheck;

impl Check for FinishArgsCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Manifest
    }

    fn check_manifest(&self, manifest: &Value, diagnostics: &mut Diagnostics) {
        let appid = manifest::app_id(manifest);
        let is_baseapp = manifest::is_baseapp(manifest);
        let build_extension = manifest::is_build_extension(manifest);

        // A present-but-empty list is a deliberate "no permissions" and
        // passes the gate; only a wholly absent key is flagged.
        if manifest.get("finish-args").is_none() && !build_extension && !is_baseapp {
            diagnostics.add_error("finish-args-not-defined");
            return;
        }

        if build_extension {
            return;
        }

        let fa = ArgIndex::from_manifest(manifest);

        if fa.contains("socket", "x11") && fa.contains("socket", "fallback-x11") {
            diagnostics.add_warning("finish-args-contains-both-x11-and-fallback");
        }

        if fa.contains("socket", "x11") && fa.contains("socket", "wayland") {
            diagnostics.add_warning("finish-args-contains-both-x11-and-wayland");
        }

        if (fa.contains("socket", "x11") || fa.contains("socket", "fallback-x11"))
            && !fa.contains("share", "ipc")
        {
            diagnostics.add_warning("finish-args-x11-without-ipc");
        }

        check_xdg_dirs(&fa, diagnostics);

        if fa.contains("filesystem", "home") && fa.contains("filesystem", "host") {
            diagnostics.add_error("finish-args-redundant-home-and-host");
        }

        for own_name in fa.values("own-name") {
            if own_name.starts_with(KDE_TRAY_PREFIX) {
                diagnostics.add_error("finish-args-broken-kde-tray-permission");
            }

            if let Some(appid) = appid {
                // The id itself, or id plus a literal "." sub-scope. A
                // longer name whose next byte is not "." (org.foo.App2
                // for org.foo.App) is a different name.
                let is_sub_scope = own_name
                    .strip_prefix(appid)
                    .is_some_and(|rest| rest.starts_with('.'));
                if own_name == appid || is_sub_scope {
                    diagnostics.add_error("finish-args-unnecessary-appid-own-name");
                }
            }
        }

        if fa.contains("filesystem", "xdg-config/autostart")
            || fa.contains("filesystem", "xdg-config/autostart:create")
        {
            diagnostics.add_error("finish-args-arbitrary-autostart-access");
        }

        if fa.contains("socket", "system-bus") || fa.contains("socket", "session-bus") {
            diagnostics.add_error("finish-args-arbitrary-dbus-access");
        }

        if fa.contains("talk-name", GVFS_NAME) {
            diagnostics.add_error("finish-args-incorrect-dbus-gvfs");
        }

        if fa.contains("device", "shm") {
            diagnostics.add_warning("finish-args-deprecated-shm");
        }

        if fa.contains("device", "all") && fa.value_count("device") > 1 {
            diagnostics.add_warning("finish-args-redundant-device-all");
        }

        if fa.contains("talk-name", FLATPAK_SPAWN_NAME) {
            diagnostics.add_error("finish-args-flatpak-spawn-access");
        }
    }
}

/// Whole-tree grants on the xdg base directories are arbitrary access;
/// subpath grants are unnecessary (apps get their own subdirectory).
/// Arbitrary is tested first and the two are mutually exclusive per value.
fn check_xdg_dirs(fa: &ArgIndex, diagnostics: &mut Diagnostics) {
    for xdg_dir in XDG_DIRS {
        let arbitrary =
            Regex::new(&format!("^{xdg_dir}(:(create|rw|ro)?)?$")).expect("xdg pattern");
        let unnecessary =
            Regex::new(&format!("^{xdg_dir}(/.*)?(:(create|rw|ro)?)?$")).expect("xdg pattern");

        for fs in fa.values("filesystem") {
            if arbitrary.is_match(fs) {
                diagnostics.add_error(format!("finish-args-arbitrary-{xdg_dir}-access"));
            } else if unnecessary.is_match(fs) {
                diagnostics.add_error(format!("finish-args-unnecessary-{xdg_dir}-access"));
            }
        }
    }
}
