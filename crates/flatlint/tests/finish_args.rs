use serde_json::json;

use flatlint::checks;

#[test]
fn overgranted_manifest_fires_the_expected_codes() {
    let manifest = json!({
        "id": "org.foo.App",
        "finish-args": [
            "--socket=x11",
            "--socket=fallback-x11",
            "--socket=wayland",
            "--share=network",
            "--filesystem=xdg-config",
            "--filesystem=home",
            "--filesystem=host",
            "--own-name=org.kde.StatusNotifierItem1",
            "--talk-name=org.freedesktop.Flatpak",
        ],
    });

    let diagnostics = checks::run_checks(&manifest);

    for code in [
        "finish-args-arbitrary-xdg-config-access",
        "finish-args-redundant-home-and-host",
        "finish-args-broken-kde-tray-permission",
        "finish-args-flatpak-spawn-access",
    ] {
        assert!(diagnostics.errors().contains(code), "missing error {code}");
    }

    for code in [
        "finish-args-contains-both-x11-and-fallback",
        "finish-args-contains-both-x11-and-wayland",
        "finish-args-x11-without-ipc",
    ] {
        assert!(diagnostics.warnings().contains(code), "missing warning {code}");
    }
}

#[test]
fn missing_finish_args_is_an_error_but_empty_is_not() {
    let missing = json!({ "id": "org.foo.App" });
    let diagnostics = checks::run_checks(&missing);
    assert!(diagnostics.errors().contains("finish-args-not-defined"));

    let empty = json!({ "id": "org.foo.App", "finish-args": [] });
    let diagnostics = checks::run_checks(&empty);
    assert!(!diagnostics.errors().contains("finish-args-not-defined"));
}

#[test]
fn build_extensions_skip_permission_checks_entirely() {
    let manifest = json!({
        "id": "org.foo.App.Extension",
        "build-extension": true,
        "finish-args": [
            "--socket=session-bus",
            "--talk-name=org.freedesktop.Flatpak",
            "--filesystem=host",
            "--filesystem=home",
        ],
    });
    let diagnostics = checks::run_checks(&manifest);
    assert!(
        !diagnostics.errors().iter().any(|c| c.starts_with("finish-args-")),
        "unexpected: {:?}",
        diagnostics.errors()
    );
    assert!(!diagnostics.errors().contains("finish-args-not-defined"));
}

#[test]
fn baseapps_may_omit_finish_args() {
    let manifest = json!({ "id": "org.foo.BaseApp" });
    let diagnostics = checks::run_checks(&manifest);
    assert!(!diagnostics.errors().contains("finish-args-not-defined"));
}

#[test]
fn baseapps_with_finish_args_are_still_checked() {
    let manifest = json!({
        "id": "org.foo.BaseApp",
        "finish-args": ["--socket=session-bus"],
    });
    let diagnostics = checks::run_checks(&manifest);
    assert!(diagnostics.errors().contains("finish-args-arbitrary-dbus-access"));
}

#[test]
fn own_name_needs_a_dot_boundary_after_the_id() {
    // org.foo.App2 shares the prefix but is not a sub-scope of org.foo.App.
    let manifest = json!({
        "id": "org.foo.App",
        "finish-args": ["--own-name=org.foo.App2"],
    });
    let diagnostics = checks::run_checks(&manifest);
    assert!(!diagnostics.errors().contains("finish-args-unnecessary-appid-own-name"));

    let manifest = json!({
        "id": "org.foo.App",
        "finish-args": ["--own-name=org.foo.App.Sub"],
    });
    let diagnostics = checks::run_checks(&manifest);
    assert!(diagnostics.errors().contains("finish-args-unnecessary-appid-own-name"));

    let manifest = json!({
        "id": "org.foo.App",
        "finish-args": ["--own-name=org.foo.App"],
    });
    let diagnostics = checks::run_checks(&manifest);
    assert!(diagnostics.errors().contains("finish-args-unnecessary-appid-own-name"));
}

#[test]
fn xdg_subpath_access_is_unnecessary_not_arbitrary() {
    let manifest = json!({
        "id": "org.foo.App",
        "finish-args": [
            "--filesystem=xdg-data/themes",
            "--filesystem=xdg-cache",
        ],
    });
    let diagnostics = checks::run_checks(&manifest);
    assert!(diagnostics.errors().contains("finish-args-unnecessary-xdg-data-access"));
    assert!(!diagnostics.errors().contains("finish-args-arbitrary-xdg-data-access"));
    assert!(diagnostics.errors().contains("finish-args-arbitrary-xdg-cache-access"));
}

#[test]
fn autostart_dbus_gvfs_and_device_checks() {
    let manifest = json!({
        "id": "org.foo.App",
        "finish-args": [
            "--filesystem=xdg-config/autostart:create",
            "--socket=system-bus",
            "--talk-name=org.gtk.vfs",
            "--device=shm",
            "--device=all",
        ],
    });
    let diagnostics = checks::run_checks(&manifest);
    assert!(diagnostics.errors().contains("finish-args-arbitrary-autostart-access"));
    assert!(diagnostics.errors().contains("finish-args-arbitrary-dbus-access"));
    assert!(diagnostics.errors().contains("finish-args-incorrect-dbus-gvfs"));
    assert!(diagnostics.warnings().contains("finish-args-deprecated-shm"));
    assert!(diagnostics.warnings().contains("finish-args-redundant-device-all"));
}

#[test]
fn x11_with_ipc_share_is_quiet_about_ipc() {
    let manifest = json!({
        "id": "org.foo.App",
        "finish-args": ["--socket=x11", "--share=ipc"],
    });
    let diagnostics = checks::run_checks(&manifest);
    assert!(!diagnostics.warnings().contains("finish-args-x11-without-ipc"));
}

#[test]
fn repeated_evaluation_with_fresh_accumulators_matches() {
    let manifest = json!({
        "id": "org.foo.App",
        "finish-args": [
            "--socket=x11",
            "--filesystem=xdg-config",
            "--own-name=org.foo.App.Daemon",
        ],
    });
    let first = checks::run_checks(&manifest);
    let second = checks::run_checks(&manifest);
    assert_eq!(first, second);
}
