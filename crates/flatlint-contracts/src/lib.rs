//! Shared, version-pinned protocol identifiers.
//!
//! These constants are the single source of truth for strings that appear
//! in machine-readable I/O: the tool-report schema version, the reserved
//! wildcard application id in exception files, and the key under which the
//! manifest loader records the source filename.

pub const FLATLINT_REPORT_SCHEMA_VERSION: &str = "flatlint.report@0.1.0";

/// Exception entries under this application id apply to every application.
pub const WILDCARD_APP_ID: &str = "*";

/// Injected into the parsed manifest by the loader; never present in the
/// manifest source itself.
pub const MANIFEST_FILENAME_KEY: &str = "x-manifest-filename";
