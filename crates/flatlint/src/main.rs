use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use flatlint::checks;
use flatlint::exceptions::{self, ExceptionMap};
use flatlint_contracts::{FLATLINT_REPORT_SCHEMA_VERSION, MANIFEST_FILENAME_KEY};

#[derive(Parser)]
#[command(name = "flatlint")]
#[command(about = "Build-manifest linter for sandboxed applications.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Check one manifest and report diagnostic codes.
    Lint {
        /// Manifest file (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Apply the built-in exception list.
        #[arg(long)]
        exceptions: bool,

        /// Apply an exception list from a file instead of the built-in one.
        #[arg(long, value_name = "PATH")]
        exceptions_file: Option<PathBuf>,

        /// Emit a machine-readable report on stdout.
        #[arg(long)]
        report_json: bool,
    },
}

#[derive(Debug, Serialize)]
struct LintToolReport {
    schema_version: &'static str,
    command: &'static str,
    ok: bool,
    r#in: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    errors: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    warnings: BTreeSet<String>,
    exit_code: u8,
}

fn main() -> std::process::ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();

    let Some(cmd) = cli.cmd else {
        anyhow::bail!("missing subcommand (try --help)");
    };

    match cmd {
        Cmd::Lint {
            input,
            exceptions,
            exceptions_file,
            report_json,
        } => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("read input: {}", input.display()))?;
            let mut manifest: Value = serde_json::from_slice(&bytes)
                .with_context(|| format!("parse manifest JSON: {}", input.display()))?;

            // Record where the manifest came from so id/filename checks
            // can see it. Non-object manifests are handed through as-is;
            // the rule units degrade on their own.
            if let Some(obj) = manifest.as_object_mut() {
                let filename = input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                obj.insert(MANIFEST_FILENAME_KEY.to_string(), Value::String(filename));
            }

            let exception_map: ExceptionMap = match exceptions_file {
                Some(path) => exceptions::load_exceptions(&path)?,
                None if exceptions => exceptions::builtin_exceptions()?,
                None => ExceptionMap::new(),
            };

            let report = checks::lint_manifest(&manifest, &exception_map);
            let exit_code: u8 = if report.errors.is_empty() { 0 } else { 1 };

            if report_json {
                let tool_report = LintToolReport {
                    schema_version: FLATLINT_REPORT_SCHEMA_VERSION,
                    command: "lint",
                    ok: report.errors.is_empty(),
                    r#in: input.display().to_string(),
                    errors: report.errors,
                    warnings: report.warnings,
                    exit_code,
                };
                print_json(&tool_report)?;
            } else {
                for code in &report.errors {
                    println!("error: {code}");
                }
                for code in &report.warnings {
                    println!("warning: {code}");
                }
            }

            Ok(std::process::ExitCode::from(exit_code))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut bytes = serde_json::to_vec(value)?;
    bytes.push(b'\n');
    std::io::Write::write_all(&mut std::io::stdout(), &bytes).context("write stdout")?;
    Ok(())
}
