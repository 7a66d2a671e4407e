use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::cli::renderer;
use costreport::core::codec::{decode, encode, encode_pretty, DecodeError};
use costreport::core::models::report::CostReport;
use costreport::core::summary::ReportSummary;

/// Read a report file, or stdin when `path` is "-".
fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read report from stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("Failed to read report: {}", path.display()))
}

fn load(path: &Path) -> Result<CostReport> {
    let raw = read_input(path)?;
    let report = decode(&raw).with_context(|| format!("Invalid report: {}", path.display()))?;
    Ok(report)
}

/// Text renders the report; JSON prints the summary, or the full report
/// re-encoded when `detailed` is set.
pub fn show(path: &Path, detailed: bool, opts: &OutputOptions) -> Result<()> {
    let report = load(path)?;
    if opts.verbose {
        eprintln!(
            "Loaded {} provider(s), {} evergreen project(s) from {}",
            report.providers.len(),
            report.evergreen.projects.len(),
            path.display()
        );
    }

    match opts.format {
        OutputFormat::Text => {
            println!("{}", renderer::render_report(&report, detailed, opts.use_color));
        }
        OutputFormat::Json if detailed => {
            let raw = if opts.pretty {
                encode_pretty(&report)
            } else {
                encode(&report)
            };
            println!("{}", String::from_utf8_lossy(&raw));
        }
        OutputFormat::Json => {
            let summary = ReportSummary::from_report(&report);
            let json = if opts.pretty {
                serde_json::to_string_pretty(&summary)?
            } else {
                serde_json::to_string(&summary)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}

/// Outcome of checking one file.
#[derive(Debug, Serialize)]
struct CheckResult {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn check_one(path: &Path) -> CheckResult {
    let file = path.display().to_string();
    let raw = match read_input(path) {
        Ok(raw) => raw,
        Err(e) => {
            return CheckResult {
                file,
                ok: false,
                kind: Some("io"),
                path: None,
                error: Some(format!("{:#}", e)),
            }
        }
    };

    match decode(&raw) {
        Ok(report) => {
            // A report that decodes must also survive re-encoding unchanged.
            let round_trip = decode(&encode(&report)).ok();
            if round_trip.as_ref() == Some(&report) {
                CheckResult {
                    file,
                    ok: true,
                    kind: None,
                    path: None,
                    error: None,
                }
            } else {
                CheckResult {
                    file,
                    ok: false,
                    kind: Some("round_trip"),
                    path: None,
                    error: Some("report does not survive re-encoding".to_string()),
                }
            }
        }
        Err(DecodeError::Malformed(e)) => CheckResult {
            file,
            ok: false,
            kind: Some("malformed"),
            path: None,
            error: Some(e.to_string()),
        },
        Err(DecodeError::SchemaMismatch { path, message }) => CheckResult {
            file,
            ok: false,
            kind: Some("schema"),
            path: Some(path),
            error: Some(message),
        },
    }
}

/// Validate every file; exits with status 1 if any fails.
pub fn check(paths: &[std::path::PathBuf], opts: &OutputOptions) -> Result<()> {
    let results: Vec<CheckResult> = paths.iter().map(|p| check_one(p)).collect();
    let failed = results.iter().filter(|r| !r.ok).count();

    match opts.format {
        OutputFormat::Text => {
            use colored::Colorize;
            colored::control::set_override(opts.use_color);
            for r in &results {
                if r.ok {
                    println!("{} {}", "ok".green(), r.file);
                } else {
                    let location = r
                        .path
                        .as_deref()
                        .map(|p| format!(" at {}", p))
                        .unwrap_or_default();
                    println!(
                        "{} {}{}: {}",
                        "FAIL".red().bold(),
                        r.file,
                        location,
                        r.error.as_deref().unwrap_or("")
                    );
                }
            }
            if opts.verbose {
                eprintln!("{} checked, {} failed", results.len(), failed);
            }
        }
        OutputFormat::Json => {
            let json = if opts.pretty {
                serde_json::to_string_pretty(&results)?
            } else {
                serde_json::to_string(&results)?
            };
            println!("{}", json);
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
