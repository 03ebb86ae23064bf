use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::harness::RunResult;

pub const REPORT_FILE: &str = "test_report.txt";
pub const TITLE: &str = "SDL3 Migration Plugin – Test Report";

/// Failure details are cut to this many lines to keep the report readable;
/// the full diff lives in the artifact file.
pub const MAX_DETAIL_LINES: usize = 20;

pub fn build(run: &RunResult) -> String {
    let sep = "=".repeat(66);
    let mut lines = vec![sep.clone(), TITLE.to_string(), sep.clone()];

    for outcome in &run.outcomes {
        let overall = outcome.passed();
        lines.push(format!("\n  [{}] {}", verdict(overall), outcome.name));
        for check in &outcome.checks {
            lines.push(format!("         {}  {}", verdict(check.passed), check.label));
            if !check.passed && !check.detail.is_empty() {
                for dl in check.detail.lines().take(MAX_DETAIL_LINES) {
                    lines.push(format!("               {}", dl));
                }
            }
        }
    }

    lines.push(format!("\n{}", sep));
    lines.push(format!(
        "  Tests: {}  |  Passed: {}  |  Failed: {}",
        run.outcomes.len(),
        run.passed_count(),
        run.failed_count()
    ));
    lines.push(sep);
    lines.join("\n")
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

/// Overwrites `path`; the report only ever describes the latest run.
pub fn write(path: &Path, run: &RunResult) -> Result<()> {
    let mut text = build(run);
    text.push('\n');
    fs::write(path, text).with_context(|| format!("failed to write report {}", path.display()))
}

pub fn write_json(path: &Path, run: &RunResult) -> Result<()> {
    let json = serde_json::to_string_pretty(run).context("failed to serialize run result")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("failed to write JSON report {}", path.display()))
}
