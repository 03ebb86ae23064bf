use std::fs;
use std::path::{Path, PathBuf};

use crate::diff;
use crate::discovery::{TestPair, PREFIX};
use crate::flags::FlagSet;
use crate::harness::CheckResult;
use crate::process::{ExitStatusPolicy, Invocation, ProcessRunner};
use crate::syntax::LANGUAGE_STANDARD;

pub const LABEL: &str = "clang-tidy transforms before → after";
pub const PLUGIN_MISSING: &str = "plugin .so not found";

// clang-tidy reports "issues found and fixed" with a non-zero status even on
// a perfect rewrite; only the rewritten file counts.
const POLICY: ExitStatusPolicy = ExitStatusPolicy::Ignored;

/// Everything the transform check needs besides the pair itself.
pub struct TransformVerifier<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub tidy: &'a str,
    pub plugin: Option<&'a Path>,
    pub check_prefix: &'a str,
    pub old_flags: &'a FlagSet,
    pub scratch_dir: &'a Path,
    pub artifact_dir: &'a Path,
}

pub fn scratch_file_name(name: &str) -> String {
    format!("{}{}_after_check.cpp", PREFIX, name)
}

pub fn diff_artifact_name(name: &str) -> String {
    format!("{}{}_transform.diff", PREFIX, name)
}

impl TransformVerifier<'_> {
    pub fn check_filter(&self, name: &str) -> String {
        format!("{}{}", self.check_prefix, name)
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.artifact_dir.join(diff_artifact_name(name))
    }

    pub fn verify(&self, pair: &TestPair) -> CheckResult {
        let Some(plugin) = self.plugin else {
            return CheckResult::fail(LABEL, PLUGIN_MISSING);
        };
        match self.rewrite_and_diff(plugin, pair) {
            Ok(None) => {
                self.remove_stale_artifact(&pair.name);
                CheckResult::pass(LABEL, "")
            }
            Ok(Some(diff_text)) => {
                let path = self.artifact_path(&pair.name);
                match fs::write(&path, &diff_text) {
                    Ok(()) => log::debug!("wrote {}", path.display()),
                    Err(e) => log::warn!("could not write {}: {}", path.display(), e),
                }
                CheckResult::fail(LABEL, diff_text)
            }
            Err(detail) => CheckResult::fail(LABEL, detail),
        }
    }

    /// `Ok(None)` on an exact match, `Ok(Some(diff))` on a mismatch, `Err`
    /// when the check could not be carried out at all.
    fn rewrite_and_diff(&self, plugin: &Path, pair: &TestPair) -> Result<Option<String>, String> {
        let scratch = self.scratch_dir.join(scratch_file_name(&pair.name));
        fs::copy(&pair.before, &scratch).map_err(|e| {
            format!(
                "failed to copy {} to {}: {}",
                pair.before.display(),
                scratch.display(),
                e
            )
        })?;

        let invocation = Invocation::new(self.tidy)
            .arg(format!("--load={}", plugin.display()))
            .arg(format!("--checks=-*,{}", self.check_filter(&pair.name)))
            .args(["--fix", "--fix-errors"])
            .arg(scratch.to_string_lossy())
            .args(["--", LANGUAGE_STANDARD])
            .args(self.old_flags.flags.iter().cloned())
            .current_dir(self.scratch_dir);
        let output = self
            .runner
            .run(&invocation)
            .map_err(|e| format!("failed to run {}: {}", self.tidy, e))?;
        log::debug!(
            "{} exited with {:?}: {}",
            self.tidy,
            output.code,
            output.stderr.trim()
        );
        // Unreachable while POLICY is Ignored; takes effect if the tool's
        // exit-code convention ever becomes authoritative.
        if !POLICY.passed(&output) {
            return Err(output.stderr.trim().to_string());
        }

        let expected = fs::read(&pair.after)
            .map_err(|e| format!("failed to read {}: {}", pair.after.display(), e))?;
        let actual = fs::read(&scratch)
            .map_err(|e| format!("failed to read {}: {}", scratch.display(), e))?;
        if expected == actual {
            return Ok(None);
        }
        let diff_text = diff::unified(
            &String::from_utf8_lossy(&expected),
            &String::from_utf8_lossy(&actual),
            &file_name(&pair.after),
            &file_name(&scratch),
        )
        // Byte-level difference that vanished under lossy decoding.
        .unwrap_or_else(|| "files differ (non-UTF-8 content)\n".to_string());
        Ok(Some(diff_text))
    }

    fn remove_stale_artifact(&self, name: &str) {
        let path = self.artifact_path(name);
        if path.exists() {
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("removed stale {}", path.display()),
                Err(e) => log::warn!("could not remove {}: {}", path.display(), e),
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
