use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::discovery::TestPair;
use crate::flags::FlagSet;
use crate::process::ProcessRunner;
use crate::syntax;
use crate::transform::TransformVerifier;

pub const SYNTAX_OLD_LABEL: &str = "before compiles with SDL2";
pub const SYNTAX_NEW_LABEL: &str = "after compiles with SDL3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub label: String,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn pass(label: &str, detail: impl Into<String>) -> Self {
        CheckResult {
            label: label.to_string(),
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(label: &str, detail: impl Into<String>) -> Self {
        CheckResult {
            label: label.to_string(),
            passed: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    pub name: String,
    pub checks: Vec<CheckResult>,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub plugin: Option<PathBuf>,
    pub outcomes: Vec<TestOutcome>,
}

impl RunResult {
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    pub fn any_check_failed(&self) -> bool {
        self.outcomes.iter().any(|o| !o.passed())
    }
}

/// Live feedback while pairs run.
pub trait Progress {
    fn started(&mut self, plugin: Option<&Path>, pair_count: usize);
    fn finished(&mut self, outcome: &TestOutcome);
}

/// Coloured PASS/FAIL lines on stdout.
pub struct TerminalProgress {
    pub color: bool,
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

impl TerminalProgress {
    fn verdict(&self, ok: bool) -> String {
        let word = if ok { "PASS" } else { "FAIL" };
        if self.color {
            format!("{}{}{}", if ok { GREEN } else { RED }, word, RESET)
        } else {
            word.to_string()
        }
    }
}

impl Progress for TerminalProgress {
    fn started(&mut self, plugin: Option<&Path>, pair_count: usize) {
        match plugin {
            Some(p) => println!("Plugin : {}", p.display()),
            None => println!("Plugin : NOT FOUND  (clang-tidy checks will be skipped)"),
        }
        println!("Tests  : {}", pair_count);
        println!();
    }

    fn finished(&mut self, outcome: &TestOutcome) {
        println!("{}: {}", self.verdict(outcome.passed()), outcome.name);
        for check in &outcome.checks {
            println!("  {}: {}", self.verdict(check.passed), check.label);
        }
    }
}

pub struct Harness<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub compiler: &'a str,
    pub tidy: &'a str,
    pub plugin: Option<&'a Path>,
    pub check_prefix: &'a str,
    pub old_flags: &'a FlagSet,
    pub new_flags: &'a FlagSet,
    /// Where diff artifacts live (the fixture directory).
    pub artifact_dir: &'a Path,
}

impl Harness<'_> {
    /// Run every pair in order. All three checks always run, whatever the
    /// earlier ones said. The scratch directory is gone when this returns,
    /// on every path.
    pub fn run(&self, pairs: &[TestPair], progress: &mut dyn Progress) -> Result<RunResult> {
        let scratch = tempfile::Builder::new()
            .prefix("migcheck-")
            .tempdir()
            .context("failed to create scratch directory")?;
        log::debug!("scratch directory: {}", scratch.path().display());

        let verifier = TransformVerifier {
            runner: self.runner,
            tidy: self.tidy,
            plugin: self.plugin,
            check_prefix: self.check_prefix,
            old_flags: self.old_flags,
            scratch_dir: scratch.path(),
            artifact_dir: self.artifact_dir,
        };

        progress.started(self.plugin, pairs.len());
        let mut outcomes = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let outcome = self.run_pair(pair, &verifier);
            progress.finished(&outcome);
            outcomes.push(outcome);
        }

        scratch
            .close()
            .context("failed to remove scratch directory")?;
        Ok(RunResult {
            plugin: self.plugin.map(Path::to_path_buf),
            outcomes,
        })
    }

    fn run_pair(&self, pair: &TestPair, verifier: &TransformVerifier<'_>) -> TestOutcome {
        let old = syntax::check(self.runner, self.compiler, &pair.before, self.old_flags);
        let new = syntax::check(self.runner, self.compiler, &pair.after, self.new_flags);
        let checks = vec![
            CheckResult {
                label: SYNTAX_OLD_LABEL.to_string(),
                passed: old.passed,
                detail: old.stderr,
            },
            CheckResult {
                label: SYNTAX_NEW_LABEL.to_string(),
                passed: new.passed,
                detail: new.stderr,
            },
            verifier.verify(pair),
        ];
        TestOutcome {
            name: pair.name.clone(),
            checks,
        }
    }
}
