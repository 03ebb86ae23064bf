//! Spawn-and-capture access to external tools.
//!
//! Every oracle the harness consults (pkg-config, the compiler, clang-tidy)
//! is an opaque executable with a text-stream contract. Checkers only see
//! [`ProcessRunner`], so tests can swap in scripted tools.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Shell-ish rendering used for debug logs.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Whether a checker treats the tool's exit status as the verdict.
///
/// The compiler's status is authoritative for syntax checks. clang-tidy exits
/// non-zero whenever it emits fix diagnostics, so the transform check ignores
/// it and judges the rewritten file instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatusPolicy {
    Authoritative,
    Ignored,
}

impl ExitStatusPolicy {
    pub fn passed(self, output: &ProcessOutput) -> bool {
        match self {
            ExitStatusPolicy::Authoritative => output.success,
            ExitStatusPolicy::Ignored => true,
        }
    }
}

pub trait ProcessRunner {
    /// Run to completion, blocking until both output streams are drained.
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        log::debug!("running: {}", invocation.command_line());
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }
        let output = cmd.output()?;
        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
