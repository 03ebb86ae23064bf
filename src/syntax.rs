use std::path::Path;

use crate::flags::FlagSet;
use crate::process::{ExitStatusPolicy, Invocation, ProcessRunner};

pub const LANGUAGE_STANDARD: &str = "-std=c++17";

const POLICY: ExitStatusPolicy = ExitStatusPolicy::Authoritative;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxCheck {
    pub passed: bool,
    pub stderr: String,
}

/// Parse and type-check `source` without codegen. The compiler's exit status
/// is the verdict; its trimmed stderr comes back either way.
pub fn check(
    runner: &dyn ProcessRunner,
    compiler: &str,
    source: &Path,
    flags: &FlagSet,
) -> SyntaxCheck {
    let invocation = Invocation::new(compiler)
        .args([LANGUAGE_STANDARD, "-x", "c++", "-fsyntax-only"])
        .args(flags.flags.iter().cloned())
        .arg(source.to_string_lossy());
    match runner.run(&invocation) {
        Ok(output) => SyntaxCheck {
            passed: POLICY.passed(&output),
            stderr: output.stderr.trim().to_string(),
        },
        Err(e) => SyntaxCheck {
            passed: false,
            stderr: format!("failed to run {}: {}", compiler, e),
        },
    }
}
