use serde::Serialize;

use crate::error::HarnessError;
use crate::process::{Invocation, ProcessRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    Old,
    New,
}

/// Compile flags that make one API version's headers resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    pub api: ApiVersion,
    pub flags: Vec<String>,
}

/// Ask pkg-config for `package`'s compile flags. Link flags are not needed
/// for syntax checks.
pub fn resolve(
    runner: &dyn ProcessRunner,
    pkg_config: &str,
    package: &str,
    api: ApiVersion,
) -> Result<FlagSet, HarnessError> {
    let invocation = Invocation::new(pkg_config).args(["--cflags", package]);
    let output = runner
        .run(&invocation)
        .map_err(|e| HarnessError::Toolchain {
            package: package.to_string(),
            message: e.to_string(),
        })?;
    if !output.success {
        return Err(HarnessError::Toolchain {
            package: package.to_string(),
            message: output.stderr.trim().to_string(),
        });
    }
    let flags: Vec<String> = output
        .stdout
        .split_ascii_whitespace()
        .map(str::to_string)
        .collect();
    log::debug!("{:?} API flags ({}): {:?}", api, package, flags);
    Ok(FlagSet { api, flags })
}
