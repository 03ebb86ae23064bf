use std::path::PathBuf;

/// Errors that abort a run before any test executes.
///
/// Check failures are never errors; they are recorded as failed
/// [`CheckResult`](crate::harness::CheckResult)s and flow into the report.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("pkg-config --cflags {package}: {message}")]
    Toolchain { package: String, message: String },
    #[error("No test pairs found in {}", dir.display())]
    NoTestPairs { dir: PathBuf },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }
}
