use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::HarnessError;

pub const PREFIX: &str = "test_";
pub const BEFORE_SUFFIX: &str = "_before.cpp";
pub const AFTER_SUFFIX: &str = "_after.cpp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestPair {
    pub name: String,
    pub before: PathBuf,
    pub after: PathBuf,
}

/// `test_<name>_before.cpp` -> `<name>`
pub fn pair_name(file_name: &str) -> Option<&str> {
    let name = file_name.strip_prefix(PREFIX)?.strip_suffix(BEFORE_SUFFIX)?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

pub fn after_file_name(name: &str) -> String {
    format!("{}{}{}", PREFIX, name, AFTER_SUFFIX)
}

/// All complete pairs in `dir`, sorted by name. A before-file without its
/// after-file is skipped; finding nothing at all is fatal.
pub fn discover(dir: &Path) -> Result<Vec<TestPair>, HarnessError> {
    let entries = fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))?;
    let mut pairs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HarnessError::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str().and_then(pair_name) else {
            continue;
        };
        let before = entry.path();
        if !before.is_file() {
            continue;
        }
        let after = dir.join(after_file_name(name));
        if !after.is_file() {
            log::debug!("skipping {}: no {}", before.display(), after_file_name(name));
            continue;
        }
        pairs.push(TestPair {
            name: name.to_string(),
            before,
            after,
        });
    }
    if pairs.is_empty() {
        return Err(HarnessError::NoTestPairs {
            dir: dir.to_path_buf(),
        });
    }
    pairs.sort_by(|a, b| a.name.cmp(&b.name));
    log::debug!(
        "discovered {} pairs: {:?}",
        pairs.len(),
        pairs.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
    );
    Ok(pairs)
}
