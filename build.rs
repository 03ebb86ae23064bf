use std::path::PathBuf;
use std::process::Command;

fn main() {
    // Short git hash of the harness itself, shown by --version
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|o| {
            if o.status.success() {
                Some(String::from_utf8_lossy(&o.stdout).trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=MIGCHECK_GIT_HASH={}", git_hash);

    let dirty = Command::new("git")
        .args(["diff", "--quiet"])
        .status()
        .map(|s| if s.success() { "clean" } else { "dirty" })
        .unwrap_or("unknown");
    println!("cargo:rustc-env=MIGCHECK_GIT_DIRTY={}", dirty);

    // Only watch HEAD when there is a git dir; a missing path would rerun
    // this script on every build.
    let git_dir = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| PathBuf::from(String::from_utf8_lossy(&o.stdout).trim()));
    if let Some(head) = git_dir.map(|d| d.join("HEAD")).filter(|h| h.exists()) {
        println!("cargo:rerun-if-changed={}", head.display());
    }
}
