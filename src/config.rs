use std::path::{Path, PathBuf};

use clap::Parser;

use crate::report::REPORT_FILE;

pub const PLUGIN_FILE: &str = "SDL3MigrationCheck.so";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MIGCHECK_GIT_HASH"),
    ", ",
    env!("MIGCHECK_GIT_DIRTY"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "migcheck")]
#[command(version, long_version = LONG_VERSION)]
#[command(args_override_self = true)]
#[command(about = "Verify the SDL2 -> SDL3 clang-tidy migration plugin against before/after fixtures")]
pub struct Cli {
    /// Path to the migration plugin (.so); probed under the build dir if omitted
    pub plugin: Option<PathBuf>,

    /// Directory holding test_<name>_before.cpp / test_<name>_after.cpp pairs
    #[arg(long, default_value = "fixtures")]
    pub tests_dir: PathBuf,

    /// Report path (default: <tests-dir>/test_report.txt)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Also write the run result as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// pkg-config package for the old API
    #[arg(long, default_value = "sdl2")]
    pub old_package: String,

    /// pkg-config package for the new API
    #[arg(long, default_value = "sdl3")]
    pub new_package: String,

    /// Check filter prefix; the pair name is appended
    #[arg(long, default_value = "sdl3-migration-")]
    pub check_prefix: String,

    #[arg(long, default_value = "pkg-config")]
    pub pkg_config: String,

    #[arg(long, default_value = "clang")]
    pub compiler: String,

    #[arg(long, default_value = "clang-tidy")]
    pub tidy: String,

    /// Disable ANSI colours in progress output
    #[arg(long)]
    pub no_color: bool,
}

/// A run's settings with every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub plugin: Option<PathBuf>,
    pub tests_dir: PathBuf,
    pub report: PathBuf,
    pub json: Option<PathBuf>,
    pub old_package: String,
    pub new_package: String,
    pub check_prefix: String,
    pub pkg_config: String,
    pub compiler: String,
    pub tidy: String,
    pub color: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let plugin = match cli.plugin {
            Some(p) => Some(absolute(&p)),
            None => find_plugin(&cli.tests_dir),
        };
        let report = cli
            .report
            .unwrap_or_else(|| cli.tests_dir.join(REPORT_FILE));
        Config {
            plugin,
            tests_dir: cli.tests_dir,
            report,
            json: cli.json,
            old_package: cli.old_package,
            new_package: cli.new_package,
            check_prefix: cli.check_prefix,
            pkg_config: cli.pkg_config,
            compiler: cli.compiler,
            tidy: cli.tidy,
            color: !cli.no_color,
        }
    }
}

/// Conventional build outputs, first existing one wins.
pub fn plugin_candidates(tests_dir: &Path) -> Vec<PathBuf> {
    let root = tests_dir.join("..");
    vec![root.join("build").join(PLUGIN_FILE), root.join(PLUGIN_FILE)]
}

pub fn find_plugin(tests_dir: &Path) -> Option<PathBuf> {
    plugin_candidates(tests_dir)
        .into_iter()
        .map(|c| absolute(&c))
        .find(|c| c.exists())
}

/// Absolute and lexically normalised. Falls back to the path as given when
/// the working directory is unavailable.
fn absolute(path: &Path) -> PathBuf {
    let joined = match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    };
    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["migcheck", "--tests-dir", "/nonexistent/fixtures"]);
        let cfg = Config::from_cli(cli);
        assert_eq!(cfg.plugin, None);
        assert_eq!(cfg.report, PathBuf::from("/nonexistent/fixtures/test_report.txt"));
        assert_eq!(cfg.old_package, "sdl2");
        assert_eq!(cfg.new_package, "sdl3");
        assert_eq!(cfg.check_prefix, "sdl3-migration-");
        assert_eq!(cfg.tidy, "clang-tidy");
        assert!(cfg.color);
    }

    #[test]
    fn explicit_plugin_is_made_absolute() {
        let cli = Cli::parse_from(["migcheck", "build/./x.so", "--no-color"]);
        let cfg = Config::from_cli(cli);
        let plugin = cfg.plugin.unwrap();
        assert!(plugin.is_absolute());
        assert!(plugin.ends_with("build/x.so"));
        assert!(!cfg.color);
    }

    #[test]
    fn later_options_override_earlier_ones() {
        let cli = Cli::parse_from(["migcheck", "--tidy", "a", "--tidy", "b"]);
        assert_eq!(cli.tidy, "b");
    }

    #[test]
    fn probes_build_dir_before_project_root() {
        let root = tempfile::tempdir().unwrap();
        let tests = root.path().join("tests");
        fs::create_dir_all(&tests).unwrap();
        assert_eq!(find_plugin(&tests), None);

        fs::write(root.path().join(PLUGIN_FILE), b"").unwrap();
        assert_eq!(find_plugin(&tests), Some(root.path().join(PLUGIN_FILE)));

        fs::create_dir_all(root.path().join("build")).unwrap();
        fs::write(root.path().join("build").join(PLUGIN_FILE), b"").unwrap();
        assert_eq!(
            find_plugin(&tests),
            Some(root.path().join("build").join(PLUGIN_FILE))
        );
    }
}
