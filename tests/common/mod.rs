//! Fake toolchain for driving the binary end to end: shell scripts standing
//! in for pkg-config, clang and clang-tidy.
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub const BEFORE: &str = "#include <SDL2/SDL.h>\n\nvoid test_rect(SDL_Rect *a, SDL_Rect *b) {\n    SDL_bool eq = SDL_RectEquals(a, b);\n}\n";
pub const AFTER: &str = "#include <SDL3/SDL.h>\n\nvoid test_rect(SDL_Rect *a, SDL_Rect *b) {\n    SDL_bool eq = SDL_RectsEqual(a, b);\n}\n";

const PKG_CONFIG: &str = r#"#!/bin/sh
case "$2" in
  sdl2) echo "-I/fake/include/SDL2 -D_REENTRANT" ;;
  sdl3) echo "-I/fake/include/SDL3" ;;
  *) echo "Package $2 was not found in the pkg-config search path." >&2; exit 1 ;;
esac
"#;

const CLANG: &str = r#"#!/bin/sh
for last; do :; done
if grep -q BROKEN "$last"; then
  echo "$last:1:1: error: unknown type name 'BROKEN'" >&2
  exit 1
fi
exit 0
"#;

// Rewrites the scratch copy, then exits 1 like the real tool after fixing.
const CLANG_TIDY: &str = r#"#!/bin/sh
for a; do
  case "$a" in *_after_check.cpp) f="$a" ;; esac
done
sed -e 's/SDL2\/SDL.h/SDL3\/SDL.h/' -e 's/SDL_RectEquals/SDL_RectsEqual/' "$f" > "$f.tmp" && mv "$f.tmp" "$f"
echo "$f:4:19: warning: SDL_RectEquals was renamed [sdl3-migration-rect]" >&2
exit 1
"#;

pub struct Workspace {
    pub root: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let ws = Workspace { root };
        fs::create_dir_all(ws.tests_dir()).expect("tests dir");
        fs::create_dir_all(ws.bin_dir()).expect("bin dir");
        ws.script("pkg-config", PKG_CONFIG);
        ws.script("clang", CLANG);
        ws.script("clang-tidy", CLANG_TIDY);
        fs::write(ws.plugin(), b"").expect("plugin");
        ws
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.root.path().join("tests")
    }

    fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    pub fn plugin(&self) -> PathBuf {
        self.root.path().join("plugin.so")
    }

    pub fn report(&self) -> PathBuf {
        self.tests_dir().join("test_report.txt")
    }

    pub fn artifact(&self, name: &str) -> PathBuf {
        self.tests_dir().join(format!("test_{}_transform.diff", name))
    }

    fn script(&self, name: &str, body: &str) {
        let path = self.bin_dir().join(name);
        fs::write(&path, body).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    }

    pub fn write_pair(&self, name: &str, before: &str, after: &str) {
        self.write_fixture(&format!("test_{}_before.cpp", name), before);
        self.write_fixture(&format!("test_{}_after.cpp", name), after);
    }

    pub fn write_fixture(&self, file: &str, content: &str) {
        fs::write(self.tests_dir().join(file), content).expect("write fixture");
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
    }

    /// Run the harness with the fake toolchain; `extra` goes after the
    /// tool options.
    pub fn run(&self, extra: &[&str]) -> Output {
        let bin = self.bin_dir();
        Command::new(env!("CARGO_BIN_EXE_migcheck"))
            .arg("--tests-dir")
            .arg(self.tests_dir())
            .arg("--pkg-config")
            .arg(bin.join("pkg-config"))
            .arg("--compiler")
            .arg(bin.join("clang"))
            .arg("--tidy")
            .arg(bin.join("clang-tidy"))
            .arg("--no-color")
            .args(extra)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .expect("run migcheck")
    }

    pub fn run_with_plugin(&self, extra: &[&str]) -> Output {
        let plugin = self.plugin();
        let mut args = vec![plugin.to_str().expect("utf-8 path")];
        args.extend_from_slice(extra);
        self.run(&args)
    }
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}
