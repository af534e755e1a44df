//! Fixtures shared by the integration tests: a project directory holding a fake
//! virtual environment whose `flake8` is a small shell script.

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

/// Fake flake8: requires activation, lints from the working directory.
///
/// - `slow.txt` present: hang until killed
/// - `violations.txt` present: print it and exit 1
/// - `crash.txt` present: print a traceback on stderr and exit 2
/// - otherwise: exit 0 silently
pub const FAKE_FLAKE8: &str = r#"#!/bin/sh
if [ -z "$VIRTUAL_ENV" ]; then
    echo "flake8: not activated" >&2
    exit 3
fi
if [ -n "$LINTGATE_ARGS_OUT" ]; then
    echo "$@" > "$LINTGATE_ARGS_OUT"
fi
if [ -f slow.txt ]; then
    exec sleep 30
fi
if [ -f crash.txt ]; then
    echo "Traceback (most recent call last):" >&2
    exit 2
fi
if [ -f violations.txt ]; then
    cat violations.txt
    exit 1
fi
exit 0
"#;

pub const THREE_VIOLATIONS: &str = "\
./src/api/main.py:1:1: F401 'os' imported but unused
./src/api/routes_songs.py:42:80: E501 line too long (88 > 79 characters)
./src/api/db.py:7:1: E302 expected 2 blank lines, found 1
";

pub struct Project {
    _temp_dir: TempDir,
    pub root: Utf8PathBuf,
}

impl Project {
    /// A project with a `.venv` holding the fake flake8
    pub fn with_venv() -> Self {
        let project = Self::bare();
        make_venv(&project.root.join(".venv"), true);
        project
    }

    /// A project with no virtual environment
    pub fn bare() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        fs::create_dir_all(root.join("src").join("api")).unwrap();
        fs::write(root.join("src").join("api").join("main.py"), "import os\n").unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.root.join(name), contents).unwrap();
    }

    /// File the fake flake8 creates when `LINTGATE_ARGS_OUT` points at it
    pub fn marker(&self) -> Utf8PathBuf {
        self.root.join("linter-ran.txt")
    }

    pub fn remove(&self, name: &str) {
        fs::remove_file(self.root.join(name)).unwrap();
    }
}

pub fn make_venv(root: &Utf8Path, with_flake8: bool) {
    let bin = root.join("bin");
    fs::create_dir_all(&bin).unwrap();
    fs::write(root.join("pyvenv.cfg"), "home = /usr/bin\nversion = 3.12.3\n").unwrap();

    if with_flake8 {
        install_flake8(&bin);
    }
}

/// Put the fake flake8 into `bin`, creating the directory if needed
pub fn install_flake8(bin: &Utf8Path) {
    fs::create_dir_all(bin).unwrap();
    let script = bin.join("flake8");
    fs::write(&script, FAKE_FLAKE8).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
}
