//! Virtual environment discovery and activation.
//!
//! Activation never touches the parent process environment. Instead [`ActivatedEnv`]
//! carries the variables a shell `activate` script would set, and the lint service
//! applies them to the linter's child process only.

use camino::{Utf8Path, Utf8PathBuf};
use std::ffi::OsString;

use super::linting::LintError;

/// Marker file every venv created by `python -m venv` or `virtualenv` contains
pub const PYVENV_CFG: &str = "pyvenv.cfg";

/// Directory holding the venv's executables
#[cfg(windows)]
pub const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const BIN_DIR: &str = "bin";

/// A located and validated virtual environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEnv {
    root: Utf8PathBuf,
    bin_dir: Utf8PathBuf,
}

/// Environment changes to apply to a child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedEnv {
    pub vars: Vec<(String, OsString)>,
    pub removed: Vec<String>,
}

impl VirtualEnv {
    /// Locate the venv for a project.
    ///
    /// `venv_dir` is joined onto `project_dir` unless it is absolute. The venv is
    /// considered corrupt if `pyvenv.cfg` or the bin directory is missing.
    pub fn locate(project_dir: &Utf8Path, venv_dir: &Utf8Path) -> Result<Self, LintError> {
        let root = if venv_dir.is_absolute() {
            venv_dir.to_path_buf()
        } else {
            project_dir.join(venv_dir)
        };

        if !root.is_dir() {
            return Err(LintError::EnvironmentNotFound {
                path: root,
                reason: "directory does not exist".to_string(),
            });
        }

        if !root.join(PYVENV_CFG).is_file() {
            return Err(LintError::EnvironmentNotFound {
                path: root,
                reason: format!("missing {}", PYVENV_CFG),
            });
        }

        let bin_dir = root.join(BIN_DIR);
        if !bin_dir.is_dir() {
            return Err(LintError::EnvironmentNotFound {
                path: root,
                reason: format!("missing {} directory", BIN_DIR),
            });
        }

        tracing::debug!("Located virtual environment at {}", root);
        Ok(Self { root, bin_dir })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn bin_dir(&self) -> &Utf8Path {
        &self.bin_dir
    }

    /// Build the activation for a child process.
    ///
    /// # Arguments
    /// * `base_path` - The `PATH` the child would otherwise inherit
    pub fn activate(&self, base_path: Option<OsString>) -> ActivatedEnv {
        let mut paths = vec![self.bin_dir.clone().into_std_path_buf()];
        if let Some(base) = base_path.as_ref() {
            paths.extend(std::env::split_paths(base));
        }

        // join_paths only fails when an entry contains the separator itself
        let path = std::env::join_paths(&paths).unwrap_or_else(|e| {
            tracing::warn!("Could not extend PATH ({}), using venv bin only", e);
            self.bin_dir.as_os_str().to_os_string()
        });

        ActivatedEnv {
            vars: vec![
                ("VIRTUAL_ENV".to_string(), self.root.as_os_str().to_os_string()),
                ("PATH".to_string(), path),
            ],
            removed: vec!["PYTHONHOME".to_string()],
        }
    }

    /// Resolve a program name against the venv.
    ///
    /// Returns the path inside the bin directory when the tool is installed there,
    /// otherwise the name unchanged so the activated `PATH` decides.
    pub fn resolve_program(&self, program: &str) -> Utf8PathBuf {
        let program_path = Utf8Path::new(program);
        if program_path.components().count() > 1 || program_path.is_absolute() {
            return program_path.to_path_buf();
        }

        let candidates = if cfg!(windows) {
            vec![format!("{}.exe", program), program.to_string()]
        } else {
            vec![program.to_string()]
        };

        for candidate in candidates {
            let full = self.bin_dir.join(&candidate);
            if full.is_file() {
                return full;
            }
        }

        tracing::debug!(
            "{} not found in {}, relying on PATH lookup",
            program,
            self.bin_dir
        );
        program_path.to_path_buf()
    }
}
