use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root of `lintgate.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(rename = "Lint_Settings", default)]
    pub lint_settings: LintSettings,
}

/// Settings for a single lint gate run.
///
/// Every field has a default so a partial (or absent) file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintSettings {
    #[serde(rename = "Project Dir", default = "default_project_dir")]
    pub project_dir: Utf8PathBuf,

    /// Relative paths are resolved against the project directory.
    #[serde(rename = "Venv Dir", default = "default_venv_dir")]
    pub venv_dir: Utf8PathBuf,

    #[serde(rename = "Linter", default = "default_linter")]
    pub linter: String,

    #[serde(rename = "Linter Args", default)]
    pub linter_args: Vec<String>,

    #[serde(rename = "Target", default = "default_target")]
    pub target: String,

    /// Seconds before the linter is killed; 0 waits forever.
    #[serde(rename = "Timeout", default)]
    pub timeout_secs: u64,

    #[serde(rename = "Extra Env", default)]
    pub extra_env: IndexMap<String, String>,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Log Dir", default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<Utf8PathBuf>,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
            venv_dir: default_venv_dir(),
            linter: default_linter(),
            linter_args: Vec::new(),
            target: default_target(),
            timeout_secs: 0,
            extra_env: IndexMap::new(),
            debug_mode: false,
            log_dir: None,
        }
    }
}

impl LintSettings {
    /// The configured timeout, or `None` when the linter may run unbounded.
    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_secs > 0).then(|| std::time::Duration::from_secs(self.timeout_secs))
    }
}

fn default_project_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(".")
}

fn default_venv_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(".venv")
}

fn default_linter() -> String {
    "flake8".to_string()
}

fn default_target() -> String {
    ".".to_string()
}
