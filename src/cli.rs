//! CLI argument parsing via `clap`.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::models::LintSettings;

#[derive(Parser, Debug)]
#[command(
    name = "lintgate",
    version,
    about = "Run flake8 inside a project's virtual environment and gate CI on the result",
    long_about = "Change into the project directory, activate its virtual environment, run the linter over the source tree and exit non-zero if it fails.\n\nConfiguration precedence: CLI > lintgate.yaml > defaults.",
    after_help = "Exit codes:\n  0  clean\n  1  findings, or the linter failed\n  2  project directory or virtual environment unusable\n\nExamples:\n  lintgate --project-dir /srv/music_player_backend\n  lintgate --venv venv -- --max-line-length=120\n  lintgate --init --config ci/lintgate.yaml"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Settings file")]
    pub config: Utf8PathBuf,

    #[arg(long, action = clap::ArgAction::SetTrue, help = "Write a default settings file and exit")]
    pub init: bool,

    #[arg(long, help = "Project directory to lint")]
    pub project_dir: Option<Utf8PathBuf>,

    #[arg(long, help = "Virtual environment, relative to the project directory unless absolute")]
    pub venv: Option<Utf8PathBuf>,

    #[arg(long, help = "Linter program (default: flake8)")]
    pub linter: Option<String>,

    #[arg(long, help = "Kill the linter after this many seconds (0 = never)")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Write log files to this directory")]
    pub log_dir: Option<Utf8PathBuf>,

    #[arg(long, action = clap::ArgAction::SetTrue, help = "Verbose logging on stderr")]
    pub debug: bool,

    /// Extra arguments passed to the linter before the target
    #[arg(last = true)]
    pub linter_args: Vec<String>,
}

impl Cli {
    /// Apply CLI overrides on top of file settings.
    pub fn apply_to(&self, mut settings: LintSettings) -> LintSettings {
        if let Some(dir) = &self.project_dir {
            settings.project_dir = dir.clone();
        }
        if let Some(venv) = &self.venv {
            settings.venv_dir = venv.clone();
        }
        if let Some(linter) = &self.linter {
            settings.linter = linter.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(log_dir) = &self.log_dir {
            settings.log_dir = Some(log_dir.clone());
        }
        if self.debug {
            settings.debug_mode = true;
        }
        if !self.linter_args.is_empty() {
            settings.linter_args = self.linter_args.clone();
        }
        settings
    }
}
