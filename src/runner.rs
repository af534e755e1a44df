//! The lint gate pipeline: project directory, environment activation, linter.
//!
//! Each step completes before the next begins. Failures in the first two steps return
//! before any process is spawned.

use camino::{Utf8Path, Utf8PathBuf};
use tokio::io::AsyncWrite;

use crate::models::LintSettings;
use crate::services::{LintError, LintReport, LintService, VirtualEnv};

pub struct LintRunner {
    settings: LintSettings,
    service: LintService,
}

impl LintRunner {
    pub fn new(settings: LintSettings) -> Self {
        Self {
            settings,
            service: LintService::new(),
        }
    }

    /// Run the gate once, forwarding the linter's stdout to `out`.
    pub async fn run<W>(&self, out: &mut W) -> Result<LintReport, LintError>
    where
        W: AsyncWrite + Unpin,
    {
        let project_dir = resolve_project_dir(&self.settings.project_dir)?;
        tracing::debug!("Project directory: {}", project_dir);

        let venv = VirtualEnv::locate(&project_dir, &self.settings.venv_dir)?;
        let activated = venv.activate(std::env::var_os("PATH"));

        let program = venv.resolve_program(&self.settings.linter);
        let command = self.service.build_command(
            &program,
            &self.settings.linter_args,
            &self.settings.target,
            &project_dir,
            activated,
            &self.settings.extra_env,
        );

        let report = self
            .service
            .execute(&command, self.settings.timeout(), out)
            .await?;

        if report.is_clean() {
            tracing::info!("Lint passed");
        } else {
            tracing::warn!(
                "Lint failed ({:?}, exit code {:?}): {}",
                report.outcome,
                report.exit_code,
                report.tally.summary()
            );
        }

        Ok(report)
    }
}

/// Resolve the project directory to an absolute path.
fn resolve_project_dir(dir: &Utf8Path) -> Result<Utf8PathBuf, LintError> {
    if !dir.is_dir() {
        return Err(LintError::DirectoryNotFound(dir.to_path_buf()));
    }

    dir.canonicalize_utf8()
        .map_err(|_| LintError::DirectoryNotFound(dir.to_path_buf()))
}
