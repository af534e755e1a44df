use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncWrite, BufReader};
use tokio::process::Command;
use tokio::time::timeout;

use super::environment::ActivatedEnv;
use super::findings::{FindingParser, FindingTally};

/// Result of a lint run that reached the linter and saw it exit
#[derive(Debug, Clone)]
pub struct LintReport {
    pub outcome: LintOutcome,
    /// Raw exit code, `None` if the linter was terminated by a signal
    pub exit_code: Option<i32>,
    pub tally: FindingTally,
    pub duration: Duration,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.outcome == LintOutcome::Clean
    }
}

/// How the linter's termination is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintOutcome {
    /// Exit status 0
    Clean,
    /// Non-zero exit with at least one recognised finding in the output
    Findings,
    /// Non-zero exit with no recognised finding, or killed by a signal
    ToolFailure,
}

impl LintOutcome {
    /// Classify a termination.
    pub fn classify(exit_code: Option<i32>, tally: &FindingTally) -> Self {
        match exit_code {
            Some(0) => LintOutcome::Clean,
            Some(_) if !tally.is_empty() => LintOutcome::Findings,
            _ => LintOutcome::ToolFailure,
        }
    }
}

/// Errors that stop a lint run before the linter reports a status
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Project directory not found: {0}")]
    DirectoryNotFound(Utf8PathBuf),

    #[error("Virtual environment not usable at {path}: {reason}")]
    EnvironmentNotFound { path: Utf8PathBuf, reason: String },

    #[error("Failed to run {program}: {source}")]
    ToolInvocation {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Linter timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LintError {
    /// True for failures detected before the linter was started.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            LintError::DirectoryNotFound(_) | LintError::EnvironmentNotFound { .. }
        )
    }
}

/// A fully resolved linter invocation
#[derive(Debug, Clone)]
pub struct LintCommand {
    pub program: Utf8PathBuf,
    pub args: Vec<String>,
    pub working_dir: Utf8PathBuf,
    pub env: ActivatedEnv,
    pub extra_env: Vec<(String, String)>,
}

impl LintCommand {
    /// Render for logging
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Service for running the linter and interpreting its result
pub struct LintService {
    parser: FindingParser,
}

impl LintService {
    pub fn new() -> Self {
        Self {
            parser: FindingParser::new(),
        }
    }

    /// Build the linter invocation.
    ///
    /// # Arguments
    /// * `program` - Linter executable, already resolved against the venv
    /// * `linter_args` - Extra arguments placed before the target
    /// * `target` - What to lint, relative to `working_dir`
    /// * `working_dir` - The project directory
    /// * `env` - Activation for the child
    /// * `extra_env` - Additional variables, applied after the activation
    pub fn build_command(
        &self,
        program: &Utf8Path,
        linter_args: &[String],
        target: &str,
        working_dir: &Utf8Path,
        env: ActivatedEnv,
        extra_env: &IndexMap<String, String>,
    ) -> LintCommand {
        let mut args = linter_args.to_vec();
        args.push(target.to_string());

        LintCommand {
            program: program.to_path_buf(),
            args,
            working_dir: working_dir.to_path_buf(),
            env,
            extra_env: extra_env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Run the linter, forwarding its stdout to `out` and inheriting stderr.
    pub async fn execute<W>(
        &self,
        command: &LintCommand,
        timeout_duration: Option<Duration>,
        out: &mut W,
    ) -> Result<LintReport, LintError>
    where
        W: AsyncWrite + Unpin,
    {
        tracing::info!("Executing in {}: {}", command.working_dir, command.display());

        let start = Instant::now();

        let mut cmd = Command::new(command.program.as_std_path());
        cmd.args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        for name in &command.env.removed {
            cmd.env_remove(name);
        }
        for (name, value) in &command.env.vars {
            cmd.env(name, value);
        }
        for (name, value) in &command.extra_env {
            cmd.env(name, value);
        }

        let mut child = cmd.spawn().map_err(|source| LintError::ToolInvocation {
            program: command.program.to_string(),
            source,
        })?;

        let stdout = child.stdout.take().ok_or_else(|| LintError::ToolInvocation {
            program: command.program.to_string(),
            source: std::io::Error::other("stdout was not captured"),
        })?;

        let run = async {
            let tally = self.parser.pump(BufReader::new(stdout), out).await?;
            let status = child.wait().await?;
            Ok::<_, LintError>((tally, status))
        };

        let (tally, status) = match timeout_duration {
            Some(limit) => timeout(limit, run).await.map_err(|_| {
                tracing::warn!("Linter timed out after {:?}", limit);
                LintError::Timeout(limit)
            })??,
            None => run.await?,
        };

        let duration = start.elapsed();
        let exit_code = status.code();
        let outcome = LintOutcome::classify(exit_code, &tally);

        tracing::info!(
            "Linter completed in {:.2}s with exit code {:?}: {}",
            duration.as_secs_f32(),
            exit_code,
            tally.summary()
        );

        Ok(LintReport {
            outcome,
            exit_code,
            tally,
            duration,
        })
    }
}

impl Default for LintService {
    fn default() -> Self {
        Self::new()
    }
}
