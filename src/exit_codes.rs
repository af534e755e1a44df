//! Process exit codes consumed by CI pipelines.

use crate::services::{LintError, LintOutcome, LintReport};

/// Clean run, no findings
pub const SUCCESS: u8 = 0;

/// Findings reported, or the linter itself failed, was missing, or timed out
pub const LINT_FAILED: u8 = 1;

/// The linter never ran: project dir or venv unusable, or bad configuration
pub const SETUP_ERROR: u8 = 2;

/// Exit code for a completed lint run
pub fn for_report(report: &LintReport) -> u8 {
    match report.outcome {
        LintOutcome::Clean => SUCCESS,
        LintOutcome::Findings | LintOutcome::ToolFailure => LINT_FAILED,
    }
}

/// Exit code for a run that ended in an error
pub fn for_error(err: &LintError) -> u8 {
    if err.is_setup_error() {
        SETUP_ERROR
    } else {
        LINT_FAILED
    }
}

/// Exit code for the whole pipeline result
pub fn for_result(result: &Result<LintReport, LintError>) -> u8 {
    match result {
        Ok(report) => for_report(report),
        Err(err) => for_error(err),
    }
}
