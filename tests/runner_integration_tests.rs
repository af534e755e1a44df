//! Integration tests for LintRunner against a fake virtual environment
//!
//! These tests verify:
//! - Clean, findings and tool-failure outcomes
//! - Setup failures stop before the linter runs
//! - Linter output is forwarded unchanged
//! - Activation, working directory, arguments and timeout handling

#![cfg(unix)]

mod common;

use common::{Project, THREE_VIOLATIONS, make_venv};
use lintgate::{LintError, LintOutcome, LintRunner, LintSettings, exit_codes};
use std::fs;

fn settings_for(project: &Project) -> LintSettings {
    LintSettings {
        project_dir: project.root.clone(),
        ..LintSettings::default()
    }
}

#[tokio::test]
async fn test_clean_run_exits_zero() {
    let project = Project::with_venv();
    let runner = LintRunner::new(settings_for(&project));

    let mut out = Vec::new();
    let report = runner.run(&mut out).await.unwrap();

    assert_eq!(report.outcome, LintOutcome::Clean);
    assert_eq!(report.exit_code, Some(0));
    assert!(report.tally.is_empty());
    assert!(out.is_empty());
    assert_eq!(exit_codes::for_report(&report), exit_codes::SUCCESS);
}

#[tokio::test]
async fn test_three_violations_exit_one_with_text() {
    let project = Project::with_venv();
    project.write("violations.txt", THREE_VIOLATIONS);
    let runner = LintRunner::new(settings_for(&project));

    let mut out = Vec::new();
    let report = runner.run(&mut out).await.unwrap();

    assert_eq!(report.outcome, LintOutcome::Findings);
    assert_eq!(report.exit_code, Some(1));
    assert_eq!(report.tally.total, 3);
    assert_eq!(String::from_utf8(out).unwrap(), THREE_VIOLATIONS);
    assert_eq!(exit_codes::for_report(&report), exit_codes::LINT_FAILED);
}

#[tokio::test]
async fn test_tool_crash_is_distinguished_from_findings() {
    let project = Project::with_venv();
    project.write("crash.txt", "");
    let runner = LintRunner::new(settings_for(&project));

    let mut out = Vec::new();
    let report = runner.run(&mut out).await.unwrap();

    assert_eq!(report.outcome, LintOutcome::ToolFailure);
    assert_eq!(report.exit_code, Some(2));
    assert_eq!(exit_codes::for_report(&report), exit_codes::LINT_FAILED);
}

#[tokio::test]
async fn test_missing_project_dir() {
    let project = Project::with_venv();
    let mut settings = settings_for(&project);
    settings.project_dir = project.root.join("does-not-exist");
    settings
        .extra_env
        .insert("LINTGATE_ARGS_OUT".to_string(), project.marker().to_string());
    let runner = LintRunner::new(settings);

    let mut out = Vec::new();
    let err = runner.run(&mut out).await.unwrap_err();

    assert!(matches!(err, LintError::DirectoryNotFound(_)));
    assert!(out.is_empty());
    assert!(!project.marker().exists());
    assert_eq!(exit_codes::for_error(&err), exit_codes::SETUP_ERROR);
}

#[tokio::test]
async fn test_missing_venv() {
    let project = Project::with_venv();
    project.write("violations.txt", THREE_VIOLATIONS);
    let mut settings = settings_for(&project);
    settings.venv_dir = "no-such-venv".into();
    settings
        .extra_env
        .insert("LINTGATE_ARGS_OUT".to_string(), project.marker().to_string());
    let runner = LintRunner::new(settings);

    let mut out = Vec::new();
    let err = runner.run(&mut out).await.unwrap_err();

    assert!(matches!(err, LintError::EnvironmentNotFound { .. }));
    assert!(out.is_empty());
    assert!(!project.marker().exists());
    assert_eq!(exit_codes::for_error(&err), exit_codes::SETUP_ERROR);
}

#[tokio::test]
async fn test_marker_is_written_when_linter_runs() {
    let project = Project::with_venv();
    let mut settings = settings_for(&project);
    settings
        .extra_env
        .insert("LINTGATE_ARGS_OUT".to_string(), project.marker().to_string());

    LintRunner::new(settings).run(&mut Vec::new()).await.unwrap();

    assert!(project.marker().exists());
}

#[tokio::test]
async fn test_corrupt_venv() {
    let project = Project::with_venv();
    fs::remove_file(project.root.join(".venv").join("pyvenv.cfg")).unwrap();
    let mut settings = settings_for(&project);
    settings
        .extra_env
        .insert("LINTGATE_ARGS_OUT".to_string(), project.marker().to_string());
    let runner = LintRunner::new(settings);

    let mut out = Vec::new();
    let err = runner.run(&mut out).await.unwrap_err();

    assert!(matches!(err, LintError::EnvironmentNotFound { .. }));
    assert!(!project.marker().exists());
}

#[tokio::test]
async fn test_linter_not_installed_fails() {
    let project = Project::bare();
    make_venv(&project.root.join(".venv"), false);
    let runner = LintRunner::new(LintSettings {
        linter: "lintgate-no-such-linter".to_string(),
        ..settings_for(&project)
    });

    let mut out = Vec::new();
    let err = runner.run(&mut out).await.unwrap_err();

    assert!(matches!(err, LintError::ToolInvocation { .. }));
    assert_eq!(exit_codes::for_error(&err), exit_codes::LINT_FAILED);
}

#[tokio::test]
async fn test_custom_venv_dir_and_args() {
    let project = Project::bare();
    make_venv(&project.root.join("env"), true);
    let args_out = project.root.join("args.txt");

    let mut settings = settings_for(&project);
    settings.venv_dir = "env".into();
    settings.linter_args = vec!["--max-line-length=120".to_string()];
    settings
        .extra_env
        .insert("LINTGATE_ARGS_OUT".to_string(), args_out.to_string());

    let report = LintRunner::new(settings).run(&mut Vec::new()).await.unwrap();

    assert!(report.is_clean());
    assert_eq!(
        fs::read_to_string(&args_out).unwrap().trim_end(),
        "--max-line-length=120 ."
    );
}

#[tokio::test]
async fn test_timeout_kills_linter() {
    let project = Project::with_venv();
    project.write("slow.txt", "");
    let runner = LintRunner::new(LintSettings {
        timeout_secs: 1,
        ..settings_for(&project)
    });

    let err = runner.run(&mut Vec::new()).await.unwrap_err();

    assert!(matches!(err, LintError::Timeout(_)));
    assert_eq!(exit_codes::for_error(&err), exit_codes::LINT_FAILED);
}

#[tokio::test]
async fn test_repeated_runs_are_idempotent() {
    let project = Project::with_venv();
    project.write("violations.txt", THREE_VIOLATIONS);
    let runner = LintRunner::new(settings_for(&project));

    let first = runner.run(&mut Vec::new()).await.unwrap();
    let second = runner.run(&mut Vec::new()).await.unwrap();

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.exit_code, second.exit_code);
    assert_eq!(first.tally, second.tally);

    project.remove("violations.txt");
    let fixed = runner.run(&mut Vec::new()).await.unwrap();
    assert!(fixed.is_clean());
}
