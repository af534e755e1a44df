//! Data models for lintgate.
//!
//! - [`LintConfig`]: root of the `lintgate.yaml` settings file
//! - [`LintSettings`]: project location, venv location, linter command and run options

pub mod config;

pub use config::{LintConfig, LintSettings};
