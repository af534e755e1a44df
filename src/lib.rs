// lintgate - run a project's linter inside its virtual environment and gate CI on it
//
// This is the library crate containing the pipeline, configuration and process handling.
// The binary crate (main.rs) provides the command line entry point.

pub mod cli;
pub mod config;
pub mod exit_codes;
pub mod logging;
pub mod models;
pub mod runner;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{LintConfig, LintSettings};
pub use runner::LintRunner;
pub use services::{LintError, LintOutcome, LintReport};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
