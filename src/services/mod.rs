//! Services module - the lint gate's business logic.
//!
//! # Components
//!
//! - [`VirtualEnv`]: Locates and validates a project's virtual environment and builds the
//!   activation ([`ActivatedEnv`]) applied to the linter's child process.
//!
//! - [`FindingParser`]: Recognises violation lines in the linter's output while forwarding
//!   that output unchanged, producing a [`FindingTally`].
//!
//! - [`LintService`]: Builds the linter command line, executes it with an optional timeout,
//!   and classifies the termination into a [`LintReport`] / [`LintOutcome`].
//!
//! # Design Philosophy
//!
//! - **Explicit inputs**: Every operation takes its paths and options as parameters
//! - **Async**: Subprocess execution and output forwarding use tokio
//! - **No global mutation**: Activation is scoped to the child process
//!
//! # Usage Example
//!
//! ```ignore
//! use lintgate::services::{LintService, VirtualEnv};
//!
//! let venv = VirtualEnv::locate(project_dir, ".venv".as_ref())?;
//! let service = LintService::new();
//! let command = service.build_command(
//!     &venv.resolve_program("flake8"),
//!     &[],
//!     ".",
//!     project_dir,
//!     venv.activate(std::env::var_os("PATH")),
//!     &settings.extra_env,
//! );
//! let report = service.execute(&command, None, &mut tokio::io::stdout()).await?;
//! ```

pub mod environment;
pub mod findings;
pub mod linting;

pub use environment::{ActivatedEnv, VirtualEnv};
pub use findings::{Finding, FindingParser, FindingTally};
pub use linting::{LintCommand, LintError, LintOutcome, LintReport, LintService};
