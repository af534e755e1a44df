//! lintgate - command line entry point.
//!
//! # Execution Flow
//!
//! 1. Parse the command line (`--init` writes a default settings file and exits)
//! 2. Load `lintgate.yaml` (defaults when absent) and apply CLI overrides
//! 3. Initialize logging on stderr, plus a rotating file when a log dir is set
//! 4. Run the pipeline on a current-thread tokio runtime:
//!    project dir → venv activation → linter, stdout forwarded unchanged
//! 5. Exit with 0 (clean), 1 (findings or linter failure) or 2 (setup failure)

use anyhow::Result;
use clap::Parser;
use lintgate::cli::Cli;
use lintgate::{APP_NAME, ConfigManager, LintRunner, VERSION, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{}: {:#}", APP_NAME, e);
            ExitCode::from(exit_codes::SETUP_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config_manager = ConfigManager::new(&cli.config);

    if cli.init {
        config_manager.init_default()?;
        println!("Wrote {}", config_manager.config_path());
        return Ok(exit_codes::SUCCESS);
    }

    let config = config_manager.load()?;
    let settings = cli.apply_to(config.lint_settings);

    // Held until exit so buffered file logs are flushed
    let _guard = logging::setup_logging(settings.log_dir.as_deref(), APP_NAME, settings.debug_mode)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let runner = LintRunner::new(settings);
    let result = runtime.block_on(async {
        let mut stdout = tokio::io::stdout();
        runner.run(&mut stdout).await
    });

    if let Err(e) = &result {
        tracing::error!("{}", e);
    }

    Ok(exit_codes::for_result(&result))
}
