//! Women's Health Assessment
//!
//! Terminal front-end: collects the profile, walks the questionnaire and
//! prints the dashboard. Session data is kept in a JSON file under the
//! same keys a browser host keeps in localStorage.

use anyhow::{Context, Result};
use health_assessment_cli::{
    app::{App, Outcome},
    config::{AppConfig, LoggingConfig, StorageBackend},
    error::CliError,
    storage::FileStore,
    views::Console,
};
use health_assessment_shared::{CatalogRegistry, Gender, MemoryStore};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Tracing is not initialized until the config has loaded
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(err.exit_code() as u8);
        }
    };
    init_tracing(&config.logging);

    match run(config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Assessment aborted");
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Exit status for an error that aborted the run
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>()
        .map(CliError::exit_code)
        .unwrap_or(1) as u8
}

fn run(config: AppConfig) -> Result<Outcome> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %AppConfig::environment(),
        backend = ?config.storage.backend,
        "Starting Women's Health Assessment"
    );

    // Catalog problems are fatal before any screen is shown
    let catalogs = CatalogRegistry::builtin().map_err(CliError::from)?;
    let catalog = catalogs.select(Gender::Female).map_err(CliError::from)?;
    info!(
        questions = catalog.question_count(),
        max_score = catalog.max_score(),
        "Question catalog loaded"
    );

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout().lock());

    let outcome = match config.storage.backend {
        StorageBackend::File => {
            let store = FileStore::open(&config.storage.path)
                .map_err(CliError::from)
                .with_context(|| {
                    format!("Failed to open storage at {}", config.storage.path.display())
                })?;
            info!(path = %store.path().display(), "Using file store");
            App::start(catalogs, store, &config.storage, console)?.run()?
        }
        StorageBackend::Memory => {
            App::start(catalogs, MemoryStore::new(), &config.storage, console)?.run()?
        }
    };

    info!(outcome = ?outcome, "Assessment finished");
    Ok(outcome)
}

/// Logs go to stderr so they never interleave with the prompts on stdout
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.as_str().into());

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if logging.json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_assessment_shared::AssessmentError;

    #[test]
    fn test_exit_status_follows_cli_error() {
        let bad_config: anyhow::Error =
            CliError::Config(config::ConfigError::Message("bad".to_string())).into();
        assert_eq!(exit_status(&bad_config), 78);

        let storage = anyhow::Error::from(CliError::from(AssessmentError::Storage(
            "locked".to_string(),
        )))
        .context("Failed to open storage at store.json");
        assert_eq!(exit_status(&storage), 1);

        assert_eq!(exit_status(&anyhow::anyhow!("other")), 1);
    }
}
