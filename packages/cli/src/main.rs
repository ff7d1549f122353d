use std::process::ExitCode;

use anyhow::Context;
use api::auth::FormErrors;
use api::{ApiClient, ApiError, History, Session, Settings, SIGN_IN_PATH};
use clap::Parser;
use store::FileStore;
use tracing_subscriber::EnvFilter;

use commands::Cli;

mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let history = History::new();

    match run(cli, history.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, &history);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, history: History) -> anyhow::Result<()> {
    let mut settings = Settings::new().context("failed to load settings")?;
    if let Some(base_url) = cli.base_url.clone() {
        settings.api.base_url = base_url;
    }

    let session_dir = settings
        .session
        .dir
        .clone()
        .or_else(FileStore::default_dir)
        .context("no data directory for the session; set TASKLY_SESSION__DIR")?;
    tracing::debug!(base_url = %settings.api.base_url, session_dir = %session_dir.display(), "starting");

    let session = Session::new(FileStore::new(session_dir));
    let client = ApiClient::from_settings(&settings, session, history)
        .context("failed to build http client")?;

    commands::run(cli.command, &client).await
}

fn report(error: &anyhow::Error, history: &History) {
    if let Some(api_error) = error.downcast_ref::<ApiError>() {
        eprintln!("{}", api_error.user_message());
        if history.current().as_deref() == Some(SIGN_IN_PATH) {
            eprintln!("Your session has ended. Run `taskly sign-in` to continue.");
        }
    } else if let Some(form_errors) = error.downcast_ref::<FormErrors>() {
        for (field, message) in form_errors.iter() {
            eprintln!("{field}: {message}");
        }
    } else {
        eprintln!("error: {error:#}");
    }
}
