use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lms_client::cli::{Cli, CliHandler};
use lms_client::config::AppConfig;
use lms_client::error::AppError;
use lms_client::lms::LmsHttpClient;
use lms_client::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "lms_client=debug"
    } else {
        "lms_client=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("command failed: {}", e);
            eprintln!("{}", e.status_text());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::new_from_env()?;
    let db = lms_client::db::connect(&config.database_url).await?;
    let api = Arc::new(LmsHttpClient::new(config.timeout_secs)?);

    let state = AppState {
        db,
        api,
        config: config.clone(),
    };
    let session = state.auth().restore(&config.base_url).await?;

    let mut handler = CliHandler::new(state, session);
    handler.execute(cli.command).await
}
