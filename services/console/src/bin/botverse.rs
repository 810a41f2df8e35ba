//! services/console/src/bin/botverse.rs

use clap::Parser;
use console_lib::{
    adapters::{AuthStore, HttpBotGateway},
    app::{self, cli::Cli, cli::Command, AppState},
    config::Config,
    error::AppError,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- 2. Build the Shared AppState ---
    let auth = AuthStore::new(config.state_path.clone());
    let gateway = Arc::new(HttpBotGateway::new(
        reqwest::Client::new(),
        config.api_base_url.clone(),
    ));
    let state = AppState {
        gateway,
        config: config.clone(),
        auth,
    };

    // --- 3. Dispatch ---
    match cli.command {
        Command::Login { username, password } => app::login(&state, &username, &password),
        Command::Logout => app::logout(&state),
        command => {
            let Some(user) = state.auth.load()? else {
                return Err(AppError::Unauthorized(
                    "Not signed in. Run `botverse login` first.".to_string(),
                ));
            };
            app::run_authenticated(&state, command, &user).await
        }
    }
}
