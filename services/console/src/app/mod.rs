//! services/console/src/app/mod.rs
//!
//! The application layer: the CLI surface, the shared state, and one module
//! per screen of the console.

pub mod cli;
pub mod dashboard;
pub mod embed;
pub mod home;
pub mod state;

pub use state::AppState;

use crate::adapters::verify_credentials;
use crate::app::cli::{Command, EmbedCommand};
use crate::error::AppError;
use tracing::info;

/// Checks the entered credentials and persists the signed-in state.
pub fn login(state: &AppState, username: &str, password: &str) -> Result<(), AppError> {
    if !verify_credentials(&state.config, username, password) {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }
    state.auth.login(username)?;
    info!("Signed in as {}", username);
    println!("Signed in as {}.", username);
    Ok(())
}

pub fn logout(state: &AppState) -> Result<(), AppError> {
    state.auth.logout()?;
    println!("Signed out.");
    Ok(())
}

/// Dispatches a command that requires a signed-in user.
pub async fn run_authenticated(
    state: &AppState,
    command: Command,
    user: &str,
) -> Result<(), AppError> {
    match command {
        Command::Login { .. } | Command::Logout => Err(AppError::Internal(
            "login and logout are dispatched before the auth gate".to_string(),
        )),
        Command::Home => {
            let mut home = home::HomeController::new(state.gateway.clone());
            home.run().await
        }
        Command::Bots => dashboard::list_bots(state, user).await,
        Command::History { bot_id } => dashboard::history(state, &bot_id).await,
        Command::Chat { bot_id } => dashboard::chat(state, &bot_id).await,
        Command::Rename { bot_id, name } => dashboard::rename(state, &bot_id, name).await,
        Command::Delete { bot_id, yes } => dashboard::delete(state, &bot_id, yes).await,
        Command::ClearContent { bot_id, yes } => {
            dashboard::clear_content(state, &bot_id, yes).await
        }
        Command::Update { bot_id, file, url } => {
            dashboard::update(state, &bot_id, file, url).await
        }
        Command::Embed(embed) => match embed {
            EmbedCommand::Generate { bot_id } => embed::generate(state, &bot_id).await,
            EmbedCommand::Tokens { bot_id, show_code } => {
                embed::tokens(state, &bot_id, show_code).await
            }
            EmbedCommand::Revoke { token } => embed::revoke(state, &token).await,
        },
    }
}
