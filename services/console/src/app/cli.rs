//! services/console/src/app/cli.rs
//!
//! The command-line surface of the console. One subcommand per screen of the
//! original dashboard, plus the interactive home session.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "botverse",
    about = "Admin console and chat harness for the Botverse API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with the admin credentials
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Interactive bot creation and chat (the landing page)
    Home,
    /// List bots with usage stats
    Bots,
    /// Print a bot's persisted chat history
    History { bot_id: String },
    /// Interactive test chat against an existing bot
    Chat { bot_id: String },
    /// Rename a bot
    Rename { bot_id: String, name: String },
    /// Delete a bot
    Delete {
        bot_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Remove all ingested content from a bot, keeping the bot itself
    ClearContent {
        bot_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Replace a bot's content from a document or a URL
    Update {
        bot_id: String,
        /// Document to upload as the replacement content
        #[arg(long)]
        file: Option<PathBuf>,
        /// Website to scrape as the replacement content
        #[arg(long)]
        url: Option<String>,
    },
    /// Embed widget management
    #[command(subcommand)]
    Embed(EmbedCommand),
}

#[derive(Subcommand, Debug)]
pub enum EmbedCommand {
    /// Generate a new embed token and code bundle
    Generate { bot_id: String },
    /// List embed tokens for a bot
    Tokens {
        bot_id: String,
        /// Also print the embed codes for each active token
        #[arg(long)]
        show_code: bool,
    },
    /// Revoke an embed token
    Revoke { token: String },
}
