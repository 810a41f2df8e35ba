//! services/console/src/app/dashboard.rs
//!
//! The bot-management screens: listing with usage stats, persisted history,
//! the admin test chat, rename, delete, clear-content, and the
//! replace-existing-content update.

use crate::app::state::AppState;
use crate::error::AppError;
use botverse_core::domain::{BotId, BotSummary, HistoryEntry, Role};
use botverse_core::ports::{BotUpdate, DocumentUpload, ScrapeRequest};
use chrono::{DateTime, Local, Utc};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

//=========================================================================================
// Stats
//=========================================================================================

/// The stats header of the dashboard.
#[derive(Debug, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_bots: usize,
    pub total_chats: u64,
    pub active_today: usize,
}

impl DashboardStats {
    /// Derives the stats from a bot listing. "Active today" means the bot's
    /// last use falls on the same calendar day as `now`.
    pub fn from_bots(bots: &[BotSummary], now: DateTime<Utc>) -> Self {
        Self {
            total_bots: bots.len(),
            total_chats: bots.iter().filter_map(|b| b.chat_count).sum(),
            active_today: bots
                .iter()
                .filter(|b| {
                    b.last_used
                        .map_or(false, |t| t.date_naive() == now.date_naive())
                })
                .count(),
        }
    }
}

//=========================================================================================
// Screens
//=========================================================================================

pub async fn list_bots(state: &AppState, user: &str) -> Result<(), AppError> {
    println!("Welcome back, {}!", user);
    let bots = state.gateway.list_bots().await?;

    if bots.is_empty() {
        println!("No bots created yet.");
        println!("Create your first bot by uploading a document or scraping a website.");
        return Ok(());
    }

    for bot in &bots {
        println!(
            "{:<38} {:<24} {} documents \u{2022} {} chats",
            bot.id,
            bot.display_name(),
            bot.document_count.unwrap_or(0),
            bot.chat_count.unwrap_or(0)
        );
    }

    let stats = DashboardStats::from_bots(&bots, Utc::now());
    println!(
        "Total bots: {} | Total chats: {} | Active today: {}",
        stats.total_bots, stats.total_chats, stats.active_today
    );
    Ok(())
}

pub async fn history(state: &AppState, bot_id: &str) -> Result<(), AppError> {
    let bot_id = BotId(bot_id.to_string());
    // A missing history degrades to an empty one, as on the dashboard.
    let entries = state
        .gateway
        .fetch_chat_history(&bot_id)
        .await
        .unwrap_or_default();
    render_history(&entries);
    Ok(())
}

/// The admin test harness: line-in/answer-out exchanges against an existing
/// bot. Answers are appended directly, with no simulated streaming.
pub async fn chat(state: &AppState, bot_id: &str) -> Result<(), AppError> {
    let bot_id = BotId(bot_id.to_string());
    let entries = state
        .gateway
        .fetch_chat_history(&bot_id)
        .await
        .unwrap_or_default();
    render_history(&entries);
    println!("Type a message (/quit or an empty line to exit).");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("admin> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() || line == "/quit" {
            break;
        }
        match state.gateway.send_chat_message(&bot_id, line).await {
            Ok(answer) => println!("bot: {}", answer),
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}

pub async fn rename(state: &AppState, bot_id: &str, name: String) -> Result<(), AppError> {
    let bot_id = BotId(bot_id.to_string());
    let bot = state
        .gateway
        .update_bot(&bot_id, BotUpdate { name: Some(name) })
        .await?;
    println!("Renamed to {}.", bot.display_name());
    Ok(())
}

pub async fn delete(state: &AppState, bot_id: &str, yes: bool) -> Result<(), AppError> {
    let bot_id = BotId(bot_id.to_string());
    let name = display_name_for(state, &bot_id).await;
    let prompt = format!(
        "Are you sure you want to delete \"{}\"? This action cannot be undone.",
        name
    );
    if !yes && !confirm(&prompt).await? {
        println!("Cancelled.");
        return Ok(());
    }

    state.gateway.delete_bot(&bot_id).await?;
    info!("Deleted bot {}", bot_id);
    println!("Deleted {}.", name);
    Ok(())
}

pub async fn clear_content(state: &AppState, bot_id: &str, yes: bool) -> Result<(), AppError> {
    let bot_id = BotId(bot_id.to_string());
    let name = display_name_for(state, &bot_id).await;
    let prompt = format!(
        "Are you sure you want to clear all content from \"{}\"? The bot will remain but all documents and training data will be removed.",
        name
    );
    if !yes && !confirm(&prompt).await? {
        println!("Cancelled.");
        return Ok(());
    }

    state.gateway.clear_bot_content(&bot_id).await?;
    info!("Cleared content for bot {}", bot_id);
    println!("Cleared content from {}.", name);
    Ok(())
}

/// Replaces a bot's entire content from a document or a URL. The missing
/// source is caught client-side before any request is issued.
pub async fn update(
    state: &AppState,
    bot_id: &str,
    file: Option<PathBuf>,
    url: Option<String>,
) -> Result<(), AppError> {
    let bot_id = BotId(bot_id.to_string());
    match (file, url) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "Pass either --file or --url, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(AppError::Validation(
                "Please select a file to upload or enter a URL to scrape".to_string(),
            ))
        }
        (Some(path), None) => {
            let bytes = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "untitled.txt".to_string());
            state
                .gateway
                .create_bot_from_document(DocumentUpload {
                    file_name,
                    bytes,
                    bot_name: None,
                    bot_id: Some(bot_id.clone()),
                    replace_content: true,
                })
                .await?;
        }
        (None, Some(url)) => {
            state
                .gateway
                .create_bot_from_url(ScrapeRequest {
                    url,
                    bot_name: None,
                    bot_id: Some(bot_id.clone()),
                    replace_content: true,
                })
                .await?;
        }
    }
    info!("Replaced content for bot {}", bot_id);
    println!("Bot content replaced.");
    Ok(())
}

//=========================================================================================
// Helpers
//=========================================================================================

fn render_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No conversation history");
        return;
    }
    for entry in entries {
        let who = match entry.role {
            Role::User => "Admin",
            Role::Bot => "Bot",
        };
        let when = entry
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");
        println!("[{}] {}: {}", when, who, entry.message);
    }
}

/// The name used in confirmation prompts; falls back to the short-id form
/// if the listing is unavailable or the bot is unknown.
async fn display_name_for(state: &AppState, bot_id: &BotId) -> String {
    let fallback = BotSummary {
        id: bot_id.clone(),
        name: None,
        document_count: None,
        chat_count: None,
        last_used: None,
    }
    .display_name();

    match state.gateway.list_bots().await {
        Ok(bots) => bots
            .into_iter()
            .find(|b| &b.id == bot_id)
            .map(|b| b.display_name())
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}

async fn confirm(prompt: &str) -> std::io::Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bot(id: &str, chats: Option<u64>, last_used: Option<DateTime<Utc>>) -> BotSummary {
        BotSummary {
            id: BotId(id.to_string()),
            name: None,
            document_count: Some(1),
            chat_count: chats,
            last_used,
        }
    }

    #[test]
    fn stats_sum_chats_and_count_todays_bots() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2024, 5, 20, 8, 30, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2024, 5, 19, 23, 59, 0).unwrap();

        let bots = vec![
            bot("a", Some(3), Some(today)),
            bot("b", Some(4), Some(yesterday)),
            bot("c", None, None),
        ];

        assert_eq!(
            DashboardStats::from_bots(&bots, now),
            DashboardStats {
                total_bots: 3,
                total_chats: 7,
                active_today: 1,
            }
        );
    }

    #[test]
    fn unnamed_bots_fall_back_to_a_short_id() {
        let bot = bot("1a2b3c4d5e6f", None, None);
        assert_eq!(bot.display_name(), "Bot #1a2b3c4d");
    }
}
