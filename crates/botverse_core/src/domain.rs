//! crates/botverse_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any wire format or persistence concern.

use chrono::{DateTime, Utc};
use std::fmt;

/// An opaque, server-assigned token identifying one ingested document's or
/// website's derived chatbot. Created by the ingestion service; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BotId(pub String);

impl BotId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BotId {
    fn from(s: String) -> Self {
        BotId(s)
    }
}

/// The author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// The confirmation state of a transcript entry.
///
/// A user message is appended `Pending` while its answer request is in
/// flight, then either becomes `Confirmed` or is rolled back (removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Pending,
    Confirmed,
}

/// A single message in the session transcript. Insertion order is
/// semantically meaningful: the transcript renders top-to-bottom.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub status: EntryStatus,
}

/// A bot as listed by the management API. Counts and last-use time are
/// optional because older server records may not carry them.
#[derive(Debug, Clone)]
pub struct BotSummary {
    pub id: BotId,
    pub name: Option<String>,
    pub document_count: Option<u64>,
    pub chat_count: Option<u64>,
    pub last_used: Option<DateTime<Utc>>,
}

impl BotSummary {
    /// The display name used throughout the dashboard: the bot's name, or a
    /// short-id fallback like `Bot #1a2b3c4d`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => {
                let id = self.id.as_str();
                let short = &id[..id.len().min(8)];
                format!("Bot #{}", short)
            }
        }
    }
}

/// One persisted exchange row fetched from the server-side chat history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub role: Role,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A freshly generated embed code bundle for one bot.
#[derive(Debug, Clone)]
pub struct EmbedCode {
    pub embed_token: String,
    pub iframe_code: String,
    pub js_code: String,
    pub widget_url: String,
}

/// An embed token as listed by the issuance service. Lifecycle is owned
/// entirely by the server; the client only lists, generates, and revokes.
#[derive(Debug, Clone)]
pub struct EmbedTokenRecord {
    pub embed_token: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
