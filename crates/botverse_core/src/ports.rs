//! crates/botverse_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete HTTP client used to reach the
//! Botverse API.

use crate::domain::{BotId, BotSummary, EmbedCode, EmbedTokenRecord, HistoryEntry};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// Transport failures, non-success HTTP statuses, and malformed response
/// bodies all collapse into `Gateway` with one fixed message per operation;
/// the server's own error body is never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("{0}")]
    Gateway(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Gateway Request Payloads
//=========================================================================================

/// A document upload, either creating a new bot or (with `bot_id` and
/// `replace_content`) replacing the content of an existing one.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub bot_name: Option<String>,
    pub bot_id: Option<BotId>,
    pub replace_content: bool,
}

/// A website scrape request, with the same create-or-replace semantics as
/// `DocumentUpload`.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub url: String,
    pub bot_name: Option<String>,
    pub bot_id: Option<BotId>,
    pub replace_content: bool,
}

/// The PUT /bots/{id} payload. Only the name is editable from the client.
#[derive(Debug, Clone, Default)]
pub struct BotUpdate {
    pub name: Option<String>,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The remote API gateway port: one method per Botverse API operation. Every
/// call is a single request/response round trip with no retry, no timeout
/// override, and no backoff.
#[async_trait]
pub trait BotGateway: Send + Sync {
    // --- Bot Creation / Content Ingestion ---
    async fn create_bot_from_document(&self, upload: DocumentUpload) -> PortResult<BotId>;

    async fn create_bot_from_url(&self, scrape: ScrapeRequest) -> PortResult<BotId>;

    // --- Chat ---
    /// Sends one user message keyed to a bot identity and returns the full
    /// answer text.
    async fn send_chat_message(&self, bot_id: &BotId, user_query: &str) -> PortResult<String>;

    // --- Bot Management ---
    async fn list_bots(&self) -> PortResult<Vec<BotSummary>>;

    async fn fetch_chat_history(&self, bot_id: &BotId) -> PortResult<Vec<HistoryEntry>>;

    async fn update_bot(&self, bot_id: &BotId, update: BotUpdate) -> PortResult<BotSummary>;

    async fn delete_bot(&self, bot_id: &BotId) -> PortResult<()>;

    async fn clear_bot_content(&self, bot_id: &BotId) -> PortResult<()>;

    // --- Embed Tokens ---
    async fn generate_embed_code(&self, bot_id: &BotId) -> PortResult<EmbedCode>;

    async fn list_embed_tokens(&self, bot_id: &BotId) -> PortResult<Vec<EmbedTokenRecord>>;

    async fn revoke_embed_token(&self, embed_token: &str) -> PortResult<()>;
}
