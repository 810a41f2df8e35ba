//! services/console/src/adapters/gateway.rs
//!
//! This module contains the HTTP adapter, which is the concrete implementation
//! of the `BotGateway` port from the `core` crate. It handles all interactions
//! with the Botverse REST API using `reqwest`.
//!
//! Every operation is a single round trip: transport failures, non-2xx
//! statuses, and malformed bodies all collapse into one fixed message per
//! operation. No retries, no backoff.

use async_trait::async_trait;
use botverse_core::domain::{BotId, BotSummary, EmbedCode, EmbedTokenRecord, HistoryEntry, Role};
use botverse_core::ports::{
    BotGateway, BotUpdate, DocumentUpload, PortError, PortResult, ScrapeRequest,
};
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::error;

//=========================================================================================
// Fixed Per-Operation Failure Messages
//=========================================================================================
// These are the exact strings surfaced to the user; the server's own error
// body is intentionally discarded.

const UPLOAD_FAILED: &str = "Upload failed";
const SCRAPE_FAILED: &str = "Scrape failed";
const CHAT_FAILED: &str = "Chat failed";
const FETCH_BOTS_FAILED: &str = "Failed to fetch bots";
const FETCH_HISTORY_FAILED: &str = "Failed to fetch chat history";
const UPDATE_BOT_FAILED: &str = "Failed to update bot";
const DELETE_BOT_FAILED: &str = "Failed to delete bot";
const CLEAR_CONTENT_FAILED: &str = "Failed to clear bot content";
const GENERATE_EMBED_FAILED: &str = "Failed to generate embed code";
const FETCH_TOKENS_FAILED: &str = "Failed to fetch embed tokens";
const REVOKE_TOKEN_FAILED: &str = "Failed to revoke embed token";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An HTTP adapter that implements the `BotGateway` port.
#[derive(Clone)]
pub struct HttpBotGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBotGateway {
    /// Creates a new `HttpBotGateway` against the given API base URL.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Collapses a transport failure into the operation's fixed message.
    fn send_err(message: &str) -> impl FnOnce(reqwest::Error) -> PortError + '_ {
        move |e| {
            error!("Request failed: {}", e);
            PortError::Gateway(message.to_string())
        }
    }

    /// Checks the status and decodes the JSON body, collapsing any failure
    /// into the operation's fixed message.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        message: &str,
    ) -> PortResult<T> {
        if !response.status().is_success() {
            error!("Request failed with status {}", response.status());
            return Err(PortError::Gateway(message.to_string()));
        }
        response.json::<T>().await.map_err(|e| {
            error!("Failed to decode response body: {}", e);
            PortError::Gateway(message.to_string())
        })
    }

    /// For operations whose response is only a status object.
    async fn read_status(response: reqwest::Response, message: &str) -> PortResult<()> {
        Self::read_json::<serde_json::Value>(response, message)
            .await
            .map(|_| ())
    }
}

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

/// Bot-creation responses carry the new identity as either `bot_id` or `id`.
#[derive(Deserialize)]
struct CreatedBotRecord {
    bot_id: Option<String>,
    id: Option<String>,
}
impl CreatedBotRecord {
    fn to_domain(self) -> PortResult<BotId> {
        self.bot_id
            .or(self.id)
            .map(BotId)
            .ok_or_else(|| PortError::Unexpected("creation response carried no bot id".to_string()))
    }
}

#[derive(Deserialize)]
struct AnswerRecord {
    answer: String,
}

#[derive(Deserialize)]
struct BotRecord {
    id: String,
    name: Option<String>,
    document_count: Option<u64>,
    chat_count: Option<u64>,
    last_used: Option<DateTime<Utc>>,
}
impl BotRecord {
    fn to_domain(self) -> BotSummary {
        BotSummary {
            id: BotId(self.id),
            name: self.name,
            document_count: self.document_count,
            chat_count: self.chat_count,
            last_used: self.last_used,
        }
    }
}

#[derive(Deserialize)]
struct HistoryRecord {
    role: String,
    message: String,
    created_at: DateTime<Utc>,
}
impl HistoryRecord {
    fn to_domain(self) -> HistoryEntry {
        let role = if self.role == "user" {
            Role::User
        } else {
            Role::Bot
        };
        HistoryEntry {
            role,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

#[derive(Deserialize)]
struct EmbedCodeRecord {
    embed_token: String,
    iframe_code: String,
    js_code: String,
    widget_url: String,
}
impl EmbedCodeRecord {
    fn to_domain(self) -> EmbedCode {
        EmbedCode {
            embed_token: self.embed_token,
            iframe_code: self.iframe_code,
            js_code: self.js_code,
            widget_url: self.widget_url,
        }
    }
}

#[derive(Deserialize)]
struct TokenRecord {
    embed_token: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}
impl TokenRecord {
    fn to_domain(self) -> EmbedTokenRecord {
        EmbedTokenRecord {
            embed_token: self.embed_token,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// Request Body Structs
//=========================================================================================

#[derive(Serialize)]
struct ScrapeBody<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bot_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bot_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replace_content: Option<bool>,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    bot_id: &'a str,
    user_query: &'a str,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct EmbedGenerateBody<'a> {
    bot_id: &'a str,
}

//=========================================================================================
// `BotGateway` Trait Implementation
//=========================================================================================

#[async_trait]
impl BotGateway for HttpBotGateway {
    async fn create_bot_from_document(&self, upload: DocumentUpload) -> PortResult<BotId> {
        let mut form = Form::new().part(
            "file",
            Part::bytes(upload.bytes).file_name(upload.file_name),
        );
        if let Some(bot_name) = upload.bot_name {
            form = form.text("bot_name", bot_name);
        }
        if let Some(bot_id) = upload.bot_id {
            form = form.text("bot_id", bot_id.0);
        }
        if upload.replace_content {
            form = form.text("replace_content", "true");
        }

        let response = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(Self::send_err(UPLOAD_FAILED))?;
        let record: CreatedBotRecord = Self::read_json(response, UPLOAD_FAILED).await?;
        record.to_domain()
    }

    async fn create_bot_from_url(&self, scrape: ScrapeRequest) -> PortResult<BotId> {
        let body = ScrapeBody {
            url: &scrape.url,
            bot_name: scrape.bot_name.as_deref(),
            bot_id: scrape.bot_id.as_ref().map(|id| id.as_str()),
            replace_content: scrape.replace_content.then_some(true),
        };

        let response = self
            .http
            .post(self.url("/scrape"))
            .json(&body)
            .send()
            .await
            .map_err(Self::send_err(SCRAPE_FAILED))?;
        let record: CreatedBotRecord = Self::read_json(response, SCRAPE_FAILED).await?;
        record.to_domain()
    }

    async fn send_chat_message(&self, bot_id: &BotId, user_query: &str) -> PortResult<String> {
        let body = ChatBody {
            bot_id: bot_id.as_str(),
            user_query,
        };

        let response = self
            .http
            .post(self.url("/chat"))
            .json(&body)
            .send()
            .await
            .map_err(Self::send_err(CHAT_FAILED))?;
        let record: AnswerRecord = Self::read_json(response, CHAT_FAILED).await?;
        Ok(record.answer)
    }

    async fn list_bots(&self) -> PortResult<Vec<BotSummary>> {
        let response = self
            .http
            .get(self.url("/bots"))
            .send()
            .await
            .map_err(Self::send_err(FETCH_BOTS_FAILED))?;
        let records: Vec<BotRecord> = Self::read_json(response, FETCH_BOTS_FAILED).await?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn fetch_chat_history(&self, bot_id: &BotId) -> PortResult<Vec<HistoryEntry>> {
        let response = self
            .http
            .get(self.url(&format!("/bots/{}/history", bot_id)))
            .send()
            .await
            .map_err(Self::send_err(FETCH_HISTORY_FAILED))?;
        let records: Vec<HistoryRecord> = Self::read_json(response, FETCH_HISTORY_FAILED).await?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn update_bot(&self, bot_id: &BotId, update: BotUpdate) -> PortResult<BotSummary> {
        let body = UpdateBody {
            name: update.name.as_deref(),
        };

        let response = self
            .http
            .put(self.url(&format!("/bots/{}", bot_id)))
            .json(&body)
            .send()
            .await
            .map_err(Self::send_err(UPDATE_BOT_FAILED))?;
        let record: BotRecord = Self::read_json(response, UPDATE_BOT_FAILED).await?;
        Ok(record.to_domain())
    }

    async fn delete_bot(&self, bot_id: &BotId) -> PortResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/bots/{}", bot_id)))
            .send()
            .await
            .map_err(Self::send_err(DELETE_BOT_FAILED))?;
        Self::read_status(response, DELETE_BOT_FAILED).await
    }

    async fn clear_bot_content(&self, bot_id: &BotId) -> PortResult<()> {
        let response = self
            .http
            .post(self.url(&format!("/bots/{}/clear-content", bot_id)))
            .send()
            .await
            .map_err(Self::send_err(CLEAR_CONTENT_FAILED))?;
        Self::read_status(response, CLEAR_CONTENT_FAILED).await
    }

    async fn generate_embed_code(&self, bot_id: &BotId) -> PortResult<EmbedCode> {
        let body = EmbedGenerateBody {
            bot_id: bot_id.as_str(),
        };

        let response = self
            .http
            .post(self.url("/embed/generate"))
            .json(&body)
            .send()
            .await
            .map_err(Self::send_err(GENERATE_EMBED_FAILED))?;
        let record: EmbedCodeRecord = Self::read_json(response, GENERATE_EMBED_FAILED).await?;
        Ok(record.to_domain())
    }

    async fn list_embed_tokens(&self, bot_id: &BotId) -> PortResult<Vec<EmbedTokenRecord>> {
        let response = self
            .http
            .get(self.url(&format!("/embed/tokens/{}", bot_id)))
            .send()
            .await
            .map_err(Self::send_err(FETCH_TOKENS_FAILED))?;
        let records: Vec<TokenRecord> = Self::read_json(response, FETCH_TOKENS_FAILED).await?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn revoke_embed_token(&self, embed_token: &str) -> PortResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/embed/tokens/{}", embed_token)))
            .send()
            .await
            .map_err(Self::send_err(REVOKE_TOKEN_FAILED))?;
        Self::read_status(response, REVOKE_TOKEN_FAILED).await
    }
}
