//! services/console/src/app/home.rs
//!
//! The landing-page flow: create a bot from a document or a website, then
//! chat with it. This is the one screen with real client-side state: the
//! chat session, the streaming reveal, and the creation-mode guard all live
//! behind it.

use crate::error::AppError;
use botverse_core::domain::{BotId, Role};
use botverse_core::mode::{CreationMode, ModeSwitchGuard, SwitchOutcome, TransientNotice};
use botverse_core::ports::{BotGateway, DocumentUpload, ScrapeRequest};
use botverse_core::presenter::{present, RevealEvent};
use botverse_core::session::{ChatSession, SessionError};
use chrono::Local;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Shown once a bot identity has been created and chat is available.
const CONTENT_READY: &str = "Content processed successfully! You can now chat below.";

/// Drives one interactive home session: a single bot identity, its
/// transcript, and the upload/scrape creation modes.
pub struct HomeController {
    gateway: Arc<dyn BotGateway>,
    session: ChatSession,
    guard: ModeSwitchGuard,
    notice: Option<TransientNotice>,
    /// The sole concurrency guard: chat input is rejected while a request or
    /// a streaming reveal is in flight.
    busy: bool,
}

impl HomeController {
    pub fn new(gateway: Arc<dyn BotGateway>) -> Self {
        Self {
            gateway,
            session: ChatSession::new(),
            guard: ModeSwitchGuard::new(CreationMode::Upload),
            notice: None,
            busy: false,
        }
    }

    /// The interactive read-eval loop.
    pub async fn run(&mut self) -> Result<(), AppError> {
        println!("Botverse: transform your documents and websites into chatbots.");
        println!(
            "Commands: /upload <path> [name], /scrape <url> [name], /mode <upload|scrape>, /history, /reset, /quit."
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if let Some(notice) = &self.notice {
                if notice.is_visible() {
                    println!("* {}", notice.text());
                } else {
                    self.notice = None;
                }
            }

            let prompt = if self.session.bot_id().is_some() {
                "chat> ".to_string()
            } else {
                format!("{}> ", self.guard.mode())
            };
            print!("{}", prompt);
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            if line == "/quit" {
                break;
            } else if line == "/reset" {
                self.session.reset();
                println!("Session cleared.");
            } else if line == "/history" {
                self.render_transcript();
            } else if let Some(rest) = line.strip_prefix("/mode") {
                match rest.trim() {
                    "upload" => self.switch_mode(CreationMode::Upload),
                    "scrape" => self.switch_mode(CreationMode::Scrape),
                    other => println!("Unknown mode '{}'. Use upload or scrape.", other),
                }
            } else if let Some(rest) = line.strip_prefix("/upload") {
                self.handle_upload(rest.trim()).await;
            } else if let Some(rest) = line.strip_prefix("/scrape") {
                self.handle_scrape(rest.trim()).await;
            } else if line.starts_with('/') {
                println!("Unknown command: {}", line);
            } else {
                self.chat(&line).await;
            }
        }
        Ok(())
    }

    //=====================================================================================
    // Bot Creation
    //=====================================================================================

    async fn handle_upload(&mut self, args: &str) {
        if self.guard.mode() != CreationMode::Upload {
            println!("Switch to upload mode first (/mode upload).");
            return;
        }
        let mut parts = args.splitn(2, ' ');
        let Some(path) = parts.next().filter(|p| !p.is_empty()) else {
            println!("Usage: /upload <path> [name]");
            return;
        };
        let bot_name = parts.next().map(|n| n.trim().to_string());

        let path = Path::new(path);
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("Could not read {}: {}", path.display(), e);
                return;
            }
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled.txt".to_string());

        match self.create_from_document(&file_name, bytes, bot_name).await {
            Ok(()) => println!("{}", CONTENT_READY),
            Err(e) => println!("{}", e),
        }
    }

    async fn handle_scrape(&mut self, args: &str) {
        if self.guard.mode() != CreationMode::Scrape {
            println!("Switch to scrape mode first (/mode scrape).");
            return;
        }
        let mut parts = args.splitn(2, ' ');
        let Some(url) = parts.next().filter(|u| !u.is_empty()) else {
            println!("Usage: /scrape <url> [name]");
            return;
        };
        let url = url.to_string();
        let bot_name = parts.next().map(|n| n.trim().to_string());

        match self.create_from_url(&url, bot_name).await {
            Ok(()) => println!("{}", CONTENT_READY),
            Err(e) => println!("{}", e),
        }
    }

    /// Creates a fresh bot from an uploaded document. The current chat is
    /// cleared before the request goes out, as on the original page.
    async fn create_from_document(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
        bot_name: Option<String>,
    ) -> Result<(), AppError> {
        self.session.reset();
        let bot_id = self
            .gateway
            .create_bot_from_document(DocumentUpload {
                file_name: file_name.to_string(),
                bytes,
                bot_name,
                bot_id: None,
                replace_content: false,
            })
            .await?;
        info!("Created bot {} from document {}", bot_id, file_name);
        self.session.create(bot_id);
        Ok(())
    }

    /// Creates a fresh bot from a scraped website.
    async fn create_from_url(
        &mut self,
        url: &str,
        bot_name: Option<String>,
    ) -> Result<(), AppError> {
        self.session.reset();
        let bot_id = self
            .gateway
            .create_bot_from_url(ScrapeRequest {
                url: url.to_string(),
                bot_name,
                bot_id: None,
                replace_content: false,
            })
            .await?;
        info!("Created bot {} from {}", bot_id, url);
        self.session.create(bot_id);
        Ok(())
    }

    //=====================================================================================
    // Chat Exchange
    //=====================================================================================

    /// Optimistically appends the user message and requests the answer.
    /// On failure the pending entry is rolled back, so the transcript only
    /// ever shows confirmed exchanges. On success the caller drives the
    /// reveal and then calls `finalize_exchange`; the busy flag stays set
    /// until then.
    async fn begin_exchange(&mut self, text: &str) -> Result<String, AppError> {
        if self.busy {
            return Err(AppError::Internal(
                "a chat exchange is already in progress".to_string(),
            ));
        }
        let bot_id = match self.session.bot_id().cloned() {
            Some(id) => id,
            None => return Err(SessionError::NoActiveBot.into()),
        };

        self.session.append_user_message(text)?;
        self.busy = true;

        match self.gateway.send_chat_message(&bot_id, text).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                self.session.rollback_last_user_message();
                self.busy = false;
                Err(e.into())
            }
        }
    }

    /// Commits the revealed answer to the transcript and reopens the input.
    fn finalize_exchange(&mut self, answer: &str) {
        self.session.complete_exchange(answer);
        self.busy = false;
    }

    async fn chat(&mut self, text: &str) {
        let answer = match self.begin_exchange(text).await {
            Ok(answer) => answer,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        let mut reveal = present(&answer);
        let mut printed = 0;
        let mut completed = false;
        print!("bot: ");
        std::io::stdout().flush().ok();

        while let Some(event) = reveal.next().await {
            match event {
                RevealEvent::Snapshot(snapshot) => {
                    print!("{}", &snapshot[printed..]);
                    std::io::stdout().flush().ok();
                    printed = snapshot.len();
                }
                RevealEvent::Completed => {
                    println!();
                    self.finalize_exchange(&answer);
                    completed = true;
                }
            }
        }
        if !completed {
            // reveal torn down mid-flight: the exchange is dropped
            self.busy = false;
        }
    }

    //=====================================================================================
    // Rendering and Mode Switching
    //=====================================================================================

    fn switch_mode(&mut self, target: CreationMode) {
        match self.guard.switch_to(target, &mut self.session) {
            SwitchOutcome::Unchanged => println!("Already in {} mode.", target),
            SwitchOutcome::Switched => println!("Now in {} mode.", target),
            SwitchOutcome::SwitchedWithNotice(notice) => {
                println!("* {}", notice.text());
                self.notice = Some(notice);
                println!("Now in {} mode.", target);
            }
        }
    }

    fn render_transcript(&self) {
        if !self.session.has_messages() {
            println!("No messages yet.");
            return;
        }
        for entry in self.session.transcript() {
            let who = match entry.role {
                Role::User => "you",
                Role::Bot => "bot",
            };
            let when = entry.timestamp.with_timezone(&Local).format("%H:%M");
            println!("[{}] {}: {}", when, who, entry.text);
        }
    }

    #[cfg(test)]
    fn session(&self) -> &ChatSession {
        &self.session
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use botverse_core::domain::{BotSummary, EmbedCode, EmbedTokenRecord, HistoryEntry};
    use botverse_core::ports::{BotUpdate, PortError, PortResult};

    /// A gateway whose chat behavior is scripted; every other operation is
    /// out of scope for the home screen.
    struct ScriptedGateway {
        answer: String,
        fail_chat: bool,
    }

    impl ScriptedGateway {
        fn answering(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.to_string(),
                fail_chat: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: String::new(),
                fail_chat: true,
            })
        }
    }

    #[async_trait]
    impl BotGateway for ScriptedGateway {
        async fn create_bot_from_document(&self, _upload: DocumentUpload) -> PortResult<BotId> {
            Ok(BotId("bot-1".to_string()))
        }

        async fn create_bot_from_url(&self, _scrape: ScrapeRequest) -> PortResult<BotId> {
            Ok(BotId("bot-1".to_string()))
        }

        async fn send_chat_message(
            &self,
            _bot_id: &BotId,
            _user_query: &str,
        ) -> PortResult<String> {
            if self.fail_chat {
                Err(PortError::Gateway("Chat failed".to_string()))
            } else {
                Ok(self.answer.clone())
            }
        }

        async fn list_bots(&self) -> PortResult<Vec<BotSummary>> {
            Ok(Vec::new())
        }

        async fn fetch_chat_history(&self, _bot_id: &BotId) -> PortResult<Vec<HistoryEntry>> {
            Ok(Vec::new())
        }

        async fn update_bot(&self, _bot_id: &BotId, _update: BotUpdate) -> PortResult<BotSummary> {
            Err(PortError::Unexpected("not scripted".to_string()))
        }

        async fn delete_bot(&self, _bot_id: &BotId) -> PortResult<()> {
            Ok(())
        }

        async fn clear_bot_content(&self, _bot_id: &BotId) -> PortResult<()> {
            Ok(())
        }

        async fn generate_embed_code(&self, _bot_id: &BotId) -> PortResult<EmbedCode> {
            Err(PortError::Unexpected("not scripted".to_string()))
        }

        async fn list_embed_tokens(&self, _bot_id: &BotId) -> PortResult<Vec<EmbedTokenRecord>> {
            Ok(Vec::new())
        }

        async fn revoke_embed_token(&self, _embed_token: &str) -> PortResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn upload_then_chat_confirms_both_entries() {
        let mut home = HomeController::new(ScriptedGateway::answering("A summary."));

        home.create_from_document("notes.txt", b"some text".to_vec(), None)
            .await
            .unwrap();
        assert_eq!(
            home.session().bot_id(),
            Some(&BotId("bot-1".to_string()))
        );
        assert!(!home.session().has_messages());

        let answer = home.begin_exchange("What is this?").await.unwrap();
        assert_eq!(answer, "A summary.");
        home.finalize_exchange(&answer);

        let transcript = home.session().transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[0].text, "What is this?");
        assert_eq!(transcript[1].role, Role::Bot);
        assert_eq!(transcript[1].text, "A summary.");
        assert!(!home.busy);
    }

    #[tokio::test]
    async fn a_failed_send_rolls_back_the_optimistic_entry() {
        let mut home = HomeController::new(ScriptedGateway::failing());
        home.create_from_url("https://example.com", None).await.unwrap();

        let err = home.begin_exchange("hello?").await.unwrap_err();
        assert_eq!(err.to_string(), "Chat failed");
        assert!(!home.session().has_messages());
        assert!(!home.busy);
    }

    #[tokio::test]
    async fn chat_without_an_active_bot_is_rejected() {
        let mut home = HomeController::new(ScriptedGateway::answering("unused"));
        let err = home.begin_exchange("hello?").await.unwrap_err();
        assert!(err.to_string().contains("No active bot"));
    }
}
