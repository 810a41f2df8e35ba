//! crates/botverse_core/src/session.rs
//!
//! The chat session: holds the identity of the active bot and the ordered
//! transcript for one interactive chat thread.
//!
//! All mutation is pure in-memory state transition; the rendering layer
//! observes the transcript and the gateway performs the actual exchanges.

use crate::domain::{BotId, EntryStatus, Role, TranscriptEntry};
use chrono::Utc;

/// Returned when an operation requires an active bot identity and none is
/// present. Callers reject the input at the call site before any request.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No active bot. Upload a document or scrape a website first.")]
    NoActiveBot,
}

/// One chat thread tied to one bot identity.
///
/// Invariant: at most one identity is active at a time, and switching
/// identities is atomic from the user's perspective: the old transcript is
/// fully cleared before the new (empty) one is observable.
#[derive(Debug, Default)]
pub struct ChatSession {
    bot_id: Option<BotId>,
    transcript: Vec<TranscriptEntry>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing identity and transcript. Never fails.
    pub fn create(&mut self, bot_id: BotId) {
        self.bot_id = Some(bot_id);
        self.transcript.clear();
    }

    /// Appends a pending user entry stamped with the current instant.
    ///
    /// The entry stays `Pending` until the remote answer arrives; it is then
    /// confirmed by `complete_exchange` or removed by
    /// `rollback_last_user_message`.
    pub fn append_user_message(&mut self, text: &str) -> Result<(), SessionError> {
        if self.bot_id.is_none() {
            return Err(SessionError::NoActiveBot);
        }
        self.transcript.push(TranscriptEntry {
            role: Role::User,
            text: text.to_string(),
            timestamp: Utc::now(),
            status: EntryStatus::Pending,
        });
        Ok(())
    }

    /// Finalizes the optimistically appended user entry and appends the bot
    /// entry carrying the full answer text. Invoked only after a successful
    /// remote answer.
    pub fn complete_exchange(&mut self, answer: &str) {
        if let Some(last) = self
            .transcript
            .iter_mut()
            .rev()
            .find(|e| e.role == Role::User && e.status == EntryStatus::Pending)
        {
            last.status = EntryStatus::Confirmed;
        }
        self.transcript.push(TranscriptEntry {
            role: Role::Bot,
            text: answer.to_string(),
            timestamp: Utc::now(),
            status: EntryStatus::Confirmed,
        });
    }

    /// Removes the most recently appended pending user entry, so the
    /// transcript never shows an unanswered message as if it succeeded.
    pub fn rollback_last_user_message(&mut self) {
        if let Some(pos) = self
            .transcript
            .iter()
            .rposition(|e| e.role == Role::User && e.status == EntryStatus::Pending)
        {
            self.transcript.remove(pos);
        }
    }

    /// Clears identity and transcript. Invoked on mode switch or an explicit
    /// "start fresh" action.
    pub fn reset(&mut self) {
        self.bot_id = None;
        self.transcript.clear();
    }

    pub fn bot_id(&self) -> Option<&BotId> {
        self.bot_id.as_ref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn has_messages(&self) -> bool {
        !self.transcript.is_empty()
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_bot(id: &str) -> ChatSession {
        let mut session = ChatSession::new();
        session.create(BotId(id.to_string()));
        session
    }

    #[test]
    fn append_requires_an_active_bot() {
        let mut session = ChatSession::new();
        assert_eq!(
            session.append_user_message("hello"),
            Err(SessionError::NoActiveBot)
        );
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn rollback_is_the_inverse_of_append() {
        let mut session = session_with_bot("bot-1");
        session.append_user_message("first").unwrap();
        session.complete_exchange("answer");

        let before: Vec<String> = session.transcript().iter().map(|e| e.text.clone()).collect();

        session.append_user_message("second").unwrap();
        session.rollback_last_user_message();

        let after: Vec<String> = session.transcript().iter().map(|e| e.text.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rollback_never_removes_confirmed_entries() {
        let mut session = session_with_bot("bot-1");
        session.append_user_message("question").unwrap();
        session.complete_exchange("answer");

        session.rollback_last_user_message();
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn create_always_yields_an_empty_transcript() {
        let mut session = session_with_bot("bot-1");
        session.append_user_message("question").unwrap();
        session.complete_exchange("answer");
        assert!(session.has_messages());

        session.create(BotId("bot-2".to_string()));
        assert_eq!(session.bot_id(), Some(&BotId("bot-2".to_string())));
        assert!(!session.has_messages());
    }

    #[test]
    fn complete_exchange_confirms_the_pending_entry() {
        let mut session = session_with_bot("bot-1");
        session.append_user_message("What is this?").unwrap();
        session.complete_exchange("A summary.");

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[0].text, "What is this?");
        assert_eq!(transcript[0].status, EntryStatus::Confirmed);
        assert_eq!(transcript[1].role, Role::Bot);
        assert_eq!(transcript[1].text, "A summary.");
        assert_eq!(transcript[1].status, EntryStatus::Confirmed);
    }

    #[test]
    fn reset_clears_identity_and_transcript() {
        let mut session = session_with_bot("bot-1");
        session.append_user_message("question").unwrap();
        session.reset();
        assert!(session.bot_id().is_none());
        assert!(!session.has_messages());
    }
}
