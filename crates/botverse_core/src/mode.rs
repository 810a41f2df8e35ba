//! crates/botverse_core/src/mode.rs
//!
//! The `ModeSwitchGuard`: governs the transition between the "upload" and
//! "scrape" bot-creation modes on the home screen, forcing session teardown
//! before a new bot identity can be created under the other mode.

use crate::session::ChatSession;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// The informational notice surfaced when a mode switch discards an active
/// conversation.
pub const MODE_SWITCH_NOTICE: &str = "Previous conversation saved. Starting fresh!";

/// How long the mode-switch notice stays visible before it self-clears.
pub const NOTICE_CLEAR_DELAY: Duration = Duration::from_secs(3);

/// The two bot-creation modes. No terminal state; the guard toggles
/// indefinitely for the life of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationMode {
    Upload,
    Scrape,
}

impl fmt::Display for CreationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationMode::Upload => f.write_str("upload"),
            CreationMode::Scrape => f.write_str("scrape"),
        }
    }
}

/// A self-expiring informational message.
#[derive(Debug, Clone)]
pub struct TransientNotice {
    text: String,
    shown_at: Instant,
}

impl TransientNotice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the notice should still be rendered.
    pub fn is_visible(&self) -> bool {
        self.shown_at.elapsed() < NOTICE_CLEAR_DELAY
    }
}

/// The outcome of a `switch_to` call.
#[derive(Debug)]
pub enum SwitchOutcome {
    /// The requested mode was already active.
    Unchanged,
    /// The mode changed with nothing to tear down.
    Switched,
    /// The mode changed after resetting an active conversation; the notice
    /// must be surfaced to the user.
    SwitchedWithNotice(TransientNotice),
}

/// Tracks the active creation mode and tears the session down when a switch
/// would abandon an in-progress conversation.
#[derive(Debug)]
pub struct ModeSwitchGuard {
    mode: CreationMode,
}

impl ModeSwitchGuard {
    pub fn new(initial: CreationMode) -> Self {
        Self { mode: initial }
    }

    pub fn mode(&self) -> CreationMode {
        self.mode
    }

    /// Commits a mode transition. If an active bot identity exists and its
    /// transcript is non-empty, the session is reset first and the caller
    /// receives the transient notice to display.
    pub fn switch_to(&mut self, mode: CreationMode, session: &mut ChatSession) -> SwitchOutcome {
        if mode == self.mode {
            return SwitchOutcome::Unchanged;
        }

        if session.bot_id().is_some() && session.has_messages() {
            session.reset();
            self.mode = mode;
            SwitchOutcome::SwitchedWithNotice(TransientNotice::new(MODE_SWITCH_NOTICE))
        } else {
            self.mode = mode;
            SwitchOutcome::Switched
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BotId;

    fn active_session() -> ChatSession {
        let mut session = ChatSession::new();
        session.create(BotId("bot-1".to_string()));
        session.append_user_message("hello").unwrap();
        session.complete_exchange("hi");
        session
    }

    #[test]
    fn switching_to_the_current_mode_is_a_no_op() {
        let mut guard = ModeSwitchGuard::new(CreationMode::Upload);
        let mut session = active_session();

        assert!(matches!(
            guard.switch_to(CreationMode::Upload, &mut session),
            SwitchOutcome::Unchanged
        ));
        assert!(session.has_messages());
        assert_eq!(guard.mode(), CreationMode::Upload);
    }

    #[tokio::test(start_paused = true)]
    async fn switching_with_an_active_conversation_resets_and_notifies() {
        let mut guard = ModeSwitchGuard::new(CreationMode::Upload);
        let mut session = active_session();

        let outcome = guard.switch_to(CreationMode::Scrape, &mut session);
        let notice = match outcome {
            SwitchOutcome::SwitchedWithNotice(notice) => notice,
            other => panic!("expected a notice, got {:?}", other),
        };

        assert_eq!(notice.text(), MODE_SWITCH_NOTICE);
        assert_eq!(guard.mode(), CreationMode::Scrape);
        assert!(session.bot_id().is_none());
        assert!(!session.has_messages());

        assert!(notice.is_visible());
        tokio::time::advance(NOTICE_CLEAR_DELAY).await;
        assert!(!notice.is_visible());
    }

    #[test]
    fn switching_with_an_empty_transcript_is_silent() {
        let mut guard = ModeSwitchGuard::new(CreationMode::Upload);
        let mut session = ChatSession::new();
        session.create(BotId("bot-1".to_string()));

        assert!(matches!(
            guard.switch_to(CreationMode::Scrape, &mut session),
            SwitchOutcome::Switched
        ));
        assert_eq!(guard.mode(), CreationMode::Scrape);
    }

    #[test]
    fn switching_with_no_identity_is_silent() {
        let mut guard = ModeSwitchGuard::new(CreationMode::Scrape);
        let mut session = ChatSession::new();

        assert!(matches!(
            guard.switch_to(CreationMode::Upload, &mut session),
            SwitchOutcome::Switched
        ));
    }
}
