//! crates/botverse_core/src/presenter.rs
//!
//! Simulates incremental arrival of an already-complete answer string, the
//! way a token stream would read.
//!
//! `present` returns a finite, lazy, non-restartable producer of
//! partial-text snapshots. Each snapshot is the previous snapshot plus one
//! additional whitespace-delimited token, at a fixed 50 ms cadence. The
//! presenter holds no permanent transcript data; on completion the owning
//! controller finalizes the exchange in the `ChatSession`.

use async_stream::stream;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The fixed cadence between revealed tokens.
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(50);

/// An event produced by an in-progress reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// The text revealed so far, one token longer than the last snapshot.
    Snapshot(String),
    /// Emitted exactly once, after the final token. Never emitted if the
    /// reveal was cancelled first.
    Completed,
}

/// A cancellable, in-flight reveal of one answer string.
pub struct Reveal {
    events: Pin<Box<dyn Stream<Item = RevealEvent> + Send>>,
    cancel: CancellationToken,
}

impl Reveal {
    /// Yields the next event, or `None` once the reveal has finished or been
    /// cancelled. After cancellation no further snapshots are emitted and no
    /// completion event fires.
    pub async fn next(&mut self) -> Option<RevealEvent> {
        self.events.next().await
    }

    /// Stops the reveal. The in-progress exchange is dropped, not finalized.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Starts revealing `full_text` token by token.
///
/// An empty answer produces zero snapshots and completes immediately.
/// Concurrent reveals are never started by callers: the owning controller's
/// busy flag keeps chat input disabled while one is in flight.
pub fn present(full_text: &str) -> Reveal {
    let words: Vec<String> = full_text.split_whitespace().map(str::to_string).collect();
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let events = stream! {
        let mut revealed = String::new();
        for word in words {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(REVEAL_INTERVAL) => {}
            }
            if !revealed.is_empty() {
                revealed.push(' ');
            }
            revealed.push_str(&word);
            yield RevealEvent::Snapshot(revealed.clone());
        }
        yield RevealEvent::Completed;
    };

    Reveal {
        events: Box::pin(events),
        cancel,
    }
}

//=========================================================================================
// Tests (paused tokio clock, so the cadence is verified deterministically)
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn empty_answer_completes_with_zero_snapshots() {
        let mut reveal = present("");
        assert_eq!(reveal.next().await, Some(RevealEvent::Completed));
        assert_eq!(reveal.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_one_token_per_interval() {
        let start = tokio::time::Instant::now();
        let mut reveal = present("a b c");

        assert_eq!(
            reveal.next().await,
            Some(RevealEvent::Snapshot("a".to_string()))
        );
        assert_eq!(start.elapsed(), REVEAL_INTERVAL);

        assert_eq!(
            reveal.next().await,
            Some(RevealEvent::Snapshot("a b".to_string()))
        );
        assert_eq!(start.elapsed(), 2 * REVEAL_INTERVAL);

        assert_eq!(
            reveal.next().await,
            Some(RevealEvent::Snapshot("a b c".to_string()))
        );
        assert_eq!(start.elapsed(), 3 * REVEAL_INTERVAL);

        assert_eq!(reveal.next().await, Some(RevealEvent::Completed));
        assert_eq!(reveal.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_the_reveal_without_completion() {
        let mut reveal = present("a b c");
        assert_eq!(
            reveal.next().await,
            Some(RevealEvent::Snapshot("a".to_string()))
        );

        reveal.cancel();
        assert_eq!(reveal.next().await, None);
    }
}
