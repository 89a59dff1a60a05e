//! Delayed delivery of computer replies.

use tictactoe_engine::PendingReply;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Holds at most one scheduled computer reply.
///
/// A scheduled ticket is sent back on an internal channel once its delay
/// elapses. Scheduling again, or calling [`ReplyScheduler::cancel`], aborts
/// the previous timer. A ticket that still slips through is caught by the
/// engine's generation check.
#[derive(Debug)]
pub struct ReplyScheduler {
    tx: mpsc::UnboundedSender<PendingReply>,
    rx: mpsc::UnboundedReceiver<PendingReply>,
    in_flight: Option<JoinHandle<()>>,
}

impl ReplyScheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            in_flight: None,
        }
    }

    /// Starts the timer for `ticket`, replacing any earlier one.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self), fields(generation = ticket.generation(), delay_ms = ticket.delay().as_millis() as u64))]
    pub fn schedule(&mut self, ticket: PendingReply) {
        self.cancel();
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            sleep(ticket.delay()).await;
            // Fails only once the scheduler has been dropped.
            let _ = tx.send(ticket);
        }));
    }

    /// Aborts the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!("Cancelling scheduled computer reply");
            handle.abort();
        }
    }

    /// True while a timer has been started and its ticket not yet collected.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Waits for the next ticket whose delay has elapsed.
    pub async fn next_due(&mut self) -> Option<PendingReply> {
        let ticket = self.rx.recv().await;
        self.in_flight = None;
        ticket
    }
}

impl Default for ReplyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tictactoe_engine::{GameConfiguration, GameEngine, Mark, OpponentMode, Position, ReplyPacing};
    use tokio::time::timeout;

    fn ticket(delay_ms: u64) -> PendingReply {
        let config = GameConfiguration::new(OpponentMode::VsComputer)
            .with_pacing(ReplyPacing::Deferred(Duration::from_millis(delay_ms)));
        let mut engine = GameEngine::with_seed(config, 0);
        engine.apply_move(Position::TopLeft, Mark::X).unwrap();
        engine.pending_reply().unwrap()
    }

    #[tokio::test]
    async fn test_ticket_delivered_after_delay() {
        let mut scheduler = ReplyScheduler::new();
        let t = ticket(10);
        scheduler.schedule(t);
        assert!(scheduler.is_pending());

        let due = timeout(Duration::from_secs(2), scheduler.next_due()).await.unwrap();
        assert_eq!(due, Some(t));
        assert!(!scheduler.is_pending());
    }

    #[tokio::test]
    async fn test_delivered_ticket_is_stale_after_reset() {
        let config = GameConfiguration::new(OpponentMode::VsComputer)
            .with_pacing(ReplyPacing::Deferred(Duration::from_millis(5)));
        let mut engine = GameEngine::with_seed(config, 0);
        engine.apply_move(Position::TopLeft, Mark::X).unwrap();

        let mut scheduler = ReplyScheduler::new();
        let t = engine.pending_reply().unwrap();
        scheduler.schedule(t);
        // Let the timer fire so the ticket is already queued.
        sleep(Duration::from_millis(50)).await;

        scheduler.cancel();
        engine.reset_game();

        let due = timeout(Duration::from_secs(2), scheduler.next_due()).await.unwrap();
        assert_eq!(due, Some(t));
        assert_eq!(engine.play_pending(t), Ok(None));
        assert_eq!(engine.board().count(Mark::O), 0);
    }

    #[tokio::test]
    async fn test_cancelled_ticket_never_arrives() {
        let mut scheduler = ReplyScheduler::new();
        scheduler.schedule(ticket(20));
        scheduler.cancel();
        assert!(!scheduler.is_pending());

        let due = timeout(Duration::from_millis(200), scheduler.next_due()).await;
        assert!(due.is_err(), "cancelled reply was delivered");
    }
}
