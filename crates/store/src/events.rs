//! Change notifications published after successful writes.

use tokio::sync::broadcast;

/// A committed mutation of the puzzle store.
///
/// Payloads identify what changed for diagnostics; live queries treat every
/// variant the same and re-run their snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// One or more play states were overwritten.
    Saved { count: usize },
    /// A single bookmark flag was toggled.
    Bookmark { set: bool },
    /// Every bookmark flag was cleared.
    BookmarksCleared { count: usize },
    /// Rows were inserted by seeding.
    Seeded { count: usize },
}

/// Broadcast bus for [`StoreChange`] notifications.
///
/// Publication is best-effort: with no subscribers an event is simply
/// dropped. Slow subscribers may observe `Lagged` and should re-run their
/// query rather than replay missed events.
#[derive(Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<StoreChange>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a committed change to all subscribers.
    pub fn publish(&self, change: StoreChange) {
        if self.tx.send(change).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!(?change, "no subscribers for store change");
        }
    }

    /// Subscribe to all future changes.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.tx.subscribe()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_changes() {
        let bus = ChangeBus::default();
        let mut rx = bus.subscribe();

        bus.publish(StoreChange::Saved { count: 1 });
        assert_eq!(rx.recv().await.unwrap(), StoreChange::Saved { count: 1 });
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = ChangeBus::default();
        bus.publish(StoreChange::BookmarksCleared { count: 0 });
    }
}
