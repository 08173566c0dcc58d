//! Live queries: subscription handles that re-emit on data change.

use puzzle_core::{Level, Puzzle};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::error::StoreError;
use crate::events::StoreChange;
use crate::worker::Command;

/// Which listing a live query keeps current.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LiveSpec {
    AtLevel { level: Level, hide_completed: bool },
    Bookmarked,
    Completed,
}

impl LiveSpec {
    fn command(self, reply: oneshot::Sender<crate::Result<Vec<Puzzle>>>) -> Command {
        match self {
            LiveSpec::AtLevel {
                level,
                hide_completed,
            } => Command::GetPuzzlesAtLevel {
                level,
                hide_completed,
                reply,
            },
            LiveSpec::Bookmarked => Command::GetBookmarked { reply },
            LiveSpec::Completed => Command::GetCompleted { reply },
        }
    }
}

/// Subscription handle for a live listing.
///
/// The first snapshot is emitted immediately on subscription; a fresh
/// snapshot follows every committed write. Dropping the handle cancels the
/// subscription and stops the backing task.
pub struct LiveQuery<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> LiveQuery<T> {
    /// Next snapshot, or `None` once the store worker has gone away.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

/// Spawns the per-subscription task that keeps a listing current.
pub(crate) fn spawn_live(
    command_tx: mpsc::Sender<Command>,
    change_rx: broadcast::Receiver<StoreChange>,
    spec: LiveSpec,
) -> LiveQuery<Vec<Puzzle>> {
    let (snapshot_tx, snapshot_rx) = mpsc::channel(8);
    tokio::spawn(run(command_tx, change_rx, spec, snapshot_tx));
    LiveQuery { rx: snapshot_rx }
}

async fn run(
    command_tx: mpsc::Sender<Command>,
    mut change_rx: broadcast::Receiver<StoreChange>,
    spec: LiveSpec,
    snapshot_tx: mpsc::Sender<Vec<Puzzle>>,
) {
    loop {
        match snapshot(&command_tx, spec).await {
            Ok(puzzles) => {
                if snapshot_tx.send(puzzles).await.is_err() {
                    // Subscriber dropped its handle.
                    break;
                }
            }
            Err(StoreError::WorkerGone) => break,
            Err(error) => {
                tracing::warn!(%error, "live query snapshot failed");
                break;
            }
        }

        // Wait for the next committed write. Lagging only means skipped
        // notifications; the snapshot we take afterwards is current.
        match change_rx.recv().await {
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::trace!(skipped, "live query lagged behind change bus");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn snapshot(
    command_tx: &mpsc::Sender<Command>,
    spec: LiveSpec,
) -> crate::Result<Vec<Puzzle>> {
    let (reply_tx, reply_rx) = oneshot::channel();
    command_tx
        .send(spec.command(reply_tx))
        .await
        .map_err(|_| StoreError::WorkerGone)?;
    reply_rx.await.map_err(StoreError::ReplyDropped)?
}
