//! Cloneable facade for issuing operations against the puzzle store.
//!
//! [`PuzzleRepository`] hides the channel plumbing: every operation is sent
//! to the store worker as a command and awaited on a oneshot reply, so
//! callers see plain async methods while the DAO runs on a single queue.

use puzzle_core::{Level, Puzzle, PuzzleId, PuzzleSave};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::dao::PuzzleDao;
use crate::error::{Result, StoreError};
use crate::events::{ChangeBus, StoreChange};
use crate::live::{self, LiveQuery, LiveSpec};
use crate::row::PuzzleRow;
use crate::strings::Strings;
use crate::worker::{Command, StoreWorker};

const COMMAND_QUEUE_DEPTH: usize = 64;

/// Client-facing handle to the puzzle store.
#[derive(Clone)]
pub struct PuzzleRepository {
    command_tx: mpsc::Sender<Command>,
    bus: ChangeBus,
}

impl PuzzleRepository {
    /// Start a store worker over `dao` and return a handle to it.
    ///
    /// The random source is seeded from OS entropy; use [`spawn_seeded`]
    /// when tests need a deterministic pick order.
    ///
    /// [`spawn_seeded`]: PuzzleRepository::spawn_seeded
    pub fn spawn(dao: Box<dyn PuzzleDao>, strings: Box<dyn Strings>) -> Self {
        Self::spawn_with_rng(dao, strings, StdRng::from_os_rng())
    }

    /// Start a store worker with a deterministic random source.
    pub fn spawn_seeded(dao: Box<dyn PuzzleDao>, strings: Box<dyn Strings>, seed: u64) -> Self {
        Self::spawn_with_rng(dao, strings, StdRng::seed_from_u64(seed))
    }

    fn spawn_with_rng(dao: Box<dyn PuzzleDao>, strings: Box<dyn Strings>, rng: StdRng) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let bus = ChangeBus::default();

        let worker = StoreWorker::new(dao, strings, rng, command_rx, bus.clone());
        tokio::spawn(worker.run());

        Self { command_tx, bus }
    }

    /// The puzzle for `id`; [`StoreError::PuzzleNotFound`] if absent.
    pub async fn get_puzzle(&self, id: PuzzleId) -> Result<Puzzle> {
        self.request(|reply| Command::GetPuzzle { id, reply }).await
    }

    /// Live listing of all puzzles at `level`, with completed puzzles
    /// removed when `hide_completed` is set.
    pub fn get_puzzles(&self, level: Level, hide_completed: bool) -> LiveQuery<Vec<Puzzle>> {
        self.live(LiveSpec::AtLevel {
            level,
            hide_completed,
        })
    }

    /// One-shot bulk lookup by id, unfiltered; missing ids are skipped.
    pub async fn get_puzzles_by_id(&self, ids: &[PuzzleId]) -> Result<Vec<Puzzle>> {
        let ids = ids.to_vec();
        self.request(|reply| Command::GetPuzzlesById { ids, reply })
            .await
    }

    /// Live listing of every bookmarked puzzle.
    pub fn get_bookmarked_puzzles(&self) -> LiveQuery<Vec<Puzzle>> {
        self.live(LiveSpec::Bookmarked)
    }

    /// Live listing of every completed puzzle.
    pub fn get_completed_puzzles(&self) -> LiveQuery<Vec<Puzzle>> {
        self.live(LiveSpec::Completed)
    }

    /// Uniformly random id among puzzles at `level` with no recorded play
    /// time; [`StoreError::NoUnplayedPuzzles`] when none qualifies.
    pub async fn get_random_unplayed_puzzle_id(&self, level: Level) -> Result<PuzzleId> {
        self.request(|reply| Command::RandomUnplayed { level, reply })
            .await
    }

    /// Clear the bookmark flag on every puzzle.
    pub async fn remove_all_bookmarks(&self) -> Result<()> {
        self.request(|reply| Command::RemoveAllBookmarks { reply })
            .await
    }

    /// Number of completed puzzles across all levels.
    pub async fn count_completed(&self) -> Result<usize> {
        self.request(|reply| Command::CountCompleted { reply }).await
    }

    /// Persist one puzzle's play state.
    pub async fn save(&self, save: PuzzleSave) -> Result<()> {
        self.request(|reply| Command::Save { save, reply }).await
    }

    /// Persist many play states atomically.
    pub async fn save_all(&self, saves: &[PuzzleSave]) -> Result<()> {
        let saves = saves.to_vec();
        self.request(|reply| Command::SaveAll { saves, reply }).await
    }

    /// Set or clear one puzzle's bookmark flag.
    pub async fn set_bookmarked(&self, id: PuzzleId, bookmarked: bool) -> Result<()> {
        self.request(|reply| Command::SetBookmarked {
            id,
            bookmarked,
            reply,
        })
        .await
    }

    /// Load seeded rows into the store.
    pub async fn seed(&self, rows: Vec<PuzzleRow>) -> Result<()> {
        self.request(|reply| Command::Seed { rows, reply }).await
    }

    /// Subscribe to raw change notifications, for consumers that want to
    /// react to writes without holding a full live listing.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<StoreChange> {
        self.bus.subscribe()
    }

    /// Stop the store worker. Pending commands from other handles fail with
    /// [`StoreError::ReplyDropped`].
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
    }

    fn live(&self, spec: LiveSpec) -> LiveQuery<Vec<Puzzle>> {
        // Subscribe before the first snapshot so no write can fall between.
        live::spawn_live(self.command_tx.clone(), self.bus.subscribe(), spec)
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        reply_rx.await.map_err(StoreError::ReplyDropped)?
    }
}
