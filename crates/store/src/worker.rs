//! Store worker: the single task that owns the DAO.
//!
//! All repository operations are expressed as [`Command`]s and executed
//! sequentially here, so the DAO sees one caller and per-call atomicity is
//! all the consistency the store needs. Successful writes publish a
//! [`StoreChange`] on the bus, which is what wakes live queries.

use puzzle_core::{Level, Puzzle, PuzzleId, PuzzleSave};
use rand::Rng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};

use crate::dao::PuzzleDao;
use crate::error::{Result, StoreError};
use crate::events::{ChangeBus, StoreChange};
use crate::row::PuzzleRow;
use crate::strings::Strings;

pub(crate) type Reply<T> = oneshot::Sender<Result<T>>;

/// Commands processed by the store worker.
pub(crate) enum Command {
    GetPuzzle {
        id: PuzzleId,
        reply: Reply<Puzzle>,
    },
    GetPuzzlesAtLevel {
        level: Level,
        hide_completed: bool,
        reply: Reply<Vec<Puzzle>>,
    },
    GetPuzzlesById {
        ids: Vec<PuzzleId>,
        reply: Reply<Vec<Puzzle>>,
    },
    GetBookmarked {
        reply: Reply<Vec<Puzzle>>,
    },
    GetCompleted {
        reply: Reply<Vec<Puzzle>>,
    },
    RandomUnplayed {
        level: Level,
        reply: Reply<PuzzleId>,
    },
    RemoveAllBookmarks {
        reply: Reply<()>,
    },
    CountCompleted {
        reply: Reply<usize>,
    },
    Save {
        save: PuzzleSave,
        reply: Reply<()>,
    },
    SaveAll {
        saves: Vec<PuzzleSave>,
        reply: Reply<()>,
    },
    SetBookmarked {
        id: PuzzleId,
        bookmarked: bool,
        reply: Reply<()>,
    },
    Seed {
        rows: Vec<PuzzleRow>,
        reply: Reply<()>,
    },
    Shutdown,
}

/// Worker task that owns the DAO, the string resources, and the RNG.
pub(crate) struct StoreWorker {
    dao: Box<dyn PuzzleDao>,
    strings: Box<dyn Strings>,
    rng: StdRng,
    command_rx: mpsc::Receiver<Command>,
    bus: ChangeBus,
}

impl StoreWorker {
    pub(crate) fn new(
        dao: Box<dyn PuzzleDao>,
        strings: Box<dyn Strings>,
        rng: StdRng,
        command_rx: mpsc::Receiver<Command>,
        bus: ChangeBus,
    ) -> Self {
        Self {
            dao,
            strings,
            rng,
            command_rx,
            bus,
        }
    }

    /// Main worker loop. Ends when every handle is dropped or on
    /// [`Command::Shutdown`].
    pub(crate) async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            if matches!(cmd, Command::Shutdown) {
                tracing::debug!("store worker shutting down");
                break;
            }
            self.handle_command(cmd);
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::GetPuzzle { id, reply } => {
                let _ = reply.send(self.get_puzzle(id));
            }
            Command::GetPuzzlesAtLevel {
                level,
                hide_completed,
                reply,
            } => {
                let _ = reply.send(self.get_puzzles_at_level(level, hide_completed));
            }
            Command::GetPuzzlesById { ids, reply } => {
                let _ = reply.send(self.get_puzzles_by_id(&ids));
            }
            Command::GetBookmarked { reply } => {
                let result = self.dao.get_bookmarked_puzzles();
                let _ = reply.send(result.and_then(|rows| self.map_rows(rows)));
            }
            Command::GetCompleted { reply } => {
                let result = self.dao.get_completed_puzzles();
                let _ = reply.send(result.and_then(|rows| self.map_rows(rows)));
            }
            Command::RandomUnplayed { level, reply } => {
                let _ = reply.send(self.random_unplayed(level));
            }
            Command::RemoveAllBookmarks { reply } => {
                let result = self.dao.remove_all_bookmarks();
                if let Ok(count) = &result {
                    self.bus.publish(StoreChange::BookmarksCleared { count: *count });
                }
                let _ = reply.send(result.map(|_| ()));
            }
            Command::CountCompleted { reply } => {
                let _ = reply.send(self.dao.count_completed());
            }
            Command::Save { save, reply } => {
                let result = self.dao.update_puzzle(&save);
                if result.is_ok() {
                    self.bus.publish(StoreChange::Saved { count: 1 });
                }
                let _ = reply.send(result);
            }
            Command::SaveAll { saves, reply } => {
                let result = self.dao.bulk_update_puzzles(&saves);
                if result.is_ok() {
                    self.bus.publish(StoreChange::Saved { count: saves.len() });
                }
                let _ = reply.send(result);
            }
            Command::SetBookmarked {
                id,
                bookmarked,
                reply,
            } => {
                let result = self.dao.update_bookmark(id, bookmarked);
                if result.is_ok() {
                    self.bus.publish(StoreChange::Bookmark { set: bookmarked });
                }
                let _ = reply.send(result);
            }
            Command::Seed { rows, reply } => {
                let count = rows.len();
                let result = self.dao.insert_puzzles(rows);
                if result.is_ok() {
                    self.bus.publish(StoreChange::Seeded { count });
                }
                let _ = reply.send(result);
            }
            Command::Shutdown => unreachable!("handled in run loop"),
        }
    }

    fn get_puzzle(&self, id: PuzzleId) -> Result<Puzzle> {
        let row = self
            .dao
            .get_puzzle(id)?
            .ok_or(StoreError::PuzzleNotFound(id))?;
        row.to_puzzle(self.strings.as_ref())
    }

    fn get_puzzles_at_level(&self, level: Level, hide_completed: bool) -> Result<Vec<Puzzle>> {
        let rows = self.dao.get_puzzles(level.id())?;
        rows.into_iter()
            .filter(|row| !row.completed || !hide_completed)
            .map(|row| row.to_puzzle(self.strings.as_ref()))
            .collect()
    }

    fn get_puzzles_by_id(&self, ids: &[PuzzleId]) -> Result<Vec<Puzzle>> {
        self.map_rows(self.dao.bulk_get_puzzles(ids)?)
    }

    /// Uniform pick among rows at `level` with no recorded play time.
    fn random_unplayed(&mut self, level: Level) -> Result<PuzzleId> {
        let candidates: Vec<PuzzleId> = self
            .dao
            .get_incomplete_puzzles(level.id())?
            .into_iter()
            .filter(PuzzleRow::is_unplayed)
            .map(|row| row.id)
            .collect();

        if candidates.is_empty() {
            return Err(StoreError::NoUnplayedPuzzles(level));
        }
        let index = self.rng.random_range(0..candidates.len());
        Ok(candidates[index])
    }

    fn map_rows(&self, rows: Vec<PuzzleRow>) -> Result<Vec<Puzzle>> {
        rows.into_iter()
            .map(|row| row.to_puzzle(self.strings.as_ref()))
            .collect()
    }
}
