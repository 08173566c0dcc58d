//! Error types surfaced by the puzzle store.

use puzzle_core::{Level, PuzzleId};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by storage backends and the repository facade.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("puzzle {0} not found")]
    PuzzleNotFound(PuzzleId),

    #[error("no unplayed puzzles at level {0}")]
    NoUnplayedPuzzles(Level),

    #[error("puzzle store lock was poisoned")]
    LockPoisoned,

    #[error("store worker command channel closed")]
    WorkerGone,

    #[error("store worker reply channel closed")]
    ReplyDropped(#[source] oneshot::error::RecvError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted row: {0}")]
    CorruptedRow(String),
}
