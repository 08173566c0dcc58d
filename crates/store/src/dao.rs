//! Storage contract consumed by the store worker.

use puzzle_core::{PuzzleId, PuzzleSave};

use crate::error::Result;
use crate::row::PuzzleRow;

/// Row-level access to the puzzle store.
///
/// Implementations are synchronous: every call is issued from the single
/// store worker task, which serializes access. Each method is atomic with
/// respect to the others; bulk updates apply all-or-nothing.
///
/// Listing order is storage order, i.e. ascending puzzle id.
pub trait PuzzleDao: Send + Sync {
    /// Look up a single row.
    fn get_puzzle(&self, id: PuzzleId) -> Result<Option<PuzzleRow>>;

    /// All rows at a difficulty tier.
    fn get_puzzles(&self, level_id: u32) -> Result<Vec<PuzzleRow>>;

    /// Bulk lookup by id; missing ids are skipped.
    fn bulk_get_puzzles(&self, ids: &[PuzzleId]) -> Result<Vec<PuzzleRow>>;

    /// All rows with the bookmark flag set.
    fn get_bookmarked_puzzles(&self) -> Result<Vec<PuzzleRow>>;

    /// All completed rows, across every tier.
    fn get_completed_puzzles(&self) -> Result<Vec<PuzzleRow>>;

    /// All rows at a tier that are not completed.
    fn get_incomplete_puzzles(&self, level_id: u32) -> Result<Vec<PuzzleRow>>;

    /// Number of completed rows across every tier.
    fn count_completed(&self) -> Result<usize>;

    /// Overwrite one row's mutable fields. Fails with
    /// [`StoreError::PuzzleNotFound`](crate::StoreError::PuzzleNotFound) if
    /// the id is absent.
    fn update_puzzle(&self, save: &PuzzleSave) -> Result<()>;

    /// Overwrite many rows atomically: if any id is absent, nothing is
    /// written.
    fn bulk_update_puzzles(&self, saves: &[PuzzleSave]) -> Result<()>;

    /// Set or clear one row's bookmark flag.
    fn update_bookmark(&self, id: PuzzleId, bookmarked: bool) -> Result<()>;

    /// Clear the bookmark flag on every row, returning how many were set.
    fn remove_all_bookmarks(&self) -> Result<usize>;

    /// Insert seeded rows. Existing ids are overwritten; seeding runs before
    /// any play state exists.
    fn insert_puzzles(&self, rows: Vec<PuzzleRow>) -> Result<()>;
}
