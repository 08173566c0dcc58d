//! In-memory PuzzleDao implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use puzzle_core::{PuzzleId, PuzzleSave};

use crate::dao::PuzzleDao;
use crate::error::{Result, StoreError};
use crate::row::PuzzleRow;

/// In-memory implementation of [`PuzzleDao`].
///
/// Rows are keyed by id in a `BTreeMap`, so storage order is ascending id.
pub struct MemoryPuzzleStore {
    rows: RwLock<BTreeMap<PuzzleId, PuzzleRow>>,
}

impl MemoryPuzzleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with seeded rows.
    pub fn with_rows(rows: Vec<PuzzleRow>) -> Self {
        let store = Self::new();
        store
            .insert_puzzles(rows)
            .unwrap_or_else(|_| unreachable!("fresh lock cannot be poisoned"));
        store
    }

    /// Snapshot of every row in storage order.
    pub(crate) fn snapshot(&self) -> Result<Vec<PuzzleRow>> {
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(rows.values().cloned().collect())
    }

    fn filtered(&self, keep: impl Fn(&PuzzleRow) -> bool) -> Result<Vec<PuzzleRow>> {
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(rows.values().filter(|row| keep(row)).cloned().collect())
    }
}

impl Default for MemoryPuzzleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleDao for MemoryPuzzleStore {
    fn get_puzzle(&self, id: PuzzleId) -> Result<Option<PuzzleRow>> {
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(rows.get(&id).cloned())
    }

    fn get_puzzles(&self, level_id: u32) -> Result<Vec<PuzzleRow>> {
        self.filtered(|row| row.level_id == level_id)
    }

    fn bulk_get_puzzles(&self, ids: &[PuzzleId]) -> Result<Vec<PuzzleRow>> {
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    fn get_bookmarked_puzzles(&self) -> Result<Vec<PuzzleRow>> {
        self.filtered(|row| row.bookmarked)
    }

    fn get_completed_puzzles(&self) -> Result<Vec<PuzzleRow>> {
        self.filtered(|row| row.completed)
    }

    fn get_incomplete_puzzles(&self, level_id: u32) -> Result<Vec<PuzzleRow>> {
        self.filtered(|row| row.level_id == level_id && !row.completed)
    }

    fn count_completed(&self) -> Result<usize> {
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(rows.values().filter(|row| row.completed).count())
    }

    fn update_puzzle(&self, save: &PuzzleSave) -> Result<()> {
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned)?;
        let row = rows
            .get_mut(&save.id)
            .ok_or(StoreError::PuzzleNotFound(save.id))?;
        row.apply(save);
        Ok(())
    }

    fn bulk_update_puzzles(&self, saves: &[PuzzleSave]) -> Result<()> {
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned)?;

        // Validate every id up front so the batch applies all-or-nothing.
        for save in saves {
            if !rows.contains_key(&save.id) {
                return Err(StoreError::PuzzleNotFound(save.id));
            }
        }

        for save in saves {
            if let Some(row) = rows.get_mut(&save.id) {
                row.apply(save);
            }
        }
        Ok(())
    }

    fn update_bookmark(&self, id: PuzzleId, bookmarked: bool) -> Result<()> {
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned)?;
        let row = rows.get_mut(&id).ok_or(StoreError::PuzzleNotFound(id))?;
        row.bookmarked = bookmarked;
        Ok(())
    }

    fn remove_all_bookmarks(&self) -> Result<usize> {
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut cleared = 0;
        for row in rows.values_mut() {
            if row.bookmarked {
                row.bookmarked = false;
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    fn insert_puzzles(&self, new_rows: Vec<PuzzleRow>) -> Result<()> {
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned)?;
        for row in new_rows {
            rows.insert(row.id, row);
        }
        Ok(())
    }
}
