//! File-backed PuzzleDao implementation.

use std::fs;
use std::path::{Path, PathBuf};

use puzzle_core::{PuzzleId, PuzzleSave};

use crate::dao::PuzzleDao;
use crate::error::{Result, StoreError};
use crate::memory::MemoryPuzzleStore;
use crate::row::PuzzleRow;

/// File-backed implementation of [`PuzzleDao`].
///
/// Rows are held in memory and written back as a single bincode snapshot
/// after every mutation. Writes go through a temp file followed by an atomic
/// rename, so a crash mid-write leaves the previous snapshot intact.
pub struct FilePuzzleStore {
    inner: MemoryPuzzleStore,
    path: PathBuf,
}

impl FilePuzzleStore {
    /// Open a store at `path`, loading the existing snapshot if present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(StoreError::Io)?;
        }

        let inner = if path.exists() {
            let bytes = fs::read(&path).map_err(StoreError::Io)?;
            let rows: Vec<PuzzleRow> = bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            tracing::debug!(rows = rows.len(), "loaded puzzle snapshot from {}", path.display());
            MemoryPuzzleStore::with_rows(rows)
        } else {
            MemoryPuzzleStore::new()
        };

        Ok(Self { inner, path })
    }

    fn persist(&self) -> Result<()> {
        let rows = self.inner.snapshot()?;
        let bytes =
            bincode::serialize(&rows).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let temp_path = self.path.with_extension("bin.tmp");
        fs::write(&temp_path, bytes).map_err(StoreError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(StoreError::Io)?;

        tracing::debug!(rows = rows.len(), "persisted puzzle snapshot to {}", self.path.display());
        Ok(())
    }
}

impl PuzzleDao for FilePuzzleStore {
    fn get_puzzle(&self, id: PuzzleId) -> Result<Option<PuzzleRow>> {
        self.inner.get_puzzle(id)
    }

    fn get_puzzles(&self, level_id: u32) -> Result<Vec<PuzzleRow>> {
        self.inner.get_puzzles(level_id)
    }

    fn bulk_get_puzzles(&self, ids: &[PuzzleId]) -> Result<Vec<PuzzleRow>> {
        self.inner.bulk_get_puzzles(ids)
    }

    fn get_bookmarked_puzzles(&self) -> Result<Vec<PuzzleRow>> {
        self.inner.get_bookmarked_puzzles()
    }

    fn get_completed_puzzles(&self) -> Result<Vec<PuzzleRow>> {
        self.inner.get_completed_puzzles()
    }

    fn get_incomplete_puzzles(&self, level_id: u32) -> Result<Vec<PuzzleRow>> {
        self.inner.get_incomplete_puzzles(level_id)
    }

    fn count_completed(&self) -> Result<usize> {
        self.inner.count_completed()
    }

    fn update_puzzle(&self, save: &PuzzleSave) -> Result<()> {
        self.inner.update_puzzle(save)?;
        self.persist()
    }

    fn bulk_update_puzzles(&self, saves: &[PuzzleSave]) -> Result<()> {
        self.inner.bulk_update_puzzles(saves)?;
        self.persist()
    }

    fn update_bookmark(&self, id: PuzzleId, bookmarked: bool) -> Result<()> {
        self.inner.update_bookmark(id, bookmarked)?;
        self.persist()
    }

    fn remove_all_bookmarks(&self) -> Result<usize> {
        let cleared = self.inner.remove_all_bookmarks()?;
        self.persist()?;
        Ok(cleared)
    }

    fn insert_puzzles(&self, rows: Vec<PuzzleRow>) -> Result<()> {
        self.inner.insert_puzzles(rows)?;
        self.persist()
    }
}
