use serde::{Deserialize, Serialize};

use crate::{Level, PuzzleId};

/// Domain-level read model of a puzzle and its play state.
///
/// Rebuilt from the stored row on every read; the `title` field is resolved
/// from string resources at mapping time and is not persisted. Instances are
/// immutable: mutation flows through [`PuzzleSave`] writes only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: PuzzleId,
    /// Position of this puzzle within its level, used for display titles.
    pub number: u32,
    pub level: Level,
    /// Localized display title, e.g. "Medium 42".
    pub title: String,
    /// The 81-character givens string ('.' for empty cells).
    pub givens: String,
    pub solution: String,
    /// Current in-progress grid, empty until the first save.
    pub game: String,
    pub notes: String,
    /// Elapsed play time in milliseconds; `None` until the puzzle is opened.
    pub time: Option<u64>,
    pub bookmarked: bool,
    /// Fill progress in percent, 0..=100.
    pub progress: u8,
    pub completed: bool,
    pub cheats: u32,
}

impl Puzzle {
    /// True once any play time has been recorded.
    pub fn is_played(&self) -> bool {
        matches!(self.time, Some(t) if t > 0)
    }
}

/// Write-side projection of [`Puzzle`]: the id plus every mutable field.
///
/// Fields not carried here (givens, solution, level, number) are fixed at
/// seeding time and never rewritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSave {
    pub id: PuzzleId,
    pub game: String,
    pub notes: String,
    pub time: Option<u64>,
    pub bookmarked: bool,
    pub progress: u8,
    pub completed: bool,
    pub cheats: u32,
}

impl PuzzleSave {
    /// Save shape for an in-progress game.
    pub fn in_progress(
        id: PuzzleId,
        game: impl Into<String>,
        notes: impl Into<String>,
        time: u64,
        progress: u8,
    ) -> Self {
        Self {
            id,
            game: game.into(),
            notes: notes.into(),
            time: Some(time),
            bookmarked: false,
            progress,
            completed: false,
            cheats: 0,
        }
    }

    /// Save shape for a finished game.
    pub fn completed(id: PuzzleId, game: impl Into<String>, time: u64, cheats: u32) -> Self {
        Self {
            id,
            game: game.into(),
            notes: String::new(),
            time: Some(time),
            bookmarked: false,
            progress: 100,
            completed: true,
            cheats,
        }
    }
}
