//! Storage-row representation and mapping to the domain read model.

use puzzle_core::{Level, Puzzle, PuzzleId, PuzzleSave};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::strings::Strings;

/// Persistent representation of a puzzle.
///
/// Carries the stable fields written at seeding time plus the mutable play
/// state. The difficulty tier is stored by its numeric key so the on-disk
/// format does not depend on enum variant order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRow {
    pub id: PuzzleId,
    pub number: u32,
    pub level_id: u32,
    pub givens: String,
    pub solution: String,
    pub game: String,
    pub notes: String,
    pub time: Option<u64>,
    pub bookmarked: bool,
    pub progress: u8,
    pub completed: bool,
    pub cheats: u32,
}

impl PuzzleRow {
    /// Fresh row as created by the seeding process: no play state yet.
    pub fn seed(
        id: PuzzleId,
        number: u32,
        level: Level,
        givens: impl Into<String>,
        solution: impl Into<String>,
    ) -> Self {
        Self {
            id,
            number,
            level_id: level.id(),
            givens: givens.into(),
            solution: solution.into(),
            game: String::new(),
            notes: String::new(),
            time: None,
            bookmarked: false,
            progress: 0,
            completed: false,
            cheats: 0,
        }
    }

    /// True until any play time has been recorded.
    pub fn is_unplayed(&self) -> bool {
        matches!(self.time, None | Some(0))
    }

    /// Overwrites the mutable fields from a save.
    pub fn apply(&mut self, save: &PuzzleSave) {
        self.game = save.game.clone();
        self.notes = save.notes.clone();
        self.time = save.time;
        self.bookmarked = save.bookmarked;
        self.progress = save.progress;
        self.completed = save.completed;
        self.cheats = save.cheats;
    }

    /// Builds the domain read model, resolving display text through the
    /// string-resource provider.
    pub fn to_puzzle(&self, strings: &dyn Strings) -> Result<Puzzle> {
        let level = Level::from_id(self.level_id).ok_or_else(|| {
            StoreError::CorruptedRow(format!(
                "puzzle {} has unknown level id {}",
                self.id, self.level_id
            ))
        })?;

        Ok(Puzzle {
            id: self.id,
            number: self.number,
            level,
            title: strings.puzzle_title(level, self.number),
            givens: self.givens.clone(),
            solution: self.solution.clone(),
            game: self.game.clone(),
            notes: self.notes.clone(),
            time: self.time,
            bookmarked: self.bookmarked,
            progress: self.progress,
            completed: self.completed,
            cheats: self.cheats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::EnglishStrings;

    #[test]
    fn seeded_row_maps_to_untouched_puzzle() {
        let row = PuzzleRow::seed(PuzzleId::new(3), 3, Level::Medium, "givens", "solution");
        let puzzle = row.to_puzzle(&EnglishStrings).unwrap();

        assert_eq!(puzzle.id, PuzzleId::new(3));
        assert_eq!(puzzle.title, "Medium 3");
        assert_eq!(puzzle.level, Level::Medium);
        assert!(!puzzle.is_played());
        assert!(!puzzle.completed);
    }

    #[test]
    fn apply_overwrites_only_mutable_fields() {
        let mut row = PuzzleRow::seed(PuzzleId::new(1), 1, Level::Easy, "givens", "solution");
        let save = PuzzleSave::completed(PuzzleId::new(1), "done", 90_000, 1);
        row.apply(&save);

        assert_eq!(row.givens, "givens");
        assert_eq!(row.solution, "solution");
        assert_eq!(row.game, "done");
        assert_eq!(row.time, Some(90_000));
        assert!(row.completed);
        assert_eq!(row.cheats, 1);
    }

    #[test]
    fn unknown_level_id_is_a_corrupted_row() {
        let mut row = PuzzleRow::seed(PuzzleId::new(1), 1, Level::Easy, "", "");
        row.level_id = 42;
        assert!(matches!(
            row.to_puzzle(&EnglishStrings),
            Err(StoreError::CorruptedRow(_))
        ));
    }

    #[test]
    fn zero_time_counts_as_unplayed() {
        let mut row = PuzzleRow::seed(PuzzleId::new(1), 1, Level::Easy, "", "");
        assert!(row.is_unplayed());
        row.time = Some(0);
        assert!(row.is_unplayed());
        row.time = Some(10);
        assert!(!row.is_unplayed());
    }
}
