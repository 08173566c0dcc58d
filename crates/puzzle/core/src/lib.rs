//! Domain types for sudoku puzzles and their play state.
//!
//! `puzzle-core` defines the read model ([`Puzzle`]), the write-side
//! projection ([`PuzzleSave`]), and the keys used to address and filter
//! puzzles ([`PuzzleId`], [`Level`]). These types are pure data: storage
//! adapters and the repository facade live in `puzzle-store`.
pub mod id;
pub mod level;
pub mod puzzle;

pub use id::PuzzleId;
pub use level::Level;
pub use puzzle::{Puzzle, PuzzleSave};
