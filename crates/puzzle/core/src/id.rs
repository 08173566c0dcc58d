use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a puzzle row.
///
/// Ids are assigned by the seeding process, stable for the lifetime of the
/// store, and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PuzzleId(pub u64);

impl PuzzleId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for PuzzleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
