use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Difficulty tier used as the storage filter key.
///
/// The numeric id is persisted in puzzle rows and must stay stable across
/// releases; the variant order is display order only.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize,
    Deserialize,
)]
pub enum Level {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Level {
    /// Stable storage key for this tier.
    pub const fn id(self) -> u32 {
        match self {
            Level::Easy => 1,
            Level::Medium => 2,
            Level::Hard => 3,
            Level::Extreme => 4,
        }
    }

    /// Looks up a tier by its storage key.
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Level::Easy),
            2 => Some(Level::Medium),
            3 => Some(Level::Hard),
            4 => Some(Level::Extreme),
            _ => None,
        }
    }
}
