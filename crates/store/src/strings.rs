//! String-resource provider injected into row-to-domain mapping.

use puzzle_core::Level;

/// Localized text provider.
///
/// Consumed as a black box by the mapping layer; implementations wrap
/// whatever resource system the embedding application uses.
pub trait Strings: Send + Sync {
    /// Display name for a difficulty tier.
    fn level_name(&self, level: Level) -> String;

    /// Display title for a puzzle, e.g. "Medium 42".
    fn puzzle_title(&self, level: Level, number: u32) -> String {
        format!("{} {}", self.level_name(level), number)
    }
}

/// Built-in English resources, used as the default provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishStrings;

impl Strings for EnglishStrings {
    fn level_name(&self, level: Level) -> String {
        let name = match level {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
            Level::Extreme => "Extreme",
        };
        name.to_string()
    }
}
