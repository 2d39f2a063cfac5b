use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

/// One floor of a plot. Each level owns an independent grid.
///
/// Ordering follows elevation, which is also the order levels appear in saved documents.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
pub enum Level {
    #[default]
    #[strum(serialize = "Ground Level")]
    #[serde(rename = "Ground Level")]
    Ground,
    #[strum(serialize = "Level 1")]
    #[serde(rename = "Level 1")]
    One,
    #[strum(serialize = "Level 2")]
    #[serde(rename = "Level 2")]
    Two,
    #[strum(serialize = "Level 3")]
    #[serde(rename = "Level 3")]
    Three,
    #[strum(serialize = "Level 4")]
    #[serde(rename = "Level 4")]
    Four,
    #[strum(serialize = "Level 5")]
    #[serde(rename = "Level 5")]
    Five,
    #[strum(serialize = "Level 6")]
    #[serde(rename = "Level 6")]
    Six,
}

impl Level {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Level> {
        Level::iter().nth(index)
    }

    /// The level above this one, wrapping to the ground level.
    pub fn next(self) -> Level {
        Level::from_index((self.index() + 1) % Level::COUNT).unwrap_or_default()
    }

    /// The level below this one, wrapping to the top level.
    pub fn previous(self) -> Level {
        Level::from_index((self.index() + Level::COUNT - 1) % Level::COUNT).unwrap_or_default()
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
