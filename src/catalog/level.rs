//! Course difficulty levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty level shown on course cards and pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(alias = "basic")]
    Basic,
    #[serde(alias = "intermediate")]
    Intermediate,
    #[serde(alias = "advanced")]
    Advanced,
    /// Used when the source gives no level.
    #[default]
    #[serde(rename = "All Levels", alias = "all levels", alias = "all")]
    AllLevels,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::AllLevels => "All Levels",
        }
    }

    /// Badge colour for the level.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Basic => "#10b981",
            Self::Intermediate => "#f59e0b",
            Self::Advanced => "#ef4444",
            Self::AllLevels => "#6b7280",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
