//! `[reorder]` section configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Remove `1. ` style prefixes inside list items.
    pub strip_numbering: bool,

    /// Rewrite `unit 3 :  foo` titles as `Unit 3: foo`.
    pub normalize_titles: bool,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            strip_numbering: true,
            normalize_titles: true,
        }
    }
}
