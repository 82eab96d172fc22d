//! `[generate]` section configuration.
//!
//! ```toml
//! [generate]
//! course_template = "templates/course.html"     # embedded default when unset
//! category_template = "templates/category.html"
//! default_level = "All Levels"                  # level for outline courses
//! split_topics = true                           # "a, b, c" -> three topics
//! ```

use crate::catalog::Level;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Course page template. The embedded template is used when unset.
    pub course_template: Option<PathBuf>,

    /// Category page template. The embedded template is used when unset.
    pub category_template: Option<PathBuf>,

    /// Level for courses read from the outline text, which carries none.
    pub default_level: Level,

    /// Split comma-separated topic lines into one topic per item.
    pub split_topics: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            course_template: None,
            category_template: None,
            default_level: Level::AllLevels,
            split_topics: true,
        }
    }
}

impl GenerateConfig {
    pub const COURSE_TEMPLATE: FieldPath = FieldPath::new("generate.course_template");
    pub const CATEGORY_TEMPLATE: FieldPath = FieldPath::new("generate.category_template");

    /// Check that configured templates exist. Runs after path normalization.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, path) in [
            (Self::COURSE_TEMPLATE, &self.course_template),
            (Self::CATEGORY_TEMPLATE, &self.category_template),
        ] {
            if let Some(path) = path
                && !path.is_file()
            {
                diag.error_with_hint(
                    field,
                    format!("template not found: {}", path.display()),
                    "remove the field to use the embedded template",
                );
            }
        }
    }

    pub fn normalize(&mut self, root: &Path) {
        for p in [&mut self.course_template, &mut self.category_template]
            .into_iter()
            .flatten()
        {
            *p = root.join(&*p);
        }
    }
}
