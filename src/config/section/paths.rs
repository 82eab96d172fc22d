//! `[paths]` section configuration.
//!
//! All paths are relative to the directory containing `coursekit.toml` and
//! are made absolute after loading.
//!
//! ```toml
//! [paths]
//! roots = ["index.html", "pages"]     # scanned by rewrite/strip/reorder/check
//! individual = "pages/courses/individual"
//! categories = "pages/courses/categories"
//! catalog = "data/catalog.toml"
//! outline = "data/courses-formatted.txt"
//! groups = "data/course-groups.txt"
//! images = "Images/Course_Images"
//! image_names = "Images/Course_Images/Course_Image_Names.csv"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::clean_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Files or directories holding the site's HTML pages.
    pub roots: Vec<PathBuf>,

    /// Output directory for individual course pages.
    pub individual: PathBuf,

    /// Output directory for category pages.
    pub categories: PathBuf,

    /// Catalog file (`.toml` or `.json`).
    pub catalog: PathBuf,

    /// Formatted outline text. Takes precedence over the catalog for course pages.
    pub outline: Option<PathBuf>,

    /// Grouped category file. Takes precedence over the catalog for category pages.
    pub groups: Option<PathBuf>,

    /// Course image directory.
    pub images: PathBuf,

    /// `CourseName,CourseImage` CSV.
    pub image_names: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            roots: vec!["index.html".into(), "pages".into()],
            individual: "pages/courses/individual".into(),
            categories: "pages/courses/categories".into(),
            catalog: "data/catalog.toml".into(),
            outline: None,
            groups: None,
            images: "Images/Course_Images".into(),
            image_names: None,
        }
    }
}

impl PathsConfig {
    pub const ROOTS: FieldPath = FieldPath::new("paths.roots");
    pub const INDIVIDUAL: FieldPath = FieldPath::new("paths.individual");
    pub const CATEGORIES: FieldPath = FieldPath::new("paths.categories");

    /// Validate raw (relative) paths before they are joined with the root.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.roots.is_empty() {
            diag.error_with_hint(
                Self::ROOTS,
                "at least one page root is required",
                "roots = [\"index.html\", \"pages\"]",
            );
        }
        for (field, path) in [
            (Self::INDIVIDUAL, &self.individual),
            (Self::CATEGORIES, &self.categories),
        ] {
            if path.as_os_str().is_empty() {
                diag.error(field, "output directory cannot be empty");
            } else if path.is_absolute() {
                diag.error(field, "output directory must be relative to the site root");
            }
        }
    }

    /// Join every path with `root`, resolving `.` and `..`.
    pub fn normalize(&mut self, root: &Path) {
        let join = |p: &mut PathBuf| *p = clean_path(&root.join(&*p));
        self.roots.iter_mut().for_each(join);
        join(&mut self.individual);
        join(&mut self.categories);
        join(&mut self.catalog);
        join(&mut self.images);
        for p in [&mut self.outline, &mut self.groups, &mut self.image_names]
            .into_iter()
            .flatten()
        {
            join(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let mut paths = PathsConfig {
            outline: Some("data/outline.txt".into()),
            ..Default::default()
        };
        paths.normalize(Path::new("/site"));
        assert_eq!(paths.roots[1], Path::new("/site/pages"));
        assert_eq!(paths.individual, Path::new("/site/pages/courses/individual"));
        assert_eq!(paths.outline.as_deref(), Some(Path::new("/site/data/outline.txt")));
        assert!(paths.groups.is_none());
    }

    #[test]
    fn test_validate() {
        let mut diag = ConfigDiagnostics::new();
        PathsConfig::default().validate(&mut diag);
        assert!(diag.is_empty());

        let paths = PathsConfig {
            roots: vec![],
            individual: PathBuf::new(),
            categories: "/abs".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        paths.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }
}
