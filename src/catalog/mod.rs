//! Course catalog model.
//!
//! The catalog maps a category key to its category record. Key order is the
//! authored order and is preserved through load, validation and export.
//!
//! ```toml
//! [computer]
//! title = "Computer Courses"
//! description = "Everyday software skills."
//!
//! [[computer.courses]]
//! title = "Basic Microsoft Word"
//! description = "Produce professional documents."
//! level = "Basic"
//! duration = "16h"
//!
//! [[computer.courses.units]]
//! title = "Unit 1: Getting started"
//! topics = ["Opening Word", "The ribbon"]
//! ```

mod duration;
mod groups;
mod images;
mod level;
mod outline;

pub use duration::minutes_to_human;
pub use groups::{CourseGroup, parse_groups};
pub use images::ImageIndex;
pub use level::Level;
pub use outline::{CourseOutline, OutlineUnit, parse_outline};

use crate::core::slugify;
use crate::utils::plural_count;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors raised while reading catalog inputs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid image map '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unsupported catalog format '{path}' (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },
}

impl CatalogError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A syllabus unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub title: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// A course record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub overview: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Course {
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    /// Short text for cards and page headers.
    pub fn teaser(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.overview
        } else {
            &self.description
        }
    }

    /// Longer text for the page body.
    pub fn long_overview(&self) -> &str {
        if self.overview.trim().is_empty() {
            &self.description
        } else {
            &self.overview
        }
    }
}

/// A category record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// The full catalog, keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub categories: IndexMap<String, Category>,
}

/// A non-fatal problem found by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    EmptyCategoryTitle { category: String },
    EmptyCourseTitle { category: String, index: usize },
    NoUnits { category: String, course: String },
    NoTopics { category: String, course: String, unit: String },
    DuplicateSlug { slug: String, first: String, second: String },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategoryTitle { category } => {
                write!(f, "[{category}] category has no title")
            }
            Self::EmptyCourseTitle { category, index } => {
                write!(f, "[{category}] course #{} has no title", index + 1)
            }
            Self::NoUnits { category, course } => {
                write!(f, "[{category}] '{course}' has no units")
            }
            Self::NoTopics {
                category,
                course,
                unit,
            } => write!(f, "[{category}] '{course}' unit '{unit}' has no topics"),
            Self::DuplicateSlug {
                slug,
                first,
                second,
            } => write!(f, "slug '{slug}' is shared by {first} and {second}"),
        }
    }
}

/// Catalog size counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub categories: usize,
    pub courses: usize,
    pub units: usize,
    pub topics: usize,
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            plural_count(self.categories, "category"),
            plural_count(self.courses, "course"),
            plural_count(self.units, "unit"),
            plural_count(self.topics, "topic"),
        )
    }
}

impl Catalog {
    /// Load a catalog from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&Path, &str) -> Result<Self, CatalogError> = match ext.as_deref() {
            Some("toml") => Self::from_toml,
            Some("json") => Self::from_json,
            _ => {
                return Err(CatalogError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        parse(path, &content)
    }

    fn from_toml(path: &Path, content: &str) -> Result<Self, CatalogError> {
        toml::from_str(content).map_err(|source| CatalogError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json(path: &Path, content: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(content).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Iterate `(category key, course)` pairs in authored order.
    pub fn courses(&self) -> impl Iterator<Item = (&str, &Course)> {
        self.categories
            .iter()
            .flat_map(|(key, cat)| cat.courses.iter().map(move |c| (key.as_str(), c)))
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary {
            categories: self.categories.len(),
            ..Default::default()
        };
        for (_, course) in self.courses() {
            summary.courses += 1;
            summary.units += course.units.len();
            summary.topics += course.units.iter().map(|u| u.topics.len()).sum::<usize>();
        }
        summary
    }

    /// Collect structural problems. An empty result means the catalog is clean.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen: HashMap<String, String> = HashMap::new();

        for (key, category) in &self.categories {
            if category.title.trim().is_empty() {
                issues.push(CatalogIssue::EmptyCategoryTitle {
                    category: key.clone(),
                });
            }

            for (index, course) in category.courses.iter().enumerate() {
                if course.title.trim().is_empty() {
                    issues.push(CatalogIssue::EmptyCourseTitle {
                        category: key.clone(),
                        index,
                    });
                    continue;
                }

                if course.units.is_empty() {
                    issues.push(CatalogIssue::NoUnits {
                        category: key.clone(),
                        course: course.title.clone(),
                    });
                }
                for unit in course.units.iter().filter(|u| u.topics.is_empty()) {
                    issues.push(CatalogIssue::NoTopics {
                        category: key.clone(),
                        course: course.title.clone(),
                        unit: unit.title.clone(),
                    });
                }

                let slug = course.slug();
                let label = format!("'{}' [{key}]", course.title);
                if let Some(first) = seen.get(&slug) {
                    issues.push(CatalogIssue::DuplicateSlug {
                        slug,
                        first: first.clone(),
                        second: label,
                    });
                } else {
                    seen.insert(slug, label);
                }
            }
        }

        issues
    }

    /// Render the catalog as the client-side `courseData` declaration.
    pub fn to_script(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(format!("const courseData = {json};\n"))
    }
}
