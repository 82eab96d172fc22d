//! Course and category page generation.
//!
//! Renderers are pure: they take parsed inputs and produce [`Rendered`]
//! pages. Writing, dry runs and progress live in the `generate` command.
//!
//! # Module Structure
//!
//! - `course` - accordion outline and individual course pages
//! - `category` - course tiles and category pages

mod category;
mod course;

pub use category::{CategoryRenderer, TileCourse};
pub use course::{CategoryLink, CourseRenderer, render_outline};

use crate::{config::SiteConfig, core::to_root};
use std::path::{Path, PathBuf};

/// A page ready to be written into its output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// `<slug>.html`
    pub file_name: String,
    pub html: String,
}

impl Rendered {
    fn new(slug: &str, html: String) -> Self {
        Self {
            file_name: format!("{slug}.html"),
            html,
        }
    }
}

/// Site locations both renderers link between, relative to the site root.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    pub name: String,
    pub logo: String,
    pub individual: PathBuf,
    pub categories: PathBuf,
    pub images: PathBuf,
}

impl SiteLayout {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            name: config.site.name.clone(),
            logo: config.site.logo.clone(),
            individual: config.root_relative(&config.paths.individual),
            categories: config.root_relative(&config.paths.categories),
            images: config.root_relative(&config.paths.images),
        }
    }

    /// Root prefix for a page written into `dir`.
    fn root_of(dir: &Path) -> String {
        to_root(&dir.join("page.html"))
    }
}

#[cfg(test)]
pub(crate) fn test_layout() -> SiteLayout {
    SiteLayout {
        name: "TAP".into(),
        logo: "Images/Logo.png".into(),
        individual: "pages/courses/individual".into(),
        categories: "pages/courses/categories".into(),
        images: "Images/Course_Images".into(),
    }
}
