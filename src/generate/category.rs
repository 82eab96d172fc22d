//! Category pages with one tile per course.

use super::{Rendered, SiteLayout};
use crate::{
    catalog::{Course, ImageIndex, Level},
    core::{relative_dir, slugify},
    embed::{Template, pages::CategoryVars},
    html::{escape, escape_attr},
};
use std::fmt;

/// What a tile shows for one course.
///
/// Grouped text files only name courses; catalog entries add the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileCourse<'c> {
    pub title: &'c str,
    pub teaser: &'c str,
    pub level: Option<Level>,
}

impl<'c> TileCourse<'c> {
    pub fn named(title: &'c str) -> Self {
        Self {
            title,
            ..Default::default()
        }
    }

    pub fn from_course(course: &'c Course) -> Self {
        Self {
            title: &course.title,
            teaser: course.teaser(),
            level: Some(course.level),
        }
    }
}

/// Renders category pages into the category directory.
pub struct CategoryRenderer<'a> {
    template: Template<CategoryVars<'static>>,
    layout: &'a SiteLayout,
    images: &'a ImageIndex,
    root: String,
    courses_href: String,
    images_href: String,
}

impl<'a> CategoryRenderer<'a> {
    #[cfg(test)]
    pub fn new(layout: &'a SiteLayout, images: &'a ImageIndex) -> Self {
        Self::with_template(crate::embed::pages::CATEGORY_HTML, layout, images)
    }

    pub fn with_template(
        template: Template<CategoryVars<'static>>,
        layout: &'a SiteLayout,
        images: &'a ImageIndex,
    ) -> Self {
        Self {
            template,
            root: SiteLayout::root_of(&layout.categories),
            courses_href: relative_dir(&layout.categories, &layout.individual),
            images_href: relative_dir(&layout.categories, &layout.images),
            layout,
            images,
        }
    }

    /// Image source for a course: a mapped course image, else the site logo.
    fn image_src(&self, title: &str) -> String {
        match self.images.resolve(title) {
            Some(file) => format!("{}{}", self.images_href, file),
            None => format!("{}{}", self.root, self.layout.logo),
        }
    }

    /// Render one tile. Courses with an empty slug have no page to link to.
    pub fn tile(&self, course: &TileCourse) -> Option<String> {
        let slug = slugify(course.title);
        if slug.is_empty() {
            return None;
        }
        let tile = TileMarkup {
            href: format!("{}{slug}.html", self.courses_href),
            image: self.image_src(course.title),
            course,
        };
        Some(tile.to_string())
    }

    /// Render a category page. Returns `None` when the title yields an empty slug.
    pub fn render(
        &self,
        title: &str,
        description: &str,
        courses: &[TileCourse],
    ) -> Option<Rendered> {
        let slug = slugify(title);
        if slug.is_empty() {
            return None;
        }

        let tiles: Vec<String> = courses.iter().filter_map(|c| self.tile(c)).collect();
        let description = if description.trim().is_empty() {
            "Browse available courses in this category"
        } else {
            description.trim()
        };

        let html = self.template.render(&CategoryVars {
            site_name: &self.layout.name,
            logo: &self.layout.logo,
            root: &self.root,
            title: title.trim(),
            description,
            course_count: tiles.len(),
            tiles: &tiles.join("\n"),
        });

        Some(Rendered::new(&slug, html))
    }
}

/// One `feature-card` tile.
struct TileMarkup<'a> {
    href: String,
    image: String,
    course: &'a TileCourse<'a>,
}

impl fmt::Display for TileMarkup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.course.title.trim();
        writeln!(
            f,
            "      <a href=\"{}\" class=\"feature-card-link\">",
            escape_attr(&self.href)
        )?;
        writeln!(f, "        <div class=\"feature-card\">")?;
        writeln!(f, "          <div class=\"feature-image\">")?;
        writeln!(
            f,
            "            <img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape_attr(&self.image),
            escape_attr(title)
        )?;
        writeln!(f, "          </div>")?;
        writeln!(f, "          <h3>{}</h3>", escape(title))?;
        let teaser = self.course.teaser.trim();
        if !teaser.is_empty() {
            writeln!(f, "          <p>{}</p>", escape(teaser))?;
        }
        if let Some(level) = self.course.level {
            writeln!(
                f,
                "          <span class=\"level-badge\" style=\"background:{}\">{}</span>",
                level.color(),
                level.as_str()
            )?;
        }
        writeln!(f, "        </div>")?;
        write!(f, "      </a>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::test_layout;
    use std::fs;
    use tempfile::TempDir;

    fn images(dir: &TempDir) -> ImageIndex {
        let images = dir.path().join("Images/Course_Images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("Intro to Computers.png"), "").unwrap();
        fs::write(images.join("word.png"), "").unwrap();
        let csv = dir.path().join("names.csv");
        fs::write(&csv, "CourseName,CourseImage\nBasic Microsoft Word,word\n").unwrap();
        ImageIndex::load(Some(&csv), &images).unwrap()
    }

    #[test]
    fn test_tile_image_resolution() {
        let dir = TempDir::new().unwrap();
        let index = images(&dir);
        let layout = test_layout();
        let renderer = CategoryRenderer::new(&layout, &index);

        let by_token = renderer.tile(&TileCourse::named("Basic Microsoft Word")).unwrap();
        assert!(by_token.contains("src=\"../../../Images/Course_Images/word.png\""));
        assert!(by_token.contains("href=\"../individual/basic-microsoft-word.html\""));

        let by_name = renderer.tile(&TileCourse::named("intro  to computers")).unwrap();
        assert!(by_name.contains("Course_Images/Intro to Computers.png"));

        let fallback = renderer.tile(&TileCourse::named("Leadership")).unwrap();
        assert!(fallback.contains("src=\"../../../Images/Logo.png\""));
    }

    #[test]
    fn test_tile_details() {
        let index = ImageIndex::default();
        let layout = test_layout();
        let renderer = CategoryRenderer::new(&layout, &index);
        let course = Course {
            title: "Data & Skills".into(),
            description: "Numbers.".into(),
            level: Level::Advanced,
            ..Default::default()
        };

        let tile = renderer.tile(&TileCourse::from_course(&course)).unwrap();
        assert!(tile.contains("<h3>Data &amp; Skills</h3>"));
        assert!(tile.contains("<p>Numbers.</p>"));
        assert!(tile.contains("background:#ef4444\">Advanced</span>"));
        assert!(renderer.tile(&TileCourse::named("!!")).is_none());
    }

    #[test]
    fn test_render_category_page() {
        let index = ImageIndex::default();
        let layout = test_layout();
        let renderer = CategoryRenderer::new(&layout, &index);
        let courses = [
            TileCourse::named("Intro to Computers"),
            TileCourse::named("Basic Microsoft Word"),
            TileCourse::named("--"),
        ];

        let page = renderer
            .render("Compliance, Law and Governance", "", &courses)
            .unwrap();
        assert_eq!(page.file_name, "compliance-law-and-governance.html");
        assert!(page.html.contains("<h1>Compliance, Law and Governance</h1>"));
        assert!(page.html.contains("Browse available courses in this category"));
        assert!(page.html.contains("2 courses"));
        assert_eq!(page.html.matches("feature-card-link").count(), 2);
        assert!(!page.html.contains("__"));
    }

    #[test]
    fn test_render_skips_empty_slug() {
        let index = ImageIndex::default();
        let layout = test_layout();
        assert!(CategoryRenderer::new(&layout, &index).render("!!!", "", &[]).is_none());
    }
}
