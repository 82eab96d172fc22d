//! Individual course pages.

use super::{Rendered, SiteLayout};
use crate::{
    catalog::{Course, Unit},
    core::relative_dir,
    embed::{Template, pages::CourseVars},
    html::escape,
};
use std::fmt;

const NO_TOPICS: &str = "See course content for details";

/// The category a course page links back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub title: String,
    pub slug: String,
}

/// Render the `#course-outline` accordion for a list of units.
///
/// An untitled unit is named `Unit <i>` by position; a unit without topics
/// gets a single placeholder item.
pub fn render_outline(units: &[Unit]) -> String {
    OutlineMarkup(units).to_string()
}

struct OutlineMarkup<'a>(&'a [Unit]);

impl fmt::Display for OutlineMarkup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<div class=\"accordion\" id=\"course-outline\">")?;

        for (i, unit) in self.0.iter().enumerate() {
            let title = unit.title.trim();
            let title = if title.is_empty() {
                format!("Unit {}", i + 1)
            } else {
                title.to_string()
            };

            writeln!(f, "            <div class=\"accordion-item\">")?;
            writeln!(
                f,
                "              <div class=\"accordion-header\" onclick=\"toggleItem(this)\">"
            )?;
            writeln!(
                f,
                "                <h3 class=\"accordion-title\">{}</h3>",
                escape(&title)
            )?;
            writeln!(f, "                <span class=\"accordion-toggle\">+</span>")?;
            writeln!(f, "              </div>")?;
            writeln!(f, "              <div class=\"accordion-content\">")?;
            writeln!(f, "                <ul>")?;
            if unit.topics.is_empty() {
                writeln!(f, "                  <li>{NO_TOPICS}</li>")?;
            }
            for topic in &unit.topics {
                writeln!(f, "                  <li>{}</li>", escape(topic))?;
            }
            writeln!(f, "                </ul>")?;
            writeln!(f, "              </div>")?;
            writeln!(f, "            </div>")?;
        }

        write!(f, "          </div>")
    }
}

/// Renders course pages into the individual course directory.
pub struct CourseRenderer<'a> {
    template: Template<CourseVars<'static>>,
    layout: &'a SiteLayout,
    root: String,
    /// Link prefix from the course directory to the category directory.
    categories_href: String,
}

impl<'a> CourseRenderer<'a> {
    #[cfg(test)]
    pub fn new(layout: &'a SiteLayout) -> Self {
        Self::with_template(crate::embed::pages::COURSE_HTML, layout)
    }

    pub fn with_template(template: Template<CourseVars<'static>>, layout: &'a SiteLayout) -> Self {
        Self {
            template,
            root: SiteLayout::root_of(&layout.individual),
            categories_href: relative_dir(&layout.individual, &layout.categories),
            layout,
        }
    }

    /// Render one course. Returns `None` when the title yields an empty slug.
    ///
    /// Without a category the back link points at the site index.
    pub fn render(&self, course: &Course, category: Option<&CategoryLink>) -> Option<Rendered> {
        let slug = course.slug();
        if slug.is_empty() {
            return None;
        }

        let (category_title, category_href) = match category {
            Some(link) => (
                link.title.as_str(),
                format!("{}{}.html", self.categories_href, link.slug),
            ),
            None => (self.layout.name.as_str(), format!("{}index.html", self.root)),
        };

        let outline = render_outline(&course.units);
        let title = if course.title.trim().is_empty() {
            "Course"
        } else {
            course.title.trim()
        };

        let html = self.template.render(&CourseVars {
            site_name: &self.layout.name,
            logo: &self.layout.logo,
            root: &self.root,
            title,
            teaser: course.teaser(),
            overview: course.long_overview(),
            level: course.level,
            duration: &course.duration,
            outline: &outline,
            category_title,
            category_href: &category_href,
        });

        Some(Rendered::new(&slug, html))
    }
}
