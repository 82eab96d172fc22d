//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `pages` - Default course and category page templates
//! - `init` - Commented `coursekit.toml` written by `init`
//!
//! # Usage
//!
//! ```ignore
//! use embed::pages::{COURSE_HTML, CourseVars};
//!
//! let template = COURSE_HTML.or_file(config.generate.course_template.as_deref())?;
//! let html = template.render(&vars);
//! ```

mod template;

pub use template::{Template, TemplateError, TemplateVars, substitute};

pub mod pages {
    use super::{Template, TemplateVars, substitute};
    use crate::{catalog::Level, html::escape};

    /// Variables for course.html.
    ///
    /// Text fields are escaped on render; `outline` is inserted as markup.
    pub struct CourseVars<'a> {
        pub site_name: &'a str,
        pub logo: &'a str,
        pub root: &'a str,
        pub title: &'a str,
        pub teaser: &'a str,
        pub overview: &'a str,
        pub level: Level,
        pub duration: &'a str,
        pub outline: &'a str,
        pub category_title: &'a str,
        pub category_href: &'a str,
    }

    impl TemplateVars for CourseVars<'_> {
        const REQUIRED: &'static [&'static str] = &["__COURSE_TITLE__", "__OUTLINE__"];

        fn apply(&self, content: &str) -> String {
            let logo = escape(self.logo);
            let site_name = escape(self.site_name);
            let title = escape(self.title);
            let teaser = escape(self.teaser);
            let overview = escape(self.overview);
            let duration = escape(self.duration);
            let category_title = escape(self.category_title);
            let category_href = escape(self.category_href);
            substitute(
                content,
                &[
                    ("__ROOT__", self.root),
                    ("__LOGO__", &logo),
                    ("__SITE_NAME__", &site_name),
                    ("__COURSE_TITLE__", &title),
                    ("__TEASER__", &teaser),
                    ("__OVERVIEW__", &overview),
                    ("__LEVEL_COLOR__", self.level.color()),
                    ("__LEVEL__", self.level.as_str()),
                    ("__DURATION__", &duration),
                    ("__CATEGORY_TITLE__", &category_title),
                    ("__CATEGORY_HREF__", &category_href),
                    ("__OUTLINE__", self.outline),
                ],
            )
        }
    }

    /// Variables for category.html.
    pub struct CategoryVars<'a> {
        pub site_name: &'a str,
        pub logo: &'a str,
        pub root: &'a str,
        pub title: &'a str,
        pub description: &'a str,
        pub course_count: usize,
        pub tiles: &'a str,
    }

    impl TemplateVars for CategoryVars<'_> {
        const REQUIRED: &'static [&'static str] = &["__CATEGORY_TITLE__", "__TILES__"];

        fn apply(&self, content: &str) -> String {
            let logo = escape(self.logo);
            let site_name = escape(self.site_name);
            let title = escape(self.title);
            let description = escape(self.description);
            let count = crate::utils::plural_count(self.course_count, "course");
            substitute(
                content,
                &[
                    ("__ROOT__", self.root),
                    ("__LOGO__", &logo),
                    ("__SITE_NAME__", &site_name),
                    ("__CATEGORY_TITLE__", &title),
                    ("__CATEGORY_DESCRIPTION__", &description),
                    ("__COURSE_COUNT__", &count),
                    ("__TILES__", self.tiles),
                ],
            )
        }
    }

    /// Individual course page.
    pub const COURSE_HTML: Template<CourseVars<'static>> =
        Template::new("course.html", include_str!("pages/course.html"));

    /// Category listing page.
    pub const CATEGORY_HTML: Template<CategoryVars<'static>> =
        Template::new("category.html", include_str!("pages/category.html"));
}

pub mod init {
    use super::{Template, TemplateVars, substitute};

    /// Variables for the init config template.
    pub struct ConfigVars {
        pub version: &'static str,
    }

    impl Default for ConfigVars {
        fn default() -> Self {
            Self {
                version: env!("CARGO_PKG_VERSION"),
            }
        }
    }

    impl TemplateVars for ConfigVars {
        fn apply(&self, content: &str) -> String {
            substitute(content, &[("__VERSION__", self.version)])
        }
    }

    /// Default `coursekit.toml`.
    pub const CONFIG_TOML: Template<ConfigVars> =
        Template::new("coursekit.toml", include_str!("init/coursekit.toml"));
}
