//! Fragment, script and artifact removal.
//!
//! Steps run in a fixed order on each page:
//!
//! 1. elements matching `{ tag, class }` are removed with their content
//! 2. accordion items whose title matches a pattern are removed
//! 3. `<script src>` tags ending with a configured name are removed
//! 4. configured scripts are included once before `</body>`
//! 5. literal replacements, then blank-line collapsing
//!
//! Removed elements take the whitespace after them along, so the result of
//! one run is unchanged by the next.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::{Page, Transform, splice};
use crate::config::StripConfig;
use crate::core::split_suffix;
use crate::html::{accordion::find_title, find_elements, find_open_tag};

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n){2,}").unwrap());
static BODY_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</body\s*>").unwrap());

/// The `strip` pass.
pub struct Stripper<'a> {
    config: &'a StripConfig,
    titles: Vec<Regex>,
}

impl<'a> Stripper<'a> {
    pub fn new(config: &'a StripConfig) -> Result<Self, regex::Error> {
        let titles = config
            .item_titles
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<_, _>>()?;
        Ok(Self { config, titles })
    }

    fn remove_elements(&self, html: String) -> String {
        self.config.elements.iter().fold(html, |html, m| {
            let ranges = find_elements(&html, &m.tag, |t| t.has_classes(&m.class));
            remove_ranges(&html, &ranges).unwrap_or(html)
        })
    }

    fn remove_items(&self, html: String) -> String {
        if self.titles.is_empty() {
            return html;
        }
        let ranges: Vec<_> = find_elements(&html, "div", |t| t.has_class("accordion-item"))
            .into_iter()
            .filter(|r| {
                find_title(&html, r.clone())
                    .is_some_and(|t| self.titles.iter().any(|re| re.is_match(&t.text)))
            })
            .collect();
        remove_ranges(&html, &ranges).unwrap_or(html)
    }

    fn remove_scripts(&self, html: String) -> String {
        let names = &self.config.remove_scripts;
        if names.is_empty() {
            return html;
        }
        let ranges = find_elements(&html, "script", |t| {
            t.attr("src")
                .is_some_and(|src| names.iter().any(|n| split_suffix(src).0.ends_with(n.as_str())))
        });
        remove_ranges(&html, &ranges).unwrap_or(html)
    }

    fn ensure_scripts(&self, mut html: String, root: &str) -> String {
        for script in &self.config.ensure_scripts {
            if has_script(&html, script) {
                continue;
            }
            let Some(at) = BODY_CLOSE.find_iter(&html).last().map(|m| m.start()) else {
                continue;
            };
            let line_start = html[..at].rfind('\n').map_or(0, |i| i + 1);
            let indent = &html[line_start..at];
            let indent = if indent.trim().is_empty() { indent } else { "" };
            let tag = format!("<script src=\"{root}{script}\"></script>\n{indent}");
            html.insert_str(at, &tag);
        }
        html
    }

    fn replace_text(&self, mut html: String) -> String {
        for r in &self.config.replacements {
            if html.contains(r.from.as_str()) {
                html = html.replace(r.from.as_str(), &r.to);
            }
        }
        if self.config.collapse_blank_lines
            && let Cow::Owned(collapsed) = BLANK_LINES.replace_all(&html, "\n\n")
        {
            html = collapsed;
        }
        html
    }
}

impl Transform for Stripper<'_> {
    const NAME: &'static str = "strip";

    fn apply<'h>(&self, html: &'h str, page: &Page, _notes: &mut Vec<String>) -> Cow<'h, str> {
        let out = self.remove_elements(html.to_string());
        let out = self.remove_items(out);
        let out = self.remove_scripts(out);
        let out = self.ensure_scripts(out, &page.root);
        let out = self.replace_text(out);
        if out == html {
            Cow::Borrowed(html)
        } else {
            Cow::Owned(out)
        }
    }
}

/// Remove `ranges` and the whitespace following each. `None` when empty.
fn remove_ranges(html: &str, ranges: &[Range<usize>]) -> Option<String> {
    if ranges.is_empty() {
        return None;
    }
    let bytes = html.as_bytes();
    let extended: Vec<_> = ranges
        .iter()
        .map(|r| {
            let mut end = r.end;
            while end < bytes.len() && bytes[end].is_ascii_whitespace() {
                end += 1;
            }
            r.start..end
        })
        .collect();
    Some(splice(html, &extended, |_, _| String::new()))
}

/// Whether a `<script>` with a src resolving to `script` is present.
fn has_script(html: &str, script: &str) -> bool {
    let want = script.trim_start_matches("./");
    let mut pos = 0;
    while let Some(open) = find_open_tag(html, pos, "script") {
        if let Some(src) = open.attr("src") {
            let path = split_suffix(src).0;
            let path = path.trim_start_matches(['.', '/']);
            if path == want {
                return true;
            }
        }
        pos = open.end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ElementMatch, Replacement};

    const PAGE: &str = r#"<html>
  <body>
    <section class="breadcrumb-section">
      <a href="../index.html">Home</a>
    </section>
    <div class="accordion" id="course-outline">
      <div class="accordion-item">
        <div class="accordion-header"><h3 class="accordion-title">Unit 1: Start</h3></div>
        <div class="accordion-content"><ul><li>A</li></ul></div>
      </div>
      <div class="accordion-item">
        <div class="accordion-header"><h3 class="accordion-title">Author: Jane</h3></div>
        <div class="accordion-content"><div><p>Bio</p></div></div>
      </div>
    </div>
    <p>line`nbreak</p>



    <script src="../../../assets/js/restructure-course.js"></script>
    <script src="../../../assets/js/main.js?v=1"></script>
  </body>
</html>
"#;

    fn config() -> StripConfig {
        StripConfig {
            elements: vec![ElementMatch {
                tag: "section".into(),
                class: "breadcrumb-section".into(),
            }],
            remove_scripts: vec!["restructure-course.js".into(), "reorder-units.js".into()],
            ensure_scripts: vec!["assets/js/reorder-units.js".into(), "assets/js/main.js".into()],
            ..Default::default()
        }
    }

    fn run(config: &StripConfig, html: &str) -> String {
        let stripper = Stripper::new(config).unwrap();
        let page = Page::new("pages/courses/individual/word.html");
        stripper.apply(html, &page, &mut Vec::new()).into_owned()
    }

    #[test]
    fn test_strip_page() {
        let out = run(&config(), PAGE);

        assert!(!out.contains("breadcrumb"));
        assert!(out.contains("Unit 1: Start"));
        assert!(!out.contains("Author"));
        assert!(!out.contains("Bio"));
        assert!(!out.contains("restructure-course.js"));
        assert!(out.contains("line\nbreak"));
        assert!(!out.contains("\n\n\n"));

        // main.js is already present with a query string
        assert_eq!(out.matches("main.js").count(), 1);
        assert_eq!(
            out.matches(r#"<script src="../../../assets/js/reorder-units.js"></script>"#).count(),
            1
        );
        assert!(out.contains("reorder-units.js\"></script>\n  </body>"));
    }

    #[test]
    fn test_strip_is_idempotent() {
        let config = config();
        let once = run(&config, PAGE);
        let stripper = Stripper::new(&config).unwrap();
        let page = Page::new("pages/courses/individual/word.html");
        let twice = stripper.apply(&once, &page, &mut Vec::new());
        assert!(matches!(twice, Cow::Borrowed(_)));
    }

    #[test]
    fn test_nothing_to_do_borrows() {
        let config = StripConfig {
            item_titles: vec![],
            replacements: vec![],
            ..Default::default()
        };
        let stripper = Stripper::new(&config).unwrap();
        let html = "<p>hello</p>\n";
        let out = stripper.apply(html, &Page::new("index.html"), &mut Vec::new());
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_replacements_in_order() {
        let config = StripConfig {
            replacements: vec![
                Replacement {
                    from: "a".into(),
                    to: "b".into(),
                },
                Replacement {
                    from: "b".into(),
                    to: "c".into(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(run(&config, "<p>ab</p>"), "<p>cc</p>");
    }

    #[test]
    fn test_ensure_without_body() {
        let config = StripConfig {
            ensure_scripts: vec!["assets/js/a.js".into()],
            ..Default::default()
        };
        assert_eq!(run(&config, "<p>fragment</p>"), "<p>fragment</p>");
    }

    #[test]
    fn test_invalid_pattern() {
        let config = StripConfig {
            item_titles: vec!["(".into()],
            ..Default::default()
        };
        assert!(Stripper::new(&config).is_err());
    }
}
