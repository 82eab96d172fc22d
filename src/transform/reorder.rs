//! Course outline reordering.
//!
//! Units inside the outline accordion are sorted by [`UnitRank`]: numbered
//! units in numeric order, then other titled items, untitled items, and
//! author credits last. The sort is stable, so items of equal rank keep
//! their page order.
//!
//! Items are moved as text. When anything other than whitespace sits
//! between them the outline is left alone, since moving items would
//! detach that content from its neighbours.

use std::borrow::Cow;

use super::{Page, Transform};
use crate::config::ReorderConfig;
use crate::html::accordion::{Item, Outline, UnitRank, normalize_title, numbering_issues};
use crate::html::{escape, numbering::strip_list_numbering};

/// The `reorder` pass.
pub struct Reorderer<'a> {
    config: &'a ReorderConfig,
}

impl<'a> Reorderer<'a> {
    pub fn new(config: &'a ReorderConfig) -> Self {
        Self { config }
    }

    /// Rebuild the outline's inner HTML. `None` when the outline is absent
    /// or cannot be reordered safely.
    fn reorder_outline(&self, html: &str, notes: &mut Vec<String>) -> Option<String> {
        let outline = Outline::find(html)?;
        if outline.items.is_empty() {
            return None;
        }

        let gaps = outline.gaps();
        let inner_gaps = &gaps[1..gaps.len() - 1];
        if inner_gaps.iter().any(|g| !html[g.clone()].trim().is_empty()) {
            notes.push("content between outline items, units not reordered".to_string());
            return None;
        }

        let mut items: Vec<(UnitRank, String)> = outline
            .items
            .iter()
            .map(|item| self.render_item(html, item))
            .collect();
        items.sort_by_key(|(rank, _)| *rank);

        let mut numbers: Vec<u32> = items.iter().filter_map(|(r, _)| r.number()).collect();
        numbers.sort_unstable();
        notes.extend(numbering_issues(&numbers).iter().map(ToString::to_string));

        let separator = inner_gaps
            .first()
            .map_or("\n", |g| &html[g.clone()]);
        let leading = &html[gaps[0].clone()];
        let trailing = &html[gaps[gaps.len() - 1].clone()];

        let body = items
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join(separator);

        let mut out = String::with_capacity(html.len());
        out.push_str(&html[..outline.inner.start]);
        out.push_str(leading);
        out.push_str(&body);
        out.push_str(trailing);
        out.push_str(&html[outline.inner.end..]);
        Some(out)
    }

    /// Item text with its title normalised, and its sort rank.
    fn render_item(&self, html: &str, item: &Item) -> (UnitRank, String) {
        let text = &html[item.range.clone()];
        let Some(title) = item.title.as_ref() else {
            return (UnitRank::Untitled, text.to_string());
        };

        let normalized = normalize_title(&title.text);
        let rank = UnitRank::of(Some(&normalized));
        let inner = &html[title.inner.clone()];

        // Titles with inline markup are kept as written
        if !self.config.normalize_titles || normalized == title.text || inner.contains('<') {
            return (rank, text.to_string());
        }

        let start = title.inner.start - item.range.start;
        let end = title.inner.end - item.range.start;
        let rendered = format!("{}{}{}", &text[..start], escape(&normalized), &text[end..]);
        (rank, rendered)
    }
}

impl Transform for Reorderer<'_> {
    const NAME: &'static str = "reorder";

    fn apply<'h>(&self, html: &'h str, _page: &Page, notes: &mut Vec<String>) -> Cow<'h, str> {
        let mut out = match self.reorder_outline(html, notes) {
            Some(s) if s != html => Cow::Owned(s),
            _ => Cow::Borrowed(html),
        };
        if self.config.strip_numbering
            && let Cow::Owned(stripped) = strip_list_numbering(&out)
        {
            out = Cow::Owned(stripped);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, topic: &str) -> String {
        format!(
            "<div class=\"accordion-item\">\n        <div class=\"accordion-header\"><h3 class=\"accordion-title\">{title}</h3></div>\n        <div class=\"accordion-content\"><ul><li>{topic}</li></ul></div>\n      </div>"
        )
    }

    fn page(items: &[String]) -> String {
        format!(
            "<section>\n    <div class=\"accordion\" id=\"course-outline\">\n      {}\n    </div>\n</section>",
            items.join("\n      ")
        )
    }

    fn run(config: &ReorderConfig, html: &str) -> (String, Vec<String>) {
        let mut notes = Vec::new();
        let out = Reorderer::new(config)
            .apply(html, &Page::new("x.html"), &mut notes)
            .into_owned();
        (out, notes)
    }

    fn order(html: &str) -> Vec<String> {
        Outline::find(html)
            .unwrap()
            .items
            .iter()
            .map(|i| i.title_text().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_reorder_units() {
        let html = page(&[
            item("Author: Jane", "Bio"),
            item("Unit 2: Tables", "1. Insert"),
            item("Course summary", "Recap"),
            item("unit 1 :  Basics", "2. Typing"),
            item("Study Unit 3: Macros", "Record"),
        ]);
        let (out, notes) = run(&ReorderConfig::default(), &html);

        assert_eq!(
            order(&out),
            [
                "Unit 1: Basics",
                "Unit 2: Tables",
                "Study Unit 3: Macros",
                "Course summary",
                "Author: Jane"
            ]
        );
        assert!(out.contains("<li>Insert</li>"));
        assert!(out.contains("<li>Typing</li>"));
        assert!(notes.is_empty());

        // Layout is preserved: same separators and indentation
        assert!(out.starts_with("<section>\n    <div class=\"accordion\" id=\"course-outline\">\n      <div"));
        assert!(out.ends_with("</div>\n    </div>\n</section>"));
    }

    #[test]
    fn test_reorder_is_idempotent() {
        let html = page(&[item("Unit 2: B", "b"), item("Unit 1: A", "a")]);
        let (once, _) = run(&ReorderConfig::default(), &html);
        let mut notes = Vec::new();
        let config = ReorderConfig::default();
        let twice = Reorderer::new(&config).apply(&once, &Page::new("x.html"), &mut notes);
        assert!(matches!(twice, Cow::Borrowed(_)));
    }

    #[test]
    fn test_stable_for_equal_rank() {
        let html = page(&[item("Extra B", "b"), item("Extra A", "a"), item("Unit 1: X", "x")]);
        let (out, _) = run(&ReorderConfig::default(), &html);
        assert_eq!(order(&out), ["Unit 1: X", "Extra B", "Extra A"]);
    }

    #[test]
    fn test_numbering_warnings() {
        let html = page(&[item("Unit 1: A", "a"), item("Unit 4: C", "c"), item("Unit 4: D", "d")]);
        let (_, notes) = run(&ReorderConfig::default(), &html);
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("duplicate unit numbers: [4]"));
        assert!(notes[1].contains("expected 1 to 4"));
    }

    #[test]
    fn test_skips_mixed_content() {
        let html = page(&[
            item("Unit 2: B", "b"),
            "<p>Note</p>".to_string(),
            item("Unit 1: A", "a"),
        ]);
        let config = ReorderConfig {
            strip_numbering: false,
            ..Default::default()
        };
        let (out, notes) = run(&config, &html);
        assert_eq!(out, html);
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_titles_kept_when_disabled() {
        let html = page(&[item("unit 1 :  Basics", "a")]);
        let config = ReorderConfig {
            normalize_titles: false,
            strip_numbering: false,
        };
        let (out, _) = run(&config, &html);
        assert_eq!(out, html);
    }

    #[test]
    fn test_no_outline() {
        let html = "<ul><li>1. First</li></ul>";
        let (out, notes) = run(&ReorderConfig::default(), html);
        assert_eq!(out, "<ul><li>First</li></ul>");
        assert!(notes.is_empty());
    }
}
