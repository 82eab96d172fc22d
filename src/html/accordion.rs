//! Course outline accordions.
//!
//! Course pages list their syllabus as
//!
//! ```text
//! <div class="accordion" id="course-outline">
//!   <div class="accordion-item">
//!     <div class="accordion-header"><h3 class="accordion-title">Unit 1: ...</h3></div>
//!     <div class="accordion-content"><ul><li>...</li></ul></div>
//!   </div>
//!   ...
//! </div>
//! ```
//!
//! This module locates the container, its items and their titles, and
//! computes the canonical unit order.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::element::{OpenTag, element_end, find_elements, find_open_tag, inner_text};

/// `id` of the outline container on course pages.
pub const OUTLINE_ID: &str = "course-outline";

static UNIT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bunit\s*(\d+)").unwrap());
static UNIT_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^unit\s*(\d+)\s*:\s*(.*)$").unwrap());
static AUTHOR_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^author\s*:").unwrap());

/// Sort key of an accordion item.
///
/// Numbered units come first in numeric order, then other titled items,
/// then untitled items, and author credits last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnitRank {
    Numbered(u32),
    Other,
    Untitled,
    Author,
}

impl UnitRank {
    /// Rank an item by its (whitespace-collapsed) title.
    pub fn of(title: Option<&str>) -> Self {
        let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::Untitled;
        };
        if AUTHOR_TITLE.is_match(title) {
            return Self::Author;
        }
        UNIT_NUMBER
            .captures(title)
            .and_then(|c| c[1].parse().ok())
            .map_or(Self::Other, Self::Numbered)
    }

    pub const fn number(self) -> Option<u32> {
        match self {
            Self::Numbered(n) => Some(n),
            _ => None,
        }
    }
}

/// Normalise a unit title: `unit 3 :  intro` → `Unit 3: intro`.
///
/// Titles not starting with a unit number only get whitespace collapsed.
pub fn normalize_title(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    match UNIT_TITLE.captures(&collapsed) {
        Some(c) => format!("Unit {}: {}", &c[1], c[2].trim()),
        None => collapsed,
    }
}

/// Title element of an accordion item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    /// Range of the title element's inner HTML (absolute offsets).
    pub inner: Range<usize>,
    /// Whitespace-collapsed text content.
    pub text: String,
}

/// One `accordion-item` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Range of the whole item element (absolute offsets).
    pub range: Range<usize>,
    pub title: Option<Title>,
}

impl Item {
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().map(|t| t.text.as_str())
    }

    pub fn rank(&self) -> UnitRank {
        UnitRank::of(self.title_text())
    }
}

/// The outline container and its direct items.
#[derive(Debug, Clone)]
pub struct Outline {
    /// Range of the container's inner HTML.
    pub inner: Range<usize>,
    pub items: Vec<Item>,
}

impl Outline {
    /// Locate the outline: the `#course-outline` div, or the first
    /// `.accordion` div when no container has that id.
    pub fn find(html: &str) -> Option<Self> {
        let open = find_div(html, |t| t.attr("id") == Some(OUTLINE_ID))
            .or_else(|| find_div(html, |t| t.has_class("accordion")))?;
        let end = element_end(html, &open)?;
        let inner = open.end..html[..end].rfind("</").unwrap_or(end);

        let items = find_elements(&html[inner.clone()], "div", |t| t.has_class("accordion-item"))
            .into_iter()
            .map(|r| {
                let range = r.start + inner.start..r.end + inner.start;
                let title = find_title(html, range.clone());
                Item { range, title }
            })
            .collect();

        Some(Self { inner, items })
    }

    /// Text between consecutive items (and before the first / after the
    /// last), as `(before, between..., after)` ranges.
    pub fn gaps(&self) -> Vec<Range<usize>> {
        let mut gaps = Vec::with_capacity(self.items.len() + 1);
        let mut cursor = self.inner.start;
        for item in &self.items {
            gaps.push(cursor..item.range.start);
            cursor = item.range.end;
        }
        gaps.push(cursor..self.inner.end);
        gaps
    }
}

fn find_div<F: Fn(&OpenTag) -> bool>(html: &str, pred: F) -> Option<OpenTag> {
    let mut pos = 0;
    while let Some(open) = find_open_tag(html, pos, "div") {
        if pred(&open) {
            return Some(open);
        }
        pos = open.end;
    }
    None
}

/// Find the title of the item at `range`: `h3.accordion-title`, then any
/// `h3`, then the `.accordion-header` text.
pub fn find_title(html: &str, range: Range<usize>) -> Option<Title> {
    let slice = &html[range.clone()];
    let candidates = [
        ("h3", Some("accordion-title")),
        ("h3", None),
        ("div", Some("accordion-header")),
    ];

    for (tag, class) in candidates {
        let found = find_elements(slice, tag, |t| class.is_none_or(|c| t.has_class(c)));
        let Some(el) = found.into_iter().next() else {
            continue;
        };
        let open = find_open_tag(slice, el.start, tag)?;
        let inner_end = slice[..el.end].rfind("</").unwrap_or(el.end);
        let inner = open.end + range.start..inner_end + range.start;
        let text = inner_text(&html[inner.clone()]);
        return Some(Title { inner, text });
    }
    None
}

/// Anomalies found in the unit numbering of one outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberingIssue {
    /// Some unit numbers appear more than once.
    Duplicate(Vec<u32>),
    /// Numbers do not cover `min..=max` contiguously.
    Gap { found: Vec<u32>, min: u32, max: u32 },
}

impl fmt::Display for NumberingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(nums) => write!(f, "duplicate unit numbers: {nums:?}"),
            Self::Gap { found, min, max } => write!(
                f,
                "missing or non-sequential unit numbers {found:?}, expected {min} to {max}"
            ),
        }
    }
}

/// Check sorted unit numbers for duplicates and gaps.
pub fn numbering_issues(sorted: &[u32]) -> Vec<NumberingIssue> {
    let mut issues = Vec::new();
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return issues;
    };

    let mut dups: Vec<u32> = sorted
        .windows(2)
        .filter(|w| w[0] == w[1])
        .map(|w| w[0])
        .collect();
    dups.dedup();
    if !dups.is_empty() {
        issues.push(NumberingIssue::Duplicate(dups));
    }

    if u64::from(max - min) + 1 != sorted.len() as u64 {
        issues.push(NumberingIssue::Gap {
            found: sorted.to_vec(),
            min,
            max,
        });
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: &[&str]) -> String {
        let body: String = items
            .iter()
            .map(|t| {
                format!(
                    "\n  <div class=\"accordion-item\"><div class=\"accordion-header\"><h3 class=\"accordion-title\">{t}</h3></div><div class=\"accordion-content\"><ul><li>x</li></ul></div></div>"
                )
            })
            .collect();
        format!("<section><div class=\"accordion\" id=\"course-outline\">{body}\n</div></section>")
    }

    #[test]
    fn test_rank() {
        assert_eq!(UnitRank::of(Some("Unit 3: Tables")), UnitRank::Numbered(3));
        assert_eq!(UnitRank::of(Some("Study Unit 12")), UnitRank::Numbered(12));
        assert_eq!(UnitRank::of(Some("Author: J. Smith")), UnitRank::Author);
        assert_eq!(UnitRank::of(Some("Course summary")), UnitRank::Other);
        assert_eq!(UnitRank::of(Some("   ")), UnitRank::Untitled);
        assert_eq!(UnitRank::of(None), UnitRank::Untitled);

        let mut ranks = [
            UnitRank::Author,
            UnitRank::Untitled,
            UnitRank::Numbered(2),
            UnitRank::Other,
            UnitRank::Numbered(1),
        ];
        ranks.sort();
        assert_eq!(
            ranks,
            [
                UnitRank::Numbered(1),
                UnitRank::Numbered(2),
                UnitRank::Other,
                UnitRank::Untitled,
                UnitRank::Author,
            ]
        );
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("unit 3 :  intro to  Excel"), "Unit 3: intro to Excel");
        assert_eq!(normalize_title("UNIT 10: Pivot tables"), "Unit 10: Pivot tables");
        assert_eq!(normalize_title("  Course \n summary "), "Course summary");
        assert_eq!(normalize_title("Study Unit 2: x"), "Study Unit 2: x");
    }

    #[test]
    fn test_find_outline() {
        let html = page(&["Unit 2: B", "Unit 1: A", "Author: Someone"]);
        let outline = Outline::find(&html).unwrap();
        assert_eq!(outline.items.len(), 3);

        let titles: Vec<_> = outline.items.iter().map(|i| i.title_text().unwrap()).collect();
        assert_eq!(titles, ["Unit 2: B", "Unit 1: A", "Author: Someone"]);

        let title = outline.items[0].title.as_ref().unwrap();
        assert_eq!(&html[title.inner.clone()], "Unit 2: B");

        // Gaps between items are whitespace only
        let gaps = outline.gaps();
        assert_eq!(gaps.len(), 4);
        assert!(gaps.iter().all(|g| html[g.clone()].trim().is_empty()));
    }

    #[test]
    fn test_find_outline_falls_back_to_accordion_class() {
        let html = "<div class=\"accordion\"><div class=\"accordion-item\"><h3>Unit 1</h3></div></div>";
        let outline = Outline::find(html).unwrap();
        assert_eq!(outline.items.len(), 1);
        assert_eq!(outline.items[0].rank(), UnitRank::Numbered(1));
    }

    #[test]
    fn test_no_outline() {
        assert!(Outline::find("<div class=\"hero\"></div>").is_none());
    }

    #[test]
    fn test_numbering_issues() {
        assert!(numbering_issues(&[1, 2, 3]).is_empty());
        assert!(numbering_issues(&[]).is_empty());
        assert_eq!(
            numbering_issues(&[1, 2, 2, 3]),
            vec![
                NumberingIssue::Duplicate(vec![2]),
                NumberingIssue::Gap { found: vec![1, 2, 2, 3], min: 1, max: 3 },
            ]
        );
        assert_eq!(
            numbering_issues(&[1, 3]),
            vec![NumberingIssue::Gap { found: vec![1, 3], min: 1, max: 3 }]
        );
    }

    #[test]
    fn test_numbering_issues_extreme_numbers() {
        assert_eq!(
            numbering_issues(&[0, u32::MAX]),
            vec![NumberingIssue::Gap { found: vec![0, u32::MAX], min: 0, max: u32::MAX }]
        );
        assert!(numbering_issues(&[u32::MAX - 1, u32::MAX]).is_empty());
    }
}
